//! Referral link resolution.
//!
//! Maps a bank to its outbound "open an account" URL and appends the
//! configured partner tail and, optionally, a click sub-id marker. The
//! engine stores the resulting string opaquely; nothing here is fetched
//! or validated over the network.

use chrono::Utc;
use tracing::debug;

use crate::domain::BankId;

/// Partner base URLs. Some already carry query parameters.
pub fn link_base(bank: BankId) -> &'static str {
    match bank {
        BankId::Modulbank => "https://partner.modulbank.ru/r/YXvAFdhlhxJB",
        BankId::Alfa => "https://alfa.link/a3wetf",
        BankId::Tochka => "https://partner.tochka.com?referer1=344202107903",
        BankId::Tinkoff => "https://t-cpa.ru/1P5RZh",
        // plain product page, no partner program
        BankId::Vtb => "https://www.vtb.ru/small-business/",
    }
}

/// Referral-link builder configured from [`AppConfig`](crate::config::AppConfig).
#[derive(Debug, Clone, Default)]
pub struct RefLinks {
    /// Query tail appended to every link, e.g. `ref=ID&utm_source=rko`.
    pub tail: Option<String>,
    /// Append a unique click marker for partner-program tracking.
    pub add_sub_id: bool,
    /// Query key for the click marker; partner programs differ.
    pub sub_key: Option<String>,
}

impl RefLinks {
    /// Outbound URL for the bank with tail and optional sub-id applied.
    pub fn resolve(&self, bank: BankId) -> String {
        let mut url = join_with_tail(link_base(bank), self.tail.as_deref().unwrap_or(""));

        if self.add_sub_id {
            let key = self.sub_key.as_deref().unwrap_or("sub");
            let marker = click_marker();
            url = join_with_tail(&url, &format!("{key}={marker}"));
        }

        debug!(bank = %bank, url = %url, "referral link resolved");
        url
    }
}

/// Join a base URL and a query tail, picking `?` or `&` as needed. Tails
/// may arrive with their own leading separator.
fn join_with_tail(base: &str, tail: &str) -> String {
    let base = base.trim();
    let tail = tail.trim();
    if tail.is_empty() {
        return base.to_string();
    }

    if tail.starts_with('?') || tail.starts_with('&') {
        return format!("{base}{tail}");
    }

    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{base}{sep}{tail}")
}

/// Compact unique marker for one click: the current millisecond timestamp
/// in base-36.
fn click_marker() -> String {
    to_base36(Utc::now().timestamp_millis().max(0) as u64)
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut out = String::new();
    while n > 0 {
        if let Some(c) = char::from_digit((n % 36) as u32, 36) {
            out.insert(0, c);
        }
        n /= 36;
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────
