//! Coefficient-based cost estimation (legacy calculator model).
//!
//! One linear coefficient bundle prices a whole bank. Coarser than the
//! per-plan engine and deliberately kept apart from it: the two produce
//! different, non-comparable numbers for the same bank.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::money::{normalize, round_rub};
use crate::domain::BankId;

/// Card acquiring channel, priced differently by every bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcquiringChannel {
    Online,
    Offline,
}

impl std::str::FromStr for AcquiringChannel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "offline" | "pos" => Ok(Self::Offline),
            other => Err(DomainError::Validation(format!(
                "unknown acquiring channel: {other} (expected online or offline)"
            ))),
        }
    }
}

/// What the older calculator form collects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateInputs {
    /// Monthly turnover, rubles. Collected for the spend-share gauge; the
    /// fee formula itself does not use it.
    pub turnover: f64,
    /// Outgoing payments per month.
    pub payments: f64,
    /// Cash volume, rubles per month.
    pub cash: f64,
    /// Acquiring turnover, rubles per month.
    pub acquiring: f64,
    pub channel: AcquiringChannel,
}

/// Heuristic estimate band for one bank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub bank: BankId,
    /// Point estimate, rubles per month.
    pub total: f64,
    /// Lower bound of the displayed band: `round(total × 0.85)`.
    pub min: f64,
    /// Upper bound of the displayed band: `round(total × 1.10)`.
    pub max: f64,
}

/// Linear pricing coefficients for one bank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BankCoeffs {
    pub bank: BankId,
    /// Base monthly fee, rubles.
    pub base: f64,
    /// Rubles per outgoing payment.
    pub per_payment: f64,
    /// Share of the cash volume.
    pub cash_rate: f64,
    /// Share of online acquiring turnover.
    pub aq_online: f64,
    /// Share of offline (POS) acquiring turnover.
    pub aq_offline: f64,
}

impl BankCoeffs {
    /// Monthly cost band for the given usage. Quantities are clamped the
    /// same way the plan engine clamps its inputs.
    pub fn estimate(&self, inputs: &EstimateInputs) -> CostEstimate {
        let payments = normalize(inputs.payments);
        let cash = normalize(inputs.cash);
        let acquiring = normalize(inputs.acquiring);

        let aq_rate = match inputs.channel {
            AcquiringChannel::Online => self.aq_online,
            AcquiringChannel::Offline => self.aq_offline,
        };

        let total =
            self.base + payments * self.per_payment + cash * self.cash_rate + acquiring * aq_rate;

        CostEstimate {
            bank: self.bank,
            total,
            min: round_rub(total * 0.85),
            max: round_rub(total * 1.10),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
