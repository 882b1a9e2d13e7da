//! Legal form of the business being served.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Registration form a tariff plan applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgForm {
    /// Individual entrepreneur (ИП).
    Ip,
    /// Limited liability company (ООО).
    Ooo,
}

impl std::fmt::Display for OrgForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ip => write!(f, "ip"),
            Self::Ooo => write!(f, "ooo"),
        }
    }
}

impl std::str::FromStr for OrgForm {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ip" | "ип" => Ok(Self::Ip),
            "ooo" | "ооо" => Ok(Self::Ooo),
            other => Err(DomainError::Validation(format!(
                "unknown legal form: {other} (expected ip or ooo)"
            ))),
        }
    }
}
