//! Bank identifiers.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Banks known to the calculator. Identifiers match the logo/asset names
/// used by the site (`/logos/<id>.svg`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankId {
    Alfa,
    Tinkoff,
    Tochka,
    Modulbank,
    Vtb,
}

impl BankId {
    /// All identifiers, in presentation order.
    pub const ALL: [BankId; 5] = [
        BankId::Alfa,
        BankId::Tinkoff,
        BankId::Tochka,
        BankId::Modulbank,
        BankId::Vtb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alfa => "alfa",
            Self::Tinkoff => "tinkoff",
            Self::Tochka => "tochka",
            Self::Modulbank => "modulbank",
            Self::Vtb => "vtb",
        }
    }
}

impl std::fmt::Display for BankId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BankId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alfa" => Ok(Self::Alfa),
            "tinkoff" => Ok(Self::Tinkoff),
            "tochka" => Ok(Self::Tochka),
            "modulbank" => Ok(Self::Modulbank),
            "vtb" => Ok(Self::Vtb),
            other => Err(DomainError::UnknownBank(other.to_string())),
        }
    }
}
