//! Request DTOs for calculator frontends.

use serde::Deserialize;
use validator::Validate;

use crate::domain::{CalcInputs, OrgForm};

/// Calculation request as submitted by a form or a JSON document.
///
/// Validation mirrors the client-side checks; the engine still
/// re-normalizes every quantity on its own.
#[derive(Debug, Deserialize, Validate)]
pub struct CalcRequest {
    pub org: OrgForm,
    #[validate(range(min = 0.0, message = "payments must be non-negative"))]
    pub payments: f64,
    #[validate(range(min = 0.0, message = "withdrawal must be non-negative"))]
    pub withdrawal: f64,
    #[validate(range(min = 0.0, message = "deposit must be non-negative"))]
    pub deposit: f64,
}

impl From<CalcRequest> for CalcInputs {
    fn from(req: CalcRequest) -> Self {
        Self {
            org: req.org,
            payments: req.payments,
            withdrawal: req.withdrawal,
            deposit: req.deposit,
        }
    }
}
