//! Calculator inputs and per-plan results.

use serde::{Deserialize, Serialize};

use crate::domain::bank::BankId;
use crate::domain::money::normalize;
use crate::domain::org::OrgForm;

/// What the user enters into the calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalcInputs {
    pub org: OrgForm,
    /// Outgoing payments to other companies, operations per month.
    pub payments: f64,
    /// Withdrawals to personal cards, rubles per month.
    pub withdrawal: f64,
    /// Cash deposits, rubles per month.
    pub deposit: f64,
}

impl CalcInputs {
    /// Copy with all three quantities clamped to usable amounts. The form
    /// layer validates before submitting, but the engine never trusts it.
    pub fn normalized(&self) -> Self {
        Self {
            org: self.org,
            payments: normalize(self.payments),
            withdrawal: normalize(self.withdrawal),
            deposit: normalize(self.deposit),
        }
    }
}

/// Computed cost of one plan for one set of inputs. All amounts are whole
/// rubles per month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffCalcResult {
    pub bank_id: BankId,
    pub bank_name: String,

    pub tariff_id: String,
    pub tariff_name: String,
    pub description: String,

    pub monthly_fee: f64,
    /// The monthly fee is a revenue-dependent baseline, not a price;
    /// display layers render it as "varies".
    pub monthly_fee_is_estimate: bool,
    /// Fees for payments to other companies.
    pub transfers_to_legal: f64,
    /// Fees for withdrawals to cards / transfers to individuals.
    pub transfers_to_individuals: f64,
    /// Fees for cash handling.
    pub cash_handling: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl TariffCalcResult {
    /// Full monthly cost. Used only for ranking, never stored.
    pub fn total_cost(&self) -> f64 {
        self.monthly_fee
            + self.transfers_to_legal
            + self.transfers_to_individuals
            + self.cash_handling
    }
}
