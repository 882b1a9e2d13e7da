//! Tariff plans and the bank catalog.
//!
//! Reference data only: the catalog is built once (compiled-in constants or
//! a pre-curated JSON document) and never mutated at runtime.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::bank::BankId;
use crate::domain::fee_rule::FeeRule;
use crate::domain::money::round_rub;
use crate::domain::org::OrgForm;

/// Pricing of one usage dimension: one or more fee rules whose charges sum.
///
/// Almost every plan needs a single rule; the list exists for published
/// formulas that combine shapes, e.g. a progressive rate plus a one-off
/// fixed addition above a threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pricing(pub Vec<FeeRule>);

impl Pricing {
    pub fn free() -> Self {
        Self(vec![FeeRule::Free])
    }

    pub fn rule(rule: FeeRule) -> Self {
        Self(vec![rule])
    }

    pub fn sum(rules: Vec<FeeRule>) -> Self {
        Self(rules)
    }

    /// Total charge for the dimension. Each rule rounds its own component,
    /// so the sum is always whole rubles.
    pub fn charge(&self, amount: f64) -> f64 {
        self.0.iter().map(|r| r.charge(amount)).sum()
    }

    pub fn rules(&self) -> &[FeeRule] {
        &self.0
    }
}

/// Monthly account maintenance fee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MonthlyFee {
    /// Published fixed price per month.
    Fixed { rub: f64 },
    /// The bank prices maintenance from incoming revenue; `estimate` is the
    /// published baseline we show. Callers render this as "varies", never
    /// as an exact number.
    RevenueBased { estimate: f64 },
}

impl MonthlyFee {
    pub fn fixed(rub: f64) -> Self {
        Self::Fixed { rub }
    }

    pub fn revenue_based(estimate: f64) -> Self {
        Self::RevenueBased { estimate }
    }

    /// Ruble amount used in totals, rounded.
    pub fn amount(&self) -> f64 {
        match self {
            Self::Fixed { rub } => round_rub(*rub),
            Self::RevenueBased { estimate } => round_rub(*estimate),
        }
    }

    /// True when the amount is a baseline estimate rather than a price.
    pub fn is_estimate(&self) -> bool {
        matches!(self, Self::RevenueBased { .. })
    }
}

/// One priced service offering of one bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffPlan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Legal forms the plan is sold to.
    pub for_orgs: Vec<OrgForm>,
    pub monthly: MonthlyFee,
    /// Outgoing payments to other companies (per-operation pricing).
    pub payments: Pricing,
    /// Withdrawals to personal cards / transfers to individuals.
    pub withdrawal: Pricing,
    /// Cash deposits to the account.
    pub deposit: Pricing,
    /// Referral link for "open an account".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl TariffPlan {
    pub fn applies_to(&self, org: OrgForm) -> bool {
        self.for_orgs.contains(&org)
    }
}

/// How plans of one bank are ordered in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanOrdering {
    /// Keep the curated catalog order regardless of computed cost.
    Curated,
    /// Sort ascending by total monthly cost; ties keep catalog order.
    ByTotalCost,
}

/// One bank with its ordered plan list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    pub id: BankId,
    pub name: String,
    pub ordering: PlanOrdering,
    pub plans: Vec<TariffPlan>,
}

/// The full immutable plan catalog, versioned by snapshot date. Banks are
/// presented in registration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub updated_at: NaiveDate,
    pub banks: Vec<Bank>,
}

impl Catalog {
    pub fn bank(&self, id: BankId) -> Option<&Bank> {
        self.banks.iter().find(|b| b.id == id)
    }

    pub fn plan_count(&self) -> usize {
        self.banks.iter().map(|b| b.plans.len()).sum()
    }
}
