pub mod bank;
pub mod calc;
pub mod error;
pub mod estimate;
pub mod fee_rule;
pub mod money;
pub mod org;
pub mod tariff;

// Re-export commonly used types
pub use bank::BankId;
pub use calc::{CalcInputs, TariffCalcResult};
pub use error::{DomainError, DomainResult, InfraError};
pub use estimate::{AcquiringChannel, BankCoeffs, CostEstimate, EstimateInputs};
pub use fee_rule::{FeeBand, FeeRule, PercentTier};
pub use org::OrgForm;
pub use tariff::{Bank, Catalog, MonthlyFee, PlanOrdering, Pricing, TariffPlan};
