//! Legacy coefficient-based cost estimator.
//!
//! The older calculator surface prices a whole bank with one linear
//! coefficient bundle instead of per-plan formulas and reports a
//! confidence band rather than an exact figure. Kept fully separate from
//! [`TariffEngine`](super::engine::TariffEngine).

use tracing::debug;

use crate::domain::estimate::{BankCoeffs, CostEstimate, EstimateInputs};
use crate::domain::{BankId, DomainError, DomainResult};

/// Coarse per-bank estimator over injected coefficient bundles.
pub struct CoeffEstimator {
    coeffs: Vec<BankCoeffs>,
}

impl CoeffEstimator {
    pub fn new(coeffs: Vec<BankCoeffs>) -> Self {
        Self { coeffs }
    }

    pub fn coeffs_for(&self, bank: BankId) -> Option<&BankCoeffs> {
        self.coeffs.iter().find(|c| c.bank == bank)
    }

    /// Estimate the monthly cost band for one bank.
    pub fn estimate(&self, bank: BankId, inputs: &EstimateInputs) -> DomainResult<CostEstimate> {
        let coeffs = self
            .coeffs_for(bank)
            .ok_or_else(|| DomainError::UnknownBank(bank.to_string()))?;

        let estimate = coeffs.estimate(inputs);
        debug!(
            bank = %bank,
            total = estimate.total,
            min = estimate.min,
            max = estimate.max,
            "legacy estimate computed"
        );

        Ok(estimate)
    }
}

// ── Tests ──────────────────────────────────────────────────────
