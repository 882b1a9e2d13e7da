//! Tariff engine: evaluates every plan of the catalog for one request.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    Bank, CalcInputs, Catalog, PlanOrdering, TariffCalcResult, TariffPlan,
};

/// Service computing comparable monthly costs across all plans of all
/// banks. Holds an immutable catalog snapshot; every call is a pure
/// recomputation, so concurrent use needs no coordination.
pub struct TariffEngine {
    catalog: Arc<Catalog>,
}

impl TariffEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Quote every plan of every bank for the given inputs.
    ///
    /// Output is grouped by bank in catalog registration order. Within a
    /// bank the order is its declared policy: curated catalog order, or
    /// ascending total cost with ties keeping catalog order.
    pub fn calculate(&self, inputs: &CalcInputs) -> Vec<TariffCalcResult> {
        let inputs = inputs.normalized();
        let mut results = Vec::with_capacity(self.catalog.plan_count());

        for bank in &self.catalog.banks {
            let mut quotes: Vec<TariffCalcResult> = bank
                .plans
                .iter()
                .map(|plan| quote(bank, plan, &inputs))
                .collect();

            if bank.ordering == PlanOrdering::ByTotalCost {
                // Vec::sort_by is stable, so equal totals keep catalog order.
                quotes.sort_by(|a, b| a.total_cost().total_cmp(&b.total_cost()));
            }

            results.extend(quotes);
        }

        debug!(
            plans = results.len(),
            payments = inputs.payments,
            withdrawal = inputs.withdrawal,
            deposit = inputs.deposit,
            "tariffs calculated"
        );

        results
    }
}

/// Price one plan. Inputs are already normalized; every component comes
/// back rounded from the fee rules.
fn quote(bank: &Bank, plan: &TariffPlan, inputs: &CalcInputs) -> TariffCalcResult {
    TariffCalcResult {
        bank_id: bank.id,
        bank_name: bank.name.clone(),
        tariff_id: plan.id.clone(),
        tariff_name: plan.name.clone(),
        description: plan.description.clone(),
        monthly_fee: plan.monthly.amount(),
        monthly_fee_is_estimate: plan.monthly.is_estimate(),
        transfers_to_legal: plan.payments.charge(inputs.payments),
        transfers_to_individuals: plan.withdrawal.charge(inputs.withdrawal),
        cash_handling: plan.deposit.charge(inputs.deposit),
        link: plan.link.clone(),
    }
}

// ── Tests ──────────────────────────────────────────────────────
