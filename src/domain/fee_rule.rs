//! Fee rules: how one usage dimension of a tariff plan is priced.
//!
//! Every published bank formula reduces to one of a handful of shapes, so
//! plans are described as data and evaluated by the shared interpreters
//! below instead of one hand-written function per plan. All evaluators are
//! pure and total: amounts are normalized before use and invalid inputs
//! price to zero.

use serde::{Deserialize, Serialize};

use crate::domain::money::{normalize, round_rub};

/// One segment of a progressive scale. `up_to` is the upper bound of the
/// segment in rubles; the last segment omits it and runs to infinity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentTier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_to: Option<f64>,
    pub rate: f64,
}

impl PercentTier {
    pub fn up_to(limit: f64, rate: f64) -> Self {
        Self { up_to: Some(limit), rate }
    }

    /// Open-ended terminal segment.
    pub fn open(rate: f64) -> Self {
        Self { up_to: None, rate }
    }
}

/// One band of a banded scale: rate applied to the whole amount plus a
/// fixed addition. Band selection is by threshold, not consumption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeBand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_to: Option<f64>,
    pub rate: f64,
    pub add: f64,
}

impl FeeBand {
    pub fn up_to(limit: f64, rate: f64, add: f64) -> Self {
        Self { up_to: Some(limit), rate, add }
    }

    /// Open-ended terminal band.
    pub fn open(rate: f64, add: f64) -> Self {
        Self { up_to: None, rate, add }
    }
}

/// Pricing rule for one usage dimension of one plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeeRule {
    /// No charge at all.
    Free,
    /// Fixed price per operation beyond a free allowance.
    /// «0 ₽ — первые 25 переводов, далее — 59 ₽ за перевод».
    PerOperation {
        price: f64,
        #[serde(default)]
        free_count: u32,
    },
    /// Flat percentage of the whole amount with an optional minimum fee.
    /// The minimum only engages on strictly positive amounts.
    Percent {
        rate: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_fee: Option<f64>,
    },
    /// Free up to `free_amount`, then `fee_per_step` for every started
    /// block of `step` rubles above it.
    /// «До 150 000 ₽ бесплатно, свыше — 500 ₽ за каждые 15 000 ₽».
    Stepped {
        free_amount: f64,
        step: f64,
        fee_per_step: f64,
    },
    /// Progressive scale: each slice of the amount is charged at the rate
    /// of its own segment. Zero-rate segments still consume their width.
    Progressive { tiers: Vec<PercentTier> },
    /// Banded scale: the single matching band prices the whole amount as
    /// `amount × rate + add`.
    Banded { bands: Vec<FeeBand> },
}

impl FeeRule {
    pub fn per(price: f64, free_count: u32) -> Self {
        Self::PerOperation { price, free_count }
    }

    pub fn pct(rate: f64) -> Self {
        Self::Percent { rate, min_fee: None }
    }

    pub fn pct_min(rate: f64, min_fee: f64) -> Self {
        Self::Percent { rate, min_fee: Some(min_fee) }
    }

    pub fn stepped(free_amount: f64, step: f64, fee_per_step: f64) -> Self {
        Self::Stepped { free_amount, step, fee_per_step }
    }

    pub fn progressive(tiers: Vec<PercentTier>) -> Self {
        Self::Progressive { tiers }
    }

    pub fn banded(bands: Vec<FeeBand>) -> Self {
        Self::Banded { bands }
    }

    /// Monthly charge of this rule for the given usage amount, in whole
    /// rubles. For [`FeeRule::PerOperation`] the amount is an operation
    /// count; everywhere else it is rubles per month.
    pub fn charge(&self, amount: f64) -> f64 {
        let amount = normalize(amount);
        match self {
            Self::Free => 0.0,
            Self::PerOperation { price, free_count } => {
                per_operation_fee(amount, *price, *free_count)
            }
            Self::Percent { rate, min_fee } => percent_fee(amount, *rate, *min_fee),
            Self::Stepped { free_amount, step, fee_per_step } => {
                stepped_fee(amount, *free_amount, *step, *fee_per_step)
            }
            Self::Progressive { tiers } => progressive_fee(amount, tiers),
            Self::Banded { bands } => banded_fee(amount, bands),
        }
    }

    /// Whether the rule ends in an open segment/band. Rules without
    /// thresholds are trivially terminated.
    pub fn has_open_end(&self) -> bool {
        match self {
            Self::Progressive { tiers } => {
                tiers.last().map(|t| t.up_to.is_none()).unwrap_or(false)
            }
            Self::Banded { bands } => {
                bands.last().map(|b| b.up_to.is_none()).unwrap_or(false)
            }
            _ => true,
        }
    }
}

/// Fixed price per operation beyond the free allowance. Fractional counts
/// are floored before comparison.
fn per_operation_fee(count: f64, price: f64, free_count: u32) -> f64 {
    let paid = (count.floor() - f64::from(free_count)).max(0.0);
    round_rub(paid * price)
}

/// Flat percentage with an optional floor. A zero amount never triggers
/// the floor.
fn percent_fee(amount: f64, rate: f64, min_fee: Option<f64>) -> f64 {
    if amount <= 0.0 {
        return 0.0;
    }
    round_rub((amount * rate).max(min_fee.unwrap_or(0.0)))
}

/// Stepped fee: one charge per started block above the free amount. An
/// amount sitting exactly on a block boundary does not start a new block.
fn stepped_fee(amount: f64, free_amount: f64, step: f64, fee_per_step: f64) -> f64 {
    if amount <= free_amount || step <= 0.0 {
        return 0.0;
    }
    let over = amount - free_amount;
    let steps = (over / step).ceil();
    round_rub(steps * fee_per_step)
}

/// Progressive percentage: consume the amount through the segments in
/// order, charging each slice at its own rate.
fn progressive_fee(amount: f64, tiers: &[PercentTier]) -> f64 {
    let mut rest = amount;
    if rest <= 0.0 {
        return 0.0;
    }

    let mut from = 0.0;
    let mut fee = 0.0;

    for tier in tiers {
        let limit = tier.up_to.unwrap_or(f64::INFINITY);
        if rest <= 0.0 || limit <= from {
            break;
        }

        let chunk = rest.min(limit - from);
        if chunk > 0.0 && tier.rate > 0.0 {
            fee += chunk * tier.rate;
        }

        rest -= chunk;
        from = limit;
    }

    round_rub(fee)
}

/// Banded surcharge: pick the first band whose bound covers the amount
/// (else the last band) and price the whole amount with it.
fn banded_fee(amount: f64, bands: &[FeeBand]) -> f64 {
    if amount <= 0.0 || bands.is_empty() {
        return 0.0;
    }

    let mut selected = &bands[bands.len() - 1];
    for band in bands {
        if let Some(up_to) = band.up_to {
            if amount <= up_to {
                selected = band;
                break;
            }
        }
    }

    round_rub(amount * selected.rate + selected.add)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_rule_charges_nothing() {
        assert_eq!(FeeRule::Free.charge(1_000_000.0), 0.0);
    }

    #[test]
    fn per_operation_with_free_allowance() {
        let rule = FeeRule::per(59.0, 25);
        // (30 - 25) × 59 = 295
        assert_eq!(rule.charge(30.0), 295.0);
        assert_eq!(rule.charge(25.0), 0.0);
        assert_eq!(rule.charge(0.0), 0.0);
    }

    #[test]
    fn per_operation_floors_fractional_counts() {
        let rule = FeeRule::per(49.0, 0);
        assert_eq!(rule.charge(3.9), 147.0);
    }

    #[test]
    fn per_operation_is_monotonic_in_count() {
        let rule = FeeRule::per(49.0, 10);
        let mut prev = 0.0;
        for count in 0..40 {
            let fee = rule.charge(f64::from(count));
            assert!(fee >= prev, "fee decreased at count {count}");
            prev = fee;
        }
    }

    #[test]
    fn percent_with_minimum() {
        let rule = FeeRule::pct_min(0.013, 99.0);
        // 1.3% of 100 000 = 1 300
        assert_eq!(rule.charge(100_000.0), 1_300.0);
        // 1.3% of 1 000 = 13, floored to 99
        assert_eq!(rule.charge(1_000.0), 99.0);
    }

    #[test]
    fn percent_floor_does_not_engage_on_zero() {
        let rule = FeeRule::pct_min(0.013, 99.0);
        assert_eq!(rule.charge(0.0), 0.0);
        assert_eq!(rule.charge(-5.0), 0.0);
    }

    #[test]
    fn stepped_boundary_does_not_start_a_new_block() {
        // «До 150 000 ₽ бесплатно, свыше — 500 ₽ за каждые 15 000 ₽»
        let rule = FeeRule::stepped(150_000.0, 15_000.0, 500.0);
        assert_eq!(rule.charge(150_000.0), 0.0);
        assert_eq!(rule.charge(165_000.0), 500.0);
        assert_eq!(rule.charge(165_001.0), 1_000.0);
    }

    #[test]
    fn stepped_exact_multiples_charge_exactly_k_steps() {
        let rule = FeeRule::stepped(100_000.0, 50_000.0, 350.0);
        for k in 1..=5 {
            let amount = 100_000.0 + 50_000.0 * f64::from(k);
            assert_eq!(rule.charge(amount), 350.0 * f64::from(k));
        }
    }

    #[test]
    fn progressive_charges_each_slice_at_its_rate() {
        let rule = FeeRule::progressive(vec![
            PercentTier::up_to(50_000.0, 0.005),
            PercentTier::up_to(500_000.0, 0.03),
            PercentTier::open(0.05),
        ]);
        // 50 000 × 0.5% + 450 000 × 3% + 100 000 × 5% = 250 + 13 500 + 5 000
        assert_eq!(rule.charge(600_000.0), 18_750.0);
    }

    #[test]
    fn progressive_zero_rate_tier_shields_its_width() {
        let rule = FeeRule::progressive(vec![
            PercentTier::up_to(100_000.0, 0.0),
            PercentTier::open(0.004),
        ]);
        assert_eq!(rule.charge(100_000.0), 0.0);
        // only the 50 000 above the shield is charged
        assert_eq!(rule.charge(150_000.0), 200.0);
    }

    #[test]
    fn progressive_conserves_the_amount_across_tiers() {
        // With all rates at 1.0 the fee equals the consumed amount, so no
        // slice is double-counted or dropped.
        let rule = FeeRule::progressive(vec![
            PercentTier::up_to(10_000.0, 1.0),
            PercentTier::up_to(70_000.0, 1.0),
            PercentTier::open(1.0),
        ]);
        for amount in [0.0, 5_000.0, 10_000.0, 45_000.0, 70_000.0, 1_000_000.0] {
            assert_eq!(rule.charge(amount), amount);
        }
    }

    #[test]
    fn banded_prices_the_whole_amount_with_one_band() {
        let rule = FeeRule::banded(vec![
            FeeBand::up_to(400_000.0, 0.015, 99.0),
            FeeBand::up_to(1_000_000.0, 0.05, 99.0),
            FeeBand::open(0.15, 99.0),
        ]);
        // 400 000 × 1.5% + 99 = 6 099
        assert_eq!(rule.charge(400_000.0), 6_099.0);
        // 400 001 × 5% + 99 = 20 099.05 → 20 099
        assert_eq!(rule.charge(400_001.0), 20_099.0);
    }

    #[test]
    fn banded_falls_back_to_the_last_band() {
        let rule = FeeRule::banded(vec![
            FeeBand::up_to(400_000.0, 0.01, 79.0),
            FeeBand::open(0.15, 79.0),
        ]);
        // 2 000 000 × 15% + 79 = 300 079
        assert_eq!(rule.charge(2_000_000.0), 300_079.0);
    }

    #[test]
    fn banded_higher_bands_do_not_affect_lower_amounts() {
        let base = vec![
            FeeBand::up_to(400_000.0, 0.015, 99.0),
            FeeBand::open(0.15, 99.0),
        ];
        let changed = vec![
            FeeBand::up_to(400_000.0, 0.015, 99.0),
            FeeBand::open(0.30, 500.0),
        ];
        let amount = 250_000.0;
        assert_eq!(
            FeeRule::banded(base).charge(amount),
            FeeRule::banded(changed).charge(amount),
        );
    }

    #[test]
    fn invalid_amounts_price_to_zero() {
        let rules = [
            FeeRule::per(59.0, 0),
            FeeRule::pct(0.02),
            FeeRule::stepped(0.0, 10_000.0, 80.0),
            FeeRule::progressive(vec![PercentTier::open(0.05)]),
            FeeRule::banded(vec![FeeBand::open(0.15, 99.0)]),
        ];
        for rule in rules {
            assert_eq!(rule.charge(f64::NAN), 0.0);
            assert_eq!(rule.charge(-100.0), 0.0);
        }
    }

    #[test]
    fn open_end_detection() {
        assert!(FeeRule::progressive(vec![PercentTier::open(0.05)]).has_open_end());
        assert!(!FeeRule::progressive(vec![PercentTier::up_to(100.0, 0.05)]).has_open_end());
        assert!(FeeRule::Free.has_open_end());
        assert!(FeeRule::per(49.0, 0).has_open_end());
    }

    #[test]
    fn fee_rule_serde_round_trip() {
        let rule = FeeRule::banded(vec![
            FeeBand::up_to(400_000.0, 0.015, 99.0),
            FeeBand::open(0.15, 99.0),
        ]);
        let json = serde_json::to_string(&rule).unwrap();
        let back: FeeRule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }
}
