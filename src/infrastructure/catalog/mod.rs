//! Compiled-in plan catalog.
//!
//! Every constant below is taken from the banks' public tariff sheets;
//! the Russian quotes next to the rules cite the published wording the
//! numbers came from. Plans are data records interpreted by the shared
//! fee-rule evaluators, so a correction to one plan can never affect
//! another.

pub mod loader;

use chrono::NaiveDate;

use crate::domain::estimate::BankCoeffs;
use crate::domain::{
    Bank, BankId, Catalog, FeeBand, FeeRule, MonthlyFee, OrgForm, PercentTier, PlanOrdering,
    Pricing, TariffPlan,
};
use crate::infrastructure::links::RefLinks;

pub use loader::{load_from_file, load_or_builtin};

/// Date the tariff sheets were last checked against the banks' sites.
fn snapshot_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 1).unwrap_or(NaiveDate::MIN)
}

/// The full compiled-in catalog: four banks, fourteen plans. Alfa keeps
/// its curated presentation order; all other banks are re-sorted by total
/// cost at calculation time.
pub fn builtin(links: &RefLinks) -> Catalog {
    Catalog {
        updated_at: snapshot_date(),
        banks: vec![alfa(links), tinkoff(links), tochka(links), modulbank(links)],
    }
}

fn both() -> Vec<OrgForm> {
    vec![OrgForm::Ip, OrgForm::Ooo]
}

fn alfa(links: &RefLinks) -> Bank {
    let link = || Some(links.resolve(BankId::Alfa));

    Bank {
        id: BankId::Alfa,
        name: "Альфа-Банк".to_string(),
        ordering: PlanOrdering::Curated,
        plans: vec![
            TariffPlan {
                id: "alfa-zero".to_string(),
                name: "Ноль за обслуживание".to_string(),
                description: "Для начинающего или сезонного бизнеса.".to_string(),
                for_orgs: both(),
                // обслуживание зависит от поступлений; минимальный вариант 0 ₽
                monthly: MonthlyFee::revenue_based(0.0),
                // «0 ₽ — первые 3 перевода, далее — 149 ₽ за перевод»
                payments: Pricing::rule(FeeRule::per(149.0, 3)),
                // «2% + 149 ₽» на весь объём переводов физлицам
                withdrawal: Pricing::rule(FeeRule::banded(vec![FeeBand::open(0.02, 149.0)])),
                // «0% — до 100 000 ₽, 0,4% — свыше 100 000 ₽»
                deposit: Pricing::rule(FeeRule::progressive(vec![
                    PercentTier::up_to(100_000.0, 0.0),
                    PercentTier::open(0.004),
                ])),
                link: link(),
            },
            TariffPlan {
                id: "alfa-simple".to_string(),
                name: "Простой".to_string(),
                description: "Для обслуживания без лишних условий.".to_string(),
                for_orgs: both(),
                // обслуживание — проценты от поступлений; оценка 5 000 ₽/мес
                monthly: MonthlyFee::revenue_based(5_000.0),
                payments: Pricing::free(),
                // «0% — до 1 млн ₽, 2,8% — от 1 млн ₽»
                withdrawal: Pricing::rule(FeeRule::progressive(vec![
                    PercentTier::up_to(1_000_000.0, 0.0),
                    PercentTier::open(0.028),
                ])),
                // «1% — до 750 000 ₽, 2,25% — 750 000 — 2 млн ₽, 3,5% — свыше»
                deposit: Pricing::rule(FeeRule::progressive(vec![
                    PercentTier::up_to(750_000.0, 0.01),
                    PercentTier::up_to(2_000_000.0, 0.0225),
                    PercentTier::open(0.035),
                ])),
                link: link(),
            },
            TariffPlan {
                id: "alfa-growth".to_string(),
                name: "Быстрое развитие".to_string(),
                description: "Для активно развивающегося бизнеса.".to_string(),
                for_orgs: both(),
                monthly: MonthlyFee::fixed(1_990.0),
                // «0 ₽ — первые 25 переводов, далее — 59 ₽ за перевод»
                payments: Pricing::rule(FeeRule::per(59.0, 25)),
                // «0% — до 100 000 ₽, 1,6% + 59 ₽ — от 100 000 ₽»:
                // прогрессивная ставка плюс разовые 59 ₽ сверх порога
                withdrawal: Pricing::sum(vec![
                    FeeRule::progressive(vec![
                        PercentTier::up_to(100_000.0, 0.0),
                        PercentTier::open(0.016),
                    ]),
                    FeeRule::banded(vec![
                        FeeBand::up_to(100_000.0, 0.0, 0.0),
                        FeeBand::open(0.0, 59.0),
                    ]),
                ]),
                // «0% — до 500 000 ₽, 0,2% — свыше 500 000 ₽»
                deposit: Pricing::rule(FeeRule::progressive(vec![
                    PercentTier::up_to(500_000.0, 0.0),
                    PercentTier::open(0.002),
                ])),
                link: link(),
            },
            TariffPlan {
                id: "alfa-active".to_string(),
                name: "Активные расчёты".to_string(),
                description: "Для частых расчётов с контрагентами.".to_string(),
                for_orgs: both(),
                monthly: MonthlyFee::fixed(3_990.0),
                // «0 ₽ — первые 50 переводов, далее — 49 ₽ за перевод»
                payments: Pricing::rule(FeeRule::per(49.0, 50)),
                // «0% — до 200 000 ₽, 1,4% — от 200 000 ₽»
                withdrawal: Pricing::rule(FeeRule::progressive(vec![
                    PercentTier::up_to(200_000.0, 0.0),
                    PercentTier::open(0.014),
                ])),
                // «0% — до 600 000 ₽, 0,15% — свыше 600 000 ₽»
                deposit: Pricing::rule(FeeRule::progressive(vec![
                    PercentTier::up_to(600_000.0, 0.0),
                    PercentTier::open(0.0015),
                ])),
                link: link(),
            },
        ],
    }
}

fn tinkoff(links: &RefLinks) -> Bank {
    let link = || Some(links.resolve(BankId::Tinkoff));

    Bank {
        id: BankId::Tinkoff,
        name: "Т-Банк".to_string(),
        ordering: PlanOrdering::ByTotalCost,
        plans: vec![
            TariffPlan {
                id: "tinkoff-simple".to_string(),
                name: "Простой".to_string(),
                description: "Для начинающих предпринимателей.".to_string(),
                for_orgs: both(),
                monthly: MonthlyFee::fixed(490.0),
                // «49 ₽ за операцию»
                payments: Pricing::rule(FeeRule::per(49.0, 0)),
                // «1,5% + 99 ₽ — до 400 000 ₽, 5% + 99 ₽ — до 1 млн ₽,
                //  15% + 99 ₽ — от 1 млн ₽»
                withdrawal: Pricing::rule(FeeRule::banded(vec![
                    FeeBand::up_to(400_000.0, 0.015, 99.0),
                    FeeBand::up_to(1_000_000.0, 0.05, 99.0),
                    FeeBand::open(0.15, 99.0),
                ])),
                // «до 100 000 ₽/мес — бесплатно, свыше — 0,3% от суммы»
                deposit: Pricing::rule(FeeRule::progressive(vec![
                    PercentTier::up_to(100_000.0, 0.0),
                    PercentTier::open(0.003),
                ])),
                link: link(),
            },
            TariffPlan {
                id: "tinkoff-advanced".to_string(),
                name: "Продвинутый".to_string(),
                description: "Для малого бизнеса с сотрудниками.".to_string(),
                for_orgs: both(),
                monthly: MonthlyFee::fixed(1_990.0),
                // «29 ₽ за операцию»
                payments: Pricing::rule(FeeRule::per(29.0, 0)),
                // «1% + 79 ₽ — до 400 000 ₽, 5% + 79 ₽ — до 2 млн ₽,
                //  15% + 79 ₽ — от 2 млн ₽»
                withdrawal: Pricing::rule(FeeRule::banded(vec![
                    FeeBand::up_to(400_000.0, 0.01, 79.0),
                    FeeBand::up_to(2_000_000.0, 0.05, 79.0),
                    FeeBand::open(0.15, 79.0),
                ])),
                // «до 300 000 ₽/мес — бесплатно, свыше — 0,2% от суммы»
                deposit: Pricing::rule(FeeRule::progressive(vec![
                    PercentTier::up_to(300_000.0, 0.0),
                    PercentTier::open(0.002),
                ])),
                link: link(),
            },
            TariffPlan {
                id: "tinkoff-pro".to_string(),
                name: "Профессиональный".to_string(),
                description: "Для бизнеса с большими оборотами.".to_string(),
                for_orgs: both(),
                monthly: MonthlyFee::fixed(4_990.0),
                // «19 ₽ за операцию»
                payments: Pricing::rule(FeeRule::per(19.0, 0)),
                // «1% + 59 ₽ — до 800 000 ₽, 5% + 59 ₽ — до 2 млн ₽,
                //  15% + 59 ₽ — от 2 млн ₽»
                withdrawal: Pricing::rule(FeeRule::banded(vec![
                    FeeBand::up_to(800_000.0, 0.01, 59.0),
                    FeeBand::up_to(2_000_000.0, 0.05, 59.0),
                    FeeBand::open(0.15, 59.0),
                ])),
                // «до 1 млн ₽/мес — бесплатно, свыше — 0,1% от суммы»
                deposit: Pricing::rule(FeeRule::progressive(vec![
                    PercentTier::up_to(1_000_000.0, 0.0),
                    PercentTier::open(0.001),
                ])),
                link: link(),
            },
        ],
    }
}

fn tochka(links: &RefLinks) -> Bank {
    let link = || Some(links.resolve(BankId::Tochka));

    Bank {
        id: BankId::Tochka,
        name: "Точка".to_string(),
        ordering: PlanOrdering::ByTotalCost,
        plans: vec![
            TariffPlan {
                id: "tochka-zero".to_string(),
                name: "Ноль".to_string(),
                description: "Только для ИП, зарегистрированного не более 90 дней назад."
                    .to_string(),
                for_orgs: vec![OrgForm::Ip],
                monthly: MonthlyFee::fixed(0.0),
                payments: Pricing::free(),
                // «До 150 000 ₽ бесплатно, свыше — 500 ₽ за каждые 15 000 ₽»
                withdrawal: Pricing::rule(FeeRule::stepped(150_000.0, 15_000.0, 500.0)),
                // «за каждые 10 000 ₽ — комиссия 80 ₽»
                deposit: Pricing::rule(FeeRule::stepped(0.0, 10_000.0, 80.0)),
                link: link(),
            },
            TariffPlan {
                id: "tochka-start".to_string(),
                name: "Начало".to_string(),
                description: String::new(),
                for_orgs: both(),
                monthly: MonthlyFee::fixed(950.0),
                payments: Pricing::free(),
                // «До 400 000 ₽ бесплатно, свыше — 2 100 ₽ за каждые 75 000 ₽»
                withdrawal: Pricing::rule(FeeRule::stepped(400_000.0, 75_000.0, 2_100.0)),
                // «до 100 000 ₽ бесплатно, далее — 350 ₽ за каждые 50 000 ₽»
                deposit: Pricing::rule(FeeRule::stepped(100_000.0, 50_000.0, 350.0)),
                link: link(),
            },
            TariffPlan {
                id: "tochka-growth".to_string(),
                name: "Развитие".to_string(),
                description: String::new(),
                for_orgs: both(),
                monthly: MonthlyFee::fixed(3_500.0),
                payments: Pricing::free(),
                // «До 1 000 000 ₽ в месяц бесплатно, свыше — 3 300 ₽ за каждые 150 000 ₽»
                withdrawal: Pricing::rule(FeeRule::stepped(1_000_000.0, 150_000.0, 3_300.0)),
                // «до 600 000 ₽ бесплатно, далее — 600 ₽ за каждые 100 000 ₽»
                deposit: Pricing::rule(FeeRule::stepped(600_000.0, 100_000.0, 600.0)),
                link: link(),
            },
        ],
    }
}

fn modulbank(links: &RefLinks) -> Bank {
    let link = || Some(links.resolve(BankId::Modulbank));

    Bank {
        id: BankId::Modulbank,
        name: "Модульбанк".to_string(),
        ordering: PlanOrdering::ByTotalCost,
        plans: vec![
            TariffPlan {
                id: "modul-start".to_string(),
                name: "Стартовый".to_string(),
                description: "Отличное начало бизнеса.".to_string(),
                for_orgs: both(),
                monthly: MonthlyFee::fixed(0.0),
                payments: Pricing::free(),
                // «0,5% от 0 до 50 000 ₽, 3% до 500 000 ₽, 5% свыше»
                withdrawal: Pricing::rule(FeeRule::progressive(vec![
                    PercentTier::up_to(50_000.0, 0.005),
                    PercentTier::up_to(500_000.0, 0.03),
                    PercentTier::open(0.05),
                ])),
                // внесение бесплатно
                deposit: Pricing::free(),
                link: link(),
            },
            TariffPlan {
                id: "modul-optimal".to_string(),
                name: "Оптимальный".to_string(),
                description: "Лучший выбор для дела.".to_string(),
                for_orgs: both(),
                monthly: MonthlyFee::fixed(690.0),
                // «19 рублей за операцию»
                payments: Pricing::rule(FeeRule::per(19.0, 0)),
                // «0 ₽ до 50 000 ₽, 1,5% до 300 000 ₽, 2,5% до 500 000 ₽, 5% свыше»
                withdrawal: Pricing::rule(FeeRule::progressive(vec![
                    PercentTier::up_to(50_000.0, 0.0),
                    PercentTier::up_to(300_000.0, 0.015),
                    PercentTier::up_to(500_000.0, 0.025),
                    PercentTier::open(0.05),
                ])),
                deposit: Pricing::free(),
                link: link(),
            },
            TariffPlan {
                id: "modul-unlimited".to_string(),
                name: "Безлимитный".to_string(),
                description: "Бизнес на высоких оборотах.".to_string(),
                for_orgs: both(),
                monthly: MonthlyFee::fixed(4_900.0),
                payments: Pricing::free(),
                // «0 ₽ до 100 000 ₽, 1,5% до 500 000 ₽, 2,5% до 1 млн ₽, 5% свыше»
                withdrawal: Pricing::rule(FeeRule::progressive(vec![
                    PercentTier::up_to(100_000.0, 0.0),
                    PercentTier::up_to(500_000.0, 0.015),
                    PercentTier::up_to(1_000_000.0, 0.025),
                    PercentTier::open(0.05),
                ])),
                deposit: Pricing::free(),
                link: link(),
            },
            TariffPlan {
                id: "modul-corp".to_string(),
                name: "Корпоративный".to_string(),
                description: "Когда нужен максимум.".to_string(),
                for_orgs: both(),
                monthly: MonthlyFee::fixed(39_900.0),
                payments: Pricing::free(),
                withdrawal: Pricing::free(),
                deposit: Pricing::free(),
                link: link(),
            },
        ],
    }
}

/// Coefficient bundles for the legacy estimator. Values approximate each
/// bank's mid-range plan; ВТБ is only reachable through this path.
pub fn legacy_coeffs() -> Vec<BankCoeffs> {
    vec![
        BankCoeffs {
            bank: BankId::Alfa,
            base: 1_990.0,
            per_payment: 59.0,
            cash_rate: 0.002,
            aq_online: 0.025,
            aq_offline: 0.021,
        },
        BankCoeffs {
            bank: BankId::Tinkoff,
            base: 490.0,
            per_payment: 49.0,
            cash_rate: 0.003,
            aq_online: 0.026,
            aq_offline: 0.022,
        },
        BankCoeffs {
            bank: BankId::Tochka,
            base: 950.0,
            per_payment: 0.0,
            cash_rate: 0.008,
            aq_online: 0.026,
            aq_offline: 0.02,
        },
        BankCoeffs {
            bank: BankId::Modulbank,
            base: 690.0,
            per_payment: 19.0,
            cash_rate: 0.0,
            aq_online: 0.0275,
            aq_offline: 0.019,
        },
        BankCoeffs {
            bank: BankId::Vtb,
            base: 0.0,
            per_payment: 25.0,
            cash_rate: 0.003,
            aq_online: 0.026,
            aq_offline: 0.02,
        },
    ]
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::TariffEngine;
    use crate::domain::CalcInputs;
    use std::sync::Arc;

    fn catalog() -> Catalog {
        builtin(&RefLinks::default())
    }

    #[test]
    fn catalog_has_four_banks_and_fourteen_plans() {
        let c = catalog();
        assert_eq!(c.banks.len(), 4);
        assert_eq!(c.plan_count(), 14);
    }

    #[test]
    fn every_threshold_rule_ends_open() {
        // The catalog is fixed per release; termination of every scale is
        // checked here instead of by runtime guards.
        for bank in &catalog().banks {
            for plan in &bank.plans {
                for pricing in [&plan.payments, &plan.withdrawal, &plan.deposit] {
                    for rule in pricing.rules() {
                        assert!(
                            rule.has_open_end(),
                            "unterminated rule in {}/{}",
                            bank.id,
                            plan.id
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn tier_thresholds_are_strictly_ascending() {
        for bank in &catalog().banks {
            for plan in &bank.plans {
                for pricing in [&plan.payments, &plan.withdrawal, &plan.deposit] {
                    for rule in pricing.rules() {
                        let bounds: Vec<f64> = match rule {
                            FeeRule::Progressive { tiers } => {
                                tiers.iter().filter_map(|t| t.up_to).collect()
                            }
                            FeeRule::Banded { bands } => {
                                bands.iter().filter_map(|b| b.up_to).collect()
                            }
                            _ => continue,
                        };
                        for pair in bounds.windows(2) {
                            assert!(
                                pair[0] < pair[1],
                                "non-ascending thresholds in {}/{}",
                                bank.id,
                                plan.id
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn only_alfa_is_curated() {
        for bank in &catalog().banks {
            let expected = if bank.id == BankId::Alfa {
                PlanOrdering::Curated
            } else {
                PlanOrdering::ByTotalCost
            };
            assert_eq!(bank.ordering, expected, "{}", bank.id);
        }
    }

    #[test]
    fn tochka_zero_is_sole_proprietor_only() {
        let c = catalog();
        let tochka = c.bank(BankId::Tochka).unwrap();
        let zero = tochka.plans.iter().find(|p| p.id == "tochka-zero").unwrap();
        assert_eq!(zero.for_orgs, vec![OrgForm::Ip]);
    }

    #[test]
    fn revenue_based_monthly_fees_are_labeled() {
        let c = catalog();
        let alfa = c.bank(BankId::Alfa).unwrap();
        for plan in &alfa.plans {
            let estimated = matches!(plan.id.as_str(), "alfa-zero" | "alfa-simple");
            assert_eq!(plan.monthly.is_estimate(), estimated, "{}", plan.id);
        }
    }

    #[test]
    fn every_plan_carries_a_referral_link() {
        for bank in &catalog().banks {
            for plan in &bank.plans {
                assert!(plan.link.is_some(), "{}/{}", bank.id, plan.id);
            }
        }
    }

    #[test]
    fn legacy_coeffs_cover_all_banks() {
        let coeffs = legacy_coeffs();
        for id in BankId::ALL {
            assert!(coeffs.iter().any(|c| c.bank == id), "{id}");
        }
    }

    // Published-sheet scenarios against the full catalog.

    #[test]
    fn alfa_growth_payments_scenario() {
        let engine = TariffEngine::new(Arc::new(catalog()));
        let results = engine.calculate(&CalcInputs {
            org: OrgForm::Ip,
            payments: 30.0,
            withdrawal: 0.0,
            deposit: 0.0,
        });
        let growth = results.iter().find(|r| r.tariff_id == "alfa-growth").unwrap();
        // (30 − 25) × 59 = 295
        assert_eq!(growth.transfers_to_legal, 295.0);
    }

    #[test]
    fn tochka_zero_withdrawal_boundaries() {
        let engine = TariffEngine::new(Arc::new(catalog()));
        let fee_at = |withdrawal: f64| {
            let results = engine.calculate(&CalcInputs {
                org: OrgForm::Ip,
                payments: 0.0,
                withdrawal,
                deposit: 0.0,
            });
            results
                .iter()
                .find(|r| r.tariff_id == "tochka-zero")
                .unwrap()
                .transfers_to_individuals
        };
        assert_eq!(fee_at(150_000.0), 0.0);
        assert_eq!(fee_at(165_000.0), 500.0);
        assert_eq!(fee_at(165_001.0), 1_000.0);
    }

    #[test]
    fn tinkoff_simple_withdrawal_bands() {
        let engine = TariffEngine::new(Arc::new(catalog()));
        let fee_at = |withdrawal: f64| {
            let results = engine.calculate(&CalcInputs {
                org: OrgForm::Ip,
                payments: 0.0,
                withdrawal,
                deposit: 0.0,
            });
            results
                .iter()
                .find(|r| r.tariff_id == "tinkoff-simple")
                .unwrap()
                .transfers_to_individuals
        };
        // 400 000 × 1.5% + 99 = 6 099
        assert_eq!(fee_at(400_000.0), 6_099.0);
        // 400 001 × 5% + 99 = 20 099.05 → 20 099
        assert_eq!(fee_at(400_001.0), 20_099.0);
    }

    #[test]
    fn zero_inputs_cost_only_the_monthly_fee() {
        let engine = TariffEngine::new(Arc::new(catalog()));
        let results = engine.calculate(&CalcInputs {
            org: OrgForm::Ip,
            payments: 0.0,
            withdrawal: 0.0,
            deposit: 0.0,
        });
        assert_eq!(results.len(), 14);
        for r in &results {
            assert_eq!(r.transfers_to_legal, 0.0, "{}", r.tariff_id);
            assert_eq!(r.transfers_to_individuals, 0.0, "{}", r.tariff_id);
            assert_eq!(r.cash_handling, 0.0, "{}", r.tariff_id);
            assert_eq!(r.total_cost(), r.monthly_fee, "{}", r.tariff_id);
        }
    }

    #[test]
    fn alfa_keeps_published_order_in_results() {
        let engine = TariffEngine::new(Arc::new(catalog()));
        let results = engine.calculate(&CalcInputs {
            org: OrgForm::Ip,
            payments: 100.0,
            withdrawal: 500_000.0,
            deposit: 500_000.0,
        });
        let alfa: Vec<&str> = results
            .iter()
            .filter(|r| r.bank_id == BankId::Alfa)
            .map(|r| r.tariff_id.as_str())
            .collect();
        assert_eq!(
            alfa,
            ["alfa-zero", "alfa-simple", "alfa-growth", "alfa-active"]
        );
    }

    #[test]
    fn sorted_banks_are_ascending_by_total() {
        let engine = TariffEngine::new(Arc::new(catalog()));
        let results = engine.calculate(&CalcInputs {
            org: OrgForm::Ooo,
            payments: 40.0,
            withdrawal: 700_000.0,
            deposit: 250_000.0,
        });
        for id in [BankId::Tinkoff, BankId::Tochka, BankId::Modulbank] {
            let totals: Vec<f64> = results
                .iter()
                .filter(|r| r.bank_id == id)
                .map(|r| r.total_cost())
                .collect();
            for pair in totals.windows(2) {
                assert!(pair[0] <= pair[1], "{id}: {totals:?}");
            }
        }
    }
}
