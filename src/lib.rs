//! # RKO Calc
//!
//! Monthly service-cost calculator for small-business bank accounts
//! (расчётно-кассовое обслуживание). Several banks publish multiple fee
//! plans with heterogeneous pricing; this crate normalizes the user's
//! monthly usage, prices every plan of every bank and returns one
//! comparable, ordered result list.
//!
//! ## Architecture
//!
//! - **domain**: core entities and pure fee rules (amounts, legal forms,
//!   fee-rule evaluators, plans, catalog, results)
//! - **application**: the tariff engine, the legacy coefficient
//!   estimator and request DTOs
//! - **infrastructure**: compiled-in catalog constants, catalog loading
//!   from a local JSON file, referral-link resolution
//! - **config**: TOML application configuration

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{default_config_path, AppConfig};

// Re-export the calculation surface for easy access
pub use application::{CoeffEstimator, TariffEngine};
pub use domain::{CalcInputs, Catalog, TariffCalcResult};
