pub mod dto;
pub mod services;

pub use dto::CalcRequest;
pub use services::{CoeffEstimator, TariffEngine};
