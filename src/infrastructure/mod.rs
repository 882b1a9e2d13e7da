pub mod catalog;
pub mod links;

pub use catalog::{builtin, legacy_coeffs, load_from_file, load_or_builtin};
pub use links::RefLinks;
