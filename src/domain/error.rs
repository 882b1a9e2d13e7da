//! Domain errors.
//!
//! The calculation engine itself is total: invalid amounts degrade to zero
//! fees instead of failing. Errors only arise at the boundaries: parsing
//! identifiers, loading a catalog file, validating a request.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unknown bank: {0}")]
    UnknownBank(String),

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Catalog: {0}")]
    Catalog(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Errors from infrastructure collaborators (catalog files, config).
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
