//! Error taxonomy shared across layers
//!
//! Every store-facing operation returns `DomainResult<T>`. The HTTP layer
//! maps each variant to exactly one status code (see `interfaces::http::common`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or missing input. Raised before any store access.
    #[error("Validation: {0}")]
    Validation(String),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// State conflict: bill already paid, duplicate payment or reference.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Store or transport failure. Details are logged, not exposed to clients.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    pub fn internal(e: impl std::fmt::Display) -> Self {
        Self::Internal(e.to_string())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
