//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent contract violations in hierarchy documents.
/// These are independent of CLI and config concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("empty hierarchy document")]
    EmptyDocument,

    #[error("duplicate sibling name '{name}' under '{parent}'")]
    DuplicateSiblingName { parent: String, name: String },

    #[error("invalid value {value} for node '{name}': must be finite and >= 0")]
    InvalidValue { name: String, value: f64 },

    #[error("node '{name}' has filter_value without filter_key")]
    DanglingFilterValue { name: String },

    #[error("invalid hierarchy document: {message}")]
    InvalidDocument { message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
