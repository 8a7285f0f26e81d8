//! Domain-level errors.
//!
//! These errors are independent of infrastructure concerns (HTTP, drivers).
//! Adapters translate their native driver errors into [`RepositoryError`].

use thiserror::Error;
use validator::ValidationErrors;

/// Errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Malformed or missing input
    #[error("Validation error: {0}")]
    Validation(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }
}

impl From<ValidationErrors> for DomainError {
    /// Keep the first failed rule's message.
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .next()
            .and_then(|errors| errors.first())
            .and_then(|error| error.message.as_ref())
            .map(|msg| msg.to_string())
            .unwrap_or_else(|| "Validation failed".to_string());
        DomainError::Validation(message)
    }
}

/// Failures reported by a repository adapter.
///
/// Every variant names the contract operation that failed so a log line is
/// enough to diagnose the problem without re-querying.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepositoryError {
    /// The lookup matched no row
    #[error("{operation}: no matching row")]
    NotFound { operation: &'static str },

    /// The driver reported a failure while performing `step`
    #[error("{operation}: {step}: {message}")]
    Database {
        operation: &'static str,
        step: &'static str,
        message: String,
    },

    /// A row did not have the expected shape
    #[error("{operation}: scanning row: {message}")]
    Scan {
        operation: &'static str,
        message: String,
    },

    /// The in-flight call was aborted before it completed
    #[error("{operation}: call cancelled")]
    Cancelled { operation: &'static str },
}

impl RepositoryError {
    pub fn not_found(operation: &'static str) -> Self {
        RepositoryError::NotFound { operation }
    }

    pub fn database(operation: &'static str, step: &'static str, err: impl ToString) -> Self {
        RepositoryError::Database {
            operation,
            step,
            message: err.to_string(),
        }
    }

    pub fn scan(operation: &'static str, err: impl ToString) -> Self {
        RepositoryError::Scan {
            operation,
            message: err.to_string(),
        }
    }

    /// Whether the failure is the "no rows" condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;
