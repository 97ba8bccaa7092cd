//! Domain errors

use thiserror::Error;

/// Domain-level error types
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// No user matches the given username/password pair
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, expired or revoked session
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Authenticated, but the role is not allowed
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    /// Storage/database error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", field, msg)
                })
            })
            .collect();
        field_errors.sort();

        if field_errors.is_empty() {
            DomainError::Validation("validation failed".to_string())
        } else {
            DomainError::Validation(field_errors.join("; "))
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
