//! Domain-specific error types and error handling.

mod types;


pub use types::ValidationError;

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("SMS provider unavailable: {message}")]
    ProviderUnavailable { message: String },

    #[error("Data consistency error: {message}")]
    DataConsistency { message: String },

    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to field-level validation errors
    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Whether the failure was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DomainError::ValidationErr(_)
                | DomainError::NotFound { .. }
                | DomainError::PermissionDenied { .. }
                | DomainError::DataConsistency { .. }
                | DomainError::InvalidState { .. }
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
