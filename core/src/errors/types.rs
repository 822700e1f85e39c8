//! Field-level validation errors
//!
//! These are raised before any provider call or persistence side effect and
//! surface to HTTP callers as 400 responses.

use thiserror::Error;

/// Validation errors for request fields
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid format for field: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid phone number: {reason}")]
    InvalidPhoneNumber { reason: String },

    #[error("Invalid range: {start} is after {end}")]
    InvalidRange { start: String, end: String },
}

impl ValidationError {
    /// Field the error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::RequiredField { field } | ValidationError::InvalidFormat { field } => {
                Some(field)
            }
            ValidationError::InvalidPhoneNumber { .. } => Some("receiver"),
            ValidationError::InvalidRange { .. } => None,
        }
    }
}
