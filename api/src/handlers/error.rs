//! Mapping from domain failures to HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use sms_core::errors::{DomainError, ValidationError};
use sms_shared::errors::{error_codes, ErrorResponse};

/// Error returned by every handler
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failure raised by the lifecycle engine or reporting
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request body or query failed validation before reaching the domain
    #[error("Invalid request: {message}")]
    InvalidRequest {
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Tenant scope headers missing
    #[error("Missing required header: {0}")]
    MissingScope(&'static str),
}

impl ApiError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        ApiError::InvalidRequest {
            message: message.into(),
            details: None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ApiError::Domain(error) => match error {
                DomainError::ValidationErr(ValidationError::InvalidPhoneNumber { .. }) => {
                    error_codes::PHONE_INVALID
                }
                DomainError::ValidationErr(_) => error_codes::VALIDATION_ERROR,
                DomainError::NotFound { .. } => error_codes::NOT_FOUND,
                DomainError::PermissionDenied { .. } => error_codes::FORBIDDEN,
                DomainError::ProviderUnavailable { .. } => error_codes::PROVIDER_UNAVAILABLE,
                DomainError::DataConsistency { .. } => error_codes::DATA_CONSISTENCY,
                DomainError::InvalidState { .. } => error_codes::CONFLICT,
                DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            },
            ApiError::InvalidRequest { .. } => error_codes::BAD_REQUEST,
            ApiError::MissingScope(_) => error_codes::MISSING_SCOPE,
        }
    }

    fn message(&self) -> String {
        match self {
            // Internal details stay in the logs
            ApiError::Domain(DomainError::Internal { .. }) => {
                "An internal error occurred".to_string()
            }
            ApiError::Domain(error) => error.to_string(),
            ApiError::InvalidRequest { message, .. } => message.clone(),
            ApiError::MissingScope(header) => format!("Missing required header: {}", header),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::Domain(DomainError::ValidationErr(error))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: serde_json::Map<String, serde_json::Value> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages: Vec<String> = errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), serde_json::json!(messages))
            })
            .collect();

        ApiError::InvalidRequest {
            message: "Request validation failed".to_string(),
            details: Some(serde_json::Value::Object(fields)),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(error) => match error {
                DomainError::ValidationErr(_)
                | DomainError::DataConsistency { .. } => StatusCode::BAD_REQUEST,
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::PermissionDenied { .. } => StatusCode::FORBIDDEN,
                DomainError::ProviderUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                DomainError::InvalidState { .. } => StatusCode::CONFLICT,
                DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::InvalidRequest { .. } | ApiError::MissingScope(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let mut body = ErrorResponse::new(self.error_code(), self.message());
        match self {
            ApiError::Domain(DomainError::ValidationErr(error)) => {
                if let Some(field) = error.field() {
                    body = body.add_detail("field", field);
                }
            }
            ApiError::InvalidRequest {
                details: Some(details),
                ..
            } => {
                body = body.add_detail("fields", details);
            }
            _ => {}
        }

        HttpResponse::build(status).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::from(DomainError::NotFound {
                    resource: "Message".to_string(),
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(DomainError::PermissionDenied {
                    message: "nope".to_string(),
                }),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::from(DomainError::ProviderUnavailable {
                    message: "down".to_string(),
                }),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ApiError::from(DomainError::DataConsistency {
                    message: "unknown sid".to_string(),
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(DomainError::InvalidState {
                    message: "already redacted".to_string(),
                }),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(DomainError::Internal {
                    message: "db".to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ApiError::MissingScope("X-Trustomer"), StatusCode::BAD_REQUEST),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected, "{}", error);
        }
    }

    #[test]
    fn test_internal_message_hidden() {
        let error = ApiError::from(DomainError::Internal {
            message: "connection refused at 10.0.0.4".to_string(),
        });
        assert_eq!(error.message(), "An internal error occurred");
        assert_eq!(error.error_code(), error_codes::INTERNAL_ERROR);
    }

    #[test]
    fn test_invalid_phone_code() {
        let error = ApiError::from(ValidationError::InvalidPhoneNumber {
            reason: "too short".to_string(),
        });
        assert_eq!(error.error_code(), error_codes::PHONE_INVALID);
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }
}
