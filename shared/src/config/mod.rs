//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `messaging` - Phone parsing region and reconciliation window
//! - `provider` - SMS provider (Twilio) credentials and disabled mode
//! - `server` - HTTP server configuration

pub mod database;
pub mod environment;
pub mod messaging;
pub mod provider;
pub mod server;

use thiserror::Error;

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use messaging::MessagingConfig;
pub use provider::ProviderConfig;
pub use server::ServerConfig;

/// Errors raised while reading configuration from the environment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for {var}: {value}")]
    Invalid { var: String, value: String },
}

/// Read an optional variable and parse it, falling back to `default` when unset
pub(crate) fn parse_var<T: std::str::FromStr>(var: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var: var.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}

/// Parse a boolean flag the way operators tend to write them
pub(crate) fn parse_flag(var: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(var) {
        Ok(value) => match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(ConfigError::Invalid {
                var: var.to_string(),
                value,
            }),
        },
        Err(_) => Ok(default),
    }
}
