//! Shared utilities and common types for the SMS API server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Utility functions (phone normalisation, timestamp parsing)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    ConfigError, DatabaseConfig, Environment, LogFormat, LoggingConfig, MessagingConfig,
    ProviderConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::{datetime, phone};
