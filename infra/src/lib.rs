//! # Infrastructure Layer
//!
//! Concrete implementations of the seams the core domain defines:
//! - **Database**: MySQL `MessageRepository` using SQLx, pool management and embedded migrations
//! - **SMS**: the Twilio `ProviderGateway` over its REST API, including callback signature checks

/// Database module - MySQL implementations using SQLx
pub mod database;

/// SMS provider module - Twilio REST gateway
pub mod sms;

pub use database::{DatabasePool, MySqlMessageRepository, PoolStatistics};
pub use sms::{TwilioConfig, TwilioGateway};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
