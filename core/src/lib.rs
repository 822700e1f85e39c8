//! # SMS Core
//!
//! Domain layer for the SMS API: the `Message` entity and its lifecycle rules,
//! the repository and provider gateway seams, the lifecycle engine that creates
//! messages, applies provider callbacks and runs the reconciliation sweep, and
//! the status-count reporting service.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience. Each layer has its own
// `message` module, so names are listed rather than globbed.
pub use domain::{Message, MessageUpdate, NewMessage, SentMessage, StatusCallback, StatusReport};
pub use errors::{DomainError, DomainResult, ValidationError};
pub use repositories::{
    InMemoryMessageRepository, MessageFilter, MessageRepository, QueryOptions, StatusCount,
    StatusCountQuery, StatusFilter,
};
pub use services::{
    MessageService, MessageServiceConfig, ProviderGateway, ReconciliationSummary, ReportService,
};
