//! Message lifecycle service
//!
//! This module covers the full life of an outbound SMS:
//! - Receiver normalisation and dispatch through the provider gateway
//! - Tenant-scoped lookup, listing and soft deletion
//! - Signed status callbacks with redaction once delivery is final
//! - The bulk reconciliation sweep (status poll, then redaction retry)

mod config;
mod service;
mod traits;
mod types;


pub use config::MessageServiceConfig;
pub use service::MessageService;
pub use traits::ProviderGateway;
pub use types::ReconciliationSummary;
