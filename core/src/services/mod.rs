//! Business services containing domain logic and use cases.

pub mod message;
pub mod report;

// Re-export commonly used types
pub use message::{MessageService, MessageServiceConfig, ProviderGateway, ReconciliationSummary};
pub use report::ReportService;
