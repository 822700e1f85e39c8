//! Value objects exchanged between the lifecycle engine, the provider gateway
//! and the HTTP surface.

pub mod new_message;
pub mod provider;
pub mod status_callback;
pub mod status_report;

// Re-export commonly used types
pub use new_message::NewMessage;
pub use provider::{MessageUpdate, SentMessage};
pub use status_callback::StatusCallback;
pub use status_report::{StatusReport, STATUS_REPORT_DATA_TYPE, STATUS_REPORT_DESCRIPTION};
