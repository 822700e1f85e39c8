//! Domain entities representing core business objects.

pub mod message;

// Re-export commonly used types
pub use message::{is_terminal_status, Message, TERMINAL_STATUSES};
