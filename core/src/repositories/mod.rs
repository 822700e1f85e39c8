//! Repository interfaces for data persistence abstraction.

pub mod message;

// Re-export commonly used types
pub use message::{
    InMemoryMessageRepository, MessageFilter, MessageRepository, QueryOptions, StatusCount,
    StatusCountQuery, StatusFilter,
};
