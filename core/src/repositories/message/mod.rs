pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod mock;
pub mod query;

#[cfg(test)]
mod tests;

pub use mock::InMemoryMessageRepository;
pub use query::{MessageFilter, QueryOptions, StatusCount, StatusCountQuery, StatusFilter};
pub use r#trait::MessageRepository;
