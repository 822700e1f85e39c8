pub mod message;

pub use message::{CreateMessageRequest, GetMessageQuery, ListMessagesQuery, StatusCountsQuery};
