//! Message repository trait defining the interface for message persistence.
//!
//! Every read path takes a [`QueryOptions`] so soft-deleted rows are excluded
//! uniformly unless the caller opts in.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::Message;
use crate::errors::DomainError;

use super::query::{MessageFilter, QueryOptions, StatusCount, StatusCountQuery};

/// Repository trait for Message persistence operations
///
/// # Example
/// ```no_run
/// use uuid::Uuid;
/// use sms_core::repositories::{MessageRepository, QueryOptions};
///
/// # async fn example(repo: &impl MessageRepository) -> Result<(), sms_core::DomainError> {
/// let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
/// if let Some(message) = repo.find_by_uuid(id, QueryOptions::with_deleted()).await? {
///     println!("status: {:?}", message.status);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persist a new message
    async fn insert(&self, message: Message) -> Result<Message, DomainError>;

    /// Find a message by its identifier
    async fn find_by_uuid(
        &self,
        uuid: Uuid,
        options: QueryOptions,
    ) -> Result<Option<Message>, DomainError>;

    /// Find a message by the id the provider assigned at send time
    async fn find_by_provider_message_id(
        &self,
        provider_message_id: &str,
        options: QueryOptions,
    ) -> Result<Option<Message>, DomainError>;

    /// Messages matching `filter`, most recent first
    async fn find(
        &self,
        filter: &MessageFilter,
        options: QueryOptions,
    ) -> Result<Vec<Message>, DomainError>;

    /// Write the provider-owned fields of a message: `status`, `date_sent`,
    /// `error_code`, `error_message` and `modified`. Deletion and redaction
    /// markers are never touched.
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No row with the message's uuid
    async fn update_status(&self, message: &Message) -> Result<(), DomainError>;

    /// [`update_status`](Self::update_status) for several messages as one
    /// unit: either all writes land or none do
    async fn update_statuses(&self, messages: &[Message]) -> Result<(), DomainError>;

    /// Stamp `redacted` on every listed message that has not been redacted yet.
    ///
    /// Returns the number of rows that changed; already redacted rows keep
    /// their original timestamp.
    async fn mark_redacted(&self, uuids: &[Uuid], at: DateTime<Utc>) -> Result<u64, DomainError>;

    /// Soft-delete a message unless it is already deleted.
    ///
    /// Returns `false` when no active row matched.
    async fn mark_deleted(&self, uuid: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Count messages per (UTC creation day, status) within the query window
    async fn count_by_day_and_status(
        &self,
        query: &StatusCountQuery,
        options: QueryOptions,
    ) -> Result<Vec<StatusCount>, DomainError>;
}
