//! Trait for SMS provider integration

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::domain::value_objects::{MessageUpdate, SentMessage};
use crate::errors::DomainError;

/// The narrow surface of the SMS provider the lifecycle depends on
#[async_trait]
pub trait ProviderGateway: Send + Sync {
    /// Dispatch a message.
    ///
    /// Fails with `DomainError::ProviderUnavailable` when the provider rejects
    /// the request or cannot be reached.
    async fn send_message(
        &self,
        phone_number: &str,
        content: &str,
        sender: &str,
    ) -> Result<SentMessage, DomainError>;

    /// Current provider view of a message; `None` means no new information
    async fn fetch_message(&self, provider_message_id: &str) -> Option<MessageUpdate>;

    /// Clear the message body at the provider; `false` is retryable
    async fn redact_message_body(&self, provider_message_id: &str) -> bool;

    /// Check an inbound callback's signature header against its form parameters
    fn verify_signature(&self, signature: Option<&str>, params: &BTreeMap<String, String>) -> bool;
}
