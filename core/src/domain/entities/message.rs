//! Message entity and its lifecycle rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{MessageUpdate, NewMessage, SentMessage};
use crate::errors::{DomainError, DomainResult};

/// Provider statuses after which no further change is expected
pub const TERMINAL_STATUSES: [&str; 3] = ["delivered", "undelivered", "failed"];

/// Check a provider status against [`TERMINAL_STATUSES`]
pub fn is_terminal_status(status: &str) -> bool {
    TERMINAL_STATUSES.contains(&status)
}

/// An outbound SMS and its delivery state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier, assigned once
    pub uuid: Uuid,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Last mutation timestamp
    pub modified: DateTime<Utc>,

    pub sender: String,

    /// Receiver in E.164 form
    pub receiver: String,

    pub content: String,

    /// Owning customer code (lower-cased)
    pub trustomer_code: String,

    /// Owning product name (lower-cased)
    pub product_name: String,

    /// Opaque id assigned by the provider at send time
    pub provider_message_id: String,

    /// Free-form provider status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Provider-supplied sent date, stored verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_sent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Soft-delete timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<DateTime<Utc>>,

    /// When the body was redacted at the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redacted: Option<DateTime<Utc>>,
}

impl Message {
    /// Build a message from validated details and the provider's send result.
    ///
    /// `details.receiver` is expected to be normalised already.
    pub fn new(details: NewMessage, sent: SentMessage) -> Self {
        let now = Utc::now();

        Self {
            uuid: Uuid::new_v4(),
            created: now,
            modified: now,
            sender: details.sender,
            receiver: details.receiver,
            content: details.content,
            trustomer_code: details.trustomer_code,
            product_name: details.product_name,
            provider_message_id: sent.provider_message_id,
            status: sent.status,
            date_sent: sent.date_sent,
            error_code: sent.error_code,
            error_message: sent.error_message,
            deleted: None,
            redacted: None,
        }
    }

    /// Merge the present fields of `update` over the stored values.
    ///
    /// Absent fields keep what is stored. Returns whether anything changed.
    pub fn apply_update(&mut self, update: &MessageUpdate) -> bool {
        let mut changed = false;
        changed |= merge_field(&mut self.status, &update.status);
        changed |= merge_field(&mut self.date_sent, &update.date_sent);
        changed |= merge_field(&mut self.error_code, &update.error_code);
        changed |= merge_field(&mut self.error_message, &update.error_message);

        if changed {
            self.modified = Utc::now();
        }
        changed
    }

    /// Whether the provider has reported a final outcome
    pub fn is_terminal(&self) -> bool {
        self.status.as_deref().is_some_and(is_terminal_status)
    }

    /// Terminal and not yet redacted
    pub fn needs_redaction(&self) -> bool {
        self.is_terminal() && self.redacted.is_none()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted.is_some()
    }

    /// Record a successful redaction at the provider
    pub fn mark_redacted(&mut self, at: DateTime<Utc>) -> DomainResult<()> {
        if self.redacted.is_some() {
            return Err(DomainError::InvalidState {
                message: format!("Message {} is already redacted", self.uuid),
            });
        }
        if !self.is_terminal() {
            return Err(DomainError::InvalidState {
                message: format!(
                    "Message {} cannot be redacted before a terminal status",
                    self.uuid
                ),
            });
        }

        self.redacted = Some(at);
        self.modified = at;
        Ok(())
    }

    /// Flag the message as deleted; the row is kept
    pub fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.deleted = Some(at);
        self.modified = at;
    }

    /// Whether the message is owned by the given customer and product
    pub fn belongs_to(&self, trustomer_code: &str, product_name: &str) -> bool {
        self.trustomer_code == trustomer_code && self.product_name == product_name
    }
}

fn merge_field(stored: &mut Option<String>, incoming: &Option<String>) -> bool {
    match incoming {
        Some(value) if stored.as_deref() != Some(value.as_str()) => {
            *stored = Some(value.clone());
            true
        }
        _ => false,
    }
}
