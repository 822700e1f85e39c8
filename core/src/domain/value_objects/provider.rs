//! Results handed back by the SMS provider.

use serde::{Deserialize, Serialize};

/// Outcome of a successful send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessage {
    pub provider_message_id: String,
    pub status: Option<String>,
    pub date_sent: Option<String>,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
}

/// Status fields reported by a callback or a poll.
///
/// `None` means the provider said nothing about that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageUpdate {
    pub status: Option<String>,
    pub date_sent: Option<String>,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
}

impl MessageUpdate {
    /// Build an update treating empty strings as absent
    pub fn from_raw(
        status: Option<String>,
        date_sent: Option<String>,
        error_code: Option<String>,
        error_message: Option<String>,
    ) -> Self {
        Self {
            status: non_empty(status),
            date_sent: non_empty(date_sent),
            error_code: non_empty(error_code),
            error_message: non_empty(error_message),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.date_sent.is_none()
            && self.error_code.is_none()
            && self.error_message.is_none()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
