//! Request bodies and query strings for the SMS endpoints

use serde::Deserialize;
use validator::Validate;

use sms_core::domain::value_objects::NewMessage;
use sms_core::repositories::MessageFilter;

use crate::middleware::TenantScope;

/// Body of `POST /dhos/v1/sms`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateMessageRequest {
    #[validate(length(min = 1, message = "Sender is required"))]
    pub sender: String,

    #[validate(length(min = 1, message = "Receiver is required"))]
    pub receiver: String,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,

    /// Accepted for compatibility; the provider's value is stored
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub error_code: Option<String>,

    #[serde(default)]
    pub error_message: Option<String>,
}

impl CreateMessageRequest {
    pub fn into_new_message(self, scope: TenantScope) -> NewMessage {
        NewMessage {
            sender: self.sender,
            receiver: self.receiver,
            content: self.content,
            trustomer_code: scope.trustomer_code,
            product_name: scope.product_name,
        }
    }
}

/// Query string of `GET /dhos/v1/sms/{uuid}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetMessageQuery {
    #[serde(default)]
    pub include_deleted: bool,
}

/// Query string of `GET /dhos/v1/sms`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMessagesQuery {
    pub receiver: Option<String>,
    /// Zero means no limit
    pub limit: Option<usize>,
}

impl ListMessagesQuery {
    pub fn into_filter(self, scope: TenantScope) -> MessageFilter {
        MessageFilter {
            trustomer_code: Some(scope.trustomer_code),
            product_name: Some(scope.product_name),
            receiver: self.receiver.filter(|r| !r.trim().is_empty()),
            limit: self.limit.filter(|l| *l > 0),
            ..Default::default()
        }
    }
}

/// Query string of `GET /dhos/v1/sms_status_counts`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StatusCountsQuery {
    #[validate(length(min = 1, message = "start_date is required"))]
    pub start_date: String,

    #[validate(length(min = 1, message = "end_date is required"))]
    pub end_date: String,

    pub trustomer_code: Option<String>,

    pub product_name: Option<String>,
}
