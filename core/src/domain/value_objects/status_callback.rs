//! Inbound delivery status callback.

use std::collections::BTreeMap;

use crate::domain::value_objects::MessageUpdate;
use crate::errors::ValidationError;

/// Form field carrying the provider message id
pub const MESSAGE_SID_FIELD: &str = "MessageSid";

/// A provider status callback reduced to the fields the lifecycle consumes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCallback {
    pub provider_message_id: String,
    pub update: MessageUpdate,
}

impl StatusCallback {
    /// Extract the consumed fields from the callback's form parameters.
    ///
    /// Unknown parameters are ignored. Both `DateSend` and `DateSent` are read
    /// for the sent date.
    pub fn from_form(params: &BTreeMap<String, String>) -> Result<Self, ValidationError> {
        let provider_message_id = params
            .get(MESSAGE_SID_FIELD)
            .map(|sid| sid.trim())
            .filter(|sid| !sid.is_empty())
            .ok_or_else(|| ValidationError::RequiredField {
                field: MESSAGE_SID_FIELD.to_string(),
            })?
            .to_string();

        let field = |name: &str| params.get(name).cloned();
        let date_sent = field("DateSend")
            .filter(|v| !v.trim().is_empty())
            .or_else(|| field("DateSent"));

        Ok(Self {
            provider_message_id,
            update: MessageUpdate::from_raw(
                field("MessageStatus"),
                date_sent,
                field("ErrorCode"),
                field("ErrorMessage"),
            ),
        })
    }
}
