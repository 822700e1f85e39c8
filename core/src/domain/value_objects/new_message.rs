//! Details of a message submitted for dispatch.

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Caller-supplied fields of a new message, with tenant scope attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub sender: String,
    pub receiver: String,
    pub content: String,
    pub trustomer_code: String,
    pub product_name: String,
}

impl NewMessage {
    /// Reject blank required fields before any provider call
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("sender", &self.sender),
            ("receiver", &self.receiver),
            ("content", &self.content),
            ("trustomer_code", &self.trustomer_code),
            ("product_name", &self.product_name),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::RequiredField {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}
