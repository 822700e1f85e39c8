//! Configuration for the message service

use sms_shared::config::MessagingConfig;

/// Configuration for the message service
#[derive(Debug, Clone)]
pub struct MessageServiceConfig {
    /// Region used to parse receivers without an international prefix
    pub default_region: String,
    /// Only messages created within this many days are reconciled
    pub reconciliation_window_days: i64,
}

impl Default for MessageServiceConfig {
    fn default() -> Self {
        Self {
            default_region: String::from("GB"),
            reconciliation_window_days: 7,
        }
    }
}

impl From<&MessagingConfig> for MessageServiceConfig {
    fn from(config: &MessagingConfig) -> Self {
        Self {
            default_region: config.default_region.clone(),
            reconciliation_window_days: config.reconciliation_window_days,
        }
    }
}
