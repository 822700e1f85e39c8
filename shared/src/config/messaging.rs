//! Messaging behaviour configuration module

use serde::{Deserialize, Serialize};

use super::{parse_var, ConfigError};

/// Settings that shape how messages are normalised and reconciled
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessagingConfig {
    /// Region used when a receiver number has no international prefix
    pub default_region: String,

    /// How far back bulk reconciliation looks, in days
    pub reconciliation_window_days: i64,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            default_region: String::from("GB"),
            reconciliation_window_days: 7,
        }
    }
}

impl MessagingConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let default_region = std::env::var("COUNTRY_CODE")
            .map(|code| code.trim().to_uppercase())
            .unwrap_or(defaults.default_region);

        let reconciliation_window_days =
            parse_var("RECONCILIATION_WINDOW_DAYS", defaults.reconciliation_window_days)?;
        if reconciliation_window_days <= 0 {
            return Err(ConfigError::Invalid {
                var: "RECONCILIATION_WINDOW_DAYS".to_string(),
                value: reconciliation_window_days.to_string(),
            });
        }

        Ok(Self {
            default_region,
            reconciliation_window_days,
        })
    }
}
