//! SMS provider configuration module

use serde::{Deserialize, Serialize};

use super::{parse_flag, parse_var, ConfigError, Environment};

/// Twilio account settings and the disabled switch used outside production
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Account SID used for REST calls and request signing
    pub account_sid: String,

    /// Auth token, also the HMAC key for callback signatures
    #[serde(skip_serializing)]
    pub auth_token: String,

    /// Public URL the provider posts status callbacks to
    pub callback_url: String,

    /// When true no provider calls are made and synthetic results are returned
    pub disabled: bool,

    /// REST API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            callback_url: String::new(),
            disabled: false,
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ProviderConfig {
    /// Create from environment variables.
    ///
    /// `TWILIO_DISABLED` is only honoured outside production. Credentials are
    /// required unless the provider ends up disabled.
    pub fn from_env(environment: Environment) -> Result<Self, ConfigError> {
        let requested_disabled = parse_flag("TWILIO_DISABLED", false)?;
        let disabled = requested_disabled && !environment.is_production();

        let read = |var: &str| -> Result<String, ConfigError> {
            match std::env::var(var) {
                Ok(value) if !value.trim().is_empty() => Ok(value),
                _ if disabled => Ok(String::new()),
                _ => Err(ConfigError::Missing(var.to_string())),
            }
        };

        Ok(Self {
            account_sid: read("TWILIO_ACCOUNT_SID")?,
            auth_token: read("TWILIO_AUTH_TOKEN")?,
            callback_url: read("TWILIO_CALL_BACK_URL")?,
            disabled,
            api_base_url: std::env::var("TWILIO_API_BASE_URL")
                .unwrap_or_else(|_| default_api_base_url()),
            request_timeout_secs: parse_var("TWILIO_REQUEST_TIMEOUT_SECS", default_request_timeout())?,
        })
    }

    /// Config for a provider that never leaves the process
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Default::default()
        }
    }

    /// Whether the disabled flag was requested but overridden by the environment
    pub fn disabled_flag_ignored(environment: Environment) -> bool {
        environment.is_production() && parse_flag("TWILIO_DISABLED", false).unwrap_or(false)
    }
}

fn default_api_base_url() -> String {
    String::from("https://api.twilio.com")
}

fn default_request_timeout() -> u64 {
    30
}
