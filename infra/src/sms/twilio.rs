//! Twilio provider gateway
//!
//! Talks to Twilio's 2010-04-01 Messages REST resource with HTTP basic auth.
//! When the gateway is disabled no request leaves the process and synthetic
//! results are returned instead.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use sms_core::domain::value_objects::{MessageUpdate, SentMessage};
use sms_core::errors::DomainError;
use sms_core::services::ProviderGateway;
use sms_shared::config::ProviderConfig;
use sms_shared::utils::phone::mask_phone_number;

use super::signature::validate_signature;
use crate::InfrastructureError;

/// Status reported for every synthetic send or fetch
const DISABLED_STATUS: &str = "sent";

/// Twilio gateway configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token, also the callback signing key
    pub auth_token: String,
    /// URL Twilio posts status callbacks to
    pub callback_url: String,
    /// REST API base URL
    pub api_base_url: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
    /// Answer locally instead of calling Twilio
    pub disabled: bool,
}

impl From<&ProviderConfig> for TwilioConfig {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            callback_url: config.callback_url.clone(),
            api_base_url: config.api_base_url.clone(),
            request_timeout_secs: config.request_timeout_secs,
            disabled: config.disabled,
        }
    }
}

/// Message resource as returned by Twilio
#[derive(Debug, Deserialize)]
struct TwilioMessageResource {
    sid: String,
    status: Option<String>,
    date_sent: Option<String>,
    /// Numeric in Twilio's payloads, kept loose
    error_code: Option<serde_json::Value>,
    error_message: Option<String>,
}

impl TwilioMessageResource {
    fn error_code(&self) -> Option<String> {
        match &self.error_code {
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn into_update(self) -> MessageUpdate {
        let error_code = self.error_code();
        MessageUpdate::from_raw(self.status, self.date_sent, error_code, self.error_message)
    }
}

/// Twilio implementation of the provider gateway
pub struct TwilioGateway {
    client: reqwest::Client,
    config: TwilioConfig,
}

impl TwilioGateway {
    /// Create a new Twilio gateway
    pub fn new(config: TwilioConfig) -> Result<Self, InfrastructureError> {
        if !config.disabled
            && (config.account_sid.is_empty()
                || config.auth_token.is_empty()
                || config.callback_url.is_empty())
        {
            return Err(InfrastructureError::Config(
                "Twilio account SID, auth token and callback URL are required".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        if config.disabled {
            warn!("Twilio gateway disabled, provider calls will be simulated");
        } else {
            info!(
                api_base_url = %config.api_base_url,
                "Twilio gateway initialized"
            );
        }

        Ok(Self { client, config })
    }

    /// Create from provider configuration
    pub fn from_provider_config(config: &ProviderConfig) -> Result<Self, InfrastructureError> {
        Self::new(TwilioConfig::from(config))
    }

    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    fn message_url(&self, provider_message_id: &str) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages/{}.json",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.account_sid,
            provider_message_id
        )
    }

    fn synthetic_date_sent() -> String {
        Utc::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}

#[async_trait]
impl ProviderGateway for TwilioGateway {
    async fn send_message(
        &self,
        phone_number: &str,
        content: &str,
        sender: &str,
    ) -> Result<SentMessage, DomainError> {
        if self.config.disabled {
            let sent = SentMessage {
                provider_message_id: uuid::Uuid::new_v4().to_string(),
                status: Some(DISABLED_STATUS.to_string()),
                date_sent: Some(Self::synthetic_date_sent()),
                error_code: None,
                error_message: None,
            };
            info!(
                provider_message_id = %sent.provider_message_id,
                "Skipping Twilio send, gateway disabled"
            );
            return Ok(sent);
        }

        let params = [
            ("To", phone_number),
            ("From", sender),
            ("Body", content),
            ("StatusCallback", self.config.callback_url.as_str()),
        ];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Twilio send request failed");
                DomainError::ProviderUnavailable {
                    message: format!("Twilio request failed: {}", e),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                http_status = status.as_u16(),
                receiver = %mask_phone_number(phone_number),
                body = %body,
                "Twilio rejected SMS request"
            );
            return Err(DomainError::ProviderUnavailable {
                message: format!("Twilio rejected request with HTTP {}", status.as_u16()),
            });
        }

        let resource: TwilioMessageResource = response.json().await.map_err(|e| {
            error!(error = %e, "Unreadable Twilio send response");
            DomainError::ProviderUnavailable {
                message: format!("Invalid Twilio response: {}", e),
            }
        })?;

        let provider_message_id = resource.sid.clone();
        let update = resource.into_update();
        debug!(
            provider_message_id = %provider_message_id,
            status = ?update.status,
            "Sent message to Twilio"
        );

        Ok(SentMessage {
            provider_message_id,
            status: update.status,
            date_sent: update.date_sent,
            error_code: update.error_code,
            error_message: update.error_message,
        })
    }

    async fn fetch_message(&self, provider_message_id: &str) -> Option<MessageUpdate> {
        if self.config.disabled {
            debug!(provider_message_id, "Skipping Twilio fetch, gateway disabled");
            return Some(MessageUpdate {
                status: Some(DISABLED_STATUS.to_string()),
                date_sent: Some(Self::synthetic_date_sent()),
                error_code: None,
                error_message: None,
            });
        }

        let response = match self
            .client
            .get(self.message_url(provider_message_id))
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!(
                    provider_message_id,
                    http_status = response.status().as_u16(),
                    "Could not get updated status from Twilio"
                );
                return None;
            }
            Err(e) => {
                warn!(provider_message_id, error = %e, "Twilio fetch request failed");
                return None;
            }
        };

        match response.json::<TwilioMessageResource>().await {
            Ok(resource) => Some(resource.into_update()),
            Err(e) => {
                warn!(provider_message_id, error = %e, "Unreadable Twilio fetch response");
                None
            }
        }
    }

    async fn redact_message_body(&self, provider_message_id: &str) -> bool {
        if self.config.disabled {
            debug!(provider_message_id, "Skipping Twilio redaction, gateway disabled");
            return true;
        }

        let result = self
            .client
            .post(self.message_url(provider_message_id))
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[("Body", "")])
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                debug!(provider_message_id, "Redacted message body in Twilio");
                true
            }
            Ok(response) => {
                warn!(
                    provider_message_id,
                    http_status = response.status().as_u16(),
                    "Could not redact message body in Twilio"
                );
                false
            }
            Err(e) => {
                warn!(provider_message_id, error = %e, "Twilio redaction request failed");
                false
            }
        }
    }

    fn verify_signature(&self, signature: Option<&str>, params: &BTreeMap<String, String>) -> bool {
        validate_signature(
            &self.config.auth_token,
            &self.config.callback_url,
            params,
            signature.unwrap_or(""),
        )
    }
}
