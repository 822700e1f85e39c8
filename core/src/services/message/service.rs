//! Main message lifecycle service implementation

use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use sms_shared::utils::phone::{mask_phone_number, normalize_to_e164};

use crate::domain::entities::Message;
use crate::domain::value_objects::{NewMessage, StatusCallback};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::message::{MessageFilter, MessageRepository, QueryOptions};

use super::config::MessageServiceConfig;
use super::traits::ProviderGateway;
use super::types::ReconciliationSummary;

/// Lifecycle engine for outbound messages
pub struct MessageService<R: MessageRepository, G: ProviderGateway> {
    /// Message store
    repository: Arc<R>,
    /// SMS provider
    gateway: Arc<G>,
    /// Service configuration
    config: MessageServiceConfig,
}

impl<R: MessageRepository, G: ProviderGateway> MessageService<R, G> {
    /// Create a new message service
    pub fn new(repository: Arc<R>, gateway: Arc<G>, config: MessageServiceConfig) -> Self {
        Self {
            repository,
            gateway,
            config,
        }
    }

    /// Normalise, dispatch and persist a new message
    ///
    /// This method:
    /// 1. Rejects blank fields and unparseable receivers
    /// 2. Sends the message through the provider gateway
    /// 3. Persists the record with the provider's id and status
    ///
    /// Nothing is persisted when the provider call fails.
    pub async fn create_message(&self, mut details: NewMessage) -> DomainResult<Message> {
        details.validate()?;

        details.receiver = normalize_to_e164(&details.receiver, &self.config.default_region)
            .map_err(|e| ValidationError::InvalidPhoneNumber {
                reason: e.to_string(),
            })?;

        let sent = self
            .gateway
            .send_message(&details.receiver, &details.content, &details.sender)
            .await
            .map_err(|e| {
                tracing::error!(
                    receiver = %mask_phone_number(&details.receiver),
                    trustomer_code = %details.trustomer_code,
                    product_name = %details.product_name,
                    error = %e,
                    event = "sms_send_failed",
                    "Provider rejected outbound message"
                );
                e
            })?;

        let message = self.repository.insert(Message::new(details, sent)).await?;

        tracing::info!(
            message_uuid = %message.uuid,
            provider_message_id = %message.provider_message_id,
            receiver = %mask_phone_number(&message.receiver),
            trustomer_code = %message.trustomer_code,
            product_name = %message.product_name,
            status = ?message.status,
            event = "sms_created",
            "Message dispatched"
        );

        Ok(message)
    }

    /// Look up a message by identifier
    pub async fn get_message(&self, uuid: Uuid, options: QueryOptions) -> DomainResult<Message> {
        self.repository
            .find_by_uuid(uuid, options)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("Message {}", uuid),
            })
    }

    /// List non-deleted messages matching `filter`, most recent first
    pub async fn list_messages(&self, mut filter: MessageFilter) -> DomainResult<Vec<Message>> {
        // Receivers are stored in E.164, so compare in that form when possible
        if let Some(receiver) = filter.receiver.as_mut() {
            if let Ok(normalized) = normalize_to_e164(receiver, &self.config.default_region) {
                *receiver = normalized;
            }
        }

        self.repository
            .find(&filter, QueryOptions::default())
            .await
    }

    /// Soft-delete a message owned by the given customer and product
    pub async fn delete_message(
        &self,
        uuid: Uuid,
        trustomer_code: &str,
        product_name: &str,
    ) -> DomainResult<Message> {
        let mut message = self.get_message(uuid, QueryOptions::default()).await?;

        if !message.belongs_to(trustomer_code, product_name) {
            tracing::warn!(
                message_uuid = %uuid,
                trustomer_code = %trustomer_code,
                product_name = %product_name,
                owner_trustomer_code = %message.trustomer_code,
                owner_product_name = %message.product_name,
                event = "cross_tenant_delete_denied",
                "Refused to delete a message owned by another tenant"
            );
            return Err(DomainError::PermissionDenied {
                message: format!(
                    "Message {} does not belong to {}/{}",
                    uuid, trustomer_code, product_name
                ),
            });
        }

        let now = Utc::now();
        if !self.repository.mark_deleted(uuid, now).await? {
            return Err(DomainError::NotFound {
                resource: format!("Message {}", uuid),
            });
        }
        message.mark_deleted(now);

        tracing::info!(
            message_uuid = %uuid,
            trustomer_code = %trustomer_code,
            product_name = %product_name,
            event = "sms_deleted",
            "Message soft-deleted"
        );

        Ok(message)
    }

    /// Authenticate an inbound callback before it is processed
    pub fn verify_callback_signature(
        &self,
        signature: Option<&str>,
        params: &BTreeMap<String, String>,
    ) -> DomainResult<()> {
        if self.gateway.verify_signature(signature, params) {
            return Ok(());
        }

        tracing::warn!(
            signature_present = signature.is_some(),
            provider_message_id = params.get("MessageSid").map(String::as_str).unwrap_or(""),
            event = "callback_signature_invalid",
            "Rejected status callback with invalid signature"
        );
        Err(DomainError::PermissionDenied {
            message: "Invalid callback signature".to_string(),
        })
    }

    /// Apply a provider status callback.
    ///
    /// An unknown provider id is a data-consistency failure. The merged status
    /// is stored before anything else. Once it is terminal the body is redacted
    /// at the provider; a failed redaction is left for the next sweep.
    pub async fn handle_callback(&self, callback: StatusCallback) -> DomainResult<Message> {
        let mut message = self
            .repository
            .find_by_provider_message_id(&callback.provider_message_id, QueryOptions::default())
            .await?
            .ok_or_else(|| {
                tracing::error!(
                    provider_message_id = %callback.provider_message_id,
                    event = "callback_unknown_message",
                    "Status callback references an unknown message"
                );
                DomainError::DataConsistency {
                    message: format!(
                        "No message with provider id {}",
                        callback.provider_message_id
                    ),
                }
            })?;

        if message.apply_update(&callback.update) {
            self.repository.update_status(&message).await?;
        }

        if message.needs_redaction() && self.try_redact(&message).await {
            let now = Utc::now();
            self.repository.mark_redacted(&[message.uuid], now).await?;
            message.mark_redacted(now)?;
        }

        tracing::info!(
            message_uuid = %message.uuid,
            provider_message_id = %message.provider_message_id,
            status = ?message.status,
            redacted = message.redacted.is_some(),
            event = "callback_processed",
            "Status callback applied"
        );

        Ok(message)
    }

    /// Poll pending messages and retry outstanding redactions.
    ///
    /// Only messages created inside the reconciliation window are touched. Each
    /// pass writes its changes as one unit and only touches the columns it owns;
    /// gateway failures on individual messages are logged and skipped.
    pub async fn bulk_reconcile(&self) -> DomainResult<ReconciliationSummary> {
        let since = self.window_start()?;
        let mut summary = ReconciliationSummary::default();

        // Pass 1: status poll
        let pending = self
            .repository
            .find(&MessageFilter::pending_since(since), QueryOptions::default())
            .await?;

        let mut updated = Vec::new();
        for mut message in pending {
            summary.polled += 1;
            match self.gateway.fetch_message(&message.provider_message_id).await {
                Some(update) if message.apply_update(&update) => {
                    summary.updated += 1;
                    updated.push(message);
                }
                Some(_) => summary.unchanged += 1,
                None => {
                    tracing::debug!(
                        message_uuid = %message.uuid,
                        provider_message_id = %message.provider_message_id,
                        "No status update from provider"
                    );
                    summary.unchanged += 1;
                }
            }
        }
        self.repository.update_statuses(&updated).await?;

        // Pass 2: redaction sweep, including messages that just became terminal
        let unredacted = self
            .repository
            .find(
                &MessageFilter::unredacted_terminal_since(since),
                QueryOptions::default(),
            )
            .await?;

        let mut redacted = Vec::new();
        for message in unredacted {
            summary.redaction_attempts += 1;
            if self.try_redact(&message).await {
                summary.redacted += 1;
                redacted.push(message.uuid);
            } else {
                summary.redaction_failures += 1;
            }
        }
        if !redacted.is_empty() {
            self.repository.mark_redacted(&redacted, Utc::now()).await?;
        }

        tracing::info!(
            polled = summary.polled,
            updated = summary.updated,
            unchanged = summary.unchanged,
            redaction_attempts = summary.redaction_attempts,
            redacted = summary.redacted,
            redaction_failures = summary.redaction_failures,
            event = "bulk_reconcile_completed",
            "Reconciliation sweep finished"
        );

        Ok(summary)
    }

    /// Oldest creation time the sweep still looks at
    fn window_start(&self) -> DomainResult<DateTime<Utc>> {
        let days = self.config.reconciliation_window_days;
        Duration::try_days(days)
            .and_then(|window| Utc::now().checked_sub_signed(window))
            .ok_or_else(|| DomainError::Internal {
                message: format!("Reconciliation window of {} days is out of range", days),
            })
    }

    /// Ask the provider to redact the body; failures are logged for the next sweep
    async fn try_redact(&self, message: &Message) -> bool {
        let redacted = self
            .gateway
            .redact_message_body(&message.provider_message_id)
            .await;

        if !redacted {
            tracing::warn!(
                message_uuid = %message.uuid,
                provider_message_id = %message.provider_message_id,
                event = "sms_redaction_failed",
                "Redaction failed, will retry on next sweep"
            );
        }
        redacted
    }
}
