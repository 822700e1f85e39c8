//! Shared fixtures for the API tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use actix_web::web;
use chrono::{DateTime, Utc};

use sms_api::AppState;
use sms_core::domain::entities::Message;
use sms_core::domain::value_objects::{NewMessage, SentMessage};
use sms_core::repositories::InMemoryMessageRepository;
use sms_core::services::{MessageService, MessageServiceConfig, ReportService};
use sms_infra::sms::compute_signature;
use sms_infra::{TwilioConfig, TwilioGateway};

pub const AUTH_TOKEN: &str = "test-auth-token";
pub const CALLBACK_URL: &str = "https://sms.example.com/dhos/v1/sms/callback";
pub const MAX_PAYLOAD: usize = 256 * 1024;

pub type TestState = AppState<InMemoryMessageRepository, TwilioGateway>;

/// Disabled gateway that still checks signatures with the test token
pub fn disabled_gateway() -> TwilioGateway {
    TwilioGateway::new(TwilioConfig {
        account_sid: String::new(),
        auth_token: AUTH_TOKEN.to_string(),
        callback_url: CALLBACK_URL.to_string(),
        api_base_url: "https://api.twilio.com".to_string(),
        request_timeout_secs: 5,
        disabled: true,
    })
    .unwrap()
}

/// Application state over an in-memory store, plus a handle on that store
pub fn test_state() -> (web::Data<TestState>, InMemoryMessageRepository) {
    let repository = InMemoryMessageRepository::new();
    let shared = Arc::new(repository.clone());

    let message_service = MessageService::new(
        shared.clone(),
        Arc::new(disabled_gateway()),
        MessageServiceConfig::default(),
    );
    let report_service = ReportService::new(shared);

    (
        web::Data::new(AppState::new(message_service, report_service)),
        repository,
    )
}

/// A stored message owned by `trustomer`/`product`
pub fn stored_message(
    trustomer: &str,
    product: &str,
    receiver: &str,
    provider_message_id: &str,
    status: &str,
    created: DateTime<Utc>,
) -> Message {
    let mut message = Message::new(
        NewMessage {
            sender: "GDm-Health".to_string(),
            receiver: receiver.to_string(),
            content: "Your blood glucose reading is due".to_string(),
            trustomer_code: trustomer.to_string(),
            product_name: product.to_string(),
        },
        SentMessage {
            provider_message_id: provider_message_id.to_string(),
            status: Some(status.to_string()),
            date_sent: None,
            error_code: None,
            error_message: None,
        },
    );
    message.created = created;
    message.modified = created;
    message
}

/// Form parameters and their valid signature
pub fn signed_callback(params: &[(&str, &str)]) -> (BTreeMap<String, String>, String) {
    let params: BTreeMap<String, String> = params
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let signature = compute_signature(AUTH_TOKEN, CALLBACK_URL, &params).unwrap();
    (params, signature)
}
