use std::collections::BTreeMap;

use serde_json::json;
use wiremock::matchers::{basic_auth, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sms_core::errors::DomainError;
use sms_core::services::ProviderGateway;

use crate::sms::signature::compute_signature;
use crate::sms::twilio::{TwilioConfig, TwilioGateway};
use crate::InfrastructureError;

const ACCOUNT_SID: &str = "AC00000000000000000000000000000000";
const AUTH_TOKEN: &str = "test-auth-token";
const CALLBACK_URL: &str = "https://sms.example.com/dhos/v1/sms/callback";

fn config_for(server: &MockServer) -> TwilioConfig {
    TwilioConfig {
        account_sid: ACCOUNT_SID.to_string(),
        auth_token: AUTH_TOKEN.to_string(),
        callback_url: CALLBACK_URL.to_string(),
        api_base_url: server.uri(),
        request_timeout_secs: 5,
        disabled: false,
    }
}

fn messages_path() -> String {
    format!("/2010-04-01/Accounts/{}/Messages.json", ACCOUNT_SID)
}

fn message_path(sid: &str) -> String {
    format!("/2010-04-01/Accounts/{}/Messages/{}.json", ACCOUNT_SID, sid)
}

#[tokio::test]
async fn test_send_message_posts_form_and_parses_resource() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(messages_path()))
        .and(basic_auth(ACCOUNT_SID, AUTH_TOKEN))
        .and(body_string_contains("To=%2B447400123456"))
        .and(body_string_contains("From=POLARIS"))
        .and(body_string_contains("StatusCallback="))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sid": "SM123",
            "status": "queued",
            "date_sent": null,
            "error_code": null,
            "error_message": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = TwilioGateway::new(config_for(&server)).unwrap();
    let sent = gateway
        .send_message("+447400123456", "Your reading is due", "POLARIS")
        .await
        .unwrap();

    assert_eq!(sent.provider_message_id, "SM123");
    assert_eq!(sent.status.as_deref(), Some("queued"));
    assert!(sent.date_sent.is_none());
    assert!(sent.error_code.is_none());
}

#[tokio::test]
async fn test_send_message_rejected_is_provider_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(messages_path()))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 21211,
            "message": "The 'To' number is not a valid phone number."
        })))
        .mount(&server)
        .await;

    let gateway = TwilioGateway::new(config_for(&server)).unwrap();
    let result = gateway
        .send_message("+447400123456", "Hello", "POLARIS")
        .await;

    assert!(matches!(
        result,
        Err(DomainError::ProviderUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_send_message_unreachable_provider() {
    let server = MockServer::start().await;
    let config = config_for(&server);
    drop(server);

    let gateway = TwilioGateway::new(config).unwrap();
    let result = gateway.send_message("+447400123456", "Hello", "POLARIS").await;

    assert!(matches!(
        result,
        Err(DomainError::ProviderUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_fetch_message_converts_numeric_error_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(message_path("SM123")))
        .and(basic_auth(ACCOUNT_SID, AUTH_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sid": "SM123",
            "status": "undelivered",
            "date_sent": "Thu, 14 Nov 2019 10:00:00 +0000",
            "error_code": 30003,
            "error_message": "Unreachable destination handset"
        })))
        .mount(&server)
        .await;

    let gateway = TwilioGateway::new(config_for(&server)).unwrap();
    let update = gateway.fetch_message("SM123").await.unwrap();

    assert_eq!(update.status.as_deref(), Some("undelivered"));
    assert_eq!(update.error_code.as_deref(), Some("30003"));
    assert_eq!(
        update.error_message.as_deref(),
        Some("Unreachable destination handset")
    );
    assert_eq!(
        update.date_sent.as_deref(),
        Some("Thu, 14 Nov 2019 10:00:00 +0000")
    );
}

#[tokio::test]
async fn test_fetch_message_not_found_returns_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(message_path("SMmissing")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let gateway = TwilioGateway::new(config_for(&server)).unwrap();

    assert!(gateway.fetch_message("SMmissing").await.is_none());
}

#[tokio::test]
async fn test_redact_message_body_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(message_path("SM123")))
        .and(body_string_contains("Body="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sid": "SM123",
            "status": "delivered",
            "date_sent": null,
            "error_code": null,
            "error_message": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = TwilioGateway::new(config_for(&server)).unwrap();

    assert!(gateway.redact_message_body("SM123").await);
}

#[tokio::test]
async fn test_redact_message_body_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(message_path("SM123")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let gateway = TwilioGateway::new(config_for(&server)).unwrap();

    assert!(!gateway.redact_message_body("SM123").await);
}

#[tokio::test]
async fn test_disabled_gateway_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.disabled = true;
    let gateway = TwilioGateway::new(config).unwrap();
    assert!(gateway.is_disabled());

    let sent = gateway
        .send_message("+447400123456", "Hello", "POLARIS")
        .await
        .unwrap();
    assert_eq!(sent.status.as_deref(), Some("sent"));
    assert!(uuid::Uuid::parse_str(&sent.provider_message_id).is_ok());
    assert!(sent.date_sent.is_some());

    let update = gateway.fetch_message(&sent.provider_message_id).await.unwrap();
    assert_eq!(update.status.as_deref(), Some("sent"));

    assert!(gateway.redact_message_body(&sent.provider_message_id).await);
}

#[tokio::test]
async fn test_disabled_gateway_still_checks_signatures() {
    let gateway = TwilioGateway::new(TwilioConfig {
        account_sid: String::new(),
        auth_token: AUTH_TOKEN.to_string(),
        callback_url: CALLBACK_URL.to_string(),
        api_base_url: "https://api.twilio.com".to_string(),
        request_timeout_secs: 5,
        disabled: true,
    })
    .unwrap();

    let mut params = BTreeMap::new();
    params.insert("MessageSid".to_string(), "SM123".to_string());
    params.insert("MessageStatus".to_string(), "delivered".to_string());
    let signature = compute_signature(AUTH_TOKEN, CALLBACK_URL, &params).unwrap();

    assert!(gateway.verify_signature(Some(&signature), &params));
    assert!(!gateway.verify_signature(Some("bm90LWEtc2lnbmF0dXJl"), &params));
    assert!(!gateway.verify_signature(None, &params));
}

#[test]
fn test_missing_credentials_rejected_when_enabled() {
    let config = TwilioConfig {
        account_sid: String::new(),
        auth_token: String::new(),
        callback_url: String::new(),
        api_base_url: "https://api.twilio.com".to_string(),
        request_timeout_secs: 5,
        disabled: false,
    };

    assert!(matches!(
        TwilioGateway::new(config),
        Err(InfrastructureError::Config(_))
    ));
}
