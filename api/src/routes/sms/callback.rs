use actix_web::{web, HttpRequest, HttpResponse};
use std::collections::BTreeMap;

use sms_core::domain::value_objects::StatusCallback;
use sms_core::repositories::MessageRepository;
use sms_core::services::ProviderGateway;
use sms_infra::sms::SIGNATURE_HEADER;

use crate::handlers::ApiError;
use crate::routes::AppState;

/// Handler for POST /dhos/v1/sms/callback
///
/// Receives Twilio's form-encoded status callback. The signature header is
/// checked against every form parameter before anything is read.
///
/// # Errors
/// - 403 when the signature is missing or wrong
/// - 400 when `MessageSid` is absent or names no known message
pub async fn sms_callback<R, G>(
    req: HttpRequest,
    state: web::Data<AppState<R, G>>,
    form: web::Form<BTreeMap<String, String>>,
) -> Result<HttpResponse, ApiError>
where
    R: MessageRepository + 'static,
    G: ProviderGateway + 'static,
{
    let params = form.into_inner();
    let signature = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    state
        .message_service
        .verify_callback_signature(signature, &params)?;

    let callback = StatusCallback::from_form(&params)?;
    state.message_service.handle_callback(callback).await?;

    Ok(HttpResponse::NoContent().finish())
}
