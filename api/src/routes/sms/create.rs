use actix_web::{web, HttpResponse};
use validator::Validate;

use sms_core::repositories::MessageRepository;
use sms_core::services::ProviderGateway;

use crate::dto::CreateMessageRequest;
use crate::handlers::ApiError;
use crate::middleware::TenantScope;
use crate::routes::AppState;

/// Handler for POST /dhos/v1/sms
///
/// Validates the body, dispatches the message through the provider and
/// returns the stored record. The tenant scope comes from the `X-Trustomer`
/// and `X-Product` headers.
///
/// # Errors
/// - 400 for missing scope headers, invalid fields or an unparseable receiver
/// - 503 when the provider rejects the message or cannot be reached
pub async fn create_message<R, G>(
    state: web::Data<AppState<R, G>>,
    scope: TenantScope,
    request: web::Json<CreateMessageRequest>,
) -> Result<HttpResponse, ApiError>
where
    R: MessageRepository + 'static,
    G: ProviderGateway + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    let message = state
        .message_service
        .create_message(request.into_new_message(scope))
        .await?;

    Ok(HttpResponse::Ok().json(message))
}
