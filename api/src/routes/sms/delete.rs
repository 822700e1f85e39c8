use actix_web::{web, HttpResponse};

use sms_core::repositories::MessageRepository;
use sms_core::services::ProviderGateway;

use super::get::parse_message_id;
use crate::handlers::ApiError;
use crate::middleware::TenantScope;
use crate::routes::AppState;

/// Handler for DELETE /dhos/v1/sms/{message_id}
///
/// Soft-deletes the message when it belongs to the caller's tenant scope
/// and returns the updated record. Another tenant's message yields 403.
pub async fn delete_message<R, G>(
    state: web::Data<AppState<R, G>>,
    scope: TenantScope,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    R: MessageRepository + 'static,
    G: ProviderGateway + 'static,
{
    let uuid = parse_message_id(&path)?;
    let message = state
        .message_service
        .delete_message(uuid, &scope.trustomer_code, &scope.product_name)
        .await?;

    Ok(HttpResponse::Ok().json(message))
}
