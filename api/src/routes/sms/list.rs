use actix_web::{web, HttpResponse};

use sms_core::repositories::MessageRepository;
use sms_core::services::ProviderGateway;

use crate::dto::ListMessagesQuery;
use crate::handlers::ApiError;
use crate::middleware::TenantScope;
use crate::routes::AppState;

/// Handler for GET /dhos/v1/sms
///
/// Lists the caller's messages, most recent first, optionally filtered by
/// receiver and capped by `limit`.
pub async fn list_messages<R, G>(
    state: web::Data<AppState<R, G>>,
    scope: TenantScope,
    query: web::Query<ListMessagesQuery>,
) -> Result<HttpResponse, ApiError>
where
    R: MessageRepository + 'static,
    G: ProviderGateway + 'static,
{
    let filter = query.into_inner().into_filter(scope);
    let messages = state.message_service.list_messages(filter).await?;

    Ok(HttpResponse::Ok().json(messages))
}
