use actix_web::{web, HttpResponse};
use uuid::Uuid;

use sms_core::errors::DomainError;
use sms_core::repositories::{MessageRepository, QueryOptions};
use sms_core::services::ProviderGateway;

use crate::dto::GetMessageQuery;
use crate::handlers::ApiError;
use crate::routes::AppState;

/// Handler for GET /dhos/v1/sms/{message_id}
///
/// Soft-deleted messages are only returned with `?include_deleted=true`.
pub async fn get_message<R, G>(
    state: web::Data<AppState<R, G>>,
    path: web::Path<String>,
    query: web::Query<GetMessageQuery>,
) -> Result<HttpResponse, ApiError>
where
    R: MessageRepository + 'static,
    G: ProviderGateway + 'static,
{
    let uuid = parse_message_id(&path)?;
    let options = QueryOptions {
        include_deleted: query.include_deleted,
    };

    let message = state.message_service.get_message(uuid, options).await?;
    Ok(HttpResponse::Ok().json(message))
}

/// A malformed identifier cannot name a stored message
pub(crate) fn parse_message_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| {
        ApiError::Domain(DomainError::NotFound {
            resource: format!("Message {}", raw),
        })
    })
}
