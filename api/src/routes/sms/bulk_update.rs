use actix_web::{web, HttpResponse};

use sms_core::repositories::MessageRepository;
use sms_core::services::ProviderGateway;

use crate::handlers::ApiError;
use crate::routes::AppState;

/// Handler for POST /dhos/v1/sms/bulk_update
///
/// Runs the reconciliation sweep to completion. Meant to be called by a
/// scheduler; individual provider failures are logged, not returned.
pub async fn sms_bulk_update<R, G>(
    state: web::Data<AppState<R, G>>,
) -> Result<HttpResponse, ApiError>
where
    R: MessageRepository + 'static,
    G: ProviderGateway + 'static,
{
    state.message_service.bulk_reconcile().await?;
    Ok(HttpResponse::NoContent().finish())
}
