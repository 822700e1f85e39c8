use actix_web::{web, HttpResponse};
use validator::Validate;

use sms_core::repositories::MessageRepository;
use sms_core::services::ProviderGateway;

use crate::dto::StatusCountsQuery;
use crate::handlers::ApiError;
use crate::routes::AppState;

/// Handler for GET /dhos/v1/sms_status_counts
///
/// Counts messages created between `start_date` and `end_date` (inclusive)
/// per day and status. `trustomer_code` and `product_name` narrow the report.
pub async fn status_counts<R, G>(
    state: web::Data<AppState<R, G>>,
    query: web::Query<StatusCountsQuery>,
) -> Result<HttpResponse, ApiError>
where
    R: MessageRepository + 'static,
    G: ProviderGateway + 'static,
{
    query.validate()?;

    let report = state
        .report_service
        .status_counts(
            &query.start_date,
            &query.end_date,
            query.trustomer_code.as_deref(),
            query.product_name.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(report))
}
