//! Application factory
//!
//! Builds the actix-web application around an `AppState`, so the binary and
//! the tests share one route table.

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use sms_core::repositories::MessageRepository;
use sms_core::services::ProviderGateway;
use sms_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::ApiError;
use crate::routes::{sms, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<R, G>(
    app_state: web::Data<AppState<R, G>>,
    max_payload_size: usize,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            impl actix_web::body::MessageBody,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: MessageRepository + 'static,
    G: ProviderGateway + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(
            web::JsonConfig::default()
                .limit(max_payload_size)
                .error_handler(|err, _| ApiError::invalid_request(err.to_string()).into()),
        )
        .app_data(
            web::QueryConfig::default()
                .error_handler(|err, _| ApiError::invalid_request(err.to_string()).into()),
        )
        .app_data(
            web::FormConfig::default()
                .limit(max_payload_size)
                .error_handler(|err, _| ApiError::invalid_request(err.to_string()).into()),
        )
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(web::scope("/dhos/v1").configure(sms::configure::<R, G>))
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
