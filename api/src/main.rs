use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};

use sms_api::{create_app, telemetry, AppState, Config};
use sms_core::services::{MessageService, MessageServiceConfig, ReportService};
use sms_infra::{DatabasePool, MySqlMessageRepository, TwilioGateway};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    telemetry::init(&config.logging);

    info!(
        environment = %config.environment,
        bind_address = %config.server.bind_address(),
        "Starting SMS API server"
    );

    if config.provider_disable_ignored() {
        warn!("TWILIO_DISABLED is ignored in production, messages will be sent");
    }

    let pool = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to database")?;
    pool.run_migrations()
        .await
        .context("failed to run database migrations")?;

    let repository = Arc::new(MySqlMessageRepository::new(pool.get_pool().clone()));
    let gateway = Arc::new(
        TwilioGateway::from_provider_config(&config.provider)
            .context("failed to initialise Twilio gateway")?,
    );

    let message_service = MessageService::new(
        repository.clone(),
        gateway,
        MessageServiceConfig::from(&config.messaging),
    );
    let report_service = ReportService::new(repository);
    let app_state = web::Data::new(AppState::new(message_service, report_service));

    let max_payload_size = config.server.max_payload_size;
    let mut server =
        HttpServer::new(move || create_app(app_state.clone(), max_payload_size));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(config.server.bind_address())
        .with_context(|| format!("failed to bind {}", config.server.bind_address()))?
        .run()
        .await?;

    pool.close().await;
    info!("SMS API server stopped");
    Ok(())
}
