//! Route handlers
//!
//! All SMS endpoints live under `/dhos/v1`.

pub mod sms;

use std::sync::Arc;

use sms_core::repositories::MessageRepository;
use sms_core::services::{MessageService, ProviderGateway, ReportService};

/// Application state that holds shared services
pub struct AppState<R, G>
where
    R: MessageRepository,
    G: ProviderGateway,
{
    pub message_service: Arc<MessageService<R, G>>,
    pub report_service: Arc<ReportService<R>>,
}

impl<R, G> AppState<R, G>
where
    R: MessageRepository,
    G: ProviderGateway,
{
    pub fn new(message_service: MessageService<R, G>, report_service: ReportService<R>) -> Self {
        Self {
            message_service: Arc::new(message_service),
            report_service: Arc::new(report_service),
        }
    }
}
