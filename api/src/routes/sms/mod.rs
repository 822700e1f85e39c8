//! SMS message endpoints
//!
//! - `POST   /sms`                create and dispatch a message
//! - `GET    /sms`                list the caller's messages
//! - `GET    /sms/{message_id}`   fetch one message
//! - `DELETE /sms/{message_id}`   soft-delete one of the caller's messages
//! - `POST   /sms/callback`       provider status callback
//! - `POST   /sms/bulk_update`    run the reconciliation sweep
//! - `GET    /sms_status_counts`  per-day status report

pub mod bulk_update;
pub mod callback;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod status_counts;

use actix_web::web;

use sms_core::repositories::MessageRepository;
use sms_core::services::ProviderGateway;

/// Register the SMS routes on a scope
pub fn configure<R, G>(cfg: &mut web::ServiceConfig)
where
    R: MessageRepository + 'static,
    G: ProviderGateway + 'static,
{
    cfg.route("/sms", web::post().to(create::create_message::<R, G>))
        .route("/sms", web::get().to(list::list_messages::<R, G>))
        .route("/sms/callback", web::post().to(callback::sms_callback::<R, G>))
        .route(
            "/sms/bulk_update",
            web::post().to(bulk_update::sms_bulk_update::<R, G>),
        )
        .route("/sms/{message_id}", web::get().to(get::get_message::<R, G>))
        .route(
            "/sms/{message_id}",
            web::delete().to(delete::delete_message::<R, G>),
        )
        .route(
            "/sms_status_counts",
            web::get().to(status_counts::status_counts::<R, G>),
        );
}
