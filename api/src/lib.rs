//! # SMS API
//!
//! HTTP surface for the SMS service: message creation and lookup, provider
//! callbacks, the reconciliation trigger and status reporting.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
pub use config::Config;
pub use routes::AppState;
