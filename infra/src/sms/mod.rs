//! SMS provider module
//!
//! - **Twilio gateway**: the `ProviderGateway` implementation over Twilio's REST API,
//!   with a disabled mode that answers locally for non-production use
//! - **Signature**: validation of the `X-Twilio-Signature` header on status callbacks

pub mod signature;
pub mod twilio;

pub use signature::{compute_signature, validate_signature, SIGNATURE_HEADER};
pub use twilio::{TwilioConfig, TwilioGateway};

#[cfg(test)]
mod tests;
