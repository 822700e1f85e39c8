//! Common utility functions

pub mod datetime;
pub mod phone;

// Re-export commonly used utilities
pub use datetime::{format_measurement_timestamp, parse_report_datetime};
pub use phone::{mask_phone_number, normalize_to_e164, PhoneError};
