//! Phone number utilities

use phonenumber::{country, Mode};
use thiserror::Error;

/// Reasons a receiver number can be rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    #[error("Unknown region code: {0}")]
    UnknownRegion(String),

    #[error("Unparseable phone number: {0}")]
    Unparseable(String),

    #[error("Phone number is not valid for its region")]
    Invalid,
}

/// Parse `raw` against `region` (ISO 3166 alpha-2) and format it as E.164.
///
/// Numbers that already carry a `+` prefix keep their own country code.
pub fn normalize_to_e164(raw: &str, region: &str) -> Result<String, PhoneError> {
    let region_id: country::Id = region
        .trim()
        .to_uppercase()
        .parse()
        .map_err(|_| PhoneError::UnknownRegion(region.to_string()))?;

    let parsed = phonenumber::parse(Some(region_id), raw.trim())
        .map_err(|e| PhoneError::Unparseable(e.to_string()))?;

    if !phonenumber::is_valid(&parsed) {
        return Err(PhoneError::Invalid);
    }

    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Strip everything but digits and a leading plus
fn strip_formatting(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Mask a phone number for logs (e.g., +44****3456)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = strip_formatting(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
