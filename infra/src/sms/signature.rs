//! Twilio request signature validation
//!
//! Twilio signs each callback with HMAC-SHA1 keyed by the account's auth token
//! over the callback URL followed by every form parameter, sorted by name, as
//! `name` immediately followed by `value`. The digest is base64 encoded.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use reqwest::Url;
use sha1::Sha1;

/// Header carrying the callback signature
pub const SIGNATURE_HEADER: &str = "X-Twilio-Signature";

type HmacSha1 = Hmac<Sha1>;

/// Compute the signature Twilio would send for `url` and `params`
pub fn compute_signature(
    auth_token: &str,
    url: &str,
    params: &BTreeMap<String, String>,
) -> Option<String> {
    let mut mac = HmacSha1::new_from_slice(auth_token.as_bytes()).ok()?;
    mac.update(url.as_bytes());
    for (name, value) in params {
        mac.update(name.as_bytes());
        mac.update(value.as_bytes());
    }
    Some(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Check `signature` against `url`, also trying the URL with its default port
/// made explicit and with the port removed
pub fn validate_signature(
    auth_token: &str,
    url: &str,
    params: &BTreeMap<String, String>,
    signature: &str,
) -> bool {
    if signature.is_empty() {
        return false;
    }

    url_variants(url).iter().any(|candidate| {
        compute_signature(auth_token, candidate, params)
            .is_some_and(|expected| constant_time_eq(expected.as_bytes(), signature.as_bytes()))
    })
}

fn url_variants(url: &str) -> Vec<String> {
    let mut variants = vec![url.to_string()];

    let Ok(parsed) = Url::parse(url) else {
        return variants;
    };
    let (Some(host), Some(port)) = (parsed.host_str(), parsed.port_or_known_default()) else {
        return variants;
    };

    let mut rest = parsed.path().to_string();
    if let Some(query) = parsed.query() {
        rest.push('?');
        rest.push_str(query);
    }

    for candidate in [
        format!("{}://{}:{}{}", parsed.scheme(), host, port, rest),
        format!("{}://{}{}", parsed.scheme(), host, rest),
    ] {
        if !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}
