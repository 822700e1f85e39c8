//! Tenant scope extraction.
//!
//! Every tenant-scoped endpoint identifies its caller through the
//! `X-Trustomer` and `X-Product` headers. Values are lower-cased so scope
//! comparisons are case-insensitive.

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::handlers::ApiError;

pub const TRUSTOMER_HEADER: &str = "X-Trustomer";
pub const PRODUCT_HEADER: &str = "X-Product";

/// Customer and product the request acts for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantScope {
    pub trustomer_code: String,
    pub product_name: String,
}

impl TenantScope {
    fn from_headers(req: &HttpRequest) -> Result<Self, ApiError> {
        Ok(Self {
            trustomer_code: header_value(req, TRUSTOMER_HEADER)?,
            product_name: header_value(req, PRODUCT_HEADER)?,
        })
    }
}

fn header_value(req: &HttpRequest, name: &'static str) -> Result<String, ApiError> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingScope(name))
}

impl FromRequest for TenantScope {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::from_headers(req))
    }
}
