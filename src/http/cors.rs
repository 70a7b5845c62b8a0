//! Cross-origin headers.
//!
//! The origin is always the wildcard and credentials are never allowed, so a
//! browser will refuse credentialed (cookie) requests through the proxy. The
//! Notion token travels in `Authorization`, which the wildcard permits.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE,
};
use axum::http::{HeaderMap, HeaderValue};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PATCH, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "Authorization, Notion-Version, Content-Type";
/// One day, in seconds.
pub const MAX_AGE: &str = "86400";

/// Add only `Access-Control-Allow-Origin`.
pub fn insert_allow_origin(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(ALLOW_ORIGIN));
}

/// Add origin, methods and headers; used on relayed responses.
pub fn insert_relay_headers(headers: &mut HeaderMap) {
    insert_allow_origin(headers);
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
}

/// Add the full preflight set, including `Access-Control-Max-Age`.
pub fn insert_preflight_headers(headers: &mut HeaderMap) {
    insert_relay_headers(headers);
    headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(MAX_AGE));
}
