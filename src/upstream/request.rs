//! Outbound request construction.
//!
//! Only three headers cross the proxy: `Authorization` (empty when absent),
//! `Notion-Version` (defaulted when absent or empty) and a fixed
//! `Content-Type: application/json`. Everything else the browser sent,
//! cookies included, stays behind.

use axum::body::Bytes;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method};

use crate::config::UpstreamConfig;
use crate::error::ProxyError;
use crate::routing::UpstreamTarget;

pub const NOTION_VERSION: &str = "notion-version";

/// A fully prepared upstream call.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: Method,
    pub target: UpstreamTarget,
    pub headers: HeaderMap,
    /// `None` for GET/HEAD and for empty inbound bodies.
    pub body: Option<Bytes>,
}

impl UpstreamRequest {
    /// Mirror an inbound request onto `target`.
    pub fn from_inbound(
        method: Method,
        inbound: &HeaderMap,
        body: Bytes,
        target: UpstreamTarget,
        config: &UpstreamConfig,
    ) -> Result<Self, ProxyError> {
        let mut headers = HeaderMap::with_capacity(4);

        let authorization = inbound
            .get(AUTHORIZATION)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(""));
        headers.insert(AUTHORIZATION, authorization);

        let notion_version = match inbound.get(NOTION_VERSION) {
            Some(v) if !v.is_empty() => v.clone(),
            _ => HeaderValue::from_str(&config.default_notion_version)
                .map_err(|_| ProxyError::InvalidHeader { name: "Notion-Version" })?,
        };
        headers.insert(HeaderName::from_static(NOTION_VERSION), notion_version);

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if !config.user_agent.is_empty() {
            let user_agent = HeaderValue::from_str(&config.user_agent)
                .map_err(|_| ProxyError::InvalidHeader { name: "User-Agent" })?;
            headers.insert(USER_AGENT, user_agent);
        }

        let body = if carries_body(&method) && !body.is_empty() {
            Some(body)
        } else {
            None
        };

        Ok(Self {
            method,
            target,
            headers,
            body,
        })
    }
}

/// Whether a request body is forwarded for `method`.
pub fn carries_body(method: &Method) -> bool {
    *method != Method::GET && *method != Method::HEAD
}
