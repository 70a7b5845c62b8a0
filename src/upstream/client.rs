//! Upstream HTTP client.
//!
//! A thin wrapper over a shared `reqwest::Client`. The client pools
//! connections but keeps no per-request state: one call in, one buffered
//! response out, no retries and no overall timeout.

use std::time::Duration;

use axum::http::StatusCode;
use hyper::ext::ReasonPhrase;

use crate::config::TimeoutConfig;
use crate::error::ProxyError;
use crate::upstream::request::UpstreamRequest;

/// A fully buffered upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    /// Set only when upstream sent a non-canonical reason phrase.
    pub reason: Option<ReasonPhrase>,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    inner: reqwest::Client,
}

impl UpstreamClient {
    /// Build a client honoring the connect timeout (0 disables it).
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if timeouts.connect_secs > 0 {
            builder = builder.connect_timeout(Duration::from_secs(timeouts.connect_secs));
        }
        Ok(Self {
            inner: builder.build()?,
        })
    }

    /// Wrap an already configured client.
    pub fn from_reqwest(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    /// Perform exactly one upstream call and read its body as text.
    pub async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, ProxyError> {
        let mut builder = self
            .inner
            .request(request.method, request.target.into_url())
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(ProxyError::Transport)?;
        let status = response.status();
        let reason = response.extensions().get::<ReasonPhrase>().cloned();
        let body = response.text().await.map_err(ProxyError::ResponseBody)?;

        Ok(UpstreamResponse {
            status,
            reason,
            body,
        })
    }
}
