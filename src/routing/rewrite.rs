//! Inbound path → upstream URL rewriting.
//!
//! `/api/notion/databases?page_size=10` becomes
//! `https://api.notion.com/v1/databases?page_size=10`.
//!
//! Callers are expected to leave `v1` out of their own paths, since the api
//! prefix is always re-inserted: `/api/notion/v1/users/me` is forwarded to
//! `/v1/v1/users/me`.

use url::Url;

use crate::config::UpstreamConfig;
use crate::error::ProxyError;

/// Remove `prefix` from the start of `path`.
///
/// A path outside the prefix is returned whole.
pub fn strip_route_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    path.strip_prefix(prefix).unwrap_or(path)
}

/// Build the upstream URL string without validating it.
///
/// An empty query (a bare `?`) is dropped.
pub fn build_upstream_url(config: &UpstreamConfig, path: &str, query: Option<&str>) -> String {
    let remainder = strip_route_prefix(path, &config.route_prefix);
    match query {
        Some(q) if !q.is_empty() => format!(
            "{}{}{}?{}",
            config.base_url, config.api_prefix, remainder, q
        ),
        _ => format!("{}{}{}", config.base_url, config.api_prefix, remainder),
    }
}

/// A validated upstream URL for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    url: Url,
}

impl UpstreamTarget {
    /// Rewrite an inbound path and query into an upstream target.
    pub fn resolve(
        config: &UpstreamConfig,
        path: &str,
        query: Option<&str>,
    ) -> Result<Self, ProxyError> {
        let raw = build_upstream_url(config, path, query);
        let url = Url::parse(&raw).map_err(|source| ProxyError::InvalidUrl { url: raw, source })?;
        Ok(Self { url })
    }

    pub fn into_url(self) -> Url {
        self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}
