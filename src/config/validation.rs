//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the upstream origin and path prefixes
//! - Validate header values sent upstream
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "upstream.base_url").
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    validate_base_url(&config.upstream.base_url, &mut errors);
    validate_prefix("upstream.route_prefix", &config.upstream.route_prefix, &mut errors);
    validate_prefix("upstream.api_prefix", &config.upstream.api_prefix, &mut errors);

    let version = &config.upstream.default_notion_version;
    if version.is_empty() || HeaderValue::from_str(version).is_err() {
        errors.push(ValidationError::new(
            "upstream.default_notion_version",
            "must be a non-empty header value",
        ));
    }

    if HeaderValue::from_str(&config.upstream.user_agent).is_err() {
        errors.push(ValidationError::new(
            "upstream.user_agent",
            "must be a valid header value",
        ));
    }

    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::new(
            "limits.max_body_size",
            "must be greater than 0",
        ));
    }

    if !matches!(config.observability.log_format.as_str(), "pretty" | "json") {
        errors.push(ValidationError::new(
            "observability.log_format",
            format!(
                "unknown format '{}', expected 'pretty' or 'json'",
                config.observability.log_format
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_base_url(base_url: &str, errors: &mut Vec<ValidationError>) {
    const FIELD: &str = "upstream.base_url";

    let url = match Url::parse(base_url) {
        Ok(url) => url,
        Err(e) => {
            errors.push(ValidationError::new(FIELD, format!("invalid URL: {}", e)));
            return;
        }
    };

    if !matches!(url.scheme(), "http" | "https") {
        errors.push(ValidationError::new(
            FIELD,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    // The api prefix supplies the path, so the origin must not carry one.
    if url.path() != "/" || base_url.ends_with('/') {
        errors.push(ValidationError::new(FIELD, "must be an origin without a path"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        errors.push(ValidationError::new(
            FIELD,
            "must not contain a query or fragment",
        ));
    }
}

fn validate_prefix(field: &'static str, prefix: &str, errors: &mut Vec<ValidationError>) {
    if !prefix.starts_with('/') || !prefix.ends_with('/') {
        errors.push(ValidationError::new(
            field,
            format!("'{}' must start and end with '/'", prefix),
        ));
    }
}
