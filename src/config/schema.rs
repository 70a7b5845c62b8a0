//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so that running without a config file behaves
//! exactly like the hosted Notion edge proxy.

use serde::{Deserialize, Serialize};

/// Notion API origin.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.notion.com";

/// Path prefix stripped from inbound requests.
pub const DEFAULT_ROUTE_PREFIX: &str = "/api/notion/";

/// Path segment inserted between the upstream origin and the remainder.
pub const DEFAULT_API_PREFIX: &str = "/v1/";

/// `Notion-Version` sent when the caller does not supply one.
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Root configuration for the proxy.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream target and request rewriting.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Inbound request limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Where requests are forwarded and how they are rewritten.
///
/// This is the only section applied on hot reload.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Upstream origin, without a path (e.g., "https://api.notion.com").
    pub base_url: String,

    /// Prefix removed from the start of the inbound path.
    pub route_prefix: String,

    /// Segment placed between `base_url` and the stripped remainder.
    pub api_prefix: String,

    /// Value of `Notion-Version` when the inbound request has none.
    pub default_notion_version: String,

    /// Optional `User-Agent` for upstream calls. Empty means none.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            default_notion_version: DEFAULT_NOTION_VERSION.to_string(),
            user_agent: String::new(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Host-level lifetime of one inbound request in seconds. 0 disables it.
    pub request_secs: u64,

    /// Upstream connection establishment timeout in seconds. 0 disables it.
    pub connect_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            connect_secs: 10,
        }
    }
}

/// Inbound request limits.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Output format: "pretty" or "json".
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}
