//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Choose output format (pretty for development, JSON for production)
//! - Derive the default filter from config when `RUST_LOG` is unset
//!
//! # Design Decisions
//! - `RUST_LOG` always wins over the configured level
//! - Level applies to this crate and to `tower_http` spans

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Filter directive used when `RUST_LOG` is not set.
pub fn default_directive(log_level: &str) -> String {
    format!("notion_proxy={log_level},tower_http={log_level}")
}

/// Install the global subscriber.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_format == "json" {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    }
}
