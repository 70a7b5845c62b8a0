//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → update sent to the HTTP server
//!     → atomic swap of the upstream section
//! ```
//!
//! # Design Decisions
//! - All fields have defaults; no file means the stock Notion proxy
//! - Only the upstream section is reloadable, the rest needs a restart
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{
    LimitsConfig, ListenerConfig, ObservabilityConfig, ProxyConfig, TimeoutConfig,
    UpstreamConfig,
};
pub use validation::ValidationError;
pub use watcher::ConfigWatcher;
