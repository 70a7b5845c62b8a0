//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP layer:
//!     → TraceLayer span per request (method, uri, request_id)
//!     → handler events (relay status + latency, proxy errors)
//!
//! logging.rs:
//!     → EnvFilter → fmt layer (pretty or JSON) → stdout
//! ```

pub mod logging;

pub use logging::init_logging;
