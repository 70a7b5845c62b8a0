//! Upstream subsystem.
//!
//! # Data Flow
//! ```text
//! UpstreamTarget + inbound method/headers/body
//!     → request.rs (header allow-list, defaults, body rule)
//!     → client.rs (single reqwest call, body read as text)
//!     → UpstreamResponse (status + body)
//! ```

pub mod client;
pub mod request;

pub use client::{UpstreamClient, UpstreamResponse};
pub use request::UpstreamRequest;
