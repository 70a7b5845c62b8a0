//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound path + query
//!     → rewrite.rs (strip route prefix, insert api prefix)
//!     → UpstreamTarget (parsed URL)
//!     → upstream client
//! ```
//!
//! # Design Decisions
//! - Exactly one upstream; there is no route table
//! - Prefix match is literal and case-sensitive
//! - Query string is passed through untouched

pub mod rewrite;

pub use rewrite::{build_upstream_url, strip_route_prefix, UpstreamTarget};
