//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, host timeout)
//!     → handler.rs (preflight, or forward)
//!         → routing (rewrite path to upstream URL)
//!         → upstream (single call, buffered body)
//!     → response.rs (relay or error envelope)
//!     → cors.rs (headers on every path)
//!     → Send to client
//! ```

pub mod cors;
pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use handler::handle;
pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
