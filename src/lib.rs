//! Notion API CORS proxy.
//!
//! Browsers cannot call `api.notion.com` directly because the API sends no
//! CORS headers. This crate serves `/api/notion/<path>`, forwards each call
//! to `https://api.notion.com/v1/<path>` with the caller's `Authorization`
//! and `Notion-Version`, and relays the answer with permissive CORS headers.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
