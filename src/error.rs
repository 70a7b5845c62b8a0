//! Forwarding failures.
//!
//! Upstream 4xx/5xx responses are not errors here; they are relayed as-is.
//! Everything in [`ProxyError`] ends the invocation with a 500 envelope whose
//! `message` is the error's `Display` text.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// The rewritten upstream URL does not parse.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A configured header value cannot be sent.
    #[error("Invalid header value for {name}")]
    InvalidHeader { name: &'static str },

    /// The inbound body could not be read (including exceeding the size limit).
    #[error("Failed to read request body: {0}")]
    RequestBody(#[source] axum::Error),

    /// The upstream call failed before a response arrived.
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    /// The upstream response body could not be read.
    #[error("Failed to read upstream response: {0}")]
    ResponseBody(#[source] reqwest::Error),
}
