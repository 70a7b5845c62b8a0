//! The forwarding handler.
//!
//! One linear pass per request: preflight short-circuit, or
//! rewrite → buffer body → single upstream call → relay. Every failure after
//! the preflight branch is caught here and becomes the 500 envelope; the
//! handler itself never returns an error to axum.

use std::time::Instant;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request};
use axum::response::Response;

use crate::error::ProxyError;
use crate::http::request::request_id;
use crate::http::response;
use crate::http::server::AppState;
use crate::routing::UpstreamTarget;
use crate::upstream::{UpstreamRequest, UpstreamResponse};

/// Axum entry point.
pub async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    handle(&state, request).await
}

/// Turn one inbound request into one outbound response.
pub async fn handle(state: &AppState, request: Request<Body>) -> Response {
    if request.method() == Method::OPTIONS {
        return response::preflight();
    }

    let start_time = Instant::now();
    let request_id = request_id(request.headers()).to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match forward(state, request).await {
        Ok(upstream) => {
            tracing::info!(
                request_id = %request_id,
                method = %method,
                path = %path,
                status = upstream.status.as_u16(),
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Relayed upstream response"
            );
            response::relay(upstream)
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                method = %method,
                path = %path,
                error = %e,
                "Proxy error"
            );
            response::proxy_error(&e)
        }
    }
}

async fn forward(state: &AppState, request: Request<Body>) -> Result<UpstreamResponse, ProxyError> {
    // Snapshot so a reload mid-request cannot mix two configs.
    let upstream = state.upstream.load_full();

    let (parts, body) = request.into_parts();
    let target = UpstreamTarget::resolve(&upstream, parts.uri.path(), parts.uri.query())?;

    tracing::debug!(
        method = %parts.method,
        target = %target.as_str(),
        "Forwarding request"
    );

    let body = axum::body::to_bytes(body, state.max_body_size)
        .await
        .map_err(ProxyError::RequestBody)?;

    let outbound =
        UpstreamRequest::from_inbound(parts.method, &parts.headers, body, target, &upstream)?;
    state.client.send(outbound).await
}
