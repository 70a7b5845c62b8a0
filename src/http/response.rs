//! Downstream response construction.
//!
//! # Responsibilities
//! - Answer CORS preflight without touching the upstream
//! - Relay an upstream response (any status) with CORS headers
//! - Map forwarding failures to the `Proxy Error` envelope
//!
//! # Design Decisions
//! - Bodies are fully buffered; nothing is streamed
//! - Relayed bodies are always labelled `application/json`
//! - The failure envelope carries only `Access-Control-Allow-Origin`, not the
//!   methods/headers pair of the relay path

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;
use serde::Serialize;

use crate::error::ProxyError;
use crate::http::cors;
use crate::upstream::UpstreamResponse;

/// Body of every 500 produced by the proxy itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub error: &'static str,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn proxy_error(message: impl Into<String>) -> Self {
        Self {
            error: "Proxy Error",
            message: message.into(),
        }
    }
}

/// 204 answer to an `OPTIONS` request.
pub fn preflight() -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    cors::insert_preflight_headers(response.headers_mut());
    response
}

/// Relay an upstream response verbatim.
pub fn relay(upstream: UpstreamResponse) -> Response {
    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;
    if let Some(reason) = upstream.reason {
        // hyper writes this in place of the canonical phrase.
        response.extensions_mut().insert(reason);
    }

    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    cors::insert_relay_headers(headers);
    response
}

/// 500 envelope for a forwarding failure.
pub fn proxy_error(err: &ProxyError) -> Response {
    let envelope = ErrorEnvelope::proxy_error(err.to_string());
    let body = serde_json::to_string(&envelope)
        .unwrap_or_else(|_| r#"{"error":"Proxy Error","message":""}"#.to_string());

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;

    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    cors::insert_allow_origin(headers);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        ACCESS_CONTROL_MAX_AGE,
    };
    use hyper::ext::ReasonPhrase;
    use serde_json::Value;

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_preflight_has_exactly_four_headers() {
        let response = preflight();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let headers = response.headers();
        assert_eq!(headers.len(), 4);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            headers[ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PATCH, DELETE, OPTIONS"
        );
        assert_eq!(
            headers[ACCESS_CONTROL_ALLOW_HEADERS],
            "Authorization, Notion-Version, Content-Type"
        );
        assert_eq!(headers[ACCESS_CONTROL_MAX_AGE], "86400");

        assert!(body_string(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_relay_keeps_error_status_and_body() {
        let upstream = UpstreamResponse {
            status: StatusCode::NOT_FOUND,
            reason: None,
            body: r#"{"object":"error","code":"object_not_found"}"#.to_string(),
        };
        let response = relay(upstream);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let headers = response.headers();
        assert_eq!(headers.len(), 4);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(headers.get(ACCESS_CONTROL_MAX_AGE).is_none());

        assert!(response.extensions().get::<ReasonPhrase>().is_none());
        assert_eq!(
            body_string(response).await,
            r#"{"object":"error","code":"object_not_found"}"#
        );
    }

    #[test]
    fn test_relay_carries_upstream_reason_phrase() {
        let upstream = UpstreamResponse {
            status: StatusCode::OK,
            reason: Some(ReasonPhrase::from_static(b"Everything Fine")),
            body: "{}".to_string(),
        };
        let response = relay(upstream);

        let reason = response.extensions().get::<ReasonPhrase>().unwrap();
        assert_eq!(reason.as_bytes(), b"Everything Fine");
    }

    #[tokio::test]
    async fn test_proxy_error_envelope() {
        let err = ProxyError::InvalidHeader { name: "Notion-Version" };
        let response = proxy_error(&err);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let headers = response.headers();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(headers.get(ACCESS_CONTROL_ALLOW_METHODS).is_none());
        assert!(headers.get(ACCESS_CONTROL_ALLOW_HEADERS).is_none());

        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"], "Proxy Error");
        assert_eq!(body["message"], "Invalid header value for Notion-Version");
    }
}
