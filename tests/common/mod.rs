//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use notion_proxy::config::ProxyConfig;
use notion_proxy::lifecycle::Shutdown;
use notion_proxy::upstream::UpstreamClient;
use notion_proxy::HttpServer;

/// One request as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path and query, as sent on the wire.
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Debug, Clone, Default)]
pub struct Recorder {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Recorder {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> RecordedRequest {
        self.requests().pop().expect("upstream received no request")
    }

    fn push(&self, request: RecordedRequest) {
        self.requests.lock().unwrap().push(request);
    }
}

/// Start a mock upstream that records every request and answers with a fixed
/// status and body after `delay`.
pub async fn start_recording_backend_with_delay(
    status: StatusCode,
    body: &'static str,
    delay: Duration,
) -> (SocketAddr, Recorder) {
    let recorder = Recorder::default();
    let rec = recorder.clone();

    let app = Router::new().fallback(move |request: Request<Body>| {
        let rec = rec.clone();
        async move {
            let (parts, body_stream) = request.into_parts();
            let bytes = axum::body::to_bytes(body_stream, usize::MAX)
                .await
                .unwrap_or_default();
            rec.push(RecordedRequest {
                method: parts.method,
                uri: parts.uri.to_string(),
                headers: parts.headers,
                body: bytes,
            });
            tokio::time::sleep(delay).await;
            (
                status,
                [("content-type", "text/plain"), ("x-upstream", "mock")],
                body,
            )
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, recorder)
}

pub async fn start_recording_backend(status: StatusCode, body: &'static str) -> (SocketAddr, Recorder) {
    start_recording_backend_with_delay(status, body, Duration::ZERO).await
}

/// Start a raw backend that writes `response` verbatim to every connection,
/// then hangs up.
pub async fn start_raw_backend(response: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Start a raw backend that promises more body than it sends.
pub async fn start_truncating_backend() -> SocketAddr {
    start_raw_backend(
        "HTTP/1.1 200 OK\r\nContent-Length: 100\r\nContent-Type: application/json\r\n\r\n{\"object\":",
    )
    .await
}

/// An address nothing is listening on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// A running proxy. Dropping it shuts the server down.
pub struct TestProxy {
    pub addr: SocketAddr,
    pub updates: mpsc::UnboundedSender<ProxyConfig>,
    pub config: ProxyConfig,
    _shutdown: Shutdown,
}

impl TestProxy {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Config pointing the proxy at a local upstream.
pub fn config_for(upstream: SocketAddr) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.base_url = format!("http://{}", upstream);
    config
}

pub fn upstream_client() -> UpstreamClient {
    UpstreamClient::from_reqwest(reqwest::Client::builder().no_proxy().build().unwrap())
}

pub async fn start_proxy(config: ProxyConfig) -> TestProxy {
    let shutdown = Shutdown::new();
    let (updates, config_updates) = mpsc::unbounded_channel();
    let server = HttpServer::with_client(config.clone(), upstream_client());
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    TestProxy {
        addr,
        updates,
        config,
        _shutdown: shutdown,
    }
}

/// Browser-side client; never goes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap()
}
