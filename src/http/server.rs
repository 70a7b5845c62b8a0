//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the forwarding handler on every path
//! - Wire up middleware (request ID, tracing, host timeout, origin header)
//! - Bind server to listener
//! - Apply upstream config updates while running
//! - Graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::body::Body;
use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use axum::http::{HeaderName, HeaderValue, Request};
use axum::routing::any;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::request_id::SetRequestIdLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{ProxyConfig, UpstreamConfig};
use crate::http::cors;
use crate::http::handler::proxy_handler;
use crate::http::request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Hot-swappable upstream section.
    pub upstream: Arc<ArcSwap<UpstreamConfig>>,
    pub client: UpstreamClient,
    pub max_body_size: usize,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
    upstream: Arc<ArcSwap<UpstreamConfig>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let client = UpstreamClient::new(&config.timeouts)?;
        Ok(Self::with_client(config, client))
    }

    /// Create a server around an existing upstream client.
    pub fn with_client(config: ProxyConfig, client: UpstreamClient) -> Self {
        let upstream = Arc::new(ArcSwap::from_pointee(config.upstream.clone()));

        let state = AppState {
            upstream: upstream.clone(),
            client,
            max_body_size: config.limits.max_body_size,
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            upstream,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state);

        if config.timeouts.request_secs > 0 {
            router = router.layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )));
        }

        // Outside the timeout so host-generated responses carry the origin too.
        router
            .layer(SetResponseHeaderLayer::if_not_present(
                ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static(cors::ALLOW_ORIGIN),
            ))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id(request.headers()),
                )
            }))
            .layer(SetRequestIdLayer::new(
                HeaderName::from_static(X_REQUEST_ID),
                MakeRequestUuidV4,
            ))
    }

    /// The router, for driving the server in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Stops accepting when `shutdown` fires and returns once in-flight
    /// requests have drained.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ProxyConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        let upstream = self.upstream.clone();
        let startup_config = self.config.clone();
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                apply_update(&upstream, &startup_config, new_config);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Swap in the upstream section of a reloaded config.
///
/// Other sections are bound at startup; changes to them are only reported.
pub fn apply_update(
    upstream: &ArcSwap<UpstreamConfig>,
    startup: &ProxyConfig,
    new_config: ProxyConfig,
) {
    if new_config.listener != startup.listener
        || new_config.timeouts != startup.timeouts
        || new_config.limits != startup.limits
        || new_config.observability != startup.observability
    {
        tracing::warn!("Only [upstream] is reloaded; other changes take effect on restart");
    }

    let current = upstream.load();
    if **current == new_config.upstream {
        tracing::debug!("Upstream configuration unchanged");
        return;
    }

    tracing::info!(
        base_url = %new_config.upstream.base_url,
        route_prefix = %new_config.upstream.route_prefix,
        "Upstream configuration reloaded"
    );
    upstream.store(Arc::new(new_config.upstream));
}
