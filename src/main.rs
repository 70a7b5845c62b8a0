//! Notion API CORS proxy.
//!
//! ```text
//!   Browser                       notion-proxy                       Notion
//!  ─────────  OPTIONS /api/notion/*  ┌──────────────┐
//!            ───────────────────────▶│  preflight   │ 204 + CORS
//!            ◀───────────────────────│              │
//!                                    └──────────────┘
//!            GET/POST/... /api/notion/<path>?<q>
//!            ───────────────────────▶┌──────────────┐  /v1/<path>?<q>
//!                                    │   rewrite    │ ─────────────────▶ api.notion.com
//!            ◀───────────────────────│   + relay    │ ◀─────────────────
//!             same status/body + CORS└──────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use notion_proxy::config::{load_config, ConfigWatcher, ProxyConfig};
use notion_proxy::lifecycle::{wait_for_signal, Shutdown};
use notion_proxy::observability::init_logging;
use notion_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "notion-proxy")]
#[command(about = "CORS proxy for the Notion API", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Reload the [upstream] section when the config file changes.
    #[arg(long, requires = "config")]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability)?;

    tracing::info!("notion-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        route_prefix = %config.upstream.route_prefix,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // The watcher must outlive the server; without one the channel just closes.
    let (_watcher, config_updates) = match (&cli.config, cli.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        _ => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
