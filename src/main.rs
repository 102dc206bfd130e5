//! Book search proxy.
//!
//! # Architecture Overview
//!
//! ```text
//! client ─▶ http (axum + tower-http middleware)
//!             └─▶ catalog::Catalog (search / recommendations)
//!                   ├─▶ upstream::GoogleBooksClient ─▶ Google Books volumes API
//!                   └─▶ catalog::book::normalize
//! client ◀─ SearchResult / Recommendations (JSON)
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use book_proxy::config::resolve_config;
use book_proxy::lifecycle::{signals, Shutdown};
use book_proxy::observability::{logging, metrics};
use book_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "book-proxy")]
#[command(about = "HTTP proxy serving normalized Google Books search results", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(args.config.as_deref())?;

    logging::init_logging(&config.observability);

    tracing::info!("book-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        upstream_timeout_secs = config.upstream.timeout_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
