//! Loanboard — Entry Point
//!
//! Initializes configuration, logging, metrics, the two collection
//! services, and the HTTP server. Runs until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate (PORT env override applies here)
//! 2. Init tracing (env-filter; JSON or plain lines per config)
//! 3. Build Prometheus metrics registry
//! 4. Open snapshot stores, load both collections into memory
//! 5. Assemble router (collection APIs + probes + static frontend)
//! 6. Bind and serve until SIGINT → graceful shutdown

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;

use loanboard::adapters::http::app_router;
use loanboard::adapters::metrics::ApiMetrics;
use loanboard::adapters::persistence::JsonFileStore;
use loanboard::config;
use loanboard::domain::record::CollectionKind;
use loanboard::usecases::CollectionService;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config =
        config::loader::load_config("config.toml").context("Failed to load configuration")?;

    // ── 2. Initialize logging ───────────────────────────────
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.level));
    if config.log.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = config.server.port,
        data_dir = %config.storage.data_dir,
        "Starting loanboard server"
    );

    // ── 3. Prometheus metrics registry ──────────────────────
    let metrics = Arc::new(ApiMetrics::new().context("Failed to build metrics registry")?);

    // ── 4. Snapshot stores + collection services ────────────
    let data_dir = Path::new(&config.storage.data_dir);
    let lenders_store = JsonFileStore::new(data_dir, CollectionKind::Lenders)
        .await
        .context("Failed to open lenders snapshot store")?;
    let quotes_store = JsonFileStore::new(data_dir, CollectionKind::Quotes)
        .await
        .context("Failed to open quotes snapshot store")?;

    let lenders = Arc::new(
        CollectionService::load(
            CollectionKind::Lenders,
            Arc::new(lenders_store),
            Arc::clone(&metrics),
        )
        .await,
    );
    let quotes = Arc::new(
        CollectionService::load(
            CollectionKind::Quotes,
            Arc::new(quotes_store),
            Arc::clone(&metrics),
        )
        .await,
    );

    // ── 5. Assemble the router ──────────────────────────────
    let app = app_router(
        lenders,
        quotes,
        config.metrics.enabled.then(|| Arc::clone(&metrics)),
        Path::new(&config.server.public_dir),
    );

    // ── 6. Bind and serve until SIGINT ──────────────────────
    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Resolves on SIGINT; axum then drains in-flight requests.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("SIGINT received, initiating graceful shutdown");
}
