//! Helm values builder service.
//!
//! # Architecture Overview
//!
//! ```text
//!   form / CLI ──update(path, value)──▶ http ──▶ store (ArcSwap<Mapping>)
//!                                                  │            │
//!                                                  │            └──▶ persist (debounced JSON file)
//!                                                  ▼
//!   preview / copy / download ◀──────────── yaml::serialize
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use helm_values_builder::config::{load_config, BuilderConfig};
use helm_values_builder::lifecycle::{signals, startup, Shutdown};
use helm_values_builder::observability::logging;
use helm_values_builder::HttpServer;

#[derive(Parser)]
#[command(name = "helm-values-builder")]
#[command(about = "Build Helm chart values from form fields", long_about = None)]
struct Args {
    /// Settings file (TOML). Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => BuilderConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("helm-values-builder v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        persistence = config.persistence.enabled,
        state_file = %config.persistence.state_file().display(),
        debounce_ms = config.persistence.debounce_ms,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    let state = startup::initialize(&config, &shutdown);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(&config, state.store);
    server.run(listener, shutdown.subscribe()).await?;

    // Stop the writer even if the server exited on its own.
    if !shutdown.is_triggered() {
        tracing::warn!("HTTP server stopped without a shutdown signal");
        shutdown.trigger();
    }
    if let Some(writer) = state.writer {
        if let Err(e) = writer.await {
            tracing::error!(error = %e, "State writer task failed");
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
