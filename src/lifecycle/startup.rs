//! Startup orchestration.
//!
//! # Responsibilities
//! - Load persisted form state (or defaults)
//! - Start the debounced writer when persistence is enabled
//! - Start the metrics exporter when enabled
//!
//! # Design Decisions
//! - Broken state files never stop startup
//! - Subsystems initialize in order, not concurrently

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::BuilderConfig;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::store::{load_state, spawn_writer, ValuesStore};
use crate::values::default_values;

/// Everything the server needs, plus the writer task to await on exit.
pub struct Startup {
    pub store: ValuesStore,
    pub writer: Option<JoinHandle<()>>,
}

pub fn initialize(config: &BuilderConfig, shutdown: &Shutdown) -> Startup {
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    if !config.persistence.enabled {
        tracing::info!("Persistence disabled, state is kept in memory");
        return Startup {
            store: ValuesStore::new(default_values()),
            writer: None,
        };
    }

    let path = config.persistence.state_file();
    let initial = Arc::new(load_state(&path));
    let (persister, writer) = spawn_writer(
        path,
        config.persistence.debounce(),
        initial.clone(),
        shutdown.subscribe(),
    );

    Startup {
        store: ValuesStore::with_persister(initial, persister),
        writer: Some(writer),
    }
}
