//! Form state persistence.
//!
//! # Responsibilities
//! - Read the state file once at startup
//! - Write the latest state after a quiet period (debounce)
//!
//! # Design Decisions
//! - Missing or corrupt files fall back to defaults with a warning
//! - Last write wins: a change during the quiet period restarts the timer and
//!   replaces the pending state; nothing is queued
//! - Files are written to a sibling temp file and renamed into place
//! - Pending state is flushed on shutdown

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::lifecycle::ShutdownListener;
use crate::observability::metrics;
use crate::values::{default_values, Mapping, Value};

/// Load persisted state, falling back to the chart defaults.
pub fn load_state(path: &Path) -> Mapping {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "No persisted state, using defaults");
            return default_values();
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read persisted state, using defaults");
            return default_values();
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Mapping(values)) => {
            tracing::info!(path = %path.display(), "Loaded persisted state");
            values
        }
        Ok(_) => {
            tracing::warn!(path = %path.display(), "Persisted state is not an object, using defaults");
            default_values()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to parse persisted state, using defaults");
            default_values()
        }
    }
}

/// Write `values` as JSON, replacing `path` atomically.
pub async fn write_state(path: &Path, values: &Mapping) -> io::Result<()> {
    let json = serde_json::to_string(values)?;
    let tmp = tmp_path(path);
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Handle used to request writes.
#[derive(Clone)]
pub struct Persister {
    tx: Arc<watch::Sender<Arc<Mapping>>>,
    writes: Arc<AtomicU64>,
}

impl Persister {
    /// Replace the pending state. Returns immediately.
    pub fn schedule(&self, values: Arc<Mapping>) {
        self.tx.send_replace(values);
    }

    /// Number of completed writes.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }
}

/// Start the debounced writer task.
///
/// The task exits after flushing when `shutdown` fires or every
/// [`Persister`] is dropped.
pub fn spawn_writer(
    path: PathBuf,
    delay: Duration,
    initial: Arc<Mapping>,
    mut shutdown: ShutdownListener,
) -> (Persister, JoinHandle<()>) {
    let (tx, mut rx) = watch::channel(initial);
    let writes = Arc::new(AtomicU64::new(0));
    let persister = Persister {
        tx: Arc::new(tx),
        writes: writes.clone(),
    };

    let handle = tokio::spawn(async move {
        tracing::info!(
            path = %path.display(),
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "State writer started"
        );
        loop {
            // Wait for the first change of a burst.
            let stop = tokio::select! {
                biased;
                res = rx.changed() => res.is_err(),
                _ = shutdown.recv() => true,
            };
            if stop {
                if rx.has_changed().unwrap_or(false) {
                    flush(&path, &mut rx, &writes).await;
                }
                break;
            }

            // Restart the timer on every further change.
            let stop = loop {
                tokio::select! {
                    biased;
                    _ = shutdown.recv() => break true,
                    _ = tokio::time::sleep(delay) => break false,
                    res = rx.changed() => {
                        if res.is_err() {
                            break true;
                        }
                    }
                }
            };

            flush(&path, &mut rx, &writes).await;
            if stop {
                break;
            }
        }
        tracing::info!(path = %path.display(), "State writer stopped");
    });

    (persister, handle)
}

async fn flush(path: &Path, rx: &mut watch::Receiver<Arc<Mapping>>, writes: &AtomicU64) {
    let snapshot = rx.borrow_and_update().clone();
    match write_state(path, &snapshot).await {
        Ok(()) => {
            writes.fetch_add(1, Ordering::Relaxed);
            metrics::record_persist("ok");
            tracing::debug!(path = %path.display(), "State written");
        }
        Err(e) => {
            metrics::record_persist("error");
            tracing::error!(path = %path.display(), error = %e, "Failed to write state. Keeping it in memory.");
        }
    }
}
