//! Metrics collection and exposition.
//!
//! # Metrics
//! - `values_updates_total` (counter): state changes by kind (set, reset, replace)
//! - `values_renders_total` (counter): documents rendered by output (preview, download)
//! - `values_persist_writes_total` (counter): state file writes by result
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Prometheus exporter serves its own listener

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_update(kind: &'static str) {
    metrics::counter!("values_updates_total", "kind" => kind).increment(1);
}

pub fn record_render(output: &'static str) {
    metrics::counter!("values_renders_total", "output" => output).increment(1);
}

pub fn record_persist(result: &'static str) {
    metrics::counter!("values_persist_writes_total", "result" => result).increment(1);
}
