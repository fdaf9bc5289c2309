//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use helm_values_builder::config::BuilderConfig;
use helm_values_builder::lifecycle::Shutdown;
use helm_values_builder::values::default_values;
use helm_values_builder::{HttpServer, ValuesStore};

/// A running server on an ephemeral port, state kept in memory.
pub struct TestServer {
    pub addr: SocketAddr,
    pub store: ValuesStore,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start the HTTP server over a fresh default store.
pub async fn start_server() -> TestServer {
    let mut config = BuilderConfig::default();
    config.persistence.enabled = false;
    config.observability.metrics_enabled = false;

    let store = ValuesStore::new(default_values());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, store.clone());
    let listener_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        server.run(listener, listener_shutdown).await.unwrap();
    });

    TestServer {
        addr,
        store,
        shutdown,
    }
}
