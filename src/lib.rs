//! Helm values builder library.
//!
//! Form state lives in a path-addressed tree; every read renders it into a
//! `values.yaml` document for the Kestra chart.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod store;
pub mod values;
pub mod yaml;

pub use config::BuilderConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::ValuesStore;
pub use yaml::serialize;
