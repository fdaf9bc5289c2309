//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! form / CLI request
//!     → server.rs (Axum setup, trace + timeout layers)
//!     → handlers.rs (update, reset, replace, preview, download)
//!     → store::ValuesStore
//!     → error.rs (ApiError → JSON error body)
//! ```
//!
//! # Endpoints
//! - `GET /health`
//! - `GET|PUT /api/values`
//! - `POST /api/values/update` with `{"path": "...", "value": ...}`
//! - `POST /api/values/reset/{section}`
//! - `GET /api/preview` (text/plain)
//! - `GET /values.yaml` (text/yaml attachment)

pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use server::HttpServer;
