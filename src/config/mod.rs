//! Service settings subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → BuilderConfig (validated, immutable)
//!     → handed to the store, the HTTP server and observability
//! ```
//!
//! # Design Decisions
//! - Settings are immutable once loaded; changes require restart
//! - All fields have defaults to allow minimal files
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::BuilderConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::PersistenceConfig;
