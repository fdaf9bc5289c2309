//! Settings schema.
//!
//! All types derive Serde traits for deserialization from the TOML settings
//! file. Every field has a default so an empty file is valid.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root settings for the values builder service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BuilderConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Where and how often form state is written.
    pub persistence: PersistenceConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Form state persistence.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Persist state between restarts.
    pub enabled: bool,

    /// Directory holding the state file.
    pub state_dir: PathBuf,

    /// State key; the file is `<state_dir>/<key>.json`.
    pub key: String,

    /// Quiet period before a pending change is written, in milliseconds.
    pub debounce_ms: u64,
}

impl PersistenceConfig {
    pub fn state_file(&self) -> PathBuf {
        self.state_dir.join(format!("{}.json", self.key))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            state_dir: PathBuf::from("."),
            key: "helm-values-builder".to_string(),
            debounce_ms: 500,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: BuilderConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.persistence.debounce_ms, 500);
        assert_eq!(
            config.persistence.state_file(),
            PathBuf::from("./helm-values-builder.json")
        );
    }

    #[test]
    fn test_partial_sections() {
        let config: BuilderConfig = toml::from_str(
            r#"
            [persistence]
            state_dir = "/var/lib/hvb"
            debounce_ms = 250

            [observability]
            json_logs = true
            "#,
        )
        .unwrap();
        assert_eq!(config.persistence.key, "helm-values-builder");
        assert_eq!(config.persistence.debounce(), Duration::from_millis(250));
        assert!(config.observability.json_logs);
        assert_eq!(config.observability.log_level, "info");
    }
}
