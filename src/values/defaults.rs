//! Default chart values and per-section reset.

use std::fmt;
use std::str::FromStr;

use serde_json::json;
use thiserror::Error;

use crate::values::path::{get_path, remove_path, set_path, FieldPath};
use crate::values::value::{mapping_from_json, Mapping, Value};

/// Initial form state for the Kestra chart.
pub fn default_values() -> Mapping {
    mapping_from_json(json!({
        "image": {
            "repository": "registry.kestra.io/docker/kestra-ee",
            "tag": "latest",
            "pullPolicy": "IfNotPresent"
        },
        "imagePullSecrets": {
            "name": ""
        },
        "configuration": {
            "datasources": {
                "postgres": {
                    "driverClassName": "org.postgresql.Driver",
                    "uri": "",
                    "username": "",
                    "password": "",
                    "options": ""
                }
            },
            "kestra": {
                "secrets": {
                    "type": "",
                    "jdbc": "",
                    "elasticsearch": "",
                    "azure": "",
                    "aws": "",
                    "google": "",
                    "vault": "",
                    "cyberark": ""
                },
                "storage": {
                    "type": "",
                    "s3": "",
                    "gcs": "",
                    "azure": "",
                    "minio": ""
                },
                "encryption": {
                    "secret-key": ""
                },
                "queue": {
                    "type": "postgres"
                },
                "repository": {
                    "type": "postgres"
                },
                "ee": {
                    "license": {
                        "id": "",
                        "key": "",
                        "fingerprint": ""
                    }
                }
            }
        },
        "deployments": {
            "webserver": { "enabled": true },
            "executor": { "enabled": false },
            "worker": { "enabled": false },
            "scheduler": { "enabled": false },
            "standalone": { "enabled": false }
        },
        "postgresql": {
            "enabled": false
        },
        "minio": {
            "enabled": false
        }
    }))
}

/// A form section that can be reset independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Image and pull secret.
    Instance,
    /// Datasource credentials.
    Database,
    /// Secrets, storage, encryption, queue, repository and license.
    Kestra,
    /// OAuth2/OIDC client block.
    Sso,
    /// Per-component deployment toggles.
    Deployment,
    /// Bundled PostgreSQL and MinIO toggles.
    Development,
    /// Everything.
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown section {0:?}")]
pub struct UnknownSection(pub String);

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Instance,
        Section::Database,
        Section::Kestra,
        Section::Sso,
        Section::Deployment,
        Section::Development,
        Section::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Instance => "instance",
            Section::Database => "database",
            Section::Kestra => "kestra",
            Section::Sso => "sso",
            Section::Deployment => "deployment",
            Section::Development => "development",
            Section::All => "all",
        }
    }

    /// Paths restored from the defaults by this section.
    fn restored_paths(&self) -> &'static [&'static str] {
        match self {
            Section::Instance => &["image", "imagePullSecrets"],
            Section::Database => &["configuration.datasources"],
            Section::Kestra => &["configuration.kestra"],
            Section::Sso | Section::All => &[],
            Section::Deployment => &["deployments"],
            Section::Development => &["postgresql", "minio"],
        }
    }

    /// Apply the reset to `values`, returning the new tree.
    pub fn reset(&self, values: &Mapping) -> Mapping {
        let defaults = default_values();
        match self {
            Section::All => defaults,
            Section::Sso => match FieldPath::parse("configuration.micronaut") {
                Ok(path) => remove_path(values, &path),
                Err(_) => values.clone(),
            },
            _ => self
                .restored_paths()
                .iter()
                .filter_map(|raw| FieldPath::parse(raw).ok())
                .fold(values.clone(), |acc, path| {
                    let value = get_path(&defaults, &path)
                        .cloned()
                        .unwrap_or_else(Value::absent);
                    set_path(&acc, &path, value)
                }),
        }
    }
}

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> FieldPath {
        FieldPath::parse(s).unwrap()
    }

    #[test]
    fn test_defaults_top_level_order() {
        let keys: Vec<_> = default_values().keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                "image",
                "imagePullSecrets",
                "configuration",
                "deployments",
                "postgresql",
                "minio"
            ]
        );
    }

    #[test]
    fn test_reset_database_restores_only_datasources() {
        let values = default_values();
        let values = set_path(&values, &path("configuration.datasources.postgres.uri"), "jdbc:x".into());
        let values = set_path(&values, &path("image.tag"), "0.20".into());

        let reset = Section::Database.reset(&values);
        assert_eq!(
            get_path(&reset, &path("configuration.datasources.postgres.uri")),
            Some(&Value::from(""))
        );
        assert_eq!(get_path(&reset, &path("image.tag")), Some(&Value::from("0.20")));
    }

    #[test]
    fn test_reset_sso_removes_micronaut() {
        let values = set_path(
            &default_values(),
            &path("configuration.micronaut.security.oauth2.clients.providerName"),
            "google".into(),
        );
        let reset = Section::Sso.reset(&values);
        assert!(get_path(&reset, &path("configuration.micronaut")).is_none());
        assert!(get_path(&reset, &path("configuration.kestra")).is_some());
    }

    #[test]
    fn test_section_from_str() {
        assert_eq!("Kestra".parse::<Section>(), Ok(Section::Kestra));
        assert_eq!("development".parse::<Section>(), Ok(Section::Development));
        assert_eq!(
            "bogus".parse::<Section>(),
            Err(UnknownSection("bogus".to_string()))
        );
    }
}
