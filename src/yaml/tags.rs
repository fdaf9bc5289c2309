//! Tag ↔ payload key table for tagged-union blocks.
//!
//! A block such as `secrets: {type: aws-secrets-manager, awsSecretsManager: …}`
//! names its variant in hyphen-case while the form stores the payload under a
//! camelCase key. Legacy tags (`azure`, `vault`, …) are their own payload
//! keys, so the mapping is listed explicitly instead of derived.

/// `(tag, payload key)` pairs.
const TAG_TABLE: &[(&str, &str)] = &[
    // secret managers
    ("environment", "environment"),
    ("jdbc", "jdbc"),
    ("azure-key-vault", "azureKeyVault"),
    ("aws-secrets-manager", "awsSecretsManager"),
    ("gcp-secret-manager", "gcpSecretManager"),
    ("hashicorp-vault", "hashicorpVault"),
    // legacy secret managers
    ("elasticsearch", "elasticsearch"),
    ("azure", "azure"),
    ("aws", "aws"),
    ("google", "google"),
    ("vault", "vault"),
    ("cyberark", "cyberark"),
    // storage backends
    ("s3", "s3"),
    ("gcs", "gcs"),
    ("minio", "minio"),
];

/// Key holding the payload for `tag`. Unknown tags map to themselves.
pub fn payload_key(tag: &str) -> &str {
    TAG_TABLE
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, key)| *key)
        .unwrap_or(tag)
}

/// Tag whose payload lives under `key`, if the key is a known payload key.
pub fn tag_for_payload_key(key: &str) -> Option<&'static str> {
    TAG_TABLE
        .iter()
        .find(|(_, k)| *k == key)
        .map(|(tag, _)| *tag)
}
