//! Key-specific emission strategies.
//!
//! # Responsibilities
//! - Map a mapping key (`secrets`, `storage`, `postgres`, …) to the way its
//!   value is written
//! - Fall back to the generic rules when the value does not have the shape a
//!   strategy expects
//!
//! # Design Decisions
//! - Strategies are looked up by exact key, at any depth
//! - A strategy returns `false` to decline; the emitter then uses the generic
//!   rules, so adding a key never touches the recursion itself

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::values::{Mapping, Scalar, Value};
use crate::yaml::emit::Emitter;
use crate::yaml::format::{format_scalar, scalar_text};
use crate::yaml::tags::payload_key;

/// Writes the value of one registered key.
pub trait EmitStrategy: Send + Sync + Debug {
    /// Emit `key` and its `value` at `indent`. Returns false to decline.
    fn emit(&self, out: &mut Emitter<'_>, key: &str, value: &Value, indent: usize) -> bool;
}

/// Key → strategy lookup.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    strategies: HashMap<String, Arc<dyn EmitStrategy>>,
}

impl Registry {
    /// A registry with no special cases.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The special cases of the Kestra chart values.
    pub fn kestra() -> Self {
        Self::empty()
            .with("secrets", TaggedUnion)
            .with("storage", TaggedUnion)
            .with("postgres", VerbatimMerge::new("options"))
            .with("imagePullSecrets", SingletonSequence::new("name"))
            .with("micronaut", ClientSkeleton)
    }

    /// Register `strategy` for `key`, replacing any previous entry.
    pub fn register(&mut self, key: impl Into<String>, strategy: impl EmitStrategy + 'static) {
        self.strategies.insert(key.into(), Arc::new(strategy));
    }

    pub fn with(mut self, key: impl Into<String>, strategy: impl EmitStrategy + 'static) -> Self {
        self.register(key, strategy);
        self
    }

    pub fn get(&self, key: &str) -> Option<&dyn EmitStrategy> {
        self.strategies.get(key).map(|s| s.as_ref())
    }
}

/// `{type: <tag>, <payloadKey>: …}` blocks.
///
/// Only the payload selected by `type` is written, under the tag name. The
/// payload may be stored under its camelCase key or under the tag itself. A
/// text payload is copied line by line; any other payload uses the normal rules.
#[derive(Debug, Clone, Copy)]
pub struct TaggedUnion;

impl EmitStrategy for TaggedUnion {
    fn emit(&self, out: &mut Emitter<'_>, key: &str, value: &Value, indent: usize) -> bool {
        let Some(map) = value.as_mapping() else {
            return false;
        };
        let Some(Value::Scalar(tag)) = map.get("type") else {
            return false;
        };

        out.line(indent, format!("{key}:"));
        out.line(indent + 1, format!("type: {}", format_scalar(tag)));

        let tag = scalar_text(tag);
        let payload = map
            .get(payload_key(&tag))
            .or_else(|| map.get(tag.as_str()));
        match payload {
            None => {}
            Some(Value::Scalar(Scalar::String(text))) => {
                if !text.trim().is_empty() {
                    out.line(indent + 1, format!("{tag}:"));
                    out.verbatim(indent + 2, text);
                }
            }
            Some(Value::Mapping(payload)) => {
                out.line(indent + 1, format!("{tag}:"));
                out.mapping(payload, indent + 2);
            }
            Some(other) => out.plain_entry(&tag, other, indent + 1),
        }
        true
    }
}

/// A block whose free-form text field is merged into its siblings.
///
/// `postgres: {uri: …, options: "a: 1\nb: 2"}` becomes `postgres:` followed by
/// `uri: …`, `a: 1` and `b: 2` at the same level.
#[derive(Debug, Clone)]
pub struct VerbatimMerge {
    field: String,
}

impl VerbatimMerge {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl EmitStrategy for VerbatimMerge {
    fn emit(&self, out: &mut Emitter<'_>, key: &str, value: &Value, indent: usize) -> bool {
        let Some(map) = value.as_mapping() else {
            return false;
        };
        let Some(Value::Scalar(Scalar::String(text))) = map.get(&self.field) else {
            return false;
        };

        out.line(indent, format!("{key}:"));
        for (field, value) in map {
            if *field == self.field || value.is_unset() {
                continue;
            }
            out.plain_entry(field, value, indent + 1);
        }
        out.verbatim(indent + 1, text);
        true
    }
}

/// A single-field mapping written as a one-element list.
///
/// `imagePullSecrets: {name: reg}` becomes `imagePullSecrets:` / `- name: reg`.
/// Further fields of the mapping stay in the same list element.
#[derive(Debug, Clone)]
pub struct SingletonSequence {
    field: String,
}

impl SingletonSequence {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl EmitStrategy for SingletonSequence {
    fn emit(&self, out: &mut Emitter<'_>, key: &str, value: &Value, indent: usize) -> bool {
        let Some(map) = value.as_mapping() else {
            return false;
        };
        let Some(Value::Scalar(first)) = map.get(&self.field) else {
            return false;
        };
        if first.is_unset() {
            return false;
        }

        out.line(indent, format!("{key}:"));
        out.line(
            indent + 1,
            format!("- {}: {}", self.field, format_scalar(first)),
        );
        for (field, value) in map {
            if *field != self.field {
                out.plain_entry(field, value, indent + 2);
            }
        }
        true
    }
}

const CLIENT_FIELDS: [&str; 4] = ["providerName", "clientId", "clientSecret", "issuer"];

/// The OAuth2/OIDC client block.
///
/// The form keeps four flat fields; the chart expects
/// `security.oauth2.enabled` and a client named after the provider. Other keys
/// of the block are written after the skeleton with the normal rules.
#[derive(Debug, Clone, Copy)]
pub struct ClientSkeleton;

impl ClientSkeleton {
    /// The flat client fields, either directly on the value or under
    /// `security.oauth2.clients`.
    fn clients(value: &Value) -> Option<&Mapping> {
        let map = value.as_mapping()?;
        if is_flat(map) {
            return Some(map);
        }
        map.get("security")?
            .as_mapping()?
            .get("oauth2")?
            .as_mapping()?
            .get("clients")?
            .as_mapping()
    }
}

fn is_flat(map: &Mapping) -> bool {
    CLIENT_FIELDS.iter().any(|field| map.contains_key(*field))
}

/// Trimmed scalar, if it has any visible content.
fn non_blank(map: &Mapping, field: &str) -> Option<Scalar> {
    match map.get(field)? {
        Value::Scalar(Scalar::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| Scalar::String(trimmed.to_string()))
        }
        Value::Scalar(other) if !other.is_unset() => Some(other.clone()),
        _ => None,
    }
}

impl EmitStrategy for ClientSkeleton {
    fn emit(&self, out: &mut Emitter<'_>, key: &str, value: &Value, indent: usize) -> bool {
        let Some(clients) = Self::clients(value) else {
            return false;
        };

        out.line(indent, format!("{key}:"));
        out.line(indent + 1, "security:");
        out.line(indent + 2, "oauth2:");
        out.line(indent + 3, "enabled: true");
        out.line(indent + 3, "clients:");

        if let Some(provider) = non_blank(clients, "providerName") {
            let client = indent + 4;
            out.line(client, format!("{}:", scalar_text(&provider)));
            if let Some(id) = non_blank(clients, "clientId") {
                out.line(client + 1, format!("client-id: {}", format_scalar(&id)));
            }
            if let Some(secret) = non_blank(clients, "clientSecret") {
                out.line(client + 1, format!("client-secret: {}", format_scalar(&secret)));
            }
            if let Some(issuer) = non_blank(clients, "issuer") {
                out.line(client + 1, "openid:");
                out.line(client + 2, format!("issuer: {}", format_scalar(&issuer)));
            }
        }

        if let Some(map) = value.as_mapping() {
            let flat = is_flat(map);
            for (field, value) in map {
                let consumed = if flat {
                    CLIENT_FIELDS.contains(&field.as_str())
                } else {
                    field == "security"
                };
                if !consumed {
                    out.entry(field, value, indent + 1);
                }
            }
        }
        true
    }
}
