//! Configuration tree.
//!
//! The tree is a closed set of variants so that every consumer can match
//! exhaustively. JSON is the interchange format: objects keep their key
//! order (`serde_json` is built with `preserve_order`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Insertion-ordered mapping. Key order is output order.
pub type Mapping = IndexMap<String, Value>;

/// A node of the configuration tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    Mapping(Mapping),
    Sequence(Vec<Value>),
    Scalar(Scalar),
}

/// Leaf values.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
    /// Explicit absence. Equivalent to a field that was never set.
    Absent,
}

impl Value {
    pub fn absent() -> Self {
        Value::Scalar(Scalar::Absent)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::Scalar(Scalar::String(s.into()))
    }

    /// Absent or the empty string. Neither is ever emitted.
    pub fn is_unset(&self) -> bool {
        matches!(self, Value::Scalar(s) if s.is_unset())
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }
}

impl Scalar {
    pub fn is_unset(&self) -> bool {
        match self {
            Scalar::Absent => true,
            Scalar::String(s) => s.is_empty(),
            Scalar::Number(_) | Scalar::Bool(_) => false,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::absent(),
            serde_json::Value::Bool(b) => Value::Scalar(Scalar::Bool(b)),
            serde_json::Value::Number(n) => Value::Scalar(Scalar::Number(n)),
            serde_json::Value::String(s) => Value::Scalar(Scalar::String(s)),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Mapping(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Scalar(Scalar::Absent) => serde_json::Value::Null,
            Value::Scalar(Scalar::Bool(b)) => serde_json::Value::Bool(b),
            Value::Scalar(Scalar::Number(n)) => serde_json::Value::Number(n),
            Value::Scalar(Scalar::String(s)) => serde_json::Value::String(s),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Mapping(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Scalar(Scalar::Number(n.into()))
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Mapping(m)
    }
}

/// Convert a JSON object into a root mapping.
///
/// Anything that is not an object yields an empty mapping.
pub fn mapping_from_json(value: serde_json::Value) -> Mapping {
    match Value::from(value) {
        Value::Mapping(m) => m,
        _ => Mapping::new(),
    }
}
