//! Dotted field paths and the path-addressed updater.
//!
//! # Responsibilities
//! - Parse `"a.b.c"` once into validated segments
//! - Produce a new tree with one field replaced
//! - Read and remove fields by path
//!
//! # Design Decisions
//! - Auto-create: a missing intermediate, or one that is not a mapping, is
//!   replaced by an empty mapping so the write always lands
//! - No type checks on the written value; the tree is untyped here
//! - Updates return a fresh tree; the input is never mutated

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::values::value::{Mapping, Value};

/// Errors produced while parsing a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("field path is empty")]
    Empty,
    #[error("field path {path:?} has an empty segment at position {index}")]
    EmptySegment { path: String, index: usize },
}

/// A validated, non-empty sequence of mapping keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dot-separated path, rejecting empty segments.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        let mut segments = Vec::new();
        for (index, segment) in path.split('.').enumerate() {
            if segment.is_empty() {
                return Err(PathError::EmptySegment {
                    path: path.to_string(),
                    index,
                });
            }
            segments.push(segment.to_string());
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Split into parent segments and the final key.
    fn split_last(&self) -> (&[String], &str) {
        // parse() guarantees at least one segment
        match self.segments.split_last() {
            Some((last, parents)) => (parents, last.as_str()),
            None => (&[], ""),
        }
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Return a copy of `root` with `value` stored at `path`.
pub fn set_path(root: &Mapping, path: &FieldPath, value: Value) -> Mapping {
    let mut next = root.clone();
    set_in_place(&mut next, path, value);
    next
}

/// Store `value` at `path`, creating intermediate mappings as needed.
pub fn set_in_place(root: &mut Mapping, path: &FieldPath, value: Value) {
    let (parents, last) = path.split_last();
    let mut current = root;
    for segment in parents {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Mapping(Mapping::new()));
        if !matches!(slot, Value::Mapping(_)) {
            tracing::debug!(segment = %segment, "Replacing non-mapping node on update path");
            *slot = Value::Mapping(Mapping::new());
        }
        let Value::Mapping(next) = slot else {
            return;
        };
        current = next;
    }
    current.insert(last.to_string(), value);
}

/// Read the value at `path`, if every segment exists.
pub fn get_path<'a>(root: &'a Mapping, path: &FieldPath) -> Option<&'a Value> {
    let (parents, last) = path.split_last();
    let mut current = root;
    for segment in parents {
        current = current.get(segment)?.as_mapping()?;
    }
    current.get(last)
}

/// Return a copy of `root` without the field at `path`.
///
/// Sibling order is preserved. A path that does not resolve leaves the tree
/// unchanged.
pub fn remove_path(root: &Mapping, path: &FieldPath) -> Mapping {
    let mut next = root.clone();
    remove_in_place(&mut next, path);
    next
}

fn remove_in_place(root: &mut Mapping, path: &FieldPath) {
    let (parents, last) = path.split_last();
    let mut current = root;
    for segment in parents {
        let Some(Value::Mapping(next)) = current.get_mut(segment) else {
            return;
        };
        current = next;
    }
    current.shift_remove(last);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::value::mapping_from_json;
    use serde_json::json;

    fn path(s: &str) -> FieldPath {
        FieldPath::parse(s).unwrap()
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert_eq!(FieldPath::parse(""), Err(PathError::Empty));
        assert!(matches!(
            FieldPath::parse("a..b"),
            Err(PathError::EmptySegment { index: 1, .. })
        ));
        assert!(FieldPath::parse(".a").is_err());
        assert!(FieldPath::parse("a.").is_err());
        assert_eq!(path("a.b-c.d").segments(), ["a", "b-c", "d"]);
    }

    #[test]
    fn test_set_creates_missing_intermediates() {
        let root = Mapping::new();
        let next = set_path(&root, &path("a.b.c"), Value::from(5_i64));
        assert_eq!(next, mapping_from_json(json!({"a": {"b": {"c": 5}}})));
        assert!(root.is_empty());
    }

    #[test]
    fn test_set_overwrites_scalar_intermediate() {
        let root = mapping_from_json(json!({"a": "text", "z": 1}));
        let next = set_path(&root, &path("a.b"), Value::from(true));
        assert_eq!(next, mapping_from_json(json!({"a": {"b": true}, "z": 1})));
    }

    #[test]
    fn test_set_keeps_sibling_order() {
        let root = mapping_from_json(json!({"image": {"repository": "nginx", "tag": "1"}}));
        let next = set_path(&root, &path("image.repository"), Value::from("redis"));
        let keys: Vec<_> = next["image"].as_mapping().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["repository", "tag"]);
        assert_eq!(
            get_path(&next, &path("image.repository")),
            Some(&Value::from("redis"))
        );
    }

    #[test]
    fn test_remove_path() {
        let root = mapping_from_json(json!({"configuration": {"micronaut": {"x": 1}, "kestra": {}}}));
        let next = remove_path(&root, &path("configuration.micronaut"));
        assert_eq!(next, mapping_from_json(json!({"configuration": {"kestra": {}}})));
        assert_eq!(remove_path(&root, &path("missing.key")), root);
    }
}
