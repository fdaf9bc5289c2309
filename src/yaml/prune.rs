//! Removal of unset values before emission.
//!
//! # Rules
//! - Absent and `""` values are dropped at every mapping level
//! - Mappings left empty are dropped
//! - Sequences lose their unset scalar elements; the remaining elements are
//!   kept untouched (no pruning inside them)
//! - A sequence emptied by element removal is dropped; one that was empty to
//!   begin with is kept and renders as `[]`
//! - UI-only keys are dropped whatever their value

use crate::values::{Mapping, Value};

/// Form state that never belongs in the chart values.
pub const UI_ONLY_KEYS: &[&str] = &["oidcEnabled"];

/// Return a pruned copy of `values`.
pub fn prune(values: &Mapping) -> Mapping {
    values
        .iter()
        .filter(|(key, _)| !UI_ONLY_KEYS.contains(&key.as_str()))
        .filter_map(|(key, value)| prune_value(value).map(|v| (key.clone(), v)))
        .collect()
}

fn prune_value(value: &Value) -> Option<Value> {
    match value {
        Value::Scalar(scalar) => (!scalar.is_unset()).then(|| value.clone()),
        Value::Mapping(map) => {
            let pruned = prune(map);
            (!pruned.is_empty()).then_some(Value::Mapping(pruned))
        }
        Value::Sequence(items) if items.is_empty() => Some(Value::Sequence(Vec::new())),
        Value::Sequence(items) => {
            let kept: Vec<Value> = items.iter().filter(|i| !i.is_unset()).cloned().collect();
            (!kept.is_empty()).then_some(Value::Sequence(kept))
        }
    }
}
