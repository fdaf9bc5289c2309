//! Shared form state.
//!
//! # Data Flow
//! ```text
//! update(path, value) / reset(section) / replace(values)
//!     → read-copy-update on ArcSwap<Mapping> (readers keep their snapshot)
//!     → persist.rs (debounced JSON write, optional)
//!     → render() → yaml::serialize on the latest snapshot
//! ```

pub mod persist;

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::observability::metrics;
use crate::values::{set_path, FieldPath, Mapping, PathError, Section, Value};
use crate::yaml;

pub use persist::{load_state, spawn_writer, write_state, Persister};

/// Form state shared between handlers.
#[derive(Clone)]
pub struct ValuesStore {
    current: Arc<ArcSwap<Mapping>>,
    persister: Option<Persister>,
}

impl ValuesStore {
    /// In-memory store.
    pub fn new(initial: Mapping) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(initial)),
            persister: None,
        }
    }

    /// Store that schedules a write after every change.
    pub fn with_persister(initial: Arc<Mapping>, persister: Persister) -> Self {
        Self {
            current: Arc::new(ArcSwap::new(initial)),
            persister: Some(persister),
        }
    }

    /// Current state.
    pub fn snapshot(&self) -> Arc<Mapping> {
        self.current.load_full()
    }

    /// Set `value` at the dotted `path`.
    pub fn update(&self, path: &str, value: Value) -> Result<Arc<Mapping>, PathError> {
        let path = FieldPath::parse(path)?;
        let next = self.apply(|current| set_path(current, &path, value.clone()));
        metrics::record_update("set");
        tracing::debug!(path = %path, "Field updated");
        Ok(next)
    }

    /// Restore one section of the form to its defaults.
    pub fn reset(&self, section: Section) -> Arc<Mapping> {
        let next = self.apply(|current| section.reset(current));
        metrics::record_update("reset");
        tracing::info!(section = %section, "Section reset");
        next
    }

    /// Replace the whole state.
    pub fn replace(&self, values: Mapping) -> Arc<Mapping> {
        let values = Arc::new(values);
        self.current.store(values.clone());
        self.changed(&values);
        metrics::record_update("replace");
        values
    }

    /// Render the current state as a values document.
    pub fn render(&self) -> String {
        yaml::serialize(&self.current.load())
    }

    fn apply(&self, f: impl Fn(&Mapping) -> Mapping) -> Arc<Mapping> {
        let mut next = Arc::new(Mapping::new());
        self.current.rcu(|current| {
            next = Arc::new(f(current));
            next.clone()
        });
        self.changed(&next);
        next
    }

    fn changed(&self, values: &Arc<Mapping>) {
        if let Some(persister) = &self.persister {
            persister.schedule(values.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::{default_values, get_path, mapping_from_json};
    use serde_json::json;

    #[test]
    fn test_update_and_render() {
        let store = ValuesStore::new(Mapping::new());
        store.update("a.b.c", Value::from(5_i64)).unwrap();
        assert_eq!(*store.snapshot(), mapping_from_json(json!({"a": {"b": {"c": 5}}})));
        assert_eq!(store.render(), "a:\n  b:\n    c: 5");
    }

    #[test]
    fn test_update_rejects_bad_path() {
        let store = ValuesStore::new(Mapping::new());
        assert!(store.update("a..b", Value::from(1_i64)).is_err());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_old_snapshots_are_untouched() {
        let store = ValuesStore::new(default_values());
        let before = store.snapshot();
        store.update("image.tag", "0.21.0".into()).unwrap();

        let tag = FieldPath::parse("image.tag").unwrap();
        assert_eq!(get_path(&before, &tag), Some(&Value::from("latest")));
        assert_eq!(get_path(&store.snapshot(), &tag), Some(&Value::from("0.21.0")));
    }

    #[test]
    fn test_reset_all() {
        let store = ValuesStore::new(Mapping::new());
        store.reset(Section::All);
        assert_eq!(*store.snapshot(), default_values());
    }
}
