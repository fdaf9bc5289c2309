//! Line emission for a pruned tree.
//!
//! Every mapping entry becomes one or more lines indented by two spaces per
//! level. Keys registered in the [`Registry`] get their strategy first; when
//! the strategy does not recognise the value shape the generic rules apply:
//!
//! - mapping: `key:` then its entries one level deeper
//! - sequence: `key: []` when empty, else `key:` and one `- ` item per element
//! - scalar: `key: value`

use crate::values::{Mapping, Value};
use crate::yaml::format::format_scalar;
use crate::yaml::strategy::Registry;

const INDENT: &str = "  ";

/// Accumulates output lines.
pub struct Emitter<'r> {
    registry: &'r Registry,
    lines: Vec<String>,
}

impl<'r> Emitter<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            lines: Vec::new(),
        }
    }

    /// Push one physical line at `indent`.
    pub fn line(&mut self, indent: usize, text: impl AsRef<str>) {
        self.lines.push(format!("{}{}", INDENT.repeat(indent), text.as_ref()));
    }

    /// Push every non-blank line of `text`, trimmed, at `indent`.
    pub fn verbatim(&mut self, indent: usize, text: &str) {
        for raw in text.lines() {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                self.line(indent, trimmed);
            }
        }
    }

    /// Emit all entries of `map` in order.
    pub fn mapping(&mut self, map: &Mapping, indent: usize) {
        for (key, value) in map {
            self.entry(key, value, indent);
        }
    }

    /// Emit one entry, consulting the registry first.
    pub fn entry(&mut self, key: &str, value: &Value, indent: usize) {
        let registry = self.registry;
        if let Some(strategy) = registry.get(key) {
            if strategy.emit(self, key, value, indent) {
                return;
            }
        }
        self.plain_entry(key, value, indent);
    }

    /// Emit one entry with the generic rules only.
    pub fn plain_entry(&mut self, key: &str, value: &Value, indent: usize) {
        match value {
            Value::Mapping(map) => {
                self.line(indent, format!("{key}:"));
                self.mapping(map, indent + 1);
            }
            Value::Sequence(items) if items.is_empty() => {
                self.line(indent, format!("{key}: []"));
            }
            Value::Sequence(items) => {
                self.line(indent, format!("{key}:"));
                self.items(items, indent + 1);
            }
            Value::Scalar(scalar) => {
                self.line(indent, format!("{key}: {}", format_scalar(scalar)));
            }
        }
    }

    fn items(&mut self, items: &[Value], indent: usize) {
        for item in items {
            match item {
                Value::Mapping(fields) => {
                    self.line(indent, "- ");
                    for (field, value) in fields {
                        self.plain_entry(field, value, indent + 1);
                    }
                }
                Value::Sequence(nested) => {
                    self.line(indent, "- ");
                    self.items(nested, indent + 1);
                }
                Value::Scalar(scalar) => {
                    self.line(indent, format!("- {}", format_scalar(scalar)));
                }
            }
        }
    }

    /// Join the lines with `\n`.
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}
