//! Values document rendering.
//!
//! # Data Flow
//! ```text
//! Mapping (form state)
//!     → prune.rs (drop unset values and UI-only keys)
//!     → emit.rs (walk the tree, two spaces per level)
//!         → strategy.rs (registered keys: secrets, storage, postgres, …)
//!         → format.rs (scalar quoting)
//!     → lines joined with '\n'
//! ```
//!
//! # Design Decisions
//! - Pure and total: every tree the updater can build renders
//! - Output only; nothing here parses YAML

pub mod emit;
pub mod format;
pub mod prune;
pub mod strategy;
pub mod tags;

use std::sync::LazyLock;

use crate::values::Mapping;

pub use emit::Emitter;
pub use prune::prune;
pub use strategy::{EmitStrategy, Registry};

static KESTRA_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::kestra);

/// Renders form state with a fixed set of key strategies.
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    registry: Registry,
}

impl Serializer {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn serialize(&self, values: &Mapping) -> String {
        render(&self.registry, values)
    }
}

/// Render `values` with the Kestra chart strategies.
pub fn serialize(values: &Mapping) -> String {
    render(&KESTRA_REGISTRY, values)
}

fn render(registry: &Registry, values: &Mapping) -> String {
    let pruned = prune(values);
    let mut emitter = Emitter::new(registry);
    emitter.mapping(&pruned, 0);
    emitter.finish()
}
