//! Form state model.
//!
//! # Data Flow
//! ```text
//! form field edit (path, value)
//!     → path.rs (parse "a.b.c", copy tree with one field replaced)
//!     → Mapping (new root, old one dropped)
//!     → yaml::serialize
//! ```

pub mod defaults;
pub mod path;
pub mod value;

pub use defaults::{default_values, Section, UnknownSection};
pub use path::{get_path, remove_path, set_path, FieldPath, PathError};
pub use value::{mapping_from_json, Mapping, Scalar, Value};
