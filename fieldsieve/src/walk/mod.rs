//! Serialization walker.
//!
//! - **`traits`**: the [`Filterable`] capability
//! - **`walker`**: [`FilterWalker`] and the object/tuple builders used by derived impls
//! - **`path`**: [`FieldPath`] locations reported in errors
//! - **`error`**: [`SerializationError`]
//! - **`impls`**: implementations for std types
//! - **`extras`**: implementations for `chrono` and `uuid` types (feature gated)

mod error;
mod extras;
mod impls;
mod path;
mod traits;
mod walker;

pub use error::{SerializationError, SerializationErrorKind};
pub use path::{FieldPath, PathSegment};
pub use traits::Filterable;
pub use walker::{FilterWalker, MapKey, ObjectWalker, TupleWalker};
pub(crate) use walker::prune_nulls;
