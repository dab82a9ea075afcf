//! Schema generation.
//!
//! A schema is built in two passes. The structural pass asks the root type to
//! describe itself through a [`SchemaWalker`], producing a tree of
//! [`SchemaNode`]s that covers every declared field, independent of any
//! filter policy. The annotation pass then attaches type-level and field-level
//! titles from the metadata registry.
//!
//! ```
//! use fieldsieve::{Sieve, schema};
//!
//! #[derive(Sieve)]
//! #[sieve(title = "User Profile")]
//! struct Profile {
//!     #[sieve(title = "Full Name")]
//!     name: String,
//!     age: u32,
//! }
//!
//! let root = schema::build_schema::<Profile>(schema::DEFAULT_MAX_DEPTH).unwrap();
//! assert_eq!(root.title(), Some("User Profile"));
//! assert_eq!(root.property("name").unwrap().title(), Some("Full Name"));
//! ```

mod annotate;
mod error;
mod impls;
mod node;
mod walker;

pub use error::SchemaError;
pub use node::{PrimitiveType, SchemaKind, SchemaNode};
pub use walker::{
    DEFAULT_MAX_DEPTH, ObjectBuilder, Schematic, SchemaWalker, TupleBuilder, UnionBuilder,
};

/// Runs both passes for `T` and returns the annotated root node.
///
/// # Errors
///
/// Returns [`SchemaError::DepthExceeded`] when the type graph nests deeper
/// than `max_depth`, and [`SchemaError::NotSimple`] when a title targets a
/// node that cannot carry one.
pub fn build_schema<T: Schematic + ?Sized>(max_depth: usize) -> Result<SchemaNode, SchemaError> {
    let mut root = SchemaWalker::new(max_depth).describe::<T>()?;
    annotate::annotate(&mut root)?;
    Ok(root)
}
