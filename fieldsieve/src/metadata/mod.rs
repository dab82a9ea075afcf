//! Field metadata model.
//!
//! - **`field`**: [`FieldMetadata`], the title/tags/client-cache declaration of one field.
//! - **`info`**: [`TypeInfo`], the per-type registry entry, its [`TypeInfoCell`]
//!   storage, and the [`Described`] capability.

mod field;
mod info;

pub use field::FieldMetadata;
pub use info::{Described, FieldInfo, TypeInfo, TypeInfoCell, lookup};
