//! The [`Filterable`] capability.

use serde_json::Value;

use super::{error::SerializationError, walker::FilterWalker};

/// A value the serialization walker can render under a filter policy.
///
/// Implemented by `#[derive(Sieve)]` and, in this crate, for scalars,
/// strings, `Option`, smart pointers, sequences, sets and string-keyed maps.
///
/// Returning `Ok(None)` means the value is absent: a field holding it is left
/// out of the enclosing object.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Filterable`",
    label = "this type cannot be walked by the serialization walker",
    note = "use `#[derive(Sieve)]` on the type definition",
    note = "or mark the field `#[sieve(serde)]` to serialize it through serde"
)]
pub trait Filterable {
    /// Renders `self`, consulting `walker`'s policy for every nested field.
    fn filter_with(&self, walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError>;
}
