//! Static per-type metadata registry.
//!
//! Every type taking part in filtering or schema generation exposes a
//! [`TypeInfo`] through [`Described::type_info`]. The info is built lazily the
//! first time it is requested and stored in a [`TypeInfoCell`], so lookups are
//! cheap and return the same value for the rest of the process.

use std::sync::OnceLock;

use super::field::{FieldMetadata, UNTAGGED};

// =============================================================================
// FieldInfo / TypeInfo
// =============================================================================

/// A declared field together with its metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldInfo {
    name: &'static str,
    metadata: FieldMetadata,
}

impl FieldInfo {
    #[must_use]
    pub fn new(name: &'static str, metadata: FieldMetadata) -> Self {
        Self { name, metadata }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn metadata(&self) -> &FieldMetadata {
        &self.metadata
    }
}

/// Metadata attached to a type definition: its title and declared fields.
///
/// Fields are kept in declaration order. Skipped fields never appear here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeInfo {
    name: &'static str,
    title: Option<&'static str>,
    fields: Vec<FieldInfo>,
}

impl TypeInfo {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            title: None,
            fields: Vec::new(),
        }
    }

    /// Sets the type-level title used for the schema root.
    #[must_use]
    pub fn with_title(mut self, title: &'static str) -> Self {
        self.title = Some(title);
        self
    }

    /// Appends a field declaration.
    #[must_use]
    pub fn with_field(mut self, name: &'static str, metadata: FieldMetadata) -> Self {
        self.fields.push(FieldInfo::new(name, metadata));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn title(&self) -> Option<&'static str> {
        self.title
    }

    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns the metadata for `name`, or the untagged default when the
    /// field has no declaration.
    pub fn metadata(&self, name: &str) -> &FieldMetadata {
        self.field(name).map_or(&UNTAGGED, FieldInfo::metadata)
    }
}

// =============================================================================
// TypeInfoCell
// =============================================================================

/// Lazily initialized storage for a type's [`TypeInfo`].
///
/// Declared as a `static` inside [`Described::type_info`]. Generic types share
/// one cell across instantiations; declarations never depend on type
/// parameters.
///
/// ```
/// use fieldsieve::{Described, FieldMetadata, TypeInfo, TypeInfoCell};
///
/// struct Account {
///     _email: String,
/// }
///
/// impl Described for Account {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: TypeInfoCell = TypeInfoCell::new();
///         CELL.get_or_init(|| {
///             TypeInfo::new("Account")
///                 .with_field("email", FieldMetadata::new().with_tag("pii"))
///         })
///     }
/// }
///
/// assert!(!Account::type_info().metadata("email").is_untagged());
/// ```
pub struct TypeInfoCell(OnceLock<TypeInfo>);

impl TypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    #[inline]
    pub fn get_or_init<F>(&self, init: F) -> &TypeInfo
    where
        F: FnOnce() -> TypeInfo,
    {
        self.0.get_or_init(init)
    }
}

impl Default for TypeInfoCell {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Described
// =============================================================================

/// A type that exposes its declared fields and their metadata.
///
/// Implemented by `#[derive(Sieve)]`. Hand-written impls should store the
/// info in a [`TypeInfoCell`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Described`",
    label = "this type has no field metadata",
    note = "use `#[derive(Sieve)]` on the type definition"
)]
pub trait Described {
    fn type_info() -> &'static TypeInfo;
}

/// Looks up the metadata declared for `field` on `T`.
///
/// Unknown fields yield the untagged default.
pub fn lookup<T: Described + ?Sized>(field: &str) -> &'static FieldMetadata {
    T::type_info().metadata(field)
}
