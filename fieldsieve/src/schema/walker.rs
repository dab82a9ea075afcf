//! Structural pass of schema generation.
//!
//! [`Schematic`] is the "describe yourself" capability: each type builds its
//! own node through a [`SchemaWalker`], asking the walker to describe the
//! types of its fields in turn. The walker tracks the named types currently
//! being expanded, so a type that contains itself produces a reference node
//! instead of recursing forever.

use super::{
    error::SchemaError,
    node::{SchemaKind, SchemaNode},
};
use crate::metadata::Described;

/// Default nesting limit for [`SchemaWalker`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// A type that can describe its own structure.
///
/// Implemented by `#[derive(Sieve)]` and, in this crate, for every type that
/// implements [`Filterable`](crate::Filterable). The structure describes all
/// declared fields regardless of any filter policy.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Schematic`",
    label = "this type cannot describe its schema",
    note = "use `#[derive(Sieve)]` on the type definition"
)]
pub trait Schematic {
    fn structure(walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError>;
}

/// Builds the URN identifying a type's schema node.
pub(crate) fn type_urn(type_name: &str) -> String {
    format!("urn:jsonschema:{}", type_name.replace("::", ":"))
}

// =============================================================================
// SchemaWalker
// =============================================================================

/// State of one structural pass.
pub struct SchemaWalker {
    open: Vec<&'static str>,
    depth: usize,
    max_depth: usize,
}

impl Default for SchemaWalker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl SchemaWalker {
    pub fn new(max_depth: usize) -> Self {
        Self {
            open: Vec::new(),
            depth: 0,
            max_depth,
        }
    }

    /// Describes `T`, enforcing the depth limit.
    pub fn describe<T: Schematic + ?Sized>(&mut self) -> Result<SchemaNode, SchemaError> {
        if self.depth >= self.max_depth {
            return Err(SchemaError::DepthExceeded {
                limit: self.max_depth,
                type_name: std::any::type_name::<T>(),
            });
        }
        self.depth += 1;
        let result = T::structure(self);
        self.depth -= 1;
        result
    }

    /// Expands a named type, or returns a reference if `T` is already being
    /// expanded further up the tree.
    fn named<T, F>(&mut self, build: F) -> Result<SchemaNode, SchemaError>
    where
        T: Described + ?Sized,
        F: FnOnce(&mut Self) -> Result<SchemaKind, SchemaError>,
    {
        let type_name = std::any::type_name::<T>();
        let id = type_urn(type_name);
        if self.open.contains(&type_name) {
            tracing::debug!(type_name, "recursive type, emitting schema reference");
            return Ok(SchemaNode::reference(id));
        }

        self.open.push(type_name);
        let kind = build(self);
        self.open.pop();

        Ok(SchemaNode::new(kind?).with_identity(id, T::type_info()))
    }

    /// Describes a single-field tuple struct `T` as the type `U` it wraps.
    ///
    /// `T` joins cycle detection like any named type. When `U` contains `T`
    /// again, the inner occurrence becomes a reference: it points at the
    /// node's own id if `U` is itself named, otherwise the node takes `T`'s id.
    pub fn transparent<T, U>(&mut self) -> Result<SchemaNode, SchemaError>
    where
        T: Described + ?Sized,
        U: Schematic + ?Sized,
    {
        let type_name = std::any::type_name::<T>();
        let id = type_urn(type_name);
        if self.open.contains(&type_name) {
            tracing::debug!(type_name, "recursive newtype, emitting schema reference");
            return Ok(SchemaNode::reference(id));
        }

        self.open.push(type_name);
        let node = self.describe::<U>();
        self.open.pop();

        let mut node = node?;
        match node.id().map(str::to_owned) {
            Some(own) => {
                node.retarget(&id, &own);
            }
            None if node.refers_to(&id) => node.set_id(id),
            None => {}
        }
        Ok(node)
    }

    /// Describes a struct with named fields.
    pub fn object<T, F>(&mut self, build: F) -> Result<SchemaNode, SchemaError>
    where
        T: Described + ?Sized,
        F: FnOnce(&mut ObjectBuilder<'_>) -> Result<(), SchemaError>,
    {
        self.named::<T, _>(|walker| {
            let mut object = ObjectBuilder::new(walker);
            build(&mut object)?;
            Ok(object.into_kind())
        })
    }

    /// Describes a tuple struct with more than one field.
    pub fn tuple<T, F>(&mut self, build: F) -> Result<SchemaNode, SchemaError>
    where
        T: Described + ?Sized,
        F: FnOnce(&mut TupleBuilder<'_>) -> Result<(), SchemaError>,
    {
        self.named::<T, _>(|walker| {
            let mut tuple = TupleBuilder::new(walker);
            build(&mut tuple)?;
            Ok(SchemaKind::Tuple(tuple.items))
        })
    }

    /// Describes an enum whose variants are all unit variants.
    pub fn enumeration<T: Described + ?Sized>(
        &mut self,
        variants: &[&'static str],
    ) -> Result<SchemaNode, SchemaError> {
        Ok(SchemaNode::new(SchemaKind::Enum(variants.to_vec())).with_source(T::type_info()))
    }

    /// Describes an enum with at least one data-carrying variant.
    pub fn union<T, F>(&mut self, build: F) -> Result<SchemaNode, SchemaError>
    where
        T: Described + ?Sized,
        F: FnOnce(&mut UnionBuilder<'_>) -> Result<(), SchemaError>,
    {
        self.named::<T, _>(|walker| {
            let mut union = UnionBuilder::new(walker);
            build(&mut union)?;
            Ok(union.into_kind())
        })
    }
}

// =============================================================================
// Builders
// =============================================================================

/// Collects the properties of an object node in declaration order.
pub struct ObjectBuilder<'w> {
    walker: &'w mut SchemaWalker,
    properties: Vec<(&'static str, SchemaNode)>,
}

impl<'w> ObjectBuilder<'w> {
    fn new(walker: &'w mut SchemaWalker) -> Self {
        Self {
            walker,
            properties: Vec::new(),
        }
    }

    pub fn property<T: Schematic + ?Sized>(&mut self, name: &'static str) -> Result<(), SchemaError> {
        let node = self.walker.describe::<T>()?;
        self.properties.push((name, node));
        Ok(())
    }

    /// Adds a property rendered through serde, whose shape is unknown.
    pub fn any_property(&mut self, name: &'static str) {
        self.properties.push((name, SchemaNode::any()));
    }

    fn into_kind(self) -> SchemaKind {
        SchemaKind::Object {
            properties: self.properties,
            additional: None,
        }
    }
}

/// Collects the positional items of a tuple node.
pub struct TupleBuilder<'w> {
    walker: &'w mut SchemaWalker,
    items: Vec<SchemaNode>,
}

impl<'w> TupleBuilder<'w> {
    fn new(walker: &'w mut SchemaWalker) -> Self {
        Self {
            walker,
            items: Vec::new(),
        }
    }

    pub fn element<T: Schematic + ?Sized>(&mut self) -> Result<(), SchemaError> {
        let node = self.walker.describe::<T>()?;
        self.items.push(node);
        Ok(())
    }
}

/// Collects the alternatives of a data-carrying enum.
///
/// Unit variants are grouped into a single leading enum node; every other
/// variant becomes an object with the variant name as its only property.
pub struct UnionBuilder<'w> {
    walker: &'w mut SchemaWalker,
    units: Vec<&'static str>,
    variants: Vec<SchemaNode>,
}

impl<'w> UnionBuilder<'w> {
    fn new(walker: &'w mut SchemaWalker) -> Self {
        Self {
            walker,
            units: Vec::new(),
            variants: Vec::new(),
        }
    }

    fn push_tagged(&mut self, variant: &'static str, payload: SchemaNode) {
        self.variants.push(SchemaNode::new(SchemaKind::Object {
            properties: vec![(variant, payload)],
            additional: None,
        }));
    }

    pub fn unit(&mut self, variant: &'static str) {
        self.units.push(variant);
    }

    pub fn newtype<T: Schematic + ?Sized>(&mut self, variant: &'static str) -> Result<(), SchemaError> {
        let payload = self.walker.describe::<T>()?;
        self.push_tagged(variant, payload);
        Ok(())
    }

    pub fn tuple<F>(&mut self, variant: &'static str, build: F) -> Result<(), SchemaError>
    where
        F: FnOnce(&mut TupleBuilder<'_>) -> Result<(), SchemaError>,
    {
        let mut tuple = TupleBuilder::new(&mut *self.walker);
        build(&mut tuple)?;
        let payload = SchemaNode::new(SchemaKind::Tuple(tuple.items));
        self.push_tagged(variant, payload);
        Ok(())
    }

    pub fn object<F>(&mut self, variant: &'static str, build: F) -> Result<(), SchemaError>
    where
        F: FnOnce(&mut ObjectBuilder<'_>) -> Result<(), SchemaError>,
    {
        let mut object = ObjectBuilder::new(&mut *self.walker);
        build(&mut object)?;
        let payload = SchemaNode::new(object.into_kind());
        self.push_tagged(variant, payload);
        Ok(())
    }

    fn into_kind(self) -> SchemaKind {
        let mut alternatives = Vec::with_capacity(self.variants.len() + 1);
        if !self.units.is_empty() {
            alternatives.push(SchemaNode::new(SchemaKind::Enum(self.units)));
        }
        alternatives.extend(self.variants);
        SchemaKind::Union(alternatives)
    }
}
