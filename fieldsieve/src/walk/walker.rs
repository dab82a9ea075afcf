//! The serialization walker.
//!
//! [`FilterWalker`] carries the policy and the current [`FieldPath`] through a
//! render. Derived `Filterable` impls use [`ObjectWalker`] for named fields and
//! [`TupleWalker`] for positional ones; container impls use
//! [`FilterWalker::sequence`] and [`FilterWalker::map`].

use serde::Serialize;
use serde_json::{Map, Value};

use super::{
    error::{SerializationError, SerializationErrorKind},
    path::{FieldPath, PathSegment},
    traits::Filterable,
};
use crate::{
    metadata::TypeInfo,
    policy::{Decision, FilterPolicy},
};

// =============================================================================
// MapKey
// =============================================================================

/// Map keys that render as JSON object keys.
pub trait MapKey {
    fn to_key(&self) -> String;
}

impl MapKey for str {
    fn to_key(&self) -> String {
        self.to_owned()
    }
}

impl MapKey for String {
    fn to_key(&self) -> String {
        self.clone()
    }
}

impl MapKey for std::borrow::Cow<'_, str> {
    fn to_key(&self) -> String {
        self.as_ref().to_owned()
    }
}

impl MapKey for char {
    fn to_key(&self) -> String {
        self.to_string()
    }
}

impl<K: MapKey + ?Sized> MapKey for &K {
    fn to_key(&self) -> String {
        (**self).to_key()
    }
}

macro_rules! impl_integer_map_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MapKey for $ty {
                fn to_key(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_integer_map_key!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

// =============================================================================
// FilterWalker
// =============================================================================

/// Per-render state: the policy and the path of the value being visited.
///
/// The same policy applies at every nesting level.
pub struct FilterWalker<'p> {
    policy: &'p FilterPolicy,
    path: FieldPath,
}

impl<'p> FilterWalker<'p> {
    pub fn new(policy: &'p FilterPolicy) -> Self {
        Self {
            policy,
            path: FieldPath::root(),
        }
    }

    pub fn policy(&self) -> &'p FilterPolicy {
        self.policy
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Builds an error located at the current path.
    pub fn error(&self, kind: SerializationErrorKind) -> SerializationError {
        SerializationError::new(self.path.clone(), kind)
    }

    /// Renders a root value. An absent root renders as `null`.
    pub fn walk<T: Filterable + ?Sized>(&mut self, value: &T) -> Result<Value, SerializationError> {
        Ok(value.filter_with(self)?.unwrap_or(Value::Null))
    }

    fn descend<T: Filterable + ?Sized>(
        &mut self,
        segment: PathSegment,
        value: &T,
    ) -> Result<Option<Value>, SerializationError> {
        self.path.push(segment);
        let result = value.filter_with(self);
        self.path.pop();
        result
    }

    fn descend_serde<T: Serialize + ?Sized>(
        &mut self,
        segment: PathSegment,
        value: &T,
    ) -> Result<Option<Value>, SerializationError> {
        self.path.push(segment);
        let result = serde_json::to_value(value)
            .map_err(|err| self.error(SerializationErrorKind::Serde(err)));
        self.path.pop();
        Ok(prune_nulls(result?))
    }

    /// Starts rendering the named fields of a struct described by `info`.
    pub fn object<'w>(&'w mut self, info: &'static TypeInfo) -> ObjectWalker<'w, 'p> {
        ObjectWalker {
            walker: self,
            info,
            variant: None,
            map: Map::new(),
        }
    }

    /// Starts rendering the positional fields of a tuple struct.
    pub fn tuple<'w>(&'w mut self) -> TupleWalker<'w, 'p> {
        TupleWalker {
            walker: self,
            variant: None,
            items: Vec::new(),
        }
    }

    /// Renders a unit enum variant as its name.
    #[allow(clippy::unused_self)]
    pub fn unit_variant(&mut self, variant: &'static str) -> Result<Option<Value>, SerializationError> {
        Ok(Some(Value::String(variant.to_owned())))
    }

    /// Renders a single-field tuple variant as `{"Variant": value}`.
    pub fn newtype_variant<T: Filterable + ?Sized>(
        &mut self,
        variant: &'static str,
        value: &T,
    ) -> Result<Option<Value>, SerializationError> {
        let inner = self
            .descend(PathSegment::Field(variant), value)?
            .unwrap_or(Value::Null);
        Ok(Some(tagged(variant, inner)))
    }

    /// Starts rendering a multi-field tuple variant as `{"Variant": [..]}`.
    pub fn tuple_variant<'w>(&'w mut self, variant: &'static str) -> TupleWalker<'w, 'p> {
        TupleWalker {
            walker: self,
            variant: Some(variant),
            items: Vec::new(),
        }
    }

    /// Starts rendering a struct variant as `{"Variant": {..}}`.
    ///
    /// Variant fields carry no declarations, so they are treated as untagged.
    pub fn struct_variant<'w>(
        &'w mut self,
        info: &'static TypeInfo,
        variant: &'static str,
    ) -> ObjectWalker<'w, 'p> {
        ObjectWalker {
            walker: self,
            info,
            variant: Some(variant),
            map: Map::new(),
        }
    }

    /// Renders a sequence. Absent elements become `null` to keep positions.
    pub fn sequence<'a, T, I>(&mut self, items: I) -> Result<Option<Value>, SerializationError>
    where
        T: Filterable + ?Sized + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut rendered = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            let value = self
                .descend(PathSegment::Index(index), item)?
                .unwrap_or(Value::Null);
            rendered.push(value);
        }
        Ok(Some(Value::Array(rendered)))
    }

    /// Renders a string-keyed map with keys in sorted order. Absent values are
    /// left out like absent fields.
    pub fn map<'a, K, V, I>(&mut self, entries: I) -> Result<Option<Value>, SerializationError>
    where
        K: MapKey + ?Sized + 'a,
        V: Filterable + ?Sized + 'a,
        I: IntoIterator<Item = (&'a K, &'a V)>,
    {
        let mut keyed: Vec<(String, &V)> = entries
            .into_iter()
            .map(|(key, value)| (key.to_key(), value))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));

        let mut map = Map::new();
        for (key, value) in keyed {
            if let Some(rendered) = self.descend(PathSegment::Key(key.clone()), value)? {
                map.insert(key, rendered);
            }
        }
        Ok(Some(Value::Object(map)))
    }
}

/// Drops `null` object members at every depth.
///
/// A `null` root is absent. `null` array elements stay in place so positions
/// are kept, but objects inside arrays are pruned too.
pub(crate) fn prune_nulls(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(map) => Some(Value::Object(
            map.into_iter()
                .filter_map(|(key, value)| prune_nulls(value).map(|value| (key, value)))
                .collect(),
        )),
        Value::Array(items) => Some(Value::Array(
            items
                .into_iter()
                .map(|item| prune_nulls(item).unwrap_or(Value::Null))
                .collect(),
        )),
        other => Some(other),
    }
}

fn tagged(variant: &'static str, inner: Value) -> Value {
    let mut map = Map::new();
    map.insert(variant.to_owned(), inner);
    Value::Object(map)
}

// =============================================================================
// ObjectWalker
// =============================================================================

/// Collects the retained named fields of one object.
///
/// Fields are expected in alphabetical order; the resulting map is keyed the
/// same way regardless of insertion order.
pub struct ObjectWalker<'w, 'p> {
    walker: &'w mut FilterWalker<'p>,
    info: &'static TypeInfo,
    variant: Option<&'static str>,
    map: Map<String, Value>,
}

impl ObjectWalker<'_, '_> {
    fn admits(&self, name: &'static str) -> bool {
        let metadata = self.info.metadata(name);
        match self.walker.policy.decide(metadata) {
            Decision::IncludeField => true,
            Decision::OmitField => {
                tracing::trace!(
                    type_name = self.info.name(),
                    field = name,
                    path = %self.walker.path,
                    "field omitted by policy"
                );
                false
            }
        }
    }

    fn enter_variant(&mut self) {
        if let Some(variant) = self.variant {
            self.walker.path.push(PathSegment::Field(variant));
        }
    }

    fn leave_variant(&mut self) {
        if self.variant.is_some() {
            self.walker.path.pop();
        }
    }

    /// Renders `value` as field `name` if the policy admits it and the value
    /// is present.
    pub fn field<T: Filterable + ?Sized>(
        &mut self,
        name: &'static str,
        value: &T,
    ) -> Result<(), SerializationError> {
        if !self.admits(name) {
            return Ok(());
        }
        self.enter_variant();
        let rendered = self.walker.descend(PathSegment::Field(name), value);
        self.leave_variant();
        if let Some(rendered) = rendered? {
            self.map.insert(name.to_owned(), rendered);
        }
        Ok(())
    }

    /// Like [`field`](Self::field), but renders the value through `serde`.
    ///
    /// Used for fields marked `#[sieve(serde)]`. The policy applies to the
    /// field itself; nothing inside the value is filtered.
    pub fn serde_field<T: Serialize + ?Sized>(
        &mut self,
        name: &'static str,
        value: &T,
    ) -> Result<(), SerializationError> {
        if !self.admits(name) {
            return Ok(());
        }
        self.enter_variant();
        let rendered = self.walker.descend_serde(PathSegment::Field(name), value);
        self.leave_variant();
        if let Some(rendered) = rendered? {
            self.map.insert(name.to_owned(), rendered);
        }
        Ok(())
    }

    pub fn finish(self) -> Value {
        let object = Value::Object(self.map);
        match self.variant {
            Some(variant) => tagged(variant, object),
            None => object,
        }
    }
}

// =============================================================================
// TupleWalker
// =============================================================================

/// Collects positional fields. Positional fields have no names, so no policy
/// decision applies to them.
pub struct TupleWalker<'w, 'p> {
    walker: &'w mut FilterWalker<'p>,
    variant: Option<&'static str>,
    items: Vec<Value>,
}

impl TupleWalker<'_, '_> {
    pub fn element<T: Filterable + ?Sized>(&mut self, value: &T) -> Result<(), SerializationError> {
        let index = self.items.len();
        if let Some(variant) = self.variant {
            self.walker.path.push(PathSegment::Field(variant));
        }
        let rendered = self.walker.descend(PathSegment::Index(index), value);
        if self.variant.is_some() {
            self.walker.path.pop();
        }
        self.items.push(rendered?.unwrap_or(Value::Null));
        Ok(())
    }

    pub fn finish(self) -> Value {
        let array = Value::Array(self.items);
        match self.variant {
            Some(variant) => tagged(variant, array),
            None => array,
        }
    }
}
