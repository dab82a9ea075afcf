//! Schema tree nodes and their JSON Schema encoding.

use serde::{Serialize, Serializer, ser::SerializeMap};

use super::error::SchemaError;
use crate::metadata::TypeInfo;

/// Primitive JSON types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Integer,
    Number,
    Boolean,
}

impl PrimitiveType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

/// The shape of one schema node.
#[derive(Clone, Debug, PartialEq)]
pub enum SchemaKind {
    /// Named properties in declaration order, plus the value schema of
    /// string-keyed maps.
    Object {
        properties: Vec<(&'static str, SchemaNode)>,
        additional: Option<Box<SchemaNode>>,
    },
    /// Homogeneous sequence.
    Array(Box<SchemaNode>),
    /// Fixed-length positional sequence (tuple structs and tuple variants).
    Tuple(Vec<SchemaNode>),
    Primitive {
        ty: PrimitiveType,
        format: Option<&'static str>,
    },
    /// String enumeration (unit enum variants).
    Enum(Vec<&'static str>),
    /// Points back at an enclosing node with the given id. Emitted when a
    /// type contains itself.
    Reference(String),
    /// One of several shapes. The only node kind with no title slot.
    Union(Vec<SchemaNode>),
    /// Unconstrained value.
    Any,
}

impl SchemaKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Object { .. } => "object",
            Self::Array(_) => "array",
            Self::Tuple(_) => "tuple",
            Self::Primitive { .. } => "primitive",
            Self::Enum(_) => "enum",
            Self::Reference(_) => "reference",
            Self::Union(_) => "union",
            Self::Any => "any",
        }
    }
}

/// One node of a type's schema.
///
/// `id` is set on nodes produced for named types that other nodes may
/// reference. `source` links the node to the [`TypeInfo`] it was built from
/// so the annotation pass can find titles; it is not encoded.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaNode {
    kind: SchemaKind,
    title: Option<String>,
    id: Option<String>,
    source: Option<&'static TypeInfo>,
}

impl SchemaNode {
    #[must_use]
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            title: None,
            id: None,
            source: None,
        }
    }

    #[must_use]
    pub fn primitive(ty: PrimitiveType) -> Self {
        Self::new(SchemaKind::Primitive { ty, format: None })
    }

    #[must_use]
    pub fn formatted(ty: PrimitiveType, format: &'static str) -> Self {
        Self::new(SchemaKind::Primitive {
            ty,
            format: Some(format),
        })
    }

    #[must_use]
    pub fn array(items: SchemaNode) -> Self {
        Self::new(SchemaKind::Array(Box::new(items)))
    }

    #[must_use]
    pub fn map(values: SchemaNode) -> Self {
        Self::new(SchemaKind::Object {
            properties: Vec::new(),
            additional: Some(Box::new(values)),
        })
    }

    #[must_use]
    pub fn any() -> Self {
        Self::new(SchemaKind::Any)
    }

    #[must_use]
    pub fn reference(id: impl Into<String>) -> Self {
        Self::new(SchemaKind::Reference(id.into()))
    }

    #[must_use]
    pub(crate) fn with_identity(mut self, id: String, source: &'static TypeInfo) -> Self {
        self.id = Some(id);
        self.source = Some(source);
        self
    }

    #[must_use]
    pub(crate) fn with_source(mut self, source: &'static TypeInfo) -> Self {
        self.source = Some(source);
        self
    }

    pub(crate) fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    /// Returns `true` if a reference to `id` occurs in this subtree.
    pub(crate) fn refers_to(&self, id: &str) -> bool {
        match &self.kind {
            SchemaKind::Reference(target) => target == id,
            SchemaKind::Object {
                properties,
                additional,
            } => {
                properties.iter().any(|(_, child)| child.refers_to(id))
                    || additional.as_ref().is_some_and(|child| child.refers_to(id))
            }
            SchemaKind::Array(items) => items.refers_to(id),
            SchemaKind::Tuple(items) | SchemaKind::Union(items) => {
                items.iter().any(|item| item.refers_to(id))
            }
            SchemaKind::Primitive { .. } | SchemaKind::Enum(_) | SchemaKind::Any => false,
        }
    }

    /// Points every reference to `from` in this subtree at `to`.
    pub(crate) fn retarget(&mut self, from: &str, to: &str) {
        match &mut self.kind {
            SchemaKind::Reference(target) if *target == from => *target = to.to_owned(),
            SchemaKind::Object {
                properties,
                additional,
            } => {
                for (_, child) in properties.iter_mut() {
                    child.retarget(from, to);
                }
                if let Some(additional) = additional {
                    additional.retarget(from, to);
                }
            }
            SchemaKind::Array(items) => items.retarget(from, to),
            SchemaKind::Tuple(items) | SchemaKind::Union(items) => {
                for item in items.iter_mut() {
                    item.retarget(from, to);
                }
            }
            _ => {}
        }
    }

    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut SchemaKind {
        &mut self.kind
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub(crate) fn source(&self) -> Option<&'static TypeInfo> {
        self.source
    }

    /// Returns `true` for every node kind except [`SchemaKind::Union`].
    pub fn is_simple(&self) -> bool {
        !matches!(self.kind, SchemaKind::Union(_))
    }

    /// Looks up a direct property of an object node.
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        match &self.kind {
            SchemaKind::Object { properties, .. } => properties
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, node)| node),
            _ => None,
        }
    }

    /// Property names of an object node, in declaration order.
    pub fn property_names(&self) -> Vec<&'static str> {
        match &self.kind {
            SchemaKind::Object { properties, .. } => {
                properties.iter().map(|(name, _)| *name).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Element schema of an array node.
    pub fn items(&self) -> Option<&SchemaNode> {
        match &self.kind {
            SchemaKind::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Sets the title.
    ///
    /// Union nodes have no single title slot; titling one is an error.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), SchemaError> {
        let title = title.into();
        if !self.is_simple() {
            return Err(SchemaError::NotSimple {
                kind: self.kind.name(),
                title,
                location: "$".to_owned(),
            });
        }
        self.title = Some(title);
        Ok(())
    }
}

// =============================================================================
// Encoding
// =============================================================================

struct Properties<'a>(&'a [(&'static str, SchemaNode)]);

impl Serialize for Properties<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, node) in self.0 {
            map.serialize_entry(name, node)?;
        }
        map.end()
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match &self.kind {
            SchemaKind::Object {
                properties,
                additional,
            } => {
                map.serialize_entry("type", "object")?;
                if let Some(id) = &self.id {
                    map.serialize_entry("id", id)?;
                }
                if let Some(title) = &self.title {
                    map.serialize_entry("title", title)?;
                }
                if !properties.is_empty() || additional.is_none() {
                    map.serialize_entry("properties", &Properties(properties))?;
                }
                if let Some(additional) = additional {
                    map.serialize_entry("additionalProperties", additional)?;
                }
            }
            SchemaKind::Array(items) => {
                map.serialize_entry("type", "array")?;
                if let Some(id) = &self.id {
                    map.serialize_entry("id", id)?;
                }
                if let Some(title) = &self.title {
                    map.serialize_entry("title", title)?;
                }
                map.serialize_entry("items", items)?;
            }
            SchemaKind::Tuple(items) => {
                map.serialize_entry("type", "array")?;
                if let Some(id) = &self.id {
                    map.serialize_entry("id", id)?;
                }
                if let Some(title) = &self.title {
                    map.serialize_entry("title", title)?;
                }
                map.serialize_entry("items", items)?;
            }
            SchemaKind::Primitive { ty, format } => {
                map.serialize_entry("type", ty.as_str())?;
                if let Some(id) = &self.id {
                    map.serialize_entry("id", id)?;
                }
                if let Some(title) = &self.title {
                    map.serialize_entry("title", title)?;
                }
                if let Some(format) = format {
                    map.serialize_entry("format", format)?;
                }
            }
            SchemaKind::Enum(values) => {
                map.serialize_entry("type", "string")?;
                if let Some(id) = &self.id {
                    map.serialize_entry("id", id)?;
                }
                if let Some(title) = &self.title {
                    map.serialize_entry("title", title)?;
                }
                map.serialize_entry("enum", values)?;
            }
            SchemaKind::Reference(target) => {
                map.serialize_entry("type", "object")?;
                if let Some(id) = &self.id {
                    map.serialize_entry("id", id)?;
                }
                if let Some(title) = &self.title {
                    map.serialize_entry("title", title)?;
                }
                map.serialize_entry("$ref", target)?;
            }
            SchemaKind::Union(variants) => {
                if let Some(id) = &self.id {
                    map.serialize_entry("id", id)?;
                }
                map.serialize_entry("oneOf", variants)?;
            }
            SchemaKind::Any => {
                map.serialize_entry("type", "any")?;
                if let Some(id) = &self.id {
                    map.serialize_entry("id", id)?;
                }
                if let Some(title) = &self.title {
                    map.serialize_entry("title", title)?;
                }
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn primitive_encodes_type_and_format() {
        let node = SchemaNode::formatted(PrimitiveType::String, "uuid");
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"type": "string", "format": "uuid"})
        );
    }

    #[test]
    fn object_properties_keep_declaration_order() {
        let node = SchemaNode::new(SchemaKind::Object {
            properties: vec![
                ("zeta", SchemaNode::primitive(PrimitiveType::Integer)),
                ("alpha", SchemaNode::primitive(PrimitiveType::Boolean)),
            ],
            additional: None,
        });
        let text = serde_json::to_string(&node).unwrap();
        assert_eq!(
            text,
            r#"{"type":"object","properties":{"zeta":{"type":"integer"},"alpha":{"type":"boolean"}}}"#
        );
    }

    #[test]
    fn map_encodes_additional_properties_only() {
        let node = SchemaNode::map(SchemaNode::primitive(PrimitiveType::Number));
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"type": "object", "additionalProperties": {"type": "number"}})
        );
    }

    #[test]
    fn array_and_enum_encode() {
        let node = SchemaNode::array(SchemaNode::new(SchemaKind::Enum(vec!["On", "Off"])));
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"type": "array", "items": {"type": "string", "enum": ["On", "Off"]}})
        );
    }

    #[test]
    fn title_is_set_on_simple_nodes() {
        let mut node = SchemaNode::primitive(PrimitiveType::String);
        node.set_title("Full Name").unwrap();
        assert_eq!(node.title(), Some("Full Name"));
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"type": "string", "title": "Full Name"})
        );
    }

    #[test]
    fn title_on_union_fails() {
        let mut node = SchemaNode::new(SchemaKind::Union(vec![SchemaNode::any()]));
        let err = node.set_title("Choice").unwrap_err();
        assert!(matches!(err, SchemaError::NotSimple { kind: "union", .. }));
        assert_eq!(node.title(), None);
    }

    #[test]
    fn retarget_rewrites_matching_references() {
        let mut node = SchemaNode::array(SchemaNode::reference("urn:jsonschema:app:Handle"));
        assert!(node.refers_to("urn:jsonschema:app:Handle"));

        node.retarget("urn:jsonschema:app:Handle", "urn:jsonschema:app:Node");
        assert!(!node.refers_to("urn:jsonschema:app:Handle"));
        assert_eq!(
            node.items().unwrap().kind(),
            &SchemaKind::Reference("urn:jsonschema:app:Node".into())
        );
    }

    #[test]
    fn ids_encode_on_every_kind() {
        let mut node = SchemaNode::array(SchemaNode::reference("urn:jsonschema:app:Tree"));
        node.set_id("urn:jsonschema:app:Tree".into());
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "type": "array",
                "id": "urn:jsonschema:app:Tree",
                "items": {"type": "object", "$ref": "urn:jsonschema:app:Tree"}
            })
        );
    }

    #[test]
    fn reference_carries_title() {
        let mut node = SchemaNode::reference("urn:jsonschema:app:Node");
        node.set_title("Parent").unwrap();
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"type": "object", "title": "Parent", "$ref": "urn:jsonschema:app:Node"})
        );
    }
}
