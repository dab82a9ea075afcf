//! Annotation pass of schema generation.
//!
//! Walks a finished schema tree and attaches titles from the metadata
//! registry: each node built from a [`TypeInfo`](crate::TypeInfo) receives the
//! type-level title, and each property of such a node receives its field
//! title. Children are annotated before their parent, so a field title on a
//! property overrides the title of the property's own type.

use super::{
    error::SchemaError,
    node::{SchemaKind, SchemaNode},
};
use crate::metadata::FieldMetadata;

pub(crate) fn annotate(root: &mut SchemaNode) -> Result<(), SchemaError> {
    annotate_node(root, "$")
}

fn annotate_node(node: &mut SchemaNode, location: &str) -> Result<(), SchemaError> {
    match node.kind_mut() {
        SchemaKind::Object {
            properties,
            additional,
        } => {
            for (name, child) in properties.iter_mut() {
                let name = *name;
                annotate_node(child, &format!("{location}.{name}"))?;
            }
            if let Some(additional) = additional {
                annotate_node(additional, &format!("{location}.*"))?;
            }
        }
        SchemaKind::Array(items) => annotate_node(items, &format!("{location}[]"))?,
        SchemaKind::Tuple(items) | SchemaKind::Union(items) => {
            for (index, item) in items.iter_mut().enumerate() {
                annotate_node(item, &format!("{location}[{index}]"))?;
            }
        }
        SchemaKind::Primitive { .. }
        | SchemaKind::Enum(_)
        | SchemaKind::Reference(_)
        | SchemaKind::Any => {}
    }

    let Some(info) = node.source() else {
        return Ok(());
    };

    if let Some(title) = info.title() {
        node.set_title(title).map_err(|err| err.at(location))?;
    }

    if let SchemaKind::Object { properties, .. } = node.kind_mut() {
        for (name, child) in properties.iter_mut() {
            let name = *name;
            let metadata = info.metadata(name);
            if let Some(title) = metadata.title() {
                child
                    .set_title(title)
                    .map_err(|err| err.at(&format!("{location}.{name}")))?;
            }
            if metadata.is_client_cacheable() {
                client_cacheable(name, metadata, child);
            }
        }
    }
    Ok(())
}

/// Hook for fields declared `#[sieve(client_cache)]`.
///
/// Recognized, but leaves the node unchanged.
fn client_cacheable(name: &str, _metadata: &FieldMetadata, _node: &mut SchemaNode) {
    tracing::trace!(field = name, "client-cacheable field");
}
