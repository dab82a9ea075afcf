//! Schema generation failures.

/// Schema generation failed for a type.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A title was attached to a node that has no single title slot.
    #[error("cannot attach title `{title}` to non-simple {kind} schema node at `{location}`")]
    NotSimple {
        kind: &'static str,
        title: String,
        location: String,
    },
    /// The type graph nests deeper than the configured limit.
    #[error("schema nesting exceeds the limit of {limit} levels at type `{type_name}`")]
    DepthExceeded {
        limit: usize,
        type_name: &'static str,
    },
    #[error("failed to encode schema: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SchemaError {
    /// Relocates a `NotSimple` error to `location`.
    pub(crate) fn at(self, location: &str) -> Self {
        match self {
            Self::NotSimple { kind, title, .. } => Self::NotSimple {
                kind,
                title,
                location: location.to_owned(),
            },
            other => other,
        }
    }
}
