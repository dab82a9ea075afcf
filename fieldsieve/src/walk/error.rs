//! Serialization failures.

use super::path::FieldPath;

/// Why a value could not be represented in the output document.
#[derive(Debug, thiserror::Error)]
pub enum SerializationErrorKind {
    #[error("non-finite float `{0}` has no JSON representation")]
    NonFiniteFloat(f64),
    #[error("integer `{0}` does not fit in 64 bits")]
    IntegerOutOfRange(String),
    #[error("serde serialization failed: {0}")]
    Serde(#[source] serde_json::Error),
}

/// A value in the object graph cannot be represented in the output format.
///
/// Carries the path of the offending value so the failure can be diagnosed
/// without re-running the render.
#[derive(Debug, thiserror::Error)]
#[error("cannot serialize `{path}`: {kind}")]
pub struct SerializationError {
    path: FieldPath,
    #[source]
    kind: SerializationErrorKind,
}

impl SerializationError {
    pub(crate) fn new(path: FieldPath, kind: SerializationErrorKind) -> Self {
        Self { path, kind }
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn kind(&self) -> &SerializationErrorKind {
        &self.kind
    }
}
