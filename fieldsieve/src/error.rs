//! Crate-level error type.

use crate::{policy::PolicyError, schema::SchemaError, walk::SerializationError};

/// Any failure surfaced by the engine facade or the JSON helpers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error("JSON conversion failed: {0}")]
    Json(#[from] serde_json::Error),
}
