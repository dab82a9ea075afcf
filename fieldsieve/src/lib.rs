//! Tag-driven selective JSON serialization and titled JSON Schema generation.
//!
//! Types declare per-field metadata with `#[derive(Sieve)]`: a display title,
//! a set of tags, and a client-cache flag. At render time a [`FilterPolicy`]
//! selects which tagged fields appear in the output:
//!
//! - **Exclude** mode drops fields carrying an active tag (blacklist).
//! - **Include** mode keeps only fields carrying an active tag (whitelist).
//!
//! The same declarations drive schema generation. [`render_schema`] describes
//! every declared field of a type, regardless of policy, and attaches the
//! declared titles.
//!
//! ```
//! use fieldsieve::{FilterPolicy, Sieve};
//!
//! #[derive(Sieve)]
//! #[sieve(title = "Person")]
//! struct Person {
//!     #[sieve(tags("pii"), title = "Full Name")]
//!     name: String,
//!     age: u32,
//!     nickname: Option<String>,
//! }
//!
//! let person = Person { name: "Ada".into(), age: 36, nickname: None };
//!
//! let public = fieldsieve::render_filtered(&person, &FilterPolicy::exclude(["pii"])).unwrap();
//! assert_eq!(public, r#"{"age":36}"#);
//!
//! let pii = fieldsieve::render_filtered(&person, &FilterPolicy::include(["pii"])).unwrap();
//! assert_eq!(pii, r#"{"name":"Ada"}"#);
//!
//! let schema = fieldsieve::build_schema::<Person>().unwrap();
//! assert_eq!(schema.property_names(), ["name", "age", "nickname"]);
//! ```
//!
//! What this crate does:
//! - stores field metadata in a per-type registry built once
//! - renders values to JSON through the [`Filterable`] walker
//! - builds JSON Schema trees through the [`Schematic`] walker
//! - provides integrations with `tracing` and, behind a feature flag, `slog`
//!
//! What it does not do:
//! - perform I/O
//! - decide what the tags mean
//!
//! The `Sieve` derive macro lives in `fieldsieve-derive` and is re-exported
//! from this crate.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use fieldsieve_derive::Sieve;

#[allow(unused_extern_crates)]
extern crate self as fieldsieve;

// Module declarations
mod engine;
mod error;
pub mod json;
pub mod metadata;
pub mod policy;
pub mod schema;
#[cfg(feature = "slog")]
pub mod slog;
pub mod tracing;
pub mod walk;

pub use engine::{Engine, EngineConfig};
pub use error::Error;
pub use metadata::{Described, FieldInfo, FieldMetadata, TypeInfo, TypeInfoCell, lookup};
pub use policy::{Decision, FilterMode, FilterPolicy, PolicyError};
pub use schema::{SchemaError, SchemaNode, Schematic};
#[cfg(feature = "slog")]
pub use self::slog::{FilteredJson, SlogFilteredExt};
pub use self::tracing::TracingFilteredExt;
pub use walk::{FieldPath, Filterable, SerializationError};

#[doc(hidden)]
pub mod __private {
    pub use serde::Serialize;
    pub use serde_json::Value;
}

// =============================================================================
// Global engine shortcuts
// =============================================================================

/// Renders `value` under `policy` with the global engine.
pub fn render_filtered<T: Filterable + ?Sized>(
    value: &T,
    policy: &FilterPolicy,
) -> Result<String, Error> {
    Engine::global().render_filtered(value, policy)
}

/// Renders `value` under `policy` as pretty-printed JSON with the global engine.
pub fn render_filtered_pretty<T: Filterable + ?Sized>(
    value: &T,
    policy: &FilterPolicy,
) -> Result<String, Error> {
    Engine::global().render_filtered_pretty(value, policy)
}

/// Renders `value` with the pass-through policy.
pub fn render<T: Filterable + ?Sized>(value: &T) -> Result<String, Error> {
    Engine::global().render(value)
}

/// Renders `value` under `policy` into a JSON value.
pub fn to_value<T: Filterable + ?Sized>(
    value: &T,
    policy: &FilterPolicy,
) -> Result<serde_json::Value, SerializationError> {
    Engine::global().to_value(value, policy)
}

/// Builds the annotated schema tree of `T` with the global engine.
pub fn build_schema<T: Schematic + ?Sized>() -> Result<SchemaNode, SchemaError> {
    Engine::global().build_schema::<T>()
}

/// Renders the schema of `T` as pretty-printed JSON with the global engine.
pub fn render_schema<T: Schematic + ?Sized>() -> Result<String, SchemaError> {
    Engine::global().render_schema::<T>()
}
