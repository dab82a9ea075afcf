//! Filter policies.
//!
//! A [`FilterPolicy`] pairs a [`FilterMode`] with a set of active tags and
//! decides, per field, whether the field is emitted:
//!
//! - **Exclude** (blacklist): emit everything except fields tagged with an
//!   active tag. With no active tags this is a full pass-through.
//! - **Include** (whitelist): emit only fields tagged with an active tag.
//!   Untagged fields never pass.
//!
//! # Example
//!
//! ```rust
//! use fieldsieve::{FieldMetadata, FilterPolicy};
//!
//! let age = FieldMetadata::new();
//! let name = FieldMetadata::new().with_tag("pii");
//!
//! let policy = FilterPolicy::exclude(["pii"]);
//! assert!(policy.decide(&age).is_include());
//! assert!(!policy.decide(&name).is_include());
//! ```

mod filter;

pub use filter::{Decision, FilterMode, FilterPolicy, PolicyError};
