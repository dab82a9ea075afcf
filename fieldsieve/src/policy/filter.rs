//! Filter policies and the per-field include/omit decision.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::metadata::FieldMetadata;

// =============================================================================
// FilterMode / Decision
// =============================================================================

/// How the active tag set is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Whitelist: only fields tagged with an active tag are emitted.
    Include,
    /// Blacklist: every field is emitted except those tagged with an active tag.
    #[default]
    Exclude,
}

/// Outcome of evaluating a policy against one field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    IncludeField,
    OmitField,
}

impl Decision {
    pub fn is_include(self) -> bool {
        matches!(self, Self::IncludeField)
    }
}

// =============================================================================
// PolicyError
// =============================================================================

/// A policy that is valid for the engine but almost certainly a caller mistake.
///
/// The engine never returns this; use [`FilterPolicy::validate`] to reject
/// such policies before rendering.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("include policy has no active tags and would omit every field")]
    EmptyWhitelist,
}

// =============================================================================
// FilterPolicy
// =============================================================================

/// Per-call filtering policy: a mode plus the set of active tags.
///
/// The default policy is [`FilterPolicy::pass_through`].
///
/// ```
/// use fieldsieve::{Decision, FieldMetadata, FilterPolicy};
///
/// let pii = FieldMetadata::new().with_tag("pii");
///
/// assert_eq!(FilterPolicy::exclude(["pii"]).decide(&pii), Decision::OmitField);
/// assert_eq!(FilterPolicy::include(["pii"]).decide(&pii), Decision::IncludeField);
/// assert_eq!(FilterPolicy::pass_through().decide(&pii), Decision::IncludeField);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPolicy {
    mode: FilterMode,
    #[serde(default)]
    active_tags: BTreeSet<String>,
}

impl FilterPolicy {
    #[must_use]
    pub fn new<I, S>(mode: FilterMode, active_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode,
            active_tags: active_tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Exclude mode with no active tags: every field is emitted.
    #[must_use]
    pub fn pass_through() -> Self {
        Self::default()
    }

    /// Emits everything except fields carrying one of `tags`.
    #[must_use]
    pub fn exclude<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(FilterMode::Exclude, tags)
    }

    /// Emits only fields carrying one of `tags`.
    #[must_use]
    pub fn include<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(FilterMode::Include, tags)
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn active_tags(&self) -> &BTreeSet<String> {
        &self.active_tags
    }

    pub fn is_pass_through(&self) -> bool {
        self.mode == FilterMode::Exclude && self.active_tags.is_empty()
    }

    /// Decides whether a field with `field` metadata is emitted.
    ///
    /// Untagged fields always pass in exclude mode and never pass in include
    /// mode. Tagged fields pass in exclude mode unless a tag is active, and
    /// pass in include mode only if a tag is active.
    pub fn decide(&self, field: &FieldMetadata) -> Decision {
        let untagged = field.is_untagged();
        match self.mode {
            FilterMode::Exclude => {
                if untagged || !field.intersects(&self.active_tags) {
                    Decision::IncludeField
                } else {
                    Decision::OmitField
                }
            }
            FilterMode::Include => {
                if !untagged && field.intersects(&self.active_tags) {
                    Decision::IncludeField
                } else {
                    Decision::OmitField
                }
            }
        }
    }

    /// Rejects include policies with no active tags.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.mode == FilterMode::Include && self.active_tags.is_empty() {
            return Err(PolicyError::EmptyWhitelist);
        }
        Ok(())
    }
}
