//! Per-field declarations: display title, tag set and the client-cache flag.

use std::{borrow::Borrow, collections::BTreeSet};

/// Metadata declared for one structural field of a type.
///
/// Values are built once when a type's [`TypeInfo`](super::TypeInfo) is first
/// requested and are never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldMetadata {
    title: Option<&'static str>,
    tags: BTreeSet<&'static str>,
    client_cache: bool,
}

/// Metadata returned for fields with no declaration.
pub(crate) static UNTAGGED: FieldMetadata = FieldMetadata::new();

impl FieldMetadata {
    /// Metadata with no title, no tags and no client-cache flag.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: None,
            tags: BTreeSet::new(),
            client_cache: false,
        }
    }

    /// Sets the display title.
    #[must_use]
    pub fn with_title(mut self, title: &'static str) -> Self {
        self.title = Some(title);
        self
    }

    /// Adds a single tag.
    #[must_use]
    pub fn with_tag(mut self, tag: &'static str) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Adds every tag in `tags`.
    #[must_use]
    pub fn with_tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        self.tags.extend(tags);
        self
    }

    /// Marks the field as client-cacheable.
    #[must_use]
    pub fn client_cacheable(mut self) -> Self {
        self.client_cache = true;
        self
    }

    pub fn title(&self) -> Option<&'static str> {
        self.title
    }

    pub fn tags(&self) -> &BTreeSet<&'static str> {
        &self.tags
    }

    /// Returns `true` when the field carries no tags.
    pub fn is_untagged(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn is_client_cacheable(&self) -> bool {
        self.client_cache
    }

    /// Returns `true` if any of this field's tags appears in `active`.
    pub fn intersects<S: Borrow<str> + Ord>(&self, active: &BTreeSet<S>) -> bool {
        self.tags.iter().any(|tag| active.contains(*tag))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::FieldMetadata;

    #[test]
    fn default_is_untagged_without_title() {
        let meta = FieldMetadata::new();
        assert!(meta.is_untagged());
        assert_eq!(meta.title(), None);
        assert!(!meta.is_client_cacheable());
        assert_eq!(meta, FieldMetadata::default());
    }

    #[test]
    fn builder_collects_tags_once() {
        let meta = FieldMetadata::new()
            .with_tag("pii")
            .with_tags(["pii", "contact"])
            .with_title("Email");
        assert_eq!(meta.tags().len(), 2);
        assert_eq!(meta.title(), Some("Email"));
    }

    #[test]
    fn intersects_accepts_owned_and_borrowed_tags() {
        let meta = FieldMetadata::new().with_tags(["pii", "contact"]);

        let owned: BTreeSet<String> = ["contact".to_string()].into();
        assert!(meta.intersects(&owned));

        let borrowed: BTreeSet<&str> = ["audit", "billing", "debug", "pii"].into();
        assert!(meta.intersects(&borrowed));

        let untagged = FieldMetadata::new();
        assert!(!untagged.intersects(&borrowed));

        let disjoint: BTreeSet<&str> = ["internal"].into();
        assert!(!meta.intersects(&disjoint));

        let empty: BTreeSet<&str> = BTreeSet::new();
        assert!(!meta.intersects(&empty));
    }
}
