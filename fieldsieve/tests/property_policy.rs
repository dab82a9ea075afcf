//! Property-based tests for filter policies.
//!
//! These tests use proptest to check the include/omit decision across
//! randomly generated tag sets, and that rendering agrees with it.

use std::collections::BTreeSet;

use fieldsieve::{Decision, FieldMetadata, FilterMode, FilterPolicy, Sieve};
use proptest::prelude::*;

const TAGS: [&str; 6] = ["pii", "secret", "internal", "audit", "billing", "debug"];

/// Strategy for a subset of the tag universe.
fn tag_set() -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(TAGS.to_vec(), 0..=TAGS.len())
}

fn field(tags: &[&'static str]) -> FieldMetadata {
    FieldMetadata::new().with_tags(tags.iter().copied())
}

#[derive(Sieve)]
struct Record {
    #[sieve(tags("pii"))]
    name: String,
    #[sieve(tags("secret", "internal"))]
    token: String,
    #[sieve(tags("billing"))]
    card: Option<String>,
    count: u32,
}

fn record() -> Record {
    Record {
        name: "Ada".into(),
        token: "t".into(),
        card: Some("4242".into()),
        count: 1,
    }
}

proptest! {
    /// Exclude mode with no active tags emits every field.
    #[test]
    fn empty_blacklist_passes_everything(tags in tag_set()) {
        let empty: [&str; 0] = [];
        let policy = FilterPolicy::exclude(empty);
        prop_assert_eq!(policy.decide(&field(&tags)), Decision::IncludeField);
    }

    /// Include mode with no active tags omits every field.
    #[test]
    fn empty_whitelist_omits_everything(tags in tag_set()) {
        let empty: [&str; 0] = [];
        let policy = FilterPolicy::include(empty);
        prop_assert_eq!(policy.decide(&field(&tags)), Decision::OmitField);
    }

    /// On overlapping tags the two modes make opposite decisions.
    #[test]
    fn modes_are_complementary_on_overlap(tags in tag_set(), active in tag_set()) {
        let tags: BTreeSet<_> = tags.into_iter().collect();
        let active: BTreeSet<_> = active.into_iter().collect();
        prop_assume!(!tags.is_disjoint(&active));

        let metadata = FieldMetadata::new().with_tags(tags.iter().copied());
        prop_assert_eq!(
            FilterPolicy::new(FilterMode::Exclude, active.iter().copied()).decide(&metadata),
            Decision::OmitField
        );
        prop_assert_eq!(
            FilterPolicy::new(FilterMode::Include, active.iter().copied()).decide(&metadata),
            Decision::IncludeField
        );
    }

    /// Rendered keys are exactly the fields the policy decides to include.
    #[test]
    fn rendering_follows_decisions(active in tag_set(), include in any::<bool>()) {
        let mode = if include { FilterMode::Include } else { FilterMode::Exclude };
        let policy = FilterPolicy::new(mode, active);

        let rendered = fieldsieve::to_value(&record(), &policy).unwrap();
        let keys: Vec<&str> = rendered
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();

        let expected: Vec<&str> = ["card", "count", "name", "token"]
            .into_iter()
            .filter(|name| policy.decide(fieldsieve::lookup::<Record>(name)).is_include())
            .collect();
        prop_assert_eq!(keys, expected);
    }
}
