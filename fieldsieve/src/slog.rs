//! Adapters for emitting filtered values through `slog`.
//!
//! This module connects [`Filterable`] with `slog` by providing a
//! `slog::Value` that serializes the filtered JSON as structured data via
//! `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation is the policy-filtered rendering,
//!   not the original value.
//! - Avoiding fallible logging APIs: render failures are represented as
//!   placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog` or choose the policy.

use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{engine::Engine, policy::FilterPolicy, walk::Filterable};

/// A filtered rendering ready to be logged as nested JSON.
#[derive(Clone, Debug, PartialEq)]
pub struct FilteredJson(JsonValue);

impl FilteredJson {
    #[must_use]
    pub fn new(value: JsonValue) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &JsonValue {
        &self.0
    }

    pub fn into_inner(self) -> JsonValue {
        self.0
    }
}

impl SlogValue for FilteredJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.0.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Extension trait for slog logging of filtered values as JSON.
///
/// ## Example
/// ```ignore
/// use fieldsieve::SlogFilteredExt;
///
/// info!(logger, "event"; "data" => event.slog_filtered_json(&policy));
/// ```
pub trait SlogFilteredExt {
    /// Renders `self` under `policy` and returns a `slog::Value` that
    /// serializes as structured JSON.
    ///
    /// If rendering fails, the returned value holds a JSON string starting
    /// with `"Failed to serialize filtered value"`.
    fn slog_filtered_json(&self, policy: &FilterPolicy) -> FilteredJson;
}

impl<T> SlogFilteredExt for T
where
    T: Filterable + ?Sized,
{
    fn slog_filtered_json(&self, policy: &FilterPolicy) -> FilteredJson {
        let value = Engine::global()
            .to_value(self, policy)
            .unwrap_or_else(|err| {
                JsonValue::String(format!("Failed to serialize filtered value: {err}"))
            });
        FilteredJson::new(value)
    }
}
