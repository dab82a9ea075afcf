//! `Filterable` implementations for optional third-party value types.
//!
//! - `chrono` (feature `chrono`): timestamps as RFC 3339 strings, naive dates
//!   as `YYYY-MM-DD`.
//! - `uuid` (feature `uuid`): hyphenated lowercase strings.

#[cfg(any(feature = "chrono", feature = "uuid"))]
use serde_json::Value;

#[cfg(any(feature = "chrono", feature = "uuid"))]
use super::{error::SerializationError, traits::Filterable, walker::FilterWalker};

#[cfg(feature = "chrono")]
impl<Tz> Filterable for chrono::DateTime<Tz>
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    fn filter_with(&self, _walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        Ok(Some(Value::String(self.to_rfc3339())))
    }
}

#[cfg(feature = "chrono")]
impl Filterable for chrono::NaiveDate {
    fn filter_with(&self, _walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        Ok(Some(Value::String(self.format("%Y-%m-%d").to_string())))
    }
}

#[cfg(feature = "uuid")]
impl Filterable for uuid::Uuid {
    fn filter_with(&self, _walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        Ok(Some(Value::String(self.hyphenated().to_string())))
    }
}
