//! Integration tests for the slog module.
//!
//! These tests verify that:
//! - `slog_filtered_json()` logs the policy-filtered rendering
//! - The `slog::Value` implementation emits nested serde values
//! - Render failures become placeholder strings instead of errors

#![cfg(feature = "slog")]

use std::{cell::RefCell, collections::HashMap, fmt::Arguments};

use fieldsieve::{FilterPolicy, FilteredJson, Sieve, SlogFilteredExt};
use serde_json::{Value as JsonValue, json};

// A test serializer that captures serialized key-value pairs
struct CapturingSerializer {
    captured: RefCell<HashMap<String, CapturedValue>>,
}

#[derive(Debug, Clone, PartialEq)]
enum CapturedValue {
    Str(String),
    Other,
    Serde(JsonValue),
}

impl CapturingSerializer {
    fn new() -> Self {
        Self {
            captured: RefCell::new(HashMap::new()),
        }
    }

    fn get(&self, key: &str) -> Option<CapturedValue> {
        self.captured.borrow().get(key).cloned()
    }
}

impl slog::Serializer for CapturingSerializer {
    fn emit_arguments(&mut self, key: slog::Key, val: &Arguments<'_>) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Str(val.to_string()));
        Ok(())
    }

    fn emit_str(&mut self, key: slog::Key, val: &str) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Str(val.into()));
        Ok(())
    }

    fn emit_unit(&mut self, key: slog::Key) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Other);
        Ok(())
    }

    fn emit_serde(&mut self, key: slog::Key, val: &dyn slog::SerdeValue) -> slog::Result {
        let json = serde_json::to_value(val.as_serde()).unwrap_or(JsonValue::Null);
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Serde(json));
        Ok(())
    }
}

fn serialize_to_capture<V: slog::Value, S: slog::Serializer>(
    value: &V,
    key: &'static str,
    serializer: &mut S,
) {
    static RS: slog::RecordStatic<'static> = slog::record_static!(slog::Level::Info, "");
    let args = format_args!("");
    let record = slog::Record::new(&RS, &args, slog::b!());
    value.serialize(&record, key, serializer).unwrap();
}

fn captured<V: slog::Value>(value: &V) -> CapturedValue {
    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(value, "event", &mut serializer);
    serializer.get("event").expect("value should be emitted")
}

#[derive(Sieve)]
struct Login {
    #[sieve(tags("pii"))]
    email: String,
    #[sieve(tags("secret"))]
    password: String,
    attempts: u32,
}

fn login() -> Login {
    Login {
        email: "ada@example.com".into(),
        password: "hunter2".into(),
        attempts: 2,
    }
}

mod slog_filtered_json {
    use super::*;

    #[test]
    fn emits_filtered_value_as_serde() {
        let filtered = login().slog_filtered_json(&FilterPolicy::exclude(["secret"]));
        assert_eq!(
            captured(&filtered),
            CapturedValue::Serde(json!({"attempts": 2, "email": "ada@example.com"}))
        );
    }

    #[test]
    fn include_mode_emits_only_active_tags() {
        let filtered = login().slog_filtered_json(&FilterPolicy::include(["pii"]));
        assert_eq!(
            captured(&filtered),
            CapturedValue::Serde(json!({"email": "ada@example.com"}))
        );
    }

    #[test]
    fn nested_values_are_filtered() {
        #[derive(Sieve)]
        struct Session {
            id: u64,
            logins: Vec<Login>,
        }

        let session = Session {
            id: 7,
            logins: vec![login()],
        };
        let filtered = session.slog_filtered_json(&FilterPolicy::exclude(["pii", "secret"]));
        assert_eq!(
            captured(&filtered),
            CapturedValue::Serde(json!({"id": 7, "logins": [{"attempts": 2}]}))
        );
    }

    #[test]
    fn failures_become_placeholder_strings() {
        #[derive(Sieve)]
        struct Reading {
            value: f64,
        }

        let filtered = Reading { value: f64::NAN }.slog_filtered_json(&FilterPolicy::pass_through());
        let JsonValue::String(text) = filtered.value() else {
            panic!("expected a placeholder string, got {filtered:?}");
        };
        assert!(text.starts_with("Failed to serialize filtered value"));
        assert!(text.contains("$.value"));
        assert_eq!(captured(&filtered), CapturedValue::Serde(json!(text)));
    }
}

mod filtered_json {
    use super::*;

    #[test]
    fn wraps_any_json_value() {
        let value = FilteredJson::new(json!([1, "two"]));
        assert_eq!(value.value(), &json!([1, "two"]));
        assert_eq!(captured(&value), CapturedValue::Serde(json!([1, "two"])));
        assert_eq!(value.into_inner(), json!([1, "two"]));
    }
}
