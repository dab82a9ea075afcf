//! JSON convenience helpers.
//!
//! Thin wrappers over `serde_json` for the conversions callers usually need
//! around filtered output: plain (unfiltered) encoding, reformatting, parsing
//! into a map or a typed value, and deep copies through JSON.
//!
//! Encoding helpers follow the rendering rules for absent values: `null`
//! object members are dropped and keys come out in alphabetical order.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::{
    engine::Engine,
    error::Error,
    policy::FilterPolicy,
    walk::{Filterable, prune_nulls},
};

/// Encodes `value` through serde as compact JSON, without any filtering.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    Ok(serde_json::to_string(&pruned(value)?)?)
}

/// Encodes `value` through serde as pretty-printed JSON, without any filtering.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(&pruned(value)?)?)
}

/// Reformats JSON text with indentation.
pub fn pretty_print(text: &str) -> Result<String, Error> {
    let value: Value = serde_json::from_str(text)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Parses JSON text that must hold an object.
pub fn to_map(text: &str) -> Result<Map<String, Value>, Error> {
    Ok(serde_json::from_str(text)?)
}

/// Parses JSON text into `T`. Unknown fields are ignored unless `T` opts
/// into `deny_unknown_fields`.
pub fn from_json<T: DeserializeOwned>(text: &str) -> Result<T, Error> {
    Ok(serde_json::from_str(text)?)
}

/// Deep-copies `value` by encoding and decoding it. Fields encoded as `null`
/// are absent from the intermediate form, so `T` must tolerate missing keys
/// for them (as `Option` fields do).
pub fn clone_via_json<T: Serialize + DeserializeOwned>(value: &T) -> Result<T, Error> {
    Ok(serde_json::from_value(pruned(value)?)?)
}

fn pruned<T: Serialize + ?Sized>(value: &T) -> Result<Value, Error> {
    Ok(prune_nulls(serde_json::to_value(value)?).unwrap_or(Value::Null))
}

/// Renders `value` under `policy` with the global engine and decodes the
/// result into `U`.
///
/// ```
/// use fieldsieve::{FilterPolicy, Sieve, json};
/// use serde::Deserialize;
///
/// #[derive(Sieve)]
/// struct Person {
///     #[sieve(tags("pii"))]
///     name: String,
///     age: u32,
/// }
///
/// #[derive(Deserialize)]
/// struct Public {
///     name: Option<String>,
///     age: u32,
/// }
///
/// let person = Person { name: "Ada".into(), age: 36 };
/// let public: Public = json::from_filtered(&person, &FilterPolicy::exclude(["pii"])).unwrap();
/// assert_eq!(public.name, None);
/// assert_eq!(public.age, 36);
/// ```
pub fn from_filtered<T, U>(value: &T, policy: &FilterPolicy) -> Result<U, Error>
where
    T: Filterable + ?Sized,
    U: DeserializeOwned,
{
    let rendered = Engine::global().to_value(value, policy)?;
    Ok(serde_json::from_value(rendered)?)
}
