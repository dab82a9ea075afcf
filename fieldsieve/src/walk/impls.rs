//! `Filterable` implementations for std types.
//!
//! Scalars and strings render directly. `Option` renders `None` as absent.
//! Smart pointers delegate to their contents. Sequences and sets render as
//! arrays, string-keyed maps as objects with sorted keys.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    hash::BuildHasher,
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
    rc::Rc,
    sync::Arc,
};

use serde_json::{Number, Value};

use super::{
    error::{SerializationError, SerializationErrorKind},
    traits::Filterable,
    walker::{FilterWalker, MapKey, prune_nulls},
};

// =============================================================================
// Scalars
// =============================================================================

macro_rules! impl_filterable_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Filterable for $ty {
                fn filter_with(&self, _walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
                    Ok(Some(Value::Number(Number::from(*self))))
                }
            }
        )*
    };
}

impl_filterable_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Filterable for i128 {
    fn filter_with(&self, walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        i64::try_from(*self)
            .map(|value| Some(Value::Number(Number::from(value))))
            .map_err(|_| walker.error(SerializationErrorKind::IntegerOutOfRange(self.to_string())))
    }
}

impl Filterable for u128 {
    fn filter_with(&self, walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        u64::try_from(*self)
            .map(|value| Some(Value::Number(Number::from(value))))
            .map_err(|_| walker.error(SerializationErrorKind::IntegerOutOfRange(self.to_string())))
    }
}

fn float(value: f64, walker: &FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
    Number::from_f64(value)
        .map(|number| Some(Value::Number(number)))
        .ok_or_else(|| walker.error(SerializationErrorKind::NonFiniteFloat(value)))
}

impl Filterable for f32 {
    fn filter_with(&self, walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        float(f64::from(*self), walker)
    }
}

impl Filterable for f64 {
    fn filter_with(&self, walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        float(*self, walker)
    }
}

impl Filterable for bool {
    fn filter_with(&self, _walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        Ok(Some(Value::Bool(*self)))
    }
}

impl Filterable for char {
    fn filter_with(&self, _walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        Ok(Some(Value::String(self.to_string())))
    }
}

impl Filterable for str {
    fn filter_with(&self, _walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        Ok(Some(Value::String(self.to_owned())))
    }
}

impl Filterable for String {
    fn filter_with(&self, _walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        Ok(Some(Value::String(self.clone())))
    }
}

macro_rules! impl_filterable_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Filterable for $ty {
                fn filter_with(&self, _walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
                    Ok(Some(Value::String(self.to_string())))
                }
            }
        )*
    };
}

impl_filterable_display!(IpAddr, Ipv4Addr, Ipv6Addr);

/// Untyped JSON passes through with `null` members dropped; a `null` value
/// counts as absent.
impl Filterable for Value {
    fn filter_with(&self, _walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        Ok(prune_nulls(self.clone()))
    }
}

// =============================================================================
// Option and pointers
// =============================================================================

impl<T: Filterable> Filterable for Option<T> {
    fn filter_with(&self, walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        match self {
            Some(value) => value.filter_with(walker),
            None => Ok(None),
        }
    }
}

impl<T: Filterable + ?Sized> Filterable for &T {
    fn filter_with(&self, walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        (**self).filter_with(walker)
    }
}

impl<T: Filterable + ?Sized> Filterable for Box<T> {
    fn filter_with(&self, walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        (**self).filter_with(walker)
    }
}

impl<T: Filterable + ?Sized> Filterable for Rc<T> {
    fn filter_with(&self, walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        (**self).filter_with(walker)
    }
}

impl<T: Filterable + ?Sized> Filterable for Arc<T> {
    fn filter_with(&self, walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        (**self).filter_with(walker)
    }
}

impl<T> Filterable for Cow<'_, T>
where
    T: Filterable + ToOwned + ?Sized,
{
    fn filter_with(&self, walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        self.as_ref().filter_with(walker)
    }
}

// =============================================================================
// Sequences and sets
// =============================================================================

impl<T: Filterable> Filterable for [T] {
    fn filter_with(&self, walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        walker.sequence(self)
    }
}

impl<T: Filterable, const N: usize> Filterable for [T; N] {
    fn filter_with(&self, walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        walker.sequence(self)
    }
}

impl<T: Filterable> Filterable for Vec<T> {
    fn filter_with(&self, walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        walker.sequence(self)
    }
}

impl<T: Filterable> Filterable for VecDeque<T> {
    fn filter_with(&self, walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        walker.sequence(self)
    }
}

impl<T: Filterable> Filterable for BTreeSet<T> {
    fn filter_with(&self, walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        walker.sequence(self)
    }
}

/// Elements are sorted first so the output does not depend on hash order.
impl<T: Filterable + Ord, S: BuildHasher> Filterable for HashSet<T, S> {
    fn filter_with(&self, walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        let mut items: Vec<&T> = self.iter().collect();
        items.sort();
        walker.sequence(items)
    }
}

// =============================================================================
// Maps
// =============================================================================

impl<K: MapKey, V: Filterable> Filterable for BTreeMap<K, V> {
    fn filter_with(&self, walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        walker.map(self)
    }
}

impl<K: MapKey, V: Filterable, S: BuildHasher> Filterable for HashMap<K, V, S> {
    fn filter_with(&self, walker: &mut FilterWalker<'_>) -> Result<Option<Value>, SerializationError> {
        walker.map(self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap, HashSet};

    use serde_json::{Value, json};

    use super::*;
    use crate::policy::FilterPolicy;

    fn render<T: Filterable + ?Sized>(value: &T) -> Result<Value, SerializationError> {
        let policy = FilterPolicy::pass_through();
        FilterWalker::new(&policy).walk(value)
    }

    #[test]
    fn scalars_render_directly() {
        assert_eq!(render(&42u8).unwrap(), json!(42));
        assert_eq!(render(&-7i64).unwrap(), json!(-7));
        assert_eq!(render(&true).unwrap(), json!(true));
        assert_eq!(render(&'x').unwrap(), json!("x"));
        assert_eq!(render("text").unwrap(), json!("text"));
        assert_eq!(render(&1.5f64).unwrap(), json!(1.5));
    }

    #[test]
    fn none_root_renders_null() {
        let value: Option<u32> = None;
        assert_eq!(render(&value).unwrap(), Value::Null);
    }

    #[test]
    fn non_finite_float_fails_at_root() {
        let err = render(&f64::NAN).unwrap_err();
        assert!(matches!(err.kind(), SerializationErrorKind::NonFiniteFloat(_)));
        assert!(err.path().is_root());
    }

    #[test]
    fn wide_integers_fail_outside_64_bits() {
        assert_eq!(render(&12i128).unwrap(), json!(12));
        let err = render(&u128::MAX).unwrap_err();
        assert!(matches!(
            err.kind(),
            SerializationErrorKind::IntegerOutOfRange(_)
        ));
    }

    #[test]
    fn sequence_keeps_absent_positions_as_null() {
        let values = vec![Some(1), None, Some(3)];
        assert_eq!(render(&values).unwrap(), json!([1, null, 3]));
    }

    #[test]
    fn sequence_error_reports_index() {
        let values = vec![1.0, f64::INFINITY];
        let err = render(&values).unwrap_err();
        assert_eq!(err.path().to_string(), "$[1]");
    }

    #[test]
    fn hash_set_renders_sorted() {
        let set: HashSet<u32> = [5, 1, 3].into_iter().collect();
        assert_eq!(render(&set).unwrap(), json!([1, 3, 5]));
    }

    #[test]
    fn maps_render_sorted_and_skip_absent_values() {
        let mut map = HashMap::new();
        map.insert("zeta".to_string(), Some(1));
        map.insert("alpha".to_string(), Some(2));
        map.insert("mid".to_string(), None);
        assert_eq!(
            render(&map).unwrap().to_string(),
            r#"{"alpha":2,"zeta":1}"#
        );
    }

    #[test]
    fn integer_keys_render_as_strings() {
        let map: BTreeMap<u16, &str> = [(8080, "http"), (443, "https")].into();
        assert_eq!(render(&map).unwrap(), json!({"443": "https", "8080": "http"}));
    }

    #[test]
    fn map_error_reports_key() {
        let map: BTreeMap<&str, f32> = [("ok", 1.0), ("bad", f32::NAN)].into();
        let err = render(&map).unwrap_err();
        assert_eq!(err.path().to_string(), r#"$["bad"]"#);
    }

    #[test]
    fn json_null_is_absent() {
        assert_eq!(render(&Value::Null).unwrap(), Value::Null);
        let wrapped = Some(json!({"k": [1, 2]}));
        assert_eq!(render(&wrapped).unwrap(), json!({"k": [1, 2]}));
    }

    #[test]
    fn json_null_members_are_dropped_at_every_depth() {
        let value = json!({"a": null, "b": {"c": null, "d": 1}, "e": [null, {"f": null}]});
        assert_eq!(
            render(&value).unwrap(),
            json!({"b": {"d": 1}, "e": [null, {}]})
        );
    }

    #[test]
    fn ip_addresses_render_as_strings() {
        let addr: IpAddr = "10.0.0.1".parse().unwrap();
        assert_eq!(render(&addr).unwrap(), json!("10.0.0.1"));
    }
}
