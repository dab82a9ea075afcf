//! `Schematic` implementations mirroring the `Filterable` ones.
//!
//! Each type describes the shape it renders as: integers as `integer`, floats
//! as `number`, strings and characters as `string`, collections as arrays and
//! string-keyed maps as objects with `additionalProperties`. Wrappers describe
//! their contents.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    hash::BuildHasher,
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
    rc::Rc,
    sync::Arc,
};

use serde_json::Value;

use super::{
    error::SchemaError,
    node::{PrimitiveType, SchemaNode},
    walker::{SchemaWalker, Schematic},
};
use crate::walk::MapKey;

macro_rules! impl_schematic_primitive {
    ($ty:expr => $($target:ty),* $(,)?) => {
        $(
            impl Schematic for $target {
                fn structure(_walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError> {
                    Ok(SchemaNode::primitive($ty))
                }
            }
        )*
    };
}

impl_schematic_primitive!(
    PrimitiveType::Integer =>
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
);
impl_schematic_primitive!(PrimitiveType::Number => f32, f64);
impl_schematic_primitive!(PrimitiveType::Boolean => bool);
impl_schematic_primitive!(PrimitiveType::String => char, str, String, IpAddr);

impl Schematic for Ipv4Addr {
    fn structure(_walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError> {
        Ok(SchemaNode::formatted(PrimitiveType::String, "ipv4"))
    }
}

impl Schematic for Ipv6Addr {
    fn structure(_walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError> {
        Ok(SchemaNode::formatted(PrimitiveType::String, "ipv6"))
    }
}

impl Schematic for Value {
    fn structure(_walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError> {
        Ok(SchemaNode::any())
    }
}

// =============================================================================
// Wrappers
// =============================================================================

macro_rules! impl_schematic_wrapper {
    ($($wrapper:ident),* $(,)?) => {
        $(
            impl<T: Schematic + ?Sized> Schematic for $wrapper<T> {
                fn structure(walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError> {
                    walker.describe::<T>()
                }
            }
        )*
    };
}

impl_schematic_wrapper!(Box, Rc, Arc);

impl<T: Schematic> Schematic for Option<T> {
    fn structure(walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError> {
        walker.describe::<T>()
    }
}

impl<T: Schematic + ?Sized> Schematic for &T {
    fn structure(walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError> {
        walker.describe::<T>()
    }
}

impl<T> Schematic for Cow<'_, T>
where
    T: Schematic + ToOwned + ?Sized,
{
    fn structure(walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError> {
        walker.describe::<T>()
    }
}

// =============================================================================
// Sequences, sets and maps
// =============================================================================

fn array_of<T: Schematic + ?Sized>(walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError> {
    Ok(SchemaNode::array(walker.describe::<T>()?))
}

impl<T: Schematic> Schematic for [T] {
    fn structure(walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError> {
        array_of::<T>(walker)
    }
}

impl<T: Schematic, const N: usize> Schematic for [T; N] {
    fn structure(walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError> {
        array_of::<T>(walker)
    }
}

impl<T: Schematic> Schematic for Vec<T> {
    fn structure(walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError> {
        array_of::<T>(walker)
    }
}

impl<T: Schematic> Schematic for VecDeque<T> {
    fn structure(walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError> {
        array_of::<T>(walker)
    }
}

impl<T: Schematic> Schematic for BTreeSet<T> {
    fn structure(walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError> {
        array_of::<T>(walker)
    }
}

impl<T: Schematic, S: BuildHasher> Schematic for HashSet<T, S> {
    fn structure(walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError> {
        array_of::<T>(walker)
    }
}

impl<K: MapKey, V: Schematic> Schematic for BTreeMap<K, V> {
    fn structure(walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError> {
        Ok(SchemaNode::map(walker.describe::<V>()?))
    }
}

impl<K: MapKey, V: Schematic, S: BuildHasher> Schematic for HashMap<K, V, S> {
    fn structure(walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError> {
        Ok(SchemaNode::map(walker.describe::<V>()?))
    }
}

// =============================================================================
// Optional value types
// =============================================================================

#[cfg(feature = "chrono")]
impl<Tz: chrono::TimeZone> Schematic for chrono::DateTime<Tz> {
    fn structure(_walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError> {
        Ok(SchemaNode::formatted(PrimitiveType::String, "date-time"))
    }
}

#[cfg(feature = "chrono")]
impl Schematic for chrono::NaiveDate {
    fn structure(_walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError> {
        Ok(SchemaNode::formatted(PrimitiveType::String, "date"))
    }
}

#[cfg(feature = "uuid")]
impl Schematic for uuid::Uuid {
    fn structure(_walker: &mut SchemaWalker) -> Result<SchemaNode, SchemaError> {
        Ok(SchemaNode::formatted(PrimitiveType::String, "uuid"))
    }
}
