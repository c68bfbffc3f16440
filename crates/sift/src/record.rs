//! Record access.
//!
//! The engine never assumes a schema: it reads exactly the fields a query
//! names, through the [`Record`] trait. Maps keyed by field name and JSON
//! objects work out of the box; plain structs can use `#[derive(Record)]`
//! from `sift-macros` or a manual implementation.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::value::{Number, OwnedValue, Timestamp, Value};

/// A record whose fields can be looked up by name.
///
/// # Manual Implementation
///
/// ```
/// use sift::{Record, Value};
///
/// struct Task {
///     name: String,
///     priority: u8,
/// }
///
/// impl Record for Task {
///     fn field(&self, key: &str) -> Value<'_> {
///         match key {
///             "name" => Value::from(self.name.as_str()),
///             "priority" => Value::from(self.priority),
///             _ => Value::Empty,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of a field, or [`Value::Empty`] if the record has
    /// no such field.
    fn field(&self, key: &str) -> Value<'_>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, key: &str) -> Value<'_> {
        (**self).field(key)
    }
}

impl<V: ToValue> Record for BTreeMap<String, V> {
    fn field(&self, key: &str) -> Value<'_> {
        self.get(key).map_or(Value::Empty, ToValue::to_value)
    }
}

impl<V: ToValue, S: BuildHasher> Record for HashMap<String, V, S> {
    fn field(&self, key: &str) -> Value<'_> {
        self.get(key).map_or(Value::Empty, ToValue::to_value)
    }
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, key: &str) -> Value<'_> {
        self.get(key).map_or(Value::Empty, Value::from)
    }
}

impl Record for serde_json::Value {
    fn field(&self, key: &str) -> Value<'_> {
        match self {
            serde_json::Value::Object(fields) => fields.field(key),
            _ => Value::Empty,
        }
    }
}

/// Conversion of a field's Rust type into a borrowed [`Value`].
///
/// `#[derive(Record)]` calls this for every exposed field. Implement it for
/// your own types (enums, newtypes, datetime wrappers) to make them
/// queryable.
///
/// ```
/// use sift::{ToValue, Value};
///
/// enum Status { Open, Closed }
///
/// impl ToValue for Status {
///     fn to_value(&self) -> Value<'_> {
///         match self {
///             Status::Open => Value::from("open"),
///             Status::Closed => Value::from("closed"),
///         }
///     }
/// }
///
/// assert_eq!(Status::Closed.to_value(), Value::from("closed"));
/// ```
pub trait ToValue {
    /// Returns the value used for comparisons.
    fn to_value(&self) -> Value<'_>;
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value<'_> {
        Value::String(Cow::Borrowed(self))
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::String(Cow::Borrowed(self))
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl ToValue for Number {
    fn to_value(&self) -> Value<'_> {
        Value::Number(*self)
    }
}

impl ToValue for Timestamp {
    fn to_value(&self) -> Value<'_> {
        Value::Timestamp(*self)
    }
}

impl ToValue for OwnedValue {
    fn to_value(&self) -> Value<'_> {
        self.reborrow()
    }
}

impl ToValue for serde_json::Value {
    fn to_value(&self) -> Value<'_> {
        Value::from(self)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value<'_> {
        self.as_ref().map_or(Value::Empty, ToValue::to_value)
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value<'_> {
        Value::Sequence(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value<'_> {
        Value::Sequence(self.iter().map(ToValue::to_value).collect())
    }
}

macro_rules! number_to_value {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value<'_> {
                    Value::Number(Number::from(*self))
                }
            }
        )*
    };
}

number_to_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
