//! Runtime value types for field comparison.
//!
//! The [`Value`] enum is the dynamically typed value of a record field or of
//! a predicate operand. Record values usually borrow from the record; operands
//! stored in a [`Predicate`](crate::Predicate) are [`OwnedValue`]s.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Runtime value for comparison.
///
/// Absent, null and undefined fields all collapse into [`Value::Empty`].
///
/// Equality and ordering on `Value` are the *default* comparison semantics:
/// values of different kinds are never equal, numbers compare numerically
/// across representations, and everything else uses its natural order. See
/// [`Value::natural_cmp`].
///
/// # Example
///
/// ```
/// use sift::{Value, Number};
///
/// assert_eq!(Value::from(1u8), Value::Number(Number::F64(1.0)));
/// assert_ne!(Value::from(1), Value::from("1"));
/// assert!(Value::from("a") < Value::from("b"));
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value<'a> {
    /// Field not present, null, or undefined.
    #[default]
    Empty,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// String value, borrowed from the record or owned by a predicate.
    String(Cow<'a, str>),
    /// Timestamp value (milliseconds since Unix epoch).
    Timestamp(Timestamp),
    /// Ordered sequence of values.
    Sequence(Vec<Value<'a>>),
    /// Structured object keyed by field name.
    Composite(BTreeMap<Cow<'a, str>, Value<'a>>),
}

/// A value that owns all of its data.
pub type OwnedValue = Value<'static>;

/// Coarse classification of a [`Value`], used for cross-kind ordering and
/// in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    Empty,
    Bool,
    Number,
    String,
    Timestamp,
    Sequence,
    Composite,
}

impl ValueKind {
    /// Returns the display name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Empty => "empty",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Timestamp => "timestamp",
            ValueKind::Sequence => "sequence",
            ValueKind::Composite => "composite",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'a> Value<'a> {
    /// Returns `true` if this is the empty value.
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Empty => ValueKind::Empty,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Timestamp(_) => ValueKind::Timestamp,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Composite(_) => ValueKind::Composite,
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the timestamp value, if present.
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the sequence elements, if present.
    pub fn as_sequence(&self) -> Option<&[Value<'a>]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Converts into a value that owns all of its data.
    pub fn into_owned(self) -> OwnedValue {
        match self {
            Value::Empty => Value::Empty,
            Value::Bool(b) => Value::Bool(b),
            Value::Number(n) => Value::Number(n),
            Value::String(s) => Value::String(Cow::Owned(s.into_owned())),
            Value::Timestamp(t) => Value::Timestamp(t),
            Value::Sequence(items) => {
                Value::Sequence(items.into_iter().map(Value::into_owned).collect())
            }
            Value::Composite(fields) => Value::Composite(
                fields
                    .into_iter()
                    .map(|(k, v)| (Cow::Owned(k.into_owned()), v.into_owned()))
                    .collect(),
            ),
        }
    }

    /// Borrows this value with a shorter lifetime without copying strings.
    pub fn reborrow(&self) -> Value<'_> {
        match self {
            Value::Empty => Value::Empty,
            Value::Bool(b) => Value::Bool(*b),
            Value::Number(n) => Value::Number(*n),
            Value::String(s) => Value::String(Cow::Borrowed(s)),
            Value::Timestamp(t) => Value::Timestamp(*t),
            Value::Sequence(items) => Value::Sequence(items.iter().map(Value::reborrow).collect()),
            Value::Composite(fields) => Value::Composite(
                fields
                    .iter()
                    .map(|(k, v)| (Cow::Borrowed(&**k), v.reborrow()))
                    .collect(),
            ),
        }
    }

    /// Total order over all values.
    ///
    /// Different kinds rank by [`ValueKind`] (`Empty` lowest). Within a kind:
    /// numbers compare numerically with `NaN` above every other number,
    /// strings compare by bytes, sequences and composites compare
    /// lexicographically. `natural_cmp` returns `Equal` exactly when the
    /// values are equal under `==`.
    pub fn natural_cmp(&self, other: &Value<'_>) -> Ordering {
        match (self, other) {
            (Value::Empty, Value::Empty) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => (**a).cmp(&**b),
            (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
            (Value::Sequence(a), Value::Sequence(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    match x.natural_cmp(y) {
                        Ordering::Equal => continue,
                        other => return other,
                    }
                }
                a.len().cmp(&b.len())
            }
            (Value::Composite(a), Value::Composite(b)) => {
                for ((ka, va), (kb, vb)) in a.iter().zip(b.iter()) {
                    match (**ka).cmp(&**kb) {
                        Ordering::Equal => {}
                        other => return other,
                    }
                    match va.natural_cmp(vb) {
                        Ordering::Equal => {}
                        other => return other,
                    }
                }
                a.len().cmp(&b.len())
            }
            _ => self.kind().cmp(&other.kind()),
        }
    }
}

impl PartialEq<Value<'_>> for Value<'_> {
    fn eq(&self, other: &Value<'_>) -> bool {
        self.natural_cmp(other) == Ordering::Equal
    }
}

impl Eq for Value<'_> {}

impl PartialOrd<Value<'_>> for Value<'_> {
    fn partial_cmp(&self, other: &Value<'_>) -> Option<Ordering> {
        Some(self.natural_cmp(other))
    }
}

impl Ord for Value<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.natural_cmp(other)
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => f.write_str("empty"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Timestamp(t) => write!(f, "{}ms", t.as_millis()),
            Value::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Composite(fields) => {
                f.write_str("{")?;
                for (i, (k, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// Comparisons are exact across all three representations, so an integer
/// above 2^53 never ties with a nearby float. `NaN` equals itself and sorts
/// above every other number so that the order stays total.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns the value as `i64` if it is integral and in range.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Number::I64(n) => Some(n),
            Number::U64(n) => i64::try_from(n).ok(),
            Number::F64(n) if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 => {
                Some(n as i64)
            }
            Number::F64(_) => None,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Ordering {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => a.cmp(&b),
            (Number::U64(a), Number::U64(b)) => a.cmp(&b),
            (Number::I64(a), Number::U64(b)) => i128::from(a).cmp(&i128::from(b)),
            (Number::U64(a), Number::I64(b)) => i128::from(a).cmp(&i128::from(b)),
            (Number::F64(a), Number::F64(b)) => compare_f64(a, b),
            (Number::I64(a), Number::F64(b)) => compare_int_float(i128::from(a), b),
            (Number::U64(a), Number::F64(b)) => compare_int_float(i128::from(a), b),
            (Number::F64(a), Number::I64(b)) => compare_int_float(i128::from(b), a).reverse(),
            (Number::F64(a), Number::U64(b)) => compare_int_float(i128::from(b), a).reverse(),
        }
    }
}

// Bounds of the integer range covered by `I64` and `U64`; both are exact in f64.
const INT_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
const INT_END_F64: f64 = 18_446_744_073_709_551_616.0;

/// Compares an integer with a float without rounding the integer.
fn compare_int_float(int: i128, float: f64) -> Ordering {
    if float.is_nan() || float >= INT_END_F64 {
        return Ordering::Less;
    }
    if float < INT_MIN_F64 {
        return Ordering::Greater;
    }
    let floor = float.floor();
    match int.cmp(&(floor as i128)) {
        Ordering::Equal if float != floor => Ordering::Less,
        ordering => ordering,
    }
}

fn compare_f64(a: f64, b: f64) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ordering) => ordering,
        None => a.is_nan().cmp(&b.is_nan()),
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.compare(*other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(*other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),*) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }

            impl From<$source> for Value<'_> {
                fn from(n: $source) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Timestamp value represented as milliseconds since Unix epoch.
///
/// This provides a simple, timezone-agnostic representation suitable
/// for comparison operations. The
/// [`DateComparator`](crate::DateComparator) produces timestamps from
/// string-encoded dates.
///
/// # Example
///
/// ```
/// use sift::Timestamp;
///
/// assert!(Timestamp(1000) < Timestamp(2000));
/// assert_eq!(Timestamp::from_secs(2).as_millis(), 2000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a new timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Creates a new timestamp from seconds since Unix epoch.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1000))
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Returns the timestamp as seconds since Unix epoch.
    pub fn as_secs(self) -> i64 {
        self.0 / 1000
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

impl<Tz: chrono::TimeZone> From<chrono::DateTime<Tz>> for Timestamp {
    fn from(dt: chrono::DateTime<Tz>) -> Self {
        Timestamp(dt.timestamp_millis())
    }
}

// Conversions into Value

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value<'_> {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::String(Cow::Borrowed(s))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::String(Cow::Owned(s))
    }
}

impl From<Timestamp> for Value<'_> {
    fn from(t: Timestamp) -> Self {
        Value::Timestamp(t)
    }
}

impl<'a, T: Into<Value<'a>>> From<Option<T>> for Value<'a> {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Empty, Into::into)
    }
}

impl<'a, T: Into<Value<'a>>> From<Vec<T>> for Value<'a> {
    fn from(v: Vec<T>) -> Self {
        Value::Sequence(v.into_iter().map(Into::into).collect())
    }
}

impl<'a> From<&'a serde_json::Value> for Value<'a> {
    fn from(json: &'a serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Empty,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(Number::from(n)),
            serde_json::Value::String(s) => Value::String(Cow::Borrowed(s)),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Composite(
                fields
                    .iter()
                    .map(|(k, v)| (Cow::Borrowed(k.as_str()), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::I64(i)
        } else if let Some(u) = n.as_u64() {
            Number::U64(u)
        } else {
            Number::F64(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

// Serde

impl Serialize for Value<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Empty => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::I64(n)) => serializer.serialize_i64(*n),
            Value::Number(Number::U64(n)) => serializer.serialize_u64(*n),
            Value::Number(Number::F64(n)) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Timestamp(t) => serializer.serialize_i64(t.as_millis()),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Composite(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(&**k, v)?;
                }
                map.end()
            }
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = OwnedValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("null, a boolean, a number, a string, a sequence or a map")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Value::Empty)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Value::Empty)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Value::Number(Number::I64(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        // Integers that fit are stored signed, as in `From<&serde_json::Number>`.
        Ok(Value::Number(
            i64::try_from(v).map_or(Number::U64(v), Number::I64),
        ))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Value::Number(Number::F64(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Value::String(Cow::Owned(v.to_string())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Value::String(Cow::Owned(v)))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<OwnedValue>()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut fields = BTreeMap::new();
        while let Some((k, v)) = map.next_entry::<String, OwnedValue>()? {
            fields.insert(Cow::Owned(k), v);
        }
        Ok(Value::Composite(fields))
    }
}

impl<'de> Deserialize<'de> for Value<'static> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_kinds() {
        assert_eq!(Value::from("test").kind(), ValueKind::String);
        assert_eq!(Value::from(42).kind(), ValueKind::Number);
        assert_eq!(Value::from(Timestamp(0)).kind(), ValueKind::Timestamp);
        assert_eq!(Value::from(true).kind(), ValueKind::Bool);
        assert_eq!(Value::from(vec![1, 2]).kind(), ValueKind::Sequence);
        assert!(Value::Empty.is_empty());
        assert!(Value::from(None::<i32>).is_empty());
    }

    #[test]
    fn value_extractors() {
        assert_eq!(Value::from("hello").as_str(), Some("hello"));
        assert_eq!(Value::from(42i64).as_number(), Some(Number::I64(42)));
        assert_eq!(
            Value::from(Timestamp(1000)).as_timestamp(),
            Some(Timestamp(1000))
        );
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(vec!["a"]).as_sequence().map(<[_]>::len), Some(1));

        assert_eq!(Value::from("test").as_number(), None);
        assert_eq!(Value::from(1).as_str(), None);
    }

    #[test]
    fn strict_equality_across_kinds() {
        assert_ne!(Value::from(1), Value::from("1"));
        assert_ne!(Value::from(0), Value::from(false));
        assert_ne!(Value::Empty, Value::from(""));
        assert_eq!(Value::from(1i64), Value::from(1u64));
        assert_eq!(Value::from(1i64), Value::from(1.0f64));
    }

    #[test]
    fn number_comparisons() {
        assert_eq!(Number::I64(5).compare(Number::I64(10)), Ordering::Less);
        assert_eq!(Number::U64(10).compare(Number::U64(5)), Ordering::Greater);
        assert_eq!(Number::I64(-1).compare(Number::U64(0)), Ordering::Less);
        assert_eq!(
            Number::U64(u64::MAX).compare(Number::I64(i64::MAX)),
            Ordering::Greater
        );
        assert_eq!(Number::I64(5).compare(Number::F64(5.0)), Ordering::Equal);
        assert_eq!(Number::U64(10).compare(Number::F64(5.5)), Ordering::Greater);
    }

    #[test]
    fn number_nan_is_total() {
        let nan = Number::F64(f64::NAN);
        assert_eq!(nan.compare(nan), Ordering::Equal);
        assert_eq!(nan.compare(Number::F64(f64::INFINITY)), Ordering::Greater);
        assert_eq!(Number::I64(i64::MAX).compare(nan), Ordering::Less);
    }

    #[test]
    fn integers_and_floats_compare_exactly() {
        let above = Number::I64(9_007_199_254_740_993);
        let float = Number::F64(9_007_199_254_740_992.0);
        let exact = Number::I64(9_007_199_254_740_992);

        assert_eq!(above.compare(float), Ordering::Greater);
        assert_eq!(float.compare(above), Ordering::Less);
        assert_eq!(float.compare(exact), Ordering::Equal);
        assert_eq!(exact.compare(above), Ordering::Less);

        assert_eq!(Number::I64(2).compare(Number::F64(2.5)), Ordering::Less);
        assert_eq!(Number::I64(-3).compare(Number::F64(-2.5)), Ordering::Less);
        assert_eq!(Number::I64(-2).compare(Number::F64(-2.5)), Ordering::Greater);
        assert_eq!(Number::I64(0).compare(Number::F64(-0.0)), Ordering::Equal);
        assert_eq!(Number::U64(u64::MAX).compare(Number::F64(1e20)), Ordering::Less);
        assert_eq!(Number::I64(i64::MIN).compare(Number::F64(-1e19)), Ordering::Greater);
        assert_eq!(
            Number::F64(f64::NEG_INFINITY).compare(Number::I64(i64::MIN)),
            Ordering::Less
        );
        assert_eq!(Number::F64(f64::NAN).compare(Number::U64(u64::MAX)), Ordering::Greater);
    }

    #[test]
    fn timestamp_from_secs_saturates() {
        assert_eq!(Timestamp::from_secs(i64::MAX).as_millis(), i64::MAX);
        assert_eq!(Timestamp::from_secs(i64::MIN).as_millis(), i64::MIN);
        assert_eq!(Timestamp::from_secs(-2).as_millis(), -2000);
    }

    #[test]
    fn number_as_i64() {
        assert_eq!(Number::F64(3.0).as_i64(), Some(3));
        assert_eq!(Number::F64(3.5).as_i64(), None);
        assert_eq!(Number::U64(u64::MAX).as_i64(), None);
    }

    #[test]
    fn cross_kind_ordering_is_by_kind() {
        assert!(Value::from(true) < Value::from(0));
        assert!(Value::from(100) < Value::from("0"));
        assert!(Value::from("zzz") < Value::from(Timestamp(0)));
        assert!(Value::Empty < Value::from(false));
    }

    #[test]
    fn sequences_compare_lexicographically() {
        assert!(Value::from(vec![1, 2]) < Value::from(vec![1, 3]));
        assert!(Value::from(vec![1, 2]) < Value::from(vec![1, 2, 0]));
        assert_eq!(Value::from(vec![1, 2]), Value::from(vec![1.0, 2.0]));
    }

    #[test]
    fn into_owned_keeps_content() {
        let s = String::from("borrowed");
        let owned: OwnedValue = Value::from(s.as_str()).into_owned();
        drop(s);
        assert_eq!(owned, Value::from("borrowed"));
    }

    #[test]
    fn json_conversion_borrows() {
        let json = serde_json::json!({"a": [1, "x", null], "b": {"c": true}});
        let value = Value::from(&json);
        assert_eq!(value.kind(), ValueKind::Composite);
        assert_eq!(
            value.to_string(),
            r#"{a: [1, "x", empty], b: {c: true}}"#
        );
    }

    #[test]
    fn deserialize_and_serialize() {
        let value: OwnedValue = serde_json::from_str(r#"[1, 2.5, "s", null, {"k": false}]"#).unwrap();
        assert_eq!(
            value,
            Value::Sequence(vec![
                Value::from(1),
                Value::from(2.5),
                Value::from("s"),
                Value::Empty,
                Value::Composite(BTreeMap::from([(Cow::Borrowed("k"), Value::from(false))])),
            ])
        );
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"[1,2.5,"s",null,{"k":false}]"#
        );
    }

    #[test]
    fn timestamp_conversions() {
        assert_eq!(Timestamp::from_secs(1).as_millis(), 1000);
        assert_eq!(Timestamp::from_millis(5000).as_secs(), 5);
        assert_eq!(Timestamp::from(1500i64), Timestamp(1500));
    }
}
