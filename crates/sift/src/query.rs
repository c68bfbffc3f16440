//! Normalized queries.
//!
//! A [`Query`] bundles a [`Predicate`] with an order directive and
//! pagination. It can be built fluently or deserialized from the flattened
//! JSON form, where the predicate's own keys sit next to `_orderBy`, `_skip`
//! and `_limit`:
//!
//! ```
//! use sift::{Count, OrderEntry, Predicate, Query};
//!
//! let parsed: Query = serde_json::from_str(
//!     r#"{
//!         "key": "lel", "comparator": "!=", "value": "hallo3",
//!         "_orderBy": [{"key": "lel", "direction": "desc"}],
//!         "_skip": 1,
//!         "_limit": "Infinity"
//!     }"#,
//! ).unwrap();
//!
//! let built = Query::new()
//!     .filter(Predicate::ne("lel", "hallo3"))
//!     .order_desc("lel")
//!     .skip(1)
//!     .limit(Count::Infinite)
//!     .build();
//!
//! assert_eq!(parsed, built);
//! ```

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::ordering::{Direction, OrderEntry};
use crate::predicate::Predicate;

/// A skip or limit amount.
///
/// Negative amounts are allowed and clamp to zero when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Count {
    Finite(i64),
    /// Positive infinity.
    Infinite,
}

impl Count {
    /// Returns the amount as a length, clamping negatives to zero and
    /// infinity to `usize::MAX`.
    pub fn to_usize(self) -> usize {
        match self {
            Count::Finite(n) => usize::try_from(n.max(0)).unwrap_or(usize::MAX),
            Count::Infinite => usize::MAX,
        }
    }
}

impl From<i64> for Count {
    fn from(n: i64) -> Self {
        Count::Finite(n)
    }
}

impl From<i32> for Count {
    fn from(n: i32) -> Self {
        Count::Finite(i64::from(n))
    }
}

impl From<usize> for Count {
    fn from(n: usize) -> Self {
        Count::Finite(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Count {
    /// `+inf` is [`Count::Infinite`]; anything else truncates toward zero,
    /// saturating at the `i64` bounds (`NaN` becomes 0).
    fn from(n: f64) -> Self {
        if n == f64::INFINITY {
            Count::Infinite
        } else {
            Count::Finite(n as i64)
        }
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Count::Finite(n) => write!(f, "{n}"),
            Count::Infinite => f.write_str("Infinity"),
        }
    }
}

impl Serialize for Count {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Count::Finite(n) => serializer.serialize_i64(*n),
            Count::Infinite => serializer.serialize_str("Infinity"),
        }
    }
}

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CountVisitor)
    }
}

struct CountVisitor;

impl<'de> Visitor<'de> for CountVisitor {
    type Value = Count;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer, a float, or \"Infinity\"")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Count, E> {
        Ok(Count::Finite(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Count, E> {
        Ok(Count::Finite(i64::try_from(v).unwrap_or(i64::MAX)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Count, E> {
        if v.is_nan() {
            return Err(E::invalid_value(de::Unexpected::Float(v), &self));
        }
        Ok(Count::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Count, E> {
        match v.trim().to_ascii_lowercase().as_str() {
            "infinity" | "+infinity" | "inf" | "+inf" => Ok(Count::Infinite),
            "-infinity" | "-inf" => Ok(Count::Finite(i64::MIN)),
            other => other
                .parse::<i64>()
                .map(Count::Finite)
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self)),
        }
    }
}

/// A normalized query: filter, then order, then skip, then limit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Query {
    /// Records must match this predicate. Defaults to [`Predicate::Empty`].
    #[serde(flatten)]
    pub filter: Predicate,
    /// Cascading sort, first entry most significant.
    #[serde(rename = "_orderBy", default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderEntry>,
    /// Number of leading results to drop. Absent means 0.
    #[serde(rename = "_skip", default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<Count>,
    /// Maximum number of results. Absent means unbounded.
    #[serde(rename = "_limit", default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<Count>,
}

impl Query {
    /// Creates a query that matches every record, in input order.
    pub fn new() -> Self {
        Query::default()
    }

    /// Sets the filter predicate.
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filter = predicate;
        self
    }

    /// Appends an order entry.
    pub fn order_by(mut self, key: impl Into<String>, direction: Direction) -> Self {
        self.order_by.push(OrderEntry::new(key, direction));
        self
    }

    pub fn order_asc(self, key: impl Into<String>) -> Self {
        self.order_by(key, Direction::Asc)
    }

    pub fn order_desc(self, key: impl Into<String>) -> Self {
        self.order_by(key, Direction::Desc)
    }

    pub fn skip(mut self, n: impl Into<Count>) -> Self {
        self.skip = Some(n.into());
        self
    }

    pub fn limit(mut self, n: impl Into<Count>) -> Self {
        self.limit = Some(n.into());
        self
    }

    /// Finishes the builder chain.
    pub fn build(self) -> Self {
        self
    }

    /// Number of results to drop after ordering.
    pub fn skip_len(&self) -> usize {
        self.skip.map_or(0, Count::to_usize)
    }

    /// Number of results to keep after skipping.
    pub fn limit_len(&self) -> usize {
        self.limit.map_or(usize::MAX, Count::to_usize)
    }

    /// Returns `true` if the query neither filters, orders, nor paginates.
    pub fn is_empty(&self) -> bool {
        self.filter.is_empty()
            && self.order_by.is_empty()
            && self.skip.is_none()
            && self.limit.is_none()
    }
}

impl From<Predicate> for Query {
    fn from(filter: Predicate) -> Self {
        Query::new().filter(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn count(value: serde_json::Value) -> Result<Count, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn count_clamps() {
        assert_eq!(Count::Finite(-1).to_usize(), 0);
        assert_eq!(Count::Finite(0).to_usize(), 0);
        assert_eq!(Count::Finite(7).to_usize(), 7);
        assert_eq!(Count::Infinite.to_usize(), usize::MAX);
        assert_eq!(Count::from(f64::NEG_INFINITY).to_usize(), 0);
    }

    #[test]
    fn count_deserializes_numbers_and_infinity() {
        assert_eq!(count(json!(3)).unwrap(), Count::Finite(3));
        assert_eq!(count(json!(-1)).unwrap(), Count::Finite(-1));
        assert_eq!(count(json!(2.9)).unwrap(), Count::Finite(2));
        assert_eq!(count(json!(u64::MAX)).unwrap(), Count::Finite(i64::MAX));
        assert_eq!(count(json!("Infinity")).unwrap(), Count::Infinite);
        assert_eq!(count(json!("inf")).unwrap(), Count::Infinite);
        assert_eq!(count(json!("-Infinity")).unwrap(), Count::Finite(i64::MIN));
        assert_eq!(count(json!("12")).unwrap(), Count::Finite(12));
        assert!(count(json!("lots")).is_err());
        assert!(count(json!(true)).is_err());
    }

    #[test]
    fn count_serializes() {
        assert_eq!(serde_json::to_value(Count::Finite(4)).unwrap(), json!(4));
        assert_eq!(serde_json::to_value(Count::Infinite).unwrap(), json!("Infinity"));
        assert_eq!(Count::Infinite.to_string(), "Infinity");
    }

    #[test]
    fn builder_collects_directives() {
        let query = Query::new()
            .filter(Predicate::eq("a", 1))
            .order_asc("a")
            .order_desc("b")
            .skip(2)
            .limit(-1)
            .build();
        assert_eq!(
            query.order_by,
            vec![OrderEntry::asc("a"), OrderEntry::desc("b")]
        );
        assert_eq!(query.skip_len(), 2);
        assert_eq!(query.limit_len(), 0);
        assert!(!query.is_empty());
    }

    #[test]
    fn defaults_are_unbounded() {
        let query = Query::new();
        assert!(query.is_empty());
        assert_eq!(query.skip_len(), 0);
        assert_eq!(query.limit_len(), usize::MAX);
    }

    #[test]
    fn deserializes_flattened_form() {
        let query: Query = serde_json::from_value(json!({
            "_and": [{"key": "n", "comparator": ">", "value": 1}],
            "_limit": 2
        }))
        .unwrap();
        assert_eq!(query.filter, Predicate::and(vec![Predicate::gt("n", 1)]));
        assert_eq!(query.limit, Some(Count::Finite(2)));
        assert_eq!(query.skip, None);

        let query: Query = serde_json::from_value(json!({"_skip": null})).unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn serializes_flattened_form() {
        let query = Query::from(Predicate::ne("lel", "hallo3")).limit(1);
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"key": "lel", "comparator": "!=", "value": "hallo3", "_limit": 1})
        );
    }
}
