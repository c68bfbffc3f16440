//! Result ordering.
//!
//! Provides [`Direction`], [`OrderEntry`], and the cascading record
//! comparison used to sort query results.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::comparator::{ComparatorContext, NullOrdering};
use crate::error::Result;
use crate::op::Op;
use crate::record::Record;
use crate::registry::ComparatorRegistry;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl Direction {
    pub fn is_asc(self) -> bool {
        matches!(self, Direction::Asc)
    }

    pub fn is_desc(self) -> bool {
        matches!(self, Direction::Desc)
    }

    /// Applies this direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One link of a cascading sort: a field and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderEntry {
    /// The field to sort by.
    pub key: String,
    /// The sort direction.
    #[serde(default)]
    pub direction: Direction,
}

impl OrderEntry {
    pub fn new(key: impl Into<String>, direction: Direction) -> Self {
        OrderEntry {
            key: key.into(),
            direction,
        }
    }

    /// Ascending order on `key`.
    pub fn asc(key: impl Into<String>) -> Self {
        OrderEntry::new(key, Direction::Asc)
    }

    /// Descending order on `key`.
    pub fn desc(key: impl Into<String>) -> Self {
        OrderEntry::new(key, Direction::Desc)
    }
}

/// Compares two records by walking `order` left to right.
///
/// Each entry resolves the field's comparator from `registry` with
/// [`NullOrdering::First`], whatever the filter-time policy, so empty values
/// sort first ascending and last descending. The first entry whose values
/// differ decides; if every entry ties, the records are equal.
///
/// Errors come only from custom comparators rejecting an operand.
pub fn compare_by_order<R: Record + ?Sized>(
    a: &R,
    b: &R,
    order: &[OrderEntry],
    registry: &ComparatorRegistry,
) -> Result<Ordering> {
    for entry in order {
        let comparator =
            registry.resolve(ComparatorContext::new(&entry.key, NullOrdering::First));
        let left = a.field(&entry.key);
        let right = b.field(&entry.key);

        if comparator.compare(&left, Op::Eq, &right)? {
            continue;
        }
        let ascending = if comparator.compare(&left, Op::Gt, &right)? {
            Ordering::Greater
        } else {
            Ordering::Less
        };
        return Ok(entry.direction.apply(ascending));
    }
    Ok(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use serde_json::json;

    #[test]
    fn direction_apply() {
        assert_eq!(Direction::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Direction::Asc.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(Direction::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Direction::Desc.apply(Ordering::Greater), Ordering::Less);
        assert_eq!(Direction::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn direction_display_and_serde() {
        assert_eq!(Direction::Desc.to_string(), "desc");
        assert!(Direction::default().is_asc());
        let d: Direction = serde_json::from_str("\"desc\"").unwrap();
        assert!(d.is_desc());
        assert!(serde_json::from_str::<Direction>("\"DESC\"").is_err());
    }

    #[test]
    fn order_entry_serde() {
        let entry: OrderEntry =
            serde_json::from_value(json!({"key": "title", "direction": "desc"})).unwrap();
        assert_eq!(entry, OrderEntry::desc("title"));
        let entry: OrderEntry = serde_json::from_value(json!({"key": "title"})).unwrap();
        assert_eq!(entry, OrderEntry::asc("title"));
    }

    #[test]
    fn empty_sorts_first_ascending() {
        let registry = ComparatorRegistry::new();
        let titled = json!({"title": "a"});
        let untitled = json!({});
        let asc = [OrderEntry::asc("title")];
        let desc = [OrderEntry::desc("title")];

        assert_eq!(
            compare_by_order(&untitled, &titled, &asc, &registry).unwrap(),
            Ordering::Less
        );
        assert_eq!(
            compare_by_order(&untitled, &titled, &desc, &registry).unwrap(),
            Ordering::Greater
        );
        assert_eq!(
            compare_by_order(&untitled, &untitled, &asc, &registry).unwrap(),
            Ordering::Equal
        );
    }

    #[test]
    fn later_entries_break_ties() {
        let registry = ComparatorRegistry::new();
        let order = [OrderEntry::asc("title"), OrderEntry::desc("n")];
        let a = json!({"title": "x", "n": 1});
        let b = json!({"title": "x", "n": 2});
        let c = json!({"title": "w", "n": 9});

        assert_eq!(compare_by_order(&a, &b, &order, &registry).unwrap(), Ordering::Greater);
        assert_eq!(compare_by_order(&c, &a, &order, &registry).unwrap(), Ordering::Less);
        assert_eq!(compare_by_order(&a, &a, &order, &registry).unwrap(), Ordering::Equal);
        assert_eq!(compare_by_order(&a, &b, &[], &registry).unwrap(), Ordering::Equal);
    }

    #[test]
    fn uses_registered_comparators() {
        let registry = ComparatorRegistry::new().with_dates("createdAt");
        let order = [OrderEntry::asc("createdAt")];
        let early = json!({"createdAt": "Sat Apr 9 2021"});
        let late = json!({"createdAt": "2021-04-09T22:28:29.954Z"});
        // Lexicographically "S" > "2"; as dates the order is reversed.
        assert!(Value::from("Sat") > Value::from("2021"));
        assert_eq!(
            compare_by_order(&early, &late, &order, &registry).unwrap(),
            Ordering::Less
        );

        let broken = json!({"createdAt": "someday"});
        assert!(compare_by_order(&broken, &late, &order, &registry).is_err());
    }
}
