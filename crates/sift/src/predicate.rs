//! Predicate trees.
//!
//! A [`Predicate`] is a boolean expression over field comparisons. Each node
//! is exactly one of a leaf [`Condition`], a conjunction, a disjunction, a
//! negation, or the empty predicate that matches everything.

use serde::{Deserialize, Serialize};

use crate::op::Op;
use crate::value::{OwnedValue, Value};

/// A single leaf comparison: `record[key] <op> value`.
///
/// # Example
///
/// ```
/// use sift::{Condition, Op};
///
/// let condition = Condition::new("lel", Op::Ne, "hallo3");
/// assert_eq!(condition.to_string(), r#"lel != "hallo3""#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// The field name to compare.
    pub key: String,
    /// The comparison operator.
    #[serde(rename = "comparator")]
    pub op: Op,
    /// The right-hand operand.
    #[serde(default)]
    pub value: OwnedValue,
}

impl Condition {
    /// Creates a new condition.
    pub fn new<'v>(key: impl Into<String>, op: Op, value: impl Into<Value<'v>>) -> Self {
        Condition {
            key: key.into(),
            op,
            value: value.into().into_owned(),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.key, self.op, self.value)
    }
}

/// A normalized predicate tree.
///
/// Deserializes from (and serializes to) the normalized object form:
///
/// ```text
/// { "key": "age", "comparator": ">=", "value": 18 }
/// { "_and": [ ... ] }
/// { "_or": [ ... ] }
/// { "_not": { ... } }
/// { }
/// ```
///
/// A node that carries more than one of these shapes is rejected.
///
/// # Example
///
/// ```
/// use sift::Predicate;
///
/// let predicate = Predicate::and(vec![
///     Predicate::eq("bool", true),
///     Predicate::or(vec![
///         Predicate::eq("str", "approved"),
///         Predicate::gt("num", 0),
///     ]),
/// ]);
///
/// let parsed: Predicate = serde_json::from_str(
///     r#"{"_and": [
///         {"key": "bool", "comparator": "==", "value": true},
///         {"_or": [
///             {"key": "str", "comparator": "==", "value": "approved"},
///             {"key": "num", "comparator": ">", "value": 0}
///         ]}
///     ]}"#,
/// ).unwrap();
/// assert_eq!(parsed, predicate);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawPredicate", into = "RawPredicate")]
pub enum Predicate {
    /// Compare one field against a value.
    Leaf(Condition),
    /// Every subpredicate must match. An empty list matches everything.
    And(Vec<Predicate>),
    /// At least one subpredicate must match. An empty list matches nothing.
    Or(Vec<Predicate>),
    /// The subpredicate must not match.
    Not(Box<Predicate>),
    /// Matches unconditionally.
    #[default]
    Empty,
}

impl Predicate {
    /// Creates a leaf predicate.
    pub fn leaf<'v>(key: impl Into<String>, op: Op, value: impl Into<Value<'v>>) -> Self {
        Predicate::Leaf(Condition::new(key, op, value))
    }

    /// `key == value`
    pub fn eq<'v>(key: impl Into<String>, value: impl Into<Value<'v>>) -> Self {
        Predicate::leaf(key, Op::Eq, value)
    }

    /// `key != value`
    pub fn ne<'v>(key: impl Into<String>, value: impl Into<Value<'v>>) -> Self {
        Predicate::leaf(key, Op::Ne, value)
    }

    /// `key < value`
    pub fn lt<'v>(key: impl Into<String>, value: impl Into<Value<'v>>) -> Self {
        Predicate::leaf(key, Op::Lt, value)
    }

    /// `key <= value`
    pub fn lte<'v>(key: impl Into<String>, value: impl Into<Value<'v>>) -> Self {
        Predicate::leaf(key, Op::Lte, value)
    }

    /// `key > value`
    pub fn gt<'v>(key: impl Into<String>, value: impl Into<Value<'v>>) -> Self {
        Predicate::leaf(key, Op::Gt, value)
    }

    /// `key >= value`
    pub fn gte<'v>(key: impl Into<String>, value: impl Into<Value<'v>>) -> Self {
        Predicate::leaf(key, Op::Gte, value)
    }

    /// `key in values`
    pub fn is_in<'v, V: Into<Value<'v>>>(
        key: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values: Vec<Value<'v>> = values.into_iter().map(Into::into).collect();
        Predicate::leaf(key, Op::In, Value::Sequence(values))
    }

    /// Conjunction of `predicates`.
    pub fn and(predicates: Vec<Predicate>) -> Self {
        Predicate::And(predicates)
    }

    /// Disjunction of `predicates`.
    pub fn or(predicates: Vec<Predicate>) -> Self {
        Predicate::Or(predicates)
    }

    /// Negation of `predicate`.
    #[allow(clippy::should_implement_trait)]
    pub fn not(predicate: Predicate) -> Self {
        Predicate::Not(Box::new(predicate))
    }

    /// Returns `true` for the unconditional predicate.
    pub fn is_empty(&self) -> bool {
        matches!(self, Predicate::Empty)
    }
}

/// Wire form of a predicate node: every shape's fields, all optional.
#[derive(Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPredicate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comparator: Option<Op>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<OwnedValue>,
    #[serde(rename = "_and", default, skip_serializing_if = "Option::is_none")]
    and: Option<Vec<Predicate>>,
    #[serde(rename = "_or", default, skip_serializing_if = "Option::is_none")]
    or: Option<Vec<Predicate>>,
    #[serde(rename = "_not", default, skip_serializing_if = "Option::is_none")]
    not: Option<Box<Predicate>>,
}

impl TryFrom<RawPredicate> for Predicate {
    type Error = String;

    fn try_from(raw: RawPredicate) -> Result<Self, Self::Error> {
        let shapes = [
            raw.key.is_some(),
            raw.and.is_some(),
            raw.or.is_some(),
            raw.not.is_some(),
        ];
        if shapes.iter().filter(|present| **present).count() > 1 {
            return Err(
                "a predicate node must contain only one of key, _and, _or, _not".to_string(),
            );
        }

        if let Some(key) = raw.key {
            let op = raw
                .comparator
                .ok_or_else(|| format!("predicate on '{key}' is missing its comparator"))?;
            return Ok(Predicate::Leaf(Condition {
                key,
                op,
                value: raw.value.unwrap_or_default(),
            }));
        }
        if raw.comparator.is_some() || raw.value.is_some() {
            return Err("comparator and value require a key".to_string());
        }
        if let Some(and) = raw.and {
            return Ok(Predicate::And(and));
        }
        if let Some(or) = raw.or {
            return Ok(Predicate::Or(or));
        }
        if let Some(not) = raw.not {
            return Ok(Predicate::Not(not));
        }
        Ok(Predicate::Empty)
    }
}

impl From<Predicate> for RawPredicate {
    fn from(predicate: Predicate) -> Self {
        match predicate {
            Predicate::Leaf(condition) => RawPredicate {
                key: Some(condition.key),
                comparator: Some(condition.op),
                value: Some(condition.value),
                ..RawPredicate::default()
            },
            Predicate::And(predicates) => RawPredicate {
                and: Some(predicates),
                ..RawPredicate::default()
            },
            Predicate::Or(predicates) => RawPredicate {
                or: Some(predicates),
                ..RawPredicate::default()
            },
            Predicate::Not(predicate) => RawPredicate {
                not: Some(predicate),
                ..RawPredicate::default()
            },
            Predicate::Empty => RawPredicate::default(),
        }
    }
}
