//! Per-field comparison semantics.
//!
//! A [`Comparator`] decides `left <op> right` for the values of one field.
//! The empty-value contract is fixed and lives in [`Comparator::compare`]:
//!
//! | operator | both empty | one empty | neither empty |
//! |----------|------------|-----------|---------------|
//! | `==` | `true` | `false` | [`Comparator::equals`] |
//! | `!=` | `false` | `true` | `!equals` |
//! | `<`, `>` | `false` | by [`NullOrdering`] | [`Comparator::less_than`], [`Comparator::greater_than`] |
//! | `<=`, `>=` | strict or `==` | strict or `==` | strict or `==` |
//! | `in` | element-wise `==` | element-wise `==` | element-wise `==` |
//!
//! Under [`NullOrdering::Throw`] every relational operator with an empty
//! operand fails with [`QueryError::InvalidNullComparison`].
//!
//! Implementations only override the three non-empty hooks; the table above
//! holds for every comparator.

mod date;

pub use date::{parse_date, DateComparator};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};
use crate::op::Op;
use crate::value::Value;

/// Where empty values rank relative to non-empty ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullOrdering {
    /// Empty sorts before every non-empty value.
    First,
    /// Empty sorts after every non-empty value.
    Last,
    /// Relational comparisons involving an empty value are errors.
    #[default]
    Throw,
}

impl NullOrdering {
    /// Returns the display name of this policy.
    pub fn as_str(self) -> &'static str {
        match self {
            NullOrdering::First => "first",
            NullOrdering::Last => "last",
            NullOrdering::Throw => "throw",
        }
    }
}

impl fmt::Display for NullOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options a comparator is constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComparatorOptions {
    pub null_ordering: NullOrdering,
}

/// The field a comparator is resolved for, and the options it must honor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparatorContext<'a> {
    /// Name of the field being compared.
    pub target: &'a str,
    pub options: ComparatorOptions,
}

impl<'a> ComparatorContext<'a> {
    /// Creates a context for `target` with the given null-ordering policy.
    pub fn new(target: &'a str, null_ordering: NullOrdering) -> Self {
        ComparatorContext {
            target,
            options: ComparatorOptions { null_ordering },
        }
    }

    /// Returns the active null-ordering policy.
    pub fn null_ordering(&self) -> NullOrdering {
        self.options.null_ordering
    }
}

/// Failure of a comparator hook on a malformed operand.
///
/// [`Comparator::compare`] turns it into [`QueryError::Comparison`], adding
/// the field name and operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperandError {
    /// Rendering of the offending value.
    pub value: String,
    /// Why the value was rejected.
    pub reason: String,
}

impl OperandError {
    pub fn new(value: &Value<'_>, reason: impl Into<String>) -> Self {
        OperandError {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result of a comparator hook.
pub type HookResult = std::result::Result<bool, OperandError>;

/// Comparison semantics for the values of one field.
///
/// The hooks are only ever called with two non-empty operands. Their
/// defaults use [`Value::natural_cmp`]: strict equality and the natural
/// order of each value kind.
///
/// # Example
///
/// A case-insensitive comparator for string fields:
///
/// ```
/// use sift::{Comparator, ComparatorContext, HookResult, NullOrdering, Op, Value};
///
/// struct CaseInsensitive<'a>(ComparatorContext<'a>);
///
/// fn fold(v: &Value<'_>) -> Option<String> {
///     v.as_str().map(str::to_lowercase)
/// }
///
/// impl Comparator for CaseInsensitive<'_> {
///     fn context(&self) -> &ComparatorContext<'_> {
///         &self.0
///     }
///
///     fn equals(&self, left: &Value<'_>, right: &Value<'_>) -> HookResult {
///         match (fold(left), fold(right)) {
///             (Some(l), Some(r)) => Ok(l == r),
///             _ => Ok(left == right),
///         }
///     }
/// }
///
/// let cmp = CaseInsensitive(ComparatorContext::new("name", NullOrdering::First));
/// assert!(cmp.compare(&Value::from("ABC"), Op::Eq, &Value::from("abc")).unwrap());
/// assert!(cmp.compare(&Value::Empty, Op::Eq, &Value::Empty).unwrap());
/// ```
pub trait Comparator {
    /// The context this comparator was constructed with.
    fn context(&self) -> &ComparatorContext<'_>;

    /// `left == right` for two non-empty values.
    fn equals(&self, left: &Value<'_>, right: &Value<'_>) -> HookResult {
        Ok(left.natural_cmp(right).is_eq())
    }

    /// `left < right` for two non-empty values.
    fn less_than(&self, left: &Value<'_>, right: &Value<'_>) -> HookResult {
        Ok(left.natural_cmp(right).is_lt())
    }

    /// `left > right` for two non-empty values.
    fn greater_than(&self, left: &Value<'_>, right: &Value<'_>) -> HookResult {
        Ok(left.natural_cmp(right).is_gt())
    }

    /// Evaluates `left <op> right`, applying the empty-value contract.
    ///
    /// Do not override this method; override the hooks instead.
    fn compare(&self, left: &Value<'_>, op: Op, right: &Value<'_>) -> Result<bool> {
        let ctx = *self.context();
        match op {
            Op::Eq => is_equal(self, ctx, left, right, op),
            Op::Ne => is_equal(self, ctx, left, right, op).map(|eq| !eq),
            Op::Lt => is_less(self, ctx, left, right, op),
            Op::Gt => is_greater(self, ctx, left, right, op),
            Op::Lte => Ok(is_less(self, ctx, left, right, op)?
                || is_equal(self, ctx, left, right, op)?),
            Op::Gte => Ok(is_greater(self, ctx, left, right, op)?
                || is_equal(self, ctx, left, right, op)?),
            Op::In => {
                let items = right.as_sequence().ok_or_else(|| QueryError::InvalidOperand {
                    field: ctx.target.to_string(),
                    value: right.to_string(),
                })?;
                for item in items {
                    if is_equal(self, ctx, left, item, op)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

fn hook_failure(ctx: ComparatorContext<'_>, op: Op, err: OperandError) -> QueryError {
    QueryError::Comparison {
        field: ctx.target.to_string(),
        op,
        value: err.value,
        reason: err.reason,
    }
}

fn is_equal<C: Comparator + ?Sized>(
    cmp: &C,
    ctx: ComparatorContext<'_>,
    left: &Value<'_>,
    right: &Value<'_>,
    op: Op,
) -> Result<bool> {
    match (left.is_empty(), right.is_empty()) {
        (true, true) => Ok(true),
        (true, false) | (false, true) => Ok(false),
        (false, false) => cmp
            .equals(left, right)
            .map_err(|e| hook_failure(ctx, op, e)),
    }
}

/// Resolves an ordering comparison with at least one empty operand.
///
/// Returns `None` when both operands are non-empty and the hook decides.
fn empty_rank(
    ctx: ComparatorContext<'_>,
    left: &Value<'_>,
    right: &Value<'_>,
    op: Op,
) -> Result<Option<std::cmp::Ordering>> {
    use std::cmp::Ordering;

    let (l, r) = (left.is_empty(), right.is_empty());
    if !l && !r {
        return Ok(None);
    }
    let empty_side = match ctx.null_ordering() {
        NullOrdering::Throw => {
            return Err(QueryError::InvalidNullComparison {
                field: ctx.target.to_string(),
                op,
            })
        }
        NullOrdering::First => Ordering::Less,
        NullOrdering::Last => Ordering::Greater,
    };
    Ok(Some(match (l, r) {
        (true, true) => Ordering::Equal,
        (true, false) => empty_side,
        _ => empty_side.reverse(),
    }))
}

fn is_less<C: Comparator + ?Sized>(
    cmp: &C,
    ctx: ComparatorContext<'_>,
    left: &Value<'_>,
    right: &Value<'_>,
    op: Op,
) -> Result<bool> {
    match empty_rank(ctx, left, right, op)? {
        Some(ordering) => Ok(ordering.is_lt()),
        None => cmp
            .less_than(left, right)
            .map_err(|e| hook_failure(ctx, op, e)),
    }
}

fn is_greater<C: Comparator + ?Sized>(
    cmp: &C,
    ctx: ComparatorContext<'_>,
    left: &Value<'_>,
    right: &Value<'_>,
    op: Op,
) -> Result<bool> {
    match empty_rank(ctx, left, right, op)? {
        Some(ordering) => Ok(ordering.is_gt()),
        None => cmp
            .greater_than(left, right)
            .map_err(|e| hook_failure(ctx, op, e)),
    }
}

/// The comparator used for fields without a registered override.
#[derive(Debug, Clone, Copy)]
pub struct DefaultComparator<'a> {
    context: ComparatorContext<'a>,
}

impl<'a> DefaultComparator<'a> {
    pub fn new(context: ComparatorContext<'a>) -> Self {
        DefaultComparator { context }
    }
}

impl Comparator for DefaultComparator<'_> {
    fn context(&self) -> &ComparatorContext<'_> {
        &self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmp(policy: NullOrdering) -> DefaultComparator<'static> {
        DefaultComparator::new(ComparatorContext::new("field", policy))
    }

    fn check(policy: NullOrdering, left: Value<'_>, op: Op, right: Value<'_>) -> Result<bool> {
        cmp(policy).compare(&left, op, &right)
    }

    #[test]
    fn equality_is_reflexive() {
        for v in [Value::from("x"), Value::from(3), Value::from(true), Value::from(2.5)] {
            assert!(check(NullOrdering::Throw, v.clone(), Op::Eq, v.clone()).unwrap());
            assert!(!check(NullOrdering::Throw, v.clone(), Op::Ne, v).unwrap());
        }
    }

    #[test]
    fn equality_is_strict() {
        assert!(!check(NullOrdering::First, Value::from(1), Op::Eq, Value::from("1")).unwrap());
        assert!(check(NullOrdering::First, Value::from(1), Op::Ne, Value::from("1")).unwrap());
    }

    #[test]
    fn empty_equals_empty_only() {
        for policy in [NullOrdering::First, NullOrdering::Last, NullOrdering::Throw] {
            assert!(check(policy, Value::Empty, Op::Eq, Value::Empty).unwrap());
            assert!(!check(policy, Value::Empty, Op::Eq, Value::from(0)).unwrap());
            assert!(!check(policy, Value::from(""), Op::Eq, Value::Empty).unwrap());
            assert!(check(policy, Value::Empty, Op::Ne, Value::from(0)).unwrap());
        }
    }

    #[test]
    fn relational_operators() {
        let p = NullOrdering::Throw;
        assert!(check(p, Value::from(2), Op::Gt, Value::from(1)).unwrap());
        assert!(!check(p, Value::from(1), Op::Gt, Value::from(1)).unwrap());
        assert!(check(p, Value::from(1), Op::Gte, Value::from(1)).unwrap());
        assert!(!check(p, Value::from(0), Op::Gte, Value::from(1)).unwrap());
        assert!(check(p, Value::from(0), Op::Lt, Value::from(1)).unwrap());
        assert!(!check(p, Value::from(1), Op::Lt, Value::from(1)).unwrap());
        assert!(check(p, Value::from(1), Op::Lte, Value::from(1)).unwrap());
        assert!(!check(p, Value::from(2), Op::Lte, Value::from(1)).unwrap());
        assert!(check(p, Value::from("a"), Op::Lt, Value::from("b")).unwrap());
    }

    #[test]
    fn nulls_first() {
        let p = NullOrdering::First;
        assert!(check(p, Value::Empty, Op::Lt, Value::from(-100)).unwrap());
        assert!(!check(p, Value::Empty, Op::Gt, Value::from(-100)).unwrap());
        assert!(check(p, Value::from("a"), Op::Gt, Value::Empty).unwrap());
        assert!(!check(p, Value::from("a"), Op::Lt, Value::Empty).unwrap());
        assert!(!check(p, Value::Empty, Op::Lt, Value::Empty).unwrap());
        assert!(!check(p, Value::Empty, Op::Gt, Value::Empty).unwrap());
        assert!(check(p, Value::Empty, Op::Lte, Value::Empty).unwrap());
        assert!(check(p, Value::Empty, Op::Lte, Value::from(1)).unwrap());
        assert!(!check(p, Value::Empty, Op::Gte, Value::from(1)).unwrap());
    }

    #[test]
    fn nulls_last() {
        let p = NullOrdering::Last;
        assert!(!check(p, Value::Empty, Op::Lt, Value::from(100)).unwrap());
        assert!(check(p, Value::Empty, Op::Gt, Value::from(100)).unwrap());
        assert!(check(p, Value::from(1), Op::Lt, Value::Empty).unwrap());
        assert!(check(p, Value::Empty, Op::Gte, Value::from(1)).unwrap());
    }

    #[test]
    fn nulls_throw_on_every_relational_operator() {
        for op in [Op::Lt, Op::Lte, Op::Gt, Op::Gte] {
            let err = check(NullOrdering::Throw, Value::Empty, op, Value::from(1)).unwrap_err();
            assert_eq!(
                err,
                QueryError::InvalidNullComparison {
                    field: "field".to_string(),
                    op,
                }
            );
            assert!(check(NullOrdering::Throw, Value::from(1), op, Value::Empty)
                .unwrap_err()
                .is_null_comparison());
            assert!(check(NullOrdering::Throw, Value::Empty, op, Value::Empty)
                .unwrap_err()
                .is_null_comparison());
        }
    }

    #[test]
    fn membership() {
        let p = NullOrdering::Throw;
        let set = Value::from(vec!["a", "b"]);
        assert!(check(p, Value::from("a"), Op::In, set.clone()).unwrap());
        assert!(!check(p, Value::from("c"), Op::In, set.clone()).unwrap());
        assert!(!check(p, Value::Empty, Op::In, set).unwrap());
        assert!(check(
            p,
            Value::Empty,
            Op::In,
            Value::Sequence(vec![Value::from(1), Value::Empty])
        )
        .unwrap());
        assert!(!check(p, Value::from(1), Op::In, Value::Sequence(vec![])).unwrap());
    }

    #[test]
    fn membership_requires_a_sequence() {
        let err = check(NullOrdering::First, Value::from("a"), Op::In, Value::from("abc")).unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidOperand {
                field: "field".to_string(),
                value: "\"abc\"".to_string(),
            }
        );
        assert!(check(NullOrdering::First, Value::from("a"), Op::In, Value::Empty).is_err());
    }

    struct Rejecting<'a>(ComparatorContext<'a>);

    impl Comparator for Rejecting<'_> {
        fn context(&self) -> &ComparatorContext<'_> {
            &self.0
        }

        fn less_than(&self, left: &Value<'_>, _right: &Value<'_>) -> HookResult {
            Err(OperandError::new(left, "not comparable"))
        }
    }

    #[test]
    fn hook_failures_carry_field_and_operator() {
        let cmp = Rejecting(ComparatorContext::new("score", NullOrdering::First));
        let err = cmp
            .compare(&Value::from(1), Op::Lte, &Value::from(2))
            .unwrap_err();
        assert_eq!(
            err,
            QueryError::Comparison {
                field: "score".to_string(),
                op: Op::Lte,
                value: "1".to_string(),
                reason: "not comparable".to_string(),
            }
        );
        // Empty handling never reaches the hook.
        assert!(cmp.compare(&Value::Empty, Op::Lt, &Value::from(2)).unwrap());
    }

    #[test]
    fn null_ordering_serde() {
        let p: NullOrdering = serde_json::from_str("\"last\"").unwrap();
        assert_eq!(p, NullOrdering::Last);
        assert_eq!(NullOrdering::default(), NullOrdering::Throw);
        assert_eq!(NullOrdering::First.to_string(), "first");
    }
}
