//! Predicate evaluation against a single record.

use tracing::trace;

use crate::comparator::{ComparatorContext, NullOrdering};
use crate::error::{QueryError, Result};
use crate::predicate::{Condition, Predicate};
use crate::record::Record;
use crate::registry::ComparatorRegistry;

/// Evaluates predicate trees with a registry and a null-ordering policy.
///
/// Usually reached through [`QueryEngine::matches`](crate::QueryEngine::matches).
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'r> {
    registry: &'r ComparatorRegistry,
    null_ordering: NullOrdering,
}

impl<'r> Matcher<'r> {
    pub fn new(registry: &'r ComparatorRegistry, null_ordering: NullOrdering) -> Self {
        Matcher {
            registry,
            null_ordering,
        }
    }

    pub fn null_ordering(&self) -> NullOrdering {
        self.null_ordering
    }

    /// Returns whether `record` satisfies `predicate`.
    ///
    /// An [`InvalidNullComparison`](QueryError::InvalidNullComparison)
    /// anywhere in the tree makes the whole predicate a non-match, even
    /// beneath a `_not`. Every other error is returned.
    pub fn matches<R: Record + ?Sized>(&self, record: &R, predicate: &Predicate) -> Result<bool> {
        match self.eval(record, predicate) {
            Err(QueryError::InvalidNullComparison { field, op }) => {
                trace!(%field, %op, "null comparison excludes record");
                Ok(false)
            }
            outcome => outcome,
        }
    }

    fn eval<R: Record + ?Sized>(&self, record: &R, predicate: &Predicate) -> Result<bool> {
        match predicate {
            Predicate::Leaf(condition) => self.eval_leaf(record, condition),
            Predicate::And(predicates) => {
                for p in predicates {
                    if !self.eval(record, p)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Predicate::Or(predicates) => {
                for p in predicates {
                    if self.eval(record, p)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Predicate::Not(inner) => Ok(!self.eval(record, inner)?),
            Predicate::Empty => Ok(true),
        }
    }

    fn eval_leaf<R: Record + ?Sized>(&self, record: &R, condition: &Condition) -> Result<bool> {
        let comparator = self
            .registry
            .resolve(ComparatorContext::new(&condition.key, self.null_ordering));
        comparator.compare(&record.field(&condition.key), condition.op, &condition.value)
    }
}
