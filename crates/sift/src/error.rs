//! Error types for the sift crate.

use thiserror::Error;

use crate::op::Op;

/// Errors that can occur while evaluating predicates or ordering records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// The right-hand side of an `in` comparison is not a sequence.
    #[error("field '{field}': value {value} is not a sequence and cannot be used with 'in'")]
    InvalidOperand { field: String, value: String },

    /// An ordering comparison saw an empty operand under the `throw` null policy.
    #[error("field '{field}': cannot evaluate '{op}' against an empty value")]
    InvalidNullComparison { field: String, op: Op },

    /// A field-specific comparator rejected one of its operands.
    #[error("field '{field}': cannot evaluate '{op}' with {value}: {reason}")]
    Comparison {
        field: String,
        op: Op,
        value: String,
        reason: String,
    },
}

impl QueryError {
    /// Returns `true` for [`QueryError::InvalidNullComparison`].
    pub fn is_null_comparison(&self) -> bool {
        matches!(self, QueryError::InvalidNullComparison { .. })
    }
}

/// Result type for sift operations.
pub type Result<T> = std::result::Result<T, QueryError>;
