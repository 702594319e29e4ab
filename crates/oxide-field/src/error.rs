//! Error types for field and predicate construction.

use thiserror::Error;

use crate::operator::{Operator, OperatorClass};

/// Errors raised while building fields or predicates.
///
/// All of these are construction-time failures; a predicate that was built
/// successfully never fails later.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The operator does not belong to the construction path that was used.
    #[error("operator {operator} cannot build a {expected} predicate")]
    InvalidOperator {
        /// The rejected operator.
        operator: Operator,
        /// The operator class the construction path requires.
        expected: OperatorClass,
    },

    /// A logical operator received the wrong number of operands.
    #[error("operator {operator} takes {expected} operand(s), got {found}")]
    InvalidOperandCount {
        /// The logical operator.
        operator: Operator,
        /// Number of operands the operator accepts.
        expected: usize,
        /// Number of operands supplied.
        found: usize,
    },

    /// A name was empty.
    #[error("name must not be empty")]
    EmptyName,
}

impl FieldError {
    /// Returns true for the errors that reject an operator, including a
    /// logical operator used with the wrong arity.
    #[must_use]
    pub const fn is_invalid_operator(&self) -> bool {
        matches!(
            self,
            Self::InvalidOperator { .. } | Self::InvalidOperandCount { .. }
        )
    }
}

/// Result type alias for field operations.
pub type Result<T> = std::result::Result<T, FieldError>;
