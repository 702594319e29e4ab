//! The closed set of predicate operators.

use std::cmp::Ordering;
use std::fmt;

/// A comparator over the result of a three-way comparison.
pub type Comparator = fn(Ordering) -> bool;

/// Which construction path an operator belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorClass {
    /// Binary comparison against a bound value.
    Comparison,
    /// Presence test; no bound value.
    Nullness,
    /// Combination of child predicates.
    Logical,
}

impl fmt::Display for OperatorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comparison => write!(f, "comparison"),
            Self::Nullness => write!(f, "nullness"),
            Self::Logical => write!(f, "logical"),
        }
    }
}

/// Predicate operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal (=)
    Equal,
    /// Not equal (!=)
    NotEqual,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessOrEqual,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterOrEqual,
    /// IS NULL
    IsNull,
    /// IS NOT NULL
    IsNotNull,
    /// AND
    And,
    /// OR
    Or,
    /// NOT
    Not,
}

impl Operator {
    /// Every operator, comparison operators first.
    pub const ALL: [Self; 11] = [
        Self::Equal,
        Self::NotEqual,
        Self::LessThan,
        Self::LessOrEqual,
        Self::GreaterThan,
        Self::GreaterOrEqual,
        Self::IsNull,
        Self::IsNotNull,
        Self::And,
        Self::Or,
        Self::Not,
    ];

    /// The binary comparison operators.
    pub const COMPARISONS: [Self; 6] = [
        Self::Equal,
        Self::NotEqual,
        Self::LessThan,
        Self::LessOrEqual,
        Self::GreaterThan,
        Self::GreaterOrEqual,
    ];

    /// Returns the construction path this operator belongs to.
    #[must_use]
    pub const fn class(self) -> OperatorClass {
        match self {
            Self::Equal
            | Self::NotEqual
            | Self::LessThan
            | Self::LessOrEqual
            | Self::GreaterThan
            | Self::GreaterOrEqual => OperatorClass::Comparison,
            Self::IsNull | Self::IsNotNull => OperatorClass::Nullness,
            Self::And | Self::Or | Self::Not => OperatorClass::Logical,
        }
    }

    /// Returns the comparator for binary comparison operators.
    ///
    /// Nullness and logical operators have none.
    #[must_use]
    pub fn comparator(self) -> Option<Comparator> {
        let comparator: Comparator = match self {
            Self::Equal => Ordering::is_eq,
            Self::NotEqual => Ordering::is_ne,
            Self::LessThan => Ordering::is_lt,
            Self::LessOrEqual => Ordering::is_le,
            Self::GreaterThan => Ordering::is_gt,
            Self::GreaterOrEqual => Ordering::is_ge,
            Self::IsNull | Self::IsNotNull | Self::And | Self::Or | Self::Not => return None,
        };
        Some(comparator)
    }

    /// Returns the upper-case name of the operator (e.g. `LESS_THAN`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Equal => "EQUAL",
            Self::NotEqual => "NOT_EQUAL",
            Self::LessThan => "LESS_THAN",
            Self::LessOrEqual => "LESS_OR_EQUAL",
            Self::GreaterThan => "GREATER_THAN",
            Self::GreaterOrEqual => "GREATER_OR_EQUAL",
            Self::IsNull => "IS_NULL",
            Self::IsNotNull => "IS_NOT_NULL",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "="),
            Self::NotEqual => write!(f, "!="),
            Self::LessThan => write!(f, "<"),
            Self::LessOrEqual => write!(f, "<="),
            Self::GreaterThan => write!(f, ">"),
            Self::GreaterOrEqual => write!(f, ">="),
            Self::IsNull => write!(f, "IS NULL"),
            Self::IsNotNull => write!(f, "IS NOT NULL"),
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
            Self::Not => write!(f, "NOT"),
        }
    }
}
