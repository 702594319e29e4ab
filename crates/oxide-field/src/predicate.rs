//! Evaluatable, introspectable predicates.
//!
//! A [`PredicateBuilder`] binds a field, an operator and an optional value.
//! It can test an entity in memory ([`PredicateBuilder::evaluate`]) and hand
//! back exactly what was bound ([`PredicateBuilder::describe`]) so a query
//! translator never has to infer intent from evaluation behavior.
//!
//! Builders over different value types are combined through [`Predicate`],
//! which erases the value type and adds AND/OR/NOT.
//!
//! # Example
//!
//! ```
//! use oxide_field::{FieldIdentifier, FieldMetadata, Operator, Predicate, PredicateBuilder};
//!
//! struct User {
//!     id: i64,
//!     name: Option<String>,
//! }
//!
//! let id = FieldMetadata::required(FieldIdentifier::new("users", "id").unwrap(), |u: &User| u.id);
//! let name = FieldMetadata::optional(
//!     FieldIdentifier::new("users", "name").unwrap(),
//!     |u: &User| u.name.clone(),
//! );
//!
//! let adult = PredicateBuilder::comparison(id, Operator::GreaterThan, 10).unwrap();
//! assert!(adult.evaluate(&User { id: 15, name: None }));
//!
//! let filter: Predicate<User> = adult.and(name.is_null());
//! assert!(filter.evaluate(&User { id: 11, name: None }));
//! assert!(!filter.evaluate(&User { id: 11, name: Some("ann".into()) }));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::error::{FieldError, Result};
use crate::field::FieldMetadata;
use crate::naming::FieldIdentifier;
use crate::operator::{Operator, OperatorClass};
use crate::value::{FieldValue, SqlValue};

/// The structural triple bound in a [`PredicateBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct Description<V> {
    /// Field identity.
    pub field: FieldIdentifier,
    /// Bound operator.
    pub operator: Operator,
    /// Bound comparison value; `None` for nullness operators.
    pub value: Option<V>,
}

/// An immutable (field, operator, optional value) condition.
pub struct PredicateBuilder<E, V> {
    field: FieldMetadata<E, V>,
    operator: Operator,
    value: Option<V>,
}

impl<E: 'static, V: FieldValue> PredicateBuilder<E, V> {
    /// Binds a binary comparison.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidOperator`] unless `operator` is one of
    /// the six comparison operators.
    pub fn comparison(field: FieldMetadata<E, V>, operator: Operator, value: V) -> Result<Self> {
        require_class(operator, OperatorClass::Comparison)?;
        Ok(Self::bind(field, operator, Some(value)))
    }

    /// Binds a nullness test.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidOperator`] unless `operator` is
    /// `IsNull` or `IsNotNull`.
    pub fn nullness(field: FieldMetadata<E, V>, operator: Operator) -> Result<Self> {
        require_class(operator, OperatorClass::Nullness)?;
        Ok(Self::bind(field, operator, None))
    }

    /// Constructs without validation; callers guarantee operator/arity agree.
    pub(crate) const fn bind(
        field: FieldMetadata<E, V>,
        operator: Operator,
        value: Option<V>,
    ) -> Self {
        Self {
            field,
            operator,
            value,
        }
    }

    /// Tests an entity.
    ///
    /// Comparisons against an absent field value are false for every
    /// comparison operator, matching SQL NULL semantics.
    pub fn evaluate(&self, entity: &E) -> bool {
        let actual = self.field.get(entity);
        match self.operator {
            Operator::IsNull => actual.is_none(),
            Operator::IsNotNull => actual.is_some(),
            _ => match (actual, &self.value) {
                (Some(actual), Some(bound)) => self.test(actual.compare(bound)),
                _ => false,
            },
        }
    }

    /// Applies the operator's comparator to a three-way comparison result.
    #[must_use]
    pub fn test(&self, ordering: Ordering) -> bool {
        self.operator
            .comparator()
            .is_some_and(|comparator| comparator(ordering))
    }

    /// Returns the bound triple unchanged.
    #[must_use]
    pub fn describe(&self) -> Description<V> {
        Description {
            field: self.field.identifier().clone(),
            operator: self.operator,
            value: self.value.clone(),
        }
    }

    /// Combines with another predicate using AND.
    #[must_use]
    pub fn and(self, other: impl Into<Predicate<E>>) -> Predicate<E> {
        Predicate::from(self).and(other)
    }

    /// Combines with another predicate using OR.
    #[must_use]
    pub fn or(self, other: impl Into<Predicate<E>>) -> Predicate<E> {
        Predicate::from(self).or(other)
    }

    /// Negates this predicate.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Predicate<E> {
        Predicate::from(self).not()
    }
}

impl<E, V> PredicateBuilder<E, V> {
    /// The bound field.
    #[must_use]
    pub const fn field(&self) -> &FieldMetadata<E, V> {
        &self.field
    }

    /// The bound operator.
    #[must_use]
    pub const fn operator(&self) -> Operator {
        self.operator
    }

    /// The bound value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }
}

impl<E, V: Clone> Clone for PredicateBuilder<E, V> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            operator: self.operator,
            value: self.value.clone(),
        }
    }
}

impl<E, V: fmt::Debug> fmt::Debug for PredicateBuilder<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateBuilder")
            .field("field", self.field.identifier())
            .field("operator", &self.operator)
            .field("value", &self.value)
            .finish()
    }
}

fn require_class(operator: Operator, expected: OperatorClass) -> Result<()> {
    if operator.class() == expected {
        Ok(())
    } else {
        Err(FieldError::InvalidOperator { operator, expected })
    }
}

/// A leaf condition with its value type erased.
pub trait Condition<E>: Send + Sync {
    /// Tests an entity.
    fn test_entity(&self, entity: &E) -> bool;

    /// Returns the bound triple with the value converted to a [`SqlValue`].
    fn describe_erased(&self) -> Expression;
}

impl<E: 'static, V: FieldValue> Condition<E> for PredicateBuilder<E, V> {
    fn test_entity(&self, entity: &E) -> bool {
        self.evaluate(entity)
    }

    fn describe_erased(&self) -> Expression {
        Expression::Condition {
            field: self.field.identifier().clone(),
            operator: self.operator,
            value: self.value.as_ref().map(FieldValue::to_sql_value),
        }
    }
}

/// The structure of a [`Predicate`], for query translators.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A bound field condition.
    Condition {
        /// Field identity.
        field: FieldIdentifier,
        /// Comparison or nullness operator.
        operator: Operator,
        /// Bound value for comparisons.
        value: Option<SqlValue>,
    },
    /// AND, OR or NOT over child expressions.
    Logical {
        /// The logical operator.
        operator: Operator,
        /// Operands in evaluation order.
        operands: Vec<Expression>,
    },
}

impl Expression {
    /// Returns the operator at the root of this expression.
    #[must_use]
    pub const fn operator(&self) -> Operator {
        match self {
            Self::Condition { operator, .. } | Self::Logical { operator, .. } => *operator,
        }
    }
}

/// A composable predicate over entities of type `E`.
pub enum Predicate<E> {
    /// A single bound condition.
    Condition(Arc<dyn Condition<E>>),
    /// All operands must hold. Empty is true.
    And(Vec<Predicate<E>>),
    /// At least one operand must hold. Empty is false.
    Or(Vec<Predicate<E>>),
    /// The operand must not hold.
    Not(Box<Predicate<E>>),
}

impl<E> Predicate<E> {
    /// Builds a logical composite from an operator and its operands.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidOperator`] for non-logical operators and
    /// [`FieldError::InvalidOperandCount`] when `Not` is not given exactly
    /// one operand.
    pub fn logical(operator: Operator, mut operands: Vec<Self>) -> Result<Self> {
        match operator {
            Operator::And => Ok(Self::And(operands)),
            Operator::Or => Ok(Self::Or(operands)),
            Operator::Not => match operands.pop() {
                Some(operand) if operands.is_empty() => Ok(Self::Not(Box::new(operand))),
                popped => Err(FieldError::InvalidOperandCount {
                    operator,
                    expected: 1,
                    found: operands.len() + usize::from(popped.is_some()),
                }),
            },
            _ => Err(FieldError::InvalidOperator {
                operator,
                expected: OperatorClass::Logical,
            }),
        }
    }

    /// Tests an entity, short-circuiting left to right.
    pub fn evaluate(&self, entity: &E) -> bool {
        match self {
            Self::Condition(condition) => condition.test_entity(entity),
            Self::And(operands) => operands.iter().all(|p| p.evaluate(entity)),
            Self::Or(operands) => operands.iter().any(|p| p.evaluate(entity)),
            Self::Not(operand) => !operand.evaluate(entity),
        }
    }

    /// Lazily yields the entities that satisfy this predicate.
    pub fn filter<'a, I>(&'a self, entities: I) -> impl Iterator<Item = &'a E> + 'a
    where
        I: IntoIterator<Item = &'a E>,
        I::IntoIter: 'a,
    {
        entities.into_iter().filter(move |entity| self.evaluate(entity))
    }

    /// Returns the operator at the root of this predicate.
    #[must_use]
    pub fn operator(&self) -> Operator {
        match self {
            Self::Condition(condition) => condition.describe_erased().operator(),
            Self::And(_) => Operator::And,
            Self::Or(_) => Operator::Or,
            Self::Not(_) => Operator::Not,
        }
    }

    /// Returns the full structure of this predicate.
    #[must_use]
    pub fn describe(&self) -> Expression {
        match self {
            Self::Condition(condition) => condition.describe_erased(),
            Self::And(operands) => Expression::Logical {
                operator: Operator::And,
                operands: operands.iter().map(Self::describe).collect(),
            },
            Self::Or(operands) => Expression::Logical {
                operator: Operator::Or,
                operands: operands.iter().map(Self::describe).collect(),
            },
            Self::Not(operand) => Expression::Logical {
                operator: Operator::Not,
                operands: vec![operand.describe()],
            },
        }
    }

    /// Combines this predicate with another using AND.
    #[must_use]
    pub fn and(self, other: impl Into<Self>) -> Self {
        Self::And(vec![self, other.into()])
    }

    /// Combines this predicate with another using OR.
    #[must_use]
    pub fn or(self, other: impl Into<Self>) -> Self {
        Self::Or(vec![self, other.into()])
    }

    /// Negates this predicate with NOT.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }
}

impl<E: 'static, V: FieldValue> From<PredicateBuilder<E, V>> for Predicate<E> {
    fn from(builder: PredicateBuilder<E, V>) -> Self {
        Self::Condition(Arc::new(builder))
    }
}

impl<E> Clone for Predicate<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Condition(condition) => Self::Condition(Arc::clone(condition)),
            Self::And(operands) => Self::And(operands.clone()),
            Self::Or(operands) => Self::Or(operands.clone()),
            Self::Not(operand) => Self::Not(operand.clone()),
        }
    }
}

impl<E> fmt::Debug for Predicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.describe(), f)
    }
}
