//! Field metadata for generated entities.
//!
//! A [`FieldSpec`] is the read-only description of a column that the
//! metadata tree hands to the code generator. Generated code pairs it with
//! an accessor to obtain a [`FieldMetadata`], from which predicates are
//! built.

use std::fmt;
use std::sync::Arc;

use crate::naming::FieldIdentifier;
use crate::operator::Operator;
use crate::predicate::PredicateBuilder;
use crate::value::{FieldValue, ValueType};

/// Column description derived from the metadata tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Owning table and column name.
    pub identifier: FieldIdentifier,
    /// Declared type name as recorded on the column.
    pub type_name: String,
    /// Whether the column accepts NULL.
    pub nullable: bool,
}

type Accessor<E, V> = Arc<dyn Fn(&E) -> Option<V> + Send + Sync>;

/// Describes one field of an entity type `E` holding values of type `V`.
///
/// Immutable once constructed and cheap to clone; the accessor is shared.
pub struct FieldMetadata<E, V> {
    identifier: FieldIdentifier,
    type_name: String,
    nullable: bool,
    accessor: Accessor<E, V>,
}

impl<E: 'static, V: FieldValue> FieldMetadata<E, V> {
    /// Creates field metadata from an identifier and an accessor.
    ///
    /// The declared type name defaults to the canonical name of `V`.
    pub fn new<F>(identifier: FieldIdentifier, nullable: bool, accessor: F) -> Self
    where
        F: Fn(&E) -> Option<V> + Send + Sync + 'static,
    {
        Self {
            identifier,
            type_name: V::VALUE_TYPE.name().to_string(),
            nullable,
            accessor: Arc::new(accessor),
        }
    }

    /// Creates metadata for a non-nullable field.
    pub fn required<F>(identifier: FieldIdentifier, accessor: F) -> Self
    where
        F: Fn(&E) -> V + Send + Sync + 'static,
    {
        Self::new(identifier, false, move |entity: &E| Some(accessor(entity)))
    }

    /// Creates metadata for a nullable field.
    pub fn optional<F>(identifier: FieldIdentifier, accessor: F) -> Self
    where
        F: Fn(&E) -> Option<V> + Send + Sync + 'static,
    {
        Self::new(identifier, true, accessor)
    }

    /// Creates metadata from a column description.
    pub fn from_spec<F>(spec: FieldSpec, accessor: F) -> Self
    where
        F: Fn(&E) -> Option<V> + Send + Sync + 'static,
    {
        Self {
            identifier: spec.identifier,
            type_name: spec.type_name,
            nullable: spec.nullable,
            accessor: Arc::new(accessor),
        }
    }

    /// Extracts this field's value from an entity.
    pub fn get(&self, entity: &E) -> Option<V> {
        (self.accessor)(entity)
    }

    /// Field equal to `value`.
    #[must_use]
    pub fn equal(&self, value: V) -> PredicateBuilder<E, V> {
        PredicateBuilder::bind(self.clone(), Operator::Equal, Some(value))
    }

    /// Field not equal to `value`.
    #[must_use]
    pub fn not_equal(&self, value: V) -> PredicateBuilder<E, V> {
        PredicateBuilder::bind(self.clone(), Operator::NotEqual, Some(value))
    }

    /// Field less than `value`.
    #[must_use]
    pub fn less_than(&self, value: V) -> PredicateBuilder<E, V> {
        PredicateBuilder::bind(self.clone(), Operator::LessThan, Some(value))
    }

    /// Field less than or equal to `value`.
    #[must_use]
    pub fn less_or_equal(&self, value: V) -> PredicateBuilder<E, V> {
        PredicateBuilder::bind(self.clone(), Operator::LessOrEqual, Some(value))
    }

    /// Field greater than `value`.
    #[must_use]
    pub fn greater_than(&self, value: V) -> PredicateBuilder<E, V> {
        PredicateBuilder::bind(self.clone(), Operator::GreaterThan, Some(value))
    }

    /// Field greater than or equal to `value`.
    #[must_use]
    pub fn greater_or_equal(&self, value: V) -> PredicateBuilder<E, V> {
        PredicateBuilder::bind(self.clone(), Operator::GreaterOrEqual, Some(value))
    }

    /// Field value is absent.
    #[must_use]
    pub fn is_null(&self) -> PredicateBuilder<E, V> {
        PredicateBuilder::bind(self.clone(), Operator::IsNull, None)
    }

    /// Field value is present.
    #[must_use]
    pub fn is_not_null(&self) -> PredicateBuilder<E, V> {
        PredicateBuilder::bind(self.clone(), Operator::IsNotNull, None)
    }
}

impl<E, V> FieldMetadata<E, V> {
    /// The owning table and column.
    #[must_use]
    pub const fn identifier(&self) -> &FieldIdentifier {
        &self.identifier
    }

    /// The column name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.identifier.column()
    }

    /// The declared type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Whether the field accepts absent values.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }
}

impl<E, V: FieldValue> FieldMetadata<E, V> {
    /// The value type of the field.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        V::VALUE_TYPE
    }
}

impl<E, V> Clone for FieldMetadata<E, V> {
    fn clone(&self) -> Self {
        Self {
            identifier: self.identifier.clone(),
            type_name: self.type_name.clone(),
            nullable: self.nullable,
            accessor: Arc::clone(&self.accessor),
        }
    }
}

impl<E, V> fmt::Debug for FieldMetadata<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMetadata")
            .field("identifier", &self.identifier)
            .field("type_name", &self.type_name)
            .field("nullable", &self.nullable)
            .finish_non_exhaustive()
    }
}
