//! # oxide-field
//!
//! Typed field metadata and introspectable predicates for generated entity
//! code.
//!
//! This crate provides:
//! - [`FieldMetadata`] describing one entity field and how to read it
//! - [`Operator`], the closed set of comparison, nullness and logical operators
//! - [`PredicateBuilder`], an immutable (field, operator, value) condition that
//!   evaluates against entities and describes itself back unchanged
//! - [`Predicate`] for AND/OR/NOT composition across value types
//! - [`translate`], a reference WHERE-clause translator built on descriptions
//!
//! ## Quick Start
//!
//! ```
//! use oxide_field::{FieldIdentifier, FieldMetadata, Operator, PredicateBuilder};
//!
//! struct User {
//!     id: i64,
//! }
//!
//! let id = FieldMetadata::required(FieldIdentifier::new("users", "id").unwrap(), |u: &User| u.id);
//! let p = PredicateBuilder::comparison(id, Operator::GreaterThan, 10).unwrap();
//!
//! assert!(p.evaluate(&User { id: 15 }));
//! assert!(!p.evaluate(&User { id: 5 }));
//!
//! let d = p.describe();
//! assert_eq!(d.field.to_string(), "users.id");
//! assert_eq!(d.operator, Operator::GreaterThan);
//! assert_eq!(d.value, Some(10));
//! ```
//!
//! Predicates hold no mutable state, so one predicate can be evaluated from
//! many threads at once.

mod error;
mod field;
pub mod naming;
mod operator;
mod predicate;
pub mod translate;
mod value;

pub use error::{FieldError, Result};
pub use field::{FieldMetadata, FieldSpec};
pub use naming::FieldIdentifier;
pub use operator::{Comparator, Operator, OperatorClass};
pub use predicate::{Condition, Description, Expression, Predicate, PredicateBuilder};
pub use value::{FieldValue, SqlValue, ValueType};
