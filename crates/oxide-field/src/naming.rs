//! Naming primitives shared by fields and metadata nodes.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{FieldError, Result};

/// Validates a node or field name and returns it owned.
///
/// Names must contain at least one non-whitespace character. The name is
/// stored as given; no trimming or case folding happens.
///
/// # Errors
///
/// Returns [`FieldError::EmptyName`] for empty or blank names.
pub fn require_name(name: impl Into<String>) -> Result<String> {
    let name = name.into();
    if name.trim().is_empty() {
        return Err(FieldError::EmptyName);
    }
    Ok(name)
}

/// Orders two names by their byte representation.
///
/// This is the canonical order used for sibling iteration and for string
/// comparisons in predicates; it never depends on locale.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.as_bytes().cmp(b.as_bytes())
}

/// Identifies a field by its owning table and column name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldIdentifier {
    table: String,
    column: String,
}

impl FieldIdentifier {
    /// Creates a new identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::EmptyName`] if either part is blank.
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Result<Self> {
        Ok(Self {
            table: require_name(table)?,
            column: require_name(column)?,
        })
    }

    /// The owning table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The column name.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }
}

impl fmt::Display for FieldIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}
