//! Error types for the metadata tree.

use oxide_field::FieldError;
use thiserror::Error;

use crate::kind::NodeKind;

/// Errors raised by tree operations.
///
/// A duplicate name on `add_child` is not an error; it is reported through
/// [`AddOutcome::Conflict`](crate::AddOutcome::Conflict).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No child with the requested name.
    #[error("{parent_kind} '{parent}' has no {kind} named '{name}'")]
    NotFound {
        /// Name of the node that was searched.
        parent: String,
        /// Kind of the node that was searched.
        parent_kind: NodeKind,
        /// Requested child kind.
        kind: NodeKind,
        /// Requested name.
        name: String,
    },

    /// The node does not hold (or is not) the requested kind.
    #[error("{node_kind} '{node}' cannot be used with kind {kind}")]
    WrongKind {
        /// Name of the node the operation was called on.
        node: String,
        /// Kind of that node.
        node_kind: NodeKind,
        /// Kind requested by the caller.
        kind: NodeKind,
    },

    /// A node of kind `child` cannot be placed under a node of kind `parent`.
    #[error("a {child} cannot be a child of a {parent}")]
    InvalidParent {
        /// Kind of the would-be parent.
        parent: NodeKind,
        /// Kind of the would-be child.
        child: NodeKind,
    },

    /// The child already has a parent.
    #[error("{kind} '{name}' already belongs to '{parent}'")]
    AlreadyAttached {
        /// Kind of the child.
        kind: NodeKind,
        /// Name of the child.
        name: String,
        /// Name of its current parent.
        parent: String,
    },

    /// Two siblings of one kind share a name in a loaded description.
    #[error("'{parent}' contains more than one {kind} named '{name}'")]
    DuplicateName {
        /// Name of the parent.
        parent: String,
        /// Kind of the duplicated child.
        kind: NodeKind,
        /// The duplicated name.
        name: String,
    },

    /// The node has no ancestor of the required kind.
    #[error("{kind} '{name}' is not attached to a {expected}")]
    Detached {
        /// Kind of the node.
        kind: NodeKind,
        /// Name of the node.
        name: String,
        /// Ancestor kind that was required.
        expected: NodeKind,
    },

    /// The DBMS type name is not recognised.
    #[error("unknown DBMS type '{0}'")]
    UnknownDbmsType(String),

    /// Name validation failed.
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Result type alias for tree operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
