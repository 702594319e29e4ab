//! Node kinds and the parent/child pairs they form.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a node in the metadata tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    /// Root of the tree.
    Project,
    /// A database server connection.
    Dbms,
    /// A schema within a DBMS.
    Schema,
    /// A table within a schema.
    Table,
    /// A column of a table.
    Column,
    /// An index on a table.
    Index,
    /// A foreign key constraint on a table.
    ForeignKey,
    /// Opaque settings stored by a plugin on the project.
    PluginData,
}

impl NodeKind {
    /// Kinds this kind may hold as children, in container declaration order.
    #[must_use]
    pub const fn child_kinds(self) -> &'static [Self] {
        match self {
            Self::Project => &[Self::Dbms, Self::PluginData],
            Self::Dbms => &[Self::Schema],
            Self::Schema => &[Self::Table],
            Self::Table => &[Self::Column, Self::Index, Self::ForeignKey],
            Self::Column | Self::Index | Self::ForeignKey | Self::PluginData => &[],
        }
    }

    /// The kind a node of this kind must be attached to, if any.
    #[must_use]
    pub const fn parent_kind(self) -> Option<Self> {
        match self {
            Self::Project => None,
            Self::Dbms | Self::PluginData => Some(Self::Project),
            Self::Schema => Some(Self::Dbms),
            Self::Table => Some(Self::Schema),
            Self::Column | Self::Index | Self::ForeignKey => Some(Self::Table),
        }
    }

    /// Whether a node of this kind may hold children of `child`.
    #[must_use]
    pub fn can_hold(self, child: Self) -> bool {
        self.child_kinds().contains(&child)
    }

    /// Whether this kind owns at least one child container.
    #[must_use]
    pub const fn is_parent(self) -> bool {
        !self.child_kinds().is_empty()
    }

    /// Returns the display name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::Dbms => "Dbms",
            Self::Schema => "Schema",
            Self::Table => "Table",
            Self::Column => "Column",
            Self::Index => "Index",
            Self::ForeignKey => "ForeignKey",
            Self::PluginData => "PluginData",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
