//! Serializable snapshots of a subtree.
//!
//! A [`NodeDescription`] captures everything a node carries except its
//! observers, so an external loader can save a tree in any serde format and
//! rebuild an equal one later.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attributes::ConfigNode;
use crate::container::AddOutcome;
use crate::error::{ConfigError, Result};
use crate::kind::NodeKind;
use crate::node::{Node, NodeRef};

const fn enabled_by_default() -> bool {
    true
}

/// Recursive description of a node and its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescription {
    /// Node name.
    pub name: String,
    /// Enabled flag.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Expanded flag.
    #[serde(default)]
    pub expanded: bool,
    /// Kind-specific attributes; their tag determines the node kind.
    pub attributes: ConfigNode,
    /// Children in name order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDescription>,
}

impl NodeDescription {
    /// Describes a childless node with default flags.
    #[must_use]
    pub fn new(name: impl Into<String>, attributes: ConfigNode) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            expanded: false,
            attributes,
            children: Vec::new(),
        }
    }

    /// Adds a child description.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// The kind of the described node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.attributes.kind()
    }
}

impl Node {
    /// Snapshots this node and its subtree.
    #[must_use]
    pub fn describe(&self) -> NodeDescription {
        NodeDescription {
            name: self.name(),
            enabled: self.is_enabled(),
            expanded: self.is_expanded(),
            attributes: self.attributes(),
            children: self.children().iter().map(|c| c.describe()).collect(),
        }
    }

    /// Builds a detached subtree from a description.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError::InvalidParent`] if a child kind does not
    /// fit its parent, [`ConfigError::DuplicateName`] if two siblings of one
    /// kind share a name, or a field error for a blank name.
    pub fn from_description(description: &NodeDescription) -> Result<NodeRef> {
        let node = Arc::new(Self::detached(description.kind(), description.name.clone())?);
        node.set_attributes(description.attributes.clone())?;
        node.set_enabled(description.enabled);
        node.set_expanded(description.expanded);

        for child in &description.children {
            let child = Self::from_description(child)?;
            if let AddOutcome::Conflict(existing) = node.add_child(&child)? {
                return Err(ConfigError::DuplicateName {
                    parent: node.name(),
                    kind: existing.kind(),
                    name: existing.name(),
                });
            }
        }
        debug!(
            kind = %node.kind(),
            name = %node.name(),
            children = node.count(),
            "subtree loaded"
        );
        Ok(node)
    }
}
