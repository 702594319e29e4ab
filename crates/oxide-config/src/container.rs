//! The generic parent/child container.
//!
//! One [`ParentContainer`] exists per child kind a node may hold, so a
//! Table owns three (columns, indexes, foreign keys) while a Schema owns
//! one. All of them share this implementation of uniqueness and
//! back-reference maintenance.
//!
//! Children are kept in an immutable snapshot that is replaced wholesale on
//! every mutation. Readers clone the current snapshot and iterate it
//! without holding a lock, so they observe either the state before or the
//! state after any single add or remove.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use crate::error::Result;
use crate::kind::NodeKind;
use crate::node::{Node, NodeRef};

/// Result of adding a child.
#[derive(Debug, Clone)]
#[must_use]
pub enum AddOutcome {
    /// The child was inserted and now points back to its new parent.
    Inserted(NodeRef),
    /// A sibling with the same name already exists; nothing was changed.
    /// The rejected child stays with the caller.
    Conflict(NodeRef),
}

impl AddOutcome {
    /// Whether the child was inserted.
    #[must_use]
    pub const fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted(_))
    }

    /// The conflicting sibling, if insertion was rejected.
    #[must_use]
    pub const fn conflict(&self) -> Option<&NodeRef> {
        match self {
            Self::Inserted(_) => None,
            Self::Conflict(existing) => Some(existing),
        }
    }

    /// The inserted child, if insertion succeeded.
    #[must_use]
    pub fn inserted(self) -> Option<NodeRef> {
        match self {
            Self::Inserted(child) => Some(child),
            Self::Conflict(_) => None,
        }
    }
}

/// Holds the children of one kind for one owning node.
pub struct ParentContainer {
    child_kind: NodeKind,
    children: RwLock<Arc<Vec<NodeRef>>>,
    revision: AtomicU64,
}

impl ParentContainer {
    pub(crate) fn new(child_kind: NodeKind) -> Self {
        Self {
            child_kind,
            children: RwLock::new(Arc::new(Vec::new())),
            revision: AtomicU64::new(0),
        }
    }

    /// The kind of child this container holds.
    #[must_use]
    pub const fn child_kind(&self) -> NodeKind {
        self.child_kind
    }

    /// The current children in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<NodeRef>> {
        Arc::clone(&self.children.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the container is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of mutations applied so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    /// The child with the given name, if any.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<NodeRef> {
        self.snapshot().iter().find(|c| c.has_name(name)).cloned()
    }

    /// Whether `child` (by identity) is held here.
    #[must_use]
    pub fn contains(&self, child: &Node) -> bool {
        self.snapshot().iter().any(|c| std::ptr::eq(c.as_ref(), child))
    }

    /// Takes the mutation lock. Holding it serialises every change to this
    /// container, including renames of its children.
    pub(crate) fn lock(&self) -> RwLockWriteGuard<'_, Arc<Vec<NodeRef>>> {
        self.children.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts `child` unless a sibling already uses its name.
    ///
    /// `attach` is called with the lock held, before the new snapshot is
    /// published, so readers never see the child without its parent. If it
    /// fails nothing is inserted.
    pub(crate) fn insert(
        &self,
        child: &NodeRef,
        attach: impl FnOnce() -> Result<()>,
    ) -> Result<AddOutcome> {
        let mut children = self.lock();
        let name = child.name();
        if let Some(existing) = children.iter().find(|c| c.has_name(&name)) {
            return Ok(AddOutcome::Conflict(Arc::clone(existing)));
        }
        attach()?;
        let mut next = Vec::with_capacity(children.len() + 1);
        next.extend(children.iter().cloned());
        next.push(Arc::clone(child));
        *children = Arc::new(next);
        drop(children);
        self.revision.fetch_add(1, Ordering::AcqRel);
        Ok(AddOutcome::Inserted(Arc::clone(child)))
    }

    /// Removes `child` by identity.
    ///
    /// `detach` runs after the new snapshot is published, while the lock is
    /// still held.
    pub(crate) fn remove(&self, child: &NodeRef, detach: impl FnOnce()) -> Option<NodeRef> {
        let mut children = self.lock();
        let position = children.iter().position(|c| Arc::ptr_eq(c, child))?;
        let mut next = children.as_ref().clone();
        let removed = next.remove(position);
        *children = Arc::new(next);
        self.revision.fetch_add(1, Ordering::AcqRel);
        detach();
        Some(removed)
    }
}

/// A name-sorted, restartable sequence of children.
///
/// The sequence is a snapshot: later mutations of the tree do not affect
/// it. Iterate it as many times as needed; clone it to hand it off.
///
/// A child removed after the snapshot was taken stays in the sequence but
/// reports no parent. Every child in the sequence had its parent set when
/// the snapshot was taken.
#[derive(Debug, Clone, Default)]
pub struct ChildStream {
    nodes: Arc<[NodeRef]>,
}

impl ChildStream {
    /// Sorts the given children by name, then by container order.
    pub(crate) fn sorted<'a>(containers: impl IntoIterator<Item = &'a ParentContainer>) -> Self {
        let mut keyed: Vec<(String, usize, NodeRef)> = containers
            .into_iter()
            .enumerate()
            .flat_map(|(order, container)| {
                container
                    .snapshot()
                    .iter()
                    .map(|child| (child.name(), order, Arc::clone(child)))
                    .collect::<Vec<_>>()
            })
            .collect();
        keyed.sort_by(|a, b| {
            oxide_field::naming::compare_names(&a.0, &b.0).then(a.1.cmp(&b.1))
        });
        Self {
            nodes: keyed.into_iter().map(|(_, _, node)| node).collect(),
        }
    }

    /// Iterates the children in name order.
    pub fn iter(&self) -> std::slice::Iter<'_, NodeRef> {
        self.nodes.iter()
    }

    /// Number of children in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Names of the children in order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.nodes.iter().map(|node| node.name()).collect()
    }
}

impl<'a> IntoIterator for &'a ChildStream {
    type Item = &'a NodeRef;
    type IntoIter = std::slice::Iter<'a, NodeRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl IntoIterator for ChildStream {
    type Item = NodeRef;
    type IntoIter = std::vec::IntoIter<NodeRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.to_vec().into_iter()
    }
}
