//! Tree nodes.
//!
//! A [`Node`] is shared as a [`NodeRef`]. Parents own their children through
//! [`ParentContainer`]s; children point back with a weak reference, so a
//! detached subtree is freed as soon as the caller drops it.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use oxide_field::naming::require_name;
use oxide_field::{FieldIdentifier, FieldSpec};
use tracing::{debug, trace};

use crate::attributes::ConfigNode;
use crate::container::{AddOutcome, ChildStream, ParentContainer};
use crate::error::{ConfigError, Result};
use crate::kind::NodeKind;
use crate::notifier::{ChangeNotifier, SubscriptionId, TreeEvent, TreeObserver};
use crate::traverse::Traverse;

/// Shared handle to a node.
pub type NodeRef = Arc<Node>;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique node identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Result of renaming a node.
#[derive(Debug, Clone)]
#[must_use]
pub enum RenameOutcome {
    /// The name changed.
    Renamed,
    /// The new name equals the old one.
    Unchanged,
    /// A sibling of the same kind already uses the name; nothing changed.
    Conflict(NodeRef),
}

/// A node of the metadata tree.
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    name: RwLock<String>,
    enabled: AtomicBool,
    expanded: AtomicBool,
    parent: RwLock<Weak<Node>>,
    attributes: RwLock<ConfigNode>,
    containers: Vec<ParentContainer>,
    notifier: ChangeNotifier,
}

impl Node {
    /// Creates a new root project.
    ///
    /// # Errors
    ///
    /// Fails if `name` is blank.
    pub fn project(name: impl Into<String>) -> Result<NodeRef> {
        Ok(Arc::new(Self::detached(NodeKind::Project, name)?))
    }

    pub(crate) fn detached(kind: NodeKind, name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            id: NodeId::next(),
            kind,
            name: RwLock::new(require_name(name)?),
            enabled: AtomicBool::new(true),
            expanded: AtomicBool::new(false),
            parent: RwLock::new(Weak::new()),
            attributes: RwLock::new(ConfigNode::default_for(kind)),
            containers: kind
                .child_kinds()
                .iter()
                .map(|child| ParentContainer::new(*child))
                .collect(),
            notifier: ChangeNotifier::default(),
        })
    }

    /// The node's identity.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// The node's kind.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The current name.
    #[must_use]
    pub fn name(&self) -> String {
        self.name
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn has_name(&self, name: &str) -> bool {
        *self.name.read().unwrap_or_else(PoisonError::into_inner) == name
    }

    /// Renames the node.
    ///
    /// When the node is attached, the rename is checked against its
    /// siblings of the same kind and refused on a clash.
    ///
    /// # Errors
    ///
    /// Fails if `name` is blank.
    pub fn set_name(self: &Arc<Self>, name: impl Into<String>) -> Result<RenameOutcome> {
        let name = require_name(name)?;
        let parent = self.parent();
        let container = parent.as_ref().and_then(|p| p.container(self.kind));
        let guard = container.map(ParentContainer::lock);

        if let Some(siblings) = guard.as_ref() {
            let clash = siblings
                .iter()
                .find(|s| !Arc::ptr_eq(s, self) && s.has_name(&name));
            if let Some(existing) = clash {
                debug!(kind = %self.kind, name = %name, "rename rejected, name in use");
                return Ok(RenameOutcome::Conflict(Arc::clone(existing)));
            }
        }

        let old_name = {
            let mut current = self.name.write().unwrap_or_else(PoisonError::into_inner);
            if *current == name {
                return Ok(RenameOutcome::Unchanged);
            }
            std::mem::replace(&mut *current, name)
        };
        drop(guard);

        debug!(kind = %self.kind, from = %old_name, to = %self.name(), "node renamed");
        self.publish(&TreeEvent::Renamed {
            node: Arc::clone(self),
            old_name,
        });
        Ok(RenameOutcome::Renamed)
    }

    /// Whether the node is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Enables or disables the node. Fires an event only if the value changed.
    pub fn set_enabled(self: &Arc<Self>, enabled: bool) {
        if self.enabled.swap(enabled, Ordering::AcqRel) == enabled {
            return;
        }
        debug!(kind = %self.kind, name = %self.name(), enabled, "enabled flag changed");
        self.publish(&TreeEvent::EnabledChanged {
            node: Arc::clone(self),
            enabled,
        });
    }

    /// Whether the node is shown expanded.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded.load(Ordering::Acquire)
    }

    /// Sets the expanded flag.
    pub fn set_expanded(&self, expanded: bool) {
        self.expanded.store(expanded, Ordering::Release);
    }

    /// Expands or collapses this node and every descendant, leaves included.
    pub fn set_expanded_all(self: &Arc<Self>, expanded: bool) {
        for node in self.traverse(|_| true) {
            node.set_expanded(expanded);
        }
    }

    /// A copy of the node's attributes.
    #[must_use]
    pub fn attributes(&self) -> ConfigNode {
        self.attributes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the node's attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WrongKind`] if `attributes` belong to another
    /// kind.
    pub fn set_attributes(self: &Arc<Self>, attributes: ConfigNode) -> Result<()> {
        if attributes.kind() != self.kind {
            return Err(self.wrong_kind(attributes.kind()));
        }
        *self
            .attributes
            .write()
            .unwrap_or_else(PoisonError::into_inner) = attributes;
        self.publish(&TreeEvent::AttributesChanged {
            node: Arc::clone(self),
        });
        Ok(())
    }

    /// Edits the node's attributes in place.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WrongKind`] if `edit` swaps in attributes of
    /// another kind.
    pub fn update_attributes(self: &Arc<Self>, edit: impl FnOnce(&mut ConfigNode)) -> Result<()> {
        let mut attributes = self.attributes();
        edit(&mut attributes);
        self.set_attributes(attributes)
    }

    /// The owning node, if attached.
    #[must_use]
    pub fn parent(&self) -> Option<NodeRef> {
        self.parent
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .upgrade()
    }

    /// Whether the node has a parent.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.parent().is_some()
    }

    /// The nearest ancestor of the given kind.
    #[must_use]
    pub fn ancestor(&self, kind: NodeKind) -> Option<NodeRef> {
        let mut current = self.parent();
        while let Some(node) = current {
            if node.kind == kind {
                return Some(node);
            }
            current = node.parent();
        }
        None
    }

    /// The root of the tree this node belongs to.
    #[must_use]
    pub fn root(self: &Arc<Self>) -> NodeRef {
        let mut current = Arc::clone(self);
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Names from the root down to this node.
    #[must_use]
    pub fn path(&self) -> Vec<String> {
        let mut names = vec![self.name()];
        let mut current = self.parent();
        while let Some(node) = current {
            names.push(node.name());
            current = node.parent();
        }
        names.reverse();
        names
    }

    /// The node's child containers, in declaration order. Empty for leaves.
    #[must_use]
    pub fn containers(&self) -> &[ParentContainer] {
        &self.containers
    }

    pub(crate) fn container(&self, kind: NodeKind) -> Option<&ParentContainer> {
        self.containers.iter().find(|c| c.child_kind() == kind)
    }

    fn container_or_wrong_kind(&self, kind: NodeKind) -> Result<&ParentContainer> {
        self.container(kind).ok_or_else(|| self.wrong_kind(kind))
    }

    fn wrong_kind(&self, kind: NodeKind) -> ConfigError {
        ConfigError::WrongKind {
            node: self.name(),
            node_kind: self.kind,
            kind,
        }
    }

    /// Creates a detached node that may later be added to this node.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParent`] if this node cannot hold
    /// `kind`, or a field error if `name` is blank.
    pub fn create_child(&self, kind: NodeKind, name: impl Into<String>) -> Result<NodeRef> {
        if !self.kind.can_hold(kind) {
            return Err(ConfigError::InvalidParent {
                parent: self.kind,
                child: kind,
            });
        }
        Ok(Arc::new(Self::detached(kind, name)?))
    }

    /// Creates a child and adds it in one step.
    ///
    /// # Errors
    ///
    /// Same as [`create_child`](Self::create_child).
    pub fn add_new_child(
        self: &Arc<Self>,
        kind: NodeKind,
        name: impl Into<String>,
    ) -> Result<AddOutcome> {
        let child = self.create_child(kind, name)?;
        self.add_child(&child)
    }

    /// Adds a detached child.
    ///
    /// A sibling with the same name is reported as
    /// [`AddOutcome::Conflict`] and leaves both nodes untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParent`] if this node cannot hold the
    /// child's kind and [`ConfigError::AlreadyAttached`] if the child
    /// already has a parent.
    pub fn add_child(self: &Arc<Self>, child: &NodeRef) -> Result<AddOutcome> {
        let container = self.container(child.kind).ok_or(ConfigError::InvalidParent {
            parent: self.kind,
            child: child.kind,
        })?;
        if let Some(owner) = child.parent() {
            return Err(child.already_attached(&owner));
        }

        let outcome = container.insert(child, || {
            let mut slot = child.parent.write().unwrap_or_else(PoisonError::into_inner);
            if let Some(owner) = slot.upgrade() {
                return Err(child.already_attached(&owner));
            }
            *slot = Arc::downgrade(self);
            Ok(())
        })?;

        match &outcome {
            AddOutcome::Inserted(_) => {
                debug!(
                    parent = %self.name(),
                    kind = %child.kind,
                    name = %child.name(),
                    "child added"
                );
                self.publish(&TreeEvent::Added {
                    parent: Arc::clone(self),
                    child: Arc::clone(child),
                });
            }
            AddOutcome::Conflict(existing) => {
                debug!(
                    parent = %self.name(),
                    kind = %child.kind,
                    name = %existing.name(),
                    "child rejected, name in use"
                );
            }
        }
        Ok(outcome)
    }

    fn already_attached(&self, owner: &Self) -> ConfigError {
        ConfigError::AlreadyAttached {
            kind: self.kind,
            name: self.name(),
            parent: owner.name(),
        }
    }

    /// Removes a child and clears its parent link.
    ///
    /// Returns `None` if `child` is not held by this node.
    pub fn remove_child(self: &Arc<Self>, child: &NodeRef) -> Option<NodeRef> {
        let container = self.container(child.kind)?;
        let removed = container.remove(child, || {
            *child.parent.write().unwrap_or_else(PoisonError::into_inner) = Weak::new();
        })?;
        debug!(
            parent = %self.name(),
            kind = %removed.kind,
            name = %removed.name(),
            "child removed"
        );
        self.publish(&TreeEvent::Removed {
            parent: Arc::clone(self),
            child: Arc::clone(&removed),
        });
        Some(removed)
    }

    /// Removes every child of `kind`, in name order.
    ///
    /// Each removal fires its own event and clears the child's parent link.
    /// Returns the removed children.
    ///
    /// # Errors
    ///
    /// [`ConfigError::WrongKind`] if this node does not hold `kind`.
    pub fn clear_children(self: &Arc<Self>, kind: NodeKind) -> Result<Vec<NodeRef>> {
        let children = self.children_of_kind(kind)?;
        Ok(children
            .iter()
            .filter_map(|child| self.remove_child(child))
            .collect())
    }

    /// Finds the child of `kind` named `name`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::WrongKind`] if this node does not hold `kind`,
    /// [`ConfigError::NotFound`] if no such child exists.
    pub fn find(&self, kind: NodeKind, name: &str) -> Result<NodeRef> {
        let container = self.container_or_wrong_kind(kind)?;
        trace!(parent = %self.name(), %kind, name, "find child");
        container.find(name).ok_or_else(|| ConfigError::NotFound {
            parent: self.name(),
            parent_kind: self.kind,
            kind,
            name: name.to_string(),
        })
    }

    /// Every child, ordered by name and then by container declaration order.
    #[must_use]
    pub fn children(&self) -> ChildStream {
        trace!(parent = %self.name(), "stream children");
        ChildStream::sorted(&self.containers)
    }

    /// Children of one kind, ordered by name.
    ///
    /// # Errors
    ///
    /// [`ConfigError::WrongKind`] if this node does not hold `kind`.
    pub fn children_of_kind(&self, kind: NodeKind) -> Result<ChildStream> {
        let container = self.container_or_wrong_kind(kind)?;
        trace!(parent = %self.name(), %kind, "stream children of kind");
        Ok(ChildStream::sorted([container]))
    }

    /// Total number of children.
    #[must_use]
    pub fn count(&self) -> usize {
        self.containers.iter().map(ParentContainer::len).sum()
    }

    /// Number of children of one kind.
    ///
    /// # Errors
    ///
    /// [`ConfigError::WrongKind`] if this node does not hold `kind`.
    pub fn count_of_kind(&self, kind: NodeKind) -> Result<usize> {
        Ok(self.container_or_wrong_kind(kind)?.len())
    }

    /// Lazily walks this subtree in pre-order, yielding the nodes accepted by
    /// `predicate`. Rejected nodes are still descended into.
    pub fn traverse<P>(self: &Arc<Self>, predicate: P) -> Traverse<P>
    where
        P: FnMut(&NodeRef) -> bool,
    {
        Traverse::new(Arc::clone(self), predicate)
    }

    /// Registers an observer for events in this node's subtree.
    pub fn subscribe(&self, observer: impl TreeObserver + 'static) -> SubscriptionId {
        self.notifier.subscribe(Arc::new(observer))
    }

    /// Removes an observer registered on this node.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Number of structural changes applied to this node's own children.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.containers.iter().map(ParentContainer::revision).sum()
    }

    fn publish(&self, event: &TreeEvent) {
        self.notifier.notify(event);
        let mut current = self.parent();
        while let Some(node) = current {
            node.notifier.notify(event);
            current = node.parent();
        }
    }

    /// The field seed of a column.
    ///
    /// # Errors
    ///
    /// [`ConfigError::WrongKind`] if this node is not a column,
    /// [`ConfigError::Detached`] if it has no table ancestor.
    pub fn field_spec(&self) -> Result<FieldSpec> {
        let ConfigNode::Column(column) = self.attributes() else {
            return Err(self.wrong_kind(NodeKind::Column));
        };
        let table = self
            .ancestor(NodeKind::Table)
            .ok_or_else(|| ConfigError::Detached {
                kind: self.kind,
                name: self.name(),
                expected: NodeKind::Table,
            })?;
        Ok(FieldSpec {
            identifier: FieldIdentifier::new(table.name(), self.name())?,
            type_name: column.type_name,
            nullable: column.nullable,
        })
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id.0)
            .field("kind", &self.kind)
            .field("name", &self.name())
            .field("enabled", &self.is_enabled())
            .field("children", &self.count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::ColumnAttributes;
    use std::sync::Mutex;

    fn table() -> (NodeRef, NodeRef) {
        let project = Node::project("shop").unwrap();
        let dbms = project.add_new_child(NodeKind::Dbms, "db").unwrap().inserted().unwrap();
        let schema = dbms.add_new_child(NodeKind::Schema, "public").unwrap().inserted().unwrap();
        let table = schema.add_new_child(NodeKind::Table, "users").unwrap().inserted().unwrap();
        (project, table)
    }

    #[test]
    fn test_project_defaults() {
        let project = Node::project("shop").unwrap();
        assert_eq!(project.kind(), NodeKind::Project);
        assert_eq!(project.name(), "shop");
        assert!(project.is_enabled());
        assert!(!project.is_expanded());
        assert!(project.parent().is_none());
        assert_eq!(project.count(), 0);
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(Node::project("  ").is_err());
        let project = Node::project("shop").unwrap();
        assert!(project.create_child(NodeKind::Dbms, "").is_err());
    }

    #[test]
    fn test_add_sets_parent() {
        let project = Node::project("shop").unwrap();
        let dbms = project.create_child(NodeKind::Dbms, "db").unwrap();
        assert!(!dbms.is_attached());
        assert!(project.add_child(&dbms).unwrap().is_inserted());
        assert!(Arc::ptr_eq(&dbms.parent().unwrap(), &project));
        assert_eq!(project.count_of_kind(NodeKind::Dbms).unwrap(), 1);
        assert_eq!(project.revision(), 1);
    }

    #[test]
    fn test_duplicate_add_returns_existing() {
        let project = Node::project("shop").unwrap();
        let first = project.add_new_child(NodeKind::Dbms, "db").unwrap().inserted().unwrap();
        let second = project.create_child(NodeKind::Dbms, "db").unwrap();

        let outcome = project.add_child(&second).unwrap();
        assert!(Arc::ptr_eq(outcome.conflict().unwrap(), &first));
        assert!(second.parent().is_none());
        assert_eq!(project.count(), 1);
    }

    #[test]
    fn test_same_name_in_different_containers() {
        let (_, table) = table();
        assert!(table.add_new_child(NodeKind::Column, "id").unwrap().is_inserted());
        assert!(table.add_new_child(NodeKind::Index, "id").unwrap().is_inserted());
        assert_eq!(table.count(), 2);
    }

    #[test]
    fn test_invalid_parent() {
        let project = Node::project("shop").unwrap();
        assert_eq!(
            project.create_child(NodeKind::Column, "id").unwrap_err(),
            ConfigError::InvalidParent {
                parent: NodeKind::Project,
                child: NodeKind::Column,
            }
        );
        let (_, table) = table();
        let column = table.create_child(NodeKind::Column, "id").unwrap();
        assert!(matches!(
            project.add_child(&column),
            Err(ConfigError::InvalidParent { .. })
        ));
    }

    #[test]
    fn test_already_attached() {
        let first = Node::project("a").unwrap();
        let second = Node::project("b").unwrap();
        let dbms = first.add_new_child(NodeKind::Dbms, "db").unwrap().inserted().unwrap();
        assert_eq!(
            second.add_child(&dbms).unwrap_err(),
            ConfigError::AlreadyAttached {
                kind: NodeKind::Dbms,
                name: String::from("db"),
                parent: String::from("a"),
            }
        );
        assert_eq!(second.count(), 0);
    }

    #[test]
    fn test_remove_clears_parent() {
        let project = Node::project("shop").unwrap();
        let dbms = project.add_new_child(NodeKind::Dbms, "db").unwrap().inserted().unwrap();
        let removed = project.remove_child(&dbms).unwrap();
        assert!(Arc::ptr_eq(&removed, &dbms));
        assert!(dbms.parent().is_none());
        assert!(project.remove_child(&dbms).is_none());
        assert!(matches!(
            project.find(NodeKind::Dbms, "db"),
            Err(ConfigError::NotFound { .. })
        ));
        assert!(project.add_child(&dbms).unwrap().is_inserted());
    }

    #[test]
    fn test_find_wrong_kind() {
        let project = Node::project("shop").unwrap();
        assert_eq!(
            project.find(NodeKind::Table, "users").unwrap_err(),
            ConfigError::WrongKind {
                node: String::from("shop"),
                node_kind: NodeKind::Project,
                kind: NodeKind::Table,
            }
        );
        assert!(project.children_of_kind(NodeKind::Schema).is_err());
        assert!(project.count_of_kind(NodeKind::Column).is_err());
    }

    #[test]
    fn test_children_sorted_by_name_then_container() {
        let (_, table) = table();
        for name in ["name", "id", "email"] {
            let _ = table.add_new_child(NodeKind::Column, name).unwrap();
        }
        let _ = table.add_new_child(NodeKind::Index, "id").unwrap();
        let _ = table.add_new_child(NodeKind::ForeignKey, "fk_org").unwrap();

        let stream = table.children();
        assert_eq!(stream.names(), vec!["email", "fk_org", "id", "id", "name"]);
        let kinds: Vec<NodeKind> = stream.iter().map(|n| n.kind()).collect();
        assert_eq!(kinds[2], NodeKind::Column);
        assert_eq!(kinds[3], NodeKind::Index);

        // restartable
        assert_eq!(stream.iter().count(), stream.len());
        assert_eq!(
            table.children_of_kind(NodeKind::Column).unwrap().names(),
            vec!["email", "id", "name"]
        );
    }

    #[test]
    fn test_rename() {
        let project = Node::project("shop").unwrap();
        let a = project.add_new_child(NodeKind::Dbms, "a").unwrap().inserted().unwrap();
        let b = project.add_new_child(NodeKind::Dbms, "b").unwrap().inserted().unwrap();

        assert!(matches!(
            b.set_name("a").unwrap(),
            RenameOutcome::Conflict(ref n) if Arc::ptr_eq(n, &a)
        ));
        assert_eq!(b.name(), "b");
        assert!(matches!(b.set_name("b").unwrap(), RenameOutcome::Unchanged));
        assert!(matches!(b.set_name("c").unwrap(), RenameOutcome::Renamed));
        assert!(project.find(NodeKind::Dbms, "c").is_ok());
        assert!(b.set_name("").is_err());
    }

    #[test]
    fn test_attributes_kind_checked() {
        let (_, table) = table();
        let column = table.add_new_child(NodeKind::Column, "id").unwrap().inserted().unwrap();
        assert!(column
            .set_attributes(ConfigNode::Table(crate::attributes::TableAttributes::default()))
            .is_err());
        column
            .update_attributes(|attrs| {
                if let ConfigNode::Column(c) = attrs {
                    c.type_name = String::from("BIGINT");
                }
            })
            .unwrap();
        assert!(matches!(
            column.attributes(),
            ConfigNode::Column(ColumnAttributes { ref type_name, .. }) if type_name == "BIGINT"
        ));
    }

    #[test]
    fn test_ancestry() {
        let (project, table) = table();
        let column = table.add_new_child(NodeKind::Column, "id").unwrap().inserted().unwrap();
        assert_eq!(column.path(), vec!["shop", "db", "public", "users", "id"]);
        assert!(Arc::ptr_eq(&column.root(), &project));
        assert_eq!(column.ancestor(NodeKind::Schema).unwrap().name(), "public");
        assert!(column.ancestor(NodeKind::Column).is_none());
    }

    #[test]
    fn test_field_spec() {
        let (project, table) = table();
        let column = table.add_new_child(NodeKind::Column, "id").unwrap().inserted().unwrap();
        column
            .set_attributes(ConfigNode::Column(ColumnAttributes {
                ordinal_position: 1,
                type_name: String::from("INTEGER"),
                ..ColumnAttributes::default()
            }))
            .unwrap();

        let spec = column.field_spec().unwrap();
        assert_eq!(spec.identifier.to_string(), "users.id");
        assert_eq!(spec.type_name, "INTEGER");
        assert!(!spec.nullable);

        assert!(matches!(project.field_spec(), Err(ConfigError::WrongKind { .. })));
        let detached = table.create_child(NodeKind::Column, "loose").unwrap();
        assert!(matches!(detached.field_spec(), Err(ConfigError::Detached { .. })));
    }

    #[test]
    fn test_enabled_fires_only_on_change() {
        let project = Node::project("shop").unwrap();
        let events = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&events);
        let _ = project.subscribe(move |_: &TreeEvent| *sink.lock().unwrap() += 1);
        project.set_enabled(true);
        project.set_enabled(false);
        project.set_enabled(false);
        assert!(!project.is_enabled());
        assert_eq!(*events.lock().unwrap(), 1);
    }

    #[test]
    fn test_expand_all() {
        let (project, table) = table();
        let column = table.add_new_child(NodeKind::Column, "id").unwrap().inserted().unwrap();
        project.set_expanded_all(true);
        assert!(project.is_expanded());
        assert!(table.is_expanded());
        assert!(column.is_expanded());
        project.set_expanded_all(false);
        assert!(!table.is_expanded());
        assert!(!column.is_expanded());
    }

    #[test]
    fn test_clear_children() {
        let (_, table) = table();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let _ = table.subscribe(move |event: &TreeEvent| {
            if let TreeEvent::Removed { child, .. } = event {
                sink.lock().unwrap().push(child.name());
            }
        });
        for name in ["name", "id"] {
            let _ = table.add_new_child(NodeKind::Column, name).unwrap();
        }
        let _ = table.add_new_child(NodeKind::Index, "users_pk").unwrap();

        let removed = table.clear_children(NodeKind::Column).unwrap();
        assert_eq!(removed.len(), 2);
        assert!(removed.iter().all(|c| c.parent().is_none()));
        assert_eq!(*events.lock().unwrap(), vec!["id", "name"]);
        assert_eq!(table.count_of_kind(NodeKind::Column).unwrap(), 0);
        assert_eq!(table.count(), 1);

        assert!(table.clear_children(NodeKind::Column).unwrap().is_empty());
        assert!(matches!(
            table.clear_children(NodeKind::Table),
            Err(ConfigError::WrongKind { .. })
        ));
    }
}
