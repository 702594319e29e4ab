//! Structural change notifications.
//!
//! Observers register on any node and receive every event raised in that
//! node's subtree. Events are delivered synchronously after the mutation
//! has been applied and after all tree locks are released, so an observer
//! may read or even mutate the tree from its callback.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::node::NodeRef;

/// A structural or property change in the tree.
#[derive(Debug, Clone)]
pub enum TreeEvent {
    /// `child` was inserted into `parent`.
    Added {
        /// The owning node.
        parent: NodeRef,
        /// The inserted child.
        child: NodeRef,
    },
    /// `child` was removed from `parent` and is now detached.
    Removed {
        /// The former owner.
        parent: NodeRef,
        /// The detached child.
        child: NodeRef,
    },
    /// `node` changed its name.
    Renamed {
        /// The renamed node.
        node: NodeRef,
        /// Name before the change.
        old_name: String,
    },
    /// `node` was enabled or disabled.
    EnabledChanged {
        /// The affected node.
        node: NodeRef,
        /// The new value.
        enabled: bool,
    },
    /// `node` had its kind-specific attributes replaced.
    AttributesChanged {
        /// The affected node.
        node: NodeRef,
    },
}

impl TreeEvent {
    /// The node the event is about (the child for add/remove).
    #[must_use]
    pub const fn subject(&self) -> &NodeRef {
        match self {
            Self::Added { child, .. } | Self::Removed { child, .. } => child,
            Self::Renamed { node, .. }
            | Self::EnabledChanged { node, .. }
            | Self::AttributesChanged { node } => node,
        }
    }

    /// Whether the event changed the shape of the tree.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::Added { .. } | Self::Removed { .. })
    }
}

/// Receives tree events.
pub trait TreeObserver: Send + Sync {
    /// Called once per event, in the order events occurred.
    fn on_event(&self, event: &TreeEvent);
}

impl<F> TreeObserver for F
where
    F: Fn(&TreeEvent) + Send + Sync,
{
    fn on_event(&self, event: &TreeEvent) {
        self(event);
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The observer registry owned by each node.
#[derive(Default)]
pub struct ChangeNotifier {
    next_id: AtomicU64,
    observers: RwLock<Vec<(SubscriptionId, Arc<dyn TreeObserver>)>>,
}

impl ChangeNotifier {
    /// Registers an observer.
    pub fn subscribe(&self, observer: Arc<dyn TreeObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, observer));
        id
    }

    /// Removes an observer. Returns false if the id was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self
            .observers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(registered, _)| *registered != id);
        observers.len() != before
    }

    /// Number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Delivers an event to every observer registered at the time of the call.
    pub fn notify(&self, event: &TreeEvent) {
        let observers: Vec<Arc<dyn TreeObserver>> = self
            .observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer.on_event(event);
        }
    }
}
