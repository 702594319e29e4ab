//! Lazy pre-order traversal.

use std::iter::FusedIterator;

use crate::node::NodeRef;

/// Pre-order walk over a subtree, yielding the nodes a predicate accepts.
///
/// Children are visited in the same order as [`Node::children`]. Each
/// node's children are read when the node is reached, so the walk reflects
/// the tree as it is while iterating. Dropping the iterator ends the walk.
///
/// [`Node::children`]: crate::Node::children
pub struct Traverse<P> {
    stack: Vec<NodeRef>,
    predicate: P,
}

impl<P> Traverse<P>
where
    P: FnMut(&NodeRef) -> bool,
{
    pub(crate) fn new(start: NodeRef, predicate: P) -> Self {
        Self {
            stack: vec![start],
            predicate,
        }
    }
}

impl<P> Iterator for Traverse<P>
where
    P: FnMut(&NodeRef) -> bool,
{
    type Item = NodeRef;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            let children: Vec<NodeRef> = node.children().into_iter().collect();
            self.stack.extend(children.into_iter().rev());
            if (self.predicate)(&node) {
                return Some(node);
            }
        }
        None
    }
}

impl<P> FusedIterator for Traverse<P> where P: FnMut(&NodeRef) -> bool {}
