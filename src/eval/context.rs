//! Per-node traversal context
//!
//! Every entry of the evolving nodelist carries the node, its parent, and the
//! prefix-shared step chain from the root. The chain is the single source of
//! truth for `@property`, `@index`, `@parentProperty`, `@path`, and the `~`
//! key-name selector.

use std::rc::Rc;

use crate::node::PathNode;
use crate::normalized::{Step, StepChain};

/// A document node plus the context it was reached through
#[derive(Debug)]
pub(crate) struct StepContext<'a, N: PathNode> {
    pub(crate) node: &'a N,
    pub(crate) parent: Option<&'a N>,
    pub(crate) chain: StepChain,
}

impl<'a, N: PathNode> Clone for StepContext<'a, N> {
    fn clone(&self) -> Self {
        Self {
            node: self.node,
            parent: self.parent,
            chain: self.chain.clone(),
        }
    }
}

impl<'a, N: PathNode> StepContext<'a, N> {
    /// Context for the document root
    #[inline]
    pub(crate) fn root(root: &'a N) -> Self {
        Self {
            node: root,
            parent: None,
            chain: StepChain::root(),
        }
    }

    /// Context for a mapping value reached via `key`
    #[inline]
    pub(crate) fn child_key(&self, key: Rc<str>, node: &'a N) -> Self {
        Self {
            node,
            parent: Some(self.node),
            chain: self.chain.push_key(key),
        }
    }

    /// Context for a sequence element reached via `index`
    #[inline]
    pub(crate) fn child_index(&self, index: usize, node: &'a N) -> Self {
        Self {
            node,
            parent: Some(self.node),
            chain: self.chain.push_index(index),
        }
    }

    /// The key or stringified index by which this node was reached
    ///
    /// `None` for the root, which was not reached through anything.
    pub(crate) fn property(&self) -> Option<String> {
        self.chain.last().map(Step::as_property)
    }

    /// The sequence index by which this node was reached, -1 otherwise
    pub(crate) fn index(&self) -> i64 {
        match self.chain.last() {
            Some(&Step::Index(index)) => index as i64,
            _ => -1,
        }
    }

    /// The traversal key of this node's parent, `""` when the parent is the
    /// root or absent
    pub(crate) fn parent_property(&self) -> String {
        self.chain
            .parent()
            .and_then(|parent| parent.last().map(Step::as_property))
            .unwrap_or_default()
    }

    /// Normalized path of this node
    pub(crate) fn path(&self) -> String {
        self.chain.render()
    }
}

/// Resolve the node a step chain points at, starting from the root
///
/// Used to recover grandparents for chained `^` selectors without storing an
/// ancestor stack per context.
pub(crate) fn resolve<'a, N: PathNode>(root: &'a N, chain: &StepChain) -> Option<&'a N> {
    let mut node = root;
    for step in chain.steps() {
        node = match step {
            Step::Key(key) => node.mapping_get(&key)?,
            Step::Index(index) => node.sequence_at(index)?,
        };
    }
    Some(node)
}
