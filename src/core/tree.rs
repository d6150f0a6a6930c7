//! The immutable state tree.
//!
//! A [`StateTree`] is a flat arena of states built once by
//! [`StateTreeBuilder`](crate::builder::StateTreeBuilder). At runtime only the
//! child-to-parent link is followed; children are kept for leaf detection and
//! inspection.

use super::event::{Event, Handling};
use super::fault::Fault;
use super::path::{intersect, Path};
use super::state::{StateHandler, StateId};
use std::fmt;

pub(crate) struct StateNode<C, E> {
    pub(crate) name: String,
    pub(crate) handler: Box<dyn StateHandler<C, E>>,
    pub(crate) parent: Option<StateId>,
    pub(crate) children: Vec<StateId>,
    pub(crate) depth: usize,
}

/// Read-only hierarchy of states and their handlers.
///
/// The tree may be shared behind an `Arc` by any number of machines, each
/// running on its own thread.
pub struct StateTree<C, E> {
    pub(crate) nodes: Vec<StateNode<C, E>>,
    pub(crate) max_depth: usize,
}

impl<C, E> StateTree<C, E> {
    /// The root state.
    pub fn root(&self) -> StateId {
        StateId::ROOT
    }

    /// Number of states, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a built tree holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Maximum nesting levels this tree was built with.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn contains(&self, state: StateId) -> bool {
        state.index() < self.nodes.len()
    }

    /// All state ids in creation order.
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.nodes.len()).map(StateId)
    }

    pub fn name(&self, state: StateId) -> Option<&str> {
        self.node(state).map(|node| node.name.as_str())
    }

    /// Look a state up by its name.
    pub fn find(&self, name: &str) -> Option<StateId> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(StateId)
    }

    /// Superstate of `state`; `None` for the root or an unknown id.
    pub fn parent(&self, state: StateId) -> Option<StateId> {
        self.node(state).and_then(|node| node.parent)
    }

    /// Direct substates of `state`.
    pub fn children(&self, state: StateId) -> &[StateId] {
        self.node(state)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Check if `state` is at the bottom of the hierarchy.
    pub fn is_leaf(&self, state: StateId) -> bool {
        self.children(state).is_empty()
    }

    /// Hops from `state` to the root.
    pub fn depth(&self, state: StateId) -> Option<usize> {
        self.node(state).map(|node| node.depth)
    }

    /// Check if `ancestor` is `state` itself or one of its superstates.
    pub fn contains_state(&self, ancestor: StateId, state: StateId) -> bool {
        let mut current = Some(state);
        while let Some(s) = current {
            if s == ancestor {
                return true;
            }
            current = self.parent(s);
        }
        false
    }

    /// Inclusive chain from `state` up to the root.
    pub fn path_to_root(&self, state: StateId) -> Result<Path, Fault> {
        if !self.contains(state) {
            return Err(Fault::UnknownState { state });
        }

        let mut path = Path::new();
        let mut current = Some(state);
        while let Some(s) = current {
            if path.len() == self.max_depth || !path.push(s) {
                return Err(Fault::DepthExceeded {
                    state,
                    max: self.max_depth,
                });
            }
            current = self.parent(s);
        }
        Ok(path)
    }

    /// Least common ancestor of `a` and `b`.
    pub fn lca(&self, a: StateId, b: StateId) -> Result<StateId, Fault> {
        let path_a = self.path_to_root(a)?;
        let path_b = self.path_to_root(b)?;
        intersect(&path_a, &path_b)
            .and_then(|(index_in_a, _)| path_a.get(index_in_a))
            .ok_or(Fault::NoCommonAncestor {
                source_state: a,
                target: b,
            })
    }

    pub(crate) fn invoke(&self, state: StateId, event: &Event<E>, context: &mut C) -> Handling {
        match self.node(state) {
            Some(node) => node.handler.handle(event, context),
            None => Handling::Unhandled,
        }
    }

    fn node(&self, state: StateId) -> Option<&StateNode<C, E>> {
        self.nodes.get(state.index())
    }
}

impl<C, E> fmt::Debug for StateTree<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.nodes.iter().map(|node| node.name.as_str()).collect();
        f.debug_struct("StateTree")
            .field("states", &names)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
