//! Fixed-capacity ancestor paths and their intersection.
//!
//! A [`Path`] lists a state followed by each of its superstates up to and
//! including the root. It lives on the stack, so computing a transition never
//! allocates.

use super::state::StateId;

/// Maximum number of nesting levels (root included) any tree may have.
pub const MAX_DEPTH: usize = 16;

/// Ordered child-to-root chain of states, at most [`MAX_DEPTH`] long.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Path {
    nodes: [StateId; MAX_DEPTH],
    len: usize,
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

impl Path {
    pub fn new() -> Self {
        Self {
            nodes: [StateId::FINAL; MAX_DEPTH],
            len: 0,
        }
    }

    /// Append the next superstate. Returns `false` when the path is full.
    pub fn push(&mut self, state: StateId) -> bool {
        if self.len == MAX_DEPTH {
            return false;
        }
        self.nodes[self.len] = state;
        self.len += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Option<StateId> {
        self.as_slice().get(index).copied()
    }

    /// The state the path was built from.
    pub fn start(&self) -> Option<StateId> {
        self.get(0)
    }

    /// The last state on the path (the root for a complete path).
    pub fn end(&self) -> Option<StateId> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    pub fn as_slice(&self) -> &[StateId] {
        &self.nodes[..self.len]
    }

    /// Position of `state` on the path.
    pub fn position(&self, state: StateId) -> Option<usize> {
        self.as_slice().iter().position(|&node| node == state)
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.position(state).is_some()
    }
}

/// Least common ancestor of two child-to-root paths.
///
/// Scans `b` from its start toward the root and returns the first state that
/// also occurs in `a`, as `(index_in_a, index_in_b)`. Scanning root-ward is
/// what makes the match the closest common ancestor rather than the highest.
/// Returns `None` when the paths share no state.
pub fn intersect(a: &Path, b: &Path) -> Option<(usize, usize)> {
    b.as_slice()
        .iter()
        .enumerate()
        .find_map(|(index_in_b, &node)| a.position(node).map(|index_in_a| (index_in_a, index_in_b)))
}
