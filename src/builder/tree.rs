//! Builder for constructing state trees.

use crate::builder::error::BuildError;
use crate::core::{Event, Handling, StateHandler, StateId, StateNode, StateTree};
use crate::validation::{StateOutline, TreeRules};
use stillwater::validation::Validation;

struct Draft<C, E> {
    name: String,
    parent: Option<StateId>,
    handler: Box<dyn StateHandler<C, E>>,
}

/// Builder for a [`StateTree`].
///
/// States are appended under parents that already exist, so ids are handed
/// out in creation order and the root is always [`StateId::ROOT`]. Nothing is
/// checked until [`build`](Self::build), which reports every structural
/// violation at once.
///
/// # Example
///
/// ```rust
/// use hsm::builder::StateTreeBuilder;
/// use hsm::core::{Event, Handling};
///
/// let mut builder = StateTreeBuilder::<(), ()>::new("root", |_: &Event<()>, _: &mut ()| {
///     Handling::Unhandled
/// });
/// let root = builder.root();
/// let idle = builder.add_state(root, "idle", |_, _| Handling::Unhandled);
///
/// let tree = builder.build().unwrap();
/// assert_eq!(tree.parent(idle), Some(root));
/// ```
pub struct StateTreeBuilder<C, E> {
    drafts: Vec<Draft<C, E>>,
    rules: TreeRules,
}

impl<C, E> StateTreeBuilder<C, E> {
    /// Start a tree with a closure-backed root state.
    pub fn new<F>(root_name: impl Into<String>, root_handler: F) -> Self
    where
        F: Fn(&Event<E>, &mut C) -> Handling + Send + Sync + 'static,
    {
        Self::with_root(root_name, root_handler)
    }

    /// Start a tree with any [`StateHandler`] as the root.
    pub fn with_root<H>(root_name: impl Into<String>, root_handler: H) -> Self
    where
        H: StateHandler<C, E> + 'static,
    {
        Self {
            drafts: vec![Draft {
                name: root_name.into(),
                parent: None,
                handler: Box::new(root_handler),
            }],
            rules: TreeRules::default(),
        }
    }

    /// The root state.
    pub fn root(&self) -> StateId {
        StateId::ROOT
    }

    /// Limit nesting to `levels`, root included.
    pub fn max_depth(&mut self, levels: usize) -> &mut Self {
        self.rules.max_depth = levels;
        self
    }

    /// Limit the number of direct substates of any state.
    pub fn max_substates(&mut self, count: usize) -> &mut Self {
        self.rules.max_substates = count;
        self
    }

    /// Append a closure-backed state under `parent`.
    pub fn add_state<F>(&mut self, parent: StateId, name: impl Into<String>, handler: F) -> StateId
    where
        F: Fn(&Event<E>, &mut C) -> Handling + Send + Sync + 'static,
    {
        self.add_handler(parent, name, handler)
    }

    /// Append a state backed by any [`StateHandler`], such as a
    /// [`HandlerTable`](crate::core::HandlerTable).
    pub fn add_handler<H>(&mut self, parent: StateId, name: impl Into<String>, handler: H) -> StateId
    where
        H: StateHandler<C, E> + 'static,
    {
        let id = StateId(self.drafts.len());
        self.drafts.push(Draft {
            name: name.into(),
            parent: Some(parent),
            handler: Box::new(handler),
        });
        id
    }

    /// Replace the handler of a state that was already added.
    ///
    /// Composite states usually need the ids of their substates for their
    /// init transition, so a common pattern is to start with a placeholder
    /// handler and swap in the real one once the substates exist. Returns
    /// `false` if `state` was never added.
    pub fn set_handler<H>(&mut self, state: StateId, handler: H) -> bool
    where
        H: StateHandler<C, E> + 'static,
    {
        match self.drafts.get_mut(state.index()) {
            Some(draft) => {
                draft.handler = Box::new(handler);
                true
            }
            None => false,
        }
    }

    /// Validate and freeze the tree.
    pub fn build(self) -> Result<StateTree<C, E>, BuildError> {
        let verdict = {
            let outlines: Vec<StateOutline<'_>> = self
                .drafts
                .iter()
                .map(|draft| StateOutline {
                    name: &draft.name,
                    parent: draft.parent,
                })
                .collect();
            self.rules.check(&outlines)
        };

        if let Validation::Failure(violations) = verdict {
            let violations: Vec<_> = violations.iter().cloned().collect();
            tracing::error!(count = violations.len(), "rejecting malformed state tree");
            return Err(BuildError::InvalidTree(violations));
        }

        // Parents precede children, so one forward pass wires everything.
        let mut nodes: Vec<StateNode<C, E>> = Vec::with_capacity(self.drafts.len());
        for (index, draft) in self.drafts.into_iter().enumerate() {
            let depth = match draft.parent {
                Some(parent) => {
                    nodes[parent.index()].children.push(StateId(index));
                    nodes[parent.index()].depth + 1
                }
                None => 0,
            };
            nodes.push(StateNode {
                name: draft.name,
                handler: draft.handler,
                parent: draft.parent,
                children: Vec::new(),
                depth,
            });
        }

        tracing::debug!(states = nodes.len(), "built state tree");
        Ok(StateTree {
            nodes,
            max_depth: self.rules.max_depth,
        })
    }
}
