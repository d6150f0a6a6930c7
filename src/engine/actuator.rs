//! Fires entry, exit and init pseudo-events and checks the replies.

use crate::core::{Action, Event, Fault, Handling, Journal, StateId, StateTree};

/// Borrowed view of a machine used while one event or transition is
/// processed.
pub(crate) struct Actuator<'a, C, E> {
    tree: &'a StateTree<C, E>,
    context: &'a mut C,
    journal: Option<&'a mut Journal>,
}

impl<'a, C, E> Actuator<'a, C, E> {
    pub(crate) fn new(
        tree: &'a StateTree<C, E>,
        context: &'a mut C,
        journal: Option<&'a mut Journal>,
    ) -> Self {
        Self {
            tree,
            context,
            journal,
        }
    }

    pub(crate) fn tree(&self) -> &'a StateTree<C, E> {
        self.tree
    }

    /// Deliver a user event to one state.
    pub(crate) fn deliver(&mut self, state: StateId, event: &Event<E>) -> Handling {
        self.tree.invoke(state, event, self.context)
    }

    /// Run the entry action of `state`.
    pub(crate) fn enter(&mut self, state: StateId) -> Result<(), Fault> {
        tracing::trace!(%state, name = self.name(state), "entry");
        match self.fire(state, &Event::Entry, Action::Entry) {
            Handling::Transition(_) => Err(Fault::TransitionFromEntry { state }),
            _ => Ok(()),
        }
    }

    /// Run the exit action of `state`.
    pub(crate) fn exit(&mut self, state: StateId) -> Result<(), Fault> {
        tracing::trace!(%state, name = self.name(state), "exit");
        match self.fire(state, &Event::Exit, Action::Exit) {
            Handling::Transition(_) => Err(Fault::TransitionFromExit { state }),
            _ => Ok(()),
        }
    }

    /// Follow initial transitions from `state` down to a leaf.
    ///
    /// Every step must name a direct child, which is entered before the
    /// chain continues from it. Returns the leaf the chain settles on.
    pub(crate) fn run_init_chain(&mut self, state: StateId) -> Result<StateId, Fault> {
        let mut current = state;
        loop {
            tracing::trace!(state = %current, name = self.name(current), "init");
            match self.fire(current, &Event::Init, Action::Init) {
                Handling::Unhandled => {
                    if !self.tree.is_leaf(current) {
                        return Err(Fault::InitEndedOnComposite { state: current });
                    }
                    return Ok(current);
                }
                Handling::Handled => return Err(Fault::InitWithoutTarget { state: current }),
                Handling::Transition(transition) => {
                    let target = transition.target;
                    if self.tree.parent(target) != Some(current) {
                        return Err(Fault::InitTargetNotChild {
                            state: current,
                            target,
                        });
                    }
                    self.enter(target)?;
                    current = target;
                }
            }
        }
    }

    fn fire(&mut self, state: StateId, event: &Event<E>, action: Action) -> Handling {
        if let Some(journal) = self.journal.as_deref_mut() {
            journal.record(state, action);
        }
        self.tree.invoke(state, event, self.context)
    }

    fn name(&self, state: StateId) -> &'a str {
        self.tree.name(state).unwrap_or("?")
    }
}
