//! A running hierarchical state machine.

use super::actuator::Actuator;
use super::dispatcher;
use super::error::HsmError;
use super::policy::{FaultPolicy, MachineStatus};
use crate::builder::MachineBuilder;
use crate::core::{Event, Fault, Journal, StateId, StateTree};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Whether a machine can still make progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progress {
    /// Resting in a leaf state
    Underway,
    /// Reached the Final pseudo-state
    Finished,
}

/// One running instance over a shared, immutable [`StateTree`].
///
/// The machine owns its context and current-state pointer; the tree can be
/// shared by any number of machines. Call [`start`](Self::start) exactly once
/// before [`handle_event`](Self::handle_event).
///
/// # Example
///
/// ```rust
/// use hsm::builder::StateTreeBuilder;
/// use hsm::core::{Event, Handling};
/// use hsm::engine::{Machine, Progress};
/// use std::sync::Arc;
///
/// let unhandled = |_: &Event<()>, _: &mut u32| Handling::Unhandled;
/// let mut builder = StateTreeBuilder::new("root", unhandled);
/// let root = builder.root();
/// let idle = builder.add_state(root, "idle", |event, presses| match event {
///     Event::User(()) => {
///         *presses += 1;
///         Handling::finish()
///     }
///     _ => Handling::Unhandled,
/// });
/// builder.set_handler(root, move |event: &Event<()>, _: &mut u32| match event {
///     Event::Init => Handling::transition(idle),
///     _ => Handling::Unhandled,
/// });
///
/// let mut machine = Machine::new(Arc::new(builder.build()?), 0);
/// machine.start()?;
/// assert_eq!(machine.current_name(), Some("idle"));
///
/// assert_eq!(machine.handle_event(())?, Progress::Finished);
/// assert_eq!(*machine.context(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Machine<C, E> {
    id: Uuid,
    name: String,
    tree: Arc<StateTree<C, E>>,
    context: C,
    current: Option<StateId>,
    status: MachineStatus,
    policy: FaultPolicy,
    fault: Option<Fault>,
    journal: Option<Journal>,
}

impl<C, E> Machine<C, E> {
    /// Create a machine named `"hsm"` with the default fault policy and no
    /// journal.
    pub fn new(tree: Arc<StateTree<C, E>>, context: C) -> Self {
        Self::from_parts(tree, context, "hsm".to_string(), FaultPolicy::default(), false)
    }

    /// Configure a machine with a [`MachineBuilder`].
    pub fn builder(tree: Arc<StateTree<C, E>>) -> MachineBuilder<C, E> {
        MachineBuilder::new(tree)
    }

    pub(crate) fn from_parts(
        tree: Arc<StateTree<C, E>>,
        context: C,
        name: String,
        policy: FaultPolicy,
        journal: bool,
    ) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            name,
            tree,
            context,
            current: None,
            status: MachineStatus::Created,
            policy,
            fault: None,
            journal: journal.then(|| Journal::new(id)),
        }
    }

    /// Run the init chain from the root to settle in the initial leaf.
    ///
    /// The root itself is never entered.
    pub fn start(&mut self) -> Result<Progress, HsmError> {
        if let Some(fault) = self.fault {
            return Err(HsmError::Halted(fault));
        }
        match self.status {
            MachineStatus::Created => {}
            MachineStatus::Aborted | MachineStatus::Faulted => return Err(HsmError::Aborted),
            MachineStatus::Running | MachineStatus::Finished => {
                return Err(HsmError::AlreadyStarted)
            }
        }

        let _span = tracing::debug_span!("hsm", machine = %self.name, id = %self.id).entered();
        let result = Actuator::new(&self.tree, &mut self.context, self.journal.as_mut())
            .run_init_chain(StateId::ROOT);

        match result {
            Ok(leaf) => {
                tracing::debug!(state = %leaf, name = self.tree.name(leaf), "started");
                self.current = Some(leaf);
                self.status = MachineStatus::Running;
                Ok(Progress::Underway)
            }
            Err(fault) => Err(self.fail(fault)),
        }
    }

    /// Deliver a user event.
    ///
    /// The event bubbles from the current leaf toward the root until a state
    /// claims it; unclaimed events are dropped. Once the machine has finished
    /// further events are ignored.
    pub fn handle_event(&mut self, event: E) -> Result<Progress, HsmError> {
        if let Some(fault) = self.fault {
            return Err(HsmError::Halted(fault));
        }
        match self.status {
            MachineStatus::Created => return Err(HsmError::NotStarted),
            MachineStatus::Finished => return Ok(Progress::Finished),
            MachineStatus::Aborted | MachineStatus::Faulted => return Err(HsmError::Aborted),
            MachineStatus::Running => {}
        }
        let Some(current) = self.current else {
            return Err(HsmError::NotStarted);
        };

        let _span = tracing::debug_span!("hsm", machine = %self.name, id = %self.id).entered();
        let event = Event::User(event);
        let result = dispatcher::process(
            &mut Actuator::new(&self.tree, &mut self.context, self.journal.as_mut()),
            current,
            &event,
        );

        match result {
            Ok(next) if next.is_final() => {
                self.current = Some(next);
                self.status = MachineStatus::Finished;
                Ok(Progress::Finished)
            }
            Ok(next) => {
                self.current = Some(next);
                Ok(Progress::Underway)
            }
            Err(fault) => Err(self.fail(fault)),
        }
    }

    /// Stop the machine on the spot. No exit actions run; every later call
    /// to [`start`](Self::start) or [`handle_event`](Self::handle_event)
    /// fails with [`HsmError::Aborted`].
    pub fn abort(&mut self) {
        tracing::debug!(machine = %self.name, id = %self.id, "aborted");
        self.current = None;
        self.status = MachineStatus::Aborted;
    }

    /// Current leaf, [`StateId::FINAL`] once finished, or `None` before
    /// start and after an abort or fault.
    pub fn current_state(&self) -> Option<StateId> {
        self.current
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.and_then(|state| self.tree.name(state))
    }

    /// Check if `state` is part of the active configuration: the current
    /// leaf or one of its ancestors.
    pub fn is_in(&self, state: StateId) -> bool {
        match self.current {
            Some(current) if !current.is_final() => self.tree.contains_state(state, current),
            _ => false,
        }
    }

    pub fn status(&self) -> MachineStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status == MachineStatus::Finished
    }

    /// The fault that halted this machine, if any.
    pub fn fault(&self) -> Option<Fault> {
        self.fault
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }

    pub fn tree(&self) -> &Arc<StateTree<C, E>> {
        &self.tree
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> FaultPolicy {
        self.policy
    }

    /// The action journal, when enabled.
    pub fn journal(&self) -> Option<&Journal> {
        self.journal.as_ref()
    }

    pub fn journal_mut(&mut self) -> Option<&mut Journal> {
        self.journal.as_mut()
    }

    fn fail(&mut self, fault: Fault) -> HsmError {
        tracing::error!(machine = %self.name, id = %self.id, %fault, "state machine fault");
        if self.policy == FaultPolicy::Panic {
            panic!("state machine '{}' faulted: {fault}", self.name);
        }
        self.current = None;
        self.status = MachineStatus::Faulted;
        self.fault = Some(fault);
        HsmError::Fault(fault)
    }
}

impl<C, E> fmt::Debug for Machine<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("status", &self.status)
            .field("current", &self.current)
            .field("fault", &self.fault)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StateTreeBuilder;
    use crate::core::{Action, Handling};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Ev {
        Toggle,
        Stop,
        Break,
    }

    // root -> {off, on}
    fn switch() -> Arc<StateTree<u32, Ev>> {
        let off = StateId(1);
        let on = StateId(2);
        let mut builder = StateTreeBuilder::new("root", move |event: &Event<Ev>, _: &mut u32| {
            match event {
                Event::Init => Handling::transition(off),
                Event::User(Ev::Stop) => Handling::finish(),
                Event::User(Ev::Break) => Handling::transition(StateId(40)),
                _ => Handling::Unhandled,
            }
        });
        builder.add_state(StateId::ROOT, "off", move |event, _| match event {
            Event::User(Ev::Toggle) => Handling::transition(on),
            _ => Handling::Unhandled,
        });
        builder.add_state(StateId::ROOT, "on", move |event, flips| match event {
            Event::Entry => {
                *flips += 1;
                Handling::Handled
            }
            Event::User(Ev::Toggle) => Handling::transition(off),
            _ => Handling::Unhandled,
        });
        Arc::new(builder.build().unwrap())
    }

    #[test]
    fn start_settles_in_initial_leaf() {
        let mut machine = Machine::new(switch(), 0);

        assert_eq!(machine.status(), MachineStatus::Created);
        assert_eq!(machine.start(), Ok(Progress::Underway));
        assert_eq!(machine.current_name(), Some("off"));
        assert!(machine.is_in(StateId::ROOT));
        assert_eq!(machine.status(), MachineStatus::Running);
    }

    #[test]
    fn events_before_start_are_rejected() {
        let mut machine = Machine::new(switch(), 0);

        assert_eq!(machine.handle_event(Ev::Toggle), Err(HsmError::NotStarted));
    }

    #[test]
    fn start_runs_once() {
        let mut machine = Machine::new(switch(), 0);
        machine.start().unwrap();

        assert_eq!(machine.start(), Err(HsmError::AlreadyStarted));
    }

    #[test]
    fn events_drive_transitions() {
        let mut machine = Machine::new(switch(), 0);
        machine.start().unwrap();

        machine.handle_event(Ev::Toggle).unwrap();
        assert_eq!(machine.current_name(), Some("on"));
        machine.handle_event(Ev::Toggle).unwrap();
        machine.handle_event(Ev::Toggle).unwrap();

        assert_eq!(machine.current_name(), Some("on"));
        assert_eq!(*machine.context(), 2);
    }

    #[test]
    fn final_state_ignores_later_events() {
        let mut machine = Machine::new(switch(), 0);
        machine.start().unwrap();

        assert_eq!(machine.handle_event(Ev::Stop), Ok(Progress::Finished));
        assert!(machine.is_finished());
        assert_eq!(machine.current_state(), Some(StateId::FINAL));
        assert!(!machine.is_in(StateId::ROOT));
        assert_eq!(machine.handle_event(Ev::Toggle), Ok(Progress::Finished));
    }

    #[test]
    fn fault_halts_the_machine() {
        let mut machine = Machine::new(switch(), 0);
        machine.start().unwrap();

        let fault = Fault::TargetOutsideTree {
            state: StateId::ROOT,
            target: StateId(40),
        };
        assert_eq!(machine.handle_event(Ev::Break), Err(HsmError::Fault(fault)));
        assert_eq!(machine.status(), MachineStatus::Faulted);
        assert_eq!(machine.fault(), Some(fault));
        assert_eq!(machine.handle_event(Ev::Toggle), Err(HsmError::Halted(fault)));
    }

    #[test]
    #[should_panic(expected = "faulted")]
    fn panic_policy_panics() {
        let mut machine = Machine::builder(switch())
            .context(0)
            .on_fault(FaultPolicy::Panic)
            .build()
            .unwrap();
        machine.start().unwrap();

        let _ = machine.handle_event(Ev::Break);
    }

    #[test]
    fn abort_stops_without_exits() {
        let mut machine = Machine::builder(switch())
            .context(0)
            .journal(true)
            .build()
            .unwrap();
        machine.start().unwrap();
        let recorded = machine.journal().map(Journal::len);

        machine.abort();

        assert_eq!(machine.status(), MachineStatus::Aborted);
        assert_eq!(machine.current_state(), None);
        assert_eq!(machine.journal().map(Journal::len), recorded);
        assert_eq!(machine.handle_event(Ev::Toggle), Err(HsmError::Aborted));
    }

    #[test]
    fn journal_records_lifecycle_actions() {
        let mut machine = Machine::builder(switch())
            .name("switch")
            .context(0)
            .journal(true)
            .build()
            .unwrap();
        machine.start().unwrap();
        machine.handle_event(Ev::Toggle).unwrap();

        let journal = machine.journal().unwrap();
        assert_eq!(journal.machine(), machine.id());
        assert_eq!(
            journal.actions(),
            vec![
                (StateId::ROOT, Action::Init),
                (StateId(1), Action::Entry),
                (StateId(1), Action::Init),
                (StateId(1), Action::Exit),
                (StateId(2), Action::Entry),
                (StateId(2), Action::Init),
            ]
        );
        assert_eq!(machine.name(), "switch");
    }
}
