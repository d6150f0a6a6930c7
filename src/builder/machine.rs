//! Builder for configuring machine instances.

use crate::builder::error::BuildError;
use crate::core::StateTree;
use crate::engine::{FaultPolicy, Machine};
use std::sync::Arc;

/// Builder for a [`Machine`] over a shared tree.
///
/// # Example
///
/// ```rust
/// use hsm::builder::{MachineBuilder, StateTreeBuilder};
/// use hsm::core::{Event, Handling};
/// use hsm::engine::FaultPolicy;
/// use std::sync::Arc;
///
/// let tree = StateTreeBuilder::<(), ()>::new("root", |_: &Event<()>, _: &mut ()| {
///     Handling::Unhandled
/// })
/// .build()
/// .unwrap();
///
/// let machine = MachineBuilder::new(Arc::new(tree))
///     .name("worker")
///     .context(())
///     .on_fault(FaultPolicy::Halt)
///     .journal(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.name(), "worker");
/// assert!(machine.journal().is_some());
/// ```
pub struct MachineBuilder<C, E> {
    tree: Arc<StateTree<C, E>>,
    name: Option<String>,
    context: Option<C>,
    policy: FaultPolicy,
    journal: bool,
}

impl<C, E> MachineBuilder<C, E> {
    pub fn new(tree: Arc<StateTree<C, E>>) -> Self {
        Self {
            tree,
            name: None,
            context: None,
            policy: FaultPolicy::default(),
            journal: false,
        }
    }

    /// Name used in log output. Defaults to `"hsm"`.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the context (required).
    pub fn context(mut self, context: C) -> Self {
        self.context = Some(context);
        self
    }

    /// Choose how faults are reported.
    pub fn on_fault(mut self, policy: FaultPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Record every entry, exit and init action in a [`Journal`](crate::core::Journal).
    pub fn journal(mut self, enabled: bool) -> Self {
        self.journal = enabled;
        self
    }

    /// Build the machine.
    /// Returns an error if no context was given.
    pub fn build(self) -> Result<Machine<C, E>, BuildError> {
        let context = self.context.ok_or(BuildError::MissingContext)?;
        let name = self.name.unwrap_or_else(|| "hsm".to_string());
        Ok(Machine::from_parts(
            self.tree,
            context,
            name,
            self.policy,
            self.journal,
        ))
    }
}
