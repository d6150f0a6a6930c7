//! hsm: hierarchical state machines with statechart transition semantics
//!
//! States form a tree. Each state has one handler that reacts to user events
//! and to three pseudo-events: entry, exit and init. Events a state does not
//! handle bubble up to its superstate, so common behavior lives once in an
//! ancestor instead of being repeated in every leaf.
//!
//! # Core Concepts
//!
//! - **StateTree**: Immutable, validated hierarchy shared by many machines
//! - **StateHandler**: Per-state behavior, usually a closure or a `HandlerTable`
//! - **Transitions**: Default, Local or External, executed around the least
//!   common ancestor with stack-only bookkeeping
//! - **Machine**: One running instance with its own context and current leaf
//!
//! # Example
//!
//! ```rust
//! use hsm::builder::StateTreeBuilder;
//! use hsm::core::{Event, HandlerTable, Handling, StateId};
//! use hsm::engine::Machine;
//! use std::sync::Arc;
//!
//! #[derive(Clone, Copy, PartialEq)]
//! enum Switch {
//!     Toggle,
//!     Reset,
//! }
//!
//! let mut builder = StateTreeBuilder::<u32, Switch>::with_root("root", HandlerTable::new());
//! let root = builder.root();
//! let off = builder.add_handler(root, "off", HandlerTable::new());
//! let on = builder.add_handler(root, "on", HandlerTable::new());
//!
//! builder.set_handler(
//!     root,
//!     HandlerTable::new()
//!         .initial(off)
//!         .on(Switch::Reset, move |_, _| Handling::transition(off)),
//! );
//! builder.set_handler(
//!     off,
//!     HandlerTable::new().on(Switch::Toggle, move |_, _| Handling::transition(on)),
//! );
//! builder.set_handler(
//!     on,
//!     HandlerTable::new()
//!         .on_entry(|flips: &mut u32| *flips += 1)
//!         .on(Switch::Toggle, move |_, _| Handling::transition(off)),
//! );
//!
//! let tree = Arc::new(builder.build()?);
//! let mut machine = Machine::new(tree, 0u32);
//! machine.start()?;
//!
//! machine.handle_event(Switch::Toggle)?;
//! assert!(machine.is_in(on));
//!
//! // "on" does not handle Reset, so it bubbles to the root.
//! machine.handle_event(Switch::Reset)?;
//! assert_eq!(machine.current_state(), Some(off));
//! assert_eq!(*machine.context(), 1);
//! assert!(machine.is_in(StateId::ROOT));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder, StateTreeBuilder};
pub use crate::core::{Event, Fault, HandlerTable, Handling, StateHandler, StateId, StateTree};
pub use crate::core::{Transition, TransitionKind};
pub use engine::{FaultPolicy, HsmError, Machine, MachineStatus, Progress};
