//! Core hierarchical state machine types.
//!
//! This module contains the static side of a state machine:
//! - State identity and the `StateHandler` capability
//! - Events, handling results and transition kinds
//! - The immutable `StateTree` arena and fixed-capacity ancestor `Path`s
//! - Declarative `HandlerTable`s with `Guard`ed rows
//! - The opt-in action `Journal`
//!
//! Nothing in here mutates a tree after it is built; the running side lives
//! in [`crate::engine`].

mod event;
mod fault;
mod guard;
mod journal;
mod path;
mod state;
mod table;
mod tree;

pub use event::{Event, EventKind, Handling, Transition, TransitionKind};
pub use fault::Fault;
pub use guard::Guard;
pub use journal::{Action, Journal, JournalEntry};
pub use path::{intersect, Path, MAX_DEPTH};
pub use state::{StateHandler, StateId};
pub use table::HandlerTable;
pub use tree::StateTree;

pub(crate) use tree::StateNode;
