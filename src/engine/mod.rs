//! The running side of a state machine.
//!
//! A [`Machine`] pairs a shared [`StateTree`](crate::core::StateTree) with a
//! context and a current-state pointer. Events bubble from the current leaf
//! toward the root; transitions fire exit and entry actions around the least
//! common ancestor and then settle into a leaf through init transitions.

mod actuator;
mod dispatcher;
mod error;
mod executor;
mod machine;
mod policy;

pub use error::HsmError;
pub use machine::{Machine, Progress};
pub use policy::{FaultPolicy, MachineStatus};
