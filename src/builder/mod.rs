//! Builder API for state trees and machines.
//!
//! [`StateTreeBuilder`] assembles and validates the static hierarchy once;
//! [`MachineBuilder`] configures any number of running instances over it.

pub mod error;
pub mod machine;
pub mod tree;

pub use error::BuildError;
pub use machine::MachineBuilder;
pub use tree::StateTreeBuilder;
