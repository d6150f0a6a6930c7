//! Structural violations found while validating a state tree.

use crate::core::StateId;
use thiserror::Error;

/// A defect in the shape of a state tree.
///
/// Trees with any violation are rejected at build time and never run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeViolation {
    #[error("Tree has no root state")]
    MissingRoot,

    #[error("Depth limit {requested} is out of range (allowed: 1..={max})")]
    DepthLimitOutOfRange { requested: usize, max: usize },

    #[error("State '{name}' ({state}) has unknown parent {parent}")]
    UnknownParent {
        state: StateId,
        name: String,
        parent: StateId,
    },

    #[error("State '{name}' ({state}) has no parent; only the root may be parentless")]
    SecondRoot { state: StateId, name: String },

    #[error("State '{name}' ({state}) sits {levels} levels deep (max: {max})")]
    TooDeep {
        state: StateId,
        name: String,
        levels: usize,
        max: usize,
    },

    #[error("State '{name}' ({state}) has {count} substates (max: {max})")]
    TooManySubstates {
        state: StateId,
        name: String,
        count: usize,
        max: usize,
    },

    #[error("State name '{name}' is used by both {first} and {duplicate}")]
    DuplicateName {
        name: String,
        first: StateId,
        duplicate: StateId,
    },

    #[error("State {state} has an empty name")]
    EmptyName { state: StateId },
}
