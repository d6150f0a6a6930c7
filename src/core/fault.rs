//! Runtime contract violations.

use super::state::StateId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A violated handler contract or a corrupted tree, detected while running.
///
/// Faults are fatal for the machine that hit them: it never continues after
/// one.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fault {
    #[error("Entry handler of state {state} requested a transition")]
    TransitionFromEntry { state: StateId },

    #[error("Exit handler of state {state} requested a transition")]
    TransitionFromExit { state: StateId },

    #[error("Init handler of state {state} returned Handled without naming a substate")]
    InitWithoutTarget { state: StateId },

    #[error("Init handler of state {state} targets {target}, which is not a direct child")]
    InitTargetNotChild { state: StateId, target: StateId },

    #[error("Init chain stopped at composite state {state}; it needs an initial transition")]
    InitEndedOnComposite { state: StateId },

    #[error("State {state} requested a transition to {target}, which is not in the tree")]
    TargetOutsideTree { state: StateId, target: StateId },

    #[error("State {state} requested a transition to the root state")]
    TargetIsRoot { state: StateId },

    #[error("State {state} is not in the tree")]
    UnknownState { state: StateId },

    #[error("Path from state {state} to the root exceeds {max} levels")]
    DepthExceeded { state: StateId, max: usize },

    #[error("States {source_state} and {target} share no common ancestor")]
    NoCommonAncestor {
        source_state: StateId,
        target: StateId,
    },
}
