//! Errors returned by running machines.

use crate::core::Fault;
use thiserror::Error;

/// Errors that can occur when starting a machine or handling an event.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum HsmError {
    #[error("Machine has not been started. Call .start() before handling events")]
    NotStarted,

    #[error("Machine has already been started")]
    AlreadyStarted,

    #[error("Machine was aborted")]
    Aborted,

    #[error("Machine halted after an earlier fault: {0}")]
    Halted(Fault),

    #[error(transparent)]
    Fault(#[from] Fault),
}

impl HsmError {
    /// The contract violation behind this error, if any.
    pub fn fault(&self) -> Option<Fault> {
        match self {
            Self::Halted(fault) | Self::Fault(fault) => Some(*fault),
            _ => None,
        }
    }
}
