//! What a machine does when it detects a fault.

use serde::{Deserialize, Serialize};

/// Strategy for handling runtime contract violations.
///
/// Whichever policy is chosen, a faulted machine never processes another
/// event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaultPolicy {
    /// Log the fault, latch it in the machine and return it as an error
    #[default]
    Halt,

    /// Panic on the calling thread
    Panic,
}

/// Lifecycle of one machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineStatus {
    /// Built but `start` has not run yet
    Created,
    /// Resting in a leaf state and accepting events
    Running,
    /// Reached the Final pseudo-state
    Finished,
    /// Stopped after a fault
    Faulted,
    /// Stopped by `abort`
    Aborted,
}

impl MachineStatus {
    /// Check if the machine can never process another event.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Faulted | Self::Aborted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halt_is_the_default_policy() {
        assert_eq!(FaultPolicy::default(), FaultPolicy::Halt);
    }

    #[test]
    fn terminal_statuses() {
        assert!(!MachineStatus::Created.is_terminal());
        assert!(!MachineStatus::Running.is_terminal());
        assert!(MachineStatus::Finished.is_terminal());
        assert!(MachineStatus::Faulted.is_terminal());
        assert!(MachineStatus::Aborted.is_terminal());
    }
}
