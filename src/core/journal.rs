//! Lifecycle action journal.
//!
//! A [`Journal`] records every entry, exit and init invocation a machine
//! performs, in order, with a timestamp. Journaling allocates, so machines
//! only keep one when asked to.

use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Lifecycle action fired on a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Entry,
    Exit,
    Init,
}

/// Record of a single lifecycle action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// The state whose handler was invoked
    pub state: StateId,
    /// Which pseudo-event it received
    pub action: Action,
    /// When the action fired
    pub timestamp: DateTime<Utc>,
}

/// Ordered record of lifecycle actions for one machine.
///
/// # Example
///
/// ```rust
/// use hsm::core::{Action, Journal, StateId};
/// use uuid::Uuid;
///
/// let mut journal = Journal::new(Uuid::new_v4());
/// journal.record(StateId::ROOT, Action::Init);
///
/// assert_eq!(journal.len(), 1);
/// assert!(journal.entered().is_empty());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Journal {
    machine: Uuid,
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new(machine: Uuid) -> Self {
        Self {
            machine,
            entries: Vec::new(),
        }
    }

    /// Id of the machine this journal belongs to.
    pub fn machine(&self) -> Uuid {
        self.machine
    }

    pub fn record(&mut self, state: StateId, action: Action) {
        self.entries.push(JournalEntry {
            state,
            action,
            timestamp: Utc::now(),
        });
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(state, action)` pairs in firing order.
    pub fn actions(&self) -> Vec<(StateId, Action)> {
        self.entries.iter().map(|e| (e.state, e.action)).collect()
    }

    /// States entered, in order.
    pub fn entered(&self) -> Vec<StateId> {
        self.filter(Action::Entry)
    }

    /// States exited, in order.
    pub fn exited(&self) -> Vec<StateId> {
        self.filter(Action::Exit)
    }

    /// Time between the first and last recorded action.
    ///
    /// Returns `None` if nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.entries.first()?;
        let last = self.entries.last()?;
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Serialize the journal as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    fn filter(&self, action: Action) -> Vec<StateId> {
        self.entries
            .iter()
            .filter(|e| e.action == action)
            .map(|e| e.state)
            .collect()
    }
}
