//! Event dispatch.
//!
//! An event is offered to the current leaf first and then to each ancestor in
//! turn until some handler claims it. Events nobody claims are dropped.

use super::actuator::Actuator;
use super::executor;
use crate::core::{Event, Fault, Handling, StateId, Transition};

/// Where an event ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// No state claimed the event.
    Dropped,
    /// `by` consumed the event without a transition.
    Handled { by: StateId },
    /// `by` consumed the event and requested a transition.
    Transition { by: StateId, transition: Transition },
}

/// Bubble `event` up from `current` until a handler claims it.
pub(crate) fn dispatch<C, E>(
    actuator: &mut Actuator<'_, C, E>,
    current: StateId,
    event: &Event<E>,
) -> Result<Outcome, Fault> {
    let path = actuator.tree().path_to_root(current)?;
    for &state in path.as_slice() {
        match actuator.deliver(state, event) {
            Handling::Unhandled => continue,
            Handling::Handled => return Ok(Outcome::Handled { by: state }),
            Handling::Transition(transition) => {
                return Ok(Outcome::Transition {
                    by: state,
                    transition,
                })
            }
        }
    }
    Ok(Outcome::Dropped)
}

/// Dispatch `event` and carry out any transition it triggers. Returns the
/// state the machine rests in afterwards.
pub(crate) fn process<C, E>(
    actuator: &mut Actuator<'_, C, E>,
    current: StateId,
    event: &Event<E>,
) -> Result<StateId, Fault> {
    match dispatch(actuator, current, event)? {
        Outcome::Dropped => {
            tracing::debug!(state = %current, "event dropped; no state handled it");
            Ok(current)
        }
        Outcome::Handled { by } => {
            tracing::debug!(state = %current, handler = %by, "event handled");
            Ok(current)
        }
        Outcome::Transition { by, transition } => {
            executor::execute(actuator, current, by, transition)
        }
    }
}
