//! Events delivered to state handlers and the results handlers return.

use super::state::StateId;
use serde::{Deserialize, Serialize};

/// An event seen by a state handler.
///
/// The three pseudo-events are synthesised by the engine to drive lifecycle
/// actions; hosts only ever inject [`Event::User`] values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event<E> {
    /// The state is being entered.
    Entry,
    /// The state is being exited.
    Exit,
    /// The state was just entered and may pick an initial substate.
    Init,
    /// A host event with an opaque payload.
    User(E),
}

impl<E> Event<E> {
    /// Check if this is one of the engine-generated pseudo-events.
    pub fn is_pseudo(&self) -> bool {
        !matches!(self, Self::User(_))
    }

    /// The user payload, if any.
    pub fn user(&self) -> Option<&E> {
        match self {
            Self::User(event) => Some(event),
            _ => None,
        }
    }

    /// Discriminant without the payload, for diagnostics.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Entry => EventKind::Entry,
            Self::Exit => EventKind::Exit,
            Self::Init => EventKind::Init,
            Self::User(_) => EventKind::User,
        }
    }
}

/// Payload-free discriminant of an [`Event`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Entry,
    Exit,
    Init,
    User,
}

/// How a transition treats the handler state when the target is that state
/// or one of its descendants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Same as [`TransitionKind::Local`].
    #[default]
    Default,
    /// Never exits a state that contains both source and target.
    Local,
    /// Exits and re-enters the handler state when it contains the target.
    External,
}

/// A requested move to `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub target: StateId,
    pub kind: TransitionKind,
}

/// Result of a handler for one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handling {
    /// Defer to the superstate.
    Unhandled,
    /// Consumed without a transition.
    Handled,
    /// Consumed and a transition was requested.
    Transition(Transition),
}

impl Handling {
    /// Request a [`TransitionKind::Default`] transition.
    pub fn transition(target: StateId) -> Self {
        Self::Transition(Transition {
            target,
            kind: TransitionKind::Default,
        })
    }

    /// Request a [`TransitionKind::Local`] transition.
    pub fn local(target: StateId) -> Self {
        Self::Transition(Transition {
            target,
            kind: TransitionKind::Local,
        })
    }

    /// Request a [`TransitionKind::External`] transition.
    pub fn external(target: StateId) -> Self {
        Self::Transition(Transition {
            target,
            kind: TransitionKind::External,
        })
    }

    /// Request a transition to the Final pseudo-state.
    pub fn finish() -> Self {
        Self::transition(StateId::FINAL)
    }

    pub fn is_unhandled(&self) -> bool {
        matches!(self, Self::Unhandled)
    }

    /// The requested transition, if any.
    pub fn as_transition(&self) -> Option<Transition> {
        match self {
            Self::Transition(transition) => Some(*transition),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pseudo_events_are_flagged() {
        assert!(Event::<()>::Entry.is_pseudo());
        assert!(Event::<()>::Exit.is_pseudo());
        assert!(Event::<()>::Init.is_pseudo());
        assert!(!Event::User(()).is_pseudo());
    }

    #[test]
    fn user_payload_is_exposed() {
        assert_eq!(Event::User(5).user(), Some(&5));
        assert_eq!(Event::<i32>::Init.user(), None);
        assert_eq!(Event::User(5).kind(), EventKind::User);
    }

    #[test]
    fn constructors_pick_the_kind() {
        let target = StateId(2);
        assert_eq!(
            Handling::transition(target).as_transition().map(|t| t.kind),
            Some(TransitionKind::Default)
        );
        assert_eq!(
            Handling::local(target).as_transition().map(|t| t.kind),
            Some(TransitionKind::Local)
        );
        assert_eq!(
            Handling::external(target).as_transition().map(|t| t.kind),
            Some(TransitionKind::External)
        );
        assert_eq!(
            Handling::finish().as_transition().map(|t| t.target),
            Some(StateId::FINAL)
        );
        assert_eq!(Handling::Handled.as_transition(), None);
        assert!(Handling::Unhandled.is_unhandled());
    }
}
