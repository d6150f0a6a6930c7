//! State identity and the handler capability every state implements.
//!
//! States live in a flat arena owned by [`StateTree`](super::StateTree) and are
//! referred to by [`StateId`]. Behavior is attached through [`StateHandler`],
//! a single-method capability invoked for user events and the three
//! pseudo-events alike.

use super::event::{Event, Handling};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a state inside one [`StateTree`](super::StateTree).
///
/// Ids are handed out by the tree builder in creation order. The root is
/// always [`StateId::ROOT`]. [`StateId::FINAL`] is a reserved sentinel naming
/// the Final pseudo-state; it never refers to a stored node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct StateId(pub(crate) usize);

impl StateId {
    /// The root state of every tree.
    pub const ROOT: StateId = StateId(0);

    /// The Final pseudo-state. Transitioning here finishes the machine.
    pub const FINAL: StateId = StateId(usize::MAX);

    /// Position of this state in the tree arena.
    pub fn index(self) -> usize {
        self.0
    }

    /// Check if this id is the Final pseudo-state sentinel.
    pub fn is_final(self) -> bool {
        self == Self::FINAL
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_final() {
            write!(f, "#final")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Behavior of a single state.
///
/// One handler serves every event kind for its state, including the
/// [`Event::Entry`], [`Event::Exit`] and [`Event::Init`] pseudo-events.
///
/// Contract:
/// - entry and exit must never return [`Handling::Transition`];
/// - init returns [`Handling::Unhandled`] for a leaf, or a transition naming
///   a direct child of the state.
///
/// Closures of the shape `Fn(&Event<E>, &mut C) -> Handling` implement this
/// trait directly.
///
/// # Example
///
/// ```rust
/// use hsm::core::{Event, Handling, StateHandler};
///
/// struct Counter;
///
/// impl StateHandler<u32, ()> for Counter {
///     fn handle(&self, event: &Event<()>, hits: &mut u32) -> Handling {
///         match event {
///             Event::User(()) => {
///                 *hits += 1;
///                 Handling::Handled
///             }
///             _ => Handling::Unhandled,
///         }
///     }
/// }
///
/// let mut hits = 0;
/// assert_eq!(Counter.handle(&Event::User(()), &mut hits), Handling::Handled);
/// assert_eq!(hits, 1);
/// ```
pub trait StateHandler<C, E>: Send + Sync {
    /// React to one event on behalf of this state.
    fn handle(&self, event: &Event<E>, context: &mut C) -> Handling;
}

impl<C, E, F> StateHandler<C, E> for F
where
    F: Fn(&Event<E>, &mut C) -> Handling + Send + Sync,
{
    fn handle(&self, event: &Event<E>, context: &mut C) -> Handling {
        self(event, context)
    }
}
