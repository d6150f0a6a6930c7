//! Declarative per-state handler tables.
//!
//! A [`HandlerTable`] is a [`StateHandler`] assembled from an optional entry
//! action, an optional exit action, an optional initial substate and an
//! ordered list of event rows. It saves writing a `match` over [`Event`] for
//! every state.

use super::event::{Event, Handling};
use super::guard::Guard;
use super::state::{StateHandler, StateId};

type Action<C> = Box<dyn Fn(&mut C) + Send + Sync>;
type Matcher<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;
type Reaction<C, E> = Box<dyn Fn(&E, &mut C) -> Handling + Send + Sync>;

struct Row<C, E> {
    matches: Matcher<E>,
    guard: Option<Guard<C>>,
    reaction: Reaction<C, E>,
}

/// Table-driven state handler.
///
/// Rows are tried in insertion order; the first row whose matcher accepts
/// the event and whose guard (if any) accepts the context decides the
/// handling. If no row applies the event is left unhandled and bubbles to
/// the superstate.
///
/// # Example
///
/// ```rust
/// use hsm::core::{Event, HandlerTable, Handling, StateHandler, StateId};
///
/// #[derive(PartialEq)]
/// enum Door {
///     Open,
///     Close,
/// }
///
/// let closed = StateId::ROOT;
/// let table = HandlerTable::<u32, Door>::new()
///     .on_entry(|count| *count += 1)
///     .on(Door::Close, move |_, _| Handling::transition(closed));
///
/// let mut count = 0;
/// assert_eq!(table.handle(&Event::Entry, &mut count), Handling::Handled);
/// assert_eq!(table.handle(&Event::User(Door::Open), &mut count), Handling::Unhandled);
/// assert_eq!(count, 1);
/// ```
pub struct HandlerTable<C, E> {
    entry: Option<Action<C>>,
    exit: Option<Action<C>>,
    initial: Option<StateId>,
    rows: Vec<Row<C, E>>,
}

impl<C, E> HandlerTable<C, E> {
    pub fn new() -> Self {
        Self {
            entry: None,
            exit: None,
            initial: None,
            rows: Vec::new(),
        }
    }

    /// Action run when the state is entered.
    pub fn on_entry<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.entry = Some(Box::new(action));
        self
    }

    /// Action run when the state is exited.
    pub fn on_exit<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.exit = Some(Box::new(action));
        self
    }

    /// Initial substate; must be a direct child of this state.
    pub fn initial(mut self, substate: StateId) -> Self {
        self.initial = Some(substate);
        self
    }

    /// React to events equal to `event`.
    pub fn on<F>(self, event: E, reaction: F) -> Self
    where
        C: 'static,
        E: PartialEq + Send + Sync + 'static,
        F: Fn(&E, &mut C) -> Handling + Send + Sync + 'static,
    {
        self.on_match(move |e| *e == event, reaction)
    }

    /// React to events equal to `event` while `guard` accepts the context.
    pub fn on_when<F>(self, event: E, guard: Guard<C>, reaction: F) -> Self
    where
        C: 'static,
        E: PartialEq + Send + Sync + 'static,
        F: Fn(&E, &mut C) -> Handling + Send + Sync + 'static,
    {
        self.push_row(Box::new(move |e| *e == event), Some(guard), Box::new(reaction))
    }

    /// React to any event accepted by `matcher`, e.g. one variant regardless
    /// of its payload.
    pub fn on_match<M, F>(self, matcher: M, reaction: F) -> Self
    where
        M: Fn(&E) -> bool + Send + Sync + 'static,
        F: Fn(&E, &mut C) -> Handling + Send + Sync + 'static,
    {
        self.push_row(Box::new(matcher), None, Box::new(reaction))
    }

    fn push_row(
        mut self,
        matches: Matcher<E>,
        guard: Option<Guard<C>>,
        reaction: Reaction<C, E>,
    ) -> Self {
        self.rows.push(Row {
            matches,
            guard,
            reaction,
        });
        self
    }

    fn react(&self, event: &E, context: &mut C) -> Handling {
        for row in &self.rows {
            if !(row.matches)(event) {
                continue;
            }
            if row.guard.as_ref().is_none_or(|g| g.check(context)) {
                return (row.reaction)(event, context);
            }
        }
        Handling::Unhandled
    }
}

impl<C, E> Default for HandlerTable<C, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, E> StateHandler<C, E> for HandlerTable<C, E> {
    fn handle(&self, event: &Event<E>, context: &mut C) -> Handling {
        match event {
            Event::Entry => run(self.entry.as_ref(), context),
            Event::Exit => run(self.exit.as_ref(), context),
            Event::Init => self
                .initial
                .map_or(Handling::Unhandled, Handling::transition),
            Event::User(e) => self.react(e, context),
        }
    }
}

fn run<C>(action: Option<&Action<C>>, context: &mut C) -> Handling {
    match action {
        Some(action) => {
            action(context);
            Handling::Handled
        }
        None => Handling::Unhandled,
    }
}
