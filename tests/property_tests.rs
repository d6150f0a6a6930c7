//! Property-based tests for hierarchy navigation and transition execution.
//!
//! These tests use proptest to build random trees and check the engine
//! against a naive model that walks parent links directly.

use hsm::builder::StateTreeBuilder;
use hsm::core::{
    intersect, Event, Handling, StateId, StateTree, Transition, TransitionKind, MAX_DEPTH,
};
use hsm::engine::Machine;
use proptest::prelude::*;
use proptest::sample::Index;
use std::sync::Arc;

/// Ask the state `by` to take `transition`; every other state ignores it.
#[derive(Clone, Copy, Debug)]
struct Jump {
    by: StateId,
    transition: Transition,
}

/// A random tree as a parent table; `parents[i]` is the parent of state
/// `i + 1`, always an earlier state.
#[derive(Clone, Debug)]
struct Shape {
    parents: Vec<usize>,
}

impl Shape {
    fn len(&self) -> usize {
        self.parents.len() + 1
    }

    fn parent(&self, state: usize) -> Option<usize> {
        state.checked_sub(1).map(|i| self.parents[i])
    }

    fn children(&self, state: usize) -> Vec<usize> {
        (1..self.len())
            .filter(|&s| self.parent(s) == Some(state))
            .collect()
    }

    /// Naive ancestor chain, `state` first and the root last.
    fn ancestors(&self, state: usize) -> Vec<usize> {
        let mut chain = vec![state];
        let mut current = state;
        while let Some(parent) = self.parent(current) {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Deepest state on both ancestor chains.
    fn lca(&self, a: usize, b: usize) -> usize {
        let up_from_b = self.ancestors(b);
        self.ancestors(a)
            .into_iter()
            .find(|s| up_from_b.contains(s))
            .unwrap_or(0)
    }

    /// Follow first children down to a leaf.
    fn settle(&self, state: usize) -> Vec<usize> {
        let mut entered = Vec::new();
        let mut current = state;
        while let Some(&first) = self.children(current).first() {
            entered.push(first);
            current = first;
        }
        entered
    }

    fn build(&self) -> (StateTree<(), Jump>, Vec<StateId>) {
        let mut builder = StateTreeBuilder::new("s0", |_: &Event<Jump>, _: &mut ()| {
            Handling::Unhandled
        });
        let mut ids = vec![builder.root()];
        for (i, &parent) in self.parents.iter().enumerate() {
            let id = builder.add_state(ids[parent], format!("s{}", i + 1), |_, _| {
                Handling::Unhandled
            });
            ids.push(id);
        }

        for state in 0..self.len() {
            let me = ids[state];
            let first = self.children(state).first().map(|&c| ids[c]);
            builder.set_handler(me, move |event: &Event<Jump>, _: &mut ()| match event {
                Event::Init => first.map_or(Handling::Unhandled, Handling::transition),
                Event::User(jump) if jump.by == me => Handling::Transition(jump.transition),
                _ => Handling::Unhandled,
            });
        }

        (builder.build().expect("random trees stay within bounds"), ids)
    }
}

prop_compose! {
    fn arbitrary_shape()(picks in prop::collection::vec(any::<Index>(), 1..12)) -> Shape {
        let parents = picks
            .iter()
            .enumerate()
            .map(|(i, pick)| pick.index(i + 1))
            .collect();
        Shape { parents }
    }
}

fn arbitrary_kind() -> impl Strategy<Value = TransitionKind> {
    prop_oneof![
        Just(TransitionKind::Default),
        Just(TransitionKind::Local),
        Just(TransitionKind::External),
    ]
}

/// States exited and entered by a transition, computed from the parent table.
fn expected_actions(
    shape: &Shape,
    current: usize,
    handler: usize,
    target: usize,
    kind: TransitionKind,
) -> (Vec<usize>, Vec<usize>) {
    let mut exited: Vec<usize> = shape
        .ancestors(current)
        .into_iter()
        .take_while(|&s| s != handler)
        .collect();
    let mut entered = Vec::new();

    let lca = shape.lca(handler, target);
    if lca == handler {
        if kind == TransitionKind::External && handler != 0 {
            exited.push(handler);
            entered.push(handler);
        }
    } else {
        exited.extend(shape.ancestors(handler).into_iter().take_while(|&s| s != lca));
    }

    let mut down: Vec<usize> = shape
        .ancestors(target)
        .into_iter()
        .take_while(|&s| s != lca)
        .collect();
    down.reverse();
    entered.extend(down);
    entered.extend(shape.settle(target));

    (exited, entered)
}

proptest! {
    #[test]
    fn every_state_reaches_the_root(shape in arbitrary_shape()) {
        let (tree, ids) = shape.build();

        for (state, &id) in ids.iter().enumerate() {
            let path = tree.path_to_root(id).unwrap();
            let naive: Vec<StateId> = shape.ancestors(state).into_iter().map(|s| ids[s]).collect();

            prop_assert!(path.len() <= MAX_DEPTH);
            prop_assert_eq!(path.start(), Some(id));
            prop_assert_eq!(path.end(), Some(tree.root()));
            prop_assert_eq!(path.as_slice(), naive.as_slice());
            prop_assert_eq!(tree.depth(id), Some(path.len() - 1));
        }
    }

    #[test]
    fn lca_is_the_closest_common_ancestor(
        shape in arbitrary_shape(),
        a in any::<Index>(),
        b in any::<Index>(),
    ) {
        let (tree, ids) = shape.build();
        let (a, b) = (a.index(shape.len()), b.index(shape.len()));

        let path_a = tree.path_to_root(ids[a]).unwrap();
        let path_b = tree.path_to_root(ids[b]).unwrap();
        let (in_a, in_b) = intersect(&path_a, &path_b).unwrap();
        let lca = path_a.get(in_a).unwrap();

        prop_assert_eq!(path_b.get(in_b), Some(lca));
        prop_assert_eq!(lca, ids[shape.lca(a, b)]);
        prop_assert_eq!(tree.lca(ids[a], ids[b]), Ok(lca));
        // No descendant of the match is shared by both chains.
        prop_assert!(path_a.as_slice()[..in_a].iter().all(|s| !path_b.contains(*s)));
    }

    #[test]
    fn init_chain_ends_on_a_leaf(shape in arbitrary_shape()) {
        let (tree, ids) = shape.build();
        let mut machine = Machine::builder(Arc::new(tree)).context(()).journal(true).build().unwrap();

        machine.start().unwrap();

        let expected: Vec<StateId> = shape.settle(0).into_iter().map(|s| ids[s]).collect();
        let leaf = machine.current_state().unwrap();
        prop_assert!(machine.tree().is_leaf(leaf));
        prop_assert_eq!(machine.journal().unwrap().entered(), expected);
    }

    #[test]
    fn transitions_exit_and_enter_the_expected_states(
        shape in arbitrary_shape(),
        start in any::<Index>(),
        handler in any::<Index>(),
        target in any::<Index>(),
        kind in arbitrary_kind(),
    ) {
        let (tree, ids) = shape.build();
        let mut machine = Machine::builder(Arc::new(tree)).context(()).journal(true).build().unwrap();
        machine.start().unwrap();

        // Move somewhere random first so the current leaf varies.
        let start = start.index(shape.len() - 1) + 1;
        machine
            .handle_event(Jump {
                by: ids[0],
                transition: Transition { target: ids[start], kind: TransitionKind::Default },
            })
            .unwrap();
        let current = machine.current_state().unwrap().index();
        let chain = shape.ancestors(current);
        let handler = chain[handler.index(chain.len())];
        let target = target.index(shape.len() - 1) + 1;
        machine.journal_mut().unwrap().clear();

        machine
            .handle_event(Jump {
                by: ids[handler],
                transition: Transition { target: ids[target], kind },
            })
            .unwrap();

        let (exited, entered) = expected_actions(&shape, current, handler, target, kind);
        let journal = machine.journal().unwrap();
        let to_ids = |states: Vec<usize>| states.into_iter().map(|s| ids[s]).collect::<Vec<_>>();
        prop_assert_eq!(journal.exited(), to_ids(exited));
        prop_assert_eq!(journal.entered(), to_ids(entered));
        prop_assert!(machine.tree().is_leaf(machine.current_state().unwrap()));
    }

    #[test]
    fn same_state_transitions_only_rerun_init(shape in arbitrary_shape(), state in any::<Index>()) {
        let (tree, ids) = shape.build();
        let mut machine = Machine::builder(Arc::new(tree)).context(()).journal(true).build().unwrap();
        machine.start().unwrap();
        let state = state.index(shape.len() - 1) + 1;
        machine
            .handle_event(Jump {
                by: ids[0],
                transition: Transition { target: ids[state], kind: TransitionKind::Default },
            })
            .unwrap();
        machine.journal_mut().unwrap().clear();

        machine
            .handle_event(Jump {
                by: ids[state],
                transition: Transition { target: ids[state], kind: TransitionKind::Local },
            })
            .unwrap();

        let journal = machine.journal().unwrap();
        prop_assert!(!journal.exited().contains(&ids[state]));
        prop_assert!(!journal.entered().contains(&ids[state]));
    }
}
