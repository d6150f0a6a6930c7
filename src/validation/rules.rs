//! Structural rules for state trees using Validation.

use crate::core::{StateId, MAX_DEPTH};
use crate::validation::violations::TreeViolation;
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Default bound on the number of direct substates of one state.
pub const DEFAULT_MAX_SUBSTATES: usize = 16;

type Check = Validation<(), NonEmptyVec<TreeViolation>>;

/// Shape of one state as seen by validation. The state's id is its position
/// in the slice handed to [`TreeRules::check`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateOutline<'a> {
    pub name: &'a str,
    pub parent: Option<StateId>,
}

/// Bounds a tree must respect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeRules {
    /// Maximum nesting levels, root included.
    pub max_depth: usize,
    /// Maximum direct substates of any state.
    pub max_substates: usize,
}

impl Default for TreeRules {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            max_substates: DEFAULT_MAX_SUBSTATES,
        }
    }
}

impl TreeRules {
    /// Check every rule, accumulating ALL violations.
    ///
    /// The first outline is the root; every other state must name an earlier
    /// state as its parent, which also rules out cycles.
    pub fn check(&self, states: &[StateOutline<'_>]) -> Check {
        let mut checks: Vec<Check> = vec![self.check_depth_limit()];

        if states.is_empty() {
            checks.push(Validation::fail(TreeViolation::MissingRoot));
        }

        checks.extend(
            states
                .iter()
                .enumerate()
                .map(|(index, state)| check_parent(index, state)),
        );
        checks.extend(self.check_depths(states));
        checks.extend(self.check_substates(states));
        checks.extend(check_names(states));

        Validation::all_vec(checks).map(|_| ())
    }

    fn check_depth_limit(&self) -> Check {
        if (1..=MAX_DEPTH).contains(&self.max_depth) {
            Validation::success(())
        } else {
            Validation::fail(TreeViolation::DepthLimitOutOfRange {
                requested: self.max_depth,
                max: MAX_DEPTH,
            })
        }
    }

    // Only the topmost state of an overflowing branch is reported.
    fn check_depths(&self, states: &[StateOutline<'_>]) -> Vec<Check> {
        let mut levels: Vec<Option<usize>> = Vec::with_capacity(states.len());
        let mut checks = Vec::new();

        for (index, state) in states.iter().enumerate() {
            let level = match (index, valid_parent(index, state)) {
                (0, _) => Some(1),
                (_, Some(parent)) => levels[parent.index()].map(|l| l + 1),
                _ => None,
            };
            levels.push(level);

            if level == Some(self.max_depth + 1) {
                checks.push(Validation::fail(TreeViolation::TooDeep {
                    state: StateId(index),
                    name: state.name.to_string(),
                    levels: self.max_depth + 1,
                    max: self.max_depth,
                }));
            }
        }
        checks
    }

    fn check_substates(&self, states: &[StateOutline<'_>]) -> Vec<Check> {
        let mut counts = vec![0usize; states.len()];
        for (index, state) in states.iter().enumerate() {
            if let Some(parent) = valid_parent(index, state) {
                counts[parent.index()] += 1;
            }
        }

        counts
            .into_iter()
            .enumerate()
            .filter(|&(_, count)| count > self.max_substates)
            .map(|(index, count)| {
                Validation::fail(TreeViolation::TooManySubstates {
                    state: StateId(index),
                    name: states[index].name.to_string(),
                    count,
                    max: self.max_substates,
                })
            })
            .collect()
    }
}

fn valid_parent(index: usize, state: &StateOutline<'_>) -> Option<StateId> {
    state.parent.filter(|parent| parent.index() < index)
}

fn check_parent(index: usize, state: &StateOutline<'_>) -> Check {
    match (index, state.parent) {
        (0, None) => Validation::success(()),
        (_, None) => Validation::fail(TreeViolation::SecondRoot {
            state: StateId(index),
            name: state.name.to_string(),
        }),
        (_, Some(parent)) if parent.index() < index => Validation::success(()),
        (_, Some(parent)) => Validation::fail(TreeViolation::UnknownParent {
            state: StateId(index),
            name: state.name.to_string(),
            parent,
        }),
    }
}

fn check_names(states: &[StateOutline<'_>]) -> Vec<Check> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut checks = Vec::new();

    for (index, state) in states.iter().enumerate() {
        if state.name.is_empty() {
            checks.push(Validation::fail(TreeViolation::EmptyName {
                state: StateId(index),
            }));
            continue;
        }
        if let Some(&first) = seen.get(state.name) {
            checks.push(Validation::fail(TreeViolation::DuplicateName {
                name: state.name.to_string(),
                first: StateId(first),
                duplicate: StateId(index),
            }));
        } else {
            seen.insert(state.name, index);
        }
    }
    checks
}
