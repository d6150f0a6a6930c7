//! Transition execution.
//!
//! Given the current leaf, the state whose handler requested a transition and
//! the transition itself, fire every exit and entry action the move requires
//! in statechart order, then settle into a leaf through the target's init
//! chain. All bookkeeping uses stack-allocated [`Path`]s.

use super::actuator::Actuator;
use crate::core::{intersect, Fault, Path, StateId, Transition, TransitionKind};

/// Perform `transition`, requested by `handler` while the machine rests in
/// `current`. Returns the new current state, which is a leaf or
/// [`StateId::FINAL`].
///
/// `handler` must be `current` or one of its ancestors.
pub(crate) fn execute<C, E>(
    actuator: &mut Actuator<'_, C, E>,
    current: StateId,
    handler: StateId,
    transition: Transition,
) -> Result<StateId, Fault> {
    let tree = actuator.tree();
    let target = transition.target;

    if target.is_final() {
        return finish(actuator, current);
    }
    if !tree.contains(target) {
        return Err(Fault::TargetOutsideTree {
            state: handler,
            target,
        });
    }
    if target == tree.root() {
        return Err(Fault::TargetIsRoot { state: handler });
    }

    // Resolve every path before the first action fires.
    let current_path = tree.path_to_root(current)?;
    let handler_path = tree.path_to_root(handler)?;
    let target_path = tree.path_to_root(target)?;
    let below_handler = current_path
        .position(handler)
        .ok_or(Fault::UnknownState { state: handler })?;
    let (lca_in_handler, lca_in_target) =
        intersect(&handler_path, &target_path).ok_or(Fault::NoCommonAncestor {
            source_state: handler,
            target,
        })?;

    tracing::debug!(
        source = %handler,
        %target,
        lca = %handler_path.get(lca_in_handler).unwrap_or(StateId::ROOT),
        kind = ?transition.kind,
        "executing transition"
    );

    exit_all(actuator, &current_path.as_slice()[..below_handler])?;

    if lca_in_handler == 0 {
        // Target is the handler itself or one of its descendants.
        if transition.kind == TransitionKind::External && handler != tree.root() {
            actuator.exit(handler)?;
            actuator.enter(handler)?;
        }
    } else {
        exit_all(actuator, &handler_path.as_slice()[..lca_in_handler])?;
    }

    for &state in target_path.as_slice()[..lca_in_target].iter().rev() {
        actuator.enter(state)?;
    }

    actuator.run_init_chain(target)
}

/// Leave every active state below the root and come to rest in Final.
fn finish<C, E>(actuator: &mut Actuator<'_, C, E>, current: StateId) -> Result<StateId, Fault> {
    let path: Path = actuator.tree().path_to_root(current)?;
    let active = path.len().saturating_sub(1);
    exit_all(actuator, &path.as_slice()[..active])?;
    tracing::debug!(from = %current, "reached final state");
    Ok(StateId::FINAL)
}

/// Exit `states` in order, innermost first.
fn exit_all<C, E>(actuator: &mut Actuator<'_, C, E>, states: &[StateId]) -> Result<(), Fault> {
    states.iter().try_for_each(|&state| actuator.exit(state))
}
