//! The pure transition function over the cycle store.
//!
//! All mutations flow through [`reduce`], which consumes the current
//! state and one [`CycleAction`] and returns the next state. The
//! function is total: actions that do not apply (no active cycle,
//! duplicate id) degrade to returning the state unchanged rather than
//! erroring.

use super::cycle::Cycle;
use super::store::CyclesState;
use chrono::{DateTime, Utc};

/// Mutation actions accepted by the reducer.
#[derive(Clone, Debug)]
pub enum CycleAction {
    /// Append a freshly created cycle and make it active.
    AddNewCycle { new_cycle: Cycle },
    /// Mark the active cycle as manually cancelled.
    InterruptActiveCycle,
    /// Mark the active cycle as having run its full duration.
    MarkActiveCycleAsFinished,
}

impl CycleAction {
    /// Get the action name for display/logging.
    pub fn name(&self) -> &str {
        match self {
            Self::AddNewCycle { .. } => "AddNewCycle",
            Self::InterruptActiveCycle => "InterruptActiveCycle",
            Self::MarkActiveCycleAsFinished => "MarkActiveCycleAsFinished",
        }
    }
}

/// Apply an action to the state, returning the next state.
///
/// `now` is the timestamp recorded on terminal transitions; callers
/// sample it from their [`Clock`](crate::tracker::Clock) so the
/// function stays pure and tests stay deterministic.
///
/// Semantics:
///
/// - `AddNewCycle` appends the cycle and points the active pointer at
///   it. If another cycle was still active it is interrupted at `now`
///   in the same transition, so no cycle is left running but
///   unreachable. A duplicate id is ignored.
/// - `InterruptActiveCycle` / `MarkActiveCycleAsFinished` set the
///   respective terminal date at `now` on the active cycle and clear
///   the pointer; with no resolvable active cycle they are no-ops.
///
/// Terminal cycles are never modified.
///
/// # Example
///
/// ```rust
/// use focal::core::{reduce, Cycle, CycleAction, CyclesState};
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let cycle = Cycle::new("deep work".to_string(), 25, now);
/// let id = cycle.id;
///
/// let state = reduce(
///     &CyclesState::new(),
///     CycleAction::AddNewCycle { new_cycle: cycle },
///     now,
/// );
/// assert_eq!(state.active_cycle_id(), Some(id));
///
/// let state = reduce(&state, CycleAction::InterruptActiveCycle, now);
/// assert!(state.active_cycle_id().is_none());
/// assert_eq!(state.find(id).unwrap().interrupted_date, Some(now));
/// ```
pub fn reduce(state: &CyclesState, action: CycleAction, now: DateTime<Utc>) -> CyclesState {
    match action {
        CycleAction::AddNewCycle { new_cycle } => {
            if state.contains(new_cycle.id) {
                return state.clone();
            }

            let state = match state.active_cycle() {
                Some(active) if !active.is_terminal() => {
                    let id = active.id;
                    state.settle(id, |cycle| cycle.interrupted_date = Some(now))
                }
                _ => state.clone(),
            };

            state.append_active(new_cycle)
        }
        CycleAction::InterruptActiveCycle => match state.active_cycle() {
            Some(active) if !active.is_terminal() => {
                let id = active.id;
                state.settle(id, |cycle| cycle.interrupted_date = Some(now))
            }
            _ => state.clone(),
        },
        CycleAction::MarkActiveCycleAsFinished => match state.active_cycle() {
            Some(active) if !active.is_terminal() => {
                let id = active.id;
                state.settle(id, |cycle| cycle.finished_date = Some(now))
            }
            _ => state.clone(),
        },
    }
}
