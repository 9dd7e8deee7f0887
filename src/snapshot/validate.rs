//! Structural validation of a cycle store.
//!
//! Checks accumulate ALL violations instead of stopping at the first,
//! so a rejected snapshot can be diagnosed in a single pass.
//! Rehydration uses these checks to decide whether a persisted store
//! is trustworthy; they are also public for callers that assemble
//! states by hand.

use crate::core::{CycleId, CyclesState};
use thiserror::Error;

/// Ways a persisted or hand-assembled store can violate the model
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateViolation {
    /// The active pointer references an id not present in the store
    #[error("Active pointer references unknown cycle {id}")]
    DanglingActivePointer { id: CycleId },

    /// The active pointer references a cycle that already went terminal
    #[error("Active cycle {id} is already terminal")]
    ActiveCycleTerminal { id: CycleId },

    /// A cycle carries both terminal dates
    #[error("Cycle {id} has both interrupted and finished dates set")]
    ConflictingTerminalDates { id: CycleId },

    /// Two cycles share an id
    #[error("Duplicate cycle id {id}")]
    DuplicateCycleId { id: CycleId },
}

/// Check every store invariant, returning all violations found.
///
/// An empty vector means the store is well-formed.
///
/// # Example
///
/// ```rust
/// use focal::core::{Cycle, CycleId, CyclesState};
/// use focal::snapshot::{check_state, StateViolation};
/// use chrono::Utc;
///
/// let ok = CyclesState::new().append_active(Cycle::new(
///     "focus".to_string(),
///     25,
///     Utc::now(),
/// ));
/// assert!(check_state(&ok).is_empty());
///
/// let dangling = CyclesState::from_parts(Vec::new(), Some(CycleId::new()));
/// assert!(matches!(
///     check_state(&dangling)[0],
///     StateViolation::DanglingActivePointer { .. }
/// ));
/// ```
pub fn check_state(state: &CyclesState) -> Vec<StateViolation> {
    let mut violations = Vec::new();

    for (index, cycle) in state.cycles().iter().enumerate() {
        if cycle.interrupted_date.is_some() && cycle.finished_date.is_some() {
            violations.push(StateViolation::ConflictingTerminalDates { id: cycle.id });
        }

        let duplicated = state.cycles()[..index]
            .iter()
            .any(|earlier| earlier.id == cycle.id);
        if duplicated {
            violations.push(StateViolation::DuplicateCycleId { id: cycle.id });
        }
    }

    if let Some(id) = state.active_cycle_id() {
        match state.find(id) {
            None => violations.push(StateViolation::DanglingActivePointer { id }),
            Some(cycle) if cycle.is_terminal() => {
                violations.push(StateViolation::ActiveCycleTerminal { id });
            }
            Some(_) => {}
        }
    }

    violations
}
