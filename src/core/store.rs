//! The cycle store: an append-only sequence plus an active pointer.
//!
//! `CyclesState` is an immutable value. Transforms return a new state
//! with structural changes applied; prior cycles are never mutated in
//! place. Only the reducer produces new states in normal operation.

use super::cycle::{Cycle, CycleId};
use serde::{Deserialize, Serialize};

/// Ordered collection of cycles with at most one active.
///
/// Insertion order is creation order and cycles are never removed.
/// When `active_cycle_id` is set it references a non-terminal cycle in
/// `cycles`; the reducer maintains that invariant and
/// [`check_state`](crate::snapshot::check_state) verifies it on
/// rehydrated snapshots.
///
/// # Example
///
/// ```rust
/// use focal::core::{Cycle, CyclesState};
/// use chrono::Utc;
///
/// let state = CyclesState::new();
/// assert!(state.is_empty());
/// assert!(state.active_cycle().is_none());
///
/// let cycle = Cycle::new("review PRs".to_string(), 25, Utc::now());
/// let id = cycle.id;
/// let state = state.append_active(cycle);
///
/// assert_eq!(state.len(), 1);
/// assert_eq!(state.active_cycle_id(), Some(id));
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclesState {
    cycles: Vec<Cycle>,
    active_cycle_id: Option<CycleId>,
}

impl Default for CyclesState {
    fn default() -> Self {
        Self::new()
    }
}

impl CyclesState {
    /// Create an empty store with no active cycle.
    pub fn new() -> Self {
        Self {
            cycles: Vec::new(),
            active_cycle_id: None,
        }
    }

    /// All cycles in creation order.
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    /// Number of cycles ever created.
    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    /// Check if no cycle has been created yet.
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    /// The active pointer, if a cycle is running.
    pub fn active_cycle_id(&self) -> Option<CycleId> {
        self.active_cycle_id
    }

    /// Resolve the active pointer to its cycle.
    ///
    /// Returns `None` when the pointer is unset or dangling.
    pub fn active_cycle(&self) -> Option<&Cycle> {
        self.active_cycle_id.and_then(|id| self.find(id))
    }

    /// Look up a cycle by id.
    pub fn find(&self, id: CycleId) -> Option<&Cycle> {
        self.cycles.iter().find(|cycle| cycle.id == id)
    }

    /// Check whether a cycle with this id exists.
    pub fn contains(&self, id: CycleId) -> bool {
        self.find(id).is_some()
    }

    /// Append a cycle and make it active, returning a new state.
    ///
    /// This is a pure transform; the original state is unchanged.
    pub fn append_active(&self, cycle: Cycle) -> Self {
        let mut cycles = self.cycles.clone();
        let id = cycle.id;
        cycles.push(cycle);
        Self {
            cycles,
            active_cycle_id: Some(id),
        }
    }

    /// Apply a transform to the cycle matching `id` and clear the
    /// active pointer if it pointed at that cycle, returning a new
    /// state. Returns a plain clone when `id` does not resolve.
    pub(crate) fn settle(&self, id: CycleId, apply: impl FnOnce(&mut Cycle)) -> Self {
        let Some(index) = self.cycles.iter().position(|cycle| cycle.id == id) else {
            return self.clone();
        };

        let mut cycles = self.cycles.clone();
        apply(&mut cycles[index]);

        Self {
            cycles,
            active_cycle_id: if self.active_cycle_id == Some(id) {
                None
            } else {
                self.active_cycle_id
            },
        }
    }

    /// Construct a state directly from parts.
    ///
    /// Intended for rehydration and tests; the reducer is the normal
    /// write path.
    pub fn from_parts(cycles: Vec<Cycle>, active_cycle_id: Option<CycleId>) -> Self {
        Self {
            cycles,
            active_cycle_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn cycle(task: &str) -> Cycle {
        Cycle::new(task.to_string(), 25, Utc::now())
    }

    #[test]
    fn new_store_is_empty() {
        let state = CyclesState::new();
        assert!(state.is_empty());
        assert_eq!(state.len(), 0);
        assert!(state.active_cycle_id().is_none());
        assert!(state.active_cycle().is_none());
    }

    #[test]
    fn append_active_sets_pointer_and_preserves_order() {
        let first = cycle("first");
        let second = cycle("second");
        let second_id = second.id;

        let state = CyclesState::new().append_active(first).append_active(second);

        assert_eq!(state.len(), 2);
        assert_eq!(state.cycles()[0].task, "first");
        assert_eq!(state.cycles()[1].task, "second");
        assert_eq!(state.active_cycle_id(), Some(second_id));
    }

    #[test]
    fn append_active_is_pure() {
        let state = CyclesState::new();
        let appended = state.append_active(cycle("focus"));

        assert!(state.is_empty());
        assert_eq!(appended.len(), 1);
    }

    #[test]
    fn active_cycle_resolves_pointer() {
        let c = cycle("focus");
        let id = c.id;
        let state = CyclesState::new().append_active(c);

        let active = state.active_cycle().unwrap();
        assert_eq!(active.id, id);
        assert_eq!(active.task, "focus");
    }

    #[test]
    fn active_cycle_is_none_for_dangling_pointer() {
        let state = CyclesState::from_parts(Vec::new(), Some(CycleId::new()));
        assert!(state.active_cycle().is_none());
    }

    #[test]
    fn settle_clears_pointer_and_applies_transform() {
        let c = cycle("focus");
        let id = c.id;
        let state = CyclesState::new().append_active(c);

        let now = Utc::now();
        let settled = state.settle(id, |cycle| cycle.interrupted_date = Some(now));

        assert!(settled.active_cycle_id().is_none());
        assert_eq!(settled.find(id).unwrap().interrupted_date, Some(now));
        // original untouched
        assert!(state.find(id).unwrap().interrupted_date.is_none());
    }

    #[test]
    fn settle_with_unknown_id_returns_equal_state() {
        let state = CyclesState::new().append_active(cycle("focus"));
        let settled = state.settle(CycleId::new(), |cycle| {
            cycle.finished_date = Some(Utc::now());
        });

        assert_eq!(state, settled);
    }

    #[test]
    fn settle_keeps_pointer_for_non_active_cycle() {
        let first = cycle("first");
        let first_id = first.id;
        let second = cycle("second");
        let second_id = second.id;

        let state = CyclesState::new().append_active(first).append_active(second);
        let settled = state.settle(first_id, |cycle| {
            cycle.interrupted_date = Some(Utc::now());
        });

        assert_eq!(settled.active_cycle_id(), Some(second_id));
    }

    #[test]
    fn store_round_trips_through_json() {
        let state = CyclesState::new().append_active(cycle("focus"));
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: CyclesState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
        assert!(json.contains("activeCycleId"));
    }
}
