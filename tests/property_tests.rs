//! Property-based tests for the cycle store and reducer.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated action sequences.

use chrono::{DateTime, Duration, Utc};
use focal::core::{elapsed_seconds, reduce, Cycle, CycleAction, CyclesState};
use focal::snapshot::{check_state, Snapshot};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum ActionKind {
    Add { task: String, minutes: u32 },
    Interrupt,
    Finish,
}

prop_compose! {
    fn arbitrary_action()(
        variant in 0..3u8,
        task in "[a-z]{1,12}",
        minutes in 1..120u32,
    ) -> ActionKind {
        match variant {
            0 => ActionKind::Add { task, minutes },
            1 => ActionKind::Interrupt,
            _ => ActionKind::Finish,
        }
    }
}

fn to_action(kind: &ActionKind, now: DateTime<Utc>) -> CycleAction {
    match kind {
        ActionKind::Add { task, minutes } => CycleAction::AddNewCycle {
            new_cycle: Cycle::new(task.clone(), *minutes, now),
        },
        ActionKind::Interrupt => CycleAction::InterruptActiveCycle,
        ActionKind::Finish => CycleAction::MarkActiveCycleAsFinished,
    }
}

fn apply_all(actions: &[ActionKind], base: DateTime<Utc>) -> CyclesState {
    let mut state = CyclesState::new();
    for (i, kind) in actions.iter().enumerate() {
        let now = base + Duration::seconds(i as i64);
        state = reduce(&state, to_action(kind, now), now);
    }
    state
}

proptest! {
    #[test]
    fn at_most_one_terminal_date_per_cycle(
        actions in prop::collection::vec(arbitrary_action(), 0..20)
    ) {
        let state = apply_all(&actions, Utc::now());

        for cycle in state.cycles() {
            prop_assert!(
                cycle.interrupted_date.is_none() || cycle.finished_date.is_none()
            );
        }
    }

    #[test]
    fn terminal_dates_never_change_once_set(
        actions in prop::collection::vec(arbitrary_action(), 1..15),
        extra in prop::collection::vec(arbitrary_action(), 1..15),
    ) {
        let base = Utc::now();
        let state = apply_all(&actions, base);

        let stamped: Vec<_> = state
            .cycles()
            .iter()
            .filter(|c| c.is_terminal())
            .map(|c| (c.id, c.interrupted_date, c.finished_date))
            .collect();

        let mut after = state.clone();
        for (i, kind) in extra.iter().enumerate() {
            let now = base + Duration::seconds(1_000 + i as i64);
            after = reduce(&after, to_action(kind, now), now);
        }

        for (id, interrupted, finished) in stamped {
            let cycle = after.find(id).unwrap();
            prop_assert_eq!(cycle.interrupted_date, interrupted);
            prop_assert_eq!(cycle.finished_date, finished);
        }
    }

    #[test]
    fn terminal_actions_without_active_cycle_are_no_ops(
        actions in prop::collection::vec(arbitrary_action(), 0..15)
    ) {
        let state = apply_all(&actions, Utc::now());

        if state.active_cycle_id().is_none() {
            let later = Utc::now() + Duration::seconds(10_000);
            let interrupted = reduce(&state, CycleAction::InterruptActiveCycle, later);
            let finished = reduce(&state, CycleAction::MarkActiveCycleAsFinished, later);

            prop_assert_eq!(&interrupted, &state);
            prop_assert_eq!(&finished, &state);
        }
    }

    #[test]
    fn add_makes_the_new_cycle_active_and_last(
        actions in prop::collection::vec(arbitrary_action(), 0..15),
        task in "[a-z]{1,12}",
        minutes in 1..120u32,
    ) {
        let base = Utc::now();
        let state = apply_all(&actions, base);

        let now = base + Duration::seconds(10_000);
        let cycle = Cycle::new(task, minutes, now);
        let id = cycle.id;
        let state = reduce(&state, CycleAction::AddNewCycle { new_cycle: cycle }, now);

        prop_assert_eq!(state.active_cycle_id(), Some(id));
        prop_assert_eq!(state.cycles().last().map(|c| c.id), Some(id));
    }

    #[test]
    fn every_cycle_is_active_or_terminal(
        actions in prop::collection::vec(arbitrary_action(), 0..20)
    ) {
        let state = apply_all(&actions, Utc::now());

        for cycle in state.cycles() {
            let is_active = state.active_cycle_id() == Some(cycle.id);
            prop_assert!(is_active || cycle.is_terminal());
        }
    }

    #[test]
    fn reducer_output_always_passes_validation(
        actions in prop::collection::vec(arbitrary_action(), 0..20)
    ) {
        let state = apply_all(&actions, Utc::now());
        prop_assert!(check_state(&state).is_empty());
    }

    #[test]
    fn reduce_never_mutates_its_input(
        actions in prop::collection::vec(arbitrary_action(), 0..10),
        task in "[a-z]{1,12}",
    ) {
        let base = Utc::now();
        let state = apply_all(&actions, base);
        let before = state.clone();

        let now = base + Duration::seconds(10_000);
        let _ = reduce(
            &state,
            CycleAction::AddNewCycle {
                new_cycle: Cycle::new(task, 25, now),
            },
            now,
        );
        let _ = reduce(&state, CycleAction::InterruptActiveCycle, now);

        prop_assert_eq!(state, before);
    }

    #[test]
    fn snapshot_json_round_trip(
        actions in prop::collection::vec(arbitrary_action(), 0..15)
    ) {
        let state = apply_all(&actions, Utc::now());
        let snapshot = Snapshot::new(state.clone(), Utc::now());

        let json = snapshot.to_json().unwrap();
        let restored = Snapshot::from_json(&json).unwrap();

        prop_assert_eq!(restored.state, state);
    }

    #[test]
    fn snapshot_binary_round_trip(
        actions in prop::collection::vec(arbitrary_action(), 0..15)
    ) {
        let state = apply_all(&actions, Utc::now());
        let snapshot = Snapshot::new(state.clone(), Utc::now());

        let bytes = snapshot.to_binary().unwrap();
        let restored = Snapshot::from_binary(&bytes).unwrap();

        prop_assert_eq!(restored.state, state);
    }

    #[test]
    fn elapsed_is_clamped_to_cycle_bounds(
        minutes in 1..120u32,
        offset in -10_000..100_000i64,
    ) {
        let start = Utc::now();
        let cycle = Cycle::new("focus".to_string(), minutes, start);
        let elapsed = elapsed_seconds(&cycle, start + Duration::seconds(offset));

        prop_assert!(elapsed <= cycle.total_seconds());
        if offset <= 0 {
            prop_assert_eq!(elapsed, 0);
        }
    }
}
