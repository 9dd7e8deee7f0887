//! Imperative shell around the pure cycle store.
//!
//! A [`CycleTracker`] owns the current [`CyclesState`], dispatches
//! actions through the pure reducer, and persists a snapshot after
//! every state change. All side effects live here; the core stays
//! pure and the poller drives this shell once per second.

use crate::core::{
    elapsed_seconds, reduce, CountdownView, Cycle, CycleAction, CycleId, CyclesState,
};
use crate::snapshot::{Snapshot, SnapshotStorage};
use std::sync::Arc;
use tracing::{debug, info, warn};

mod builder;
mod clock;
mod error;

pub use builder::TrackerBuilder;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{BuildError, TrackerError};

/// Stateful tracker that mediates between callers and the pure core.
///
/// # Example
///
/// ```rust
/// use focal::snapshot::MemoryStorage;
/// use focal::tracker::TrackerBuilder;
///
/// let mut tracker = TrackerBuilder::new()
///     .storage(MemoryStorage::new())
///     .build()?;
///
/// let id = tracker.create_new_cycle("write the report", 25)?;
/// assert_eq!(tracker.active_cycle_id(), Some(id));
///
/// tracker.interrupt_active_cycle();
/// assert!(tracker.active_cycle().is_none());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct CycleTracker<S: SnapshotStorage> {
    state: CyclesState,
    storage: S,
    storage_key: String,
    clock: Arc<dyn Clock>,
    amount_seconds_passed: u64,
}

impl<S: SnapshotStorage> CycleTracker<S> {
    pub(crate) fn from_parts(
        state: CyclesState,
        storage: S,
        storage_key: String,
        clock: Arc<dyn Clock>,
        amount_seconds_passed: u64,
    ) -> Self {
        Self {
            state,
            storage,
            storage_key,
            clock,
            amount_seconds_passed,
        }
    }

    /// The current store.
    pub fn state(&self) -> &CyclesState {
        &self.state
    }

    /// All cycles, oldest first.
    pub fn cycles(&self) -> &[Cycle] {
        self.state.cycles()
    }

    /// The active cycle, if one is running.
    pub fn active_cycle(&self) -> Option<&Cycle> {
        self.state.active_cycle()
    }

    /// Id of the active cycle, if one is running.
    pub fn active_cycle_id(&self) -> Option<CycleId> {
        self.state.active_cycle_id()
    }

    /// Seconds counted against the active cycle so far.
    pub fn amount_seconds_passed(&self) -> u64 {
        self.amount_seconds_passed
    }

    /// The clock this tracker samples time from.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Remaining time of the active cycle as a displayable MM:SS view.
    ///
    /// Returns `None` when no cycle is active.
    pub fn countdown_view(&self) -> Option<CountdownView> {
        let cycle = self.state.active_cycle()?;
        let remaining = cycle.total_seconds().saturating_sub(self.amount_seconds_passed);
        Some(CountdownView::from_remaining(remaining))
    }

    /// Start a new cycle and make it active.
    ///
    /// The task label must be non-blank and the duration at least one
    /// minute. A still-running previous cycle is interrupted as part
    /// of the same transition.
    pub fn create_new_cycle(
        &mut self,
        task: &str,
        minutes_amount: u32,
    ) -> Result<CycleId, TrackerError> {
        let task = task.trim();
        if task.is_empty() {
            return Err(TrackerError::EmptyTask);
        }
        if minutes_amount == 0 {
            return Err(TrackerError::ZeroDuration);
        }

        let cycle = Cycle::new(task.to_string(), minutes_amount, self.clock.now());
        let id = cycle.id;
        info!(%id, task, minutes_amount, "starting new cycle");

        self.dispatch(CycleAction::AddNewCycle { new_cycle: cycle });
        self.amount_seconds_passed = 0;
        Ok(id)
    }

    /// Interrupt the active cycle, stamping it with the current time.
    ///
    /// Does nothing when no cycle is active.
    pub fn interrupt_active_cycle(&mut self) {
        self.dispatch(CycleAction::InterruptActiveCycle);
    }

    /// Finish the active cycle, stamping it with the current time.
    ///
    /// Does nothing when no cycle is active.
    pub fn mark_active_cycle_as_finished(&mut self) {
        if let Some(cycle) = self.state.active_cycle() {
            info!(id = %cycle.id, task = %cycle.task, "cycle completed");
        }
        self.dispatch(CycleAction::MarkActiveCycleAsFinished);
    }

    /// Record how many seconds have been counted against the active
    /// cycle. The poller calls this once per tick.
    pub fn update_seconds_passed(&mut self, seconds: u64) {
        self.amount_seconds_passed = seconds;
    }

    fn dispatch(&mut self, action: CycleAction) {
        debug!(action = action.name(), "dispatching");
        self.state = reduce(&self.state, action, self.clock.now());
        self.persist();
    }

    /// Write the current store to storage, logging instead of failing.
    fn persist(&self) {
        let snapshot = Snapshot::new(self.state.clone(), self.clock.now());
        let json = match snapshot.to_json() {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "failed to serialize snapshot, skipping save");
                return;
            }
        };
        if let Err(err) = self.storage.save(&self.storage_key, &json) {
            warn!(key = %self.storage_key, error = %err, "failed to persist snapshot");
        }
    }

    pub(crate) fn seed_seconds_from_active(&mut self) {
        if let Some(cycle) = self.state.active_cycle() {
            self.amount_seconds_passed = elapsed_seconds(cycle, self.clock.now());
        }
    }
}
