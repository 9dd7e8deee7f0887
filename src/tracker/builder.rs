//! Builder for constructing trackers.

use super::clock::{Clock, SystemClock};
use super::error::BuildError;
use super::CycleTracker;
use crate::snapshot::{Snapshot, SnapshotStorage, DEFAULT_STORAGE_KEY};
use std::sync::Arc;
use tracing::info;

/// Builder for constructing a [`CycleTracker`] with a fluent API.
///
/// The storage backend is required; clock and storage key have
/// defaults. Building rehydrates any store previously persisted under
/// the storage key.
///
/// # Example
///
/// ```rust
/// use focal::snapshot::MemoryStorage;
/// use focal::tracker::TrackerBuilder;
///
/// let tracker = TrackerBuilder::new()
///     .storage(MemoryStorage::new())
///     .build()?;
///
/// assert!(tracker.active_cycle().is_none());
/// # Ok::<(), focal::tracker::BuildError>(())
/// ```
pub struct TrackerBuilder<S: SnapshotStorage> {
    storage: Option<S>,
    clock: Option<Arc<dyn Clock>>,
    storage_key: String,
}

impl<S: SnapshotStorage> TrackerBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            storage: None,
            clock: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Set the storage backend (required).
    pub fn storage(mut self, storage: S) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Substitute the clock. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Override the storage key. Defaults to
    /// [`DEFAULT_STORAGE_KEY`](crate::snapshot::DEFAULT_STORAGE_KEY).
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Build the tracker, rehydrating persisted state.
    ///
    /// Returns an error if required fields are missing. A persisted
    /// active cycle resumes counting from its start date rather than
    /// from zero.
    pub fn build(self) -> Result<CycleTracker<S>, BuildError> {
        let storage = self.storage.ok_or(BuildError::MissingStorage)?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let state = Snapshot::rehydrate(&storage, &self.storage_key);
        if !state.is_empty() {
            info!(
                cycles = state.len(),
                resumed_active = state.active_cycle_id().is_some(),
                "rehydrated persisted cycles"
            );
        }

        let mut tracker =
            CycleTracker::from_parts(state, storage, self.storage_key, clock, 0);
        tracker.seed_seconds_from_active();
        Ok(tracker)
    }
}

impl<S: SnapshotStorage> Default for TrackerBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
