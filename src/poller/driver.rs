//! Async driver that advances the tracker once per second.
//!
//! The driver owns no timer state of its own: every tick it locks the
//! shared tracker, samples the store with [`sample`], and dispatches
//! the outcome. Completion and the final seconds update happen inside
//! the same lock hold, so readers never observe a finished cycle with
//! a stale countdown.

use super::tick::{sample, TickOutcome};
use crate::snapshot::SnapshotStorage;
use crate::tracker::CycleTracker;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

/// Spawns and configures the background countdown task.
///
/// # Example
///
/// ```rust,no_run
/// use focal::poller::CountdownPoller;
/// use focal::snapshot::MemoryStorage;
/// use focal::tracker::TrackerBuilder;
/// use std::sync::Arc;
/// use tokio::sync::Mutex;
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let mut tracker = TrackerBuilder::new()
///     .storage(MemoryStorage::new())
///     .build()?;
/// tracker.create_new_cycle("focus", 25)?;
///
/// let tracker = Arc::new(Mutex::new(tracker));
/// let handle = CountdownPoller::new().spawn(Arc::clone(&tracker));
///
/// // ... later
/// handle.stop().await;
/// # Ok(())
/// # }
/// ```
pub struct CountdownPoller {
    tick_interval: Duration,
}

impl CountdownPoller {
    /// Create a poller ticking at the default 1 Hz.
    pub fn new() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
        }
    }

    /// Override the tick interval. Tests shrink this to keep runtime
    /// short; production callers keep the 1 Hz default.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Spawn the polling task over a shared tracker.
    ///
    /// The task ticks until the active cycle completes, the store goes
    /// idle, or [`PollerHandle::stop`] is called. When a tick observes
    /// completion, the tracker is updated and the finish dispatched
    /// exactly once before the task exits.
    pub fn spawn<S>(self, tracker: Arc<Mutex<CycleTracker<S>>>) -> PollerHandle
    where
        S: SnapshotStorage + Send + 'static,
    {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut interval = time::interval(self.tick_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = stop_rx.changed() => {
                        if *stop_rx.borrow() {
                            debug!("poller stopped by handle");
                            return;
                        }
                    }

                    _ = interval.tick() => {
                        let mut tracker = tracker.lock().await;
                        let now = tracker.clock().now();

                        match sample(tracker.state(), now) {
                            TickOutcome::Idle => {
                                debug!("no active cycle, poller exiting");
                                return;
                            }
                            TickOutcome::Running { elapsed_seconds } => {
                                tracker.update_seconds_passed(elapsed_seconds);
                            }
                            TickOutcome::Completed { elapsed_seconds } => {
                                tracker.update_seconds_passed(elapsed_seconds);
                                tracker.mark_active_cycle_as_finished();
                                info!("countdown reached zero, poller exiting");
                                return;
                            }
                        }
                    }
                }
            }
        });

        PollerHandle {
            stop: stop_tx,
            task,
        }
    }
}

impl Default for CountdownPoller {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a running poller task.
///
/// Dropping the handle aborts the task, so an abandoned poller never
/// keeps ticking in the background.
pub struct PollerHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Signal the task to stop and wait for it to finish.
    pub async fn stop(mut self) {
        // The task may already have exited on its own, so a closed
        // channel is fine here.
        let _ = self.stop.send(true);
        let _ = (&mut self.task).await;
    }

    /// Whether the task has already exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
