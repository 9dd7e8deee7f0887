//! Focal: a pomodoro cycle tracker with a pure functional core
//!
//! Focal keeps all timer logic in pure functions and pushes side
//! effects to the edges. The store and its reducer never touch the
//! clock, storage, or a runtime; the tracker shell injects "now",
//! persists snapshots, and the async poller samples elapsed time
//! once per second.
//!
//! # Core Concepts
//!
//! - **Cycle**: one timed work session with a task label and duration
//! - **Store**: an append-only list of cycles plus an active pointer
//! - **Reducer**: pure transitions over the store, one per action
//! - **Snapshot**: versioned persistence with fail-soft rehydration
//! - **Poller**: a 1 Hz tokio task that drives completion
//!
//! # Example
//!
//! ```rust
//! use focal::snapshot::MemoryStorage;
//! use focal::tracker::TrackerBuilder;
//!
//! let mut tracker = TrackerBuilder::new()
//!     .storage(MemoryStorage::new())
//!     .build()?;
//!
//! tracker.create_new_cycle("write the report", 25)?;
//! assert!(tracker.active_cycle().is_some());
//!
//! tracker.update_seconds_passed(65);
//! let view = tracker.countdown_view().unwrap();
//! assert_eq!(view.to_string(), "23:55");
//!
//! tracker.interrupt_active_cycle();
//! assert!(tracker.active_cycle().is_none());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod poller;
pub mod snapshot;
pub mod tracker;

// Re-export commonly used types
pub use core::{reduce, Cycle, CycleAction, CycleId, CyclesState};
pub use tracker::{CycleTracker, TrackerBuilder};
