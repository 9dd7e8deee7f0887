//! Countdown polling: a pure per-tick sampler and the async task
//! that drives it.
//!
//! The split mirrors the rest of the crate: [`sample`] decides what a
//! tick means without touching a runtime, and [`CountdownPoller`]
//! wires that decision into a tokio task that advances a shared
//! [`CycleTracker`](crate::tracker::CycleTracker) once per second.

mod driver;
mod tick;

pub use driver::{CountdownPoller, PollerHandle};
pub use tick::{sample, TickOutcome};
