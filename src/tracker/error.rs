//! Tracker and builder error types.

use thiserror::Error;

/// Errors that can occur when starting a new cycle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("Task label must not be empty")]
    EmptyTask,

    #[error("Cycle duration must be at least one minute")]
    ZeroDuration,
}

/// Errors that can occur when building a tracker.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Storage not specified. Call .storage(backend) before .build()")]
    MissingStorage,
}
