//! Cycle records and their lifecycle status.
//!
//! A cycle is one countdown session: a task label, a target duration,
//! and the timestamps that mark its creation and (at most one) terminal
//! transition. Cycles are immutable values; lifecycle changes are
//! expressed by the reducer returning new state, never by mutating a
//! cycle in place after it has gone terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique, opaque identifier for a cycle, assigned at creation.
///
/// # Example
///
/// ```rust
/// use focal::core::CycleId;
///
/// let a = CycleId::new();
/// let b = CycleId::new();
/// assert_ne!(a, b);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleId(Uuid);

impl CycleId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CycleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle status derived from a cycle's terminal dates.
///
/// A cycle starts `Running` and moves to exactly one of the terminal
/// statuses exactly once.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum CycleStatus {
    /// Counting down; neither terminal date is set.
    Running,
    /// Manually cancelled before the duration elapsed.
    Interrupted,
    /// The full duration elapsed.
    Finished,
}

impl CycleStatus {
    /// Get the status name for display/logging.
    pub fn name(&self) -> &str {
        match self {
            Self::Running => "Running",
            Self::Interrupted => "Interrupted",
            Self::Finished => "Finished",
        }
    }

    /// Check if this is a terminal status.
    ///
    /// Terminal cycles are immutable; no action touches them again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Interrupted | Self::Finished)
    }
}

/// One countdown session.
///
/// # Example
///
/// ```rust
/// use focal::core::{Cycle, CycleStatus};
/// use chrono::Utc;
///
/// let cycle = Cycle::new("write the report".to_string(), 25, Utc::now());
///
/// assert_eq!(cycle.status(), CycleStatus::Running);
/// assert_eq!(cycle.total_seconds(), 25 * 60);
/// assert!(!cycle.is_terminal());
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    /// Stable identifier, unique within a store.
    pub id: CycleId,
    /// User-supplied task label.
    pub task: String,
    /// Target duration in minutes.
    pub minutes_amount: u32,
    /// When the countdown started.
    pub start_date: DateTime<Utc>,
    /// Set at most once, on manual cancellation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interrupted_date: Option<DateTime<Utc>>,
    /// Set at most once, on natural completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_date: Option<DateTime<Utc>>,
}

impl Cycle {
    /// Create a running cycle with a fresh id.
    pub fn new(task: String, minutes_amount: u32, start_date: DateTime<Utc>) -> Self {
        Self {
            id: CycleId::new(),
            task,
            minutes_amount,
            start_date,
            interrupted_date: None,
            finished_date: None,
        }
    }

    /// Derive the lifecycle status from the terminal dates.
    ///
    /// `interrupted_date` wins if both are somehow set; `check_state`
    /// reports that shape as a violation before it ever reaches here.
    pub fn status(&self) -> CycleStatus {
        if self.interrupted_date.is_some() {
            CycleStatus::Interrupted
        } else if self.finished_date.is_some() {
            CycleStatus::Finished
        } else {
            CycleStatus::Running
        }
    }

    /// Check if the cycle has reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// Target duration in whole seconds.
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.minutes_amount) * 60
    }
}
