//! Countdown arithmetic over a cycle and a sampled instant.
//!
//! Everything here is pure. The poller samples a clock once per tick
//! and feeds the instant in; the display layer derives minutes and
//! seconds without storing anything.

use super::cycle::Cycle;
use chrono::{DateTime, Utc};
use std::fmt;

/// Whole seconds elapsed since the cycle started, clamped to
/// `[0, total_seconds]`.
///
/// A clock that moved backwards yields 0; an overdue sample yields the
/// full duration.
///
/// # Example
///
/// ```rust
/// use focal::core::{elapsed_seconds, Cycle};
/// use chrono::{Duration, Utc};
///
/// let start = Utc::now();
/// let cycle = Cycle::new("focus".to_string(), 1, start);
///
/// assert_eq!(elapsed_seconds(&cycle, start), 0);
/// assert_eq!(elapsed_seconds(&cycle, start + Duration::seconds(59)), 59);
/// // clamped past the deadline
/// assert_eq!(elapsed_seconds(&cycle, start + Duration::seconds(90)), 60);
/// // clamped against a backwards clock
/// assert_eq!(elapsed_seconds(&cycle, start - Duration::seconds(5)), 0);
/// ```
pub fn elapsed_seconds(cycle: &Cycle, now: DateTime<Utc>) -> u64 {
    let elapsed = now
        .signed_duration_since(cycle.start_date)
        .num_seconds()
        .max(0) as u64;
    elapsed.min(cycle.total_seconds())
}

/// Check if the cycle's full duration has elapsed at `now`.
pub fn is_complete(cycle: &Cycle, now: DateTime<Utc>) -> bool {
    elapsed_seconds(cycle, now) >= cycle.total_seconds()
}

/// Zero-padded minutes/seconds view of the time remaining.
///
/// # Example
///
/// ```rust
/// use focal::core::CountdownView;
///
/// let view = CountdownView::from_remaining(61);
/// assert_eq!(view.minutes, "01");
/// assert_eq!(view.seconds, "01");
/// assert_eq!(view.to_string(), "01:01");
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CountdownView {
    /// Minutes remaining, zero-padded to two digits.
    pub minutes: String,
    /// Seconds remaining within the minute, zero-padded to two digits.
    pub seconds: String,
}

impl CountdownView {
    /// Build a view from seconds remaining.
    pub fn from_remaining(remaining_seconds: u64) -> Self {
        Self {
            minutes: format!("{:02}", remaining_seconds / 60),
            seconds: format!("{:02}", remaining_seconds % 60),
        }
    }

    /// Build a view for a cycle at a sampled instant.
    pub fn for_cycle(cycle: &Cycle, now: DateTime<Utc>) -> Self {
        Self::from_remaining(cycle.total_seconds() - elapsed_seconds(cycle, now))
    }
}

impl fmt::Display for CountdownView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.minutes, self.seconds)
    }
}
