//! Clock abstraction for sampling wall-clock time.
//!
//! All timestamps enter the system through a [`Clock`], so tests can
//! substitute a manually advanced clock and drive tick behaviour
//! deterministically without real delays.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Mutex, PoisonError};

/// Source of "now" for the tracker and poller.
pub trait Clock: Send + Sync {
    /// Sample the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// # Example
///
/// ```rust
/// use focal::tracker::{Clock, ManualClock};
/// use chrono::{Duration, Utc};
///
/// let start = Utc::now();
/// let clock = ManualClock::starting_at(start);
/// assert_eq!(clock.now(), start);
///
/// clock.advance(Duration::seconds(60));
/// assert_eq!(clock.now(), start + Duration::seconds(60));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    instant: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `instant`.
    pub fn starting_at(instant: DateTime<Utc>) -> Self {
        Self {
            instant: Mutex::new(instant),
        }
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut instant = self.instant.lock().unwrap_or_else(PoisonError::into_inner);
        *instant = *instant + delta;
    }

    /// Jump the clock to an absolute instant, forwards or backwards.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.instant.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.instant.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn manual_clock_is_frozen_until_advanced() {
        let start = Utc::now();
        let clock = ManualClock::starting_at(start);

        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::seconds(5));
        assert_eq!(clock.now(), start + Duration::seconds(5));
    }

    #[test]
    fn manual_clock_can_move_backwards() {
        let start = Utc::now();
        let clock = ManualClock::starting_at(start);

        clock.set(start - Duration::seconds(30));
        assert_eq!(clock.now(), start - Duration::seconds(30));
    }
}
