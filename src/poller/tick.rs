//! Pure per-tick sampling.
//!
//! Each tick reduces to a single question: given the store and the
//! current instant, what should the driver do? Keeping the answer
//! pure means the async loop stays a thin dispatcher and the tick
//! logic is testable without a runtime.

use crate::core::{elapsed_seconds, is_complete, CyclesState};
use chrono::{DateTime, Utc};

/// What a single tick observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No cycle is active; there is nothing left to poll.
    Idle,

    /// The active cycle is still counting down.
    Running { elapsed_seconds: u64 },

    /// The active cycle has used up its full duration.
    Completed { elapsed_seconds: u64 },
}

impl TickOutcome {
    /// Whether the driver should keep polling after this outcome.
    pub fn keeps_polling(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

/// Sample the store at `now`.
///
/// Elapsed seconds are clamped to `[0, total]`, so a clock that jumps
/// backwards reads as zero and an overshoot past the deadline reports
/// exactly the cycle's total duration.
///
/// # Example
///
/// ```rust
/// use focal::core::{Cycle, CyclesState};
/// use focal::poller::{sample, TickOutcome};
/// use chrono::{Duration, Utc};
///
/// let start = Utc::now();
/// let state = CyclesState::new().append_active(Cycle::new(
///     "focus".to_string(),
///     1,
///     start,
/// ));
///
/// assert_eq!(
///     sample(&state, start + Duration::seconds(10)),
///     TickOutcome::Running { elapsed_seconds: 10 }
/// );
/// assert_eq!(
///     sample(&state, start + Duration::seconds(90)),
///     TickOutcome::Completed { elapsed_seconds: 60 }
/// );
/// ```
pub fn sample(state: &CyclesState, now: DateTime<Utc>) -> TickOutcome {
    let Some(cycle) = state.active_cycle() else {
        return TickOutcome::Idle;
    };

    let elapsed = elapsed_seconds(cycle, now);
    if is_complete(cycle, now) {
        TickOutcome::Completed {
            elapsed_seconds: elapsed,
        }
    } else {
        TickOutcome::Running {
            elapsed_seconds: elapsed,
        }
    }
}
