//! Armed shutoff timer bookkeeping.

use std::time::Duration;

use crate::time::Timestamp;

/// Book-keeping for one armed shutoff timer.
///
/// The engine keeps at most one of these per monitored entity; re-arming
/// replaces the record outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmedTimer {
    /// When the timer was (re-)armed.
    pub armed_at: Timestamp,
    /// When the shutoff is due.
    pub deadline: Timestamp,
}

impl ArmedTimer {
    /// Arm a timer at `armed_at` that is due `timeout` later.
    #[must_use]
    pub fn arm(armed_at: Timestamp, timeout: Duration) -> Self {
        Self {
            armed_at,
            deadline: armed_at + timeout,
        }
    }

    /// Whether the deadline has passed at `now`.
    #[must_use]
    pub fn is_due(&self, now: Timestamp) -> bool {
        now >= self.deadline
    }
}
