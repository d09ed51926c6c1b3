//! Shutoff settings — the night window boundaries and the idle timeout.

use std::cmp::Ordering;
use std::time::Duration;

use crate::error::ValidationError;
use crate::time::TimeOfDay;

/// The tunable configuration behind the auto-shutoff policy.
///
/// `nighttime` opens the window in which activations arm shutoff timers;
/// `morning` closes it. The window may wrap through midnight. `timeout` is
/// how long an entity stays on after its last activation before the engine
/// turns it off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutConfig {
    morning: TimeOfDay,
    nighttime: TimeOfDay,
    timeout: Duration,
}

impl Default for TimeoutConfig {
    /// Factory defaults: window 23:00:00 to 03:50:00, five minute timeout.
    fn default() -> Self {
        Self {
            morning: TimeOfDay::from_hms_unchecked(3, 50, 0),
            nighttime: TimeOfDay::from_hms_unchecked(23, 0, 0),
            timeout: Duration::from_secs(300),
        }
    }
}

impl TimeoutConfig {
    /// Build a configuration from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroTimeout`] when `timeout` is zero.
    pub fn new(
        morning: TimeOfDay,
        nighttime: TimeOfDay,
        timeout: Duration,
    ) -> Result<Self, ValidationError> {
        let config = Self {
            morning,
            nighttime,
            timeout,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroTimeout`] when the timeout is zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout.is_zero() {
            return Err(ValidationError::ZeroTimeout);
        }
        Ok(())
    }

    #[must_use]
    pub fn morning(&self) -> TimeOfDay {
        self.morning
    }

    #[must_use]
    pub fn nighttime(&self) -> TimeOfDay {
        self.nighttime
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn with_morning(mut self, morning: TimeOfDay) -> Self {
        self.morning = morning;
        self
    }

    #[must_use]
    pub fn with_nighttime(mut self, nighttime: TimeOfDay) -> Self {
        self.nighttime = nighttime;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether `now` falls inside the half-open window `[nighttime, morning)`.
    ///
    /// The window wraps through midnight when `nighttime` is later on the
    /// clock face than `morning`. Equal boundaries describe an empty window.
    #[must_use]
    pub fn night_window_contains(&self, now: TimeOfDay) -> bool {
        match self.nighttime.cmp(&self.morning) {
            Ordering::Equal => false,
            Ordering::Less => self.nighttime <= now && now < self.morning,
            Ordering::Greater => now >= self.nighttime || now < self.morning,
        }
    }
}
