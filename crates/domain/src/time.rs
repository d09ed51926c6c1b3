//! Time primitives — wall-clock timestamps and clock-face times of day.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Timestamp alias used across the domain.
pub type Timestamp = DateTime<Utc>;

/// Returns the current timestamp.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// One clock sample, taken once per engine message and threaded through
/// every decision made for it.
///
/// Window checks use the household's local clock face; timer arithmetic
/// stays on the absolute UTC instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Now {
    /// Absolute instant.
    pub utc: Timestamp,
    /// Local clock-face time.
    pub local: TimeOfDay,
}

impl Now {
    #[must_use]
    pub fn new(utc: Timestamp, local: TimeOfDay) -> Self {
        Self { utc, local }
    }

    /// Sample both clocks.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            utc: now(),
            local: TimeOfDay::now_local(),
        }
    }
}

/// A clock-face time with second precision, detached from any date.
///
/// Ordering is chronological within a single day; day wrap-around is the
/// caller's concern (see the night window logic in [`crate::settings`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    second: u8,
}

impl TimeOfDay {
    /// Build a time of day from its components.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first component out of its
    /// calendar range.
    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::HourOutOfRange(i64::from(hour)));
        }
        if minute > 59 {
            return Err(ValidationError::MinuteOutOfRange(i64::from(minute)));
        }
        if second > 59 {
            return Err(ValidationError::SecondOutOfRange(i64::from(second)));
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    /// Creates a time of day without range checks.
    ///
    /// Callers must pass calendar-valid components; reserved for in-crate
    /// constants.
    pub(crate) const fn from_hms_unchecked(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// The current local wall-clock time.
    #[must_use]
    pub fn now_local() -> Self {
        Self::from(Local::now().time())
    }

    #[must_use]
    pub fn hour(&self) -> u8 {
        self.hour
    }

    #[must_use]
    pub fn minute(&self) -> u8 {
        self.minute
    }

    #[must_use]
    pub fn second(&self) -> u8 {
        self.second
    }

    /// Replace the hour component.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::HourOutOfRange`] for hours past 23.
    pub fn with_hour(self, hour: u8) -> Result<Self, ValidationError> {
        Self::new(hour, self.minute, self.second)
    }

    /// Replace the minute component.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MinuteOutOfRange`] for minutes past 59.
    pub fn with_minute(self, minute: u8) -> Result<Self, ValidationError> {
        Self::new(self.hour, minute, self.second)
    }
}

fn clamp_component(value: u32, max: u8) -> u8 {
    u8::try_from(value).map_or(max, |v| v.min(max))
}

impl From<chrono::NaiveTime> for TimeOfDay {
    fn from(value: chrono::NaiveTime) -> Self {
        Self {
            hour: clamp_component(value.hour(), 23),
            minute: clamp_component(value.minute(), 59),
            second: clamp_component(value.second(), 59),
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    /// Parses `HH:MM:SS`, tolerating unpadded components (`3:50:00`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let [hour, minute, second] = parts.as_slice() else {
            return Err(ValidationError::MalformedTime(s.to_string()));
        };
        let parse = |part: &str| -> Result<i64, ValidationError> {
            part.trim()
                .parse()
                .map_err(|_| ValidationError::MalformedTime(s.to_string()))
        };
        let (hour, minute, second) = (parse(hour)?, parse(minute)?, parse(second)?);
        if !(0..=23).contains(&hour) {
            return Err(ValidationError::HourOutOfRange(hour));
        }
        if !(0..=59).contains(&minute) {
            return Err(ValidationError::MinuteOutOfRange(minute));
        }
        if !(0..=59).contains(&second) {
            return Err(ValidationError::SecondOutOfRange(second));
        }
        Self::new(
            u8::try_from(hour).map_err(|_| ValidationError::HourOutOfRange(hour))?,
            u8::try_from(minute).map_err(|_| ValidationError::MinuteOutOfRange(minute))?,
            u8::try_from(second).map_err(|_| ValidationError::SecondOutOfRange(second))?,
        )
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}
