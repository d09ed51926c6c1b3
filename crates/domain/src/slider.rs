//! Settings sliders — the host UI controls that edit the shutoff settings.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::EntityId;
use crate::settings::TimeoutConfig;

/// Domain prefix of the host slider entities.
pub const SLIDER_DOMAIN: &str = "input_slider";

/// Typed identity of the five settings sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliderControl {
    MorningHour,
    MorningMinutes,
    NighttimeHour,
    NighttimeMinutes,
    TimeoutValue,
}

impl SliderControl {
    /// Every control, in panel order.
    pub const ALL: [Self; 5] = [
        Self::MorningHour,
        Self::MorningMinutes,
        Self::NighttimeHour,
        Self::NighttimeMinutes,
        Self::TimeoutValue,
    ];

    /// Resolve a slider entity id to its control.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownSlider`] when the entity is not in
    /// the slider domain or its object name is none of the five controls.
    pub fn from_entity(id: &EntityId) -> Result<Self, ValidationError> {
        if id.domain() != SLIDER_DOMAIN {
            return Err(ValidationError::UnknownSlider(id.to_string()));
        }
        Self::from_object_id(id.object_id())
            .map_err(|_| ValidationError::UnknownSlider(id.to_string()))
    }

    /// Resolve a slider object name (`morning_hour`, ...) to its control.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownSlider`] for unrecognized names.
    pub fn from_object_id(name: &str) -> Result<Self, ValidationError> {
        match name {
            "morning_hour" => Ok(Self::MorningHour),
            "morning_minutes" => Ok(Self::MorningMinutes),
            "nighttime_hour" => Ok(Self::NighttimeHour),
            "nighttime_minutes" => Ok(Self::NighttimeMinutes),
            "timeout_value" => Ok(Self::TimeoutValue),
            other => Err(ValidationError::UnknownSlider(other.to_string())),
        }
    }

    /// The full entity id of this control on the host panel.
    #[must_use]
    pub fn entity_id(&self) -> EntityId {
        EntityId::join(SLIDER_DOMAIN, self.object_id())
    }

    /// The slider object name, without the domain prefix.
    #[must_use]
    pub fn object_id(&self) -> &'static str {
        match self {
            Self::MorningHour => "morning_hour",
            Self::MorningMinutes => "morning_minutes",
            Self::NighttimeHour => "nighttime_hour",
            Self::NighttimeMinutes => "nighttime_minutes",
            Self::TimeoutValue => "timeout_value",
        }
    }

    /// The value this control should show for the given configuration.
    #[must_use]
    pub fn value_in(&self, config: &TimeoutConfig) -> f64 {
        match self {
            Self::MorningHour => f64::from(config.morning().hour()),
            Self::MorningMinutes => f64::from(config.morning().minute()),
            Self::NighttimeHour => f64::from(config.nighttime().hour()),
            Self::NighttimeMinutes => f64::from(config.nighttime().minute()),
            Self::TimeoutValue => config.timeout().as_secs_f64(),
        }
    }
}

impl fmt::Display for SliderControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.object_id())
    }
}

/// A slider edit reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderChange {
    pub control: SliderControl,
    pub value: f64,
}

impl SliderChange {
    #[must_use]
    pub fn new(control: SliderControl, value: f64) -> Self {
        Self { control, value }
    }

    /// Apply this edit to a configuration, touching only the edited
    /// component.
    ///
    /// The slider float is truncated to a whole number first.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the truncated value is outside the
    /// control's range; the configuration is left as it was.
    pub fn apply_to(&self, config: &TimeoutConfig) -> Result<TimeoutConfig, ValidationError> {
        let value = self.whole_value();
        let config = config.clone();
        match self.control {
            SliderControl::MorningHour => {
                let morning = config.morning().with_hour(hour_component(value)?)?;
                Ok(config.with_morning(morning))
            }
            SliderControl::MorningMinutes => {
                let morning = config.morning().with_minute(minute_component(value)?)?;
                Ok(config.with_morning(morning))
            }
            SliderControl::NighttimeHour => {
                let nighttime = config.nighttime().with_hour(hour_component(value)?)?;
                Ok(config.with_nighttime(nighttime))
            }
            SliderControl::NighttimeMinutes => {
                let nighttime = config.nighttime().with_minute(minute_component(value)?)?;
                Ok(config.with_nighttime(nighttime))
            }
            SliderControl::TimeoutValue => {
                let seconds = u64::try_from(value)
                    .ok()
                    .filter(|seconds| *seconds > 0)
                    .ok_or(ValidationError::ZeroTimeout)?;
                Ok(config.with_timeout(Duration::from_secs(seconds)))
            }
        }
    }

    /// The slider value truncated to a whole number; non-finite floats map
    /// to `-1` so they fail the range checks.
    #[allow(clippy::cast_possible_truncation)]
    fn whole_value(&self) -> i64 {
        if self.value.is_finite() {
            self.value.trunc() as i64
        } else {
            -1
        }
    }
}

fn hour_component(value: i64) -> Result<u8, ValidationError> {
    u8::try_from(value)
        .ok()
        .filter(|hour| *hour <= 23)
        .ok_or(ValidationError::HourOutOfRange(value))
}

fn minute_component(value: i64) -> Result<u8, ValidationError> {
    u8::try_from(value)
        .ok()
        .filter(|minute| *minute <= 59)
        .ok_or(ValidationError::MinuteOutOfRange(value))
}
