//! Inbound host notifications and outbound spoken announcements.

use serde::{Deserialize, Serialize};

use crate::entity::EntityState;
use crate::id::EntityId;

/// A notification pushed by the host runtime into the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// An entity changed state.
    StateChanged {
        entity: EntityId,
        old: EntityState,
        new: EntityState,
    },
    /// A settings slider moved on the host UI.
    SliderChanged { slider: EntityId, value: f64 },
    /// The sun rose above the horizon.
    Sunrise,
    /// The sun dropped below the horizon.
    Sunset,
    /// The host runtime came back after a restart.
    HostRestarted,
}

/// A spoken announcement for the household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub text: String,
    pub priority: u8,
    pub language: String,
}

impl Notification {
    /// A shutoff reminder: priority 1, spoken in English.
    #[must_use]
    pub fn reminder(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            priority: 1,
            language: "en".to_string(),
        }
    }

    /// The reminder spoken when a light or switch is turned off.
    #[must_use]
    pub fn turn_out_reminder(entity: &EntityId) -> Self {
        Self::reminder(format!("Please remember to turn out the {entity}"))
    }

    /// The reminder spoken when the garage door is closed.
    #[must_use]
    pub fn close_garage_reminder() -> Self {
        Self::reminder("Please remember to close the garage door when you come in")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_reminders_with_speech_metadata() {
        let note = Notification::reminder("hello");
        assert_eq!(note.priority, 1);
        assert_eq!(note.language, "en");
    }

    #[test]
    fn should_name_the_entity_in_the_turn_out_reminder() {
        let id = EntityId::new("light.kitchen").unwrap();
        assert_eq!(
            Notification::turn_out_reminder(&id).text,
            "Please remember to turn out the light.kitchen"
        );
    }

    #[test]
    fn should_use_the_fixed_garage_door_reminder() {
        assert_eq!(
            Notification::close_garage_reminder().text,
            "Please remember to close the garage door when you come in"
        );
    }
}
