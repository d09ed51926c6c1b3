//! Outbound device commands.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::EntityId;

/// A command the engine sends to the host to actuate a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    TurnOn(EntityId),
    TurnOff(EntityId),
    CloseCover(EntityId),
}

impl Command {
    /// The entity the command targets.
    #[must_use]
    pub fn entity(&self) -> &EntityId {
        match self {
            Self::TurnOn(id) | Self::TurnOff(id) | Self::CloseCover(id) => id,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TurnOn(id) => write!(f, "turn_on {id}"),
            Self::TurnOff(id) => write!(f, "turn_off {id}"),
            Self::CloseCover(id) => write!(f, "close_cover {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_the_target_entity() {
        let id = EntityId::new("light.kitchen").unwrap();
        let command = Command::TurnOff(id.clone());
        assert_eq!(command.entity(), &id);
    }

    #[test]
    fn should_display_the_verb_and_target() {
        let id = EntityId::new("cover.garage_door").unwrap();
        assert_eq!(
            Command::CloseCover(id).to_string(),
            "close_cover cover.garage_door"
        );
    }
}
