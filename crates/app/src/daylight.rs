//! Daylight switcher — entities that follow the sun.
//!
//! Sunset turns the configured follow-sun entities on, sunrise turns them
//! off, and an alignment pass at startup (or after a settings change)
//! brings stragglers in line with the current sun position.

use nightwatch_domain::command::Command;
use nightwatch_domain::entity::EntityState;
use nightwatch_domain::error::NightwatchError;
use nightwatch_domain::id::EntityId;
use nightwatch_domain::sun::SunPosition;

use crate::ports::{DeviceCommands, StateProvider};

/// Drives the follow-sun entity list.
pub struct DaylightSwitcher<S, C> {
    states: S,
    commands: C,
    follow_sun: Vec<EntityId>,
}

impl<S, C> DaylightSwitcher<S, C>
where
    S: StateProvider,
    C: DeviceCommands,
{
    /// Create a switcher over a fixed follow-sun list.
    pub fn new(states: S, commands: C, follow_sun: Vec<EntityId>) -> Self {
        Self {
            states,
            commands,
            follow_sun,
        }
    }

    /// Sunset: turn every follow-sun entity on.
    ///
    /// # Errors
    ///
    /// Propagates command errors.
    pub async fn on_sunset(&self) -> Result<(), NightwatchError> {
        tracing::info!(count = self.follow_sun.len(), "sunset, turning follow-sun entities on");
        for entity in &self.follow_sun {
            self.commands.execute(Command::TurnOn(entity.clone())).await?;
        }
        Ok(())
    }

    /// Sunrise: turn every follow-sun entity off.
    ///
    /// # Errors
    ///
    /// Propagates command errors.
    pub async fn on_sunrise(&self) -> Result<(), NightwatchError> {
        tracing::info!(count = self.follow_sun.len(), "sunrise, turning follow-sun entities off");
        for entity in &self.follow_sun {
            self.commands.execute(Command::TurnOff(entity.clone())).await?;
        }
        Ok(())
    }

    /// Bring the follow-sun entities in line with the current sun position:
    /// sun down turns on what is off, sun up turns off what is on. Entities
    /// in any other state are left alone.
    ///
    /// # Errors
    ///
    /// Propagates state-provider and command errors.
    #[tracing::instrument(skip(self))]
    pub async fn align_to_sun(&self) -> Result<(), NightwatchError> {
        if self.follow_sun.is_empty() {
            return Ok(());
        }
        let sun = self.states.sun_position().await?;
        for entity in &self.follow_sun {
            let Some(state) = self.states.current_state(entity).await? else {
                tracing::warn!(entity = %entity, "follow-sun entity unknown to the host");
                continue;
            };
            match (sun, state) {
                (SunPosition::BelowHorizon, EntityState::Off) => {
                    tracing::info!(entity = %entity, "sun is down, turning on");
                    self.commands.execute(Command::TurnOn(entity.clone())).await?;
                }
                (SunPosition::AboveHorizon, EntityState::On) => {
                    tracing::info!(entity = %entity, "sun is up, turning off");
                    self.commands.execute(Command::TurnOff(entity.clone())).await?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}
