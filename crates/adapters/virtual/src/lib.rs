//! # nightwatch-adapter-virtual
//!
//! A simulated home that stands in for a real host runtime. It backs all
//! four host-facing ports with in-memory tables and pushes [`HostEvent`]s
//! into the engine inbox, so the full shutoff loop runs with no hardware
//! and no network.
//!
//! ## Port coverage
//!
//! | Port | Backing |
//! |------|---------|
//! | `StateProvider` | entity, group, mode and sun tables |
//! | `DeviceCommands` | mutates the entity table, echoes the transition |
//! | `Announcer` | logs and records every announcement |
//! | `ControlPanel` | records slider writes, never echoes them |
//!
//! ## Dependency rule
//!
//! Depends on `nightwatch-app` (port traits) and `nightwatch-domain` only.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::mpsc;

use nightwatch_app::ports::{Announcer, ControlPanel, DeviceCommands, StateProvider};
use nightwatch_app::runtime::EngineMessage;
use nightwatch_domain::command::Command;
use nightwatch_domain::entity::EntityState;
use nightwatch_domain::error::{NightwatchError, UnknownEntityError};
use nightwatch_domain::event::{HostEvent, Notification};
use nightwatch_domain::id::EntityId;
use nightwatch_domain::mode::HouseMode;
use nightwatch_domain::slider::SliderControl;
use nightwatch_domain::sun::SunPosition;

struct Inner {
    states: HashMap<EntityId, EntityState>,
    groups: HashMap<EntityId, Vec<EntityId>>,
    mode: HouseMode,
    sun: SunPosition,
    announcements: Vec<Notification>,
    panel: Vec<(SliderControl, f64)>,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            states: HashMap::new(),
            groups: HashMap::new(),
            mode: HouseMode::Normal,
            sun: SunPosition::AboveHorizon,
            announcements: Vec::new(),
            panel: Vec::new(),
        }
    }
}

/// A simulated host holding the whole world model in memory.
///
/// Shared as an `Arc` so one home can serve every port at once.
pub struct VirtualHome {
    inner: Mutex<Inner>,
    events: mpsc::UnboundedSender<EngineMessage>,
}

impl VirtualHome {
    /// Create an empty home feeding the given engine inbox.
    #[must_use]
    pub fn new(events: mpsc::UnboundedSender<EngineMessage>) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            events,
        }
    }

    /// Register an entity with its initial state.
    #[must_use]
    pub fn with_entity(self, id: EntityId, state: EntityState) -> Self {
        self.lock().states.insert(id, state);
        self
    }

    /// Register a group and its members.
    ///
    /// The group itself gets an `On` state so lookups resolve it.
    #[must_use]
    pub fn with_group(self, id: EntityId, members: Vec<EntityId>) -> Self {
        {
            let mut inner = self.lock();
            inner.states.insert(id.clone(), EntityState::On);
            inner.groups.insert(id, members);
        }
        self
    }

    /// Set the house mode.
    #[must_use]
    pub fn with_mode(self, mode: HouseMode) -> Self {
        self.lock().mode = mode;
        self
    }

    /// Set the sun position.
    #[must_use]
    pub fn with_sun(self, sun: SunPosition) -> Self {
        self.lock().sun = sun;
        self
    }

    /// Flip an entity, as if someone toggled it in the house.
    ///
    /// Unregistered entities get created with an `Unknown` previous state.
    pub fn set_state(&self, id: &EntityId, new: EntityState) {
        let old = self
            .lock()
            .states
            .insert(id.clone(), new)
            .unwrap_or(EntityState::Unknown);
        self.emit(HostEvent::StateChanged {
            entity: id.clone(),
            old,
            new,
        });
    }

    /// Change the house mode without generating any event.
    pub fn set_mode(&self, mode: HouseMode) {
        self.lock().mode = mode;
    }

    /// Drop the sun below the horizon and fire the sunset event.
    pub fn fire_sunset(&self) {
        self.lock().sun = SunPosition::BelowHorizon;
        self.emit(HostEvent::Sunset);
    }

    /// Raise the sun above the horizon and fire the sunrise event.
    pub fn fire_sunrise(&self) {
        self.lock().sun = SunPosition::AboveHorizon;
        self.emit(HostEvent::Sunrise);
    }

    /// Report a host runtime restart.
    pub fn fire_host_restarted(&self) {
        self.emit(HostEvent::HostRestarted);
    }

    /// Drag one of the settings sliders on the panel.
    pub fn move_slider(&self, control: SliderControl, value: f64) {
        self.emit(HostEvent::SliderChanged {
            slider: control.entity_id(),
            value,
        });
    }

    /// Current state of an entity, if the home knows it.
    #[must_use]
    pub fn state_of(&self, id: &EntityId) -> Option<EntityState> {
        self.lock().states.get(id).copied()
    }

    /// Every announcement spoken so far, oldest first.
    #[must_use]
    pub fn announcements(&self) -> Vec<Notification> {
        self.lock().announcements.clone()
    }

    /// Every panel write observed so far, oldest first.
    #[must_use]
    pub fn panel_writes(&self) -> Vec<(SliderControl, f64)> {
        self.lock().panel.clone()
    }

    fn emit(&self, event: HostEvent) {
        // Delivery fails only when the engine has already shut down.
        let _ = self.events.send(EngineMessage::Host(event));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl StateProvider for VirtualHome {
    async fn current_state(&self, id: &EntityId) -> Result<Option<EntityState>, NightwatchError> {
        Ok(self.lock().states.get(id).copied())
    }

    async fn group_members(&self, id: &EntityId) -> Result<Vec<EntityId>, NightwatchError> {
        Ok(self.lock().groups.get(id).cloned().unwrap_or_default())
    }

    async fn house_mode(&self) -> Result<HouseMode, NightwatchError> {
        Ok(self.lock().mode.clone())
    }

    async fn sun_position(&self) -> Result<SunPosition, NightwatchError> {
        Ok(self.lock().sun)
    }
}

impl DeviceCommands for VirtualHome {
    async fn execute(&self, command: Command) -> Result<(), NightwatchError> {
        let (entity, target) = match &command {
            Command::TurnOn(id) => (id.clone(), EntityState::On),
            Command::TurnOff(id) => (id.clone(), EntityState::Off),
            Command::CloseCover(id) => (id.clone(), EntityState::Closed),
        };

        let old = {
            let mut inner = self.lock();
            let Some(slot) = inner.states.get_mut(&entity) else {
                return Err(UnknownEntityError {
                    id: entity.to_string(),
                }
                .into());
            };
            std::mem::replace(slot, target)
        };

        tracing::debug!(%command, "executed device command");

        // The host only reports transitions that actually change something.
        if old != target {
            self.emit(HostEvent::StateChanged {
                entity,
                old,
                new: target,
            });
        }
        Ok(())
    }
}

impl Announcer for VirtualHome {
    async fn announce(&self, notification: Notification) -> Result<(), NightwatchError> {
        tracing::info!(text = %notification.text, "speaking announcement");
        self.lock().announcements.push(notification);
        Ok(())
    }
}

impl ControlPanel for VirtualHome {
    async fn set_slider(&self, control: SliderControl, value: f64) -> Result<(), NightwatchError> {
        self.lock().panel.push((control, value));
        Ok(())
    }
}
