//! In-memory port fakes shared by the engine's unit tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use nightwatch_domain::command::Command;
use nightwatch_domain::entity::{EntityState, MonitoredEntity};
use nightwatch_domain::error::NightwatchError;
use nightwatch_domain::event::Notification;
use nightwatch_domain::id::EntityId;
use nightwatch_domain::mode::HouseMode;
use nightwatch_domain::settings::TimeoutConfig;
use nightwatch_domain::slider::SliderControl;
use nightwatch_domain::sun::SunPosition;
use nightwatch_domain::time::{Now, TimeOfDay};

use crate::ports::{
    Announcer, ControlPanel, DeviceCommands, SettingsRepository, StateProvider, TimerFire,
    TimerHost,
};

pub(crate) fn id(raw: &str) -> EntityId {
    EntityId::new(raw).unwrap()
}

pub(crate) fn monitored(raw: &str) -> MonitoredEntity {
    MonitoredEntity::new(id(raw))
}

pub(crate) fn at(hour: u8, minute: u8) -> TimeOfDay {
    TimeOfDay::new(hour, minute, 0).unwrap()
}

/// A `Now` inside the default night window (23:30 local).
pub(crate) fn night_now() -> Now {
    Now::new(nightwatch_domain::time::now(), at(23, 30))
}

/// A `Now` outside the default night window (12:00 local).
pub(crate) fn midday_now() -> Now {
    Now::new(nightwatch_domain::time::now(), at(12, 0))
}

/// In-memory stand-in for the host's world model.
#[derive(Default)]
pub(crate) struct FakeHome {
    states: Mutex<HashMap<EntityId, EntityState>>,
    groups: Mutex<HashMap<EntityId, Vec<EntityId>>>,
    mode: Mutex<Option<HouseMode>>,
    sun: Mutex<Option<SunPosition>>,
}

impl FakeHome {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub(crate) fn with_state(self, raw: &str, state: EntityState) -> Self {
        self.set_state(&id(raw), state);
        self
    }

    #[must_use]
    pub(crate) fn with_group(self, raw: &str, members: &[&str]) -> Self {
        let group = id(raw);
        self.set_state(&group, EntityState::On);
        self.groups
            .lock()
            .unwrap()
            .insert(group, members.iter().map(|member| id(member)).collect());
        self
    }

    #[must_use]
    pub(crate) fn with_mode(self, mode: HouseMode) -> Self {
        *self.mode.lock().unwrap() = Some(mode);
        self
    }

    #[must_use]
    pub(crate) fn with_sun(self, sun: SunPosition) -> Self {
        *self.sun.lock().unwrap() = Some(sun);
        self
    }

    pub(crate) fn set_state(&self, entity: &EntityId, state: EntityState) {
        self.states.lock().unwrap().insert(entity.clone(), state);
    }

    pub(crate) fn remove_state(&self, entity: &EntityId) {
        self.states.lock().unwrap().remove(entity);
    }
}

impl StateProvider for FakeHome {
    fn current_state(
        &self,
        id: &EntityId,
    ) -> impl Future<Output = Result<Option<EntityState>, NightwatchError>> + Send {
        let state = self.states.lock().unwrap().get(id).copied();
        async move { Ok(state) }
    }

    fn group_members(
        &self,
        id: &EntityId,
    ) -> impl Future<Output = Result<Vec<EntityId>, NightwatchError>> + Send {
        let members = self
            .groups
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or_default();
        async move { Ok(members) }
    }

    fn house_mode(&self) -> impl Future<Output = Result<HouseMode, NightwatchError>> + Send {
        let mode = self
            .mode
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(HouseMode::Normal);
        async move { Ok(mode) }
    }

    fn sun_position(&self) -> impl Future<Output = Result<SunPosition, NightwatchError>> + Send {
        let sun = self
            .sun
            .lock()
            .unwrap()
            .unwrap_or(SunPosition::AboveHorizon);
        async move { Ok(sun) }
    }
}

/// Records executed commands without touching any state.
#[derive(Default)]
pub(crate) struct RecordingCommands {
    executed: Mutex<Vec<Command>>,
}

impl RecordingCommands {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn executed(&self) -> Vec<Command> {
        self.executed.lock().unwrap().clone()
    }
}

impl DeviceCommands for RecordingCommands {
    fn execute(&self, command: Command) -> impl Future<Output = Result<(), NightwatchError>> + Send {
        self.executed.lock().unwrap().push(command);
        async { Ok(()) }
    }
}

/// Records announcements.
#[derive(Default)]
pub(crate) struct RecordingAnnouncer {
    announced: Mutex<Vec<Notification>>,
}

impl RecordingAnnouncer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn announced(&self) -> Vec<Notification> {
        self.announced.lock().unwrap().clone()
    }
}

impl Announcer for RecordingAnnouncer {
    fn announce(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), NightwatchError>> + Send {
        self.announced.lock().unwrap().push(notification);
        async { Ok(()) }
    }
}

/// Records slider writes to the host panel.
#[derive(Default)]
pub(crate) struct RecordingPanel {
    writes: Mutex<Vec<(SliderControl, f64)>>,
}

impl RecordingPanel {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn writes(&self) -> Vec<(SliderControl, f64)> {
        self.writes.lock().unwrap().clone()
    }
}

impl ControlPanel for RecordingPanel {
    fn set_slider(
        &self,
        control: SliderControl,
        value: f64,
    ) -> impl Future<Output = Result<(), NightwatchError>> + Send {
        self.writes.lock().unwrap().push((control, value));
        async { Ok(()) }
    }
}

/// A timer host that never fires on its own; tests inspect what was
/// scheduled and deliver fires by hand.
#[derive(Default)]
pub(crate) struct ManualTimers {
    scheduled: Mutex<Vec<ScheduledFire>>,
    cancelled: Mutex<Vec<u64>>,
    next_handle: AtomicU64,
}

#[derive(Debug, Clone)]
pub(crate) struct ScheduledFire {
    pub(crate) handle: u64,
    pub(crate) delay: Duration,
    pub(crate) fire: TimerFire,
}

impl ManualTimers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fires scheduled and not cancelled, oldest first.
    pub(crate) fn pending(&self) -> Vec<ScheduledFire> {
        let cancelled = self.cancelled.lock().unwrap();
        self.scheduled
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| !cancelled.contains(&entry.handle))
            .cloned()
            .collect()
    }

    pub(crate) fn cancelled(&self) -> Vec<u64> {
        self.cancelled.lock().unwrap().clone()
    }
}

impl TimerHost for ManualTimers {
    type Handle = u64;

    fn run_in(&self, delay: Duration, fire: TimerFire) -> Self::Handle {
        let handle = self.next_handle.fetch_add(1, Ordering::SeqCst);
        self.scheduled.lock().unwrap().push(ScheduledFire {
            handle,
            delay,
            fire,
        });
        handle
    }

    fn cancel(&self, handle: Self::Handle) {
        self.cancelled.lock().unwrap().push(handle);
    }
}

/// Settings repository backed by a mutex-guarded slot.
#[derive(Default)]
pub(crate) struct InMemorySettings {
    saved: Mutex<Option<TimeoutConfig>>,
}

impl InMemorySettings {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub(crate) fn with_saved(self, config: TimeoutConfig) -> Self {
        *self.saved.lock().unwrap() = Some(config);
        self
    }

    pub(crate) fn saved(&self) -> Option<TimeoutConfig> {
        self.saved.lock().unwrap().clone()
    }
}

impl SettingsRepository for InMemorySettings {
    fn load(&self) -> impl Future<Output = Result<Option<TimeoutConfig>, NightwatchError>> + Send {
        let saved = self.saved.lock().unwrap().clone();
        async move { Ok(saved) }
    }

    fn save(
        &self,
        config: &TimeoutConfig,
    ) -> impl Future<Output = Result<(), NightwatchError>> + Send {
        *self.saved.lock().unwrap() = Some(config.clone());
        async { Ok(()) }
    }
}
