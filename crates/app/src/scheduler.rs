//! Timeout scheduler — the per-entity Idle/Armed state machine.
//!
//! During the night window every activation of a monitored entity arms (or
//! re-arms) a one-shot timer; when the timer fires and the entity is still
//! on, the scheduler turns it off and asks for a spoken reminder.

use std::collections::HashMap;

use nightwatch_domain::command::Command;
use nightwatch_domain::entity::{Category, EntityState, MonitoredEntity};
use nightwatch_domain::error::NightwatchError;
use nightwatch_domain::event::Notification;
use nightwatch_domain::id::EntityId;
use nightwatch_domain::settings::TimeoutConfig;
use nightwatch_domain::time::{Now, Timestamp};
use nightwatch_domain::timer::ArmedTimer;

use crate::ports::{Announcer, DeviceCommands, StateProvider, TimerFire, TimerHost};

/// One armed timer plus the handle needed to cancel it.
struct ArmedEntry<H> {
    timer: ArmedTimer,
    generation: u64,
    handle: H,
}

/// Arms one shutoff timer per active monitored entity and executes the
/// shutoff when a timer fires.
///
/// The scheduler owns the watch list and the armed-timer map exclusively;
/// it is driven by the single-consumer engine loop, so no internal locking
/// is needed.
pub struct ShutoffScheduler<S, C, T: TimerHost, N> {
    states: S,
    commands: C,
    timers: T,
    announcer: N,
    watchlist: HashMap<EntityId, MonitoredEntity>,
    armed: HashMap<EntityId, ArmedEntry<T::Handle>>,
    generation: u64,
}

impl<S, C, T, N> ShutoffScheduler<S, C, T, N>
where
    S: StateProvider,
    C: DeviceCommands,
    T: TimerHost,
    N: Announcer,
{
    /// Create a scheduler over a fixed watch list.
    pub fn new(
        states: S,
        commands: C,
        timers: T,
        announcer: N,
        watchlist: Vec<MonitoredEntity>,
    ) -> Self {
        let watchlist = watchlist
            .into_iter()
            .map(|entity| (entity.id().clone(), entity))
            .collect();
        Self {
            states,
            commands,
            timers,
            announcer,
            watchlist,
            armed: HashMap::new(),
            generation: 0,
        }
    }

    /// Number of entities on the watch list.
    #[must_use]
    pub fn watch_count(&self) -> usize {
        self.watchlist.len()
    }

    /// Number of currently armed timers.
    #[must_use]
    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }

    /// Deadline of the armed timer for `entity`, if one is pending.
    #[must_use]
    pub fn armed_deadline(&self, entity: &EntityId) -> Option<Timestamp> {
        self.armed.get(entity).map(|entry| entry.timer.deadline)
    }

    /// React to a host state change; arms a timer when a monitored entity
    /// becomes active.
    ///
    /// # Errors
    ///
    /// Propagates state-provider and command errors.
    pub async fn on_state_changed(
        &mut self,
        entity: &EntityId,
        old: EntityState,
        new: EntityState,
        now: Now,
        config: &TimeoutConfig,
    ) -> Result<(), NightwatchError> {
        let Some(monitored) = self.watchlist.get(entity).cloned() else {
            return Ok(());
        };
        if monitored.is_activation(old, new) {
            self.schedule_event(&monitored, now, config).await?;
        }
        Ok(())
    }

    /// Arm timers for every monitored entity that is already active.
    ///
    /// Run at startup and again whenever the settings change, so entities
    /// turned on before the engine (or before the new settings) still time
    /// out.
    ///
    /// # Errors
    ///
    /// Propagates state-provider errors.
    #[tracing::instrument(skip(self, now, config))]
    pub async fn prime_from_current_state(
        &mut self,
        now: Now,
        config: &TimeoutConfig,
    ) -> Result<(), NightwatchError> {
        let entities: Vec<MonitoredEntity> = self.watchlist.values().cloned().collect();
        for entity in entities {
            match self.states.current_state(entity.id()).await? {
                Some(state) if entity.is_active(state) => {
                    self.schedule_event(&entity, now, config).await?;
                }
                Some(_) => {}
                None => {
                    tracing::warn!(entity = %entity.id(), "monitored entity unknown to the host");
                }
            }
        }
        Ok(())
    }

    /// Handle an elapsed timer.
    ///
    /// Stale generations and entities that went off on their own are silent
    /// no-ops.
    ///
    /// # Errors
    ///
    /// Propagates state-provider and command errors.
    #[tracing::instrument(skip(self, fire), fields(entity = %fire.entity))]
    pub async fn on_timer_fire(&mut self, fire: TimerFire) -> Result<(), NightwatchError> {
        let Some(entry) = self.armed.get(&fire.entity) else {
            tracing::debug!("fire without an armed timer, ignoring");
            return Ok(());
        };
        if entry.generation != fire.generation {
            tracing::debug!(
                armed = entry.generation,
                fired = fire.generation,
                "stale timer generation, ignoring"
            );
            return Ok(());
        }
        self.armed.remove(&fire.entity);

        let Some(monitored) = self.watchlist.get(&fire.entity).cloned() else {
            tracing::warn!("armed entity is missing from the watch list");
            return Ok(());
        };
        let Some(state) = self.states.current_state(&fire.entity).await? else {
            tracing::warn!("entity vanished from the host, nothing to turn off");
            return Ok(());
        };
        if !monitored.is_active(state) {
            tracing::debug!(%state, "already off, nothing to do");
            return Ok(());
        }

        match monitored.category() {
            Category::Light | Category::Switch => {
                tracing::info!("timed out, turning off");
                self.commands
                    .execute(Command::TurnOff(fire.entity.clone()))
                    .await?;
                self.announce(Notification::turn_out_reminder(&fire.entity))
                    .await;
            }
            Category::Cover => {
                tracing::info!("timed out, closing");
                self.commands
                    .execute(Command::CloseCover(fire.entity.clone()))
                    .await?;
                self.announce(Notification::close_garage_reminder()).await;
            }
            category => {
                tracing::warn!(%category, "no shutoff action for this category");
            }
        }
        Ok(())
    }

    /// Arm (or re-arm) the shutoff timer for one monitored entity, provided
    /// the night window is open and the house mode allows it.
    async fn schedule_event(
        &mut self,
        entity: &MonitoredEntity,
        now: Now,
        config: &TimeoutConfig,
    ) -> Result<(), NightwatchError> {
        if !config.night_window_contains(now.local) {
            tracing::debug!(entity = %entity.id(), now = %now.local, "outside the night window");
            return Ok(());
        }
        let mode = self.states.house_mode().await?;
        if !mode.is_normal() {
            tracing::debug!(entity = %entity.id(), %mode, "house mode suspends scheduling");
            return Ok(());
        }

        self.generation += 1;
        let generation = self.generation;
        if let Some(previous) = self.armed.remove(entity.id()) {
            self.timers.cancel(previous.handle);
        }
        let timer = ArmedTimer::arm(now.utc, config.timeout());
        let handle = self.timers.run_in(
            config.timeout(),
            TimerFire {
                entity: entity.id().clone(),
                generation,
            },
        );
        tracing::info!(entity = %entity.id(), deadline = %timer.deadline, "armed shutoff timer");
        self.armed.insert(
            entity.id().clone(),
            ArmedEntry {
                timer,
                generation,
                handle,
            },
        );
        Ok(())
    }

    async fn announce(&self, notification: Notification) {
        if let Err(err) = self.announcer.announce(notification).await {
            tracing::warn!(%err, "failed to announce shutoff reminder");
        }
    }
}
