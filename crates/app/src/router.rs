//! Event router — dispatches engine messages to the right component.
//!
//! The router owns the scheduler, the daylight switcher, the settings
//! service, and the panel port. It holds no domain state of its own; every
//! message is forwarded with one shared clock sample.

use nightwatch_domain::error::NightwatchError;
use nightwatch_domain::event::HostEvent;
use nightwatch_domain::id::EntityId;
use nightwatch_domain::slider::{SliderChange, SliderControl};
use nightwatch_domain::time::Now;

use crate::daylight::DaylightSwitcher;
use crate::ports::{
    Announcer, ControlPanel, DeviceCommands, SettingsRepository, StateProvider, TimerHost,
};
use crate::runtime::EngineMessage;
use crate::scheduler::ShutoffScheduler;
use crate::settings::SettingsService;

/// Routes inbound messages to the scheduler, daylight switcher, and
/// settings service.
pub struct EventRouter<S, C, T: TimerHost, N, P, R> {
    scheduler: ShutoffScheduler<S, C, T, N>,
    daylight: DaylightSwitcher<S, C>,
    settings: SettingsService<R>,
    panel: P,
}

impl<S, C, T, N, P, R> EventRouter<S, C, T, N, P, R>
where
    S: StateProvider,
    C: DeviceCommands,
    T: TimerHost,
    N: Announcer,
    P: ControlPanel,
    R: SettingsRepository,
{
    /// Assemble a router from its pre-built components.
    pub fn new(
        scheduler: ShutoffScheduler<S, C, T, N>,
        daylight: DaylightSwitcher<S, C>,
        settings: SettingsService<R>,
        panel: P,
    ) -> Self {
        Self {
            scheduler,
            daylight,
            settings,
            panel,
        }
    }

    /// Boot pass: mirror the saved settings to the host panel, then bring
    /// the world in line (daylight alignment plus timer priming).
    ///
    /// # Errors
    ///
    /// Propagates errors from the reconciliation pass.
    pub async fn start(&mut self, now: Now) -> Result<(), NightwatchError> {
        self.mirror_sliders().await;
        self.reconcile(now).await
    }

    /// Handle one engine message.
    ///
    /// # Errors
    ///
    /// Propagates component errors; the run loop logs them and carries on.
    pub async fn handle(&mut self, message: EngineMessage, now: Now) -> Result<(), NightwatchError> {
        match message {
            EngineMessage::Host(event) => self.handle_host_event(event, now).await,
            EngineMessage::Timer(fire) => self.scheduler.on_timer_fire(fire).await,
        }
    }

    async fn handle_host_event(
        &mut self,
        event: HostEvent,
        now: Now,
    ) -> Result<(), NightwatchError> {
        match event {
            HostEvent::StateChanged { entity, old, new } => {
                let config = self.settings.config().clone();
                self.scheduler
                    .on_state_changed(&entity, old, new, now, &config)
                    .await
            }
            HostEvent::SliderChanged { slider, value } => {
                self.on_slider_changed(&slider, value, now).await
            }
            HostEvent::Sunrise => self.daylight.on_sunrise().await,
            HostEvent::Sunset => self.daylight.on_sunset().await,
            HostEvent::HostRestarted => {
                tracing::info!("host restarted, re-mirroring sliders");
                self.mirror_sliders().await;
                Ok(())
            }
        }
    }

    async fn on_slider_changed(
        &mut self,
        slider: &EntityId,
        value: f64,
        now: Now,
    ) -> Result<(), NightwatchError> {
        let control = match SliderControl::from_entity(slider) {
            Ok(control) => control,
            Err(err) => {
                tracing::warn!(%err, slider = %slider, value, "ignoring unrecognized slider");
                return Ok(());
            }
        };
        if self.settings.apply(SliderChange::new(control, value)).await? {
            // new boundaries or timeout take effect immediately
            self.reconcile(now).await?;
        }
        Ok(())
    }

    /// Push every slider position to the host panel. Failures are logged
    /// per slider and never abort the pass.
    async fn mirror_sliders(&self) {
        for (control, value) in self.settings.panel_values() {
            if let Err(err) = self.panel.set_slider(control, value).await {
                tracing::warn!(%err, control = %control, "failed to mirror slider to the panel");
            }
        }
    }

    /// Idempotent world alignment: daylight first, then prime shutoff
    /// timers from current entity states.
    async fn reconcile(&mut self, now: Now) -> Result<(), NightwatchError> {
        self.daylight.align_to_sun().await?;
        let config = self.settings.config().clone();
        self.scheduler.prime_from_current_state(now, &config).await
    }
}
