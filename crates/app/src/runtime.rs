//! Engine runtime — the single-consumer message loop.
//!
//! Host adapters and the timer host all feed one mpsc channel; one task
//! drains it strictly in arrival order, which is what makes the scheduler's
//! no-locking ownership model sound.

use tokio::sync::mpsc;

use nightwatch_domain::event::HostEvent;
use nightwatch_domain::time::Now;

use crate::ports::{
    Announcer, ControlPanel, DeviceCommands, SettingsRepository, StateProvider, TimerFire,
    TimerHost,
};
use crate::router::EventRouter;

/// A unit of work for the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineMessage {
    /// Something happened on the host.
    Host(HostEvent),
    /// A shutoff timer elapsed.
    Timer(TimerFire),
}

/// Create the engine's inbox channel.
///
/// The sender side goes to host adapters and the timer host; the receiver
/// side goes to [`Engine::new`].
#[must_use]
pub fn channel() -> (
    mpsc::UnboundedSender<EngineMessage>,
    mpsc::UnboundedReceiver<EngineMessage>,
) {
    mpsc::unbounded_channel()
}

/// The running engine: an [`EventRouter`] plus the inbox it drains.
pub struct Engine<S, C, T: TimerHost, N, P, R> {
    router: EventRouter<S, C, T, N, P, R>,
    inbox: mpsc::UnboundedReceiver<EngineMessage>,
}

impl<S, C, T, N, P, R> Engine<S, C, T, N, P, R>
where
    S: StateProvider,
    C: DeviceCommands,
    T: TimerHost,
    N: Announcer,
    P: ControlPanel,
    R: SettingsRepository,
{
    /// Bundle a router with its inbox.
    pub fn new(
        router: EventRouter<S, C, T, N, P, R>,
        inbox: mpsc::UnboundedReceiver<EngineMessage>,
    ) -> Self {
        Self { router, inbox }
    }

    /// Run the boot pass, then handle messages until every sender is gone.
    ///
    /// Handler errors are logged and the loop continues; no message is
    /// allowed to take the engine down.
    pub async fn run(mut self) {
        let now = Now::sample();
        if let Err(err) = self.router.start(now).await {
            tracing::warn!(%err, "startup reconciliation failed");
        }
        while let Some(message) = self.inbox.recv().await {
            let now = Now::sample();
            if let Err(err) = self.router.handle(message, now).await {
                tracing::warn!(%err, "engine message failed");
            }
        }
        tracing::info!("engine inbox closed, stopping");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use nightwatch_domain::entity::EntityState;
    use nightwatch_domain::id::EntityId;
    use nightwatch_domain::settings::TimeoutConfig;

    use super::*;
    use crate::daylight::DaylightSwitcher;
    use crate::scheduler::ShutoffScheduler;
    use crate::settings::SettingsService;
    use crate::testing::{
        FakeHome, InMemorySettings, ManualTimers, RecordingAnnouncer, RecordingCommands,
        RecordingPanel, monitored,
    };

    #[tokio::test]
    async fn should_drain_the_inbox_and_stop_when_senders_drop() {
        let home = Arc::new(FakeHome::new().with_state("light.kitchen", EntityState::On));
        let commands = Arc::new(RecordingCommands::new());
        let panel = Arc::new(RecordingPanel::new());
        let repo = Arc::new(InMemorySettings::new().with_saved(TimeoutConfig::default()));
        let scheduler = ShutoffScheduler::new(
            Arc::clone(&home),
            Arc::clone(&commands),
            Arc::new(ManualTimers::new()),
            Arc::new(RecordingAnnouncer::new()),
            vec![monitored("light.kitchen")],
        );
        let daylight = DaylightSwitcher::new(Arc::clone(&home), Arc::clone(&commands), Vec::new());
        let settings = SettingsService::load(repo).await;
        let router = EventRouter::new(scheduler, daylight, settings, Arc::clone(&panel));

        let (sender, receiver) = channel();
        let engine = Engine::new(router, receiver);
        let task = tokio::spawn(engine.run());

        sender
            .send(EngineMessage::Host(HostEvent::StateChanged {
                entity: EntityId::new("light.kitchen").unwrap(),
                old: EntityState::Off,
                new: EntityState::On,
            }))
            .unwrap();
        sender
            .send(EngineMessage::Host(HostEvent::HostRestarted))
            .unwrap();
        drop(sender);

        task.await.unwrap();

        // boot pass mirrors five sliders, restart mirrors five more
        assert_eq!(panel.writes().len(), 10);
    }
}
