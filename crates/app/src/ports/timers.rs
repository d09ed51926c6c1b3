//! Timer host port — one-shot delayed fires with explicit cancellation.

use std::time::Duration;

use nightwatch_domain::id::EntityId;

/// Payload delivered back into the engine when a shutoff timer elapses.
///
/// The generation lets the scheduler recognize fires from timers it has
/// since replaced; stale generations are ignored on arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerFire {
    pub entity: EntityId,
    pub generation: u64,
}

/// Schedules one-shot timers that deliver a [`TimerFire`] after a delay.
pub trait TimerHost {
    /// Cancellation handle for a pending fire.
    type Handle;

    /// Schedule `fire` for delivery after `delay`.
    fn run_in(&self, delay: Duration, fire: TimerFire) -> Self::Handle;

    /// Cancel a pending fire. Cancelling a timer that already fired is a
    /// no-op.
    fn cancel(&self, handle: Self::Handle);
}

impl<T: TimerHost + Send + Sync> TimerHost for std::sync::Arc<T> {
    type Handle = T::Handle;

    fn run_in(&self, delay: Duration, fire: TimerFire) -> Self::Handle {
        (**self).run_in(delay, fire)
    }

    fn cancel(&self, handle: Self::Handle) {
        (**self).cancel(handle);
    }
}
