//! Tokio-backed timer host.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::ports::{TimerFire, TimerHost};
use crate::runtime::EngineMessage;

/// Timer host that sleeps on the tokio runtime and delivers fires into the
/// engine inbox.
pub struct TokioTimers {
    sender: mpsc::UnboundedSender<EngineMessage>,
}

impl TokioTimers {
    /// Create a timer host feeding the given engine inbox.
    #[must_use]
    pub fn new(sender: mpsc::UnboundedSender<EngineMessage>) -> Self {
        Self { sender }
    }
}

impl TimerHost for TokioTimers {
    type Handle = JoinHandle<()>;

    fn run_in(&self, delay: Duration, fire: TimerFire) -> Self::Handle {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // delivery fails only when the engine has already shut down
            let _ = sender.send(EngineMessage::Timer(fire));
        })
    }

    fn cancel(&self, handle: Self::Handle) {
        handle.abort();
    }
}
