//! Announcer port — spoken notifications to the household.

use std::future::Future;

use nightwatch_domain::error::NightwatchError;
use nightwatch_domain::event::Notification;

/// Delivers spoken announcements. Fire-and-forget from the engine's side.
pub trait Announcer {
    /// Announce a notification.
    fn announce(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), NightwatchError>> + Send;
}

impl<T: Announcer + Send + Sync> Announcer for std::sync::Arc<T> {
    fn announce(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), NightwatchError>> + Send {
        (**self).announce(notification)
    }
}
