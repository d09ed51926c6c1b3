//! Storage port — durable persistence for the shutoff settings.

use std::future::Future;

use nightwatch_domain::error::NightwatchError;
use nightwatch_domain::settings::TimeoutConfig;

/// Loads and saves the one persisted `TimeoutConfig`.
pub trait SettingsRepository {
    /// Load the saved settings, `None` when nothing has been saved yet.
    fn load(&self) -> impl Future<Output = Result<Option<TimeoutConfig>, NightwatchError>> + Send;

    /// Persist the settings, replacing any previous snapshot.
    fn save(
        &self,
        config: &TimeoutConfig,
    ) -> impl Future<Output = Result<(), NightwatchError>> + Send;
}

impl<T: SettingsRepository + Send + Sync> SettingsRepository for std::sync::Arc<T> {
    fn load(&self) -> impl Future<Output = Result<Option<TimeoutConfig>, NightwatchError>> + Send {
        (**self).load()
    }

    fn save(
        &self,
        config: &TimeoutConfig,
    ) -> impl Future<Output = Result<(), NightwatchError>> + Send {
        (**self).save(config)
    }
}
