//! Settings service — owns the persisted shutoff settings.
//!
//! The service is the only writer of the durable snapshot: it loads once at
//! startup and persists every accepted slider edit before adopting it.

use nightwatch_domain::error::NightwatchError;
use nightwatch_domain::settings::TimeoutConfig;
use nightwatch_domain::slider::{SliderChange, SliderControl};

use crate::ports::SettingsRepository;

/// Application service around the one persisted [`TimeoutConfig`].
pub struct SettingsService<R> {
    repo: R,
    config: TimeoutConfig,
}

impl<R: SettingsRepository> SettingsService<R> {
    /// Load the saved settings, falling back to the documented defaults.
    ///
    /// A missing snapshot is normal on first boot: the defaults are adopted
    /// and persisted right away. An unreadable snapshot only logs a warning;
    /// the defaults are used in memory and the damaged file is left alone.
    pub async fn load(repo: R) -> Self {
        let config = match repo.load().await {
            Ok(Some(config)) => {
                tracing::info!(
                    morning = %config.morning(),
                    nighttime = %config.nighttime(),
                    timeout_secs = config.timeout().as_secs(),
                    "loaded saved settings"
                );
                config
            }
            Ok(None) => {
                let config = TimeoutConfig::default();
                tracing::info!("no saved settings, adopting defaults");
                if let Err(err) = repo.save(&config).await {
                    tracing::warn!(%err, "failed to persist default settings");
                }
                config
            }
            Err(err) => {
                tracing::warn!(%err, "failed to load settings, using defaults");
                TimeoutConfig::default()
            }
        };
        Self { repo, config }
    }

    /// The current settings.
    #[must_use]
    pub fn config(&self) -> &TimeoutConfig {
        &self.config
    }

    /// Apply one slider edit; returns whether it was accepted.
    ///
    /// Rejected values (out of range, zero timeout) are logged and leave
    /// both memory and storage untouched. Accepted values are persisted
    /// before the service adopts them.
    ///
    /// # Errors
    ///
    /// Returns a storage error when persisting an accepted edit fails; the
    /// previous settings stay in effect.
    #[tracing::instrument(skip(self, change), fields(control = %change.control, value = change.value))]
    pub async fn apply(&mut self, change: SliderChange) -> Result<bool, NightwatchError> {
        match change.apply_to(&self.config) {
            Ok(updated) => {
                self.repo.save(&updated).await?;
                tracing::info!(
                    morning = %updated.morning(),
                    nighttime = %updated.nighttime(),
                    timeout_secs = updated.timeout().as_secs(),
                    "settings updated"
                );
                self.config = updated;
                Ok(true)
            }
            Err(err) => {
                tracing::warn!(%err, "rejected slider edit");
                Ok(false)
            }
        }
    }

    /// The five slider positions mirroring the current settings.
    #[must_use]
    pub fn panel_values(&self) -> [(SliderControl, f64); 5] {
        SliderControl::ALL.map(|control| (control, control.value_in(&self.config)))
    }
}
