//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `nightwatch.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use nightwatch_domain::entity::{Category, CategoryFilter};
use nightwatch_domain::id::EntityId;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Watchlist settings.
    pub watch: WatchConfig,
    /// Snapshot storage settings.
    pub storage: StorageConfig,
    /// Follow-sun settings.
    pub sun: SunConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Which entities fall under the shutoff policy.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Root group expanded into the watchlist.
    pub root: String,
    /// Category names to keep (`light`, `switch`, `cover`). Empty keeps all.
    pub categories: Vec<String>,
}

/// Settings snapshot location.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the snapshot file.
    pub path: String,
}

/// Entities driven directly off the sun.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    /// Turned on at sunset, off at sunrise.
    pub follow: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `nightwatch.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// merged configuration fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("nightwatch.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("NIGHTWATCH_ROOT") {
            self.watch.root = val;
        }
        if let Ok(val) = std::env::var("NIGHTWATCH_STORAGE") {
            self.storage.path = val;
        }
        if let Ok(val) = std::env::var("NIGHTWATCH_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.watch_root()?;
        self.follow_sun()?;
        Ok(())
    }

    /// The watch root as a validated entity id.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `watch.root` is not a qualified
    /// entity name.
    pub fn watch_root(&self) -> Result<EntityId, ConfigError> {
        EntityId::new(self.watch.root.clone())
            .map_err(|err| ConfigError::Validation(format!("watch.root: {err}")))
    }

    /// The follow-sun list as validated entity ids.
    ///
    /// # Errors
    ///
    /// Returns a validation error when an entry is not a qualified entity
    /// name.
    pub fn follow_sun(&self) -> Result<Vec<EntityId>, ConfigError> {
        self.sun
            .follow
            .iter()
            .map(|raw| {
                EntityId::new(raw.clone())
                    .map_err(|err| ConfigError::Validation(format!("sun.follow: {err}")))
            })
            .collect()
    }

    /// The category filter built from `watch.categories`.
    #[must_use]
    pub fn category_filter(&self) -> CategoryFilter {
        if self.watch.categories.is_empty() {
            CategoryFilter::All
        } else {
            CategoryFilter::only(
                self.watch
                    .categories
                    .iter()
                    .map(|name| Category::from_domain(name)),
            )
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            root: "group.timeout_lights".to_string(),
            categories: Vec::new(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "nightwatch.cfg".to_string(),
        }
    }
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            follow: vec!["switch.carriage_lights".to_string()],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "nightwatchd=info,nightwatch=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.watch.root, "group.timeout_lights");
        assert!(config.watch.categories.is_empty());
        assert_eq!(config.storage.path, "nightwatch.cfg");
        assert_eq!(config.sun.follow, vec!["switch.carriage_lights"]);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.watch.root, "group.timeout_lights");
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [watch]
            root = 'group.downstairs'
            categories = ['light', 'cover']

            [storage]
            path = '/var/lib/nightwatch/times.cfg'

            [sun]
            follow = ['switch.carriage_lights', 'light.driveway']

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.watch.root, "group.downstairs");
        assert_eq!(config.watch.categories, vec!["light", "cover"]);
        assert_eq!(config.storage.path, "/var/lib/nightwatch/times.cfg");
        assert_eq!(config.sun.follow.len(), 2);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [storage]
            path = 'times.cfg'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.storage.path, "times.cfg");
        assert_eq!(config.watch.root, "group.timeout_lights");
        assert_eq!(config.sun.follow, vec!["switch.carriage_lights"]);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.watch.root, "group.timeout_lights");
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_accept_the_default_configuration() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_reject_a_malformed_watch_root() {
        let mut config = Config::default();
        config.watch.root = "no-dot-here".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn should_reject_a_malformed_follow_entry() {
        let mut config = Config::default();
        config.sun.follow.push("porch".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn should_expose_the_watch_root_as_an_entity_id() {
        let config = Config::default();
        let root = config.watch_root().unwrap();
        assert_eq!(root.as_str(), "group.timeout_lights");
    }

    #[test]
    fn should_keep_every_category_when_none_are_listed() {
        let config = Config::default();
        let filter = config.category_filter();
        assert!(filter.accepts(&Category::Light));
        assert!(filter.accepts(&Category::Cover));
    }

    #[test]
    fn should_narrow_the_filter_to_listed_categories() {
        let mut config = Config::default();
        config.watch.categories = vec!["light".to_string()];
        let filter = config.category_filter();
        assert!(filter.accepts(&Category::Light));
        assert!(!filter.accepts(&Category::Switch));
    }
}
