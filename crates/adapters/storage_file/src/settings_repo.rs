//! File implementation of [`SettingsRepository`].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;

use nightwatch_app::ports::SettingsRepository;
use nightwatch_domain::error::NightwatchError;
use nightwatch_domain::settings::TimeoutConfig;
use nightwatch_domain::time::TimeOfDay;

use crate::error::StorageError;

/// On-disk shape of the snapshot.
///
/// Times serialize as `HH:MM:SS` strings; the timeout is a decimal string of
/// whole seconds.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    morning: TimeOfDay,
    nighttime: TimeOfDay,
    timeout: String,
}

impl Snapshot {
    fn from_config(config: &TimeoutConfig) -> Self {
        Self {
            morning: config.morning(),
            nighttime: config.nighttime(),
            timeout: config.timeout().as_secs().to_string(),
        }
    }

    fn into_config(self) -> Result<TimeoutConfig, StorageError> {
        let seconds: u64 = self.timeout.trim().parse()?;
        let config =
            TimeoutConfig::new(self.morning, self.nighttime, Duration::from_secs(seconds))?;
        Ok(config)
    }
}

/// File-backed settings repository.
///
/// Writes go to a sibling `.tmp` file first and are renamed into place, so a
/// crash mid-save never leaves a truncated snapshot behind.
pub struct FileSettingsRepository {
    path: PathBuf,
}

impl FileSettingsRepository {
    /// Create a repository persisting to the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl SettingsRepository for FileSettingsRepository {
    async fn load(&self) -> Result<Option<TimeoutConfig>, NightwatchError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no settings snapshot found");
                return Ok(None);
            }
            Err(err) => return Err(StorageError::from(err).into()),
        };

        let snapshot: Snapshot = serde_json::from_str(&raw).map_err(StorageError::from)?;
        let config = snapshot.into_config()?;

        tracing::debug!(path = %self.path.display(), "loaded settings snapshot");
        Ok(Some(config))
    }

    async fn save(&self, config: &TimeoutConfig) -> Result<(), NightwatchError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(StorageError::from)?;
        }

        let body = serde_json::to_string_pretty(&Snapshot::from_config(config))
            .map_err(StorageError::from)?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, body)
            .await
            .map_err(StorageError::from)?;
        restrict_permissions(&temp_path).await?;
        fs::rename(&temp_path, &self.path)
            .await
            .map_err(StorageError::from)?;

        tracing::debug!(path = %self.path.display(), "saved settings snapshot");
        Ok(())
    }
}

/// The snapshot holds schedule details for the home, keep it owner-readable.
#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> Result<(), NightwatchError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .await
        .map_err(StorageError::from)?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> Result<(), NightwatchError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_config() -> TimeoutConfig {
        TimeoutConfig::default()
            .with_morning(TimeOfDay::new(4, 15, 0).unwrap())
            .with_nighttime(TimeOfDay::new(22, 30, 0).unwrap())
            .with_timeout(Duration::from_secs(600))
    }

    #[tokio::test]
    async fn should_return_none_when_no_snapshot_exists() {
        let dir = TempDir::new().unwrap();
        let repo = FileSettingsRepository::new(dir.path().join("times.json"));

        let loaded = repo.load().await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn should_roundtrip_saved_settings() {
        let dir = TempDir::new().unwrap();
        let repo = FileSettingsRepository::new(dir.path().join("times.json"));

        repo.save(&sample_config()).await.unwrap();
        let loaded = repo.load().await.unwrap().unwrap();

        assert_eq!(loaded, sample_config());
    }

    #[tokio::test]
    async fn should_write_the_flat_snapshot_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("times.json");
        let repo = FileSettingsRepository::new(&path);

        repo.save(&TimeoutConfig::default()).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["morning"], "03:50:00");
        assert_eq!(value["nighttime"], "23:00:00");
        assert_eq!(value["timeout"], "300");
    }

    #[tokio::test]
    async fn should_load_a_hand_written_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("times.json");
        std::fs::write(
            &path,
            r#"{"morning":"04:15:00","nighttime":"22:30:00","timeout":"600"}"#,
        )
        .unwrap();

        let repo = FileSettingsRepository::new(&path);
        let loaded = repo.load().await.unwrap().unwrap();

        assert_eq!(loaded, sample_config());
    }

    #[tokio::test]
    async fn should_fail_on_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("times.json");
        std::fs::write(&path, "not json at all").unwrap();

        let repo = FileSettingsRepository::new(&path);
        let result = repo.load().await;

        assert!(matches!(result, Err(NightwatchError::Storage(_))));
    }

    #[tokio::test]
    async fn should_fail_on_a_malformed_time_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("times.json");
        std::fs::write(
            &path,
            r#"{"morning":"quarter past four","nighttime":"22:30:00","timeout":"600"}"#,
        )
        .unwrap();

        let repo = FileSettingsRepository::new(&path);
        let result = repo.load().await;

        assert!(matches!(result, Err(NightwatchError::Storage(_))));
    }

    #[tokio::test]
    async fn should_fail_on_a_fractional_timeout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("times.json");
        std::fs::write(
            &path,
            r#"{"morning":"04:15:00","nighttime":"22:30:00","timeout":"300.5"}"#,
        )
        .unwrap();

        let repo = FileSettingsRepository::new(&path);
        let result = repo.load().await;

        assert!(matches!(result, Err(NightwatchError::Storage(_))));
    }

    #[tokio::test]
    async fn should_fail_on_a_zero_timeout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("times.json");
        std::fs::write(
            &path,
            r#"{"morning":"04:15:00","nighttime":"22:30:00","timeout":"0"}"#,
        )
        .unwrap();

        let repo = FileSettingsRepository::new(&path);
        let result = repo.load().await;

        assert!(matches!(result, Err(NightwatchError::Storage(_))));
    }

    #[tokio::test]
    async fn should_replace_a_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let repo = FileSettingsRepository::new(dir.path().join("times.json"));

        repo.save(&TimeoutConfig::default()).await.unwrap();
        repo.save(&sample_config()).await.unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded, sample_config());
    }

    #[tokio::test]
    async fn should_leave_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("times.json");
        let repo = FileSettingsRepository::new(&path);

        repo.save(&sample_config()).await.unwrap();

        assert!(repo.path().exists());
        assert!(!repo.temp_path().exists());
    }

    #[tokio::test]
    async fn should_create_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("times.json");
        let repo = FileSettingsRepository::new(&path);

        repo.save(&sample_config()).await.unwrap();

        assert!(path.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn should_restrict_snapshot_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("times.json");
        let repo = FileSettingsRepository::new(&path);

        repo.save(&sample_config()).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
