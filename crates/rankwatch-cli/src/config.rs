//! Settings loading.
//!
//! Precedence: command-line flag > `rankwatch.toml` > built-in default.

use rankwatch_core::errors::{ExError, ExErrorKind};
use rankwatch_core::logging_facility::Profile;
use rankwatch_engine::fetcher::{DEFAULT_API_URL, DEFAULT_TIMEOUT};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "rankwatch.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("unknown log_profile '{0}' (expected development, production or test)")]
    UnknownProfile(String),
    #[error("interval_minutes must be at least 1")]
    ZeroInterval,
}

impl From<ConfigError> for ExError {
    fn from(err: ConfigError) -> Self {
        ExError::new(ExErrorKind::Config)
            .with_op("load_config")
            .with_message(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub db_path: PathBuf,
    pub api_url: String,
    pub interval_minutes: u64,
    pub timeout_secs: u64,
    pub log_profile: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(".rankwatch/rankings.db"),
            api_url: DEFAULT_API_URL.to_string(),
            interval_minutes: 60,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            log_profile: "development".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `explicit`, or from `rankwatch.toml` if it exists.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file just means built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let settings = Self::from_toml(&text, &path)?;
        settings.validate()?;
        Ok(settings)
    }

    fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_minutes == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Profile::from_name(&self.log_profile)
            .map(|_| ())
            .ok_or_else(|| ConfigError::UnknownProfile(self.log_profile.clone()))
    }

    pub fn with_db_override(mut self, db: Option<PathBuf>) -> Self {
        if let Some(db) = db {
            self.db_path = db;
        }
        self
    }

    pub fn profile(&self) -> Profile {
        Profile::from_name(&self.log_profile).unwrap_or(Profile::Development)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.db_path, PathBuf::from(".rankwatch/rankings.db"));
        assert_eq!(settings.interval_minutes, 60);
        assert_eq!(settings.timeout(), Duration::from_secs(10));
        assert_eq!(settings.profile(), Profile::Development);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings = Settings::from_toml(
            "db_path = \"/var/lib/rankwatch/rankings.db\"\ninterval_minutes = 15\n",
            Path::new("rankwatch.toml"),
        )
        .unwrap();

        assert_eq!(settings.db_path, PathBuf::from("/var/lib/rankwatch/rankings.db"));
        assert_eq!(settings.interval_minutes, 15);
        assert_eq!(settings.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = Settings::from_toml("interval = 5\n", Path::new("rankwatch.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_explicit_file_and_profile_validation() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");

        std::fs::write(&path, "log_profile = \"prod\"\ntimeout_secs = 3\n").unwrap();
        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.profile(), Profile::Production);
        assert_eq!(settings.timeout(), Duration::from_secs(3));

        std::fs::write(&path, "log_profile = \"verbose\"\n").unwrap();
        let err = Settings::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile(_)));
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::Config);
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rankwatch.toml");
        std::fs::write(&path, "interval_minutes = 0\n").unwrap();

        let err = Settings::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroInterval));

        std::fs::write(&path, "interval_minutes = 1\n").unwrap();
        assert_eq!(Settings::load(Some(&path)).unwrap().interval_minutes, 1);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/rankwatch.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_db_override() {
        let settings = Settings::default().with_db_override(Some(PathBuf::from("other.db")));
        assert_eq!(settings.db_path, PathBuf::from("other.db"));
        let settings = Settings::default().with_db_override(None);
        assert_eq!(settings.db_path, PathBuf::from(".rankwatch/rankings.db"));
    }
}
