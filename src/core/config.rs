/*
 * Manages user-adjustable settings, which is currently only the log level. The
 * main window's title and size are fixed and not part of the settings.
 * Settings are stored as JSON (`settings.json`) in the application's local
 * configuration directory. A missing file means "use the defaults".
 *
 * It uses a trait-based approach (`ConfigManagerOperations`) so callers can be
 * tested against other storage. The concrete implementation
 * (`CoreConfigManager`) resolves the directory through `path_utils`, or uses an
 * explicit directory when constructed with one.
 */
use crate::core::path_utils;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

const SETTINGS_FILENAME: &str = "settings.json";

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Serde(serde_json::Error),
    NoConfigDirectory,
    InvalidValue(String),
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serde(err)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Configuration I/O error: {e}"),
            ConfigError::Serde(e) => write!(f, "Configuration format error: {e}"),
            ConfigError::NoConfigDirectory => {
                write!(f, "Could not determine the configuration directory")
            }
            ConfigError::InvalidValue(s) => write!(f, "Invalid configuration value: {s}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Serde(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppSettings {
    pub fn validate(&self) -> Result<()> {
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(ConfigError::InvalidValue(format!(
                "unknown log level '{}'",
                self.log_level
            )));
        }
        Ok(())
    }

    /// The configured log level; `Info` if it does not parse.
    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

pub trait ConfigManagerOperations: Send + Sync {
    /// Loads the stored settings. `Ok(None)` means nothing has been stored yet.
    fn load_settings(&self, app_name: &str) -> Result<Option<AppSettings>>;
    fn save_settings(&self, app_name: &str, settings: &AppSettings) -> Result<()>;
}

pub struct CoreConfigManager {
    config_dir: Option<PathBuf>,
}

impl CoreConfigManager {
    pub fn new() -> Self {
        CoreConfigManager { config_dir: None }
    }

    /// A manager that reads and writes in `config_dir` instead of the per-user location.
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        CoreConfigManager {
            config_dir: Some(config_dir),
        }
    }

    fn settings_path(&self, app_name: &str) -> Result<PathBuf> {
        let config_dir = match &self.config_dir {
            Some(dir) => dir.clone(),
            None => path_utils::get_base_app_config_local_dir(app_name)
                .ok_or(ConfigError::NoConfigDirectory)?,
        };
        Ok(config_dir.join(SETTINGS_FILENAME))
    }
}

impl Default for CoreConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManagerOperations for CoreConfigManager {
    fn load_settings(&self, app_name: &str) -> Result<Option<AppSettings>> {
        let file_path = self.settings_path(app_name)?;
        if !file_path.exists() {
            log::debug!("CoreConfigManager: Settings file {file_path:?} does not exist.");
            return Ok(None);
        }

        let reader = BufReader::new(File::open(&file_path)?);
        let settings: AppSettings = serde_json::from_reader(reader)?;
        settings.validate()?;
        log::debug!("CoreConfigManager: Loaded settings from {file_path:?}: {settings:?}");
        Ok(Some(settings))
    }

    fn save_settings(&self, app_name: &str, settings: &AppSettings) -> Result<()> {
        settings.validate()?;
        let file_path = self.settings_path(app_name)?;
        let mut writer = BufWriter::new(File::create(&file_path)?);
        serde_json::to_writer_pretty(&mut writer, settings)?;
        writer.flush()?;
        log::debug!("CoreConfigManager: Saved settings to {file_path:?}.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const APP_NAME: &str = "AnyApp";

    #[test]
    fn test_load_settings_missing_file_returns_none() {
        let dir = tempdir().unwrap();
        let manager = CoreConfigManager::with_config_dir(dir.path().to_path_buf());

        match manager.load_settings(APP_NAME) {
            Ok(None) => {}
            Ok(Some(s)) => panic!("Expected None when file doesn't exist, got {s:?}"),
            Err(e) => panic!("Unexpected error when file doesn't exist: {e:?}"),
        }
    }

    #[test]
    fn test_save_then_load_settings() {
        let dir = tempdir().unwrap();
        let manager = CoreConfigManager::with_config_dir(dir.path().to_path_buf());
        let settings = AppSettings {
            log_level: "debug".to_string(),
        };

        manager.save_settings(APP_NAME, &settings).unwrap();
        let loaded = manager.load_settings(APP_NAME).unwrap();

        assert_eq!(loaded, Some(settings));
    }

    #[test]
    fn test_empty_object_fills_in_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILENAME), "{}").unwrap();
        let manager = CoreConfigManager::with_config_dir(dir.path().to_path_buf());

        let loaded = manager.load_settings(APP_NAME).unwrap().unwrap();

        assert_eq!(loaded, AppSettings::default());
        assert_eq!(loaded.log_level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILENAME),
            r#"{ "log_level": "warn", "width": 1024, "window_title": "Range" }"#,
        )
        .unwrap();
        let manager = CoreConfigManager::with_config_dir(dir.path().to_path_buf());

        let loaded = manager.load_settings(APP_NAME).unwrap().unwrap();

        assert_eq!(loaded.log_level_filter(), LevelFilter::Warn);
    }

    #[test]
    fn test_malformed_json_is_a_serde_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILENAME), "{ not json").unwrap();
        let manager = CoreConfigManager::with_config_dir(dir.path().to_path_buf());

        assert!(matches!(
            manager.load_settings(APP_NAME),
            Err(ConfigError::Serde(_))
        ));
    }

    #[test]
    fn test_unknown_log_level_in_file_is_rejected() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILENAME),
            r#"{ "log_level": "loud" }"#,
        )
        .unwrap();
        let manager = CoreConfigManager::with_config_dir(dir.path().to_path_buf());

        assert!(matches!(
            manager.load_settings(APP_NAME),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        let settings = AppSettings {
            log_level: "chatty".to_string(),
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue(_))
        ));
        assert_eq!(settings.log_level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        let settings = AppSettings {
            log_level: "TRACE".to_string(),
        };
        assert!(settings.validate().is_ok());
        assert_eq!(settings.log_level_filter(), LevelFilter::Trace);
    }

    #[test]
    fn test_default_log_level_is_info() {
        let settings = AppSettings::default();
        assert_eq!(settings.log_level, DEFAULT_LOG_LEVEL);
        assert!(settings.validate().is_ok());
    }
}
