//! Application configuration.

use crate::consts::cli_consts::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, LOG_DIR_NAME, NOTIFICATION_DISPLAY_MS,
};
use crate::view_state::Tab;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use std::{fs, path::Path};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// How long notifications stay on screen, in milliseconds.
    pub notification_display_ms: u64,
    /// Tab shown when the dashboard opens.
    pub default_tab: Tab,
    /// Where exported CSV files are written. Defaults to the current directory.
    pub export_dir: Option<PathBuf>,
    pub with_background_color: bool,
    /// Log directory. Defaults to `logs/` next to the config file.
    pub log_dir: Option<PathBuf>,
    /// JSON dataset to investigate instead of the built-in sample.
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            notification_display_ms: NOTIFICATION_DISPLAY_MS,
            default_tab: Tab::default(),
            export_dir: None,
            with_background_color: true,
            log_dir: None,
            data_file: None,
        }
    }
}

impl Config {
    pub fn notification_display(&self) -> Duration {
        Duration::from_millis(self.notification_display_ms)
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the configuration at `path`, falling back to defaults when no file exists.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Log directory, resolved against the configuration directory.
    pub fn resolved_log_dir(&self, config_dir: &Path) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| config_dir.join(LOG_DIR_NAME))
    }

    pub fn resolved_export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Directory holding the configuration file and default log directory.
pub fn get_config_dir() -> Result<PathBuf, std::io::Error> {
    let home = home::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    Ok(home.join(CONFIG_DIR_NAME))
}

pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn custom_config() -> Config {
        Config {
            notification_display_ms: 2_500,
            default_tab: Tab::Alerts,
            export_dir: Some(PathBuf::from("/tmp/exports")),
            with_background_color: false,
            log_dir: None,
            data_file: Some(PathBuf::from("investigation.json")),
        }
    }

    #[test]
    // Loading a saved configuration file should return the same configuration.
    fn test_load_recovers_saved_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = custom_config();
        config.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config, loaded_config);
    }

    #[test]
    // Saving a configuration should create directories if they don't exist.
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("config.json");

        let result = Config::default().save(&path);

        assert!(result.is_ok(), "Failed to save config");
        assert!(
            path.parent().unwrap().exists(),
            "Parent directory does not exist"
        );
    }

    #[test]
    // Saving a configuration should overwrite an existing file.
    fn test_save_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        Config::default().save(&path).unwrap();
        let config2 = custom_config();
        config2.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config2, loaded_config);
    }

    #[test]
    // Loading an invalid JSON file should return an error.
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid_config.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        let result = Config::load_from_file(&path);
        assert!(result.is_err());
    }

    #[test]
    // Missing fields take their defaults, so older files keep loading.
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "default_tab": "search" }"#).unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.default_tab, Tab::Search);
        assert_eq!(config.notification_display(), Duration::from_secs(5));
        assert!(config.with_background_color);
    }

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_log_dir_resolution() {
        let config_dir = Path::new("/home/analyst/.ipdr-dashboard");
        assert_eq!(
            Config::default().resolved_log_dir(config_dir),
            config_dir.join("logs")
        );
        let config = Config {
            log_dir: Some(PathBuf::from("/var/log/ipdr")),
            ..Config::default()
        };
        assert_eq!(config.resolved_log_dir(config_dir), PathBuf::from("/var/log/ipdr"));
    }
}
