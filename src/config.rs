//! Configuration management for daylog

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logging::{
    Console, RegistrySettings, DEFAULT_DIAGNOSTICS_FILTER, DEFAULT_RETENTION_DAYS,
};

/// Console stream selectable from the config file
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleTarget {
    #[default]
    Stderr,
    Stdout,
}

impl From<ConsoleTarget> for Console {
    fn from(target: ConsoleTarget) -> Self {
        match target {
            ConsoleTarget::Stderr => Console::Stderr,
            ConsoleTarget::Stdout => Console::Stdout,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for the dated log files
    #[serde(default = "logs_dir")]
    pub log_dir: PathBuf,

    /// Extension of the dated log files (default: "txt")
    #[serde(default = "default_file_extension")]
    pub file_extension: String,

    /// Console stream: "stderr" (default) or "stdout"
    #[serde(default)]
    pub console: ConsoleTarget,

    /// Dated files older than this many days are deleted at start-up (0 keeps everything)
    #[serde(default = "default_file_retention_days")]
    pub file_retention_days: u64,

    /// `tracing` filter for daylog's own diagnostics when RUST_LOG is unset
    #[serde(default = "default_diagnostics_filter")]
    pub diagnostics_filter: String,
}

fn default_file_extension() -> String {
    "txt".to_string()
}

fn default_file_retention_days() -> u64 {
    DEFAULT_RETENTION_DAYS
}

fn default_diagnostics_filter() -> String {
    DEFAULT_DIAGNOSTICS_FILTER.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: logs_dir(),
            file_extension: default_file_extension(),
            console: ConsoleTarget::default(),
            file_retention_days: default_file_retention_days(),
            diagnostics_filter: default_diagnostics_filter(),
        }
    }
}

impl Config {
    /// Load configuration from the default file, or return defaults if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `path`, or return defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Settings for a `LoggerRegistry` built from this configuration
    pub fn registry_settings(&self) -> RegistrySettings {
        RegistrySettings {
            log_dir: self.log_dir.clone(),
            file_extension: self.file_extension.clone(),
            console: self.console.into(),
        }
    }

    /// Ensure the log directory exists
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.log_dir).context("Failed to create logs directory")?;
        Ok(())
    }
}

/// Get the base configuration directory (~/.daylog)
/// Falls back to ./.daylog if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for config");
        PathBuf::from(".daylog")
    })
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".daylog"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Get the default logs directory
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.file_extension, "txt");
        assert_eq!(config.console, ConsoleTarget::Stderr);
        assert_eq!(config.file_retention_days, 7);
        assert_eq!(config.diagnostics_filter, "daylog=warn");
        assert!(config.log_dir.ends_with("logs"));
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.console = ConsoleTarget::Stdout;
        config.file_retention_days = 30;

        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.console, ConsoleTarget::Stdout);
        assert_eq!(parsed.file_retention_days, 30);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = toml::from_str("console = \"stdout\"\nlog_dir = \"/var/log/app\"").unwrap();
        assert_eq!(parsed.console, ConsoleTarget::Stdout);
        assert_eq!(parsed.log_dir, PathBuf::from("/var/log/app"));
        assert_eq!(parsed.file_extension, "txt");
        assert_eq!(parsed.file_retention_days, 7);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config.file_extension, "txt");
    }

    #[test]
    fn test_load_written_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.log_dir = temp_dir.path().join("logs");
        config.file_extension = "log".to_string();
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.log_dir, temp_dir.path().join("logs"));
        assert_eq!(loaded.file_extension, "log");
    }

    #[test]
    fn test_console_cannot_be_disabled_from_config() {
        assert!(toml::from_str::<Config>("console = \"none\"").is_err());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "console = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_registry_settings() {
        let mut config = Config::default();
        config.console = ConsoleTarget::Stdout;
        let settings = config.registry_settings();
        assert!(matches!(settings.console, Console::Stdout));
        assert_eq!(settings.file_extension, "txt");
    }

    #[test]
    fn test_config_dir_does_not_panic() {
        let dir = config_dir();
        assert!(dir.ends_with(".daylog"));
    }
}
