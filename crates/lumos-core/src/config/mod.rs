//! Configuration management for Lumos.
//!
//! Configuration is loaded from the platform config directory with defaults
//! for every missing section or key.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use crate::telemetry::Telemetry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Lumos.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for enhancement requests
    pub enhance: EnhanceConfig,

    /// Telemetry event log settings
    pub telemetry: TelemetryConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.lumos.lumos/config.toml
    /// - Linux: ~/.config/lumos/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\lumos\lumos\config\config.toml
    ///
    /// Falls back to ~/.lumos/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "lumos", "lumos")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".lumos").join("config.toml")
            })
    }

    /// Resolved telemetry log destination, or `None` when telemetry is
    /// memory-only.
    ///
    /// A configured `log_path` is `~`-expanded; otherwise the emitter's
    /// default location is used.
    pub fn telemetry_log_path(&self) -> Option<PathBuf> {
        if !self.telemetry.enabled {
            return None;
        }
        Some(match &self.telemetry.log_path {
            Some(path) => {
                let path_str = path.to_string_lossy();
                PathBuf::from(shellexpand::tilde(&path_str).into_owned())
            }
            None => Telemetry::default_log_path(),
        })
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.enhance.scale_factor, 2);
        assert!(!config.enhance.denoise);
        assert_eq!(config.enhance.preset, "default");
        assert!(config.telemetry.enabled);
        assert!(config.telemetry.log_path.is_none());
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[enhance]"));
        assert!(toml.contains("[telemetry]"));
        assert!(toml.contains("[logging]"));
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[enhance]\nscale_factor = 8\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.enhance.scale_factor, 8);
        assert_eq!(config.enhance.preset, "default");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[enhance]\nscale_factor = 3\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[enhance\n").unwrap();

        assert!(matches!(
            Config::load_from(&path).unwrap_err(),
            ConfigError::ParseError(_)
        ));
    }

    #[test]
    fn test_telemetry_log_path_resolution() {
        let mut config = Config::default();
        assert_eq!(
            config.telemetry_log_path(),
            Some(Telemetry::default_log_path())
        );

        config.telemetry.log_path = Some(PathBuf::from("/var/log/lumos/events.jsonl"));
        assert_eq!(
            config.telemetry_log_path(),
            Some(PathBuf::from("/var/log/lumos/events.jsonl"))
        );

        config.telemetry.enabled = false;
        assert!(config.telemetry_log_path().is_none());
    }
}
