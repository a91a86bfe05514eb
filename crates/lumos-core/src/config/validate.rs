//! Configuration validation with range checks.

use crate::error::ConfigError;
use crate::types::SUPPORTED_SCALE_FACTORS;

use super::Config;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_SCALE_FACTORS.contains(&self.enhance.scale_factor) {
            return Err(ConfigError::ValidationError(
                "enhance.scale_factor must be one of: 2, 4, 8".into(),
            ));
        }
        if self.enhance.preset.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "enhance.preset must not be empty".into(),
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of: {}",
                LOG_LEVELS.join(", ")
            )));
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be one of: {}",
                LOG_FORMATS.join(", ")
            )));
        }
        Ok(())
    }
}
