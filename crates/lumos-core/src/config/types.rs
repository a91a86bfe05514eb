//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Defaults applied to requests when the caller leaves a field unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    /// Upscale factor (2, 4 or 8)
    pub scale_factor: u32,

    /// Apply the smoothing filter before upscaling
    pub denoise: bool,

    /// Preset name recorded with each request
    pub preset: String,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            scale_factor: 2,
            denoise: false,
            preset: "default".to_string(),
        }
    }
}

/// Telemetry event log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Write events to the durable log. When off, events stay in memory.
    pub enabled: bool,

    /// Log file override (supports `~`). Unset means the per-user default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_path: None,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty or json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
