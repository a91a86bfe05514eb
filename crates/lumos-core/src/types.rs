//! Request and result types exchanged with pipeline callers.
//!
//! These are the only values the front-end and entry point consume.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::EnhancementError;

/// Scale factors a request may ask for.
pub const SUPPORTED_SCALE_FACTORS: [u32; 3] = [2, 4, 8];

/// A single enhancement job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancementRequest {
    /// Image to read
    pub input_path: PathBuf,

    /// Where the enhanced image is written
    pub output_path: PathBuf,

    /// Integer upscale factor, one of [`SUPPORTED_SCALE_FACTORS`]
    pub scale_factor: u32,

    /// Apply the smoothing filter before upscaling
    pub denoise: bool,

    /// Preset name; carried through to telemetry, no behavior attached yet
    pub preset_name: String,
}

impl Default for EnhancementRequest {
    fn default() -> Self {
        Self {
            input_path: PathBuf::new(),
            output_path: PathBuf::new(),
            scale_factor: 2,
            denoise: false,
            preset_name: "default".to_string(),
        }
    }
}

impl EnhancementRequest {
    /// Create a request with default scale, denoise and preset.
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    pub fn with_scale_factor(mut self, scale_factor: u32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_denoise(mut self, denoise: bool) -> Self {
        self.denoise = denoise;
        self
    }

    pub fn with_preset(mut self, preset_name: impl Into<String>) -> Self {
        self.preset_name = preset_name.into();
        self
    }
}

/// Dimensions and timing of a successful run. All zero on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnhancementMetrics {
    pub input_width: u32,
    pub input_height: u32,
    pub output_width: u32,
    pub output_height: u32,
    /// Wall time from pipeline entry to encode completion
    pub duration_ms: u64,
}

/// Outcome of one pipeline run.
///
/// `ok` gates which half is meaningful: `output_path` and `metrics` on
/// success, `error` on failure. The other half holds its zero value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EnhancementResult {
    pub ok: bool,
    pub output_path: PathBuf,
    pub metrics: EnhancementMetrics,
    pub error: EnhancementError,
}

impl EnhancementResult {
    /// Successful run that wrote `output_path`.
    pub fn success(output_path: impl Into<PathBuf>, metrics: EnhancementMetrics) -> Self {
        Self {
            ok: true,
            output_path: output_path.into(),
            metrics,
            error: EnhancementError::default(),
        }
    }

    /// Failed run.
    pub fn failure(error: EnhancementError) -> Self {
        Self {
            ok: false,
            output_path: PathBuf::new(),
            metrics: EnhancementMetrics::default(),
            error,
        }
    }

    /// The error, if the run failed.
    pub fn error(&self) -> Option<&EnhancementError> {
        if self.ok {
            None
        } else {
            Some(&self.error)
        }
    }

    /// Metrics, if the run succeeded.
    pub fn metrics(&self) -> Option<&EnhancementMetrics> {
        if self.ok {
            Some(&self.metrics)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, Stage};

    #[test]
    fn test_request_defaults() {
        let request = EnhancementRequest::new("in.ppm", "out.ppm");
        assert_eq!(request.scale_factor, 2);
        assert!(!request.denoise);
        assert_eq!(request.preset_name, "default");
    }

    #[test]
    fn test_request_builder() {
        let request = EnhancementRequest::new("in.ppm", "out.ppm")
            .with_scale_factor(8)
            .with_denoise(true)
            .with_preset("portrait");
        assert_eq!(request.scale_factor, 8);
        assert!(request.denoise);
        assert_eq!(request.preset_name, "portrait");
    }

    #[test]
    fn test_failure_zeroes_metrics() {
        let result = EnhancementResult::failure(EnhancementError::encode("disk full"));
        assert!(!result.ok);
        assert_eq!(result.metrics, EnhancementMetrics::default());
        assert!(result.metrics().is_none());
        assert_eq!(result.error().map(|e| e.stage), Some(Stage::Encode));
    }

    #[test]
    fn test_success_carries_sentinel_error() {
        let metrics = EnhancementMetrics {
            input_width: 2,
            input_height: 2,
            output_width: 4,
            output_height: 4,
            duration_ms: 0,
        };
        let result = EnhancementResult::success("out.ppm", metrics);
        assert!(result.error().is_none());
        assert_eq!(result.error.kind, ErrorKind::None);
        assert_eq!(result.error.stage, Stage::None);
        assert_eq!(result.metrics().map(|m| m.output_width), Some(4));
    }

    #[test]
    fn test_result_json_shape() {
        let result = EnhancementResult::failure(EnhancementError::decode("ppm data is incomplete"));
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"ok\":false"));
        assert!(json.contains("\"kind\":\"decode_failed\""));
        assert!(json.contains("\"duration_ms\":0"));
    }
}
