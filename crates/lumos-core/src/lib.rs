//! Lumos Core - image enhancement pipeline with a telemetry trail.
//!
//! Lumos reads a plain-text RGB image, optionally denoises it, upscales it
//! by an integer factor and writes it back out, recording a timestamped event
//! for every step of every attempt.
//!
//! # Architecture
//!
//! ```text
//! Controller ─► telemetry ─► Pipeline: Validate → Decode → Denoise? → Upscale → Encode ─► telemetry
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lumos_core::{CpuPipeline, EnhancementController, EnhancementRequest, Telemetry};
//!
//! let telemetry = Arc::new(Telemetry::with_default_path());
//! let controller = EnhancementController::new(Arc::new(CpuPipeline::new()), telemetry);
//!
//! let request = EnhancementRequest::new("photo.ppm", "photo_4x.ppm").with_scale_factor(4);
//! let result = controller.run(&request);
//! println!("ok={} {:?}", result.ok, result.metrics);
//! ```

// Module declarations
pub mod codec;
pub mod config;
pub mod controller;
pub mod error;
pub mod pipeline;
pub mod telemetry;
pub mod transform;
pub mod types;

// Re-exports for convenient access
pub use codec::DecodedImage;
pub use config::Config;
pub use controller::{EnhancementController, EnhancementHandle, WaitStatus};
pub use error::{
    CodecError, ConfigError, EnhancementError, ErrorKind, HandleError, Stage, TransformError,
};
pub use pipeline::{CpuPipeline, EnhancementPipeline};
pub use telemetry::{Telemetry, TelemetryEvent};
pub use types::{EnhancementMetrics, EnhancementRequest, EnhancementResult, SUPPORTED_SCALE_FACTORS};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
