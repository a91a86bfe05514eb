//! Orchestration: wraps a pipeline run with telemetry.
//!
//! Event order for one run:
//!
//! ```text
//! image_imported (only if the header peek found dimensions)
//! enhance_clicked
//! enhance_completed | enhance_failed
//! ```

mod handle;
mod inspect;

pub use handle::{EnhancementHandle, WaitStatus};
pub use inspect::peek_dimensions;

use std::path::Path;
use std::sync::Arc;

use crate::pipeline::EnhancementPipeline;
use crate::telemetry::{fields, Telemetry};
use crate::types::{EnhancementRequest, EnhancementResult};

/// Telemetry-wrapping front door to a pipeline.
///
/// Cheap to clone; clones share the pipeline and the emitter.
#[derive(Clone)]
pub struct EnhancementController {
    pipeline: Arc<dyn EnhancementPipeline>,
    telemetry: Arc<Telemetry>,
}

impl EnhancementController {
    pub fn new(pipeline: Arc<dyn EnhancementPipeline>, telemetry: Arc<Telemetry>) -> Self {
        Self {
            pipeline,
            telemetry,
        }
    }

    /// The emitter this controller records to.
    pub fn telemetry(&self) -> &Arc<Telemetry> {
        &self.telemetry
    }

    /// Record that the user picked an input file.
    pub fn track_input_selected(&self, input_path: &Path) {
        self.telemetry.emit(
            "input_selected",
            fields([
                ("input_path", display(input_path)),
                ("input_ext", extension(input_path)),
            ]),
        );
    }

    /// Run `request` synchronously, emitting telemetry around it.
    ///
    /// Returns the pipeline's result unchanged.
    pub fn run(&self, request: &EnhancementRequest) -> EnhancementResult {
        if let Some((width, height)) = peek_dimensions(&request.input_path) {
            self.telemetry.emit(
                "image_imported",
                fields([
                    ("input_path", display(&request.input_path)),
                    ("input_ext", extension(&request.input_path)),
                    ("input_width", width.to_string()),
                    ("input_height", height.to_string()),
                ]),
            );
        }

        self.telemetry.emit(
            "enhance_clicked",
            fields([
                ("input_path", display(&request.input_path)),
                ("output_path", display(&request.output_path)),
                ("scale_factor", request.scale_factor.to_string()),
                ("denoise_enabled", request.denoise.to_string()),
                ("preset_name", request.preset_name.clone()),
            ]),
        );

        let result = self.pipeline.run(request);

        if result.ok {
            self.telemetry.emit(
                "enhance_completed",
                fields([
                    ("output_path", display(&result.output_path)),
                    ("duration_ms", result.metrics.duration_ms.to_string()),
                    ("output_width", result.metrics.output_width.to_string()),
                    ("output_height", result.metrics.output_height.to_string()),
                ]),
            );
        } else {
            tracing::warn!(
                "Enhancement of {:?} failed at {}: {}",
                request.input_path,
                result.error.stage,
                result.error.message
            );
            self.telemetry.emit(
                "enhance_failed",
                fields([
                    ("stage", result.error.stage.to_string()),
                    ("error_code", result.error.kind.to_string()),
                    ("message", result.error.message.clone()),
                ]),
            );
        }

        result
    }

    /// Start [`run`](Self::run) on the blocking thread pool and return at once.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn run_async(&self, request: EnhancementRequest) -> EnhancementHandle {
        let controller = self.clone();
        let join = tokio::task::spawn_blocking(move || controller.run(&request));
        EnhancementHandle::new(join)
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

/// Extension with its leading dot, or empty.
fn extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}
