//! Reference pipeline: plain-text codec plus simple CPU transforms.

use std::time::Instant;

use super::validate::validate_request;
use super::EnhancementPipeline;
use crate::codec::{self, DecodedImage};
use crate::error::EnhancementError;
use crate::transform;
use crate::types::{EnhancementMetrics, EnhancementRequest, EnhancementResult};

/// Validate → decode → denoise (if requested) → upscale → encode.
///
/// Stateless; one instance can serve any number of concurrent runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuPipeline;

impl CpuPipeline {
    pub fn new() -> Self {
        Self
    }

    fn transform(
        &self,
        image: &DecodedImage,
        request: &EnhancementRequest,
    ) -> Result<DecodedImage, EnhancementError> {
        let blurred;
        let source = if request.denoise {
            blurred = transform::box_blur(image);
            &blurred
        } else {
            image
        };
        transform::upscale_nearest(source, request.scale_factor)
            .map_err(|e| EnhancementError::process(e.to_string()))
    }

    fn run_stages(
        &self,
        request: &EnhancementRequest,
        start: Instant,
    ) -> Result<EnhancementMetrics, EnhancementError> {
        // Validate
        validate_request(request)?;
        tracing::trace!("  Validate: {:?}", start.elapsed());

        // Decode
        let decode_start = Instant::now();
        let decoded = codec::read_image(&request.input_path)
            .map_err(|e| EnhancementError::decode(e.to_string()))?;
        tracing::trace!("  Decode: {:?}", decode_start.elapsed());

        // Transform
        let process_start = Instant::now();
        let processed = self.transform(&decoded, request)?;
        tracing::trace!("  Process: {:?}", process_start.elapsed());

        // Encode
        let encode_start = Instant::now();
        codec::write_image(&processed, &request.output_path)
            .map_err(|e| EnhancementError::encode(e.to_string()))?;
        tracing::trace!("  Encode: {:?}", encode_start.elapsed());

        Ok(EnhancementMetrics {
            input_width: decoded.width(),
            input_height: decoded.height(),
            output_width: processed.width(),
            output_height: processed.height(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

impl EnhancementPipeline for CpuPipeline {
    fn run(&self, request: &EnhancementRequest) -> EnhancementResult {
        let start = Instant::now();
        tracing::debug!("Enhancing: {:?}", request.input_path);

        match self.run_stages(request, start) {
            Ok(metrics) => {
                tracing::debug!(
                    "Enhanced {:?} in {}ms ({}x{} -> {}x{})",
                    request.output_path,
                    metrics.duration_ms,
                    metrics.input_width,
                    metrics.input_height,
                    metrics.output_width,
                    metrics.output_height
                );
                EnhancementResult::success(request.output_path.clone(), metrics)
            }
            Err(error) => {
                tracing::debug!("Enhancement failed at {}: {}", error.stage, error.message);
                EnhancementResult::failure(error)
            }
        }
    }
}
