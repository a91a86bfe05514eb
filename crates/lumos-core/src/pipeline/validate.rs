//! Request validation before processing.

use crate::error::EnhancementError;
use crate::types::{EnhancementRequest, SUPPORTED_SCALE_FACTORS};

/// Check a request before touching the filesystem.
///
/// Checks, in order:
/// - input path is not empty
/// - output path is not empty
/// - scale factor is 2, 4 or 8
pub fn validate_request(request: &EnhancementRequest) -> Result<(), EnhancementError> {
    if request.input_path.as_os_str().is_empty() {
        return Err(EnhancementError::invalid_request(
            "input_path must not be empty",
        ));
    }
    if request.output_path.as_os_str().is_empty() {
        return Err(EnhancementError::invalid_request(
            "output_path must not be empty",
        ));
    }
    if !SUPPORTED_SCALE_FACTORS.contains(&request.scale_factor) {
        return Err(EnhancementError::invalid_request(format!(
            "scale_factor must be one of: 2, 4, 8 (got {})",
            request.scale_factor
        )));
    }
    Ok(())
}
