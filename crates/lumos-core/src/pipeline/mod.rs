//! Enhancement pipeline contract and the reference CPU implementation.
//!
//! - **validate**: request checks run before any I/O
//! - **cpu**: decode → denoise (optional) → upscale → encode

pub mod cpu;
pub mod validate;

pub use cpu::CpuPipeline;
pub use validate::validate_request;

use crate::types::{EnhancementRequest, EnhancementResult};

/// Anything that can turn a request into a result.
///
/// The controller only sees this trait, so alternative codecs or real
/// upscaling models can be swapped in behind `Arc<dyn EnhancementPipeline>`.
/// Implementations report every failure through the returned result and
/// must not panic on bad input.
pub trait EnhancementPipeline: Send + Sync {
    /// Run one request to completion. Blocking.
    fn run(&self, request: &EnhancementRequest) -> EnhancementResult;
}
