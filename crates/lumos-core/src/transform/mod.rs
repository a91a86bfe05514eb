//! Pixel transforms applied between decode and encode.
//!
//! - **denoise**: 3x3 box blur over interior pixels
//! - **upscale**: integer nearest-neighbor upscale
//!
//! Both are pure functions over a [`DecodedImage`](crate::codec::DecodedImage)
//! and preserve its invariants.

pub mod denoise;
pub mod upscale;

pub use denoise::box_blur;
pub use upscale::upscale_nearest;
