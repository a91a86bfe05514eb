//! Integer nearest-neighbor upscale.

use crate::codec::{DecodedImage, Rgb};
use crate::error::TransformError;

/// Upscale by an integer factor: output pixel `(x, y)` copies input pixel
/// `(x / scale, y / scale)`. The max value is carried over unchanged.
///
/// `scale` must be positive; the pipeline only passes validated factors.
pub fn upscale_nearest(input: &DecodedImage, scale: u32) -> Result<DecodedImage, TransformError> {
    debug_assert!(scale > 0);
    let (width, height) = input.dimensions();
    let overflow = TransformError::DimensionOverflow {
        width,
        height,
        scale,
    };
    let out_width = width.checked_mul(scale).ok_or_else(|| overflow.clone())?;
    let out_height = height.checked_mul(scale).ok_or_else(|| overflow.clone())?;
    let count = (out_width as usize)
        .checked_mul(out_height as usize)
        .ok_or(overflow)?;

    let step = scale as usize;
    let source = input.pixels();
    let mut pixels: Vec<Rgb> = Vec::with_capacity(count);
    for y in 0..out_height as usize {
        let row = &source[(y / step) * width as usize..][..width as usize];
        for x in 0..out_width as usize {
            pixels.push(row[x / step]);
        }
    }

    Ok(DecodedImage::from_raw_parts(
        out_width,
        out_height,
        input.max_value(),
        pixels,
    ))
}
