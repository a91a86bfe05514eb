//! Plain-text RGB image codec (`P3` portable pixmap).
//!
//! - **decode**: tokenize and parse a `P3` byte stream into a [`DecodedImage`]
//! - **encode**: serialize a [`DecodedImage`] back to `P3` text

pub mod decode;
pub mod encode;

pub use decode::{decode, read_image};
pub use encode::{encode, write_image};

use std::path::{Path, PathBuf};

use crate::error::{CodecError, CodecResult};

/// File extension of the supported format.
pub const PPM_EXTENSION: &str = "ppm";

/// One pixel: red, green, blue samples.
pub type Rgb = [u32; 3];

/// In-memory image: dimensions, per-channel maximum and row-major pixels.
///
/// Width, height and max value are always positive, the buffer always holds
/// `width * height` pixels and every sample lies in `[0, max_value]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    max_value: u32,
    pixels: Vec<Rgb>,
}

impl DecodedImage {
    /// Build an image from a pixel buffer.
    ///
    /// Samples above `max_value` are clamped, matching decode.
    pub fn new(width: u32, height: u32, max_value: u32, mut pixels: Vec<Rgb>) -> CodecResult<Self> {
        for (field, value) in [("width", width), ("height", height), ("max value", max_value)] {
            if value == 0 {
                return Err(CodecError::NonPositive { field, value: 0 });
            }
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or(CodecError::DimensionsTooLarge { width, height })?;
        if pixels.len() != expected {
            return Err(CodecError::BufferMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        for pixel in &mut pixels {
            for sample in pixel.iter_mut() {
                *sample = (*sample).min(max_value);
            }
        }
        Ok(Self::from_raw_parts(width, height, max_value, pixels))
    }

    /// Single-color image.
    pub fn filled(width: u32, height: u32, max_value: u32, color: Rgb) -> CodecResult<Self> {
        let count = (width as usize)
            .checked_mul(height as usize)
            .ok_or(CodecError::DimensionsTooLarge { width, height })?;
        Self::new(width, height, max_value, vec![color; count])
    }

    /// Caller guarantees the invariants; used by decode and the transforms.
    pub(crate) fn from_raw_parts(width: u32, height: u32, max_value: u32, pixels: Vec<Rgb>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            max_value,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    /// Row-major pixel buffer.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        self.pixels[self.index(x, y)]
    }

    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }
}

/// True when `path` carries the supported extension (case-insensitive).
pub fn is_supported_input(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(PPM_EXTENSION))
}

/// Default output location for `input` at `scale_factor`:
/// `<input dir>/<stem>_lumos_<scale>x.ppm`.
pub fn derive_output_path(input: &Path, scale_factor: u32) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("output");
    let file_name = format!("{stem}_lumos_{scale_factor}x.{PPM_EXTENSION}");
    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}
