//! `P3` decoding.
//!
//! The format is a flat stream of whitespace-separated tokens: the magic
//! `P3`, width, height, max value, then `width * height * 3` samples.
//! A token starting with `#` comments out the rest of its line. Samples
//! outside `[0, max_value]` are clamped rather than rejected.

use std::path::Path;

use super::{DecodedImage, Rgb};
use crate::error::{CodecError, CodecResult};

const MAGIC: &[u8] = b"P3";
const HEADER_TOKENS: usize = 4;

/// Read and decode the image at `path`.
pub fn read_image(path: &Path) -> CodecResult<DecodedImage> {
    let bytes = std::fs::read(path).map_err(CodecError::Read)?;
    decode(&bytes)
}

/// Decode a `P3` byte stream.
///
/// Fails without returning a partial image if the header is malformed or
/// the stream holds fewer samples than the header promises. Trailing tokens
/// past the last sample are ignored.
pub fn decode(bytes: &[u8]) -> CodecResult<DecodedImage> {
    let tokens = tokenize(bytes);

    match tokens.first() {
        None => return Err(CodecError::InvalidHeader),
        Some(magic) if *magic != MAGIC => {
            return Err(CodecError::UnsupportedMagic(
                String::from_utf8_lossy(magic).into_owned(),
            ))
        }
        Some(_) => {}
    }
    if tokens.len() < HEADER_TOKENS {
        return Err(CodecError::InvalidHeader);
    }

    let width = header_value(tokens[1], "width")?;
    let height = header_value(tokens[2], "height")?;
    let max_value = header_value(tokens[3], "max value")?;

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or(CodecError::DimensionsTooLarge { width, height })?;

    let samples = &tokens[HEADER_TOKENS..];
    if samples.len() < expected {
        return Err(CodecError::Incomplete {
            expected,
            found: samples.len(),
        });
    }

    let mut pixels: Vec<Rgb> = Vec::with_capacity(expected / 3);
    for (i, chunk) in samples[..expected].chunks_exact(3).enumerate() {
        let mut pixel = [0u32; 3];
        for (c, token) in chunk.iter().enumerate() {
            let value = parse_int(token).ok_or_else(|| CodecError::InvalidSample {
                index: i * 3 + c,
                token: String::from_utf8_lossy(token).into_owned(),
            })?;
            pixel[c] = value.clamp(0, i64::from(max_value)) as u32;
        }
        pixels.push(pixel);
    }

    tracing::trace!("Decoded {}x{} (max {})", width, height, max_value);
    Ok(DecodedImage::from_raw_parts(width, height, max_value, pixels))
}

/// Split into tokens, dropping everything from a `#` token to end of line.
fn tokenize(bytes: &[u8]) -> Vec<&[u8]> {
    bytes
        .split(|b| *b == b'\n')
        .flat_map(|line| {
            line.split(|b| b.is_ascii_whitespace())
                .filter(|t| !t.is_empty())
                .take_while(|t| t[0] != b'#')
        })
        .collect()
}

fn parse_int(token: &[u8]) -> Option<i64> {
    std::str::from_utf8(token).ok()?.parse().ok()
}

fn header_value(token: &[u8], field: &'static str) -> CodecResult<u32> {
    let value = parse_int(token).ok_or_else(|| CodecError::InvalidHeaderValue {
        field,
        token: String::from_utf8_lossy(token).into_owned(),
    })?;
    if value <= 0 {
        return Err(CodecError::NonPositive { field, value });
    }
    u32::try_from(value).map_err(|_| CodecError::OutOfRange { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_minimal() {
        let image = decode(b"P3\n1 1\n255\n10 20 30\n").unwrap();
        assert_eq!(image.dimensions(), (1, 1));
        assert_eq!(image.max_value(), 255);
        assert_eq!(image.pixel(0, 0), [10, 20, 30]);
    }

    #[test]
    fn test_decode_ignores_layout_and_comments() {
        let text = b"# leading comment\nP3 # magic\n2 # width\n1\n# max follows\n7 1 2 3 4 5 6";
        let image = decode(text).unwrap();
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.pixels(), &[[1, 2, 3], [4, 5, 6]]);
    }

    #[test]
    fn test_decode_handles_crlf() {
        let image = decode(b"P3\r\n1 1\r\n255\r\n1 2 3\r\n").unwrap();
        assert_eq!(image.pixel(0, 0), [1, 2, 3]);
    }

    #[test]
    fn test_decode_clamps_out_of_range_samples() {
        let image = decode(b"P3 1 1 100 -5 250 100").unwrap();
        assert_eq!(image.pixel(0, 0), [0, 100, 100]);
    }

    #[test]
    fn test_decode_rejects_wrong_magic() {
        let err = decode(b"P6 1 1 255 0 0 0").unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedMagic(ref m) if m == "P6"));
    }

    #[test]
    fn test_decode_rejects_empty_and_short_header() {
        assert!(matches!(decode(b"").unwrap_err(), CodecError::InvalidHeader));
        assert!(matches!(decode(b"P3 2 2").unwrap_err(), CodecError::InvalidHeader));
    }

    #[test]
    fn test_decode_rejects_non_positive_header() {
        for text in ["P3 0 1 255", "P3 1 -1 255", "P3 1 1 0"] {
            let err = decode(text.as_bytes()).unwrap_err();
            assert!(matches!(err, CodecError::NonPositive { .. }), "{err}");
        }
    }

    #[test]
    fn test_decode_rejects_non_integer_header() {
        let err = decode(b"P3 two 1 255 0 0 0").unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidHeaderValue { field: "width", .. }
        ));
    }

    #[test]
    fn test_decode_rejects_incomplete_data() {
        let err = decode(b"P3 2 1 255 1 2 3 4 5").unwrap_err();
        assert!(matches!(
            err,
            CodecError::Incomplete {
                expected: 6,
                found: 5
            }
        ));
    }

    #[test]
    fn test_decode_rejects_bad_sample() {
        let err = decode(b"P3 1 1 255 1 x 3").unwrap_err();
        assert!(matches!(err, CodecError::InvalidSample { index: 1, .. }));
    }

    #[test]
    fn test_decode_ignores_trailing_tokens() {
        let image = decode(b"P3 1 1 255 1 2 3 junk").unwrap();
        assert_eq!(image.pixels().len(), 1);
    }

    #[test]
    fn test_read_image_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_image(&dir.path().join("missing.ppm")).unwrap_err();
        assert!(matches!(err, CodecError::Read(_)));
        assert!(err.to_string().starts_with("failed to open file"));
    }
}
