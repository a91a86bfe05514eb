//! Smoothing filter.

use crate::codec::{DecodedImage, Rgb};

/// 3x3 box blur.
///
/// Each interior pixel becomes the truncated mean of its 3x3 neighborhood,
/// computed from the unmodified input. Border pixels are copied as-is, and
/// images narrower or shorter than 3 pixels come back unchanged.
pub fn box_blur(input: &DecodedImage) -> DecodedImage {
    let (width, height) = input.dimensions();
    let mut output = input.clone();
    if width <= 2 || height <= 2 {
        return output;
    }

    let source = input.pixels();
    let w = width as usize;
    for y in 1..height as usize - 1 {
        for x in 1..w - 1 {
            let mut sum = [0u64; 3];
            for sy in y - 1..=y + 1 {
                for sx in x - 1..=x + 1 {
                    for (acc, sample) in sum.iter_mut().zip(source[sy * w + sx]) {
                        *acc += u64::from(sample);
                    }
                }
            }
            let mean: Rgb = sum.map(|s| (s / 9) as u32);
            output.pixels_mut()[y * w + x] = mean;
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> DecodedImage {
        let pixels = (0..width * height).map(|i| [i, i * 2, 255 - i]).collect();
        DecodedImage::new(width, height, 255, pixels).unwrap()
    }

    #[test]
    fn test_uniform_image_is_unchanged() {
        for (w, h) in [(3, 3), (5, 4), (16, 9)] {
            let image = DecodedImage::filled(w, h, 255, [12, 200, 77]).unwrap();
            assert_eq!(box_blur(&image), image);
        }
    }

    #[test]
    fn test_small_images_pass_through() {
        for (w, h) in [(1, 1), (2, 2), (2, 10), (10, 2)] {
            let image = gradient(w, h);
            assert_eq!(box_blur(&image), image);
        }
    }

    #[test]
    fn test_center_of_3x3_is_floor_mean() {
        // Samples 0..9 on red: sum 36, mean 4.
        // Green: 0,2,..,16 sum 72, mean 8.
        // Blue: 255-0..255-8 sum 2259, mean 251.
        let blurred = box_blur(&gradient(3, 3));
        assert_eq!(blurred.pixel(1, 1), [4, 8, 251]);
    }

    #[test]
    fn test_truncates_toward_zero() {
        let mut pixels = vec![[0, 0, 0]; 9];
        pixels[0] = [8, 8, 8];
        let image = DecodedImage::new(3, 3, 255, pixels).unwrap();
        // 8 / 9 truncates to 0
        assert_eq!(box_blur(&image).pixel(1, 1), [0, 0, 0]);
    }

    #[test]
    fn test_border_pixels_are_copied() {
        let image = gradient(4, 4);
        let blurred = box_blur(&image);
        for x in 0..4 {
            assert_eq!(blurred.pixel(x, 0), image.pixel(x, 0));
            assert_eq!(blurred.pixel(x, 3), image.pixel(x, 3));
        }
        for y in 0..4 {
            assert_eq!(blurred.pixel(0, y), image.pixel(0, y));
            assert_eq!(blurred.pixel(3, y), image.pixel(3, y));
        }
    }

    #[test]
    fn test_reads_from_unmodified_input() {
        let image = gradient(4, 3);
        let blurred = box_blur(&image);
        // (1,1) is rewritten before (2,1) is visited; the mean must still
        // come from original red values 1,2,3,5,6,7,9,10,11 (sum 54)
        assert_eq!(blurred.pixel(2, 1)[0], 6);
    }
}
