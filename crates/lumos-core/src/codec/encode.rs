//! `P3` encoding.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::DecodedImage;
use crate::error::{CodecError, CodecResult};

/// Serialize `image` as `P3` text: magic, dimensions and max value on their
/// own lines, then one line per pixel in row-major order.
pub fn encode<W: Write>(image: &DecodedImage, mut writer: W) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width(), image.height())?;
    writeln!(writer, "{}", image.max_value())?;
    for [r, g, b] in image.pixels() {
        writeln!(writer, "{r} {g} {b}")?;
    }
    writer.flush()
}

/// Write `image` to `path`, creating the parent directory if needed.
///
/// Not atomic: a failure part way leaves whatever was flushed so far.
pub fn write_image(image: &DecodedImage, path: &Path) -> CodecResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| CodecError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(path).map_err(|source| CodecError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    encode(image, BufWriter::new(file)).map_err(CodecError::Write)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, read_image};

    #[test]
    fn test_encode_layout() {
        let image = DecodedImage::new(2, 1, 255, vec![[1, 2, 3], [4, 5, 6]]).unwrap();
        let mut buffer = Vec::new();
        encode(&image, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "P3\n2 1\n255\n1 2 3\n4 5 6\n");
    }

    #[test]
    fn test_encode_then_decode_preserves_image() {
        let source = b"P3\n# comment\n3 2\n1023\n0 1 2 3 4 5 6 7 8\n1023 0 512 9 9 9 100 200 300\n";
        let image = decode(source).unwrap();

        let mut buffer = Vec::new();
        encode(&image, &mut buffer).unwrap();
        assert_eq!(decode(&buffer).unwrap(), image);
    }

    #[test]
    fn test_write_image_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.ppm");
        let image = DecodedImage::filled(2, 2, 255, [7, 8, 9]).unwrap();

        write_image(&image, &path).unwrap();
        assert_eq!(read_image(&path).unwrap(), image);
    }

    #[test]
    fn test_write_image_to_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let image = DecodedImage::filled(1, 1, 255, [0, 0, 0]).unwrap();
        let err = write_image(&image, dir.path()).unwrap_err();
        assert!(matches!(err, CodecError::Open { .. }));
    }
}
