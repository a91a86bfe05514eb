//! Best-effort header peek used for pre-flight telemetry.
//!
//! Independent of the codec. Only the magic and the three header numbers are
//! read, from at most a small prefix of the file, and it never fails.

use std::fs::File;
use std::io::Read;
use std::path::Path;

const PEEK_BYTES: u64 = 4096;

/// Width and height of `path` if it starts with a plausible `P3` header.
pub fn peek_dimensions(path: &Path) -> Option<(u32, u32)> {
    let mut prefix = Vec::new();
    File::open(path)
        .ok()?
        .take(PEEK_BYTES)
        .read_to_end(&mut prefix)
        .ok()?;
    let text = String::from_utf8_lossy(&prefix);

    let mut tokens = text
        .lines()
        .flat_map(|line| line.split_whitespace().take_while(|t| !t.starts_with('#')));

    if tokens.next()? != "P3" {
        return None;
    }
    let width: u32 = tokens.next()?.parse().ok()?;
    let height: u32 = tokens.next()?.parse().ok()?;
    let max_value: u32 = tokens.next()?.parse().ok()?;
    (width > 0 && height > 0 && max_value > 0).then_some((width, height))
}
