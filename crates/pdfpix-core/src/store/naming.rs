//! File naming contract for extracted images.
//!
//! The viewer has no way to recover extraction order other than sorting
//! file names, so the width of the counter is part of the contract: every
//! name has exactly [`COUNTER_WIDTH`] digits and byte order equals numeric
//! order.

use crate::error::StoreError;

/// Folder used when no other is configured, relative to the working directory.
pub const DEFAULT_IMAGE_DIR: &str = "images";

/// Prefix of every extracted image file.
pub const IMAGE_PREFIX: &str = "image_";

/// Extension of every extracted image file (PNG).
pub const IMAGE_EXTENSION: &str = "png";

/// Number of digits in the counter.
pub const COUNTER_WIDTH: usize = 6;

/// Largest counter that still fits in [`COUNTER_WIDTH`] digits.
pub const MAX_COUNTER: usize = 999_999;

/// Glob pattern for files the viewer shows.
///
/// Any PNG in the folder matches, so files the extractor did not write
/// (`cover.png`) are shown too, sorted in among the extracted images. Only
/// names accepted by [`parse_counter`] are purged before extraction.
pub const SCAN_PATTERN: &str = "*.png";

/// File name for the image with the given counter, e.g. `image_000042.png`.
pub fn image_file_name(counter: usize) -> Result<String, StoreError> {
    if counter > MAX_COUNTER {
        return Err(StoreError::CounterOverflow(counter));
    }
    Ok(format!(
        "{IMAGE_PREFIX}{counter:0width$}.{IMAGE_EXTENSION}",
        width = COUNTER_WIDTH
    ))
}

/// Parse the counter back out of a file name written by [`image_file_name`].
pub fn parse_counter(name: &str) -> Option<usize> {
    let digits = name
        .strip_prefix(IMAGE_PREFIX)?
        .strip_suffix(IMAGE_EXTENSION)?
        .strip_suffix('.')?;

    if digits.len() != COUNTER_WIDTH || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
