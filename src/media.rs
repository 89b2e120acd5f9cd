//! Image MIME resolution and upload chunk arithmetic

use std::ops::Range;
use std::path::Path;

/// Image types accepted for upload, keyed by lowercase extension
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("avif", "image/avif"),
    ("bmp", "image/bmp"),
    ("gif", "image/gif"),
    ("jpe", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("png", "image/png"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("webp", "image/webp"),
];

/// Resolve the MIME type of an image from the text after the last `.` of
/// its path. Returns `None` for paths without a dot or unknown extensions.
pub fn media_type(path: &Path) -> Option<&'static str> {
    let path = path.to_string_lossy();
    let (_, extension) = path.rsplit_once('.')?;
    let extension = extension.to_ascii_lowercase();

    IMAGE_TYPES
        .iter()
        .find(|(known, _)| *known == extension)
        .map(|(_, mime)| *mime)
}

/// Number of chunks needed for `total` bytes: ceil(total / chunk_size)
pub const fn chunk_count(total: usize, chunk_size: usize) -> usize {
    total.div_ceil(chunk_size)
}

/// Byte ranges of each chunk, in order. The last range is clamped to
/// `total`; zero bytes yields no ranges.
pub fn chunk_ranges(total: usize, chunk_size: usize) -> impl Iterator<Item = Range<usize>> {
    (0..chunk_count(total, chunk_size)).map(move |index| {
        let start = index * chunk_size;
        start..(start + chunk_size).min(total)
    })
}
