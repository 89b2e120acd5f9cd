//! Media upload session

use std::path::Path;

use crate::error::PublishError;
use crate::media;

/// An image read into memory for one `post` call
#[derive(Debug, Clone)]
pub struct MediaUpload {
    bytes: Vec<u8>,
    media_type: &'static str,
    file_name: String,
}

impl MediaUpload {
    /// Read an image file and resolve its MIME type.
    ///
    /// Fails before any network activity when the file is unreadable or
    /// its extension is not a known image type.
    pub fn open(path: &Path) -> Result<Self, PublishError> {
        let bytes = std::fs::read(path).map_err(|source| PublishError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let media_type =
            media::media_type(path).ok_or_else(|| PublishError::UnsupportedMediaType {
                path: path.to_path_buf(),
            })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            bytes,
            media_type,
            file_name,
        })
    }

    /// MIME type, e.g. `image/jpeg`
    pub const fn media_type(&self) -> &'static str {
        self.media_type
    }

    /// Base name of the image file
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Total size in bytes
    pub fn total_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Chunks to send, paired with their segment index
    pub fn segments(&self, chunk_size: usize) -> impl Iterator<Item = (usize, &[u8])> {
        media::chunk_ranges(self.bytes.len(), chunk_size)
            .map(|range| &self.bytes[range])
            .enumerate()
    }
}
