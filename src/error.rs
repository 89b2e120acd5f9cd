//! Error types for the publish workflow

use std::path::PathBuf;
use thiserror::Error;

use crate::api::TransportError;

/// Why a single upload or post phase failed
#[derive(Error, Debug)]
pub enum Failure {
    /// No response was received
    #[error("unable to make request")]
    Transport(#[from] TransportError),

    /// The server answered with a status >= 400
    #[error("response code {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// The response body is not the expected JSON
    #[error("unable to parse json string {body}")]
    Decode {
        /// Response body
        body: String,
        /// Parser error
        source: serde_json::Error,
    },

    /// The response JSON lacks a required (non-zero) field
    #[error("unable to find {field} in api response {body}")]
    MissingField {
        /// Field name
        field: &'static str,
        /// Response body
        body: String,
    },
}

/// Error returned by [`MediaPublisher::post`](crate::MediaPublisher::post)
#[derive(Error, Debug)]
pub enum PublishError {
    /// The image file could not be read
    #[error("unable to open image file {}", path.display())]
    Io {
        /// Image path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file extension has no known image MIME type
    #[error("unable to resolve mime type for file {}", path.display())]
    UnsupportedMediaType {
        /// Image path
        path: PathBuf,
    },

    /// INIT failed
    #[error("unable to init media upload")]
    UploadInitFailed(#[source] Failure),

    /// An APPEND failed
    #[error("unable to append media segment {segment_index}")]
    UploadAppendFailed {
        /// Index of the failing chunk
        segment_index: usize,
        /// Why it failed
        #[source]
        reason: Failure,
    },

    /// FINALIZE failed
    #[error("unable to finalize media upload")]
    UploadFinalizeFailed(#[source] Failure),

    /// The status update failed
    #[error("unable to post tweet")]
    PostFailed(#[source] Failure),
}
