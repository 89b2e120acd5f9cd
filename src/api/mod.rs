//! Signed API client for Twitter
//!
//! [`SignedClient`] is the seam between the upload workflow and the network:
//! the publisher builds [`ApiRequest`]s and the client signs and sends them.

pub mod twitter;

pub use twitter::OAuthClient;

use anyhow::Result;
use thiserror::Error;

use crate::auth::Credentials;
use crate::config::TwitterConfig;

/// A request for the signed client to send (always a POST)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Target endpoint
    pub url: String,
    /// Request payload
    pub body: RequestBody,
}

/// Request payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded` fields
    Form(Vec<(String, String)>),
    /// `multipart/form-data` text fields followed by one file part
    Multipart {
        /// Text fields, in order
        fields: Vec<(String, String)>,
        /// The file part
        file: FilePart,
    },
}

/// A file attached to a multipart body
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name
    pub name: String,
    /// File name reported to the server
    pub file_name: String,
    /// File content
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for FilePart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePart")
            .field("name", &self.name)
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ApiRequest {
    /// Create a form-encoded request
    pub fn form(url: &str, fields: &[(&str, &str)]) -> Self {
        Self {
            url: url.to_string(),
            body: RequestBody::Form(owned_fields(fields)),
        }
    }

    /// Create a multipart request
    pub fn multipart(url: &str, fields: &[(&str, &str)], file: FilePart) -> Self {
        Self {
            url: url.to_string(),
            body: RequestBody::Multipart {
                fields: owned_fields(fields),
                file,
            },
        }
    }

    /// Look up a text field of the body by name
    pub fn field(&self, name: &str) -> Option<&str> {
        let fields = match &self.body {
            RequestBody::Form(fields) | RequestBody::Multipart { fields, .. } => fields,
        };
        fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The attached file, for multipart requests
    pub const fn file(&self) -> Option<&FilePart> {
        match &self.body {
            RequestBody::Form(_) => None,
            RequestBody::Multipart { file, .. } => Some(file),
        }
    }
}

fn owned_fields(fields: &[(&str, &str)]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

/// Raw response: status code and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl ApiResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status signals failure (any code >= 400)
    pub const fn is_failure(&self) -> bool {
        self.status >= 400
    }
}

/// Failure to get any response at all
#[derive(Error, Debug)]
pub enum TransportError {
    /// The HTTP request could not be built or completed
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The endpoint is not a valid URL
    #[error("invalid endpoint url {url}: {reason}")]
    InvalidUrl {
        /// The rejected URL
        url: String,
        /// Parser message
        reason: String,
    },

    /// The request parameters could not be signed
    #[error("unable to sign request to {url}")]
    Signing {
        /// The endpoint being signed for
        url: String,
    },

    /// The connection failed for another reason
    #[error("connection failed: {0}")]
    Connection(String),
}

/// A client that signs every request with a fixed credential set
#[allow(async_fn_in_trait)]
pub trait SignedClient {
    /// Sign and send a request, returning the raw response
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Get the signed Twitter client for a credential set
pub fn get_client(credentials: &Credentials, config: &TwitterConfig) -> Result<OAuthClient> {
    OAuthClient::new(credentials, config)
}
