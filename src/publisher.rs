//! Media publisher: chunked media upload followed by a status update
//!
//! A `post` call runs four dependent phases against the signed client:
//!
//! 1. INIT announces the upload and returns a media ID
//! 2. APPEND sends the image in fixed-size chunks, one request per chunk
//! 3. FINALIZE closes the upload
//! 4. the status update creates the tweet referencing the media ID
//!
//! Phases run strictly in order and the first failure aborts the rest.
//! Anything already uploaded is left for the server to expire.

use serde::Deserialize;
use std::path::Path;

use crate::api::{ApiRequest, ApiResponse, FilePart, SignedClient};
use crate::config::TwitterConfig;
use crate::error::{Failure, PublishError};
use crate::models::{MediaUpload, Tweet};

#[derive(Debug, Deserialize)]
struct MediaInitResponse {
    media_id: Option<u64>,
    media_id_string: Option<String>,
    expires_after_secs: Option<u64>,
}

impl MediaInitResponse {
    fn into_media_id(self) -> Option<String> {
        self.media_id_string
            .filter(|id| !id.is_empty())
            .or_else(|| self.media_id.map(|id| id.to_string()))
    }
}

/// Uploads images and posts tweets through a signed client
pub struct MediaPublisher<C> {
    client: C,
    config: TwitterConfig,
}

impl<C: SignedClient> MediaPublisher<C> {
    /// Create a publisher; the client is reused for every request
    pub const fn new(client: C, config: TwitterConfig) -> Self {
        Self { client, config }
    }

    /// The underlying signed client
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// Upload the image at `image_path` and tweet it with `text`
    pub async fn post(&self, text: &str, image_path: &Path) -> Result<Tweet, PublishError> {
        let upload = MediaUpload::open(image_path)?;

        let media_id = self
            .init(&upload)
            .await
            .map_err(PublishError::UploadInitFailed)?;

        self.append(&upload, &media_id).await?;

        self.finalize(&media_id)
            .await
            .map_err(PublishError::UploadFinalizeFailed)?;

        let tweet = self
            .update_status(text, &media_id)
            .await
            .map_err(PublishError::PostFailed)?;

        tracing::info!(id = tweet.id, url = %tweet.url, "tweet posted");
        Ok(tweet)
    }

    async fn init(&self, upload: &MediaUpload) -> Result<String, Failure> {
        let total_bytes = upload.total_bytes().to_string();
        let request = ApiRequest::form(
            &self.config.upload_endpoint,
            &[
                ("command", "INIT"),
                ("media_type", upload.media_type()),
                ("total_bytes", total_bytes.as_str()),
            ],
        );
        let response = self.send(request).await?;

        let init: MediaInitResponse =
            serde_json::from_str(&response.body).map_err(|source| Failure::Decode {
                body: response.body.clone(),
                source,
            })?;

        let expires_after_secs = init.expires_after_secs;
        let media_id = init.into_media_id().ok_or_else(|| Failure::MissingField {
            field: "media_id_string",
            body: response.body.clone(),
        })?;
        tracing::debug!(%media_id, ?expires_after_secs, "media upload initialized");
        Ok(media_id)
    }

    async fn append(&self, upload: &MediaUpload, media_id: &str) -> Result<(), PublishError> {
        let chunk_size = self.config.chunk_size.get();

        for (segment_index, chunk) in upload.segments(chunk_size) {
            let start = segment_index * chunk_size;
            tracing::debug!("try to append {} - {}", start, start + chunk.len());

            let segment = segment_index.to_string();
            let request = ApiRequest::multipart(
                &self.config.upload_endpoint,
                &[
                    ("command", "APPEND"),
                    ("media_id", media_id),
                    ("segment_index", segment.as_str()),
                ],
                FilePart {
                    name: "media".to_string(),
                    file_name: upload.file_name().to_string(),
                    bytes: chunk.to_vec(),
                },
            );

            self.send(request)
                .await
                .map_err(|reason| PublishError::UploadAppendFailed {
                    segment_index,
                    reason,
                })?;
        }

        Ok(())
    }

    async fn finalize(&self, media_id: &str) -> Result<(), Failure> {
        let request = ApiRequest::form(
            &self.config.upload_endpoint,
            &[("command", "FINALIZE"), ("media_id", media_id)],
        );
        // The body is not validated; only the status code decides
        self.send(request).await?;
        Ok(())
    }

    async fn update_status(&self, text: &str, media_id: &str) -> Result<Tweet, Failure> {
        let request = ApiRequest::form(
            &self.config.status_endpoint,
            &[("status", text), ("media_ids", media_id)],
        );
        let response = self.send(request).await?;

        let json: serde_json::Value =
            serde_json::from_str(&response.body).map_err(|source| Failure::Decode {
                body: response.body.clone(),
                source,
            })?;

        // A missing, non-numeric or zero id all mean the tweet was not created
        let Some(id) = json
            .get("id")
            .and_then(serde_json::Value::as_u64)
            .filter(|id| *id != 0)
        else {
            tracing::error!(body = %response.body, "Unable to find tweet id from api response");
            return Err(Failure::MissingField {
                field: "id",
                body: response.body,
            });
        };

        Ok(Tweet::new(id, &self.config.web_url, &self.config.handle))
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Failure> {
        let response = self.client.send(request).await?;
        tracing::debug!(status = response.status, response_body = %response.body, "response body");

        if response.is_failure() {
            return Err(Failure::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }
}
