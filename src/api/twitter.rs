//! Twitter HTTP client signed with OAuth 1.0a

use anyhow::{Context, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use std::time::Duration;

use crate::auth::{Credentials, OAuthSigner};
use crate::config::TwitterConfig;

use super::{ApiRequest, ApiResponse, RequestBody, SignedClient, TransportError};

/// Twitter API client bound to one credential set
pub struct OAuthClient {
    client: Client,
    signer: OAuthSigner,
}

impl OAuthClient {
    /// Create a new client, binding the request signer once
    pub fn new(credentials: &Credentials, config: &TwitterConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            signer: OAuthSigner::new(credentials),
        })
    }

    fn authorization(
        &self,
        url: &Url,
        params: &[(String, String)],
    ) -> Result<String, TransportError> {
        self.signer
            .authorization(url, params)
            .ok_or_else(|| TransportError::Signing {
                url: url.to_string(),
            })
    }
}

impl SignedClient for OAuthClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        tracing::debug!(
            url = %request.url,
            command = ?request.field("command"),
            "sending signed request"
        );

        let url = Url::parse(&request.url).map_err(|e| TransportError::InvalidUrl {
            url: request.url.clone(),
            reason: e.to_string(),
        })?;

        let builder = match request.body {
            RequestBody::Form(fields) => {
                let authorization = self.authorization(&url, &fields)?;
                self.client
                    .post(url)
                    .header(AUTHORIZATION, authorization)
                    .form(&fields)
            }
            RequestBody::Multipart { fields, file } => {
                // Multipart fields are not part of the OAuth signature
                let authorization = self.authorization(&url, &[])?;
                let mut form = Form::new();
                for (name, value) in fields {
                    form = form.text(name, value);
                }
                let part = Part::bytes(file.bytes).file_name(file.file_name);
                form = form.part(file.name, part);
                self.client
                    .post(url)
                    .header(AUTHORIZATION, authorization)
                    .multipart(form)
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ApiResponse { status, body })
    }
}
