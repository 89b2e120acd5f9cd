//! Authentication module
//!
//! Loads the four Twitter secrets from a JSON credentials file and turns
//! them into an OAuth 1.0a request signer (see [`oauth`]).

pub mod oauth;

pub use oauth::OAuthSigner;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Twitter API credentials, read from a JSON file such as:
///
/// ```json
/// {
///   "consumerKey": "...",
///   "consumerSecret": "...",
///   "accessToken": "...",
///   "accessSecret": "..."
/// }
/// ```
///
/// All four secrets are non-empty; they cannot change once loaded.
#[derive(Clone)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    access_token: String,
    access_secret: String,
}

/// Credentials file as written on disk, before validation
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsFile {
    #[serde(default)]
    consumer_key: String,
    #[serde(default)]
    consumer_secret: String,
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    access_secret: String,
}

impl Credentials {
    /// Build credentials from the four secrets, rejecting empty ones
    pub fn new(
        consumer_key: &str,
        consumer_secret: &str,
        access_token: &str,
        access_secret: &str,
    ) -> Result<Self> {
        let credentials = Self {
            consumer_key: consumer_key.to_string(),
            consumer_secret: consumer_secret.to_string(),
            access_token: access_token.to_string(),
            access_secret: access_secret.to_string(),
        };
        if let Some(field) = credentials.missing_field() {
            bail!("{field} missing in credentials");
        }
        Ok(credentials)
    }

    /// Load and validate credentials from a JSON file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("unable to open credentials file {}", path.display()))?;

        let file: CredentialsFile = serde_json::from_str(&content)
            .with_context(|| format!("unable to parse credentials file {}", path.display()))?;
        let credentials = Self {
            consumer_key: file.consumer_key,
            consumer_secret: file.consumer_secret,
            access_token: file.access_token,
            access_secret: file.access_secret,
        };

        if let Some(field) = credentials.missing_field() {
            bail!("{field} missing in credentials file {}", path.display());
        }

        Ok(credentials)
    }

    /// OAuth consumer (API) key
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// OAuth consumer (API) secret
    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    /// User access token
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// User access token secret
    pub fn access_secret(&self) -> &str {
        &self.access_secret
    }

    /// Name of the first empty secret, if any
    fn missing_field(&self) -> Option<&'static str> {
        [
            ("consumerKey", &self.consumer_key),
            ("consumerSecret", &self.consumer_secret),
            ("accessToken", &self.access_token),
            ("accessSecret", &self.access_secret),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &self.access_token)
            .field("access_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_credentials(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_credentials() {
        let (_dir, path) = write_credentials(
            r#"{"consumerKey":"ck","consumerSecret":"cs","accessToken":"at","accessSecret":"as"}"#,
        );
        let credentials = Credentials::load_from(&path).unwrap();
        assert_eq!(credentials.consumer_key(), "ck");
        assert_eq!(credentials.consumer_secret(), "cs");
        assert_eq!(credentials.access_token(), "at");
        assert_eq!(credentials.access_secret(), "as");
    }

    #[test]
    fn test_missing_field_is_named() {
        let (_dir, path) =
            write_credentials(r#"{"consumerKey":"ck","consumerSecret":"cs","accessToken":"at"}"#);
        let err = Credentials::load_from(&path).unwrap_err().to_string();
        assert!(err.starts_with("accessSecret missing in credentials file"), "{err}");
    }

    #[test]
    fn test_empty_field_is_rejected() {
        let (_dir, path) = write_credentials(
            r#"{"consumerKey":"","consumerSecret":"cs","accessToken":"at","accessSecret":"as"}"#,
        );
        let err = Credentials::load_from(&path).unwrap_err().to_string();
        assert!(err.starts_with("consumerKey missing"), "{err}");
    }

    #[test]
    fn test_invalid_json() {
        let (_dir, path) = write_credentials("not json");
        let err = Credentials::load_from(&path).unwrap_err().to_string();
        assert!(err.starts_with("unable to parse credentials file"), "{err}");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = Credentials::load_from(&dir.path().join("absent.json"))
            .unwrap_err()
            .to_string();
        assert!(err.starts_with("unable to open credentials file"), "{err}");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = Credentials::new("ck", "super-secret", "at", "also-secret").unwrap();
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("also-secret"));
        assert!(debug.contains("ck"));
    }

    #[test]
    fn test_empty_object_is_rejected() {
        let (_dir, path) = write_credentials("{}");
        let err = Credentials::load_from(&path).unwrap_err().to_string();
        assert!(err.starts_with("consumerKey missing in credentials file"), "{err}");
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(Credentials::new("ck", "cs", "", "as").is_err());
    }
}
