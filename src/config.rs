//! Configuration module for Scallion
//!
//! Everything the CLI, the camera and the publisher need is carried in one
//! [`Config`] value that is built once at startup and passed down.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Twitter media upload endpoint
pub const MEDIA_UPLOAD_ENDPOINT: &str = "https://upload.twitter.com/1.1/media/upload.json";

/// Twitter status update endpoint
pub const STATUS_UPDATE_ENDPOINT: &str = "https://api.twitter.com/1.1/statuses/update.json";

/// Amount of image bytes sent in each APPEND request (500 KiB)
pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = NonZeroUsize::new(500 * 1024).unwrap();

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Log at debug level instead of info
    #[serde(default)]
    pub verbose: bool,

    /// Twitter endpoints and upload tuning
    #[serde(default)]
    pub twitter: TwitterConfig,

    /// Still capture settings
    #[serde(default)]
    pub camera: CameraConfig,
}

/// Settings for the media publisher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitterConfig {
    /// Chunked media upload endpoint (INIT/APPEND/FINALIZE)
    #[serde(default = "default_upload_endpoint")]
    pub upload_endpoint: String,

    /// Status update endpoint
    #[serde(default = "default_status_endpoint")]
    pub status_endpoint: String,

    /// Public web root used to build tweet URLs
    #[serde(default = "default_web_url")]
    pub web_url: String,

    /// Account handle used to build tweet URLs
    #[serde(default = "default_handle")]
    pub handle: String,

    /// Bytes per APPEND request
    #[serde(default = "default_chunk_size")]
    pub chunk_size: NonZeroUsize,

    /// Per-request timeout in seconds (0 = no timeout)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Settings for the still camera
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Capture program to run
    #[serde(default = "default_camera_command")]
    pub command: String,

    /// JPEG quality (0-100)
    #[serde(default = "default_quality")]
    pub quality: u8,

    /// Delay before the capture is taken, in milliseconds
    #[serde(default = "default_capture_timeout")]
    pub timeout_ms: u64,

    /// Where captured stills are written (system temp dir when unset)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_upload_endpoint() -> String {
    MEDIA_UPLOAD_ENDPOINT.to_string()
}

fn default_status_endpoint() -> String {
    STATUS_UPDATE_ENDPOINT.to_string()
}

fn default_web_url() -> String {
    "https://twitter.com".to_string()
}

fn default_handle() -> String {
    "scallionfriends".to_string()
}

const fn default_chunk_size() -> NonZeroUsize {
    DEFAULT_CHUNK_SIZE
}

const fn default_request_timeout() -> u64 {
    60
}

fn default_camera_command() -> String {
    "raspistill".to_string()
}

const fn default_quality() -> u8 {
    100
}

const fn default_capture_timeout() -> u64 {
    5000
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            upload_endpoint: default_upload_endpoint(),
            status_endpoint: default_status_endpoint(),
            web_url: default_web_url(),
            handle: default_handle(),
            chunk_size: default_chunk_size(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            command: default_camera_command(),
            quality: default_quality(),
            timeout_ms: default_capture_timeout(),
            output_dir: None,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        crate::paths::config_path()
    }

    /// Load config from the default path, falling back to defaults
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Log filter directive used when RUST_LOG is not set
    pub const fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert!(!config.verbose);
        assert_eq!(config.twitter, TwitterConfig::default());
        assert_eq!(config.twitter.chunk_size.get(), 524_288);
        assert_eq!(config.camera.quality, 100);
    }

    #[test]
    fn test_load_does_not_create_directory() {
        let dir = tempdir().unwrap();
        let config_dir = dir.path().join("scallion");
        let config = Config::load_from(&config_dir.join("config.toml")).unwrap();
        assert_eq!(config.twitter.handle, "scallionfriends");
        assert!(!config_dir.exists());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "verbose = true\n\n[twitter]\nhandle = \"someone\"\nchunk_size = 1024\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.verbose);
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.twitter.handle, "someone");
        assert_eq!(config.twitter.chunk_size.get(), 1024);
        assert_eq!(config.twitter.upload_endpoint, MEDIA_UPLOAD_ENDPOINT);
        assert_eq!(config.camera.command, "raspistill");
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[twitter]\nchunk_size = 0\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.camera.output_dir = Some(dir.path().to_path_buf());
        config.twitter.request_timeout_secs = 0;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.camera, config.camera);
        assert_eq!(loaded.twitter, config.twitter);
    }
}
