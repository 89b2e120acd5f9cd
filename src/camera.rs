//! Still image capture

use anyhow::{Context, Result, bail};
use chrono::Local;
use std::path::PathBuf;
use tokio::process::Command;

use crate::config::CameraConfig;

/// Something that can take a still photo
#[allow(async_fn_in_trait)]
pub trait Camera {
    /// Capture a still and return the path of the written JPEG.
    ///
    /// The caller owns the file afterwards.
    async fn capture(&self) -> Result<PathBuf>;
}

/// Raspberry Pi camera driven through the `raspistill` program
pub struct Raspistill {
    config: CameraConfig,
}

impl Raspistill {
    /// Create a camera with the given settings
    pub const fn new(config: CameraConfig) -> Self {
        Self { config }
    }

    fn create_output(&self) -> Result<PathBuf> {
        let prefix = Local::now().format("scallion-%Y-%m-%d-%H-%M-%S-").to_string();
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix).suffix(".jpg");

        let file = match &self.config.output_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .context("unable to create temp file")?;

        let (_, path) = file.keep().context("unable to keep temp file")?;
        Ok(path)
    }
}

impl Camera for Raspistill {
    async fn capture(&self) -> Result<PathBuf> {
        let path = self.create_output()?;
        tracing::debug!(command = %self.config.command, path = %path.display(), "capturing still");

        let output = Command::new(&self.config.command)
            .arg("--quality")
            .arg(self.config.quality.to_string())
            .arg("--timeout")
            .arg(self.config.timeout_ms.to_string())
            .arg("--nopreview")
            .arg("--output")
            .arg(&path)
            .output()
            .await;

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                let _ = std::fs::remove_file(&path);
                return Err(e).with_context(|| {
                    format!("unable to capture image: failed to run {}", self.config.command)
                });
            }
        };

        if !output.status.success() {
            let _ = std::fs::remove_file(&path);
            bail!(
                "unable to capture image: {} exited with {}: {}",
                self.config.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(path)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn camera(command: &str, dir: &std::path::Path) -> Raspistill {
        Raspistill::new(CameraConfig {
            command: command.to_string(),
            output_dir: Some(dir.to_path_buf()),
            ..CameraConfig::default()
        })
    }

    #[tokio::test]
    async fn test_capture_names_file() {
        let dir = tempdir().unwrap();
        let path = camera("true", dir.path()).capture().await.unwrap();

        assert!(path.exists());
        assert_eq!(path.parent(), Some(dir.path()));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("scallion-"), "{name}");
        assert!(name.ends_with(".jpg"), "{name}");
    }

    #[tokio::test]
    async fn test_failed_capture_removes_file() {
        let dir = tempdir().unwrap();
        let err = camera("false", dir.path()).capture().await.unwrap_err();

        assert!(err.to_string().starts_with("unable to capture image"), "{err}");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_missing_program() {
        let dir = tempdir().unwrap();
        let err = camera("scallion-no-such-camera", dir.path())
            .capture()
            .await
            .unwrap_err();

        assert!(format!("{err:#}").contains("scallion-no-such-camera"), "{err:#}");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
