//! Common paths for Scallion data storage
//!
//! Scallion keeps its files under ~/.config/scallion/ on all platforms:
//! - config.toml - User configuration

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the Scallion data directory (~/.config/scallion/)
///
/// This is consistent across all platforms for simplicity. The directory
/// is not created here; writers create it on demand.
pub fn scallion_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("scallion"))
}

/// Get the config file path (~/.config/scallion/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(scallion_dir()?.join("config.toml"))
}
