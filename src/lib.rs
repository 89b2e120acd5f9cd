//! # Scallion 🌱
//!
//! Capture a still from a Raspberry Pi camera and tweet it.
//!
//! ## Overview
//!
//! Scallion takes a photo, uploads it to Twitter through the chunked media
//! upload API and posts a tweet that references it, printing the tweet URL.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                           CLI                               │
//! │     Builds the Config, sets up logging, runs a command      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Camera      │ │    Publisher    │ │      Auth       │
//! │                 │ │                 │ │                 │
//! │ • raspistill    │ │ • INIT          │ │ • Credentials   │
//! │ • Temp JPEG     │ │ • APPEND chunks │ │ • OAuth 1.0a    │
//! │                 │ │ • FINALIZE      │ │   signing       │
//! │                 │ │ • Status update │ │                 │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!                              │
//!                              ▼
//!                     ┌─────────────────┐
//!                     │       API       │
//!                     │                 │
//!                     │ • SignedClient  │
//!                     │ • OAuthClient   │
//!                     └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] — Signed client trait and the reqwest implementation
//! - [`auth`] — Credentials file loading and request signing
//! - [`camera`] — Still capture
//! - [`config`] — Configuration management
//! - [`error`] — Publish error taxonomy
//! - [`media`] — MIME resolution and chunk arithmetic
//! - [`models`] — Upload session and tweet
//! - [`publisher`] — The upload and post workflow
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use scallion::{Config, Credentials, MediaPublisher, api};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let credentials = Credentials::load_from(Path::new("credentials.json"))?;
//! let client = api::get_client(&credentials, &config.twitter)?;
//! let publisher = MediaPublisher::new(client, config.twitter.clone());
//!
//! let tweet = publisher.post("Good morning", Path::new("photo.jpg")).await?;
//! println!("{}", tweet.url);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::future_not_send)]

pub mod api;
pub mod auth;
pub mod camera;
pub mod config;
pub mod error;
pub mod media;
pub mod models;
pub mod paths;
pub mod publisher;

// Re-export main types for convenience
pub use auth::Credentials;
pub use camera::{Camera, Raspistill};
pub use config::Config;
pub use error::{Failure, PublishError};
pub use models::{MediaUpload, Tweet};
pub use publisher::MediaPublisher;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
