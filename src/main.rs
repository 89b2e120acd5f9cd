//! Scallion - capture a still and tweet it
#![allow(clippy::uninlined_format_args)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scallion::{Camera, Config, Credentials, MediaPublisher, Raspistill, api};

/// Capture a still from the camera and tweet it
#[derive(Parser)]
#[command(name = "scallion", version, about)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.config/scallion/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Capture a still and print its path (the default)
    Capture,
    /// Tweet an image with the given words as text
    Tweet {
        /// A JSON file containing Twitter credentials, must include keys:
        /// consumerKey, consumerSecret, accessToken, accessSecret
        #[arg(short, long, value_name = "FILE")]
        credentials: PathBuf,

        /// Path to tweet image file (captured from the camera when omitted)
        #[arg(short, long, value_name = "FILE")]
        image: Option<PathBuf>,

        /// Tweet text, joined with spaces
        words: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // RUST_LOG wins over the configured verbosity
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match cli.command.unwrap_or(Command::Capture) {
        Command::Capture => capture_cli(&config).await,
        Command::Tweet {
            credentials,
            image,
            words,
        } => tweet_cli(&config, &credentials, image, &words).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.verbose |= cli.verbose;
    Ok(config)
}

async fn capture_cli(config: &Config) -> Result<()> {
    let camera = Raspistill::new(config.camera.clone());
    let image = camera.capture().await?;
    println!("{}", image.display());
    Ok(())
}

async fn tweet_cli(
    config: &Config,
    credentials_path: &Path,
    image: Option<PathBuf>,
    words: &[String],
) -> Result<()> {
    let credentials = Credentials::load_from(credentials_path)?;

    let image = match image {
        Some(image) => image,
        None => {
            let image = Raspistill::new(config.camera.clone()).capture().await?;
            tracing::info!("Captured {}", image.display());
            image
        }
    };

    let client = api::get_client(&credentials, &config.twitter)?;
    let publisher = MediaPublisher::new(client, config.twitter.clone());

    let message = words.join(" ");
    tracing::info!("Tweeting {:?} with image file {}", message, image.display());

    let tweet = publisher.post(&message, &image).await?;

    // Write tweet url to stdout
    println!("{}", tweet.url);
    Ok(())
}
