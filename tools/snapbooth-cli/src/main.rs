//! Snapbooth CLI: capture and compose booth photos from the command line.
//!
//! Usage:
//!   snapbooth snap [OPTIONS]     Capture a frame, compose it, save it
//!   snapbooth import <PATH>      Compose an existing photo file
//!   snapbooth inspect <PATH>     Show an image's dimensions and layout
//!   snapbooth check              Show configured directories and defaults

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "snapbooth",
    about = "Webcam photo booth with overlay compositing",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture a live frame, compose it with an overlay, and save it
    Snap {
        /// Overlay asset name under the configured assets directory
        #[arg(short = 'a', long, default_value = "badge.png")]
        overlay: String,

        /// Layout mode: mirror|template
        #[arg(short, long, default_value = "mirror")]
        mode: String,

        /// Camera facing: user|environment
        #[arg(long, default_value = "user")]
        facing: String,

        /// Camera frame size, WIDTHxHEIGHT
        #[arg(long, default_value = "1280x720")]
        camera_size: String,

        /// Output format: jpeg|png (defaults to the configured format)
        #[arg(short, long)]
        format: Option<String>,

        /// JPEG quality in [1, 100] (defaults to the configured quality)
        #[arg(long)]
        quality: Option<u8>,

        /// Output file path (defaults under the captures directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Publish the encoded capture into this directory as well
        #[arg(long)]
        publish_dir: Option<PathBuf>,
    },

    /// Compose an existing photo file with an overlay
    Import {
        /// Path to the photo to import
        path: PathBuf,

        /// Overlay asset name under the configured assets directory
        #[arg(short = 'a', long, default_value = "frame.png")]
        overlay: String,

        /// Layout mode: mirror|template
        #[arg(short, long, default_value = "template")]
        mode: String,

        /// Output format: jpeg|png (defaults to the configured format)
        #[arg(short, long)]
        format: Option<String>,

        /// JPEG quality in [1, 100] (defaults to the configured quality)
        #[arg(long)]
        quality: Option<u8>,

        /// Output file path (defaults under the captures directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Publish the encoded capture into this directory as well
        #[arg(long)]
        publish_dir: Option<PathBuf>,
    },

    /// Show an image file's dimensions and its planned working size
    Inspect {
        /// Path to the image file
        path: PathBuf,
    },

    /// Show the active configuration, directories, and overlay assets
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = snapbooth_common::config::AppConfig::load();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    snapbooth_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Snap {
            overlay,
            mode,
            facing,
            camera_size,
            format,
            quality,
            output,
            publish_dir,
        } => {
            commands::snap::run(
                config,
                overlay,
                mode,
                facing,
                camera_size,
                format,
                quality,
                output,
                publish_dir,
            )
            .await
        }
        Commands::Import {
            path,
            overlay,
            mode,
            format,
            quality,
            output,
            publish_dir,
        } => {
            commands::import::run(
                config,
                path,
                overlay,
                mode,
                format,
                quality,
                output,
                publish_dir,
            )
            .await
        }
        Commands::Inspect { path } => commands::inspect::run(path),
        Commands::Check => commands::check::run(config),
    }
}
