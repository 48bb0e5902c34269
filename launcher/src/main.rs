//! Roadster - headless launcher
//!
//! # Commands
//!
//! - `roadster run` - Drive a track for a number of ticks
//! - `roadster frame` - Dump the draw list of a single frame as JSON
//! - `roadster track` - Build a track recipe and print its layout
//! - `roadster config` - Show or write the configuration file
//!
//! # Usage
//!
//! ```bash
//! # Floor it around the oval for ten seconds
//! roadster run --recipe oval --ticks 600 --throttle
//!
//! # Replay an input script
//! roadster run --script lap.toml
//!
//! # Inspect what the renderer emits two seconds into the tunnel track
//! roadster frame --recipe tunnel --ticks 120 --out frame.json
//! ```

mod config;
mod frame;
mod run;
mod track;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Roadster - pseudo-3D road racer
#[derive(Parser)]
#[command(name = "roadster")]
#[command(about = "Headless launcher for the Roadster road racer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive a track for a number of ticks
    Run(run::RunArgs),

    /// Dump the draw list of a single frame as JSON
    Frame(frame::FrameArgs),

    /// Build a track recipe and print its layout
    Track(track::TrackArgs),

    /// Show or write the configuration file
    Config(config::ConfigArgs),
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run::execute(args),
        Commands::Frame(args) => frame::execute(args),
        Commands::Track(args) => track::execute(args),
        Commands::Config(args) => config::execute(args),
    }
}
