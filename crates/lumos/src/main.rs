//! Lumos CLI - headless front-end for the Lumos image enhancement pipeline.
//!
//! Lumos reads a plain-text PPM image, optionally denoises it, upscales it by
//! 2x, 4x or 8x, and writes the result next to the input. Every attempt is
//! recorded in an append-only JSON Lines event log.
//!
//! # Usage
//!
//! ```bash
//! # Enhance an image (writes photo_lumos_2x.ppm)
//! lumos enhance photo.ppm
//!
//! # 4x with denoise, explicit output
//! lumos enhance photo.ppm --scale 4 --denoise -o big.ppm
//!
//! # Inspect the event log
//! lumos telemetry tail -n 5
//!
//! # View configuration
//! lumos config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Lumos - image enhancement with a telemetry trail.
#[derive(Parser, Debug)]
#[command(name = "lumos")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Denoise and upscale a PPM image
    Enhance(cli::enhance::EnhanceArgs),

    /// Inspect the telemetry event log
    Telemetry(cli::telemetry::TelemetryArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match lumos_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `lumos config path`."
            );
            lumos_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Lumos v{}", lumos_core::VERSION);

    match cli.command {
        Commands::Enhance(args) => cli::enhance::execute(args, &config).await,
        Commands::Telemetry(args) => cli::telemetry::execute(args, &config),
        Commands::Config(args) => cli::config::execute(args),
    }
}
