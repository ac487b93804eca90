//! clipdeck CLI: drive the timeline navigation engine headless.
//!
//! Usage:
//!   clipdeck ticks [OPTIONS]            Print the tick layout for a window
//!   clipdeck zoom [OPTIONS]             Step the window through wheel zooms
//!   clipdeck replay <SCRIPT> [OPTIONS]  Replay a JSONL interaction script
//!   clipdeck play [OPTIONS]             Simulate timed playback

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use clipdeck_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "clipdeck",
    about = "Timeline navigation and clip selection for media players",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the standard config location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Direction {
    In,
    Out,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tick layout for a visible window
    Ticks {
        /// Media duration (seconds)
        #[arg(short, long)]
        duration: f64,

        /// Window start (seconds)
        #[arg(long, default_value = "0")]
        start: f64,

        /// Window end (seconds, defaults to the media end)
        #[arg(long)]
        end: Option<f64>,

        /// Track width (pixels)
        #[arg(long, default_value = "800")]
        width: f64,

        /// Print ticks as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Apply repeated wheel zooms and print each resulting window
    Zoom {
        /// Media duration (seconds)
        #[arg(short, long)]
        duration: f64,

        /// Pointer position across the track [0.0, 1.0]
        #[arg(long, default_value = "0.5")]
        at: f64,

        /// Zoom direction
        #[arg(long, value_enum, default_value = "in")]
        direction: Direction,

        /// Number of wheel steps
        #[arg(long, default_value = "5")]
        steps: u32,
    },

    /// Replay a JSONL interaction script against a simulated player
    Replay {
        /// Path to the script
        script: PathBuf,

        /// Media duration (seconds)
        #[arg(short, long)]
        duration: f64,

        /// Width of every control track (pixels)
        #[arg(long, default_value = "1000")]
        width: f64,

        /// Write persisted settings back to the config file
        #[arg(long)]
        save: bool,
    },

    /// Simulate real-time playback, printing indicator updates
    Play {
        /// Media duration (seconds)
        #[arg(short, long)]
        duration: f64,

        /// Start position (seconds)
        #[arg(long, default_value = "0")]
        from: f64,

        /// Enable clip mode around the start position first
        #[arg(long)]
        clip: bool,

        /// Stop after this much wall time (seconds)
        #[arg(long, default_value = "10")]
        limit: f64,

        /// Override the playback rate multiplier
        #[arg(long)]
        rate: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    clipdeck_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Ticks {
            duration,
            start,
            end,
            width,
            json,
        } => commands::ticks::run(duration, start, end, width, json),
        Commands::Zoom {
            duration,
            at,
            direction,
            steps,
        } => commands::zoom::run(duration, at, direction, steps),
        Commands::Replay {
            script,
            duration,
            width,
            save,
        } => commands::replay::run(script, duration, width, config, save, cli.config),
        Commands::Play {
            duration,
            from,
            clip,
            limit,
            rate,
        } => commands::play::run(duration, from, clip, limit, rate, &config).await,
    }
}
