//! reeltime CLI — Command-line interface for project creation, editing,
//! playback simulation, and export.
//!
//! Usage:
//!   reeltime init <NAME>         Create a new project from a recording
//!   reeltime info <PATH>         Show project information
//!   reeltime split <PATH>        Split both tracks of a scene at a time
//!   reeltime set-speed <PATH>    Change one screen-track slice's playback speed
//!   reeltime resolve <PATH>      Simulate playback and print resolved frames
//!   reeltime export <PATH>       Print the Edit Decision List for a track

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "reeltime",
    about = "Non-linear timeline engine for screen-recording post-production",
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
    /// Create a new project file from a simulated recording
    Init {
        /// Project file to write
        path: PathBuf,

        /// Recording duration, in milliseconds
        #[arg(long, default_value = "10000")]
        duration_ms: i64,
    },

    /// Show project information
    Info {
        /// Path to the project file
        path: PathBuf,
    },

    /// Split both tracks of a scene's clip covering a given output time
    Split {
        /// Path to the project file
        path: PathBuf,

        /// Output time, in milliseconds, to split at
        #[arg(long)]
        at_ms: i64,

        /// Scene index to operate on
        #[arg(long, default_value = "0")]
        scene: usize,
    },

    /// Change a slice's playback speed (time_scale)
    SetSpeed {
        /// Path to the project file
        path: PathBuf,

        /// Scene index to operate on
        #[arg(long, default_value = "0")]
        scene: usize,

        /// Positional index of the slice on the screen track
        #[arg(long)]
        slice_index: usize,

        /// New playback speed (1.0 = real-time, 2.0 = double speed)
        #[arg(long)]
        time_scale: f64,
    },

    /// Simulate playback for a scene and print the resolved frames
    Resolve {
        /// Path to the project file
        path: PathBuf,

        /// Scene index to resolve
        #[arg(long, default_value = "0")]
        scene: usize,

        /// Output time, in milliseconds, to seek to before ticking
        #[arg(long, default_value = "0")]
        seek_ms: i64,

        /// Number of ticks to simulate after the initial seek
        #[arg(long, default_value = "5")]
        ticks: u32,

        /// Simulated wall-clock delta per tick, in milliseconds
        #[arg(long, default_value = "16")]
        tick_ms: i64,
    },

    /// Print the Edit Decision List for one track as JSON
    Export {
        /// Path to the project file
        path: PathBuf,

        /// Which track to export: screen or camera
        #[arg(long, default_value = "screen")]
        track: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    reeltime_common::logging::init_logging(&reeltime_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Init { path, duration_ms } => commands::init::run(path, duration_ms),
        Commands::Info { path } => commands::info::run(path),
        Commands::Split { path, at_ms, scene } => commands::split::run(path, scene, at_ms),
        Commands::SetSpeed {
            path,
            scene,
            slice_index,
            time_scale,
        } => commands::set_speed::run(path, scene, slice_index, time_scale),
        Commands::Resolve {
            path,
            scene,
            seek_ms,
            ticks,
            tick_ms,
        } => commands::resolve::run(path, scene, seek_ms, ticks, tick_ms),
        Commands::Export { path, track } => commands::export::run(path, track),
    }
}
