//! SmoothCam CLI — Create, validate, and replay camera scenes.
//!
//! Usage:
//!   smoothcam init <PATH>         Write the demo scene
//!   smoothcam validate <PATH>     Validate a scene file
//!   smoothcam simulate <PATH>     Replay a scene's track and print camera targets
//!   smoothcam overlay <PATH>      Print the debug overlay at a point in time

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "smoothcam",
    about = "Anticipatory 2D camera targeting with point-of-interest blending",
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
    /// Write the demo scene to a file
    Init {
        /// Output scene file
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate a scene file
    Validate {
        /// Path to the scene file
        path: PathBuf,
    },

    /// Replay a scene's track through the camera world
    Simulate {
        /// Path to the scene file
        path: PathBuf,

        /// Frames per second (defaults to the app config)
        #[arg(long)]
        fps: Option<u32>,

        /// Speed that maps to normalized velocity 1.0 (defaults to the scene, then app config)
        #[arg(long)]
        max_speed: Option<f64>,

        /// Seconds to simulate (defaults to the track length)
        #[arg(long)]
        duration: Option<f64>,

        /// Print every frame as JSON Lines instead of a summary table
        #[arg(long)]
        jsonl: bool,

        /// Print every Nth frame in the table
        #[arg(long, default_value = "30")]
        every: usize,

        /// Write JSON Lines output to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the debug overlay snapshot at a given time
    Overlay {
        /// Path to the scene file
        path: PathBuf,

        /// Time in seconds from the start of the track
        #[arg(long, default_value = "0.0")]
        time: f64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = smoothcam_common::config::AppConfig::load();
    let logging = if cli.verbose {
        smoothcam_common::logging::verbosity_config(true)
    } else {
        app_config.logging.clone()
    };
    smoothcam_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Init { path, force } => commands::init::run(path, force),
        Commands::Validate { path } => commands::validate::run(path),
        Commands::Simulate {
            path,
            fps,
            max_speed,
            duration,
            jsonl,
            every,
            output,
        } => commands::simulate::run(
            path,
            &app_config.simulation,
            commands::simulate::SimulateOptions {
                fps,
                max_speed,
                duration,
                jsonl,
                every,
                output,
            },
        ),
        Commands::Overlay { path, time } => {
            commands::overlay::run(path, &app_config.simulation, time)
        }
    }
}
