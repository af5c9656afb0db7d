//! Froth CLI - run and inspect the bubble engine without a browser

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, config, simulate};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "froth")]
#[command(about = "Headless driver for the Froth bubble background", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bubble layer against an in-memory host
    Simulate {
        /// Path to a bubble config file (TOML)
        #[arg(long)]
        config: Option<String>,

        /// Number of frames to run
        #[arg(long, default_value = "600")]
        frames: u32,

        /// Viewport width in CSS pixels
        #[arg(long, default_value = "1280")]
        width: f32,

        /// Viewport height in CSS pixels
        #[arg(long, default_value = "720")]
        height: f32,

        /// Simulated display refresh rate
        #[arg(long, default_value = "60")]
        fps: f64,

        /// Device pixel ratio reported by the host
        #[arg(long, default_value = "1")]
        dpr: f32,

        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Report a reduced-motion preference
        #[arg(long)]
        reduced_motion: bool,

        /// Hide the page before this frame
        #[arg(long)]
        hide_at: Option<u32>,

        /// Show the page again before this frame
        #[arg(long)]
        show_at: Option<u32>,

        /// Lose the rendering context before this frame
        #[arg(long)]
        lose_device_at: Option<u32>,

        /// Explicitly restart before this frame
        #[arg(long)]
        restart_at: Option<u32>,

        /// Pointer press as X,Y@FRAME (repeatable)
        #[arg(long = "pop", value_parser = simulate::parse_pop)]
        pops: Vec<simulate::PopAt>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config {
        /// Path to a bubble config file (TOML)
        #[arg(long)]
        config: Option<String>,

        /// Output format (json or toml)
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Validate a configuration file
    Check {
        /// Path to a bubble config file (TOML)
        config: String,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Simulate {
            config,
            frames,
            width,
            height,
            fps,
            dpr,
            seed,
            reduced_motion,
            hide_at,
            show_at,
            lose_device_at,
            restart_at,
            pops,
            json,
        } => simulate::run(simulate::SimulateArgs {
            config,
            frames,
            width,
            height,
            fps,
            device_pixel_ratio: dpr,
            seed,
            reduced_motion,
            hide_at,
            show_at,
            lose_device_at,
            restart_at,
            pops,
            json,
        }),
        Commands::Config { config: path, format } => config::run(path.as_deref(), &format),
        Commands::Check { config } => check::run(&config),
    }
}
