//! parlab CLI - Runs the parallel-execution demos
//!
//! Each demo runs a workload sequentially, then as remote tasks on a worker
//! pool, and reports the wall-clock time of both runs.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::needless_pass_by_value)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use parlab_core::util::load_env_file;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{config as config_cmd, moving_average, timer};
use config::Config;

#[derive(Parser)]
#[command(name = "parlab")]
#[command(author, version, long_about = None)]
#[command(about = "parlab - sequential vs parallel timing demos")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sleep-based timer calls, sequential vs parallel
    Timer(timer::TimerArgs),

    /// Row-wise moving average, sequential vs parallel
    MovingAverage(moving_average::MovingAverageArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(config_cmd::ConfigCommands),
}

fn main() -> Result<()> {
    // Load environment from parlab.env file (before parsing args)
    load_env_file();

    let cli = Cli::parse();
    let (config, source) = Config::load()?;

    // Initialize logging based on verbosity
    let log_level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                ["parlab", "parlab_pool", "parlab_compute", "parlab_core"]
                    .map(|target| format!("{target}={log_level}"))
                    .join(",")
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(path) = &source {
        tracing::debug!("Loaded config from: {:?}", path);
    }

    match cli.command {
        Commands::Timer(args) => timer::run(args, &config, cli.json),
        Commands::MovingAverage(args) => moving_average::run(args, &config, cli.json),
        Commands::Config(cmd) => config_cmd::run(cmd, &config, source.as_deref()),
    }
}
