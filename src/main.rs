//! Gridsnake CLI - play, simulate and watch snake matches.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Gridsnake - agar.io style snake survival on a grid
#[derive(Parser, Debug)]
#[command(name = "gridsnake")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play against CPU snakes on stdin/stdout
    Single {
        /// Player name (profiles are keyed by the upper-cased name)
        #[arg(short, long)]
        name: String,

        /// Directory holding player profiles
        #[arg(long, default_value = "profiles")]
        profiles: PathBuf,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Match configuration JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Hot-seat match between 2-5 human players
    Multi {
        /// Player names (2-5)
        #[arg(required = true, num_args = 2..=5)]
        names: Vec<String>,

        /// Directory holding player profiles
        #[arg(long, default_value = "profiles")]
        profiles: PathBuf,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Match configuration JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Run one headless CPU-only match
    Simulate {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of CPU snakes (default: 5)
        #[arg(short, long, default_value = "5")]
        players: usize,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Match configuration JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Run many CPU-only matches in parallel and aggregate statistics
    Tournament {
        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of CPU snakes per game (default: 5)
        #[arg(long, default_value = "5")]
        players: usize,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,

        /// Match configuration JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Interactive TUI to watch a CPU-only match round by round
    Watch {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of CPU snakes (default: 5)
        #[arg(long, default_value = "5")]
        players: usize,

        /// Round delay in milliseconds (default: 500)
        #[arg(long, default_value = "500")]
        speed: u64,

        /// Match configuration JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    let result = match args.command {
        Commands::Single {
            name,
            profiles,
            seed,
            config,
        } => cli::play::single(&name, &profiles, seed, config.as_deref()),

        Commands::Multi {
            names,
            profiles,
            seed,
            config,
        } => cli::play::multi(&names, &profiles, seed, config.as_deref()),

        Commands::Simulate {
            seed,
            players,
            format,
            config,
        } => cli::simulate::execute(seed, players, format, config.as_deref()),

        Commands::Tournament {
            games,
            seed,
            players,
            threads,
            format,
            progress,
            config,
        } => cli::tournament::execute(
            games,
            seed,
            players,
            threads,
            format,
            progress,
            config.as_deref(),
        ),

        Commands::Watch {
            seed,
            players,
            speed,
            config,
        } => cli::watch::execute(seed, players, speed, config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
