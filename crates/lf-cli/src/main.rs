//! Console host for the Lanternfall text-adventure engine.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "LANTERNFALL_LOG";

#[derive(Parser)]
#[command(
    name = "lf",
    about = "Lanternfall: a turn-based text adventure",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the demo game on the console
    Play {
        /// RNG seed for the actors (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON engine configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the session transcript here (.txt for plain text, JSON otherwise)
        #[arg(short, long)]
        transcript: Option<PathBuf>,
    },

    /// List the verbs, their synonyms, and the directions
    Vocab,

    /// List the demo locations and their exits
    Map,
}

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Play {
            seed,
            config,
            transcript,
        } => commands::play::run(seed, config.as_deref(), transcript.as_deref()),
        Commands::Vocab => commands::vocab::run(),
        Commands::Map => commands::map::run(),
    }
}
