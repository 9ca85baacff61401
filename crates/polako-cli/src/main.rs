//! polako CLI — run the vocabulary quiz and inspect its state.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod console;

#[derive(Parser)]
#[command(name = "polako", version, about = "Vocabulary drilling quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a quiz session on the console (blank line sends a message)
    Run {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// User id to answer as
        #[arg(long, default_value = "1")]
        user_id: i64,

        /// Display name for a new user
        #[arg(long, default_value = "console")]
        name: String,
    },

    /// Check a word list file
    Validate {
        /// Path to a .tsv or .toml word list
        #[arg(long)]
        dictionary: PathBuf,
    },

    /// Show per-user progress from the saved state
    Stats {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// State file to read instead of the configured one
        #[arg(long)]
        state: Option<PathBuf>,
    },

    /// Create starter config and word list
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("polako=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            user_id,
            name,
        } => commands::run::execute(config, user_id, name).await,
        Commands::Validate { dictionary } => commands::validate::execute(dictionary),
        Commands::Stats { config, state } => commands::stats::execute(config, state),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
