//! gloss - CLI entry point.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gloss::commands::{self, CommitArgs, ConfigCommand, ExplainArgs};
use gloss::prompt::CommitType;

/// Explain git diffs and generate commit messages with a hosted LLM.
#[derive(Parser, Debug)]
#[command(name = "gloss")]
#[command(about = "Explain git diffs and generate commit messages with a hosted LLM")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Explain diff changes in plain language
    ///
    /// Reads the diff from stdin when piped:
    ///   git diff | gloss explain
    Explain {
        /// Request a detailed, file-by-file explanation
        #[arg(long)]
        detailed: bool,

        /// Revision or range to diff (defaults to the working tree)
        revspec: Option<String>,
    },

    /// Generate a commit message from staged changes and commit
    Commit {
        /// Conventional commit type for the message prefix
        #[arg(short = 't', long = "type", value_enum)]
        commit_type: Option<CommitType>,

        /// Skip opening the editor before committing
        #[arg(long)]
        no_edit: bool,
    },

    /// Inspect and modify configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A .env in the working directory may carry the API credential.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("GLOSS_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Explain { detailed, revspec } => {
            commands::explain::run(ExplainArgs { detailed, revspec }).await
        }
        Commands::Commit {
            commit_type,
            no_edit,
        } => commands::commit::run(CommitArgs {
            commit_type,
            no_edit,
        })
        .await,
        Commands::Config(command) => commands::config::run(command),
    }
}
