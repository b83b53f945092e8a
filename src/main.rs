//! # SynapseX CLI (`synx`)
//!
//! The `synx` binary searches an in-memory document corpus and reports
//! ranked results, highlighted excerpts, and query metrics.
//!
//! ## Usage
//!
//! ```bash
//! synx --config ./config/synx.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `synx search "<query>"` | Rank documents against a query |
//! | `synx docs` | List the corpus |
//! | `synx get <id>` | Print one document |
//! | `synx stats` | Corpus totals by file type |
//! | `synx shell` | Interactive search session with uploads |
//!
//! ## Examples
//!
//! ```bash
//! # Search the built-in demo corpus
//! synx search "TimescaleDB performance"
//!
//! # Machine-readable output
//! synx search "semantic similarity" --json --limit 5
//!
//! # Session with uploads from disk
//! synx shell --config ./config/synx.toml
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use synapsex::{config, documents, logging, search, shell, stats};

/// SynapseX CLI — lexical document search over an in-memory corpus.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. When the file does not exist, the built-in demo corpus and default
/// settings are used.
#[derive(Parser)]
#[command(
    name = "synx",
    about = "SynapseX — lexical document search over an in-memory corpus",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/synx.toml")]
    config: PathBuf,

    /// Enable debug logging (overrides `[logging].level` and `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Search the corpus.
    ///
    /// Prints results ranked by relevance with up to two highlighted
    /// excerpts each, followed by query metrics.
    Search {
        /// The search query string.
        query: String,

        /// Print results and metrics as JSON.
        #[arg(long)]
        json: bool,

        /// Maximum number of results to display (defaults to `search.max_results`).
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List all documents in the corpus.
    Docs,

    /// Print a document by ID.
    Get {
        /// Document ID.
        id: String,
    },

    /// Show corpus statistics.
    Stats,

    /// Start an interactive search session on stdin.
    ///
    /// Plain lines are searches; `:help` lists the session commands.
    Shell,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = config::try_load_config(&cli.config)?;
    let found = loaded.is_some();
    let cfg = loaded.unwrap_or_else(config::Config::minimal);
    logging::init_logger(&cfg.logging, cli.verbose);

    if !found {
        tracing::info!(
            path = %cli.config.display(),
            "config file not found, using built-in defaults"
        );
    }

    match cli.command {
        Commands::Search { query, json, limit } => {
            search::run_search(&cfg, &query, json, limit).await?;
        }
        Commands::Docs => {
            documents::run_docs(&cfg).await?;
        }
        Commands::Get { id } => {
            documents::run_get(&cfg, &id).await?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg).await?;
        }
        Commands::Shell => {
            shell::run_shell(&cfg).await?;
        }
    }

    Ok(())
}
