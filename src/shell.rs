//! Interactive search session (`synx shell`).
//!
//! Reads one line at a time. Plain lines are searches; lines starting with
//! `:` are commands that manage the in-memory corpus or the session:
//!
//! | Input | Effect |
//! |-------|--------|
//! | `<text>` | Search for `<text>` |
//! | `:docs` | List documents |
//! | `:add <path>` | Upload a local file into the corpus |
//! | `:rm <id>` | Remove a document |
//! | `:stats` | Corpus and query analytics |
//! | `:clear` | Reset the current search |
//! | `:help` | Command summary |
//! | `:quit` | Leave the shell |
//!
//! The session owns a [`SearchState`] and an [`Analytics`] accumulator.
//! Uploads and removals only live as long as the process.

use anyhow::Result;
use chrono::Utc;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use synapsex_core::analytics::Analytics;
use synapsex_core::models::SearchOutcome;
use synapsex_core::state::SearchState;
use synapsex_core::store::DocumentStore;

use crate::config::Config;
use crate::corpus;
use crate::documents::render_document_list;
use crate::search::{render_outcome, search_with_timeout};
use crate::stats::render_stats;

const HELP: &str = "\
Type a query to search, or one of:
  :docs          list documents
  :add <path>    upload a local file
  :rm <id>       remove a document
  :stats         corpus and query analytics
  :clear         reset the current search
  :quit          exit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    Docs,
    Add(PathBuf),
    Remove(String),
    Stats,
    Clear,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Option<ShellCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Some(ShellCommand::Search(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let cmd = match (name, arg.is_empty()) {
        ("docs", true) => ShellCommand::Docs,
        ("add", false) => ShellCommand::Add(PathBuf::from(arg)),
        ("rm", false) => ShellCommand::Remove(arg.to_string()),
        ("stats", true) => ShellCommand::Stats,
        ("clear", true) => ShellCommand::Clear,
        ("help", true) => ShellCommand::Help,
        ("quit", true) | ("q", true) | ("exit", true) => ShellCommand::Quit,
        _ => ShellCommand::Unknown(line.to_string()),
    };
    Some(cmd)
}

pub struct Shell<S: DocumentStore> {
    store: S,
    state: SearchState,
    analytics: Analytics,
    max_results: usize,
    timeout_ms: u64,
}

impl<S: DocumentStore> Shell<S> {
    pub fn new(store: S, max_results: usize, timeout_ms: u64) -> Self {
        Self {
            store,
            state: SearchState::new(),
            analytics: Analytics::new(),
            max_results,
            timeout_ms,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    /// Execute one command, returning the text to print.
    pub async fn execute(&mut self, cmd: ShellCommand) -> Result<String> {
        match cmd {
            ShellCommand::Search(query) => self.search(&query).await,
            ShellCommand::Docs => {
                let docs = self.store.list_documents().await?;
                Ok(render_document_list(&docs))
            }
            ShellCommand::Add(path) => {
                let doc = corpus::read_upload(&path, Utc::now())?;
                let line = format!("Added {} ({}, {})\n", doc.title, doc.doc_type, doc.id);
                tracing::info!(id = %doc.id, path = %path.display(), "document uploaded");
                self.store.insert_document(doc).await?;
                Ok(line)
            }
            ShellCommand::Remove(id) => {
                if self.store.remove_document(&id).await? {
                    tracing::info!(id = %id, "document removed");
                    Ok(format!("Removed {}\n", id))
                } else {
                    Ok(format!("No document with id {}\n", id))
                }
            }
            ShellCommand::Stats => {
                let docs = self.store.list_documents().await?;
                Ok(render_stats(&docs, &self.analytics))
            }
            ShellCommand::Clear => {
                self.state = self.state.clear();
                Ok("Search cleared.\n".to_string())
            }
            ShellCommand::Help => Ok(HELP.to_string()),
            ShellCommand::Quit => Ok(String::new()),
            ShellCommand::Unknown(line) => Ok(format!("Unknown command: {} (try :help)\n", line)),
        }
    }

    async fn search(&mut self, query: &str) -> Result<String> {
        let (loading, ticket) = self.state.begin(query);
        self.state = loading;

        let outcome = match search_with_timeout(&self.store, query, self.timeout_ms).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.state = self.state.clear();
                return Err(e);
            }
        };

        if let Some(metrics) = &outcome.metrics {
            self.analytics.record(metrics);
        }
        self.state = self.state.complete(ticket, outcome);

        let rendered = render_outcome(
            &SearchOutcome {
                results: self.state.results().to_vec(),
                metrics: self.state.metrics().cloned(),
            },
            self.max_results,
        );
        Ok(rendered)
    }

    /// Drive the session until `:quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let Some(cmd) = parse_command(&line) else {
                continue;
            };
            if cmd == ShellCommand::Quit {
                break;
            }
            let text = match self.execute(cmd).await {
                Ok(text) => text,
                Err(e) => format!("Error: {:#}\n", e),
            };
            output.write_all(text.as_bytes()).await?;
            output.flush().await?;
        }
        Ok(())
    }
}

/// CLI entry point for `synx shell`.
pub async fn run_shell(config: &Config) -> Result<()> {
    let store = corpus::build_store(config)?;
    let mut shell = Shell::new(store, config.search.max_results, config.search.timeout_ms);

    let stdin = BufReader::new(tokio::io::stdin());
    shell.run(stdin, tokio::io::stdout()).await?;

    tracing::debug!(queries = shell.analytics().total_queries(), "shell session ended");
    Ok(())
}
