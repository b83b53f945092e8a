//! The `synx search` command.
//!
//! Scoring happens in [`synapsex_core::search`]; this module puts the
//! timeout around the store round-trip and renders the outcome. The
//! `max_results` cap only limits what is displayed: metrics always describe
//! the full ranked result set.

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::time::Duration;

use synapsex_core::models::{QueryMetrics, SearchOutcome, SearchResult};
use synapsex_core::search::run_search as core_search;
use synapsex_core::store::DocumentStore;

use crate::config::Config;
use crate::corpus;

/// Run a search against `store`, failing if it takes longer than
/// `timeout_ms`.
///
/// The deadline is only checked when the search future yields. A store that
/// blocks the thread inside a single poll runs to completion regardless.
pub async fn search_with_timeout<S: DocumentStore + ?Sized>(
    store: &S,
    query: &str,
    timeout_ms: u64,
) -> Result<SearchOutcome> {
    tokio::time::timeout(Duration::from_millis(timeout_ms), core_search(store, query))
        .await
        .map_err(|_| anyhow!("search timed out after {}ms", timeout_ms))?
}

/// JSON shape printed by `synx search --json`.
#[derive(Debug, Serialize)]
struct JsonOutcome<'a> {
    query: &'a str,
    results: &'a [SearchResult],
    metrics: Option<&'a QueryMetrics>,
}

/// Render an outcome as the human-readable listing shared by `synx search`
/// and the interactive shell.
pub fn render_outcome(outcome: &SearchOutcome, limit: usize) -> String {
    let mut out = String::new();

    let Some(metrics) = &outcome.metrics else {
        out.push_str("No active search.\n");
        return out;
    };

    if outcome.results.is_empty() {
        out.push_str("No results.\n");
    }

    for (i, result) in outcome.results.iter().take(limit).enumerate() {
        let doc = &result.document;
        let _ = writeln!(
            out,
            "{}. [{:.1}] {} ({})",
            i + 1,
            result.relevance_score,
            doc.title,
            doc.doc_type
        );
        let _ = writeln!(out, "    uploaded: {}", doc.uploaded_at.format("%Y-%m-%d"));
        for highlight in &result.highlights {
            let _ = writeln!(out, "    excerpt: \"{}\"", highlight.replace('\n', " "));
        }
        let _ = writeln!(out, "    id: {}", doc.id);
        out.push('\n');
    }

    if outcome.results.len() > limit {
        let _ = writeln!(
            out,
            "({} more result(s) not shown)",
            outcome.results.len() - limit
        );
    }

    let _ = writeln!(
        out,
        "searched: {}  returned: {}  avg relevance: {:.1}  time: {:.2}ms",
        metrics.documents_searched,
        metrics.results_returned,
        metrics.average_relevance,
        metrics.query_time
    );
    out
}

/// CLI entry point for `synx search <query>`.
pub async fn run_search(
    config: &Config,
    query: &str,
    json: bool,
    limit: Option<usize>,
) -> Result<()> {
    let store = corpus::build_store(config)?;
    let outcome = search_with_timeout(&store, query, config.search.timeout_ms).await?;
    let limit = limit.unwrap_or(config.search.max_results);

    if json {
        let shown = outcome.results.len().min(limit);
        let payload = JsonOutcome {
            query,
            results: &outcome.results[..shown],
            metrics: outcome.metrics.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print!("{}", render_outcome(&outcome, limit));
    }

    Ok(())
}
