//! Corpus statistics and session analytics.
//!
//! Provides a quick summary of what is loaded: document counts and sizes
//! per file kind, plus query analytics when called from the shell. Used by
//! `synx stats` and the shell's `:stats`.

use anyhow::Result;
use std::fmt::Write as _;

use synapsex_core::analytics::{type_breakdown, Analytics};
use synapsex_core::models::Document;
use synapsex_core::store::DocumentStore;

use crate::config::Config;
use crate::corpus;

/// Render corpus totals, the per-kind breakdown, and query analytics.
pub fn render_stats(docs: &[Document], analytics: &Analytics) -> String {
    let mut out = String::new();
    let total_bytes: u64 = docs.iter().map(|d| d.size).sum();
    let system = analytics.snapshot(docs.len());

    out.push_str("SynapseX — Corpus Stats\n");
    out.push_str("=======================\n\n");
    let _ = writeln!(out, "  Documents:   {}", system.total_documents);
    let _ = writeln!(out, "  Total size:  {}", format_bytes(total_bytes));
    out.push('\n');

    out.push_str("  By type:\n");
    let _ = writeln!(out, "  {:<8} {:>6} {:>12}", "TYPE", "DOCS", "SIZE");
    let _ = writeln!(out, "  {}", "-".repeat(28));
    for t in type_breakdown(docs) {
        let _ = writeln!(
            out,
            "  {:<8} {:>6} {:>12}",
            t.doc_type,
            t.count,
            format_bytes(t.bytes)
        );
    }

    out.push('\n');
    let _ = writeln!(out, "  Queries:     {}", system.total_queries);
    if system.total_queries > 0 {
        let _ = writeln!(
            out,
            "  Avg time:    {:.2}ms",
            system.average_retrieval_time
        );
        let _ = writeln!(out, "  Success:     {:.1}%", system.success_rate);
    }
    out
}

/// CLI entry point for `synx stats`.
pub async fn run_stats(config: &Config) -> Result<()> {
    let store = corpus::build_store(config)?;
    let docs = store.list_documents().await?;
    print!("{}", render_stats(&docs, &Analytics::new()));
    Ok(())
}

/// Format a byte count as a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
