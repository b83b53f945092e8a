//! Document listing and retrieval.
//!
//! Backs `synx docs`, `synx get <id>` and the shell's `:docs`.

use anyhow::{bail, Result};
use std::fmt::Write as _;

use synapsex_core::models::Document;
use synapsex_core::store::DocumentStore;

use crate::config::Config;
use crate::corpus;
use crate::stats::format_bytes;

/// One line per document: id, type, size, upload date, title.
pub fn render_document_list(docs: &[Document]) -> String {
    let mut out = String::new();
    if docs.is_empty() {
        out.push_str("No documents.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<38} {:<5} {:>10} {:<10}  TITLE",
        "ID", "TYPE", "SIZE", "UPLOADED"
    );
    for doc in docs {
        let _ = writeln!(
            out,
            "{:<38} {:<5} {:>10} {:<10}  {}",
            doc.id,
            doc.doc_type,
            format_bytes(doc.size),
            doc.uploaded_at.format("%Y-%m-%d"),
            doc.title
        );
    }
    out
}

pub fn render_document(doc: &Document) -> String {
    let mut out = String::new();
    out.push_str("--- Document ---\n");
    let _ = writeln!(out, "id:        {}", doc.id);
    let _ = writeln!(out, "title:     {}", doc.title);
    let _ = writeln!(out, "type:      {}", doc.doc_type);
    let _ = writeln!(out, "size:      {}", format_bytes(doc.size));
    let _ = writeln!(out, "uploaded:  {}", doc.uploaded_at.format("%Y-%m-%dT%H:%M:%SZ"));
    if let Some(embedding) = &doc.embedding {
        let _ = writeln!(out, "embedding: {} dims", embedding.len());
    }
    out.push('\n');
    out.push_str("--- Content ---\n");
    out.push_str(&doc.content);
    out.push('\n');
    out
}

/// CLI entry point for `synx docs`.
pub async fn run_docs(config: &Config) -> Result<()> {
    let store = corpus::build_store(config)?;
    let docs = store.list_documents().await?;
    print!("{}", render_document_list(&docs));
    Ok(())
}

/// CLI entry point for `synx get <id>`.
pub async fn run_get(config: &Config, id: &str) -> Result<()> {
    let store = corpus::build_store(config)?;
    match store.get_document(id).await? {
        Some(doc) => {
            print!("{}", render_document(&doc));
            Ok(())
        }
        None => bail!("document not found: {}", id),
    }
}
