//! Corpus storage abstraction for SynapseX.
//!
//! The [`DocumentStore`] trait is the document-store collaborator the scorer
//! consumes. Frontends hold a store, mutate it through uploads and removals,
//! and hand it to [`run_search`](crate::search::run_search).
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::models::{Document, DocumentType};

/// Abstract document collection.
///
/// All operations are async (via `async-trait`) so that a store backed by a
/// real service can slot in later. The in-memory implementation returns
/// immediately-ready futures.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`list_documents`](DocumentStore::list_documents) | Snapshot of the corpus, in insertion order |
/// | [`get_document`](DocumentStore::get_document) | Look up one document by ID |
/// | [`insert_document`](DocumentStore::insert_document) | Add a document; IDs must be unique |
/// | [`remove_document`](DocumentStore::remove_document) | Delete a document by ID |
/// | [`len`](DocumentStore::len) | Number of stored documents |
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return every document, in insertion order.
    async fn list_documents(&self) -> Result<Vec<Document>>;

    /// Retrieve a document by ID.
    async fn get_document(&self, id: &str) -> Result<Option<Document>>;

    /// Add a document. Fails if a document with the same ID exists.
    async fn insert_document(&self, doc: Document) -> Result<()>;

    /// Remove a document by ID, returning whether one was removed.
    async fn remove_document(&self, id: &str) -> Result<bool>;

    /// Number of stored documents.
    async fn len(&self) -> Result<usize>;

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}

/// The four demonstration documents the dashboard ships with.
pub fn demo_corpus() -> Vec<Document> {
    vec![
        demo_document(
            "1",
            "TimescaleDB Performance Optimization",
            "TimescaleDB is a time-series database built on PostgreSQL. It provides excellent performance for time-series data with automatic partitioning and compression.",
            DocumentType::Pdf,
            15,
            1_024_000,
        ),
        demo_document(
            "2",
            "Vector Embeddings in Semantic Search",
            "Vector embeddings represent text as high-dimensional vectors, enabling semantic similarity calculations through cosine similarity and other distance metrics.",
            DocumentType::Docx,
            16,
            512_000,
        ),
        demo_document(
            "3",
            "AI Agent Architecture Patterns",
            "AI agents can be designed with various architectural patterns including reactive agents, deliberative agents, and hybrid approaches combining both paradigms.",
            DocumentType::Md,
            17,
            256_000,
        ),
        demo_document(
            "4",
            "Natural Language Processing with LLMs",
            "Large Language Models excel at understanding natural language queries and can be fine-tuned for specific domain applications with high accuracy.",
            DocumentType::Txt,
            18,
            768_000,
        ),
    ]
}

fn demo_document(
    id: &str,
    title: &str,
    content: &str,
    doc_type: DocumentType,
    day: u32,
    size: u64,
) -> Document {
    Document {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        doc_type,
        uploaded_at: Utc
            .with_ymd_and_hms(2024, 1, day, 0, 0, 0)
            .single()
            .unwrap_or_default(),
        size,
        embedding: None,
    }
}
