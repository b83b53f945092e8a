//! Core data models used throughout SynapseX.
//!
//! These types represent the documents in a corpus and the results and
//! metrics a search produces. Field names serialize in `camelCase` so the
//! JSON shapes line up with the dashboard that consumes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body used for uploads whose text is not available yet (binary formats,
/// undecodable bytes).
pub const PENDING_CONTENT: &str = "Document content will be processed...";

/// The fixed set of file kinds a document can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Pdf,
    Docx,
    Txt,
    Md,
}

impl DocumentType {
    /// Every kind, in declaration order.
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Pdf,
        DocumentType::Docx,
        DocumentType::Txt,
        DocumentType::Md,
    ];

    /// Classify a file by the extension of its name.
    ///
    /// `pdf` → pdf, `docx`/`doc` → docx, `md` → md, anything else
    /// (including no extension at all) → txt. Matching is case-insensitive.
    pub fn from_file_name(file_name: &str) -> Self {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => DocumentType::Pdf,
            "docx" | "doc" => DocumentType::Docx,
            "md" => DocumentType::Md,
            _ => DocumentType::Txt,
        }
    }

    /// Whether uploads of this kind carry readable text as-is.
    pub fn is_plain_text(&self) -> bool {
        matches!(self, DocumentType::Txt | DocumentType::Md)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Pdf => "pdf",
            DocumentType::Docx => "docx",
            DocumentType::Txt => "txt",
            DocumentType::Md => "md",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A document in the corpus. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub uploaded_at: DateTime<Utc>,
    /// Size of the source file in bytes.
    pub size: u64,
    /// Precomputed embedding. Carried through, never read by the scorer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl Document {
    /// Build a document from an uploaded file.
    ///
    /// The id is a fresh UUID, the title is the file name without its final
    /// extension, and the kind comes from [`DocumentType::from_file_name`].
    /// When `content` is `None` the body is [`PENDING_CONTENT`].
    pub fn from_upload(
        file_name: &str,
        size: u64,
        content: Option<String>,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: strip_extension(file_name).to_string(),
            content: content.unwrap_or_else(|| PENDING_CONTENT.to_string()),
            doc_type: DocumentType::from_file_name(file_name),
            uploaded_at,
            size,
            embedding: None,
        }
    }
}

/// Drop the final `.ext` from a file name. Dotfiles and names ending in a
/// bare dot are returned unchanged.
fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(pos) if pos + 1 == file_name.len() => file_name,
        Some(pos) => &file_name[..pos],
    }
}

/// A document paired with how well it matched a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub document: Document,
    /// Similarity scaled to `[0, 100]`.
    pub relevance_score: f64,
    /// At most two sentences from the content that mention a query term.
    pub highlights: Vec<String>,
    /// Raw similarity fraction in `[0, 1]`.
    pub semantic_similarity: f64,
}

/// Aggregate counters for one search invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryMetrics {
    /// Measured wall-clock time of the scoring pass, in milliseconds.
    pub query_time: f64,
    pub documents_searched: usize,
    pub results_returned: usize,
    /// Mean relevance of the returned results, `0.0` when there are none.
    pub average_relevance: f64,
}

/// Everything one search call hands back to its caller.
///
/// `metrics` is `None` only when the query was blank, which signals
/// "no active search" rather than "nothing matched".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<SearchResult>,
    pub metrics: Option<QueryMetrics>,
}

/// System-wide figures shown on the analytics panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetrics {
    pub total_documents: usize,
    pub total_queries: usize,
    /// Mean query time over recorded searches, in milliseconds.
    pub average_retrieval_time: f64,
    /// Percentage of recorded searches that returned at least one result.
    pub success_rate: f64,
}
