//! Session analytics: query counters and corpus breakdowns.
//!
//! [`Analytics`] accumulates the [`QueryMetrics`] of completed searches and
//! condenses them into [`SystemMetrics`]. Blank queries produce no metrics
//! and are never recorded.

use serde::Serialize;

use crate::models::{Document, DocumentType, QueryMetrics, SystemMetrics};

#[derive(Debug, Clone, Default)]
pub struct Analytics {
    queries: usize,
    successful: usize,
    total_query_time: f64,
}

impl Analytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, metrics: &QueryMetrics) {
        self.queries += 1;
        if metrics.results_returned > 0 {
            self.successful += 1;
        }
        self.total_query_time += metrics.query_time;
    }

    pub fn total_queries(&self) -> usize {
        self.queries
    }

    /// Summarize recorded queries against a corpus of `total_documents`.
    pub fn snapshot(&self, total_documents: usize) -> SystemMetrics {
        let (average_retrieval_time, success_rate) = if self.queries == 0 {
            (0.0, 0.0)
        } else {
            let n = self.queries as f64;
            (self.total_query_time / n, self.successful as f64 * 100.0 / n)
        };
        SystemMetrics {
            total_documents,
            total_queries: self.queries,
            average_retrieval_time,
            success_rate,
        }
    }
}

/// Document count and total size for one file kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeStats {
    pub doc_type: DocumentType,
    pub count: usize,
    pub bytes: u64,
}

/// Per-kind breakdown of `docs`. Every kind is listed, in declaration order,
/// even when it has no documents.
pub fn type_breakdown(docs: &[Document]) -> Vec<TypeStats> {
    DocumentType::ALL
        .iter()
        .map(|&doc_type| {
            let (count, bytes) = docs
                .iter()
                .filter(|d| d.doc_type == doc_type)
                .fold((0, 0), |(count, bytes), d| (count + 1, bytes + d.size));
            TypeStats {
                doc_type,
                count,
                bytes,
            }
        })
        .collect()
}
