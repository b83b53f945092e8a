//! Lexical relevance scoring over an in-memory corpus.
//!
//! The scorer is a pure function of a query and a slice of documents. The
//! async [`run_search`] entry point only adds the trip through a
//! [`DocumentStore`] to fetch the corpus.
//!
//! # Scoring Algorithm
//!
//! 1. A blank query short-circuits to an empty outcome with no metrics.
//! 2. The query is case-folded and split on whitespace; terms of two
//!    characters or fewer are discarded.
//! 3. For each document: `similarity = matched_terms / total_terms`, where a
//!    term matches if any whitespace-separated content word contains it as a
//!    substring. With no qualifying terms the similarity is `0.0`.
//! 4. `relevance = similarity × 100`.
//! 5. Highlights are the first two `.`-separated sentences that mention any
//!    term, trimmed.
//! 6. Documents scoring `≤ 20` are dropped.
//! 7. The rest are stable-sorted by relevance (desc), so ties keep corpus order.

use std::time::Instant;

use anyhow::Result;

use crate::models::{Document, QueryMetrics, SearchOutcome, SearchResult};
use crate::store::DocumentStore;

/// Results at or below this relevance are never returned.
pub const RELEVANCE_THRESHOLD: f64 = 20.0;

/// Query terms must be longer than this many characters to count.
pub const MIN_TERM_LEN: usize = 2;

/// Maximum highlighted sentences per result.
pub const MAX_HIGHLIGHTS: usize = 2;

/// Case-fold and split a query, keeping terms longer than [`MIN_TERM_LEN`].
///
/// Repeated terms are kept; each occurrence counts toward the similarity
/// denominator.
pub fn query_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|term| term.chars().count() > MIN_TERM_LEN)
        .map(String::from)
        .collect()
}

/// Fraction of `terms` found inside some word of `content`, in `[0, 1]`.
///
/// Returns `0.0` for an empty term list instead of dividing by zero.
pub fn similarity(terms: &[String], content: &str) -> f64 {
    if terms.is_empty() {
        return 0.0;
    }

    let content_lower = content.to_lowercase();
    let words: Vec<&str> = content_lower.split_whitespace().collect();

    let matched = terms
        .iter()
        .filter(|term| words.iter().any(|word| word.contains(term.as_str())))
        .count();

    matched as f64 / terms.len() as f64
}

/// Up to [`MAX_HIGHLIGHTS`] sentences of `content` mentioning any term.
pub fn highlights(content: &str, terms: &[String]) -> Vec<String> {
    content
        .split('.')
        .filter(|sentence| !sentence.trim().is_empty())
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            terms.iter().any(|term| lower.contains(term.as_str()))
        })
        .take(MAX_HIGHLIGHTS)
        .map(|sentence| sentence.trim().to_string())
        .collect()
}

/// Score every document in `corpus` against `query`.
///
/// A blank query yields an empty [`SearchOutcome`] with `metrics: None`.
/// Any other query yields metrics, even when nothing passes the threshold.
pub fn search(query: &str, corpus: &[Document]) -> SearchOutcome {
    if query.trim().is_empty() {
        return SearchOutcome::default();
    }

    let started = Instant::now();
    let terms = query_terms(query);

    let mut results: Vec<SearchResult> = corpus
        .iter()
        .filter_map(|doc| {
            let sim = similarity(&terms, &doc.content);
            let relevance_score = sim * 100.0;
            if relevance_score <= RELEVANCE_THRESHOLD {
                return None;
            }
            Some(SearchResult {
                document: doc.clone(),
                relevance_score,
                highlights: highlights(&doc.content, &terms),
                semantic_similarity: sim,
            })
        })
        .collect();

    // `sort_by` is stable: equal scores stay in corpus order.
    results.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));

    let average_relevance = if results.is_empty() {
        0.0
    } else {
        results.iter().map(|r| r.relevance_score).sum::<f64>() / results.len() as f64
    };

    let metrics = QueryMetrics {
        query_time: started.elapsed().as_secs_f64() * 1000.0,
        documents_searched: corpus.len(),
        results_returned: results.len(),
        average_relevance,
    };

    tracing::debug!(
        terms = terms.len(),
        searched = metrics.documents_searched,
        returned = metrics.results_returned,
        query_time_ms = metrics.query_time,
        "search completed"
    );

    SearchOutcome {
        results,
        metrics: Some(metrics),
    }
}

/// Fetch the corpus from `store` and run [`search`] over it.
///
/// This is the entry point every frontend (CLI command, interactive shell)
/// delegates to.
pub async fn run_search<S: DocumentStore + ?Sized>(store: &S, query: &str) -> Result<SearchOutcome> {
    if query.trim().is_empty() {
        return Ok(SearchOutcome::default());
    }
    let corpus = store.list_documents().await?;
    Ok(search(query, &corpus))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentType;
    use crate::store::memory::InMemoryStore;
    use crate::store::{demo_corpus, DocumentStore};
    use chrono::Utc;

    fn make_doc(id: &str, content: &str) -> Document {
        Document {
            id: id.to_string(),
            title: format!("Doc {}", id),
            content: content.to_string(),
            doc_type: DocumentType::Txt,
            uploaded_at: Utc::now(),
            size: content.len() as u64,
            embedding: None,
        }
    }

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_query_terms_drop_short_tokens() {
        assert_eq!(
            query_terms("  Vector  DB in   Rust "),
            vec!["vector".to_string(), "rust".to_string()]
        );
        assert!(query_terms("to of in").is_empty());
    }

    #[test]
    fn test_query_terms_count_chars_not_bytes() {
        // Two characters, four bytes.
        assert!(query_terms("éé").is_empty());
        assert_eq!(query_terms("ééé"), vec!["ééé".to_string()]);
    }

    #[test]
    fn test_similarity_substring_match() {
        let sim = similarity(&terms(&["time"]), "TimescaleDB handles time-series data");
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_partial() {
        let sim = similarity(
            &terms(&["vector", "graph", "search"]),
            "Vector embeddings power semantic search.",
        );
        assert!((sim - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_no_terms_is_zero() {
        let sim = similarity(&[], "anything at all");
        assert_eq!(sim, 0.0);
        assert!(!sim.is_nan());
    }

    #[test]
    fn test_highlights_first_two_matching_sentences() {
        let content = "Agents plan. Nothing here. Agents act.  Agents reflect. ";
        let hl = highlights(content, &terms(&["agents"]));
        assert_eq!(hl, vec!["Agents plan".to_string(), "Agents act".to_string()]);
    }

    #[test]
    fn test_highlights_case_insensitive() {
        let hl = highlights("POSTGRESQL is the base. Other text.", &terms(&["postgresql"]));
        assert_eq!(hl, vec!["POSTGRESQL is the base".to_string()]);
    }

    #[test]
    fn test_empty_query_has_no_metrics() {
        let corpus = vec![make_doc("1", "some content")];
        for q in ["", "   ", "\t\n"] {
            let outcome = search(q, &corpus);
            assert!(outcome.results.is_empty());
            assert!(outcome.metrics.is_none());
        }
    }

    #[test]
    fn test_short_token_query_returns_nothing() {
        let corpus = vec![make_doc("1", "to be or not to be, of it in on"), make_doc("2", "in of to")];
        let outcome = search("to of in", &corpus);
        assert!(outcome.results.is_empty());
        let metrics = outcome.metrics.unwrap();
        assert_eq!(metrics.documents_searched, 2);
        assert_eq!(metrics.results_returned, 0);
        assert_eq!(metrics.average_relevance, 0.0);
    }

    #[test]
    fn test_single_document_half_match() {
        let corpus = vec![make_doc("1", "TimescaleDB is a time-series database...")];
        let outcome = search("TimescaleDB performance", &corpus);
        assert_eq!(outcome.results.len(), 1);

        let r = &outcome.results[0];
        assert!((r.semantic_similarity - 0.5).abs() < 1e-9);
        assert!((r.relevance_score - 50.0).abs() < 1e-9);
        assert_eq!(r.highlights.len(), 1);
        assert!(r.highlights[0].contains("TimescaleDB"));
    }

    #[test]
    fn test_threshold_excludes_twenty_and_below() {
        // One of five terms matches: exactly 20, must be dropped.
        let corpus = vec![make_doc("1", "alpha")];
        let outcome = search("alpha bravo charlie delta echo", &corpus);
        assert!(outcome.results.is_empty());

        // One of four: 25, kept.
        let outcome = search("alpha bravo charlie delta", &corpus);
        assert_eq!(outcome.results.len(), 1);
        for r in &outcome.results {
            assert!(r.relevance_score > RELEVANCE_THRESHOLD);
        }
    }

    #[test]
    fn test_results_sorted_descending() {
        let corpus = vec![
            make_doc("low", "rust"),
            make_doc("high", "rust tokio serde"),
            make_doc("mid", "rust tokio"),
        ];
        let outcome = search("rust tokio serde", &corpus);
        let ids: Vec<&str> = outcome.results.iter().map(|r| r.document.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let corpus = vec![
            make_doc("a", "cache layer"),
            make_doc("b", "nothing relevant"),
            make_doc("c", "another cache"),
            make_doc("d", "cache again"),
        ];
        let outcome = search("cache", &corpus);
        let ids: Vec<&str> = outcome.results.iter().map(|r| r.document.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_metrics_invariants() {
        let corpus = vec![
            make_doc("1", "rust tokio"),
            make_doc("2", "rust"),
            make_doc("3", "python"),
        ];
        let outcome = search("rust tokio", &corpus);
        let metrics = outcome.metrics.as_ref().unwrap();

        assert_eq!(metrics.documents_searched, corpus.len());
        assert_eq!(metrics.results_returned, outcome.results.len());
        let mean = outcome.results.iter().map(|r| r.relevance_score).sum::<f64>()
            / outcome.results.len() as f64;
        assert!((metrics.average_relevance - mean).abs() < 1e-9);
        assert!((metrics.average_relevance - 75.0).abs() < 1e-9);
        assert!(metrics.query_time >= 0.0);
    }

    #[test]
    fn test_demo_corpus_timescale_query() {
        let corpus = demo_corpus();
        let outcome = search("TimescaleDB performance", &corpus);
        let top = &outcome.results[0];
        assert_eq!(top.document.id, "1");
        assert!((top.relevance_score - 100.0).abs() < 1e-9);
        assert_eq!(top.highlights.len(), 2);
    }

    #[tokio::test]
    async fn test_run_search_through_store() {
        let store = InMemoryStore::with_documents(demo_corpus());
        let outcome = run_search(&store, "semantic similarity").await.unwrap();
        assert_eq!(outcome.results[0].document.id, "2");
        let metrics = outcome.metrics.unwrap();
        assert_eq!(metrics.documents_searched, store.len().await.unwrap());
    }

    #[tokio::test]
    async fn test_run_search_blank_query_skips_store() {
        let store = InMemoryStore::new();
        let outcome = run_search(&store, "  ").await.unwrap();
        assert_eq!(outcome, SearchOutcome::default());
    }
}
