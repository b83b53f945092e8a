//! Caller-owned search state.
//!
//! [`SearchState`] holds what a frontend shows for the current search: the
//! query, its results and metrics, and whether a search is in flight. Every
//! transition returns a new value; nothing is mutated in place.
//!
//! Each [`begin`](SearchState::begin) bumps a generation counter and hands
//! out a [`SearchTicket`]. Completing with a ticket from an older generation
//! leaves the state untouched, so a slow search can never overwrite the
//! results of a newer one.

use crate::models::{QueryMetrics, SearchOutcome, SearchResult};

/// Marker for one in-flight search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
}

impl SearchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    query: String,
    results: Vec<SearchResult>,
    metrics: Option<QueryMetrics>,
    is_loading: bool,
    generation: u64,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn metrics(&self) -> Option<&QueryMetrics> {
        self.metrics.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a search for `query`.
    ///
    /// Previous results stay visible while loading.
    pub fn begin(&self, query: &str) -> (Self, SearchTicket) {
        let generation = self.generation + 1;
        let next = Self {
            query: query.to_string(),
            results: self.results.clone(),
            metrics: self.metrics.clone(),
            is_loading: true,
            generation,
        };
        (next, SearchTicket { generation })
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply the outcome of the search identified by `ticket`.
    ///
    /// Stale tickets return the state unchanged.
    pub fn complete(&self, ticket: SearchTicket, outcome: SearchOutcome) -> Self {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale search outcome"
            );
            return self.clone();
        }
        Self {
            query: self.query.clone(),
            results: outcome.results,
            metrics: outcome.metrics,
            is_loading: false,
            generation: self.generation,
        }
    }

    /// Reset to "no active search". Any outstanding ticket becomes stale.
    pub fn clear(&self) -> Self {
        Self {
            generation: self.generation + 1,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::search;
    use crate::store::demo_corpus;

    #[test]
    fn test_begin_sets_loading_and_keeps_previous_results() {
        let corpus = demo_corpus();
        let (loading, ticket) = SearchState::new().begin("vector");
        let done = loading.complete(ticket, search("vector", &corpus));
        assert!(!done.results().is_empty());

        let (reloading, _) = done.begin("agents");
        assert!(reloading.is_loading());
        assert_eq!(reloading.query(), "agents");
        assert_eq!(reloading.results(), done.results());
        assert_eq!(reloading.generation(), done.generation() + 1);
    }

    #[test]
    fn test_complete_applies_current_outcome() {
        let corpus = demo_corpus();
        let state = SearchState::new();
        let (loading, ticket) = state.begin("language models");
        let outcome = search("language models", &corpus);
        let done = loading.complete(ticket, outcome.clone());

        assert!(!done.is_loading());
        assert_eq!(done.results(), outcome.results.as_slice());
        assert_eq!(done.metrics(), outcome.metrics.as_ref());
        // `state` itself is untouched.
        assert_eq!(state, SearchState::new());
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let corpus = demo_corpus();
        let (first, old_ticket) = SearchState::new().begin("vector");
        let (second, new_ticket) = first.begin("agents");

        let after_stale = second.complete(old_ticket, search("vector", &corpus));
        assert_eq!(after_stale, second);
        assert!(after_stale.is_loading());
        assert!(!after_stale.is_current(old_ticket));

        let done = after_stale.complete(new_ticket, search("agents", &corpus));
        assert_eq!(done.results()[0].document.id, "3");
    }

    #[test]
    fn test_blank_query_clears_metrics() {
        let corpus = demo_corpus();
        let (s, t) = SearchState::new().begin("vector");
        let s = s.complete(t, search("vector", &corpus));
        assert!(s.metrics().is_some());

        let (s, t) = s.begin("   ");
        let s = s.complete(t, search("   ", &corpus));
        assert!(s.results().is_empty());
        assert!(s.metrics().is_none());
    }

    #[test]
    fn test_clear_invalidates_in_flight_ticket() {
        let corpus = demo_corpus();
        let (loading, ticket) = SearchState::new().begin("vector");
        let cleared = loading.clear();
        assert!(!cleared.is_loading());
        assert!(cleared.results().is_empty());

        let after = cleared.complete(ticket, search("vector", &corpus));
        assert!(after.results().is_empty());
    }
}
