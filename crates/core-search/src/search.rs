//! Token search and the bounded search-query history.

use std::collections::VecDeque;
use std::time::SystemTime;
use tracing::trace;

/// Default number of recent searches retained.
pub const SEARCH_HISTORY_MAX: usize = 5;

/// Case-insensitive substring match of `query` against every token.
///
/// Returns the ordered list of matching token indices. An empty result is a
/// normal outcome, not an error; an empty (or whitespace-only) query matches
/// nothing. Pure function.
pub fn search_tokens(tokens: &[String], query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| token.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}

/// One past search and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHistoryEntry {
    pub query: String,
    pub timestamp: SystemTime,
    pub match_count: usize,
}

/// Bounded FIFO of the most recent searches. No dedup: repeating a query
/// appends a fresh entry; the oldest entry is evicted past the cap.
#[derive(Debug)]
pub struct SearchHistory {
    entries: VecDeque<SearchHistoryEntry>,
    cap: usize,
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(SEARCH_HISTORY_MAX)
    }
}

impl SearchHistory {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap.min(64)),
            cap: cap.max(1),
        }
    }

    /// Append an entry, evicting the oldest when over the cap.
    pub fn record(&mut self, query: &str, match_count: usize) {
        self.entries.push_back(SearchHistoryEntry {
            query: query.to_owned(),
            timestamp: SystemTime::now(),
            match_count,
        });
        if self.entries.len() > self.cap {
            self.entries.pop_front();
            trace!(target: "search.history", cap = self.cap, "history_evicted_oldest");
        }
    }

    /// Entries ordered oldest to newest (the most recent search is last).
    pub fn entries(&self) -> impl Iterator<Item = &SearchHistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn search_is_case_insensitive() {
        let tokens = toks(&["cat", "dog", "Cat"]);
        assert_eq!(search_tokens(&tokens, "cat"), vec![0, 2]);
        assert_eq!(search_tokens(&tokens, "CAT"), vec![0, 2]);
    }

    #[test]
    fn search_matches_substrings() {
        let tokens = toks(&["catalog", "dog", "concat"]);
        assert_eq!(search_tokens(&tokens, "cat"), vec![0, 2]);
    }

    #[test]
    fn no_hit_and_empty_query_are_empty_results() {
        let tokens = toks(&["cat", "dog"]);
        assert!(search_tokens(&tokens, "bird").is_empty());
        assert!(search_tokens(&tokens, "").is_empty());
        assert!(search_tokens(&tokens, "   ").is_empty());
        assert!(search_tokens(&[], "cat").is_empty());
    }

    #[test]
    fn history_evicts_oldest_past_cap() {
        let mut history = SearchHistory::new(3);
        for q in ["a", "b", "c", "d"] {
            history.record(q, 0);
        }
        let queries: Vec<&str> = history.entries().map(|e| e.query.as_str()).collect();
        assert_eq!(queries, vec!["b", "c", "d"]);
    }

    #[test]
    fn history_keeps_duplicates() {
        let mut history = SearchHistory::new(5);
        history.record("x", 1);
        history.record("x", 2);
        assert_eq!(history.len(), 2);
        let counts: Vec<usize> = history.entries().map(|e| e.match_count).collect();
        assert_eq!(counts, vec![1, 2]);
    }
}
