//! Find/replace state machine over raw buffer text.
//!
//! Queries are literal substrings matched with per-char case folding; regex
//! syntax in a query has no special meaning. Matches are non-overlapping,
//! scanned left to right, and addressed by byte offsets into the text that
//! was scanned. Any edit invalidates the spans, so the session re-runs the
//! scan after every text change instead of patching offsets.

use thiserror::Error;
use tracing::trace;

/// A contiguous range of the scanned text matching the query.
/// `start..end` is half-open, in bytes, always on char boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
    /// The text as it appeared in the buffer (original casing).
    pub text: String,
}

/// Snapshot of find state returned to the caller for feedback rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FindStatus {
    pub match_count: usize,
    /// Index into the match list, `None` when there is no selection.
    pub current_index: Option<usize>,
}

/// Invalid-operation conditions. State is left unchanged when these occur.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplaceError {
    #[error("no match selected")]
    NoMatchSelected,
    #[error("find query is empty")]
    EmptyQuery,
    #[error("no matches to replace")]
    NoMatches,
}

/// Byte length of a case-folded match of `query` at the start of `rest`, if
/// one exists.
fn match_len_at(rest: &str, query: &str) -> Option<usize> {
    let mut rest_chars = rest.char_indices();
    let mut consumed = 0;
    for qc in query.chars() {
        let (idx, rc) = rest_chars.next()?;
        if rc != qc && !rc.to_lowercase().eq(qc.to_lowercase()) {
            return None;
        }
        consumed = idx + rc.len_utf8();
    }
    Some(consumed)
}

/// Scan `text` for all non-overlapping case-insensitive occurrences of the
/// literal `query`, ordered by start offset. Empty query yields no matches.
pub fn find_matches(text: &str, query: &str) -> Vec<MatchSpan> {
    if query.is_empty() {
        return Vec::new();
    }
    let mut matches = Vec::new();
    let mut at = 0;
    while at < text.len() {
        if let Some(len) = match_len_at(&text[at..], query) {
            matches.push(MatchSpan {
                start: at,
                end: at + len,
                text: text[at..at + len].to_owned(),
            });
            at += len;
        } else {
            at += text[at..].chars().next().map_or(1, char::len_utf8);
        }
    }
    matches
}

/// Single-pass literal substitution: every match of `query` becomes
/// `replacement`, and the replacement text is never re-matched against.
/// Returns the new text and the number of substitutions.
pub fn replace_all_matches(text: &str, query: &str, replacement: &str) -> (String, usize) {
    let matches = find_matches(text, query);
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in &matches {
        out.push_str(&text[last..m.start]);
        out.push_str(replacement);
        last = m.end;
    }
    out.push_str(&text[last..]);
    (out, matches.len())
}

/// Match list plus the cyclic current-match cursor, driven by the session.
///
/// The panel-visibility flag lives here too so the session surface can expose
/// a single toggle; closing the panel drops all match state.
#[derive(Debug, Default)]
pub struct FindReplaceState {
    query: String,
    matches: Vec<MatchSpan>,
    current: Option<usize>,
    active: bool,
}

impl FindReplaceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status(&self) -> FindStatus {
        FindStatus {
            match_count: self.matches.len(),
            current_index: self.current,
        }
    }

    pub fn current_span(&self) -> Option<&MatchSpan> {
        self.current.and_then(|i| self.matches.get(i))
    }

    /// Show/hide the find panel. Hiding clears the query and all match state.
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        if !self.active {
            self.query.clear();
            self.matches.clear();
            self.current = None;
        }
        self.active
    }

    /// Set the query and scan `text`. An empty query clears the match list
    /// and deselects; otherwise the first match (if any) becomes current.
    pub fn update_query(&mut self, text: &str, query: &str) -> FindStatus {
        self.query = query.to_owned();
        self.rescan(text)
    }

    /// Re-run the scan with the stored query, e.g. after the text changed
    /// underneath the match list.
    pub fn rescan(&mut self, text: &str) -> FindStatus {
        if self.query.is_empty() {
            self.matches.clear();
            self.current = None;
        } else {
            self.matches = find_matches(text, &self.query);
            self.current = if self.matches.is_empty() { None } else { Some(0) };
        }
        trace!(
            target: "search.find",
            query = %self.query,
            matches = self.matches.len(),
            "rescan"
        );
        self.status()
    }

    /// Advance the current match cyclically. With no match list (stale or
    /// never scanned) this performs a fresh rescan instead.
    pub fn next(&mut self, text: &str) -> FindStatus {
        match self.current {
            Some(i) => {
                self.current = Some((i + 1) % self.matches.len());
                self.status()
            }
            None => self.rescan(text),
        }
    }

    /// Retreat the current match cyclically; rescan when there is none.
    pub fn previous(&mut self, text: &str) -> FindStatus {
        match self.current {
            Some(i) => {
                let n = self.matches.len();
                self.current = Some((i + n - 1) % n);
                self.status()
            }
            None => self.rescan(text),
        }
    }

    /// The span the session should splice for replace-current.
    pub fn current_for_replace(&self) -> Result<MatchSpan, ReplaceError> {
        self.current_span().cloned().ok_or(ReplaceError::NoMatchSelected)
    }

    /// Global substitution over `text`. Requires a non-empty query and at
    /// least one match (rescans first in case the list is stale); on success
    /// clears the match state and returns the new text.
    pub fn replace_all(&mut self, text: &str, replacement: &str) -> Result<String, ReplaceError> {
        if self.query.is_empty() {
            return Err(ReplaceError::EmptyQuery);
        }
        self.rescan(text);
        if self.matches.is_empty() {
            return Err(ReplaceError::NoMatches);
        }
        let (new_text, count) = replace_all_matches(text, &self.query, replacement);
        trace!(target: "search.find", count, "replace_all");
        self.matches.clear();
        self.current = None;
        Ok(new_text)
    }
}
