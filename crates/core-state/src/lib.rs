//! Session controller: the single owner of all visualizer state.
//!
//! Every piece of shared state (buffer, history, token sequence, search
//! history, find state, highlight set) lives behind one `Session` value.
//! Operations are synchronous and run to completion; the only reentrancy
//! guard needed anywhere is the history engine's replay flag, which keeps a
//! programmatic buffer rewrite (undo/redo) from being misrecorded as a user
//! edit. Callers in threaded hosts must confine the session to one logical
//! owner; nothing here locks.
//!
//! Data flow per edit: record snapshot -> rewrite buffer -> retokenize ->
//! next `layout` call sees the new sequence. Token and layout state are
//! recomputed wholesale on every change, never patched incrementally.

use core_config::{Config, LimitsConfig};
use core_model::{LayoutModel, StructureInfo, StructureKind, Viewport};
use core_search::{FindReplaceState, SearchHistory, search_tokens};
use core_text::Buffer;
use std::collections::HashSet;
use tracing::{debug, trace};

pub mod undo;

pub use undo::{HISTORY_MAX, HistoryEngine};

// Re-exported so callers of the session surface need only this crate.
pub use core_search::{FindStatus, ReplaceError, SearchHistoryEntry};

/// Result of an edit, carrying what the caller's footer and views need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUpdate {
    /// Grapheme clusters in the buffer.
    pub char_count: usize,
    pub word_count: usize,
    pub line_count: usize,
    /// The recomputed (capped) token sequence.
    pub tokens: Vec<String>,
}

pub struct Session {
    buffer: Buffer,
    history: HistoryEngine,
    kind: StructureKind,
    tokens: Vec<String>,
    /// Token indices highlighted by the last token search; consumed by
    /// every layout pass until the next edit clears them.
    highlights: HashSet<usize>,
    search_history: SearchHistory,
    find: FindReplaceState,
    limits: LimitsConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(LimitsConfig::default(), StructureKind::default())
    }
}

impl Session {
    pub fn new(limits: LimitsConfig, kind: StructureKind) -> Self {
        let limits = limits.clamped();
        Self {
            buffer: Buffer::new(),
            history: HistoryEngine::new(limits.history_cap),
            kind,
            tokens: Vec::new(),
            highlights: HashSet::new(),
            search_history: SearchHistory::new(limits.search_history_cap),
            find: FindReplaceState::new(),
            limits,
        }
    }

    /// Build a session from loaded configuration. An unknown structure name
    /// in the config falls back to the default kind.
    pub fn from_config(config: &Config) -> Self {
        let kind =
            StructureKind::parse(config.default_structure()).unwrap_or_default();
        Self::new(config.limits(), kind)
    }

    // ----- edits and history ---------------------------------------------

    /// Record and apply a user edit; returns the recomputed counts and
    /// token sequence.
    pub fn on_text_changed(&mut self, new_text: &str) -> TextUpdate {
        trace!(target: "state.session", bytes = new_text.len(), "text_changed");
        let update = self.apply_text(new_text);
        self.refresh_find();
        update
    }

    /// Step the buffer back one snapshot. `None` at the baseline floor.
    pub fn undo(&mut self) -> Option<String> {
        let restored = self.history.undo()?;
        self.replay(&restored);
        Some(restored)
    }

    /// Re-apply the most recently undone snapshot. `None` when the redo
    /// stack is empty.
    pub fn redo(&mut self) -> Option<String> {
        let restored = self.history.redo()?;
        self.replay(&restored);
        Some(restored)
    }

    /// Reset everything to the session baseline: empty buffer, `[""]`
    /// history, no tokens, no search history, no find state.
    pub fn clear(&mut self) {
        debug!(target: "state.session", "session_cleared");
        self.buffer.set_content("");
        self.history.clear();
        self.tokens.clear();
        self.highlights.clear();
        self.search_history.clear();
        self.find = FindReplaceState::new();
    }

    /// Rewrite the buffer and derived state without recording a snapshot.
    fn replay(&mut self, text: &str) {
        self.history.begin_replay();
        self.apply_text(text);
        self.history.end_replay();
        self.refresh_find();
    }

    /// Shared tail of every buffer rewrite: snapshot (unless replaying),
    /// store, retokenize, drop now-stale highlights.
    fn apply_text(&mut self, text: &str) -> TextUpdate {
        self.history.record(text);
        self.buffer.set_content(text);
        self.tokens = core_text::tokenize(text, self.limits.max_tokens);
        self.highlights.clear();
        let stats = core_text::stats(text);
        TextUpdate {
            char_count: stats.chars,
            word_count: stats.words,
            line_count: stats.lines,
            tokens: self.tokens.clone(),
        }
    }

    /// An edit supersedes pending match state: offsets may have shifted, so
    /// rescan from scratch rather than patch.
    fn refresh_find(&mut self) {
        if !self.find.query().is_empty() {
            self.find.rescan(&self.buffer.content());
        }
    }

    // ----- structure and layout ------------------------------------------

    pub fn set_structure_kind(&mut self, kind: StructureKind) {
        trace!(target: "state.session", ?kind, "structure_kind_set");
        self.kind = kind;
    }

    pub fn structure_kind(&self) -> StructureKind {
        self.kind
    }

    pub fn structure_info(&self) -> StructureInfo {
        self.kind.info()
    }

    /// One layout pass over the current token sequence. Pure with respect to
    /// session state; the highlight flags are derived fresh each call.
    pub fn layout(&self, viewport: Option<Viewport>) -> LayoutModel {
        core_model::layout(&self.tokens, self.kind, viewport, &self.highlights)
    }

    // ----- token search ---------------------------------------------------

    /// Case-insensitive substring search over the token sequence. Matching
    /// indices become the highlight set for subsequent layout passes. A
    /// blank query is a normal empty result and is not recorded in history.
    pub fn search(&mut self, query: &str) -> Vec<usize> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let hits = search_tokens(&self.tokens, query);
        self.search_history.record(query, hits.len());
        self.highlights = hits.iter().copied().collect();
        trace!(target: "state.session", query, hits = hits.len(), "token_search");
        hits
    }

    /// Past searches, oldest first (the most recent entry is last).
    pub fn search_history(&self) -> &SearchHistory {
        &self.search_history
    }

    // ----- find/replace ---------------------------------------------------

    /// Show or hide the find/replace panel; hiding drops find state.
    pub fn toggle_find_replace(&mut self) -> bool {
        self.find.toggle()
    }

    pub fn update_find_query(&mut self, query: &str) -> FindStatus {
        self.find.update_query(&self.buffer.content(), query)
    }

    pub fn find_next(&mut self) -> FindStatus {
        self.find.next(&self.buffer.content())
    }

    pub fn find_previous(&mut self) -> FindStatus {
        self.find.previous(&self.buffer.content())
    }

    pub fn find_status(&self) -> FindStatus {
        self.find.status()
    }

    /// Replace the currently selected match, feed the new text back through
    /// history and tokenization, then rescan (offsets shift, so a full
    /// rescan is required and correct).
    pub fn replace_current(&mut self, replacement: &str) -> Result<FindStatus, ReplaceError> {
        let span = self.find.current_for_replace()?;
        self.buffer.splice(span.start, span.end, replacement);
        let text = self.buffer.content();
        self.apply_text(&text);
        Ok(self.find.rescan(&text))
    }

    /// Replace every match in one pass and clear match state. The
    /// replacement text is never re-matched against its own output.
    pub fn replace_all(&mut self, replacement: &str) -> Result<FindStatus, ReplaceError> {
        let text = self.buffer.content();
        let new_text = self.find.replace_all(&text, replacement)?;
        self.apply_text(&new_text);
        Ok(self.find.status())
    }

    // ----- accessors ------------------------------------------------------

    pub fn text(&self) -> String {
        self.buffer.content()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn highlights(&self) -> &HashSet<usize> {
        &self.highlights
    }

    pub fn undo_depth(&self) -> usize {
        self.history.depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn limits(&self) -> LimitsConfig {
        self.limits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_updates_counts_and_tokens() {
        let mut session = Session::default();
        let update = session.on_text_changed("  a   b  ");
        assert_eq!(update.tokens, vec!["a", "b"]);
        assert_eq!(update.word_count, 2);
        assert_eq!(session.tokens(), ["a", "b"]);
    }

    #[test]
    fn undo_restores_prior_buffer_and_tokens() {
        let mut session = Session::default();
        session.on_text_changed("one");
        session.on_text_changed("one two");
        assert_eq!(session.undo().as_deref(), Some("one"));
        assert_eq!(session.text(), "one");
        assert_eq!(session.tokens(), ["one"]);
        // Programmatic rewrite was not recorded as a new edit.
        assert!(session.can_redo());
        assert_eq!(session.redo().as_deref(), Some("one two"));
        assert_eq!(session.tokens(), ["one", "two"]);
    }

    #[test]
    fn new_edit_after_undo_clears_redo() {
        let mut session = Session::default();
        session.on_text_changed("a");
        session.on_text_changed("b");
        session.undo();
        assert!(session.can_redo());
        session.on_text_changed("c");
        assert!(!session.can_redo());
        assert_eq!(session.redo(), None);
    }

    #[test]
    fn search_sets_highlights_for_layout() {
        let mut session = Session::default();
        session.on_text_changed("cat dog Cat");
        assert_eq!(session.search("cat"), vec![0, 2]);
        let model = session.layout(None);
        let highlighted: Vec<usize> = model
            .nodes
            .iter()
            .filter(|n| n.highlighted)
            .map(|n| n.token_index)
            .collect();
        assert_eq!(highlighted.len(), 2);
        assert!(highlighted.contains(&0) && highlighted.contains(&2));
    }

    #[test]
    fn edits_clear_highlights() {
        let mut session = Session::default();
        session.on_text_changed("cat dog");
        session.search("cat");
        assert!(!session.highlights().is_empty());
        session.on_text_changed("cat dog bird");
        assert!(session.highlights().is_empty());
    }

    #[test]
    fn blank_search_is_not_recorded() {
        let mut session = Session::default();
        session.on_text_changed("cat");
        assert!(session.search("   ").is_empty());
        assert!(session.search_history().is_empty());
        session.search("cat");
        assert_eq!(session.search_history().len(), 1);
    }

    #[test]
    fn clear_resets_everything() {
        let mut session = Session::default();
        session.on_text_changed("a b c");
        session.search("a");
        session.toggle_find_replace();
        session.update_find_query("a");
        session.clear();
        assert_eq!(session.text(), "");
        assert!(session.tokens().is_empty());
        assert!(session.search_history().is_empty());
        assert_eq!(session.find_status(), FindStatus::default());
        assert!(!session.can_undo());
        assert!(!session.can_redo());
        assert!(session.layout(None).is_empty());
    }

    #[test]
    fn config_defaults_drive_session() {
        let config = Config::default();
        let session = Session::from_config(&config);
        assert_eq!(session.structure_kind(), StructureKind::Stack);
        assert_eq!(session.limits().max_tokens, 30);
    }
}
