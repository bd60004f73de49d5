//! Bounded undo/redo over full-text snapshots.

use tracing::trace;

/// Default number of snapshots retained in undo history.
pub const HISTORY_MAX: usize = 100;

/// Undo/redo stacks over whole-buffer snapshots.
///
/// The undo stack always holds at least one entry: the empty-string baseline
/// pushed at construction. Undo never pops past it, so "undo everything"
/// lands on an empty buffer rather than an empty stack. Past the cap the
/// oldest snapshot (index 0) is evicted; the current top never is.
///
/// The replay flag suppresses `record` while undo/redo programmatically
/// rewrite the buffer, so restoring text is not itself misrecorded as a new
/// edit.
#[derive(Debug)]
pub struct HistoryEngine {
    undo_stack: Vec<String>,
    redo_stack: Vec<String>,
    cap: usize,
    replaying: bool,
}

impl Default for HistoryEngine {
    fn default() -> Self {
        Self::new(HISTORY_MAX)
    }
}

impl HistoryEngine {
    pub fn new(cap: usize) -> Self {
        Self {
            undo_stack: vec![String::new()],
            redo_stack: Vec::new(),
            cap: cap.max(1),
            replaying: false,
        }
    }

    pub fn depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Whether undo would restore anything (the baseline cannot be undone
    /// past).
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn is_replaying(&self) -> bool {
        self.replaying
    }

    /// Enter replay mode: `record` becomes a no-op until `end_replay`.
    pub fn begin_replay(&mut self) {
        self.replaying = true;
    }

    pub fn end_replay(&mut self) {
        self.replaying = false;
    }

    /// Push a snapshot of `text` and clear the redo stack. Suppressed during
    /// replay. Evicts the oldest snapshot when the cap is exceeded.
    pub fn record(&mut self, text: &str) {
        if self.replaying {
            trace!(target: "state.history", "record_suppressed_during_replay");
            return;
        }
        self.undo_stack.push(text.to_owned());
        if self.undo_stack.len() > self.cap {
            self.undo_stack.remove(0);
            trace!(target: "state.history", cap = self.cap, "undo_stack_trimmed");
        }
        self.redo_stack.clear();
        trace!(
            target: "state.history",
            undo_depth = self.undo_stack.len(),
            bytes = text.len(),
            "record"
        );
    }

    /// Pop the current snapshot onto the redo stack and return the text to
    /// restore. `None` at the baseline.
    pub fn undo(&mut self) -> Option<String> {
        if self.undo_stack.len() <= 1 {
            return None;
        }
        let top = self.undo_stack.pop()?;
        self.redo_stack.push(top);
        let restored = self.undo_stack.last().cloned();
        trace!(
            target: "state.history",
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "undo"
        );
        restored
    }

    /// Pop the redo stack back onto undo and return the text to restore.
    /// `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<String> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(next.clone());
        trace!(
            target: "state.history",
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "redo"
        );
        Some(next)
    }

    /// Reset to the session baseline: `[""]` undo, empty redo.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.undo_stack.push(String::new());
        self.redo_stack.clear();
        trace!(target: "state.history", "cleared");
    }
}
