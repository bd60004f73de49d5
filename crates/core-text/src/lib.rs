//! Rope-based text buffer abstraction.

use ropey::Rope;

pub mod token;

pub use token::{TextStats, stats, tokenize};

/// The edited artifact: a single mutable text owned by the session.
///
/// Backed by a `ropey::Rope` so whole-content replacement (undo/redo restore)
/// and mid-text splicing (find/replace) stay cheap for large inputs. Snapshot
/// material for the history engine is produced by [`Buffer::content`].
#[derive(Clone, Default)]
pub struct Buffer {
    rope: Rope,
}

impl Buffer {
    /// Construct an empty buffer (the session baseline).
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Construct a buffer from an in-memory string slice.
    pub fn from_str(content: &str) -> Self {
        Self {
            rope: Rope::from_str(content),
        }
    }

    /// Materialize the full contents as an owned `String`.
    pub fn content(&self) -> String {
        self.rope.to_string()
    }

    /// Replace the full contents.
    pub fn set_content(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    pub fn byte_len(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Number of lines as reported by `str::lines` (empty buffer has zero).
    pub fn line_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let lines = self.rope.len_lines();
        // ropey counts a phantom line after a trailing newline.
        if self.rope.char(self.rope.len_chars() - 1) == '\n' {
            lines - 1
        } else {
            lines
        }
    }

    /// Replace the byte range `start..end` with `replacement`.
    ///
    /// Both offsets must lie on char boundaries; match spans produced by the
    /// find engine always do.
    pub fn splice(&mut self, start: usize, end: usize, replacement: &str) {
        debug_assert!(start <= end && end <= self.rope.len_bytes());
        let char_start = self.rope.byte_to_char(start);
        let char_end = self.rope.byte_to_char(end);
        self.rope.remove(char_start..char_end);
        self.rope.insert(char_start, replacement);
    }
}
