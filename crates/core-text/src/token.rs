//! Tokenization and per-edit text statistics.
//!
//! A token is a whitespace-delimited unit of the buffer, the atomic item the
//! layout engine positions as one node. The sequence is capped so dense input
//! degrades to a truncated view instead of an unreadable one; truncation is
//! silent and deterministic (first `max_tokens` kept).

use unicode_segmentation::UnicodeSegmentation;

/// Aggregate counts reported back to the caller after every edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    /// Grapheme clusters, not bytes or code points.
    pub chars: usize,
    /// Whitespace-delimited words, uncapped.
    pub words: usize,
    /// Lines as counted by `str::lines`.
    pub lines: usize,
}

/// Split `text` into at most `max_tokens` whitespace-delimited tokens.
///
/// Leading/trailing whitespace is trimmed, runs of interior whitespace act as
/// a single separator, and empty fragments never appear. Pure function.
pub fn tokenize(text: &str, max_tokens: usize) -> Vec<String> {
    text.split_whitespace()
        .take(max_tokens)
        .map(str::to_owned)
        .collect()
}

/// Compute display statistics for `text`. Pure function.
pub fn stats(text: &str) -> TextStats {
    TextStats {
        chars: text.graphemes(true).count(),
        words: text.split_whitespace().count(),
        lines: text.lines().count(),
    }
}
