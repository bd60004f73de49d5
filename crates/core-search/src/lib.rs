//! Search and find/replace engines.
//!
//! Two independent surfaces share this crate: token search (whole-token
//! sequence in, matching indices out, with a bounded query history) and the
//! find/replace state machine over raw buffer text. Both treat queries as
//! literal text with case folding; neither interprets regex syntax.

pub mod replace;
pub mod search;

pub use replace::{
    FindReplaceState, FindStatus, MatchSpan, ReplaceError, find_matches, replace_all_matches,
};
pub use search::{SearchHistory, SearchHistoryEntry, search_tokens};
