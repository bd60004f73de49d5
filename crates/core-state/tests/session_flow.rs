//! End-to-end session behavior: edits, history, search, and find/replace
//! flowing through the same pipeline a presentation layer would drive.

use core_config::LimitsConfig;
use core_model::StructureKind;
use core_search::ReplaceError;
use core_state::Session;

fn mk_session() -> Session {
    Session::new(LimitsConfig::default(), StructureKind::Stack)
}

fn mk_session_with(limits: LimitsConfig) -> Session {
    Session::new(limits, StructureKind::Stack)
}

#[test]
fn k_undos_step_back_k_edits_to_the_baseline() {
    let mut session = mk_session();
    let edits = ["a", "a b", "a b c", "a b c d"];
    for edit in edits {
        session.on_text_changed(edit);
    }
    for expected in ["a b c", "a b", "a"] {
        assert_eq!(session.undo().as_deref(), Some(expected));
        assert_eq!(session.text(), expected);
    }
    assert_eq!(session.undo().as_deref(), Some(""));
    // Baseline floor: further undo is a no-op.
    assert_eq!(session.undo(), None);
    assert_eq!(session.text(), "");
}

#[test]
fn history_cap_keeps_most_recent_snapshots() {
    let limits = LimitsConfig {
        history_cap: 4,
        ..LimitsConfig::default()
    };
    let mut session = mk_session_with(limits);
    for i in 0..20 {
        session.on_text_changed(&format!("edit{i}"));
    }
    assert_eq!(session.undo_depth(), 4);
    assert_eq!(session.undo().as_deref(), Some("edit18"));
    assert_eq!(session.undo().as_deref(), Some("edit17"));
    assert_eq!(session.undo().as_deref(), Some("edit16"));
    // Everything older was evicted.
    assert_eq!(session.undo(), None);
}

#[test]
fn token_cap_truncates_from_the_start() {
    let limits = LimitsConfig {
        max_tokens: 5,
        ..LimitsConfig::default()
    };
    let mut session = mk_session_with(limits);
    let text = (0..9).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
    let update = session.on_text_changed(&text);
    assert_eq!(update.tokens, vec!["w0", "w1", "w2", "w3", "w4"]);
    // The counts still describe the full text.
    assert_eq!(update.word_count, 9);
}

#[test]
fn layout_tracks_structure_kind_switches() {
    let mut session = mk_session();
    session.on_text_changed("a b c d");
    session.set_structure_kind(StructureKind::Queue);
    assert_eq!(session.layout(None).edges.len(), 3);
    session.set_structure_kind(StructureKind::Tree);
    let tree = session.layout(None);
    assert_eq!(tree.edges.len(), 3);
    assert_eq!(tree.nodes[0].token_index, 0);
    session.set_structure_kind(StructureKind::Stack);
    assert!(session.layout(None).edges.is_empty());
}

#[test]
fn search_history_is_bounded_fifo() {
    let mut session = mk_session();
    session.on_text_changed("cat dog cow");
    for q in ["cat", "dog", "cow", "pig", "hen", "cat"] {
        session.search(q);
    }
    let queries: Vec<&str> = session
        .search_history()
        .entries()
        .map(|e| e.query.as_str())
        .collect();
    // Cap of 5, oldest evicted, most recent last, duplicates kept.
    assert_eq!(queries, vec!["dog", "cow", "pig", "hen", "cat"]);
    let counts: Vec<usize> = session
        .search_history()
        .entries()
        .map(|e| e.match_count)
        .collect();
    assert_eq!(counts, vec![1, 1, 0, 0, 1]);
}

#[test]
fn replace_all_round_trip() {
    let mut session = mk_session();
    session.on_text_changed("a b a c a");
    session.toggle_find_replace();
    let status = session.update_find_query("a");
    assert_eq!(status.match_count, 3);
    assert_eq!(status.current_index, Some(0));

    let status = session.replace_all("x").unwrap();
    assert_eq!(session.text(), "x b x c x");
    assert_eq!(status.match_count, 0);
    assert_eq!(status.current_index, None);

    // Re-running the original query finds nothing.
    let status = session.update_find_query("a");
    assert_eq!(status.match_count, 0);

    // The substitution went through history like any other edit.
    assert_eq!(session.undo().as_deref(), Some("a b a c a"));
}

#[test]
fn replace_current_advances_offsets_correctly() {
    let mut session = mk_session();
    session.on_text_changed("a b a c a");
    session.update_find_query("a");

    let status = session.replace_current("x").unwrap();
    assert_eq!(session.text(), "x b a c a");
    // Rescan after the splice: two matches remain, selection reset to first.
    assert_eq!(status.match_count, 2);
    assert_eq!(status.current_index, Some(0));

    // The replaced position no longer matches the original query.
    let status = session.replace_current("y").unwrap();
    assert_eq!(session.text(), "x b y c a");
    assert_eq!(status.match_count, 1);

    let status = session.replace_current("z").unwrap();
    assert_eq!(session.text(), "x b y c z");
    assert_eq!(status.match_count, 0);
    assert_eq!(status.current_index, None);

    // Nothing selected anymore: invalid operation, state untouched.
    assert_eq!(
        session.replace_current("w"),
        Err(ReplaceError::NoMatchSelected)
    );
    assert_eq!(session.text(), "x b y c z");
}

#[test]
fn replacement_longer_than_match_reflows_tokens() {
    let mut session = mk_session();
    session.on_text_changed("cat dog");
    session.update_find_query("cat");
    session.replace_current("elephant").unwrap();
    assert_eq!(session.text(), "elephant dog");
    assert_eq!(session.tokens(), ["elephant", "dog"]);
}

#[test]
fn edits_force_find_rescan() {
    let mut session = mk_session();
    session.on_text_changed("a b");
    let status = session.update_find_query("a");
    assert_eq!(status.match_count, 1);
    // A new edit supersedes the pending match state.
    session.on_text_changed("a b a");
    assert_eq!(session.find_status().match_count, 2);
    session.on_text_changed("b");
    assert_eq!(session.find_status().match_count, 0);
    assert_eq!(session.find_status().current_index, None);
}

#[test]
fn undo_rescans_find_matches() {
    let mut session = mk_session();
    session.on_text_changed("a a a");
    session.on_text_changed("b");
    session.update_find_query("a");
    assert_eq!(session.find_status().match_count, 0);
    session.undo();
    assert_eq!(session.find_status().match_count, 3);
}
