mod common;

use common::{Harness, lines};
use core_actions::{ActionError, Operation, Outcome};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn select(q: &str) -> Operation {
    Operation::Select { query: q.into() }
}

#[test]
fn select_then_revert_restores_document() {
    let mut h = Harness::with_lines(&["x1\n", "y1\n", "z1\n"]);
    h.apply(select("y")).unwrap();
    assert_eq!(h.lines(), lines(&["y1\n"]));
    h.apply(Operation::Revert).unwrap();
    assert_eq!(h.lines(), lines(&["x1\n", "y1\n", "z1\n"]));
}

#[test]
fn negated_select_keeps_non_matching() {
    let mut h = Harness::with_lines(&["x1\n", "y1\n", "z1\n"]);
    let out = h.apply(select("!x")).unwrap();
    assert_eq!(out, Outcome::Summary("Selected 2 lines".into()));
    assert_eq!(h.lines(), lines(&["y1\n", "z1\n"]));
}

#[test]
fn empty_select_keeps_everything() {
    let mut h = Harness::with_lines(&["a\n", "b\n"]);
    h.apply(select("")).unwrap();
    assert_eq!(h.lines(), lines(&["a\n", "b\n"]));
    assert_eq!(h.state.selection().unwrap().indices, vec![0, 1]);
}

#[test]
fn invalid_select_leaves_state_untouched() {
    let mut h = Harness::with_lines(&["a\n", "b\n"]);
    h.apply(Operation::Sort).unwrap();
    let before_prev = h.state.previous().map(<[String]>::to_vec);
    let err = h.apply(select("a OR (")).unwrap_err();
    assert!(matches!(err, ActionError::Pattern(_)));
    assert_eq!(h.lines(), lines(&["a\n", "b\n"]));
    assert_eq!(h.state.previous().map(<[String]>::to_vec), before_prev);
    assert!(h.state.selection().is_none());
}

#[test]
fn unselect_merges_replacement_back() {
    let mut h = Harness::with_lines(&["a\n", "b\n", "c\n"]);
    h.apply(select("b")).unwrap();
    assert_eq!(h.lines(), lines(&["b\n"]));
    h.apply(Operation::Replace {
        pattern: "b".into(),
        replacement: "B".into(),
    })
    .unwrap();
    assert_eq!(h.lines(), lines(&["B\n"]));
    h.apply(Operation::Unselect).unwrap();
    assert_eq!(h.lines(), lines(&["a\n", "B\n", "c\n"]));
}

#[test]
fn unselect_is_undoable() {
    let mut h = Harness::with_lines(&["a\n", "b\n"]);
    h.apply(select("a")).unwrap();
    h.apply(Operation::Unselect).unwrap();
    h.apply(Operation::Revert).unwrap();
    assert_eq!(h.lines(), lines(&["a\n"]));
}

#[test]
fn unselect_without_select_fails() {
    let mut h = Harness::with_lines(&["a\n"]);
    assert!(matches!(h.apply(Operation::Unselect), Err(ActionError::NoSelection)));
}

#[test]
fn revert_without_history_fails() {
    let mut h = Harness::with_lines(&["a\n"]);
    assert!(matches!(h.apply(Operation::Revert), Err(ActionError::NoHistory)));
}

#[test]
fn revert_keeps_only_one_level() {
    let mut h = Harness::with_lines(&["b\n", "a\n", "a\n"]);
    h.apply(Operation::Sort).unwrap();
    h.apply(Operation::Unique).unwrap();
    assert_eq!(h.lines(), lines(&["a\n", "b\n"]));
    h.apply(Operation::Revert).unwrap();
    assert_eq!(h.lines(), lines(&["a\n", "a\n", "b\n"]));
    h.apply(Operation::Revert).unwrap();
    assert_eq!(h.lines(), lines(&["a\n", "a\n", "b\n"]));
}

#[test]
fn read_only_commands_do_not_touch_history() {
    let mut h = Harness::with_lines(&["a\n", "b\n"]);
    h.apply(Operation::Show { query: "a".into() }).unwrap();
    h.apply(Operation::Count { query: String::new() }).unwrap();
    assert!(matches!(h.apply(Operation::Revert), Err(ActionError::NoHistory)));
}

#[test]
fn operations_need_a_loaded_document() {
    let mut h = Harness::empty();
    assert!(matches!(h.apply(select("a")), Err(ActionError::NoBuffer)));
    assert!(matches!(h.apply(Operation::Revert), Err(ActionError::NoBuffer)));
    assert!(h.apply(Operation::Help { topic: None }).is_ok());
}

proptest! {
    #[test]
    fn select_revert_round_trip(
        doc in proptest::collection::vec("[abc ]{0,6}\n", 0..12),
        query in "[abc]{0,2}",
        negate in any::<bool>(),
    ) {
        let refs: Vec<&str> = doc.iter().map(String::as_str).collect();
        let mut h = Harness::with_lines(&refs);
        let q = if negate { format!("!{query}") } else { query };
        h.apply(select(&q)).unwrap();
        // An empty document leaves an empty snapshot, which revert treats as absent.
        let _ = h.apply(Operation::Revert);
        prop_assert_eq!(h.lines(), doc);
    }
}
