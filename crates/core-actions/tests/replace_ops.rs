mod common;

use common::{Harness, lines};
use core_actions::{ActionError, Operation, Outcome, Separator};
use pretty_assertions::assert_eq;

fn replace(p: &str, r: &str) -> Operation {
    Operation::Replace {
        pattern: p.into(),
        replacement: r.into(),
    }
}

#[test]
fn backreferences_and_whole_match() {
    let mut h = Harness::with_lines(&["ab\n"]);
    h.apply(replace("(a)(b)", "\\2\\1-\\0")).unwrap();
    assert_eq!(h.lines(), lines(&["ba-ab\n"]));
}

#[test]
fn replace_reports_counts_and_keeps_terminators() {
    let mut h = Harness::with_lines(&["aa\r\n", "b\n", "a"]);
    let out = h.apply(replace("a", "x")).unwrap();
    assert_eq!(out, Outcome::Summary("Replaced 3 occurrences in 2 lines".into()));
    assert_eq!(h.lines(), lines(&["xx\r\n", "b\n", "x"]));
}

#[test]
fn invalid_pattern_falls_back_to_literal() {
    let mut h = Harness::with_lines(&["[a] [b]\n", "none\n"]);
    let out = h.apply(replace("[", "x")).unwrap();
    match out {
        Outcome::Summary(s) => {
            assert!(s.starts_with("Pattern failed"), "{s}");
            assert!(s.contains("as literal text"), "{s}");
        }
        other => panic!("expected summary, got {other:?}"),
    }
    assert_eq!(h.lines(), lines(&["xa] xb]\n", "none\n"]));
    h.apply(Operation::Revert).unwrap();
    assert_eq!(h.lines(), lines(&["[a] [b]\n", "none\n"]));
}

#[test]
fn bad_group_reference_falls_back_to_literal() {
    let mut h = Harness::with_lines(&["a.b\n", "axb\n"]);
    h.apply(replace("a.b", "\\1")).unwrap();
    // literal mode: only the exact text `a.b` is replaced, `\1` inserted verbatim
    assert_eq!(h.lines(), lines(&["\\1\n", "axb\n"]));
}

#[test]
fn replace_failed_when_literal_search_empty() {
    // the filter does not compile, and the literal retry has nothing to search for
    let mut h = Harness::with_lines(&["a(\n"]);
    let err = h
        .apply(Operation::ReplaceInLines {
            search: String::new(),
            replacement: "x".into(),
            filter: "(".into(),
        })
        .unwrap_err();
    assert!(matches!(err, ActionError::ReplaceFailed { .. }), "{err}");
    assert_eq!(h.lines(), lines(&["a(\n"]));
    assert!(h.state.previous().is_none());
}

#[test]
fn literal_retry_keeps_pattern_filter() {
    // `[` fails as a pattern, but `^key` still selects lines as a pattern
    let mut h = Harness::with_lines(&["key: [x\n", "val: [x\n"]);
    h.apply(Operation::ReplaceInLines {
        search: "[".into(),
        replacement: "(".into(),
        filter: "^key".into(),
    })
    .unwrap();
    assert_eq!(h.lines(), lines(&["key: (x\n", "val: [x\n"]));
}

#[test]
fn unknown_dollar_group_falls_back_to_literal() {
    let mut h = Harness::with_lines(&["price\n", "cost\n"]);
    h.apply(replace("price", "$5")).unwrap();
    assert_eq!(h.lines(), lines(&["$5\n", "cost\n"]));

    let out = h.apply(replace("cost", "$total")).unwrap();
    assert!(matches!(&out, Outcome::Summary(s) if s.contains("as literal text")), "{out:?}");
    assert_eq!(h.lines(), lines(&["$5\n", "$total\n"]));
}

#[test]
fn replace_in_lines_only_touches_filtered_lines() {
    let mut h = Harness::with_lines(&["key: a\n", "val: a\n", "key: b\n"]);
    h.apply(Operation::ReplaceInLines {
        search: "a|b".into(),
        replacement: "Z".into(),
        filter: "^key".into(),
    })
    .unwrap();
    assert_eq!(h.lines(), lines(&["key: Z\n", "val: a\n", "key: Z\n"]));
}

#[test]
fn replace_via_command_line_uses_placeholders() {
    let mut h = Harness::with_lines(&["a|b\n"]);
    h.run("replace [pipe] [tab]").unwrap();
    assert_eq!(h.lines(), lines(&["a\tb\n"]));
}

#[test]
fn multiple_replace_is_order_dependent() {
    let dir = tempfile::tempdir().unwrap();
    let map = dir.path().join("map.txt");
    std::fs::write(&map, "cat\tdog\ndog\tbird\n").unwrap();
    let mut h = Harness::with_lines(&["cat dog\n", "none\n"]);
    let out = h
        .apply(Operation::MultipleReplace {
            mapping: map.clone(),
            separator: Separator::Tab,
        })
        .unwrap();
    assert_eq!(h.lines(), lines(&["bird bird\n", "none\n"]));
    assert_eq!(
        out,
        Outcome::Summary("Applied 2 pairs: replaced 3 occurrences in 1 line".into())
    );
}

#[test]
fn multiple_replace_missing_file_is_io_error() {
    let mut h = Harness::with_lines(&["a\n"]);
    let err = h
        .apply(Operation::MultipleReplace {
            mapping: "__no_such_mapping__.txt".into(),
            separator: Separator::Tab,
        })
        .unwrap_err();
    assert_eq!(err.kind(), core_actions::ErrorKind::Io);
}
