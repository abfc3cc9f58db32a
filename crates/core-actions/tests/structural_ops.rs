mod common;

use common::{Harness, lines};
use core_actions::{ActionError, CaseMode, Operation, Outcome};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn sort_is_case_sensitive_and_terminates_last_line() {
    let mut h = Harness::with_lines(&["b\n", "B\n", "a"]);
    h.apply(Operation::Sort).unwrap();
    assert_eq!(h.lines(), lines(&["B\n", "a\n", "b\n"]));
}

#[test]
fn unique_is_stable_and_idempotent() {
    let mut h = Harness::with_lines(&["b\n", "a\n", "b\n", "a\n", "c\n"]);
    let first = h.apply(Operation::Unique).unwrap();
    assert_eq!(first, Outcome::Summary("Removed 2 duplicate lines".into()));
    let once = h.lines();
    assert_eq!(once, lines(&["b\n", "a\n", "c\n"]));
    let second = h.apply(Operation::Unique).unwrap();
    assert_eq!(second, Outcome::Summary("Removed 0 duplicate lines".into()));
    assert_eq!(h.lines(), once);
}

#[test]
fn remove_empty_lines_counts_whitespace_only() {
    let mut h = Harness::with_lines(&["a\n", "\n", "  \t\n", "b"]);
    let out = h.apply(Operation::RemoveEmptyLines).unwrap();
    assert_eq!(out, Outcome::Summary("Removed 2 empty lines".into()));
    assert_eq!(h.lines(), lines(&["a\n", "b"]));
}

#[test]
fn reverse_lines_flips_order() {
    let mut h = Harness::with_lines(&["1\n", "2\n", "3"]);
    h.apply(Operation::ReverseLines).unwrap();
    assert_eq!(h.lines(), lines(&["3\n", "2\n", "1\n"]));
}

#[test]
fn trim_whitespace_reterminates() {
    let mut h = Harness::with_lines(&["  a \r\n", "\tb"]);
    h.apply(Operation::TrimWhitespace).unwrap();
    assert_eq!(h.lines(), lines(&["a\n", "b\n"]));
}

#[test]
fn convert_case_modes() {
    let mut h = Harness::with_lines(&["hello wORLD\n"]);
    h.apply(Operation::ConvertCase(CaseMode::Upper)).unwrap();
    assert_eq!(h.lines(), lines(&["HELLO WORLD\n"]));
    h.apply(Operation::ConvertCase(CaseMode::Title)).unwrap();
    assert_eq!(h.lines(), lines(&["Hello World\n"]));
    h.apply(Operation::ConvertCase(CaseMode::Lower)).unwrap();
    assert_eq!(h.lines(), lines(&["hello world\n"]));
    let err = h.run("convert_case camel").unwrap_err();
    assert!(matches!(err, ActionError::Validation(_)));
}

#[test]
fn split_lines_flattens_fragments() {
    let mut h = Harness::with_lines(&["a,b\n", "c\n"]);
    h.run("split_lines ,").unwrap();
    assert_eq!(h.lines(), lines(&["a\n", "b\n", "c\n"]));
}

#[test]
fn merge_lines_trims_and_joins() {
    let mut h = Harness::with_lines(&[" a \n", "b\n", "c"]);
    h.apply(Operation::MergeLines {
        delimiter: ", ".into(),
    })
    .unwrap();
    assert_eq!(h.lines(), lines(&["a, b, c\n"]));
    let mut h = Harness::with_lines(&["x\n", "y\n"]);
    h.run("merge_lines").unwrap();
    assert_eq!(h.lines(), lines(&["xy\n"]));
}

#[test]
fn extract_between_takes_first_span_only() {
    let mut h = Harness::with_lines(&[
        "pre\n", "BEGIN\n", "one\n", "END\n", "BEGIN\n", "two\n", "END\n",
    ]);
    h.apply(Operation::ExtractBetween {
        start: "^BEGIN".into(),
        end: "^END".into(),
    })
    .unwrap();
    assert_eq!(h.lines(), lines(&["BEGIN\n", "one\n", "END\n"]));
}

#[test]
fn extract_between_end_must_follow_start() {
    let mut h = Harness::with_lines(&["START END\n", "mid\n"]);
    h.run("extract_between START END").unwrap();
    assert_eq!(h.lines(), lines(&["START END\n", "mid\n"]));
    let mut h = Harness::with_lines(&["a\n"]);
    let err = h.run("extract_between zzz a").unwrap_err();
    assert!(matches!(err, ActionError::Validation(_)));
    assert_eq!(h.lines(), lines(&["a\n"]));
}

#[test]
fn insert_line_positions_are_one_based() {
    let mut h = Harness::with_lines(&["a\n", "b"]);
    h.run("insert_line 1 first").unwrap();
    h.run("insert_line 4 last").unwrap();
    assert_eq!(h.lines(), lines(&["first\n", "a\n", "b\n", "last\n"]));
    for bad in ["insert_line 0 x", "insert_line 6 x"] {
        let err = h.run(bad).unwrap_err();
        assert!(matches!(err, ActionError::Validation(_)), "{bad}");
    }
    assert_eq!(h.state.line_count(), 4);
}

#[test]
fn extract_urls_flattens_matches() {
    let mut h = Harness::with_lines(&[
        "see https://a.example/x and http://b.example\n",
        "nothing here\n",
        "www.c.example/path\n",
    ]);
    let out = h.apply(Operation::ExtractUrls).unwrap();
    assert_eq!(out, Outcome::Summary("Extracted 3 URLs".into()));
    assert_eq!(
        h.lines(),
        lines(&["https://a.example/x\n", "http://b.example\n", "www.c.example/path\n"])
    );
}

#[test]
fn extract_emails_in_order() {
    let mut h = Harness::with_lines(&["to: a@x.org, b.c@y.co\n", "none\n"]);
    h.apply(Operation::ExtractEmails).unwrap();
    assert_eq!(h.lines(), lines(&["a@x.org\n", "b.c@y.co\n"]));
    let mut h = Harness::with_lines(&["none\n"]);
    assert!(h.apply(Operation::ExtractEmails).is_err());
    assert_eq!(h.lines(), lines(&["none\n"]));
}

#[test]
fn select_from_file_uses_substrings() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("names.txt");
    std::fs::write(&list, "a.b\n\nzed\n").unwrap();
    let mut h = Harness::with_lines(&["xa.by\n", "axb\n", "zed\n"]);
    h.apply(Operation::SelectFromFile {
        list: list.clone(),
        negate: false,
    })
    .unwrap();
    assert_eq!(h.lines(), lines(&["xa.by\n", "zed\n"]));
    h.apply(Operation::Revert).unwrap();
    h.apply(Operation::SelectFromFile { list, negate: true }).unwrap();
    assert_eq!(h.lines(), lines(&["axb\n"]));
}

proptest! {
    #[test]
    fn unique_twice_removes_nothing_more(doc in proptest::collection::vec("[ab]{0,2}\n", 0..16)) {
        let refs: Vec<&str> = doc.iter().map(String::as_str).collect();
        let mut h = Harness::with_lines(&refs);
        h.apply(Operation::Unique).unwrap();
        let once = h.lines();
        let out = h.apply(Operation::Unique).unwrap();
        prop_assert_eq!(out, Outcome::Summary("Removed 0 duplicate lines".into()));
        prop_assert_eq!(h.lines(), once);
    }
}
