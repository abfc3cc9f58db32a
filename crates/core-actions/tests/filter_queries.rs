mod common;

use common::{Harness, lines};
use core_actions::{ActionError, Operation, Outcome};
use pretty_assertions::assert_eq;

#[test]
fn show_or_keeps_order() {
    let mut h = Harness::with_lines(&["x1\n", "y1\n", "z1\n"]);
    let out = h.apply(Operation::Show { query: "x OR z".into() }).unwrap();
    assert_eq!(out, Outcome::Lines(lines(&["x1\n", "z1\n"])));
}

#[test]
fn show_does_not_negate() {
    let mut h = Harness::with_lines(&["!x\n", "x\n"]);
    let out = h.apply(Operation::Show { query: "!x".into() }).unwrap();
    assert_eq!(out, Outcome::Lines(lines(&["!x\n"])));
}

#[test]
fn count_without_query_counts_all() {
    let mut h = Harness::with_lines(&["a\n", "b\n", "\n"]);
    assert_eq!(h.apply(Operation::Count { query: String::new() }).unwrap(), Outcome::Count(3));
    assert_eq!(h.run("count \"a OR b\"").unwrap(), Outcome::Count(2));
}

#[test]
fn anchors_see_content_without_terminator() {
    let mut h = Harness::with_lines(&["ab\r\n", "ba\n"]);
    assert_eq!(h.run("count b$").unwrap(), Outcome::Count(1));
}

#[test]
fn placeholders_reach_the_pattern() {
    let mut h = Harness::with_lines(&["a\tb\n", "a b\n", "say \"hi\"\n"]);
    assert_eq!(h.run("count a[tab]b").unwrap(), Outcome::Count(1));
    assert_eq!(h.run("count a[spaces]b").unwrap(), Outcome::Count(2));
    assert_eq!(h.run("count [doublequote]hi").unwrap(), Outcome::Count(1));
}

#[test]
fn invalid_query_reports_pattern_error() {
    let mut h = Harness::with_lines(&["a\n"]);
    let err = h.apply(Operation::Show { query: "(".into() }).unwrap_err();
    assert_eq!(err.kind(), core_actions::ErrorKind::Pattern);
    assert!(matches!(err, ActionError::Pattern(_)));
}

#[test]
fn clipboard_output_text() {
    let out = Outcome::Lines(lines(&["a\n", "b\n"]));
    assert_eq!(out.output_text().as_deref(), Some("a\nb\n"));
    assert_eq!(Outcome::Count(4).output_text().as_deref(), Some("4"));
    assert_eq!(Outcome::Summary("x".into()).output_text(), None);
}
