mod common;

use common::{Harness, lines};
use core_actions::{ActionError, ErrorKind, Operation, Outcome};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

#[test]
fn load_from_file_records_source_and_resets_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.txt");
    std::fs::write(&path, "b\r\na\n").unwrap();
    let mut h = Harness::with_lines(&["old\n"]);
    h.apply(Operation::Sort).unwrap();
    h.apply(Operation::Load {
        path: Some(path.clone()),
    })
    .unwrap();
    assert_eq!(h.lines(), lines(&["b\r\n", "a\n"]));
    assert_eq!(h.state.source_path, Some(path));
    assert!(matches!(h.apply(Operation::Revert), Err(ActionError::NoHistory)));
}

#[test]
fn load_missing_file_keeps_buffer() {
    let mut h = Harness::with_lines(&["keep\n"]);
    let err = h
        .apply(Operation::Load {
            path: Some(PathBuf::from("__definitely_missing__.txt")),
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(h.lines(), lines(&["keep\n"]));
}

#[test]
fn load_from_clipboard_normalizes_crlf() {
    let mut h = Harness::empty();
    h.clipboard.text = "x\r\ny".into();
    let out = h.run("load").unwrap();
    assert_eq!(out, Outcome::Summary("Loaded 2 lines from clipboard".into()));
    assert_eq!(h.lines(), lines(&["x\n", "y"]));
    assert!(h.state.source_path.is_none());
}

#[test]
fn save_defaults_to_source_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.txt");
    std::fs::write(&path, "b\na\n").unwrap();
    let mut h = Harness::empty();
    h.apply(Operation::Load {
        path: Some(path.clone()),
    })
    .unwrap();
    h.apply(Operation::Sort).unwrap();
    h.apply(Operation::Save { path: None }).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nb\n");
}

#[test]
fn save_without_any_path_fails() {
    let mut h = Harness::with_lines(&["a\n"]);
    let err = h.apply(Operation::Save { path: None }).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn save_to_new_nested_path() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("a/b/out.txt");
    let mut h = Harness::with_lines(&["x\n"]);
    h.run(&format!("save \"{}\"", out.display())).unwrap();
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "x\n");
    assert!(h.state.source_path.is_none());
}
