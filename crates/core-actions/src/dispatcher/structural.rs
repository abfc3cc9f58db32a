//! Whole-buffer structural edits. Each one snapshots through `commit`.

use super::plural;
use crate::error::ActionError;
use crate::{CaseMode, Outcome};
use core_pattern::compile;
use core_state::EditorState;
use core_text::{content, ensure_terminated, terminated, with_terminator_of};
use std::collections::HashSet;

const URL_PATTERN: &str = r#"https?://[^\s<>"']+|www\.[^\s<>"']+"#;
const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";

pub(super) fn sort(state: &mut EditorState) -> Result<Outcome, ActionError> {
    let mut lines = state.lines().to_vec();
    ensure_terminated(&mut lines);
    lines.sort();
    let n = lines.len();
    state.commit(lines);
    Ok(Outcome::Summary(format!("Sorted {}", plural(n, "line"))))
}

pub(super) fn unique(state: &mut EditorState) -> Result<Outcome, ActionError> {
    let before = state.line_count();
    let lines: Vec<String> = {
        let mut seen = HashSet::with_capacity(before);
        state
            .lines()
            .iter()
            .filter(|line| seen.insert(line.as_str()))
            .cloned()
            .collect()
    };
    let removed = before - lines.len();
    state.commit(lines);
    Ok(Outcome::Summary(format!(
        "Removed {}",
        plural(removed, "duplicate line")
    )))
}

pub(super) fn remove_empty_lines(state: &mut EditorState) -> Result<Outcome, ActionError> {
    let before = state.line_count();
    let lines: Vec<String> = state
        .lines()
        .iter()
        .filter(|line| !line.trim().is_empty())
        .cloned()
        .collect();
    let removed = before - lines.len();
    state.commit(lines);
    Ok(Outcome::Summary(format!(
        "Removed {}",
        plural(removed, "empty line")
    )))
}

pub(super) fn reverse_lines(state: &mut EditorState) -> Result<Outcome, ActionError> {
    let mut lines = state.lines().to_vec();
    ensure_terminated(&mut lines);
    lines.reverse();
    let n = lines.len();
    state.commit(lines);
    Ok(Outcome::Summary(format!("Reversed {}", plural(n, "line"))))
}

pub(super) fn trim_whitespace(state: &mut EditorState) -> Result<Outcome, ActionError> {
    let lines: Vec<String> = state.lines().iter().map(|l| terminated(l.trim())).collect();
    let n = lines.len();
    state.commit(lines);
    Ok(Outcome::Summary(format!("Trimmed {}", plural(n, "line"))))
}

/// Title case: a letter is uppercased when the preceding character is not a
/// letter, lowercased otherwise.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_letter = false;
    for ch in text.chars() {
        if prev_letter {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        prev_letter = ch.is_alphabetic();
    }
    out
}

pub(super) fn convert_case(mode: CaseMode, state: &mut EditorState) -> Result<Outcome, ActionError> {
    let convert = |body: &str| match mode {
        CaseMode::Upper => body.to_uppercase(),
        CaseMode::Lower => body.to_lowercase(),
        CaseMode::Title => title_case(body),
    };
    let lines: Vec<String> = state
        .lines()
        .iter()
        .map(|line| with_terminator_of(line, &convert(content(line))))
        .collect();
    let n = lines.len();
    state.commit(lines);
    Ok(Outcome::Summary(format!(
        "Converted {} to {mode:?} case",
        plural(n, "line")
    )))
}

pub(super) fn split_lines(delimiter: &str, state: &mut EditorState) -> Result<Outcome, ActionError> {
    if delimiter.is_empty() {
        return Err(ActionError::validation("split_lines needs a non-empty delimiter"));
    }
    let before = state.line_count();
    let lines: Vec<String> = state
        .lines()
        .iter()
        .flat_map(|line| content(line).split(delimiter).map(terminated))
        .collect();
    let n = lines.len();
    state.commit(lines);
    Ok(Outcome::Summary(format!(
        "Split {} into {}",
        plural(before, "line"),
        n
    )))
}

pub(super) fn merge_lines(delimiter: &str, state: &mut EditorState) -> Result<Outcome, ActionError> {
    let before = state.line_count();
    if before == 0 {
        return Err(ActionError::validation("nothing to merge"));
    }
    let merged = state
        .lines()
        .iter()
        .map(|l| l.trim())
        .collect::<Vec<_>>()
        .join(delimiter);
    state.commit(vec![terminated(&merged)]);
    Ok(Outcome::Summary(format!(
        "Merged {} into one",
        plural(before, "line")
    )))
}

/// Keep the first span from a line matching `start` through the next line
/// matching `end`. Without an end line the span runs to the end of the buffer.
pub(super) fn extract_between(
    start: &str,
    end: &str,
    state: &mut EditorState,
) -> Result<Outcome, ActionError> {
    let start_re = compile(start)?;
    let end_re = compile(end)?;
    let lines = state.lines();
    let first = lines
        .iter()
        .position(|l| start_re.is_match(content(l)))
        .ok_or_else(|| ActionError::Validation(format!("no line matches start pattern `{start}`")))?;
    let last = lines[first + 1..]
        .iter()
        .position(|l| end_re.is_match(content(l)))
        .map_or(lines.len() - 1, |offset| first + 1 + offset);
    let span = lines[first..=last].to_vec();
    let n = span.len();
    state.commit(span);
    Ok(Outcome::Summary(format!(
        "Extracted {} (lines {}-{})",
        plural(n, "line"),
        first + 1,
        last + 1
    )))
}

pub(super) fn insert_line(
    position: usize,
    text: &str,
    state: &mut EditorState,
) -> Result<Outcome, ActionError> {
    let count = state.line_count();
    if position == 0 || position > count + 1 {
        return Err(ActionError::Validation(format!(
            "line number {position} is out of range (1-{})",
            count + 1
        )));
    }
    let mut lines = state.lines().to_vec();
    ensure_terminated(&mut lines);
    lines.insert(position - 1, terminated(text));
    state.commit(lines);
    Ok(Outcome::Summary(format!("Inserted line {position}")))
}

fn extract_all(pattern: &str, what: &str, state: &mut EditorState) -> Result<Outcome, ActionError> {
    let re = compile(pattern)?;
    let found: Vec<String> = state
        .lines()
        .iter()
        .flat_map(|line| re.find_iter(content(line)).map(|m| terminated(m.as_str())))
        .collect();
    if found.is_empty() {
        return Err(ActionError::Validation(format!("no {what}s found")));
    }
    let n = found.len();
    state.commit(found);
    Ok(Outcome::Summary(format!("Extracted {}", plural(n, what))))
}

pub(super) fn extract_urls(state: &mut EditorState) -> Result<Outcome, ActionError> {
    extract_all(URL_PATTERN, "URL", state)
}

pub(super) fn extract_emails(state: &mut EditorState) -> Result<Outcome, ActionError> {
    extract_all(EMAIL_PATTERN, "email", state)
}
