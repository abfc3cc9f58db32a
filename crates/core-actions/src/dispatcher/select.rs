//! Selection narrowing and re-merge.

use super::plural;
use crate::error::ActionError;
use crate::io_ops::read_list;
use crate::Outcome;
use core_pattern::{Negation, parse_query};
use core_state::EditorState;
use std::path::Path;

/// Keep lines matching the query (inverted by a leading `!`). The query is
/// compiled before anything is snapshotted.
pub(super) fn select(raw: &str, state: &mut EditorState) -> Result<Outcome, ActionError> {
    let query = parse_query(raw, Negation::Allowed)?;
    let kept = state.select_where(|line| query.is_match(core_text::content(line)));
    Ok(Outcome::Summary(format!("Selected {}", plural(kept, "line"))))
}

pub(super) fn unselect(state: &mut EditorState) -> Result<Outcome, ActionError> {
    let merged = state.unselect()?;
    Ok(Outcome::Summary(format!(
        "Selection merged back ({} in document)",
        plural(merged, "line")
    )))
}

/// Keep (or drop, when negated) lines containing any entry of the list file.
/// Plain substring containment; entries are not patterns.
pub(super) fn select_from_file(
    list: &Path,
    negate: bool,
    state: &mut EditorState,
) -> Result<Outcome, ActionError> {
    let entries = read_list(list)?;
    if entries.is_empty() {
        return Err(ActionError::Validation(format!(
            "{} contains no entries",
            list.display()
        )));
    }
    let before = state.line_count();
    let kept: Vec<String> = state
        .lines()
        .iter()
        .filter(|line| {
            let body = core_text::content(line);
            entries.iter().any(|e| body.contains(e.as_str())) != negate
        })
        .cloned()
        .collect();
    let n = kept.len();
    state.commit(kept);
    Ok(Outcome::Summary(format!(
        "Kept {} of {before} ({} list entries)",
        plural(n, "line"),
        entries.len()
    )))
}
