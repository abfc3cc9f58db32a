//! Read-only filtering: never touches the undo snapshot or the selection.

use crate::error::ActionError;
use crate::Outcome;
use core_pattern::{Negation, Query, parse_query};
use core_state::EditorState;

fn matching<'a>(query: &'a Query, state: &'a EditorState) -> impl Iterator<Item = &'a String> + 'a {
    state
        .lines()
        .iter()
        .filter(|line| query.is_match(core_text::content(line)))
}

pub(super) fn show(raw: &str, state: &EditorState) -> Result<Outcome, ActionError> {
    let query = parse_query(raw, Negation::Literal)?;
    Ok(Outcome::Lines(matching(&query, state).cloned().collect()))
}

pub(super) fn count(raw: &str, state: &EditorState) -> Result<Outcome, ActionError> {
    let query = parse_query(raw, Negation::Literal)?;
    Ok(Outcome::Count(matching(&query, state).count()))
}
