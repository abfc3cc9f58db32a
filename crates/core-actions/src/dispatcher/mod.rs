//! Dispatcher applying an [`Operation`] to the editor state.
//!
//! Sub-modules group operations by family:
//! * `command`    - load / save
//! * `filter`     - show / count (read-only)
//! * `select`     - select / unselect / select_from_file
//! * `substitute` - replace / replace_in_lines / multiple_replace
//! * `confirm`    - replace_confirm (interactive)
//! * `structural` - reorder, dedupe, case, split/merge, extraction, insert
//! * `undo`       - revert
//!
//! Every mutating handler builds the new line vector first and commits it in
//! one step, so a failure part-way never leaves the buffer half-edited.

use crate::error::ActionError;
use crate::ports::Ports;
use crate::{Operation, Outcome, help};
use core_state::EditorState;
use tracing::{debug, trace};

mod command;
pub mod command_parser;
mod confirm;
mod filter;
mod select;
mod structural;
mod substitute;
mod undo;

/// Apply `op` to `state`.
pub fn dispatch(
    op: Operation,
    state: &mut EditorState,
    ports: &mut Ports<'_>,
) -> Result<Outcome, ActionError> {
    if op.needs_buffer() && !state.is_loaded() {
        return Err(ActionError::NoBuffer);
    }
    trace!(target: "actions.dispatch", ?op, lines = state.line_count(), "dispatch");
    let outcome = match op {
        Operation::Load { path } => command::load(path, state, ports),
        Operation::Save { path } => command::save(path, state),
        Operation::Show { query } => filter::show(&query, state),
        Operation::Count { query } => filter::count(&query, state),
        Operation::Select { query } => select::select(&query, state),
        Operation::Unselect => select::unselect(state),
        Operation::SelectFromFile { list, negate } => select::select_from_file(&list, negate, state),
        Operation::Revert => undo::revert(state),
        Operation::Replace {
            pattern,
            replacement,
        } => substitute::replace(&pattern, &replacement, None, state),
        Operation::ReplaceInLines {
            search,
            replacement,
            filter,
        } => substitute::replace(&search, &replacement, Some(&filter), state),
        Operation::MultipleReplace { mapping, separator } => {
            substitute::multiple_replace(&mapping, &separator, state)
        }
        Operation::ReplaceConfirm { old, new } => confirm::replace_confirm(&old, &new, state, ports),
        Operation::Sort => structural::sort(state),
        Operation::Unique => structural::unique(state),
        Operation::RemoveEmptyLines => structural::remove_empty_lines(state),
        Operation::ReverseLines => structural::reverse_lines(state),
        Operation::TrimWhitespace => structural::trim_whitespace(state),
        Operation::ConvertCase(mode) => structural::convert_case(mode, state),
        Operation::SplitLines { delimiter } => structural::split_lines(&delimiter, state),
        Operation::MergeLines { delimiter } => structural::merge_lines(&delimiter, state),
        Operation::ExtractBetween { start, end } => structural::extract_between(&start, &end, state),
        Operation::InsertLine { position, text } => structural::insert_line(position, &text, state),
        Operation::ExtractUrls => structural::extract_urls(state),
        Operation::ExtractEmails => structural::extract_emails(state),
        Operation::Help { topic } => Ok(Outcome::Help(match topic {
            Some(kind) => help::command_help(kind),
            None => help::overview(),
        })),
        Operation::Exit => Ok(Outcome::Quit),
    };
    match &outcome {
        Ok(o) => trace!(target: "actions.dispatch", lines = state.line_count(), outcome = ?std::mem::discriminant(o), "dispatch_ok"),
        Err(e) => debug!(target: "actions.dispatch", kind = ?e.kind(), error = %e, "dispatch_failed"),
    }
    outcome
}

/// Plural-aware "N line(s)" style helper for summaries.
pub(crate) fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}
