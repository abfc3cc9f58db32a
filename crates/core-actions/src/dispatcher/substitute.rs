//! Line-wise substitution with literal fallback.
//!
//! `replace` first treats the search text as a pattern (placeholders
//! expanded). If compiling the pattern or the filter, or expanding the
//! replacement template fails, the same operation is retried as a plain
//! substring replace with placeholders expanded to the characters they name.
//! A filter that compiled keeps selecting lines as a pattern in the retry;
//! only a filter that failed to compile is matched as a substring.
//! Placeholders in the replacement always stand for plain characters.
//! The outcome says which mode was used. Substitutions only ever see a line's
//! content; terminators are re-attached untouched.

use super::plural;
use crate::error::ActionError;
use crate::io_ops::{Separator, read_mapping};
use crate::Outcome;
use core_pattern::{SubstitutionError, compile, expand_literal, replace_all, replace_literal};
use core_state::EditorState;
use regex::Regex;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Stats {
    occurrences: usize,
    lines_changed: usize,
}

impl Stats {
    fn describe(self) -> String {
        format!(
            "{} in {}",
            plural(self.occurrences, "occurrence"),
            plural(self.lines_changed, "line")
        )
    }
}

/// Apply `rewrite` to the content of every line accepted by `accept`.
fn rewrite_lines<A, F, E>(lines: &[String], accept: A, mut rewrite: F) -> Result<(Vec<String>, Stats), E>
where
    A: Fn(&str) -> bool,
    F: FnMut(&str) -> Result<(String, usize), E>,
{
    let mut stats = Stats::default();
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        let body = core_text::content(line);
        if !accept(body) {
            out.push(line.clone());
            continue;
        }
        let (new_body, n) = rewrite(body)?;
        if n > 0 {
            stats.occurrences += n;
            stats.lines_changed += 1;
            out.push(core_text::with_terminator_of(line, &new_body));
        } else {
            out.push(line.clone());
        }
    }
    Ok((out, stats))
}

/// Which lines a replace may touch.
enum LineFilter {
    All,
    Pattern(Regex),
    /// The filter text did not compile; match it as a substring instead.
    Literal(String),
}

impl LineFilter {
    /// Compile `raw` once for both attempts. A filter that fails to compile
    /// becomes a substring filter and its error is returned alongside.
    fn build(raw: Option<&str>) -> (Self, Option<String>) {
        match raw.map(compile).transpose() {
            Ok(Some(re)) => (Self::Pattern(re), None),
            Ok(None) => (Self::All, None),
            Err(e) => (
                Self::Literal(expand_literal(raw.unwrap_or_default())),
                Some(format!("filter: {e}")),
            ),
        }
    }

    fn accepts(&self, body: &str) -> bool {
        match self {
            Self::All => true,
            Self::Pattern(re) => re.is_match(body),
            Self::Literal(text) => body.contains(text.as_str()),
        }
    }
}

fn pattern_attempt(
    lines: &[String],
    search: &str,
    replacement: &str,
    filter: &LineFilter,
) -> Result<(Vec<String>, Stats), String> {
    let re = compile(search).map_err(|e| e.to_string())?;
    rewrite_lines(
        lines,
        |body| filter.accepts(body),
        |body| replace_all(&re, body, replacement),
    )
    .map_err(|e| e.to_string())
}

fn literal_attempt(
    lines: &[String],
    search: &str,
    replacement: &str,
    filter: &LineFilter,
) -> Result<(Vec<String>, Stats), SubstitutionError> {
    let search = expand_literal(search);
    rewrite_lines(
        lines,
        |body| filter.accepts(body),
        |body| replace_literal(body, &search, replacement),
    )
}

/// `replace` and `replace_in_lines` (when `filter` is given).
pub(super) fn replace(
    search: &str,
    replacement: &str,
    filter: Option<&str>,
    state: &mut EditorState,
) -> Result<Outcome, ActionError> {
    let replacement = expand_literal(replacement);
    let replacement = replacement.as_str();
    let (filter, filter_err) = LineFilter::build(filter);
    let attempt = match filter_err {
        Some(err) => Err(err),
        None => pattern_attempt(state.lines(), search, replacement, &filter),
    };
    match attempt {
        Ok((lines, stats)) => {
            debug!(target: "actions.replace", mode = "pattern", occurrences = stats.occurrences, "replace_ok");
            state.commit(lines);
            Ok(Outcome::Summary(format!("Replaced {}", stats.describe())))
        }
        Err(pattern_err) => {
            warn!(target: "actions.replace", error = %pattern_err, "pattern_failed_retrying_literal");
            match literal_attempt(state.lines(), search, replacement, &filter) {
                Ok((lines, stats)) => {
                    debug!(target: "actions.replace", mode = "literal", occurrences = stats.occurrences, "replace_ok");
                    state.commit(lines);
                    Ok(Outcome::Summary(format!(
                        "Pattern failed ({pattern_err}); replaced {} as literal text",
                        stats.describe()
                    )))
                }
                Err(literal) => Err(ActionError::ReplaceFailed {
                    pattern: pattern_err,
                    literal,
                }),
            }
        }
    }
}

/// Literal replacements from a mapping file, applied pair by pair in file
/// order. Later pairs see the output of earlier ones.
pub(super) fn multiple_replace(
    mapping: &Path,
    separator: &Separator,
    state: &mut EditorState,
) -> Result<Outcome, ActionError> {
    let pairs = read_mapping(mapping, separator)?;
    if pairs.is_empty() {
        return Err(ActionError::Validation(format!(
            "{} contains no key/value pairs",
            mapping.display()
        )));
    }
    let (lines, stats) = rewrite_lines(
        state.lines(),
        |_| true,
        |body| -> Result<(String, usize), SubstitutionError> {
            let mut text = body.to_owned();
            let mut total = 0;
            for (key, value) in &pairs {
                let (next, n) = replace_literal(&text, key, value)?;
                text = next;
                total += n;
            }
            Ok((text, total))
        },
    )
    .map_err(|literal| ActionError::ReplaceFailed {
        pattern: "mapping".into(),
        literal,
    })?;
    state.commit(lines);
    Ok(Outcome::Summary(format!(
        "Applied {} pairs: replaced {}",
        pairs.len(),
        stats.describe()
    )))
}
