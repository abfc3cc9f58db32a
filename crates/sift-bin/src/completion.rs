//! Tab completion of command names for the line editor.

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

pub struct SiftHelper {
    names: Vec<&'static str>,
}

impl SiftHelper {
    pub fn new(names: Vec<&'static str>) -> Self {
        Self { names }
    }
}

/// Start offset and candidates for the word under the cursor.
///
/// The first word completes against command names, and so does the argument
/// of `help`. Other positions get nothing.
pub fn candidates(names: &[&'static str], line: &str, pos: usize) -> (usize, Vec<&'static str>) {
    let head = &line[..pos];
    let start = head
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let prefix = &head[start..];
    let preceding: Vec<&str> = head[..start].split_whitespace().collect();
    let completes_name = match preceding.as_slice() {
        [] => true,
        ["help"] => true,
        _ => false,
    };
    if !completes_name {
        return (start, Vec::new());
    }
    let found = names
        .iter()
        .copied()
        .filter(|name| name.starts_with(prefix))
        .collect();
    (start, found)
}

impl Completer for SiftHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, found) = candidates(&self.names, line, pos);
        let pairs = found
            .into_iter()
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for SiftHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<Self::Hint> {
        None
    }
}

impl Highlighter for SiftHelper {}

impl Validator for SiftHelper {}

impl Helper for SiftHelper {}
