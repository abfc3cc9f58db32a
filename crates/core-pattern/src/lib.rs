//! Query normalization: user-facing placeholder syntax to compiled regexes.
//!
//! A raw query goes through a fixed pipeline:
//! 1. one layer of matching surrounding quotes (`"` or `'`) is stripped;
//! 2. a leading `!` flips the result (only where the caller allows negation);
//! 3. the remainder is split on the literal token `OR` into trimmed alternatives;
//! 4. placeholder tokens are expanded in each alternative (see [`PLACEHOLDERS`]);
//! 5. every alternative is compiled. One bad alternative fails the whole query.
//!
//! A line matches a [`Query`] iff it matches any alternative, optionally
//! inverted. Placeholders exist so that characters which would otherwise be
//! eaten by the shell's own argument quoting survive into the pattern.

use regex::Regex;
use tracing::trace;

pub mod substitute;
pub use substitute::{SubstitutionError, replace_all, replace_literal};

/// Placeholder tokens and their regex expansion, applied in this order.
pub const PLACEHOLDERS: [(&str, &str); 5] = [
    ("[doublequote]", "\\\""),
    ("[pipe]", "\\|"),
    ("[quote]", "\\'"),
    ("[tab]", "\t"),
    ("[spaces]", "[^\\S\\r\\n]+"),
];

/// Placeholder tokens and their plain-text meaning, used for literal matching.
const LITERAL_PLACEHOLDERS: [(&str, &str); 5] = [
    ("[doublequote]", "\""),
    ("[pipe]", "|"),
    ("[quote]", "'"),
    ("[tab]", "\t"),
    ("[spaces]", " "),
];

/// Separator between alternatives.
pub const OR_TOKEN: &str = "OR";

/// A query alternative failed to compile.
#[derive(Debug, thiserror::Error)]
#[error("invalid pattern `{pattern}`: {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Whether a leading `!` is interpreted as negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Negation {
    /// `!` prefix inverts the match (select family).
    Allowed,
    /// `!` is part of the pattern text.
    Literal,
}

/// Compiled query: OR across alternatives, then optional inversion.
///
/// An empty alternative list matches every line.
#[derive(Debug, Clone)]
pub struct Query {
    alternatives: Vec<Regex>,
    negate: bool,
}

impl Query {
    /// Query that keeps every line.
    pub fn match_all() -> Self {
        Self {
            alternatives: Vec::new(),
            negate: false,
        }
    }

    /// Any-alternative match, then inverted when negated.
    pub fn is_match(&self, text: &str) -> bool {
        let hit = self.alternatives.is_empty() || self.alternatives.iter().any(|re| re.is_match(text));
        hit != self.negate
    }
}

/// Strip one layer of surrounding quotes when the same quote char is on both ends.
pub fn strip_quotes(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

/// Expand placeholder tokens into their regex meaning.
pub fn expand_placeholders(text: &str) -> String {
    expand_with(text, &PLACEHOLDERS)
}

/// Expand placeholder tokens into the plain characters they stand for.
pub fn expand_literal(text: &str) -> String {
    expand_with(text, &LITERAL_PLACEHOLDERS)
}

fn expand_with(text: &str, table: &[(&str, &str)]) -> String {
    let mut out = text.to_owned();
    for (token, meaning) in table {
        if out.contains(token) {
            out = out.replace(token, meaning);
        }
    }
    out
}

/// Compile a single pattern after placeholder expansion (no `OR`, no `!`).
pub fn compile(raw: &str) -> Result<Regex, PatternError> {
    let expanded = expand_placeholders(raw);
    Regex::new(&expanded).map_err(|source| PatternError {
        pattern: expanded,
        source,
    })
}

/// Run the full normalization pipeline over a raw query.
pub fn parse_query(raw: &str, negation: Negation) -> Result<Query, PatternError> {
    let mut body = strip_quotes(raw.trim());
    let mut negate = false;
    if negation == Negation::Allowed
        && let Some(rest) = body.strip_prefix('!')
    {
        negate = true;
        body = rest;
    }
    let alternatives = body
        .split(OR_TOKEN)
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .map(compile)
        .collect::<Result<Vec<_>, _>>()?;
    trace!(target: "pattern", raw, alternatives = alternatives.len(), negate, "query_compiled");
    Ok(Query {
        alternatives,
        negate,
    })
}
