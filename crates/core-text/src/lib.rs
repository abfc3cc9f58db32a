//! Line terminator policy shared by every crate that touches buffer text.
//!
//! A document is held as an ordered `Vec<String>` where each element is one
//! line *including* its original terminator (`\n` or `\r\n`). The final line
//! of a file without a trailing newline is simply unterminated. Operations that
//! synthesize new lines always terminate them with a single [`LF`].

/// Terminator appended to synthesized lines.
pub const LF: &str = "\n";

/// Split `text` into lines, each retaining its terminator.
///
/// An empty input yields no lines (not a single empty line).
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_owned).collect()
}

/// Normalize Windows line endings to `\n` (used for clipboard text).
pub fn normalize_crlf(text: &str) -> String {
    if text.contains("\r\n") {
        text.replace("\r\n", "\n")
    } else {
        text.to_owned()
    }
}

/// Split a line into `(content, terminator)`.
pub fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, &line[body.len()..])
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, &line[body.len()..])
    } else {
        (line, "")
    }
}

/// Line content without its terminator.
pub fn content(line: &str) -> &str {
    split_terminator(line).0
}

/// Rebuild a line from new content, keeping the terminator of `original`.
pub fn with_terminator_of(original: &str, new_content: &str) -> String {
    let (_, term) = split_terminator(original);
    let mut out = String::with_capacity(new_content.len() + term.len());
    out.push_str(new_content);
    out.push_str(term);
    out
}

/// Build a synthesized line: `content` followed by a single [`LF`].
pub fn terminated(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + 1);
    out.push_str(content);
    out.push_str(LF);
    out
}

/// Terminate an unterminated final line so that reordering never fuses lines.
/// Returns true when a terminator was appended.
pub fn ensure_terminated(lines: &mut [String]) -> bool {
    match lines.last_mut() {
        Some(last) if !last.ends_with('\n') => {
            last.push_str(LF);
            true
        }
        _ => false,
    }
}

/// Concatenate lines verbatim (inverse of [`split_lines`]).
pub fn join(lines: &[String]) -> String {
    lines.concat()
}
