//! Replacement templates with backslash group references.
//!
//! Template syntax:
//! - `\0` inserts the whole match;
//! - `\1`..`\99` insert numbered groups;
//! - `\g<name>` inserts a named (or numbered) group;
//! - `$1`, `$name` and `${name}` follow the regex crate's forms, `$$` is a `$`;
//! - `\\` is a literal backslash and `\t` a tab.
//!
//! Any other backslash sequence, and a `$` not followed by a name, is copied
//! through unchanged. A reference to a group the pattern does not define is an
//! error, which callers use to trigger the literal fallback.

use regex::{Captures, Regex};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubstitutionError {
    #[error("invalid group reference \\{group} (pattern has {available} group(s))")]
    UnknownGroup { group: usize, available: usize },
    #[error("unknown group name `{0}`")]
    UnknownName(String),
    #[error("search text is empty")]
    EmptySearch,
}

/// Piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Text(String),
    Group(usize),
    Named(String),
}

/// Resolve a `\g<..>` or `$..` reference against the pattern's groups.
fn group_ref(re: &Regex, name: &str) -> Result<Piece, SubstitutionError> {
    let available = re.captures_len();
    if let Ok(n) = name.parse::<usize>() {
        if n >= available {
            return Err(SubstitutionError::UnknownGroup {
                group: n,
                available: available.saturating_sub(1),
            });
        }
        return Ok(Piece::Group(n));
    }
    if re.capture_names().flatten().any(|c| c == name) {
        Ok(Piece::Named(name.to_owned()))
    } else {
        Err(SubstitutionError::UnknownName(name.to_owned()))
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn parse_template(re: &Regex, template: &str) -> Result<Vec<Piece>, SubstitutionError> {
    let available = re.captures_len();
    let mut pieces = Vec::new();
    let mut native = String::new();
    let mut chars = template.char_indices().peekable();
    while let Some((at, ch)) = chars.next() {
        if ch == '$' {
            match chars.peek().copied() {
                Some((_, '$')) => {
                    chars.next();
                    native.push('$');
                }
                Some((open, '{')) if template[open + 1..].contains('}') => {
                    let rest = &template[open + 1..];
                    let name = rest.split('}').next().unwrap_or_default();
                    // `{`, the name, `}`
                    for _ in 0..name.chars().count() + 2 {
                        chars.next();
                    }
                    flush(&mut pieces, &mut native);
                    pieces.push(group_ref(re, name)?);
                }
                Some((_, c)) if is_name_char(c) => {
                    let rest = &template[at + 1..];
                    let len = rest.find(|c: char| !is_name_char(c)).unwrap_or(rest.len());
                    let name = &rest[..len];
                    for _ in 0..name.len() {
                        chars.next();
                    }
                    flush(&mut pieces, &mut native);
                    pieces.push(group_ref(re, name)?);
                }
                _ => native.push('$'),
            }
            continue;
        }
        if ch != '\\' {
            native.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some((_, d)) if d.is_ascii_digit() => {
                chars.next();
                let mut group = d.to_digit(10).unwrap_or(0) as usize;
                if let Some(&(_, d2)) = chars.peek()
                    && d2.is_ascii_digit()
                    && group != 0
                {
                    let wide = group * 10 + d2.to_digit(10).unwrap_or(0) as usize;
                    if wide < available {
                        chars.next();
                        group = wide;
                    }
                }
                if group >= available {
                    return Err(SubstitutionError::UnknownGroup {
                        group,
                        available: available.saturating_sub(1),
                    });
                }
                flush(&mut pieces, &mut native);
                pieces.push(Piece::Group(group));
            }
            Some((start, 'g')) if template[start + 1..].starts_with('<') => {
                let rest = &template[start + 2..];
                let Some(close) = rest.find('>') else {
                    native.push('\\');
                    continue;
                };
                let name = &rest[..close];
                // `g`, `<`, the name, `>`
                for _ in 0..name.chars().count() + 3 {
                    chars.next();
                }
                flush(&mut pieces, &mut native);
                pieces.push(group_ref(re, name)?);
            }
            Some((_, '\\')) => {
                chars.next();
                native.push('\\');
            }
            Some((_, 't')) => {
                chars.next();
                native.push('\t');
            }
            _ => native.push('\\'),
        }
    }
    flush(&mut pieces, &mut native);
    Ok(pieces)
}

fn flush(pieces: &mut Vec<Piece>, native: &mut String) {
    if !native.is_empty() {
        pieces.push(Piece::Text(std::mem::take(native)));
    }
}

fn expand(caps: &Captures<'_>, pieces: &[Piece], dst: &mut String) {
    for piece in pieces {
        match piece {
            Piece::Text(text) => dst.push_str(text),
            Piece::Group(n) => dst.push_str(caps.get(*n).map_or("", |m| m.as_str())),
            Piece::Named(name) => dst.push_str(caps.name(name).map_or("", |m| m.as_str())),
        }
    }
}

/// Replace every match of `re` in `text` using `template`.
/// Returns the rewritten text and the number of matches replaced.
pub fn replace_all(
    re: &Regex,
    text: &str,
    template: &str,
) -> Result<(String, usize), SubstitutionError> {
    let pieces = parse_template(re, template)?;
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut count = 0;
    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        expand(&caps, &pieces, &mut out);
        last = whole.end();
        count += 1;
    }
    if count == 0 {
        return Ok((text.to_owned(), 0));
    }
    out.push_str(&text[last..]);
    Ok((out, count))
}

/// Plain substring replacement. Returns the rewritten text and occurrence count.
pub fn replace_literal(
    text: &str,
    search: &str,
    replacement: &str,
) -> Result<(String, usize), SubstitutionError> {
    if search.is_empty() {
        return Err(SubstitutionError::EmptySearch);
    }
    let count = text.matches(search).count();
    if count == 0 {
        return Ok((text.to_owned(), 0));
    }
    Ok((text.replace(search, replacement), count))
}
