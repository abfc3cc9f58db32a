//! Command line classification.
//!
//! The raw line is split into a command name and a free-form argument string.
//! The name is looked up in a table built once at startup and mapped onto the
//! closed [`CommandKind`] set; each kind then parses its own arguments into a
//! typed [`Operation`]. Parsing has no side effects.
//!
//! Suffixes: a trailing standalone `?` (or `name?`) asks for help, a trailing
//! standalone `>` (or `name>`) routes the command's output to the clipboard.

use crate::error::ActionError;
use crate::io_ops::Separator;
use crate::{CaseMode, Operation};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Load,
    Save,
    Show,
    Count,
    Select,
    Unselect,
    Revert,
    Replace,
    ReplaceInLines,
    ReplaceConfirm,
    MultipleReplace,
    Sort,
    Unique,
    RemoveEmptyLines,
    ReverseLines,
    TrimWhitespace,
    ConvertCase,
    SplitLines,
    MergeLines,
    ExtractBetween,
    InsertLine,
    ExtractUrls,
    ExtractEmails,
    SelectFromFile,
    Help,
    Exit,
}

impl CommandKind {
    pub const ALL: [CommandKind; 26] = [
        Self::Load,
        Self::Save,
        Self::Show,
        Self::Count,
        Self::Select,
        Self::Unselect,
        Self::Revert,
        Self::Replace,
        Self::ReplaceInLines,
        Self::ReplaceConfirm,
        Self::MultipleReplace,
        Self::Sort,
        Self::Unique,
        Self::RemoveEmptyLines,
        Self::ReverseLines,
        Self::TrimWhitespace,
        Self::ConvertCase,
        Self::SplitLines,
        Self::MergeLines,
        Self::ExtractBetween,
        Self::InsertLine,
        Self::ExtractUrls,
        Self::ExtractEmails,
        Self::SelectFromFile,
        Self::Help,
        Self::Exit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Save => "save",
            Self::Show => "show",
            Self::Count => "count",
            Self::Select => "select",
            Self::Unselect => "unselect",
            Self::Revert => "revert",
            Self::Replace => "replace",
            Self::ReplaceInLines => "replace_in_lines",
            Self::ReplaceConfirm => "replace_confirm",
            Self::MultipleReplace => "multiple_replace",
            Self::Sort => "sort",
            Self::Unique => "unique",
            Self::RemoveEmptyLines => "remove_empty_lines",
            Self::ReverseLines => "reverse_lines",
            Self::TrimWhitespace => "trim_whitespace",
            Self::ConvertCase => "convert_case",
            Self::SplitLines => "split_lines",
            Self::MergeLines => "merge_lines",
            Self::ExtractBetween => "extract_between",
            Self::InsertLine => "insert_line",
            Self::ExtractUrls => "extract_urls",
            Self::ExtractEmails => "extract_emails",
            Self::SelectFromFile => "select_from_file",
            Self::Help => "help",
            Self::Exit => "exit",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Exit => &["quit"],
            Self::Revert => &["undo"],
            _ => &[],
        }
    }
}

/// A classified command line, arguments still raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub kind: CommandKind,
    pub args: String,
    /// `?` suffix: show help instead of running.
    pub help: bool,
    /// `>` suffix: send output to the clipboard.
    pub to_clipboard: bool,
}

/// Name lookup built once at startup.
#[derive(Debug, Clone)]
pub struct CommandTable {
    by_name: HashMap<&'static str, CommandKind>,
    default_separator: Separator,
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new(Separator::default())
    }
}

impl CommandTable {
    /// `default_separator` applies to `multiple_replace` without a separator argument.
    pub fn new(default_separator: Separator) -> Self {
        let mut by_name = HashMap::new();
        for kind in CommandKind::ALL {
            by_name.insert(kind.name(), kind);
            for alias in kind.aliases() {
                by_name.insert(*alias, kind);
            }
        }
        Self {
            by_name,
            default_separator,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<CommandKind> {
        self.by_name.get(name).copied()
    }

    /// All command names and aliases, sorted (for completion).
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.by_name.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Classify a raw line. Blank input yields `Ok(None)`.
    pub fn parse(&self, raw: &str) -> Result<Option<ParsedCommand>, ActionError> {
        let line = raw.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (mut name, mut args) = match line.split_once(char::is_whitespace) {
            Some((n, rest)) => (n, rest.trim()),
            None => (line, ""),
        };
        let mut help = false;
        let mut to_clipboard = false;
        loop {
            if let Some(rest) = strip_flag(args, '?') {
                help = true;
                args = rest;
            } else if let Some(rest) = strip_flag(args, '>') {
                to_clipboard = true;
                args = rest;
            } else {
                break;
            }
        }
        if self.lookup(name).is_none() && name.len() > 1 {
            if let Some(n) = name.strip_suffix('?') {
                help = true;
                name = n;
            } else if let Some(n) = name.strip_suffix('>') {
                to_clipboard = true;
                name = n;
            }
        }
        let kind = self
            .lookup(name)
            .ok_or_else(|| ActionError::Validation(format!("unknown command `{name}` (try `help`)")))?;
        Ok(Some(ParsedCommand {
            kind,
            args: args.to_owned(),
            help,
            to_clipboard,
        }))
    }

    /// Parse the arguments of `cmd` into an operation.
    pub fn to_operation(&self, cmd: &ParsedCommand) -> Result<Operation, ActionError> {
        let args = cmd.args.as_str();
        let kind = cmd.kind;
        let op = match kind {
            CommandKind::Load => Operation::Load {
                path: optional_path(kind, args)?,
            },
            CommandKind::Save => Operation::Save {
                path: optional_path(kind, args)?,
            },
            CommandKind::Show => Operation::Show { query: args.to_owned() },
            CommandKind::Count => Operation::Count { query: args.to_owned() },
            CommandKind::Select => Operation::Select { query: args.to_owned() },
            CommandKind::Unselect => no_args(kind, args, Operation::Unselect)?,
            CommandKind::Revert => no_args(kind, args, Operation::Revert)?,
            CommandKind::Replace => {
                let [pattern, replacement] = exact::<2>(kind, args)?;
                Operation::Replace { pattern, replacement }
            }
            CommandKind::ReplaceInLines => {
                let [search, replacement, filter] = exact::<3>(kind, args)?;
                Operation::ReplaceInLines {
                    search,
                    replacement,
                    filter,
                }
            }
            CommandKind::ReplaceConfirm => {
                let [old, new] = exact::<2>(kind, args)?;
                Operation::ReplaceConfirm {
                    old: core_pattern::expand_literal(&old),
                    new: core_pattern::expand_literal(&new),
                }
            }
            CommandKind::MultipleReplace => {
                let tokens = split_args(args)?;
                let separator = match tokens.get(1) {
                    Some(raw) => Separator::parse(raw)?,
                    None => self.default_separator.clone(),
                };
                match tokens.first() {
                    Some(path) if tokens.len() <= 2 => Operation::MultipleReplace {
                        mapping: PathBuf::from(path),
                        separator,
                    },
                    _ => return Err(arity(kind, "1 or 2", tokens.len())),
                }
            }
            CommandKind::Sort => no_args(kind, args, Operation::Sort)?,
            CommandKind::Unique => no_args(kind, args, Operation::Unique)?,
            CommandKind::RemoveEmptyLines => no_args(kind, args, Operation::RemoveEmptyLines)?,
            CommandKind::ReverseLines => no_args(kind, args, Operation::ReverseLines)?,
            CommandKind::TrimWhitespace => no_args(kind, args, Operation::TrimWhitespace)?,
            CommandKind::ConvertCase => {
                let [mode] = exact::<1>(kind, args)?;
                Operation::ConvertCase(CaseMode::parse(&mode)?)
            }
            CommandKind::SplitLines => {
                let delimiter = free_text(args);
                if delimiter.is_empty() {
                    return Err(ActionError::validation("split_lines needs a delimiter"));
                }
                Operation::SplitLines { delimiter }
            }
            CommandKind::MergeLines => Operation::MergeLines {
                delimiter: free_text(args),
            },
            CommandKind::ExtractBetween => {
                let [start, end] = exact::<2>(kind, args)?;
                Operation::ExtractBetween { start, end }
            }
            CommandKind::InsertLine => {
                let (first, rest) = match args.split_once(char::is_whitespace) {
                    Some((p, rest)) => (p, rest),
                    None => (args, ""),
                };
                if first.is_empty() {
                    return Err(arity(kind, "2", 0));
                }
                let position = first.parse::<usize>().map_err(|_| {
                    ActionError::Validation(format!("line number must be a positive integer, got `{first}`"))
                })?;
                Operation::InsertLine {
                    position,
                    text: free_text(rest),
                }
            }
            CommandKind::ExtractUrls => no_args(kind, args, Operation::ExtractUrls)?,
            CommandKind::ExtractEmails => no_args(kind, args, Operation::ExtractEmails)?,
            CommandKind::SelectFromFile => {
                let tokens = split_args(args)?;
                match tokens.as_slice() {
                    [path] => Operation::SelectFromFile {
                        list: PathBuf::from(path),
                        negate: false,
                    },
                    [path, flag] if flag == "not" || flag == "!" => Operation::SelectFromFile {
                        list: PathBuf::from(path),
                        negate: true,
                    },
                    [_, flag] => {
                        return Err(ActionError::Validation(format!(
                            "unknown select_from_file flag `{flag}` (expected `not`)"
                        )));
                    }
                    _ => return Err(arity(kind, "1 or 2", tokens.len())),
                }
            }
            CommandKind::Help => {
                let tokens = split_args(args)?;
                match tokens.as_slice() {
                    [] => Operation::Help { topic: None },
                    [topic] => Operation::Help {
                        topic: Some(self.lookup(topic).ok_or_else(|| {
                            ActionError::Validation(format!("no help for unknown command `{topic}`"))
                        })?),
                    },
                    _ => return Err(arity(kind, "0 or 1", tokens.len())),
                }
            }
            CommandKind::Exit => Operation::Exit,
        };
        Ok(op)
    }
}

fn strip_flag(args: &str, flag: char) -> Option<&str> {
    let rest = args.strip_suffix(flag)?;
    if rest.is_empty() {
        Some(rest)
    } else if rest.ends_with(char::is_whitespace) {
        Some(rest.trim_end())
    } else {
        None
    }
}

fn arity(kind: CommandKind, expected: &str, got: usize) -> ActionError {
    ActionError::Validation(format!(
        "{} expects {expected} argument(s), got {got}",
        kind.name()
    ))
}

fn no_args(kind: CommandKind, args: &str, op: Operation) -> Result<Operation, ActionError> {
    if args.is_empty() {
        Ok(op)
    } else {
        Err(ActionError::Validation(format!("{} takes no arguments", kind.name())))
    }
}

fn exact<const N: usize>(kind: CommandKind, args: &str) -> Result<[String; N], ActionError> {
    let tokens = split_args(args)?;
    let got = tokens.len();
    tokens
        .try_into()
        .map_err(|_| arity(kind, &N.to_string(), got))
}

fn optional_path(kind: CommandKind, args: &str) -> Result<Option<PathBuf>, ActionError> {
    let tokens = split_args(args)?;
    match tokens.as_slice() {
        [] => Ok(None),
        [path] => Ok(Some(PathBuf::from(path))),
        _ => Err(arity(kind, "0 or 1", tokens.len())),
    }
}

/// Whole argument string as one value: outer quotes stripped, placeholders
/// expanded to plain characters.
fn free_text(args: &str) -> String {
    core_pattern::expand_literal(core_pattern::strip_quotes(args))
}

/// Shell-like split: whitespace separates tokens, `"…"` and `'…'` group.
/// Quotes join with adjacent text and an empty quoted pair is an empty token.
pub fn split_args(args: &str) -> Result<Vec<String>, ActionError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    for ch in args.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }
    if let Some(q) = quote {
        return Err(ActionError::Validation(format!("unterminated {q} quote")));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
