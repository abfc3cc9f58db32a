//! Transform engine: typed operations over the line buffer.
//!
//! Raw input is classified by [`CommandTable`] into a [`ParsedCommand`], turned
//! into an [`Operation`], and applied by [`dispatcher::dispatch`] against an
//! `EditorState`. Each operation either returns an [`Outcome`] for the shell to
//! render or an [`ActionError`]; in the error case the buffer, its undo
//! snapshot and the selection are untouched.

use std::path::PathBuf;

pub mod dispatcher;
pub mod error;
pub mod help;
pub mod io_ops;
pub mod ports;

pub use dispatcher::command_parser::{CommandKind, CommandTable, ParsedCommand, split_args};
pub use dispatcher::dispatch;
pub use error::{ActionError, ErrorKind};
pub use io_ops::Separator;
pub use ports::{Clipboard, ConfirmPort, Decision, MatchContext, Ports};

/// Case conversion target for `convert_case`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMode {
    Upper,
    Lower,
    Title,
}

impl CaseMode {
    pub fn parse(raw: &str) -> Result<Self, ActionError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "upper" => Ok(Self::Upper),
            "lower" => Ok(Self::Lower),
            "title" => Ok(Self::Title),
            other => Err(ActionError::Validation(format!(
                "unknown case mode `{other}` (expected upper, lower or title)"
            ))),
        }
    }
}

/// Every command the shell understands, with its arguments already parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Load a file, or the clipboard when `path` is `None`.
    Load { path: Option<PathBuf> },
    /// Save to `path`, or to the source path when `None`.
    Save { path: Option<PathBuf> },
    Show { query: String },
    Count { query: String },
    Select { query: String },
    Unselect,
    Revert,
    Replace { pattern: String, replacement: String },
    ReplaceInLines { search: String, replacement: String, filter: String },
    ReplaceConfirm { old: String, new: String },
    MultipleReplace { mapping: PathBuf, separator: Separator },
    Sort,
    Unique,
    RemoveEmptyLines,
    ReverseLines,
    TrimWhitespace,
    ConvertCase(CaseMode),
    SplitLines { delimiter: String },
    MergeLines { delimiter: String },
    ExtractBetween { start: String, end: String },
    /// 1-based insert position.
    InsertLine { position: usize, text: String },
    ExtractUrls,
    ExtractEmails,
    SelectFromFile { list: PathBuf, negate: bool },
    Help { topic: Option<CommandKind> },
    Exit,
}

impl Operation {
    /// Operations that run without a loaded document.
    pub fn needs_buffer(&self) -> bool {
        !matches!(self, Self::Load { .. } | Self::Help { .. } | Self::Exit)
    }
}

/// What an operation produced, for the shell to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Lines to print verbatim (`show`).
    Lines(Vec<String>),
    /// A number to print (`count`).
    Count(usize),
    /// One-line report of a mutation.
    Summary(String),
    Help(String),
    Quit,
}

impl Outcome {
    /// Text that the `>` suffix sends to the clipboard instead of the terminal.
    pub fn output_text(&self) -> Option<String> {
        match self {
            Self::Lines(lines) => Some(core_text::join(lines)),
            Self::Count(n) => Some(n.to_string()),
            _ => None,
        }
    }
}
