//! Seams to the outside world: clipboard access and the per-match confirmation
//! prompt of `replace_confirm`. Both are synchronous; the terminal
//! implementations live in `core-terminal`, tests script them.

use std::io;

/// System clipboard as plain text.
pub trait Clipboard {
    fn get_text(&mut self) -> io::Result<String>;
    fn set_text(&mut self, text: &str) -> io::Result<()>;
}

/// Answer to a single confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Substitute this match.
    Accept,
    /// Keep the original text.
    Reject,
    /// Substitute this and every remaining match without asking.
    AcceptAll,
    /// Stop; everything not yet decided stays as it is.
    Quit,
}

/// One match presented for confirmation.
#[derive(Debug, Clone, Copy)]
pub struct MatchContext<'a> {
    /// 1-based line number in the buffer.
    pub line_number: usize,
    /// Line content without its terminator.
    pub line: &'a str,
    /// Byte range of the match inside `line`.
    pub start: usize,
    pub end: usize,
    pub replacement: &'a str,
}

impl MatchContext<'_> {
    pub fn before(&self) -> &str {
        &self.line[..self.start]
    }
    pub fn matched(&self) -> &str {
        &self.line[self.start..self.end]
    }
    pub fn after(&self) -> &str {
        &self.line[self.end..]
    }
}

/// Blocks until the user decides what to do with a match.
pub trait ConfirmPort {
    fn decide(&mut self, ctx: &MatchContext<'_>) -> io::Result<Decision>;
}

/// Borrowed collaborators handed to the dispatcher for one command.
pub struct Ports<'a> {
    pub clipboard: &'a mut dyn Clipboard,
    pub confirm: &'a mut dyn ConfirmPort,
}

impl<'a> Ports<'a> {
    pub fn new(clipboard: &'a mut dyn Clipboard, confirm: &'a mut dyn ConfirmPort) -> Self {
        Self { clipboard, confirm }
    }
}
