//! One line of input in, rendered output out.
//!
//! `Shell` owns the editor state and the terminal-side ports and turns each
//! raw command line into an operation, dispatches it and prints the outcome.
//! Output goes to caller-supplied writers so the whole loop body runs in tests
//! without a terminal.

use std::io::{self, Write};
use std::path::PathBuf;

use core_actions::{
    ActionError, Clipboard, CommandKind, CommandTable, ConfirmPort, Operation, Outcome,
    ParsedCommand, Ports, dispatch,
};
use core_state::EditorState;
use crossterm::style::Stylize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<C, P> {
    state: EditorState,
    table: CommandTable,
    clipboard: C,
    confirm: P,
    color: bool,
}

impl<C: Clipboard, P: ConfirmPort> Shell<C, P> {
    pub fn new(table: CommandTable, clipboard: C, confirm: P, color: bool) -> Self {
        Self {
            state: EditorState::new(),
            table,
            clipboard,
            confirm,
            color,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    fn apply(&mut self, op: Operation) -> Result<Outcome, ActionError> {
        let mut ports = Ports::new(&mut self.clipboard, &mut self.confirm);
        dispatch(op, &mut self.state, &mut ports)
    }

    /// Load the file named on the command line.
    pub fn open<W: Write, E: Write>(&mut self, path: PathBuf, out: &mut W, err: &mut E) -> io::Result<()> {
        match self.apply(Operation::Load { path: Some(path) }) {
            Ok(outcome) => self.print(&outcome, out),
            Err(e) => self.report(&e, err),
        }
    }

    /// Parse and run one raw input line.
    pub fn execute<W: Write, E: Write>(&mut self, line: &str, out: &mut W, err: &mut E) -> io::Result<Flow> {
        let cmd = match self.table.parse(line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                self.report(&e, err)?;
                return Ok(Flow::Continue);
            }
        };
        let op = if cmd.help {
            Operation::Help {
                topic: Some(cmd.kind),
            }
        } else {
            match self.table.to_operation(&cmd) {
                Ok(op) => op,
                Err(e) => {
                    self.report(&e, err)?;
                    return Ok(Flow::Continue);
                }
            }
        };
        info!(target: "runtime", command = cmd.kind.name(), clipboard = cmd.to_clipboard, "command");
        let outcome = match self.apply(op) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.report(&e, err)?;
                return Ok(Flow::Continue);
            }
        };
        if outcome == Outcome::Quit {
            return Ok(Flow::Quit);
        }
        if cmd.to_clipboard && !cmd.help {
            self.copy_out(&cmd, &outcome, out, err)?;
        } else {
            self.print(&outcome, out)?;
        }
        Ok(Flow::Continue)
    }

    /// Text sent to the clipboard by the `>` suffix. Extractions replace the
    /// buffer, so their output is the buffer itself.
    fn clipboard_text(&self, cmd: &ParsedCommand, outcome: &Outcome) -> Option<String> {
        outcome.output_text().or_else(|| {
            matches!(
                cmd.kind,
                CommandKind::ExtractUrls | CommandKind::ExtractEmails | CommandKind::ExtractBetween
            )
            .then(|| self.state.lines().concat())
        })
    }

    fn copy_out<W: Write, E: Write>(
        &mut self,
        cmd: &ParsedCommand,
        outcome: &Outcome,
        out: &mut W,
        err: &mut E,
    ) -> io::Result<()> {
        if let Outcome::Summary(_) = outcome {
            self.print(outcome, out)?;
        }
        let Some(text) = self.clipboard_text(cmd, outcome) else {
            writeln!(out, "`{}` has no output to copy", cmd.kind.name())?;
            return Ok(());
        };
        match self.clipboard.set_text(&text) {
            Ok(()) => writeln!(out, "Copied {} line(s) to clipboard", text.lines().count()),
            Err(e) => self.report(&ActionError::Clipboard(e.to_string()), err),
        }
    }

    fn print<W: Write>(&self, outcome: &Outcome, out: &mut W) -> io::Result<()> {
        match outcome {
            Outcome::Lines(lines) => {
                for line in lines {
                    out.write_all(line.as_bytes())?;
                }
                if lines.last().is_some_and(|l| !l.ends_with('\n')) {
                    out.write_all(b"\n")?;
                }
            }
            Outcome::Count(n) => writeln!(out, "{n}")?,
            Outcome::Summary(s) => writeln!(out, "{s}")?,
            Outcome::Help(text) => {
                let (first, rest) = text.split_once('\n').unwrap_or((text.as_str(), ""));
                if self.color {
                    writeln!(out, "{}", first.bold())?;
                } else {
                    writeln!(out, "{first}")?;
                }
                if !rest.is_empty() {
                    writeln!(out, "{}", rest.trim_end_matches('\n'))?;
                }
            }
            Outcome::Quit => {}
        }
        out.flush()
    }

    fn report<E: Write>(&self, e: &ActionError, err: &mut E) -> io::Result<()> {
        warn!(target: "runtime", kind = ?e.kind(), error = %e, "command_failed");
        let message = format!("error: {e}");
        if self.color {
            writeln!(err, "{}", message.red())
        } else {
            writeln!(err, "{message}")
        }
    }
}
