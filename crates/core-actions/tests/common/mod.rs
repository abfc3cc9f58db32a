#![allow(dead_code)] // Shared across many integration tests; each test binary uses a subset of helpers.

use core_actions::{
    ActionError, Clipboard, CommandTable, ConfirmPort, Decision, MatchContext, Operation, Outcome,
    Ports, dispatch,
};
use core_state::EditorState;
use std::collections::VecDeque;
use std::io;

/// Clipboard held in memory.
#[derive(Default)]
pub struct MemClipboard {
    pub text: String,
}

impl Clipboard for MemClipboard {
    fn get_text(&mut self) -> io::Result<String> {
        Ok(self.text.clone())
    }
    fn set_text(&mut self, text: &str) -> io::Result<()> {
        self.text = text.to_owned();
        Ok(())
    }
}

/// Confirm port answering from a fixed script and recording what it was shown.
#[derive(Default)]
pub struct ScriptedConfirm {
    pub answers: VecDeque<Decision>,
    pub seen: Vec<(usize, String)>,
}

impl ScriptedConfirm {
    pub fn new(answers: &[Decision]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            seen: Vec::new(),
        }
    }
}

impl ConfirmPort for ScriptedConfirm {
    fn decide(&mut self, ctx: &MatchContext<'_>) -> io::Result<Decision> {
        self.seen.push((ctx.line_number, ctx.matched().to_owned()));
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}

/// Editor state plus in-memory ports.
pub struct Harness {
    pub state: EditorState,
    pub clipboard: MemClipboard,
    pub confirm: ScriptedConfirm,
    pub table: CommandTable,
}

pub fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Harness {
    pub fn empty() -> Self {
        Self {
            state: EditorState::new(),
            clipboard: MemClipboard::default(),
            confirm: ScriptedConfirm::default(),
            table: CommandTable::default(),
        }
    }

    pub fn with_lines(items: &[&str]) -> Self {
        let mut h = Self::empty();
        h.state.load(lines(items), None);
        h
    }

    pub fn apply(&mut self, op: Operation) -> Result<Outcome, ActionError> {
        let mut ports = Ports::new(&mut self.clipboard, &mut self.confirm);
        dispatch(op, &mut self.state, &mut ports)
    }

    /// Parse and run a raw command line.
    pub fn run(&mut self, raw: &str) -> Result<Outcome, ActionError> {
        let cmd = self.table.parse(raw)?.expect("non-blank command");
        let op = self.table.to_operation(&cmd)?;
        self.apply(op)
    }

    pub fn lines(&self) -> Vec<String> {
        self.state.lines().to_vec()
    }
}
