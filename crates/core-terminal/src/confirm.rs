//! Interactive per-match confirmation for `replace_confirm`.

use std::io::{self, Write};

use core_actions::{ConfirmPort, Decision, MatchContext};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use tracing::trace;

use crate::RawModeGuard;

/// Prompts on stdout and reads answers from the terminal.
#[derive(Debug, Default)]
pub struct TerminalConfirm {
    pub color: bool,
}

impl TerminalConfirm {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

/// Map a keypress to an answer; `None` means keep waiting.
pub fn decision_for(key: &KeyEvent) -> Option<Decision> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d')).then_some(Decision::Quit);
    }
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(Decision::Accept),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Decision::Reject),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(Decision::AcceptAll),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Decision::Quit),
        _ => None,
    }
}

/// Writes the line with the match highlighted, the replacement, and the question.
pub fn render_context<W: Write>(out: &mut W, ctx: &MatchContext<'_>, color: bool) -> io::Result<()> {
    queue!(out, Print(format!("{:>5}: {}", ctx.line_number, ctx.before())))?;
    if color {
        queue!(
            out,
            SetForegroundColor(Color::Red),
            SetAttribute(Attribute::Bold),
            Print(ctx.matched()),
            SetAttribute(Attribute::Reset),
            ResetColor
        )?;
    } else {
        queue!(out, Print(format!("[{}]", ctx.matched())))?;
    }
    queue!(out, Print(format!("{}\r\n", ctx.after())))?;
    queue!(out, Print("       -> "))?;
    if color {
        queue!(out, SetForegroundColor(Color::Green), Print(ctx.replacement), ResetColor)?;
    } else {
        queue!(out, Print(ctx.replacement))?;
    }
    queue!(out, Print("\r\n  Replace? [y/n/a/q] "))?;
    out.flush()
}

fn read_decision() -> io::Result<Decision> {
    loop {
        if let Event::Key(key) = event::read()?
            && let Some(decision) = decision_for(&key)
        {
            return Ok(decision);
        }
    }
}

impl ConfirmPort for TerminalConfirm {
    fn decide(&mut self, ctx: &MatchContext<'_>) -> io::Result<Decision> {
        let mut stdout = io::stdout();
        render_context(&mut stdout, ctx, self.color)?;
        let guard = RawModeGuard::enter().map_err(io::Error::other)?;
        let decision = read_decision();
        guard.leave().map_err(io::Error::other)?;
        let decision = decision?;
        writeln!(stdout, "{}", answer_label(decision))?;
        trace!(target: "actions.replace", line = ctx.line_number, ?decision, "confirm_answer");
        Ok(decision)
    }
}

fn answer_label(decision: Decision) -> &'static str {
    match decision {
        Decision::Accept => "y",
        Decision::Reject => "n",
        Decision::AcceptAll => "a",
        Decision::Quit => "q",
    }
}
