//! Terminal-side implementations of the engine's ports.
//!
//! `SystemClipboard` shells out to the platform clipboard tools and
//! `TerminalConfirm` asks about each match with a single keypress read in
//! raw mode. Raw mode is scoped by [`RawModeGuard`] so an early return or a
//! panic inside a prompt never leaves the terminal in a broken state.

use anyhow::Result;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

pub mod clipboard;
pub mod confirm;

pub use clipboard::{ClipboardCommands, SystemClipboard};
pub use confirm::TerminalConfirm;

/// RAII guard ensuring raw mode is left even if the caller early-returns or panics.
pub struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self { active: true })
    }

    /// Leave raw mode now instead of at drop.
    pub fn leave(mut self) -> Result<()> {
        self.active = false;
        disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.active {
            let _ = disable_raw_mode();
        }
    }
}
