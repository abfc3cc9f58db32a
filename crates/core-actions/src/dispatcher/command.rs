//! Load and save.

use super::plural;
use crate::error::ActionError;
use crate::io_ops::{load_clipboard, load_file, save_file, save_target};
use crate::ports::Ports;
use crate::Outcome;
use core_state::EditorState;
use std::path::PathBuf;
use tracing::info;

pub(super) fn load(
    path: Option<PathBuf>,
    state: &mut EditorState,
    ports: &mut Ports<'_>,
) -> Result<Outcome, ActionError> {
    let (lines, origin) = match path {
        Some(path) => (load_file(&path)?, Some(path)),
        None => (load_clipboard(ports.clipboard)?, None),
    };
    let summary = match &origin {
        Some(p) => format!("Loaded {} from {}", plural(lines.len(), "line"), p.display()),
        None => format!("Loaded {} from clipboard", plural(lines.len(), "line")),
    };
    info!(target: "io", lines = lines.len(), from_file = origin.is_some(), "document_loaded");
    state.load(lines, origin);
    Ok(Outcome::Summary(summary))
}

pub(super) fn save(path: Option<PathBuf>, state: &mut EditorState) -> Result<Outcome, ActionError> {
    let target = save_target(path.as_deref(), state.source_path.as_deref())?;
    let bytes = save_file(&target, state.lines())?;
    Ok(Outcome::Summary(format!(
        "Saved {} ({} bytes) to {}",
        plural(state.line_count(), "line"),
        bytes,
        target.display()
    )))
}
