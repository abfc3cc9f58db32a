//! Line buffer session state.
//!
//! `EditorState` owns the document (`current`), the single undo snapshot, the
//! pre-selection snapshot with the kept indices, and the source path. It is
//! created empty, replaced wholesale by a load, and mutated in place by every
//! transform through [`EditorState::commit`], which is the only way `current`
//! changes outside revert/select/unselect.
//!
//! Selection merge:
//! - `select` stores the full document as `Selection::base` and the positions
//!   (in `base`) of the lines it kept, in buffer order.
//! - `unselect` writes the current lines back over `base` by pairing
//!   `indices[k]` with `current[k]`. If a structural edit changed the line count
//!   in between, the pairing is positional and may attribute lines to the
//!   wrong original index; out-of-range indices are skipped. This is a known
//!   boundary and is logged, not repaired.

use std::path::PathBuf;
use tracing::{debug, warn};

pub mod undo;
pub use undo::UndoSlot;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("nothing to revert")]
    NoHistory,
    #[error("no active selection; run select first")]
    NoSelection,
}

/// Lines kept by the most recent select, with their positions in `base`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub base: Vec<String>,
    pub indices: Vec<usize>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.base.is_empty() || self.indices.is_empty()
    }
}

/// The shared mutable document state.
#[derive(Debug, Default, Clone)]
pub struct EditorState {
    current: Vec<String>,
    undo: UndoSlot,
    selection: Option<Selection>,
    /// Where the document was loaded from; `None` for clipboard loads.
    pub source_path: Option<PathBuf>,
    loaded: bool,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every field with a freshly loaded document.
    pub fn load(&mut self, lines: Vec<String>, source_path: Option<PathBuf>) {
        debug!(target: "state.snapshot", lines = lines.len(), from_file = source_path.is_some(), "buffer_loaded");
        *self = Self {
            current: lines,
            undo: UndoSlot::new(),
            selection: None,
            source_path,
            loaded: true,
        };
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn lines(&self) -> &[String] {
        &self.current
    }

    pub fn line_count(&self) -> usize {
        self.current.len()
    }

    pub fn previous(&self) -> Option<&[String]> {
        self.undo.get()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Install `lines` as the document, saving the old one as the undo snapshot.
    pub fn commit(&mut self, lines: Vec<String>) {
        let old = std::mem::replace(&mut self.current, lines);
        self.undo.record(old);
    }

    /// Restore the undo snapshot. The snapshot itself is left in place.
    pub fn revert(&mut self) -> Result<usize, StateError> {
        let restored = self.undo.get().ok_or(StateError::NoHistory)?.to_vec();
        debug!(target: "state.snapshot", from = self.current.len(), to = restored.len(), "revert");
        self.current = restored;
        Ok(self.current.len())
    }

    /// Narrow the document to lines for which `keep` holds.
    ///
    /// The full document becomes both the undo snapshot and the selection base,
    /// so a plain revert undoes the narrowing. Returns the kept count.
    pub fn select_where<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        let base = self.current.clone();
        let mut indices = Vec::new();
        let mut kept = Vec::new();
        for (i, line) in base.iter().enumerate() {
            if keep(line) {
                indices.push(i);
                kept.push(line.clone());
            }
        }
        debug!(target: "state.selection", base = base.len(), kept = kept.len(), "select");
        self.commit(kept);
        self.selection = Some(Selection { base, indices });
        self.current.len()
    }

    /// Merge the (possibly edited) selected lines back into the selection base
    /// and make the result the document. Returns the merged line count.
    pub fn unselect(&mut self) -> Result<usize, StateError> {
        let selection = self
            .selection
            .as_ref()
            .filter(|s| !s.is_empty())
            .ok_or(StateError::NoSelection)?;
        if selection.indices.len() != self.current.len() {
            warn!(
                target: "state.selection",
                selected = selection.indices.len(),
                current = self.current.len(),
                "selection_length_mismatch"
            );
        }
        let mut merged = selection.base.clone();
        for (&index, line) in selection.indices.iter().zip(self.current.iter()) {
            if let Some(slot) = merged.get_mut(index) {
                slot.clone_from(line);
            }
        }
        debug!(target: "state.selection", merged = merged.len(), "unselect");
        self.commit(merged);
        Ok(self.current.len())
    }
}
