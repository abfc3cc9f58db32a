use tracing::trace;

/// Single-level undo: the buffer as it was strictly before the last mutation.
///
/// Every mutating command overwrites the slot; restoring never clears it, so a
/// repeated restore re-applies the same snapshot.
#[derive(Debug, Default, Clone)]
pub struct UndoSlot {
    previous: Option<Vec<String>>,
}

impl UndoSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the slot with `lines`.
    pub fn record(&mut self, lines: Vec<String>) {
        trace!(target: "state.snapshot", lines = lines.len(), "snapshot_recorded");
        self.previous = Some(lines);
    }

    /// Snapshot if one exists and it is non-empty.
    pub fn get(&self) -> Option<&[String]> {
        self.previous.as_deref().filter(|lines| !lines.is_empty())
    }
}
