use super::plural;
use crate::error::ActionError;
use crate::Outcome;
use core_state::EditorState;

pub(super) fn revert(state: &mut EditorState) -> Result<Outcome, ActionError> {
    let restored = state.revert()?;
    tracing::debug!(target: "actions.dispatch", op = "revert", lines = restored, "revert");
    Ok(Outcome::Summary(format!(
        "Reverted to previous state ({})",
        plural(restored, "line")
    )))
}
