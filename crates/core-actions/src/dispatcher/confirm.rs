//! Interactive literal replace. Each occurrence blocks on the confirm port.

use super::plural;
use crate::error::ActionError;
use crate::ports::{Decision, MatchContext, Ports};
use crate::Outcome;
use core_state::EditorState;
use tracing::debug;

pub(super) fn replace_confirm(
    old: &str,
    new: &str,
    state: &mut EditorState,
    ports: &mut Ports<'_>,
) -> Result<Outcome, ActionError> {
    if old.is_empty() {
        return Err(ActionError::validation("replace_confirm needs non-empty search text"));
    }
    let mut accept_all = false;
    let mut quit = false;
    let mut replaced = 0usize;
    let mut skipped = 0usize;
    let mut out = Vec::with_capacity(state.line_count());

    for (idx, line) in state.lines().iter().enumerate() {
        if quit {
            out.push(line.clone());
            continue;
        }
        let (body, term) = core_text::split_terminator(line);
        let mut rebuilt = String::with_capacity(body.len());
        let mut copied = 0;
        for (start, found) in body.match_indices(old) {
            let end = start + found.len();
            let decision = if accept_all {
                Decision::Accept
            } else {
                let ctx = MatchContext {
                    line_number: idx + 1,
                    line: body,
                    start,
                    end,
                    replacement: new,
                };
                ports.confirm.decide(&ctx).map_err(|source| ActionError::Io {
                    context: "confirmation prompt".into(),
                    source,
                })?
            };
            match decision {
                Decision::Accept | Decision::AcceptAll => {
                    accept_all |= decision == Decision::AcceptAll;
                    rebuilt.push_str(&body[copied..start]);
                    rebuilt.push_str(new);
                    copied = end;
                    replaced += 1;
                }
                Decision::Reject => skipped += 1,
                Decision::Quit => {
                    quit = true;
                    break;
                }
            }
        }
        rebuilt.push_str(&body[copied..]);
        rebuilt.push_str(term);
        out.push(rebuilt);
    }

    debug!(target: "actions.replace", mode = "confirm", replaced, skipped, quit, "replace_confirm_done");
    state.commit(out);
    let mut summary = format!("Replaced {}, skipped {}", plural(replaced, "occurrence"), skipped);
    if quit {
        summary.push_str(" (stopped early)");
    }
    Ok(Outcome::Summary(summary))
}
