// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Trimming a change down to the content that actually differs.
//!
//! Merging edits can leave a change wider than what it really altered: type
//! "b" over "b" and the merged span still covers it. The minimizer puts the
//! deleted content back into a scratch copy of the document and compares the
//! two trees structurally, so a paragraph boundary that looks like nothing
//! in flat text still counts as a difference.

use log::debug;

use crate::error::ModelError;
use crate::model::Node;
use super::change::{Side, TrackedChange};

/// Trim `change` on `side` against `doc`, the document the change refers
/// to.
///
/// Returns the change unchanged when nothing can be trimmed and `None` when
/// no difference remains at all.
pub fn minimize(change: &TrackedChange, doc: &Node, side: Side) -> Result<Option<TrackedChange>, ModelError> {
    let reconstructed = doc.replace(change.from, change.to, &change.deleted)?;
    let restored_to = change.from + change.deleted.size();

    let a_from = doc.resolve(change.from)?;
    let b_from = reconstructed.resolve(change.from)?;

    // Descend while both versions keep the edited region inside one child.
    let limit = a_from
        .shared_depth(change.to)
        .min(b_from.shared_depth(restored_to));
    let mut depth = 0;
    while depth < limit && a_from.index(depth) == b_from.index(depth) {
        depth += 1;
    }
    let node = a_from.node(depth).content();
    let reconstructed_node = b_from.node(depth).content();

    let inserted = change.to - change.from;
    let removed = change.deleted.size();

    let trimmed = match side {
        Side::Start => {
            let Some(diff) = node.find_diff_start(reconstructed_node, a_from.start(depth)) else {
                debug!("change {} matches the content it replaced", change.id);
                return Ok(None);
            };
            let shift = diff.saturating_sub(change.from).min(inserted).min(removed);
            if shift == 0 {
                return Ok(Some(change.clone()));
            }
            TrackedChange {
                from: change.from + shift,
                deleted: reconstructed.slice(change.from + shift, restored_to)?,
                ..change.clone()
            }
        }
        Side::End => {
            let Some((end_a, end_b)) =
                node.find_diff_end(reconstructed_node, a_from.end(depth), b_from.end(depth))
            else {
                debug!("change {} matches the content it replaced", change.id);
                return Ok(None);
            };
            let shift = change
                .to
                .saturating_sub(end_a)
                .min(restored_to.saturating_sub(end_b))
                .min(inserted)
                .min(removed);
            if shift == 0 {
                return Ok(Some(change.clone()));
            }
            TrackedChange {
                to: change.to - shift,
                deleted: reconstructed.slice(change.from, restored_to - shift)?,
                ..change.clone()
            }
        }
    };

    if trimmed.is_degenerate() {
        debug!("change {} minimized away", change.id);
        return Ok(None);
    }
    debug!("minimized {} to {}..{}", change.id, trimmed.from, trimmed.to);
    return Ok(Some(trimmed));
}
