// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Folding an edited span into the change set.
//!
//! Runs before a step's map is applied, so everything here is in the
//! coordinates of the document before the step.

use log::debug;
use smallvec::SmallVec;

use crate::author::AuthorId;
use crate::error::ModelError;
use crate::model::Node;
use super::change::{restore_span, ChangeId, Side, TrackedChange};
use super::set::ChangeSet;

/// A change the recorder produced during the current step, and the side the
/// minimizer may trim once the step is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Updated {
    pub id: ChangeId,
    pub side: Side,
}

/// Make the change set cover the span `from..to` of `doc` for `author`.
///
/// Every change by `author` that overlaps or touches the span is absorbed
/// into one change covering all of them and the span. With nothing to
/// absorb, a new change is created whose deleted content is the span as it
/// is now. The resulting change may still be empty at this point (a pure
/// insertion); mapping it through the step gives it its real extent.
pub fn record_range(
    doc: &Node,
    from: usize,
    to: usize,
    author: AuthorId,
    changes: &mut ChangeSet,
) -> Result<Updated, ModelError> {
    let touched: SmallVec<[ChangeId; 4]> = changes
        .iter()
        .take_while(|change| change.from <= to)
        .filter(|change| change.author == author && change.to >= from)
        .map(|change| change.id)
        .collect();

    if touched.is_empty() {
        let change = TrackedChange {
            id: changes.allocate_id(),
            from,
            to,
            deleted: doc.slice(from, to)?,
            author,
        };
        debug!("created change {}", change);
        let id = change.id;
        changes.insert_sorted(change);
        return Ok(Updated { id, side: Side::Start });
    }

    let absorbed: Vec<TrackedChange> = touched
        .iter()
        .filter_map(|id| changes.remove(*id))
        .collect();
    let first = &absorbed[0];
    let new_from = first.from.min(from);
    let new_to = absorbed.iter().map(|change| change.to).fold(to, usize::max);
    let side = if from <= first.from { Side::Start } else { Side::End };

    // A single change that already covers the span keeps its snapshot:
    // nothing outside it was touched.
    let covered = absorbed.len() == 1 && first.from <= from && first.to >= to;
    let deleted = if covered {
        first.deleted.clone()
    } else {
        restore_span(doc, &absorbed, new_from, new_to)?
    };

    let merged = TrackedChange {
        id: first.id,
        from: new_from,
        to: new_to,
        deleted,
        author,
    };
    debug!("merged {} change(s) into {}", absorbed.len(), merged);
    changes.insert_sorted(merged);
    return Ok(Updated { id: first.id, side });
}
