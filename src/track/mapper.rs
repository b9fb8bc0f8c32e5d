// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Moving the change set through a step.

use log::{debug, trace, warn};

use crate::author::AuthorId;
use crate::error::ModelError;
use crate::model::Node;
use crate::transform::{Bias, StepMap};
use super::change::{restore_span, TrackedChange};
use super::minimize::minimize;
use super::record::Updated;
use super::set::ChangeSet;
use super::TrackerConfig;

/// Project every change through one step's map, producing the change set
/// for the document after the step.
///
/// Changes by the editing author grow to include content inserted at their
/// edges; everyone else's changes keep foreign insertions out. Changes that
/// collapse to nothing are dropped. Changes listed in `updated` were just
/// produced by the recorder and are handed to the minimizer instead of
/// being kept as mapped.
pub fn map_changes(
    changes: &ChangeSet,
    map: &StepMap,
    author: Option<AuthorId>,
    updated: &[Updated],
    doc_after: &Node,
    config: &TrackerConfig,
) -> Result<ChangeSet, ModelError> {
    let mut mapped = Vec::with_capacity(changes.len());

    for change in changes {
        let own = author == Some(change.author);
        let (from_bias, mut to_bias) = if own {
            (Bias::Left, Bias::Right)
        } else {
            (Bias::Right, Bias::Left)
        };
        // A foreign insertion at a pure deletion must not pull its two ends
        // apart, so both ends move together.
        if !own && change.from == change.to {
            to_bias = from_bias;
        }

        let from = map.map_result(change.from, from_bias);
        let to = map.map_result(change.to, to_bias);
        trace!("mapped {} to {}..{}", change, from.pos, to.pos);

        let next = TrackedChange {
            from: from.pos,
            to: to.pos,
            ..change.clone()
        };
        if next.from > next.to || next.is_degenerate() {
            debug!("dropped change {} (cancelled out)", change.id);
            continue;
        }

        let side = updated.iter().find(|u| u.id == change.id).map(|u| u.side);
        let next = if side.is_none() && (from.deleted || to.deleted) {
            match salvage(next, doc_after) {
                Some(next) => next,
                None => {
                    warn!("dropped change {} (its surroundings were deleted)", change.id);
                    continue;
                }
            }
        } else {
            next
        };

        match side {
            Some(side) if config.minimize => match minimize(&next, doc_after, side)? {
                Some(minimized) => mapped.push(minimized),
                None => debug!("dropped change {} (no remaining difference)", change.id),
            },
            _ => mapped.push(next),
        }
    }

    let mut result = changes.with_changes(mapped);
    if config.coalesce_touching {
        result = coalesce_touching(result, doc_after)?;
    }
    return Ok(result);
}

/// Check a change whose endpoint was swallowed by a deletion.
///
/// Deleting the paragraph around a change can leave its endpoints in
/// different parents, or leave an open deleted slice at a depth it cannot be
/// replayed from. An insertion keeps whatever part still sits in the parent
/// of `from`; anything else that no longer replays is lost.
fn salvage(change: TrackedChange, doc: &Node) -> Option<TrackedChange> {
    if change.can_revert_in(doc) {
        return Some(change);
    }
    if !change.deleted.is_empty() {
        return None;
    }

    let start = doc.resolve(change.from).ok()?;
    let to = change.to.min(start.end(start.depth()));
    let clamped = TrackedChange { to, ..change };
    if clamped.is_degenerate() || !clamped.can_revert_in(doc) {
        return None;
    }
    debug!("clamped change {} to {}..{}", clamped.id, clamped.from, clamped.to);
    return Some(clamped);
}

/// Merge changes by the same author that ended up touching, which happens
/// when someone else deletes the content between them.
///
/// The merged deleted content is rebuilt against `doc`, the document the
/// changes now refer to.
pub fn coalesce_touching(changes: ChangeSet, doc: &Node) -> Result<ChangeSet, ModelError> {
    let mut pending: Vec<TrackedChange> = changes.as_slice().to_vec();
    let mut merged_any = false;

    'scan: loop {
        for i in 0..pending.len() {
            let partner = (i + 1..pending.len())
                .take_while(|&j| pending[j].from <= pending[i].to)
                .find(|&j| pending[j].author == pending[i].author);
            let Some(j) = partner else {
                continue;
            };

            let second = pending.remove(j);
            let first = pending.remove(i);
            let deleted = restore_span(doc, &[first.clone(), second.clone()], first.from, second.to.max(first.to))?;
            let joined = TrackedChange {
                id: first.id,
                from: first.from,
                to: second.to.max(first.to),
                deleted,
                author: first.author,
            };
            debug!("coalesced {} and {} into {}", first.id, second.id, joined);
            pending.insert(i, joined);
            merged_any = true;
            continue 'scan;
        }
        break;
    }

    if !merged_any {
        return Ok(changes);
    }
    return Ok(changes.with_changes(pending));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build::{doc, p, text};
    use crate::model::{Fragment, Slice};
    use crate::track::{ChangeKind, Side};
    use crate::transform::ReplacedRange;

    const ALICE: AuthorId = AuthorId::new(0);
    const BOB: AuthorId = AuthorId::new(1);

    fn add(set: &mut ChangeSet, from: usize, to: usize, deleted: Slice, author: AuthorId) -> crate::track::ChangeId {
        let id = set.allocate_id();
        set.insert_sorted(TrackedChange { id, from, to, deleted, author });
        return id;
    }

    fn step(start: usize, old_size: usize, new_size: usize) -> StepMap {
        return StepMap::new([ReplacedRange { start, old_size, new_size }]);
    }

    fn text_slice(s: &str) -> Slice {
        return Slice::closed(Fragment::from_node(text(s)));
    }

    #[test]
    fn own_changes_absorb_insertions_at_edges() {
        let mut set = ChangeSet::new();
        let id = add(&mut set, 2, 2, Slice::empty(), ALICE);
        let after = doc(vec![p("fhioo")]);
        let updated = [Updated { id, side: Side::Start }];

        let next = map_changes(&set, &step(2, 0, 2), Some(ALICE), &updated, &after, &TrackerConfig::default()).unwrap();
        let change = next.get(id).unwrap();
        assert_eq!((change.from, change.to), (2, 4));
        assert_eq!(change.kind(), ChangeKind::Insertion);
    }

    #[test]
    fn foreign_changes_exclude_insertions_at_edges() {
        let mut set = ChangeSet::new();
        let id = add(&mut set, 2, 4, Slice::empty(), BOB);
        let after = doc(vec![p("fabXoo")]);

        let next = map_changes(&set, &step(4, 0, 1), Some(ALICE), &[], &after, &TrackerConfig::default()).unwrap();
        let change = next.get(id).unwrap();
        assert_eq!((change.from, change.to), (2, 4));
    }

    #[test]
    fn foreign_insertion_keeps_deletion_whole() {
        let mut set = ChangeSet::new();
        let id = add(&mut set, 2, 2, text_slice("oo"), BOB);
        let after = doc(vec![p("fXbar")]);

        let next = map_changes(&set, &step(2, 0, 1), Some(ALICE), &[], &after, &TrackerConfig::default()).unwrap();
        let change = next.get(id).unwrap();
        assert_eq!((change.from, change.to), (3, 3));
        assert_eq!(change.kind(), ChangeKind::Deletion);
    }

    #[test]
    fn collapsed_insertions_are_dropped() {
        let mut set = ChangeSet::new();
        add(&mut set, 2, 4, Slice::empty(), BOB);
        let after = doc(vec![p("foo")]);

        let next = map_changes(&set, &step(2, 2, 0), None, &[], &after, &TrackerConfig::default()).unwrap();
        assert!(next.is_empty());
    }

    #[test]
    fn shifts_changes_after_the_edit() {
        let mut set = ChangeSet::new();
        let id = add(&mut set, 4, 6, Slice::empty(), BOB);
        let after = doc(vec![p("hifook")]);

        let next = map_changes(&set, &step(1, 0, 2), Some(ALICE), &[], &after, &TrackerConfig::default()).unwrap();
        let change = next.get(id).unwrap();
        assert_eq!((change.from, change.to), (6, 8));
    }

    #[test]
    fn insertion_cut_by_paragraph_deletion_is_clamped() {
        // "x[ab</p><p>cd]" inserted by bob, then the second paragraph goes.
        let mut set = ChangeSet::new();
        let id = add(&mut set, 2, 8, Slice::empty(), BOB);
        let after = doc(vec![p("xab")]);

        let next = map_changes(&set, &step(5, 4, 0), Some(ALICE), &[], &after, &TrackerConfig::default()).unwrap();
        let change = next.get(id).unwrap();
        assert_eq!((change.from, change.to), (2, 4));
        assert!(change.can_revert_in(&after));
    }

    #[test]
    fn split_inside_deleted_paragraph_is_dropped() {
        // Bob split "jump" at its start; alice then deletes the second paragraph.
        let mut set = ChangeSet::new();
        add(&mut set, 1, 3, Slice::empty(), BOB);
        let joined = Slice::new(Fragment::from_nodes(vec![p("ab"), p("cd")]), 1, 1);
        add(&mut set, 5, 5, joined, BOB);
        let after = doc(vec![p("")]);

        let next = map_changes(&set, &step(2, 6, 0), Some(ALICE), &[], &after, &TrackerConfig::default()).unwrap();
        assert!(next.is_empty());
    }

    #[test]
    fn coalesces_when_gap_is_deleted_by_someone_else() {
        // "aXbYc": alice inserted X and Y, bob then deletes "b".
        let mut set = ChangeSet::new();
        let x = add(&mut set, 2, 3, Slice::empty(), ALICE);
        add(&mut set, 4, 5, Slice::empty(), ALICE);
        let after = doc(vec![p("aXYc")]);

        let next = map_changes(&set, &step(3, 1, 0), None, &[], &after, &TrackerConfig::default()).unwrap();
        assert_eq!(next.len(), 1);
        let change = next.get(x).unwrap();
        assert_eq!((change.from, change.to), (2, 4));
        assert!(change.deleted.is_empty());
        assert_eq!(next.check_invariants(), Ok(()));
    }
}
