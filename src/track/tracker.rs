// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! The tracker a host editor threads through its edit cycle.
//!
//! The host owns a `TrackerState` per document. After applying an edit it
//! calls [`TrackerState::on_edit_applied`] with the transform; to resolve a
//! change it calls [`TrackerState::accept`] or [`TrackerState::revert`],
//! applies the returned transform, and feeds it back as an untracked edit.

use log::{debug, warn};
use smallvec::SmallVec;

use crate::author::AuthorId;
use crate::error::TrackError;
use crate::model::Node;
use crate::transform::{Bias, EditMeta, EditOrigin, Transform};
use super::change::{ChangeId, TrackedChange};
use super::mapper::map_changes;
use super::record::{record_range, Updated};
use super::set::ChangeSet;

/// Tracker knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Trim freshly updated changes down to the content that differs.
    pub minimize: bool,
    /// Merge same-author changes that end up touching after someone else's
    /// edit.
    pub coalesce_touching: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        return TrackerConfig {
            minimize: true,
            coalesce_touching: true,
        };
    }
}

#[derive(Clone, Debug, Default)]
pub struct TrackerState {
    changes: ChangeSet,
    config: TrackerConfig,
}

impl TrackerState {
    pub fn new(config: TrackerConfig) -> TrackerState {
        return TrackerState {
            changes: ChangeSet::new(),
            config,
        };
    }

    pub fn config(&self) -> &TrackerConfig {
        return &self.config;
    }

    /// The tracked changes, sorted by position.
    pub fn changes(&self) -> &[TrackedChange] {
        return self.changes.as_slice();
    }

    pub fn change_set(&self) -> &ChangeSet {
        return &self.changes;
    }

    pub fn get(&self, id: ChangeId) -> Option<&TrackedChange> {
        return self.changes.get(id);
    }

    /// Bring the change set up to date with an edit the host just applied.
    ///
    /// With `untracked` set, no author, or an edit that is not a user edit,
    /// existing changes are only moved. Otherwise every step is recorded for
    /// `author`. The change set is left untouched if any step fails.
    pub fn on_edit_applied(
        &mut self,
        tr: &Transform,
        author: Option<AuthorId>,
        untracked: bool,
    ) -> Result<(), TrackError> {
        let author = match author {
            Some(author) if !untracked && tr.meta().origin == EditOrigin::User => Some(author),
            _ => None,
        };

        let mut changes = self.changes.clone();
        for step in tr.steps() {
            let mut updated: SmallVec<[Updated; 2]> = SmallVec::new();
            if let Some(author) = author {
                for range in step.map.ranges() {
                    if range.is_noop() {
                        continue;
                    }
                    updated.push(record_range(step.before, range.start, range.old_end(), author, &mut changes)?);
                }
            }
            changes = map_changes(&changes, step.map, author, &updated, step.after, &self.config)?;
            changes.debug_check();
        }

        debug!("{} tracked change(s) after edit", changes.len());
        self.changes = changes;
        return Ok(());
    }

    /// Keep a change's content and stop tracking it.
    pub fn accept(&mut self, id: ChangeId) -> Result<TrackedChange, TrackError> {
        let change = self.changes.remove(id).ok_or(TrackError::NotFound(id))?;
        debug!("accepted {}", change);
        return Ok(change);
    }

    /// Stop tracking a change and build the edit that puts its deleted
    /// content back.
    ///
    /// The transform is marked as a revert and kept out of undo history.
    /// The host applies it and passes it to `on_edit_applied` untracked.
    /// If the content cannot be put back into `doc` the error is returned
    /// and the change stays tracked.
    pub fn revert(&mut self, doc: &Node, id: ChangeId) -> Result<Transform, TrackError> {
        let change = self.changes.get(id).ok_or(TrackError::NotFound(id))?;

        let mut tr = Transform::new(doc.clone());
        tr.replace(change.from, change.to, change.deleted.clone())?;
        tr.set_meta(revert_meta());

        if let Some(change) = self.changes.remove(id) {
            debug!("reverted {}", change);
        }
        return Ok(tr);
    }

    /// Accept every change.
    pub fn accept_all(&mut self) -> Vec<TrackedChange> {
        let accepted = self.changes.drain();
        debug!("accepted {} change(s)", accepted.len());
        return accepted;
    }

    /// Revert every change that can be reverted, in one transform.
    ///
    /// Changes are undone from the end of the document backwards. Changes by
    /// different authors that overlap are reverted one after the other
    /// without reconciling their content. A change whose content no longer
    /// fits where it would go is skipped and stays tracked; the ids of the
    /// skipped changes are returned alongside the transform.
    pub fn revert_all(&mut self, doc: &Node) -> (Transform, Vec<ChangeId>) {
        let mut tr = Transform::new(doc.clone());
        let mut skipped = Vec::new();
        for change in self.changes.iter().rev() {
            let from = tr.mapping().map(change.from, Bias::Left);
            let to = tr.mapping().map(change.to, Bias::Left).max(from);
            if let Err(err) = tr.replace(from, to, change.deleted.clone()) {
                warn!("could not revert {}: {}", change, err);
                skipped.push(change.id);
            }
        }
        tr.set_meta(revert_meta());

        let reverted = self.changes.drain();
        debug!("reverted {} change(s)", reverted.len() - skipped.len());
        for change in reverted {
            if skipped.contains(&change.id) {
                self.changes.insert_sorted(change);
            }
        }
        skipped.reverse();
        return (tr, skipped);
    }
}

fn revert_meta() -> EditMeta {
    return EditMeta {
        origin: EditOrigin::Revert,
        add_to_history: false,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build::{doc, p};
    use crate::model::{Fragment, Slice};
    use crate::track::ChangeKind;

    const ALICE: AuthorId = AuthorId::new(0);
    const BOB: AuthorId = AuthorId::new(1);

    fn edit(state: &mut TrackerState, doc: &Node, author: AuthorId, f: impl FnOnce(&mut Transform)) -> Node {
        let mut tr = Transform::new(doc.clone());
        f(&mut tr);
        state.on_edit_applied(&tr, Some(author), false).unwrap();
        return tr.into_doc();
    }

    fn spans(state: &TrackerState) -> Vec<(usize, usize)> {
        return state.changes().iter().map(|c| (c.from, c.to)).collect();
    }

    #[test]
    fn typing_merges_into_one_change() {
        let mut state = TrackerState::default();
        let d = doc(vec![p("foo")]);
        let d = edit(&mut state, &d, ALICE, |tr| {
            tr.insert_text(2, "a").unwrap();
        });
        let d = edit(&mut state, &d, ALICE, |tr| {
            tr.insert_text(3, "b").unwrap();
        });
        assert_eq!(d, doc(vec![p("faboo")]));
        assert_eq!(spans(&state), vec![(2, 4)]);
    }

    #[test]
    fn untracked_edits_only_move_changes() {
        let mut state = TrackerState::default();
        let d = doc(vec![p("foo")]);
        let d = edit(&mut state, &d, ALICE, |tr| {
            tr.insert_text(3, "x").unwrap();
        });

        let mut tr = Transform::new(d);
        tr.insert_text(1, "yy").unwrap();
        state.on_edit_applied(&tr, Some(BOB), true).unwrap();
        assert_eq!(spans(&state), vec![(5, 6)]);
        assert_eq!(state.changes()[0].author, ALICE);
    }

    #[test]
    fn revert_origin_is_never_tracked() {
        let mut state = TrackerState::default();
        let mut tr = Transform::new(doc(vec![p("foo")]));
        tr.insert_text(2, "x").unwrap();
        tr.set_meta(revert_meta());
        state.on_edit_applied(&tr, Some(ALICE), false).unwrap();
        assert!(state.changes().is_empty());
    }

    #[test]
    fn accept_keeps_content() {
        let mut state = TrackerState::default();
        let d = doc(vec![p("foo")]);
        let d = edit(&mut state, &d, ALICE, |tr| {
            tr.insert_text(2, "hi").unwrap();
        });
        let id = state.changes()[0].id;

        let accepted = state.accept(id).unwrap();
        assert_eq!(accepted.kind(), ChangeKind::Insertion);
        assert!(state.changes().is_empty());
        assert_eq!(state.accept(id), Err(TrackError::NotFound(id)));
        assert_eq!(d, doc(vec![p("fhioo")]));
    }

    #[test]
    fn revert_restores_content() {
        let mut state = TrackerState::default();
        let original = doc(vec![p("foobar")]);
        let d = edit(&mut state, &original, ALICE, |tr| {
            tr.delete(2, 4).unwrap();
        });
        let id = state.changes()[0].id;

        let tr = state.revert(&d, id).unwrap();
        assert_eq!(tr.meta(), revert_meta());
        assert_eq!(tr.doc(), &original);
        state.on_edit_applied(&tr, None, true).unwrap();
        assert!(state.changes().is_empty());
        assert!(matches!(state.revert(tr.doc(), id), Err(TrackError::NotFound(_))));
    }

    #[test]
    fn revert_all_undoes_everything() {
        let mut state = TrackerState::default();
        let original = doc(vec![p("foo")]);
        let d = edit(&mut state, &original, ALICE, |tr| {
            tr.insert_text(4, "ok").unwrap();
        });
        let d = edit(&mut state, &d, BOB, |tr| {
            tr.delete(1, 2).unwrap();
        });
        assert_eq!(state.changes().len(), 2);

        let (tr, skipped) = state.revert_all(&d);
        assert!(skipped.is_empty());
        assert_eq!(tr.doc(), &original);
        assert!(state.changes().is_empty());
    }

    #[test]
    fn revert_all_skips_what_no_longer_fits() {
        let mut state = TrackerState::default();
        let d = doc(vec![p("ab"), p("cd")]);
        let d = edit(&mut state, &d, ALICE, |tr| {
            tr.insert_text(6, "x").unwrap();
        });
        let inserted = state.changes()[0].id;

        // A paragraph split sitting between the paragraphs cannot be undone.
        let split = Slice::new(Fragment::from_nodes(vec![p(""), p("")]), 1, 1);
        let stuck = state.changes.allocate_id();
        state.changes.insert_sorted(TrackedChange {
            id: stuck,
            from: 4,
            to: 4,
            deleted: split,
            author: BOB,
        });

        let (tr, skipped) = state.revert_all(&d);
        assert_eq!(skipped, vec![stuck]);
        assert_eq!(tr.doc(), &doc(vec![p("ab"), p("cd")]));
        assert!(state.get(inserted).is_none());
        assert!(state.get(stuck).is_some());
    }

    #[test]
    fn failed_revert_keeps_change() {
        let mut state = TrackerState::default();
        let d = doc(vec![p("foo")]);
        edit(&mut state, &d, ALICE, |tr| {
            tr.insert_text(2, "x").unwrap();
        });
        let id = state.changes()[0].id;

        // The change does not fit in an empty paragraph.
        let result = state.revert(&doc(vec![p("")]), id);
        assert!(matches!(result, Err(TrackError::Model(_))));
        assert!(state.get(id).is_some());
    }
}
