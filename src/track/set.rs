// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! The ordered container of tracked changes.
//!
//! Invariants:
//! - Changes are sorted by `from`.
//! - No change is degenerate.
//! - Two changes by the same author never overlap or touch. Changes by
//!   different authors may overlap freely.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::author::AuthorId;
use super::change::{ChangeId, TrackedChange};

/// A broken change set invariant. Seeing one of these is a bug in the
/// tracker, never a consequence of user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("change {0} starts before the change preceding it")]
    Unsorted(ChangeId),
    #[error("change {0} is degenerate")]
    Degenerate(ChangeId),
    #[error("changes {0} and {1} by the same author overlap or touch")]
    SameAuthorTouch(ChangeId, ChangeId),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<TrackedChange>,
    next_id: u64,
}

impl ChangeSet {
    pub fn new() -> ChangeSet {
        return ChangeSet {
            changes: Vec::new(),
            next_id: 0,
        };
    }

    /// A set holding `changes` that continues id allocation from `self`.
    pub(crate) fn with_changes(&self, mut changes: Vec<TrackedChange>) -> ChangeSet {
        changes.sort_by_key(|change| change.from);
        return ChangeSet {
            changes,
            next_id: self.next_id,
        };
    }

    /// Reserve a fresh id.
    pub(crate) fn allocate_id(&mut self) -> ChangeId {
        let id = ChangeId(self.next_id);
        self.next_id += 1;
        return id;
    }

    pub fn len(&self) -> usize {
        return self.changes.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.changes.is_empty();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrackedChange> {
        return self.changes.iter();
    }

    pub fn as_slice(&self) -> &[TrackedChange] {
        return &self.changes;
    }

    pub fn get(&self, id: ChangeId) -> Option<&TrackedChange> {
        return self.changes.iter().find(|change| change.id == id);
    }

    pub fn contains(&self, id: ChangeId) -> bool {
        return self.get(id).is_some();
    }

    /// Insert a change after every change that starts at or before it.
    pub(crate) fn insert_sorted(&mut self, change: TrackedChange) {
        let index = self.changes.partition_point(|c| c.from <= change.from);
        self.changes.insert(index, change);
    }

    pub(crate) fn remove(&mut self, id: ChangeId) -> Option<TrackedChange> {
        let index = self.changes.iter().position(|change| change.id == id)?;
        return Some(self.changes.remove(index));
    }

    /// Remove every change.
    pub(crate) fn drain(&mut self) -> Vec<TrackedChange> {
        return std::mem::take(&mut self.changes);
    }

    /// Changes overlapping or touching `from..to`.
    pub fn changes_in(&self, from: usize, to: usize) -> impl Iterator<Item = &TrackedChange> {
        return self
            .changes
            .iter()
            .take_while(move |change| change.from <= to)
            .filter(move |change| change.to >= from);
    }

    /// Changes whose span contains `pos`, including deletions sitting
    /// exactly at it.
    pub fn changes_at(&self, pos: usize) -> impl Iterator<Item = &TrackedChange> {
        return self.changes_in(pos, pos);
    }

    pub fn by_author(&self, author: AuthorId) -> impl Iterator<Item = &TrackedChange> {
        return self.changes.iter().filter(move |change| change.author == author);
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut last_end: FxHashMap<AuthorId, (ChangeId, usize)> = FxHashMap::default();
        for (i, change) in self.changes.iter().enumerate() {
            if i > 0 && self.changes[i - 1].from > change.from {
                return Err(InvariantViolation::Unsorted(change.id));
            }
            if change.is_degenerate() {
                return Err(InvariantViolation::Degenerate(change.id));
            }
            if let Some(&(prev, end)) = last_end.get(&change.author) {
                if end >= change.from {
                    return Err(InvariantViolation::SameAuthorTouch(prev, change.id));
                }
            }
            last_end.insert(change.author, (change.id, change.to));
        }
        return Ok(());
    }

    /// Panic on a broken invariant in debug builds.
    pub(crate) fn debug_check(&self) {
        if cfg!(debug_assertions) {
            if let Err(violation) = self.check_invariants() {
                panic!("change set invariant violated: {}", violation);
            }
        }
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a TrackedChange;
    type IntoIter = std::slice::Iter<'a, TrackedChange>;

    fn into_iter(self) -> Self::IntoIter {
        return self.changes.iter();
    }
}
