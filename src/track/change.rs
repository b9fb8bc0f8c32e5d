// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

use std::fmt;

use crate::author::AuthorId;
use crate::error::ModelError;
use crate::model::{Node, Slice};
use crate::transform::{Bias, Transform};

/// Stable identity of a tracked change, assigned by its change set.
///
/// Positions move on every edit; the id does not, so hosts use it to accept
/// or revert a change they rendered earlier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChangeId(pub(crate) u64);

impl fmt::Display for ChangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "#{}", self.0);
    }
}

/// What a change looks like when rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    /// New content with nothing removed.
    Insertion,
    /// Removed content with nothing in its place.
    Deletion,
    /// New content that replaced old content.
    Replacement,
}

/// Which boundary of a freshly merged change the minimizer may trim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Start,
    End,
}

/// An annotated span of the current document.
///
/// `from..to` holds content the author added, and `deleted` holds what was
/// there before. Either may be empty, but never both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackedChange {
    pub id: ChangeId,
    pub from: usize,
    pub to: usize,
    pub deleted: Slice,
    pub author: AuthorId,
}

impl TrackedChange {
    pub fn kind(&self) -> ChangeKind {
        if self.deleted.is_empty() {
            return ChangeKind::Insertion;
        }
        if self.from == self.to {
            return ChangeKind::Deletion;
        }
        return ChangeKind::Replacement;
    }

    /// A change that neither inserted nor removed anything.
    pub fn is_degenerate(&self) -> bool {
        return self.from >= self.to && self.deleted.is_empty();
    }

    /// Whether the change overlaps or touches `from..to`.
    pub fn touches(&self, from: usize, to: usize) -> bool {
        return self.from <= to && self.to >= from;
    }

    /// Whether putting the deleted content back over `from..to` of `doc`
    /// produces a valid document.
    pub fn can_revert_in(&self, doc: &Node) -> bool {
        return doc.replace(self.from, self.to, &self.deleted).is_ok();
    }

    /// Size of the content the change added.
    pub fn inserted_size(&self) -> usize {
        return self.to - self.from;
    }
}

impl fmt::Display for TrackedChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(
            f,
            "{} {}..{} by {:?} deleted {}",
            self.id, self.from, self.to, self.author, self.deleted
        );
    }
}

/// Rebuild what `from..to` of `doc` looked like before `changes` were made,
/// by putting their deleted content back and slicing the result.
///
/// `changes` must be sorted and lie within `from..to`.
pub(crate) fn restore_span(doc: &Node, changes: &[TrackedChange], from: usize, to: usize) -> Result<Slice, ModelError> {
    let mut tr = Transform::new(doc.clone());
    for change in changes.iter().rev() {
        tr.replace(change.from, change.to, change.deleted.clone())?;
    }
    let end = tr.mapping().map(to, Bias::Right);
    return tr.doc().slice(from, end);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build::{doc, p, text};
    use crate::model::Fragment;

    fn change(from: usize, to: usize, deleted: Slice) -> TrackedChange {
        return TrackedChange {
            id: ChangeId(0),
            from,
            to,
            deleted,
            author: AuthorId::new(0),
        };
    }

    fn oo() -> Slice {
        return Slice::closed(Fragment::from_node(text("oo")));
    }

    #[test]
    fn kinds() {
        assert_eq!(change(2, 4, Slice::empty()).kind(), ChangeKind::Insertion);
        assert_eq!(change(2, 2, oo()).kind(), ChangeKind::Deletion);
        assert_eq!(change(2, 4, oo()).kind(), ChangeKind::Replacement);
    }

    #[test]
    fn degenerate() {
        assert!(change(3, 3, Slice::empty()).is_degenerate());
        assert!(!change(3, 3, oo()).is_degenerate());
        assert!(!change(3, 4, Slice::empty()).is_degenerate());
    }

    #[test]
    fn touching() {
        let c = change(2, 4, Slice::empty());
        assert!(c.touches(4, 6));
        assert!(c.touches(0, 2));
        assert!(c.touches(3, 3));
        assert!(!c.touches(5, 6));
    }

    #[test]
    fn revertible_only_where_structure_fits() {
        let split = Slice::new(Fragment::from_nodes(vec![p(""), p("")]), 1, 1);
        let d = doc(vec![p("ab"), p("cd")]);
        assert!(change(2, 2, split.clone()).can_revert_in(&d));
        // Between the paragraphs there is no paragraph to split.
        assert!(!change(4, 4, split).can_revert_in(&d));
        assert!(!change(1, 6, Slice::empty()).can_revert_in(&doc(vec![p("ab")])));
    }

    #[test]
    fn restore_span_puts_deletions_back() {
        // "foobar" with "oo" deleted and "X" inserted after "b".
        let current = doc(vec![p("fbXar")]);
        let changes = vec![change(2, 2, oo()), change(3, 4, Slice::empty())];
        let restored = restore_span(&current, &changes, 1, 5).unwrap();
        assert_eq!(restored, Slice::closed(Fragment::from_node(text("fooba"))));
    }
}
