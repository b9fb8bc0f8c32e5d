// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

use std::fmt;

use super::fragment::Fragment;

/// A piece of a document cut out between two positions.
///
/// When the cut starts or ends inside a node, the nodes around the cut are
/// kept in `content` and the open depths say how many of them are cut open
/// on each side. Deleting across a paragraph break, for example, yields two
/// paragraphs that are open on the inside.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Slice {
    pub content: Fragment,
    pub open_start: usize,
    pub open_end: usize,
}

impl Slice {
    pub fn new(content: Fragment, open_start: usize, open_end: usize) -> Slice {
        return Slice {
            content,
            open_start,
            open_end,
        };
    }

    pub fn empty() -> Slice {
        return Slice::new(Fragment::empty(), 0, 0);
    }

    /// A closed slice holding whole nodes.
    pub fn closed(content: Fragment) -> Slice {
        return Slice::new(content, 0, 0);
    }

    /// Number of tokens this slice adds when inserted.
    pub fn size(&self) -> usize {
        return self.content.size() - self.open_start - self.open_end;
    }

    pub fn is_empty(&self) -> bool {
        return self.size() == 0;
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "<{}>({},{})", self.content, self.open_start, self.open_end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build::{doc, p};

    #[test]
    fn slice_within_text() {
        let d = doc(vec![p("foobar")]);
        let slice = d.slice(2, 4).unwrap();
        assert_eq!(slice, Slice::closed(Fragment::from_node(crate::model::build::text("oo"))));
        assert_eq!(slice.size(), 2);
    }

    #[test]
    fn slice_across_paragraphs() {
        let d = doc(vec![p("ab"), p("cd")]);
        let slice = d.slice(2, 6).unwrap();
        assert_eq!(slice.content, Fragment::from_nodes(vec![p("b"), p("c")]));
        assert_eq!((slice.open_start, slice.open_end), (1, 1));
        assert_eq!(slice.size(), 4);
    }

    #[test]
    fn slice_of_paragraph_break() {
        let d = doc(vec![p("ab"), p("cd")]);
        let slice = d.slice(3, 5).unwrap();
        assert_eq!(slice.content, Fragment::from_nodes(vec![p(""), p("")]));
        assert_eq!(slice.size(), 2);
        assert!(!slice.is_empty());
    }

    #[test]
    fn empty_slice() {
        let d = doc(vec![p("ab")]);
        assert!(d.slice(2, 2).unwrap().is_empty());
        assert!(d.slice(3, 1).is_err());
        assert!(d.slice(0, 9).is_err());
    }
}
