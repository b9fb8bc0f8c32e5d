// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Positions resolved against a document.

use smallvec::SmallVec;

use crate::error::ModelError;
use super::node::Node;

/// One level of a resolved position's ancestor path.
#[derive(Clone, Copy, Debug)]
struct Level<'a> {
    /// The ancestor at this depth.
    node: &'a Node,
    /// Index of the child the position falls into (or sits before).
    index: usize,
    /// Absolute position at which that child starts.
    offset: usize,
}

/// A position together with the chain of ancestors that contain it.
///
/// Depth 0 is the root. `node(depth())` is the innermost branch the position
/// sits in; a position inside a text node resolves to the text's parent.
#[derive(Clone, Debug)]
pub struct ResolvedPos<'a> {
    pos: usize,
    path: SmallVec<[Level<'a>; 4]>,
    parent_offset: usize,
}

impl<'a> ResolvedPos<'a> {
    pub(crate) fn resolve(root: &'a Node, pos: usize) -> Result<ResolvedPos<'a>, ModelError> {
        if pos > root.content_size() {
            return Err(ModelError::PositionOutOfRange {
                pos,
                size: root.content_size(),
            });
        }

        let mut path = SmallVec::new();
        let mut start = 0;
        let mut parent_offset = pos;
        let mut node = root;
        loop {
            let (index, offset) = node.content().find_index(parent_offset)?;
            let rem = parent_offset - offset;
            path.push(Level {
                node,
                index,
                offset: start + offset,
            });
            if rem == 0 {
                break;
            }
            node = node.child(index);
            if node.is_text() {
                break;
            }
            parent_offset = rem - 1;
            start += offset + 1;
        }

        return Ok(ResolvedPos {
            pos,
            path,
            parent_offset,
        });
    }

    /// The resolved position.
    pub fn pos(&self) -> usize {
        return self.pos;
    }

    /// How many branches deep the position sits.
    pub fn depth(&self) -> usize {
        return self.path.len() - 1;
    }

    /// The ancestor at `depth`.
    pub fn node(&self, depth: usize) -> &'a Node {
        return self.path[depth].node;
    }

    /// The innermost ancestor.
    pub fn parent(&self) -> &'a Node {
        return self.node(self.depth());
    }

    /// Offset of the position inside its parent's content.
    pub fn parent_offset(&self) -> usize {
        return self.parent_offset;
    }

    /// Index into the ancestor at `depth`.
    pub fn index(&self, depth: usize) -> usize {
        return self.path[depth].index;
    }

    /// Index just after the position at `depth`.
    pub fn index_after(&self, depth: usize) -> usize {
        let index = self.index(depth);
        if depth == self.depth() && self.text_offset() == 0 {
            return index;
        }
        return index + 1;
    }

    /// Start of the ancestor's content at `depth`.
    pub fn start(&self, depth: usize) -> usize {
        if depth == 0 {
            return 0;
        }
        return self.path[depth - 1].offset + 1;
    }

    /// End of the ancestor's content at `depth`.
    pub fn end(&self, depth: usize) -> usize {
        return self.start(depth) + self.node(depth).content_size();
    }

    /// Position directly before the ancestor at `depth` (`depth >= 1`).
    pub fn before(&self, depth: usize) -> usize {
        assert!(depth >= 1, "there is no position before the root");
        return self.path[depth - 1].offset;
    }

    /// Position directly after the ancestor at `depth` (`depth >= 1`).
    pub fn after(&self, depth: usize) -> usize {
        return self.before(depth) + self.node(depth).node_size();
    }

    /// Offset into the text node the position points into, or 0 when it
    /// sits on a boundary.
    pub fn text_offset(&self) -> usize {
        return self.pos - self.path[self.path.len() - 1].offset;
    }

    /// The node directly after the position, cut if the position is inside
    /// a text node.
    pub fn node_after(&self) -> Option<Node> {
        let parent = self.parent();
        let index = self.index(self.depth());
        if index == parent.child_count() {
            return None;
        }
        let offset = self.text_offset();
        let child = parent.child(index);
        if offset > 0 {
            return Some(child.cut(offset, child.content_size()));
        }
        return Some(child.clone());
    }

    /// The node directly before the position, cut if the position is inside
    /// a text node.
    pub fn node_before(&self) -> Option<Node> {
        let parent = self.parent();
        let index = self.index(self.depth());
        let offset = self.text_offset();
        if offset > 0 {
            return Some(parent.child(index).cut(0, offset));
        }
        if index == 0 {
            return None;
        }
        return Some(parent.child(index - 1).clone());
    }

    /// The deepest depth whose ancestor contains both this position and
    /// `pos`.
    pub fn shared_depth(&self, pos: usize) -> usize {
        let mut depth = self.depth();
        while depth > 0 {
            if self.start(depth) <= pos && self.end(depth) >= pos {
                return depth;
            }
            depth -= 1;
        }
        return 0;
    }
}
