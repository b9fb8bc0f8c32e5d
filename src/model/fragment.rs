// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Ordered child sequences.

use std::fmt;

use crate::error::ModelError;
use super::node::Node;

/// An ordered sequence of nodes with a cached token size.
///
/// Adjacent text nodes are merged and empty text nodes dropped whenever a
/// fragment is built, so equal content always has exactly one shape. That
/// keeps the derived equality structural.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fragment {
    children: Vec<Node>,
    size: usize,
}

impl Fragment {
    pub const EMPTY: Fragment = Fragment {
        children: Vec::new(),
        size: 0,
    };

    pub fn empty() -> Fragment {
        return Fragment::EMPTY;
    }

    /// Build a fragment, normalizing text runs.
    pub fn from_nodes(nodes: Vec<Node>) -> Fragment {
        let mut children = Vec::with_capacity(nodes.len());
        for node in nodes {
            push_merged(&mut children, node);
        }
        let size = children.iter().map(Node::node_size).sum();
        return Fragment { children, size };
    }

    pub fn from_node(node: Node) -> Fragment {
        return Fragment::from_nodes(vec![node]);
    }

    pub fn size(&self) -> usize {
        return self.size;
    }

    pub fn is_empty(&self) -> bool {
        return self.children.is_empty();
    }

    pub fn child_count(&self) -> usize {
        return self.children.len();
    }

    pub fn child(&self, index: usize) -> &Node {
        return &self.children[index];
    }

    pub fn children(&self) -> &[Node] {
        return &self.children;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        return self.children.iter();
    }

    /// Concatenate two fragments, joining text across the seam.
    pub fn append(self, other: Fragment) -> Fragment {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other;
        }
        let mut children = self.children;
        for node in other.children {
            push_merged(&mut children, node);
        }
        let size = self.size + other.size;
        return Fragment { children, size };
    }

    /// A copy with the child at `index` replaced.
    pub fn replace_child(&self, index: usize, node: Node) -> Fragment {
        let mut children = self.children.clone();
        children[index] = node;
        return Fragment::from_nodes(children);
    }

    /// The content between two offsets, cutting partially covered children.
    pub fn cut(&self, from: usize, to: usize) -> Fragment {
        if from == 0 && to == self.size {
            return self.clone();
        }
        let mut result = Vec::new();
        if to > from {
            let mut pos = 0;
            for child in &self.children {
                if pos >= to {
                    break;
                }
                let end = pos + child.node_size();
                if end > from {
                    if pos < from || end > to {
                        let cut = if child.is_text() {
                            child.cut(from.saturating_sub(pos), (to - pos).min(child.node_size()))
                        } else {
                            child.cut(
                                from.saturating_sub(pos + 1),
                                (to - pos).saturating_sub(1).min(child.content_size()),
                            )
                        };
                        result.push(cut);
                    } else {
                        result.push(child.clone());
                    }
                }
                pos = end;
            }
        }
        return Fragment::from_nodes(result);
    }

    /// Find the child at an offset. Returns the child index and the offset
    /// at which that child starts. An offset on a boundary resolves to the
    /// child after it.
    pub fn find_index(&self, pos: usize) -> Result<(usize, usize), ModelError> {
        if pos == 0 {
            return Ok((0, 0));
        }
        if pos == self.size {
            return Ok((self.children.len(), pos));
        }
        if pos > self.size {
            return Err(ModelError::PositionOutOfRange {
                pos,
                size: self.size,
            });
        }
        let mut cur = 0;
        for (i, child) in self.children.iter().enumerate() {
            let end = cur + child.node_size();
            if end >= pos {
                if end == pos {
                    return Ok((i + 1, end));
                }
                return Ok((i, cur));
            }
            cur = end;
        }
        unreachable!("fragment size out of sync with children");
    }

    /// The first position at which this fragment and `other` differ, or
    /// `None` when they are identical. `pos` is the position of the start of
    /// both fragments.
    ///
    /// Equal children are skipped whole. Children with the same markup are
    /// descended into, and text is compared character by character, so the
    /// result always lands on a real structural boundary.
    pub fn find_diff_start(&self, other: &Fragment, mut pos: usize) -> Option<usize> {
        let mut i = 0;
        loop {
            if i == self.child_count() || i == other.child_count() {
                if self.child_count() == other.child_count() {
                    return None;
                }
                return Some(pos);
            }
            let a = self.child(i);
            let b = other.child(i);
            i += 1;
            if a == b {
                pos += a.node_size();
                continue;
            }
            if !a.same_markup(b) {
                return Some(pos);
            }
            if let (Some(ta), Some(tb)) = (a.as_text(), b.as_text()) {
                let same = ta.chars().zip(tb.chars()).take_while(|(x, y)| x == y).count();
                return Some(pos + same);
            }
            if a.content_size() > 0 || b.content_size() > 0 {
                if let Some(inner) = a.content().find_diff_start(b.content(), pos + 1) {
                    return Some(inner);
                }
            }
            pos += a.node_size();
        }
    }

    /// The last positions at which this fragment and `other` differ, scanning
    /// backwards from their ends at `pos_a` and `pos_b`. Returns the position
    /// in each fragment after which both are identical, or `None` when they
    /// are identical throughout.
    pub fn find_diff_end(&self, other: &Fragment, mut pos_a: usize, mut pos_b: usize) -> Option<(usize, usize)> {
        let mut ia = self.child_count();
        let mut ib = other.child_count();
        loop {
            if ia == 0 || ib == 0 {
                if ia == ib {
                    return None;
                }
                return Some((pos_a, pos_b));
            }
            ia -= 1;
            ib -= 1;
            let a = self.child(ia);
            let b = other.child(ib);
            let size = a.node_size();
            if a == b {
                pos_a -= size;
                pos_b -= size;
                continue;
            }
            if !a.same_markup(b) {
                return Some((pos_a, pos_b));
            }
            if let (Some(ta), Some(tb)) = (a.as_text(), b.as_text()) {
                let same = ta
                    .chars()
                    .rev()
                    .zip(tb.chars().rev())
                    .take_while(|(x, y)| x == y)
                    .count();
                return Some((pos_a - same, pos_b - same));
            }
            if a.content_size() > 0 || b.content_size() > 0 {
                if let Some(inner) = a.content().find_diff_end(b.content(), pos_a - 1, pos_b - 1) {
                    return Some(inner);
                }
            }
            pos_a -= size;
            pos_b -= b.node_size();
        }
    }
}

/// Push a node, merging it into a preceding text node.
pub(crate) fn push_merged(target: &mut Vec<Node>, node: Node) {
    if let Node::Text(text) = &node {
        if text.is_empty() {
            return;
        }
        if let Some(Node::Text(last)) = target.last_mut() {
            last.push_str(text);
            return;
        }
    }
    target.push(node);
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", child)?;
        }
        return Ok(());
    }
}
