// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Document nodes.
//!
//! Positions count tokens: every text character is one token, a leaf node is
//! one token, and a branch contributes an opening and a closing token around
//! its content. Positions into a document index the root's content, so the
//! root's own tokens are never addressable.

use std::fmt;

use crate::error::ModelError;
use super::fragment::Fragment;
use super::replace;
use super::resolved::ResolvedPos;
use super::slice::Slice;

/// Content of text, leaf, and root-less nodes.
static EMPTY: Fragment = Fragment::EMPTY;

/// A node in the document tree.
///
/// Equality is structural and recursive: two subtrees are equal when they
/// have the same kinds, names, and text all the way down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// A run of text. Never empty inside a fragment.
    Text(String),
    /// An atom without content, such as an image or a rule.
    Leaf { name: String },
    /// A named container, such as a paragraph or the document root.
    Branch { name: String, content: Fragment },
}

impl Node {
    /// Create a text node.
    pub fn text(text: &str) -> Node {
        return Node::Text(text.to_string());
    }

    /// Create a leaf node.
    pub fn leaf(name: &str) -> Node {
        return Node::Leaf { name: name.to_string() };
    }

    /// Create a branch node.
    pub fn branch(name: &str, content: Fragment) -> Node {
        return Node::Branch {
            name: name.to_string(),
            content,
        };
    }

    /// The kind name. Text nodes are called `text`.
    pub fn name(&self) -> &str {
        match self {
            Node::Text(_) => "text",
            Node::Leaf { name } => name,
            Node::Branch { name, .. } => name,
        }
    }

    pub fn is_text(&self) -> bool {
        return matches!(self, Node::Text(_));
    }

    pub fn is_leaf(&self) -> bool {
        return matches!(self, Node::Leaf { .. });
    }

    pub fn is_branch(&self) -> bool {
        return matches!(self, Node::Branch { .. });
    }

    /// The text of a text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Number of tokens this node occupies in its parent.
    pub fn node_size(&self) -> usize {
        match self {
            Node::Text(text) => text.chars().count(),
            Node::Leaf { .. } => 1,
            Node::Branch { content, .. } => content.size() + 2,
        }
    }

    /// The children of a branch; empty for text and leaves.
    pub fn content(&self) -> &Fragment {
        match self {
            Node::Branch { content, .. } => content,
            _ => &EMPTY,
        }
    }

    /// Size of the content. For text this is the character count, so that
    /// offsets inside a text node can be used like content offsets.
    pub fn content_size(&self) -> usize {
        match self {
            Node::Text(text) => text.chars().count(),
            Node::Leaf { .. } => 0,
            Node::Branch { content, .. } => content.size(),
        }
    }

    pub fn child_count(&self) -> usize {
        return self.content().child_count();
    }

    pub fn child(&self, index: usize) -> &Node {
        return self.content().child(index);
    }

    /// Whether both nodes are the same kind with the same name, ignoring
    /// content. Any two text nodes share markup.
    pub fn same_markup(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Text(_), Node::Text(_)) => true,
            (Node::Leaf { name: a }, Node::Leaf { name: b }) => a == b,
            (Node::Branch { name: a, .. }, Node::Branch { name: b, .. }) => a == b,
            _ => false,
        }
    }

    /// A copy of this node with different content. Text and leaves have no
    /// content and are returned unchanged.
    pub fn copy(&self, content: Fragment) -> Node {
        match self {
            Node::Branch { name, .. } => Node::Branch {
                name: name.clone(),
                content,
            },
            _ => self.clone(),
        }
    }

    /// Cut this node down to the content between `from` and `to`, which are
    /// character offsets for text and content offsets for branches.
    pub fn cut(&self, from: usize, to: usize) -> Node {
        match self {
            Node::Text(text) => Node::Text(char_range(text, from, to).to_string()),
            Node::Leaf { .. } => self.clone(),
            Node::Branch { name, content } => {
                if from == 0 && to == content.size() {
                    return self.clone();
                }
                return Node::Branch {
                    name: name.clone(),
                    content: content.cut(from, to),
                };
            }
        }
    }

    /// The concatenated text of this subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        return out;
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Leaf { .. } => {}
            Node::Branch { content, .. } => {
                for child in content.iter() {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Resolve a position in this node's content to its ancestor path.
    pub fn resolve(&self, pos: usize) -> Result<ResolvedPos<'_>, ModelError> {
        return ResolvedPos::resolve(self, pos);
    }

    /// The structural slice between two positions.
    ///
    /// The slice is cut at the deepest node containing both positions, and
    /// its open depths record how far each endpoint sits below that node.
    pub fn slice(&self, from: usize, to: usize) -> Result<Slice, ModelError> {
        if from > to {
            return Err(ModelError::InvalidRange { from, to });
        }
        if from == to {
            self.resolve(from)?;
            return Ok(Slice::empty());
        }

        let rfrom = self.resolve(from)?;
        let rto = self.resolve(to)?;
        let depth = rfrom.shared_depth(to);
        let start = rfrom.start(depth);
        let content = rfrom.node(depth).content().cut(from - start, to - start);
        return Ok(Slice::new(content, rfrom.depth() - depth, rto.depth() - depth));
    }

    /// Replace the range `from..to` with a slice, producing a new node.
    pub fn replace(&self, from: usize, to: usize, slice: &Slice) -> Result<Node, ModelError> {
        if from > to {
            return Err(ModelError::InvalidRange { from, to });
        }
        let rfrom = self.resolve(from)?;
        let rto = self.resolve(to)?;
        return Ok(replace::replace(&rfrom, &rto, slice)?);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text(text) => write!(f, "{:?}", text),
            Node::Leaf { name } => write!(f, "{}", name),
            Node::Branch { name, content } => write!(f, "{}({})", name, content),
        }
    }
}

/// Byte offset of the `chars`-th character, clamped to the end.
pub(crate) fn byte_offset(text: &str, chars: usize) -> usize {
    return text
        .char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
}

/// The substring between two character offsets.
pub(crate) fn char_range(text: &str, from: usize, to: usize) -> &str {
    let start = byte_offset(text, from);
    let end = byte_offset(text, to);
    return &text[start..end.max(start)];
}
