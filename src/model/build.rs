// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Shorthand constructors for documents.
//!
//! ```
//! use redline::model::build::{doc, p};
//!
//! let d = doc(vec![p("hello"), p("world")]);
//! assert_eq!(d.content_size(), 14);
//! ```

use super::fragment::Fragment;
use super::node::Node;

pub const DOC: &str = "doc";
pub const PARAGRAPH: &str = "paragraph";
pub const BLOCKQUOTE: &str = "blockquote";

/// A document root.
pub fn doc(children: Vec<Node>) -> Node {
    return Node::branch(DOC, Fragment::from_nodes(children));
}

/// A paragraph holding plain text. An empty string gives an empty paragraph.
pub fn p(content: &str) -> Node {
    return paragraph(vec![text(content)]);
}

/// A paragraph with mixed inline content.
pub fn paragraph(children: Vec<Node>) -> Node {
    return Node::branch(PARAGRAPH, Fragment::from_nodes(children));
}

pub fn blockquote(children: Vec<Node>) -> Node {
    return Node::branch(BLOCKQUOTE, Fragment::from_nodes(children));
}

pub fn text(content: &str) -> Node {
    return Node::text(content);
}

pub fn leaf(name: &str) -> Node {
    return Node::leaf(name);
}
