// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! The document tree.
//!
//! A document is a tree of named branches with text and leaf nodes at the
//! bottom, addressed by flat integer positions. The tracker needs four
//! capabilities from it, all provided here:
//!
//! - `Node::resolve`: a position's ancestor chain with per-depth offsets.
//! - `Node::slice`: the structural slice between two positions.
//! - `Node::replace`: splice a slice into a range.
//! - `Fragment::find_diff_start` / `find_diff_end`: where two child
//!   sequences start and stop differing, by structural equality.

pub mod build;
mod fragment;
mod node;
mod replace;
mod resolved;
mod slice;

pub use fragment::Fragment;
pub use node::Node;
pub use resolved::ResolvedPos;
pub use slice::Slice;
