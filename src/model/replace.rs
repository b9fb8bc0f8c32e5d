// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Structural replace.
//!
//! Replacing `from..to` with a slice rebuilds the tree from the root down.
//! While both endpoints fall into the same child, we descend and only that
//! child is rebuilt. Once they split, content is gathered in three parts:
//! everything before `from`, the slice, and everything after `to`. Nodes cut
//! open on either side are joined with the open sides of the slice (or with
//! each other when the slice is empty), which is how deleting across a
//! paragraph break merges the two paragraphs.

use crate::error::ReplaceError;
use super::fragment::{push_merged, Fragment};
use super::node::Node;
use super::resolved::ResolvedPos;
use super::slice::Slice;

pub(crate) fn replace(from: &ResolvedPos<'_>, to: &ResolvedPos<'_>, slice: &Slice) -> Result<Node, ReplaceError> {
    if slice.open_start > from.depth() {
        return Err(ReplaceError::TooDeep);
    }
    let inner_from = from.depth() - slice.open_start;
    if to.depth().checked_sub(slice.open_end) != Some(inner_from) {
        return Err(ReplaceError::InconsistentDepths);
    }
    return replace_outer(from, to, slice, 0);
}

fn replace_outer(from: &ResolvedPos<'_>, to: &ResolvedPos<'_>, slice: &Slice, depth: usize) -> Result<Node, ReplaceError> {
    let index = from.index(depth);
    let node = from.node(depth);

    if index == to.index(depth) && depth < from.depth() - slice.open_start {
        let inner = replace_outer(from, to, slice, depth + 1)?;
        return Ok(node.copy(node.content().replace_child(index, inner)));
    }

    if slice.content.size() == 0 {
        return Ok(node.copy(replace_two_way(from, to, depth)?));
    }

    if slice.open_start == 0 && slice.open_end == 0 && from.depth() == depth && to.depth() == depth {
        // Flat case: splice closed content into a single parent.
        let content = node.content();
        let spliced = content
            .cut(0, from.parent_offset())
            .append(slice.content.clone())
            .append(content.cut(to.parent_offset(), content.size()));
        return Ok(node.copy(spliced));
    }

    let prepared = prepare_slice(slice, from);
    let extra = from.depth() - slice.open_start;
    let start = prepared
        .resolve(slice.open_start + extra)
        .map_err(|_| ReplaceError::InconsistentDepths)?;
    let end = prepared
        .resolve(prepared.content_size() - slice.open_end - extra)
        .map_err(|_| ReplaceError::InconsistentDepths)?;
    return Ok(node.copy(replace_three_way(from, &start, &end, to, depth)?));
}

/// Wrap the slice content in copies of `along`'s ancestors so that it can
/// be resolved with the same depths as the insertion point.
fn prepare_slice(slice: &Slice, along: &ResolvedPos<'_>) -> Node {
    let extra = along.depth() - slice.open_start;
    let mut node = along.node(extra).copy(slice.content.clone());
    for depth in (0..extra).rev() {
        node = along.node(depth).copy(Fragment::from_node(node));
    }
    return node;
}

fn check_join(main: &Node, sub: &Node) -> Result<(), ReplaceError> {
    if !main.same_markup(sub) {
        return Err(ReplaceError::CannotJoin {
            main: main.name().to_string(),
            sub: sub.name().to_string(),
        });
    }
    return Ok(());
}

/// The node at `depth` before the seam, if the node after it can be joined
/// onto it.
fn joinable<'a>(before: &ResolvedPos<'a>, after: &ResolvedPos<'_>, depth: usize) -> Result<&'a Node, ReplaceError> {
    let node = before.node(depth);
    check_join(node, after.node(depth))?;
    return Ok(node);
}

/// Copy the children of the node at `depth` that lie between `start` and
/// `end` into `target`. A missing bound means the node's edge.
fn add_range(start: Option<&ResolvedPos<'_>>, end: Option<&ResolvedPos<'_>>, depth: usize, target: &mut Vec<Node>) {
    let node = match (end, start) {
        (Some(end), _) => end.node(depth),
        (None, Some(start)) => start.node(depth),
        (None, None) => unreachable!("add_range needs at least one bound"),
    };

    let mut start_index = 0;
    let end_index = match end {
        Some(end) => end.index(depth),
        None => node.child_count(),
    };

    if let Some(start) = start {
        start_index = start.index(depth);
        if start.depth() > depth {
            start_index += 1;
        } else if start.text_offset() > 0 {
            if let Some(after) = start.node_after() {
                push_merged(target, after);
            }
            start_index += 1;
        }
    }

    for i in start_index..end_index {
        push_merged(target, node.child(i).clone());
    }

    if let Some(end) = end {
        if end.depth() == depth && end.text_offset() > 0 {
            if let Some(before) = end.node_before() {
                push_merged(target, before);
            }
        }
    }
}

fn replace_three_way(
    from: &ResolvedPos<'_>,
    start: &ResolvedPos<'_>,
    end: &ResolvedPos<'_>,
    to: &ResolvedPos<'_>,
    depth: usize,
) -> Result<Fragment, ReplaceError> {
    let open_start = if from.depth() > depth {
        Some(joinable(from, start, depth + 1)?)
    } else {
        None
    };
    let open_end = if to.depth() > depth {
        Some(joinable(end, to, depth + 1)?)
    } else {
        None
    };

    let mut content = Vec::new();
    add_range(None, Some(from), depth, &mut content);

    match (open_start, open_end) {
        (Some(left), Some(right)) if start.index(depth) == end.index(depth) => {
            check_join(left, right)?;
            let inner = replace_three_way(from, start, end, to, depth + 1)?;
            push_merged(&mut content, left.copy(inner));
        }
        _ => {
            if let Some(left) = open_start {
                let inner = replace_two_way(from, start, depth + 1)?;
                push_merged(&mut content, left.copy(inner));
            }
            add_range(Some(start), Some(end), depth, &mut content);
            if let Some(right) = open_end {
                let inner = replace_two_way(end, to, depth + 1)?;
                push_merged(&mut content, right.copy(inner));
            }
        }
    }

    add_range(Some(to), None, depth, &mut content);
    return Ok(Fragment::from_nodes(content));
}

fn replace_two_way(from: &ResolvedPos<'_>, to: &ResolvedPos<'_>, depth: usize) -> Result<Fragment, ReplaceError> {
    let mut content = Vec::new();
    add_range(None, Some(from), depth, &mut content);
    if from.depth() > depth {
        let node = joinable(from, to, depth + 1)?;
        let inner = replace_two_way(from, to, depth + 1)?;
        push_merged(&mut content, node.copy(inner));
    }
    add_range(Some(to), None, depth, &mut content);
    return Ok(Fragment::from_nodes(content));
}

#[cfg(test)]
mod tests {
    use crate::error::{ModelError, ReplaceError};
    use crate::model::build::{blockquote, doc, p, text};
    use crate::model::{Fragment, Node, Slice};

    #[test]
    fn insert_text() {
        let d = doc(vec![p("foo")]);
        let slice = Slice::closed(Fragment::from_node(text("hi")));
        assert_eq!(d.replace(2, 2, &slice).unwrap(), doc(vec![p("fhioo")]));
    }

    #[test]
    fn delete_text() {
        let d = doc(vec![p("foobar")]);
        assert_eq!(d.replace(2, 4, &Slice::empty()).unwrap(), doc(vec![p("fbar")]));
    }

    #[test]
    fn delete_across_paragraphs_joins() {
        let d = doc(vec![p("ab"), p("cd")]);
        assert_eq!(d.replace(2, 6, &Slice::empty()).unwrap(), doc(vec![p("ad")]));
        assert_eq!(d.replace(3, 5, &Slice::empty()).unwrap(), doc(vec![p("abcd")]));
    }

    #[test]
    fn open_slice_splits_paragraph() {
        let d = doc(vec![p("abcd")]);
        let split = Slice::new(Fragment::from_nodes(vec![p(""), p("")]), 1, 1);
        assert_eq!(d.replace(3, 3, &split).unwrap(), doc(vec![p("ab"), p("cd")]));
    }

    #[test]
    fn reinsert_deleted_paragraph_break() {
        let original = doc(vec![p("ab"), p("cd")]);
        let deleted = original.slice(2, 6).unwrap();
        let after = original.replace(2, 6, &Slice::empty()).unwrap();
        assert_eq!(after.replace(2, 2, &deleted).unwrap(), original);
    }

    #[test]
    fn replace_whole_block() {
        let d = doc(vec![p("ab"), p("cd")]);
        let slice = Slice::closed(Fragment::from_node(p("xy")));
        assert_eq!(d.replace(4, 8, &slice).unwrap(), doc(vec![p("ab"), p("xy")]));
    }

    #[test]
    fn replace_inside_nested() {
        let d = doc(vec![blockquote(vec![p("abc")])]);
        let slice = Slice::closed(Fragment::from_node(text("X")));
        assert_eq!(
            d.replace(3, 4, &slice).unwrap(),
            doc(vec![blockquote(vec![p("aXc")])]),
        );
    }

    #[test]
    fn mismatched_depths_are_rejected() {
        let d = doc(vec![blockquote(vec![p("ab")]), p("cd")]);
        assert_eq!(
            d.replace(3, 8, &Slice::empty()),
            Err(ModelError::Replace(ReplaceError::InconsistentDepths)),
        );
    }

    #[test]
    fn joining_different_kinds_is_rejected() {
        let heading = Node::branch("heading", Fragment::from_node(text("cd")));
        let d = doc(vec![p("ab"), heading]);
        let err = d.replace(2, 6, &Slice::empty()).unwrap_err();
        assert!(matches!(err, ModelError::Replace(ReplaceError::CannotJoin { .. })));
    }
}
