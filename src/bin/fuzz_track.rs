// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! AFL fuzz harness for the change tracker.
//!
//! Replays a byte stream as edits by several authors plus untracked edits,
//! and checks after every edit that:
//! 1. The change set stays sorted, with no degenerate changes and no two
//!    touching changes by the same author.
//! 2. Every change lies inside the document and can still be reverted.
//!
//! When only one author ever edits, reverting everything must also restore
//! the starting document.

use afl::fuzz;
use redline::author::AuthorId;
use redline::model::build::{doc, p};
use redline::model::Node;
use redline::track::TrackerState;
use redline::transform::Transform;

const NUM_AUTHORS: u8 = 3;

/// Operation types the fuzzer can generate
#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    /// Insert text inside a paragraph
    Insert { author: u8, block: u8, offset: u8, len: u8 },
    /// Delete text inside a paragraph
    Delete { author: u8, block: u8, offset: u8, len: u8 },
    /// Split a paragraph in two
    Split { author: u8, block: u8, offset: u8 },
    /// Join a paragraph with the next one
    Join { author: u8, block: u8 },
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 4;
        let rest = &bytes[1..];

        match op_type {
            0 if rest.len() >= 4 => {
                let op = FuzzOp::Insert {
                    author: rest[0] % (NUM_AUTHORS + 1),
                    block: rest[1],
                    offset: rest[2],
                    len: (rest[3] % 8).saturating_add(1),
                };
                Some((op, &rest[4..]))
            }
            1 if rest.len() >= 4 => {
                let op = FuzzOp::Delete {
                    author: rest[0] % (NUM_AUTHORS + 1),
                    block: rest[1],
                    offset: rest[2],
                    len: (rest[3] % 8).saturating_add(1),
                };
                Some((op, &rest[4..]))
            }
            2 if rest.len() >= 3 => {
                let op = FuzzOp::Split {
                    author: rest[0] % (NUM_AUTHORS + 1),
                    block: rest[1],
                    offset: rest[2],
                };
                Some((op, &rest[3..]))
            }
            3 if rest.len() >= 2 => {
                let op = FuzzOp::Join {
                    author: rest[0] % (NUM_AUTHORS + 1),
                    block: rest[1],
                };
                Some((op, &rest[2..]))
            }
            _ => None,
        }
    }

    /// The editing author, or `None` for an untracked edit.
    fn author(&self) -> Option<AuthorId> {
        let raw = match *self {
            FuzzOp::Insert { author, .. }
            | FuzzOp::Delete { author, .. }
            | FuzzOp::Split { author, .. }
            | FuzzOp::Join { author, .. } => author,
        };
        if raw == NUM_AUTHORS {
            return None;
        }
        return Some(AuthorId::new(raw as u16));
    }
}

/// Content start and content size of the paragraph picked by `block`.
fn textblock(doc: &Node, block: u8) -> (usize, usize) {
    let index = block as usize % doc.child_count();
    let start: usize = (0..index).map(|i| doc.child(i).node_size()).sum::<usize>() + 1;
    return (start, doc.child(index).content_size());
}

fn build(doc: &Node, op: FuzzOp) -> Option<Transform> {
    let mut tr = Transform::new(doc.clone());
    let result = match op {
        FuzzOp::Insert { block, offset, len, .. } => {
            let (start, size) = textblock(doc, block);
            let pos = start + offset as usize % (size + 1);
            let content: String = (0..len).map(|i| (b'a' + (offset.wrapping_add(i) % 26)) as char).collect();
            tr.insert_text(pos, &content).map(|_| ())
        }
        FuzzOp::Delete { block, offset, len, .. } => {
            let (start, size) = textblock(doc, block);
            if size == 0 {
                return None;
            }
            let from = start + offset as usize % size;
            let to = (from + len as usize).min(start + size);
            tr.delete(from, to).map(|_| ())
        }
        FuzzOp::Split { block, offset, .. } => {
            let (start, size) = textblock(doc, block);
            tr.split(start + offset as usize % (size + 1)).map(|_| ())
        }
        FuzzOp::Join { block, .. } => {
            let index = block as usize % doc.child_count();
            if index + 1 >= doc.child_count() {
                return None;
            }
            let between: usize = (0..=index).map(|i| doc.child(i).node_size()).sum();
            tr.join(between).map(|_| ())
        }
    };
    assert!(result.is_ok(), "edit {:?} failed: {:?}", op, result);
    return Some(tr);
}

fn main() {
    let original = doc(vec![p("hello"), p("tracked"), p("world")]);

    fuzz!(|data: &[u8]| {
        let mut tracker = TrackerState::default();
        let mut current = original.clone();
        let mut authors = Vec::new();
        let mut saw_untracked = false;
        let mut remaining = data;

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;
            let Some(tr) = build(&current, op) else {
                continue;
            };

            let author = op.author();
            match author {
                Some(author) if !authors.contains(&author) => authors.push(author),
                Some(_) => {}
                None => saw_untracked = true,
            }

            // CRITICAL INVARIANT: tracking never fails on a valid edit
            let result = tracker.on_edit_applied(&tr, author, author.is_none());
            assert!(result.is_ok(), "tracking {:?} failed: {:?}", op, result);
            current = tr.into_doc();

            let check = tracker.change_set().check_invariants();
            assert!(check.is_ok(), "invariant broken after {:?}: {:?}", op, check);
            for change in tracker.changes() {
                assert!(change.to <= current.content_size(), "change {} outside document", change);
                assert!(change.can_revert_in(&current), "change {} no longer fits", change);
            }
        }

        // A lone author with no untracked edits can always be fully reverted
        if authors.len() <= 1 && !saw_untracked {
            let (revert, skipped) = tracker.revert_all(&current);
            assert!(skipped.is_empty(), "could not revert {:?}", skipped);
            assert_eq!(revert.doc(), &original, "revert did not restore the document");
        }
    });
}
