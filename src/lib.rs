// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Redline - tracked changes over a tree-structured document.
//!
//! Every edit an author makes is annotated as an insertion, a deletion, or
//! a replacement that can later be accepted (kept) or reverted (undone).
//!
//! # Quick Start
//!
//! ```
//! use redline::author::AuthorTable;
//! use redline::model::build::{doc, p};
//! use redline::track::TrackerState;
//! use redline::transform::Transform;
//!
//! let mut authors = AuthorTable::new();
//! let alice = authors.intern("alice");
//! let mut tracker = TrackerState::default();
//!
//! // Alice types "hi" into "foo"
//! let mut tr = Transform::new(doc(vec![p("foo")]));
//! tr.insert_text(2, "hi").unwrap();
//! tracker.on_edit_applied(&tr, Some(alice), false).unwrap();
//!
//! let change = &tracker.changes()[0];
//! assert_eq!((change.from, change.to), (2, 4));
//! let id = change.id;
//!
//! // Reverting puts the document back
//! let revert = tracker.revert(tr.doc(), id).unwrap();
//! assert_eq!(revert.doc(), &doc(vec![p("foo")]));
//! tracker.on_edit_applied(&revert, None, true).unwrap();
//! assert!(tracker.changes().is_empty());
//! ```

pub mod author;
pub mod error;
pub mod model;
pub mod track;
pub mod transform;

pub use author::{AuthorId, AuthorTable};
pub use error::{ModelError, ReplaceError, TrackError};
pub use model::{Fragment, Node, ResolvedPos, Slice};
pub use track::{ChangeId, ChangeKind, ChangeSet, TrackedChange, TrackerConfig, TrackerState};
pub use transform::{Bias, EditMeta, EditOrigin, Mapping, ReplaceStep, StepMap, Transform};
