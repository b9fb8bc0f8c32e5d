// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Error types.
//!
//! Degenerate changes (an edit that cancels a tracked change out) are not
//! errors: the tracker drops them silently. What remains here are malformed
//! positions, replaces the tree cannot express, and lookups of changes that
//! are no longer tracked.

use thiserror::Error;

use crate::track::ChangeId;

/// A replace that cannot be expressed as a well-formed tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplaceError {
    /// The slice is open deeper than the position it is inserted at.
    #[error("inserted content deeper than insertion position")]
    TooDeep,
    /// The open depths of the slice do not line up with both endpoints.
    #[error("inconsistent open depths")]
    InconsistentDepths,
    /// Two branches of different kinds would have to be joined.
    #[error("cannot join {sub} onto {main}")]
    CannotJoin { main: String, sub: String },
}

/// Errors produced by the document model and transforms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("position {pos} outside of document (size {size})")]
    PositionOutOfRange { pos: usize, size: usize },
    #[error("invalid range {from}..{to}")]
    InvalidRange { from: usize, to: usize },
    #[error("cannot split at position {pos}")]
    CannotSplit { pos: usize },
    #[error(transparent)]
    Replace(#[from] ReplaceError),
}

/// Errors produced by the change tracker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackError {
    /// The change was already accepted or reverted.
    #[error("change {0} is not tracked")]
    NotFound(ChangeId),
    #[error(transparent)]
    Model(#[from] ModelError),
}
