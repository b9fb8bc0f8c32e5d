// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Tracked changes.
//!
//! Each edit step goes through three stages. The recorder folds the edited
//! span into the change set in the coordinates before the step, the mapper
//! moves every change through the step's position map, and the minimizer
//! trims the changes the recorder touched down to what actually differs.

mod change;
mod mapper;
mod minimize;
mod record;
mod set;
mod tracker;

pub use change::{ChangeId, ChangeKind, Side, TrackedChange};
pub use mapper::{coalesce_touching, map_changes};
pub use minimize::minimize;
pub use record::{record_range, Updated};
pub use set::{ChangeSet, InvariantViolation};
pub use tracker::{TrackerConfig, TrackerState};
