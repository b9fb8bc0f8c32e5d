// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Steps, position maps, and edit operations.

mod map;
mod step;
#[allow(clippy::module_inception)]
mod transform;

pub use map::{Bias, MapResult, Mapping, ReplacedRange, StepMap};
pub use step::ReplaceStep;
pub use transform::{EditMeta, EditOrigin, EditStep, Transform};
