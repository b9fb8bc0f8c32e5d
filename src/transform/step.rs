// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

use crate::error::ModelError;
use crate::model::{Node, Slice};
use super::map::{ReplacedRange, StepMap};

/// An atomic edit: replace `from..to` with a slice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplaceStep {
    pub from: usize,
    pub to: usize,
    pub slice: Slice,
}

impl ReplaceStep {
    pub fn new(from: usize, to: usize, slice: Slice) -> ReplaceStep {
        return ReplaceStep { from, to, slice };
    }

    /// Apply the step, producing the next document.
    pub fn apply(&self, doc: &Node) -> Result<Node, ModelError> {
        return doc.replace(self.from, self.to, &self.slice);
    }

    /// The position map of this step.
    pub fn map(&self) -> StepMap {
        return StepMap::new([ReplacedRange {
            start: self.from,
            old_size: self.to - self.from,
            new_size: self.slice.size(),
        }]);
    }

    /// The step that undoes this one, given the document it was applied to.
    pub fn invert(&self, doc: &Node) -> Result<ReplaceStep, ModelError> {
        return Ok(ReplaceStep {
            from: self.from,
            to: self.from + self.slice.size(),
            slice: doc.slice(self.from, self.to)?,
        });
    }

    /// Whether applying the step changes nothing.
    pub fn is_noop(&self) -> bool {
        return self.from == self.to && self.slice.is_empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build::{doc, p, text};
    use crate::model::Fragment;
    use crate::transform::Bias;

    #[test]
    fn apply_and_invert() {
        let before = doc(vec![p("foo")]);
        let step = ReplaceStep::new(2, 3, Slice::closed(Fragment::from_node(text("XY"))));
        let after = step.apply(&before).unwrap();
        assert_eq!(after, doc(vec![p("fXYo")]));

        let inverse = step.invert(&before).unwrap();
        assert_eq!(inverse.apply(&after).unwrap(), before);
    }

    #[test]
    fn map_covers_replaced_range() {
        let step = ReplaceStep::new(2, 3, Slice::closed(Fragment::from_node(text("XY"))));
        let map = step.map();
        assert_eq!(map.map(3, Bias::Right), 4);
        assert_eq!(map.map(4, Bias::Left), 5);
    }
}
