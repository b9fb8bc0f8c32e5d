// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Position maps.
//!
//! A step replaces ranges of the old document. Positions before a replaced
//! range are unchanged, positions after it shift by the size difference, and
//! positions at or inside it collapse onto the replacement. The bias decides
//! which edge of the inserted content a position lands on when that is
//! ambiguous.

use smallvec::SmallVec;

/// Which side of inserted content a mapped position sticks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bias {
    /// Stay before content inserted at this position.
    Left,
    /// Move past content inserted at this position.
    Right,
}

/// One replaced range: `old_size` tokens starting at `start` in the old
/// document became `new_size` tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplacedRange {
    pub start: usize,
    pub old_size: usize,
    pub new_size: usize,
}

impl ReplacedRange {
    pub fn old_end(&self) -> usize {
        return self.start + self.old_size;
    }

    pub fn new_end(&self) -> usize {
        return self.start + self.new_size;
    }

    /// A range that neither removes nor adds anything.
    pub fn is_noop(&self) -> bool {
        return self.old_size == 0 && self.new_size == 0;
    }
}

/// The result of mapping a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapResult {
    pub pos: usize,
    /// Whether the content on the biased side of the position was removed.
    pub deleted: bool,
}

/// The position map of one step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMap {
    /// Replaced ranges in old-document order.
    ranges: SmallVec<[ReplacedRange; 1]>,
}

impl StepMap {
    pub fn new(ranges: impl IntoIterator<Item = ReplacedRange>) -> StepMap {
        let ranges: SmallVec<[ReplacedRange; 1]> = ranges.into_iter().collect();
        debug_assert!(
            ranges.windows(2).all(|w| w[0].old_end() <= w[1].start),
            "step map ranges must be sorted and disjoint",
        );
        return StepMap { ranges };
    }

    /// The replaced ranges, in old-document coordinates.
    pub fn ranges(&self) -> &[ReplacedRange] {
        return &self.ranges;
    }

    pub fn map(&self, pos: usize, bias: Bias) -> usize {
        return self.map_result(pos, bias).pos;
    }

    pub fn map_result(&self, pos: usize, bias: Bias) -> MapResult {
        let mut diff: isize = 0;
        for range in &self.ranges {
            if range.start > pos {
                break;
            }
            let end = range.old_end();
            if pos <= end {
                let side = if range.old_size == 0 {
                    bias
                } else if pos == range.start {
                    Bias::Left
                } else if pos == end {
                    Bias::Right
                } else {
                    bias
                };
                let base = (range.start as isize + diff) as usize;
                let mapped = match side {
                    Bias::Left => base,
                    Bias::Right => base + range.new_size,
                };
                let edge = match bias {
                    Bias::Left => range.start,
                    Bias::Right => end,
                };
                return MapResult {
                    pos: mapped,
                    deleted: pos != edge,
                };
            }
            diff += range.new_size as isize - range.old_size as isize;
        }
        return MapResult {
            pos: (pos as isize + diff) as usize,
            deleted: false,
        };
    }

    /// The map that undoes this one.
    pub fn invert(&self) -> StepMap {
        let mut diff: isize = 0;
        let mut ranges = SmallVec::new();
        for range in &self.ranges {
            ranges.push(ReplacedRange {
                start: (range.start as isize + diff) as usize,
                old_size: range.new_size,
                new_size: range.old_size,
            });
            diff += range.new_size as isize - range.old_size as isize;
        }
        return StepMap { ranges };
    }
}

/// The maps of a sequence of steps, applied in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mapping {
    maps: Vec<StepMap>,
}

impl Mapping {
    pub fn new() -> Mapping {
        return Mapping { maps: Vec::new() };
    }

    pub fn push(&mut self, map: StepMap) {
        self.maps.push(map);
    }

    pub fn maps(&self) -> &[StepMap] {
        return &self.maps;
    }

    pub fn len(&self) -> usize {
        return self.maps.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.maps.is_empty();
    }

    pub fn map(&self, pos: usize, bias: Bias) -> usize {
        return self.maps.iter().fold(pos, |pos, map| map.map(pos, bias));
    }

    pub fn map_result(&self, pos: usize, bias: Bias) -> MapResult {
        let mut result = MapResult { pos, deleted: false };
        for map in &self.maps {
            let next = map.map_result(result.pos, bias);
            result = MapResult {
                pos: next.pos,
                deleted: result.deleted || next.deleted,
            };
        }
        return result;
    }
}
