// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Edit operations.
//!
//! A `Transform` is what the tracker consumes: an ordered list of steps,
//! the document before each of them, and their position maps. Each step's
//! map is only meaningful against the document right after the previous
//! step, so consumers walk `steps()` in order.

use log::trace;

use crate::error::ModelError;
use crate::model::{Fragment, Node, Slice};
use super::map::{Mapping, StepMap};
use super::step::ReplaceStep;

/// Where an edit came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditOrigin {
    /// A user edit that should be tracked.
    #[default]
    User,
    /// An edit that reverts tracked changes. Never tracked itself.
    Revert,
    /// An edit from outside the editor, such as a remote sync.
    External,
}

/// Metadata the host uses to route an edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditMeta {
    pub origin: EditOrigin,
    /// Whether the host should record the edit in its undo history.
    pub add_to_history: bool,
}

impl Default for EditMeta {
    fn default() -> Self {
        return EditMeta {
            origin: EditOrigin::User,
            add_to_history: true,
        };
    }
}

/// One step of a transform, with the documents on either side of it.
#[derive(Clone, Copy, Debug)]
pub struct EditStep<'a> {
    pub step: &'a ReplaceStep,
    pub before: &'a Node,
    pub after: &'a Node,
    pub map: &'a StepMap,
}

/// A sequence of steps applied to a document.
#[derive(Clone, Debug)]
pub struct Transform {
    /// The document before each step.
    docs: Vec<Node>,
    steps: Vec<ReplaceStep>,
    mapping: Mapping,
    doc: Node,
    meta: EditMeta,
}

impl Transform {
    pub fn new(doc: Node) -> Transform {
        return Transform {
            docs: Vec::new(),
            steps: Vec::new(),
            mapping: Mapping::new(),
            doc,
            meta: EditMeta::default(),
        };
    }

    /// The current document, after all steps.
    pub fn doc(&self) -> &Node {
        return &self.doc;
    }

    /// Consume the transform, returning the current document.
    pub fn into_doc(self) -> Node {
        return self.doc;
    }

    /// The document the transform started from.
    pub fn before(&self) -> &Node {
        return self.docs.first().unwrap_or(&self.doc);
    }

    pub fn mapping(&self) -> &Mapping {
        return &self.mapping;
    }

    pub fn meta(&self) -> EditMeta {
        return self.meta;
    }

    pub fn set_meta(&mut self, meta: EditMeta) -> &mut Transform {
        self.meta = meta;
        return self;
    }

    pub fn step_count(&self) -> usize {
        return self.steps.len();
    }

    pub fn doc_changed(&self) -> bool {
        return !self.steps.is_empty();
    }

    /// Walk the steps in order.
    pub fn steps(&self) -> impl Iterator<Item = EditStep<'_>> {
        return self.steps.iter().enumerate().map(move |(i, step)| EditStep {
            step,
            before: &self.docs[i],
            after: self.docs.get(i + 1).unwrap_or(&self.doc),
            map: &self.mapping.maps()[i],
        });
    }

    /// Apply a step. No-op steps are skipped.
    pub fn step(&mut self, step: ReplaceStep) -> Result<&mut Transform, ModelError> {
        if step.is_noop() {
            return Ok(self);
        }
        let next = step.apply(&self.doc)?;
        trace!("step {}..{} -> {}", step.from, step.to, step.slice);
        let prev = std::mem::replace(&mut self.doc, next);
        self.docs.push(prev);
        self.mapping.push(step.map());
        self.steps.push(step);
        return Ok(self);
    }

    pub fn replace(&mut self, from: usize, to: usize, slice: Slice) -> Result<&mut Transform, ModelError> {
        return self.step(ReplaceStep::new(from, to, slice));
    }

    pub fn delete(&mut self, from: usize, to: usize) -> Result<&mut Transform, ModelError> {
        return self.replace(from, to, Slice::empty());
    }

    /// Insert whole nodes at a position.
    pub fn insert(&mut self, pos: usize, content: Fragment) -> Result<&mut Transform, ModelError> {
        return self.replace(pos, pos, Slice::closed(content));
    }

    pub fn insert_text(&mut self, pos: usize, text: &str) -> Result<&mut Transform, ModelError> {
        return self.insert(pos, Fragment::from_node(Node::text(text)));
    }

    /// Replace a range with text.
    pub fn replace_with_text(&mut self, from: usize, to: usize, text: &str) -> Result<&mut Transform, ModelError> {
        return self.replace(from, to, Slice::closed(Fragment::from_node(Node::text(text))));
    }

    /// Split the branch around `pos` in two.
    pub fn split(&mut self, pos: usize) -> Result<&mut Transform, ModelError> {
        let slice = {
            let resolved = self.doc.resolve(pos)?;
            if resolved.depth() == 0 {
                return Err(ModelError::CannotSplit { pos });
            }
            let parent = resolved.parent();
            let halves = vec![parent.copy(Fragment::empty()), parent.copy(Fragment::empty())];
            Slice::new(Fragment::from_nodes(halves), 1, 1)
        };
        return self.replace(pos, pos, slice);
    }

    /// Join the two branches that meet at `pos`.
    pub fn join(&mut self, pos: usize) -> Result<&mut Transform, ModelError> {
        if pos == 0 {
            return Err(ModelError::InvalidRange { from: pos, to: pos + 1 });
        }
        return self.delete(pos - 1, pos + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build::{doc, p};
    use crate::transform::Bias;

    #[test]
    fn records_docs_and_maps() {
        let mut tr = Transform::new(doc(vec![p("foo")]));
        tr.insert_text(2, "hi").unwrap().delete(1, 2).unwrap();
        assert_eq!(tr.doc(), &doc(vec![p("hioo")]));
        assert_eq!(tr.before(), &doc(vec![p("foo")]));
        assert_eq!(tr.step_count(), 2);

        let steps: Vec<_> = tr.steps().collect();
        assert_eq!(steps[0].before, &doc(vec![p("foo")]));
        assert_eq!(steps[0].after, &doc(vec![p("fhioo")]));
        assert_eq!(steps[1].after, tr.doc());
        assert_eq!(tr.mapping().map(3, Bias::Left), 4);
    }

    #[test]
    fn noop_steps_are_skipped() {
        let mut tr = Transform::new(doc(vec![p("foo")]));
        tr.delete(2, 2).unwrap();
        assert!(!tr.doc_changed());
    }

    #[test]
    fn split_and_join() {
        let mut tr = Transform::new(doc(vec![p("abcd")]));
        tr.split(3).unwrap();
        assert_eq!(tr.doc(), &doc(vec![p("ab"), p("cd")]));
        tr.join(4).unwrap();
        assert_eq!(tr.doc(), &doc(vec![p("abcd")]));
    }

    #[test]
    fn split_at_root_fails() {
        let mut tr = Transform::new(doc(vec![p("ab"), p("cd")]));
        assert_eq!(tr.split(4).unwrap_err(), ModelError::CannotSplit { pos: 4 });
    }
}
