// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

use redline::author::AuthorTable;
use redline::error::TrackError;
use redline::model::build::{doc, p};
use redline::track::TrackerState;
use redline::transform::Transform;

fn main() -> Result<(), TrackError> {
    let mut authors = AuthorTable::new();
    let alice = authors.intern("alice");
    let bob = authors.intern("bob");
    let mut tracker = TrackerState::default();

    let mut tr = Transform::new(doc(vec![p("the quick fox"), p("jumps over")]));
    tr.insert_text(11, "brown ")?;
    tracker.on_edit_applied(&tr, Some(alice), false)?;
    let current = tr.into_doc();

    let mut tr = Transform::new(current);
    tr.join(21)?;
    tracker.on_edit_applied(&tr, Some(bob), false)?;
    let current = tr.into_doc();

    println!("{}", current);
    for change in tracker.changes() {
        let who = authors.resolve(change.author).copied().unwrap_or("?");
        println!("{:?} by {}: {}..{} deleted {}", change.kind(), who, change.from, change.to, change.deleted);
    }

    let (revert, skipped) = tracker.revert_all(&current);
    for id in skipped {
        println!("could not revert {}", id);
    }
    tracker.on_edit_applied(&revert, None, true)?;
    println!("{}", revert.doc());
    return Ok(());
}
