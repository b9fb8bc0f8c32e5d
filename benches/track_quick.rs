// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

// Quick timing summary of the tracking pipeline without criterion.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use redline::author::AuthorId;
use redline::model::build::{doc, p};
use redline::model::Node;
use redline::track::TrackerState;
use redline::transform::Transform;

fn time_ops<F: Fn() -> usize>(f: F, iterations: usize) -> f64 {
    // Warmup
    for _ in 0..3 {
        let _ = f();
    }

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = f();
    }
    let elapsed = start.elapsed();
    return elapsed.as_nanos() as f64 / iterations as f64;
}

fn paragraphs(count: usize) -> Node {
    return doc((0..count).map(|_| p("the quick brown fox jumps over the lazy dog")).collect());
}

fn run(edits: usize, authors: u16, seed: u64) -> usize {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tracker = TrackerState::default();
    let mut current = paragraphs(8);
    for _ in 0..edits {
        let block = rng.gen_range(0..current.child_count());
        let start: usize = (0..block).map(|i| current.child(i).node_size()).sum::<usize>() + 1;
        let size = current.child(block).content_size();
        let author = AuthorId::new(rng.gen_range(0..authors));

        let mut tr = Transform::new(current);
        let result = if size > 0 && rng.gen_bool(0.3) {
            let pos = start + rng.gen_range(0..size);
            tr.delete(pos, pos + 1).map(|_| ())
        } else {
            let pos = start + rng.gen_range(0..=size);
            tr.insert_text(pos, "x").map(|_| ())
        };
        if let Err(err) = result {
            panic!("edit failed: {}", err);
        }
        if let Err(err) = tracker.on_edit_applied(&tr, Some(author), false) {
            panic!("tracking failed: {}", err);
        }
        current = tr.into_doc();
    }
    return tracker.changes().len();
}

fn main() {
    println!("{:<24} {:>14} {:>10}", "workload", "ns/run", "changes");
    for (name, edits, authors) in [
        ("100 edits, 1 author", 100, 1u16),
        ("100 edits, 3 authors", 100, 3),
        ("1000 edits, 1 author", 1000, 1),
        ("1000 edits, 3 authors", 1000, 3),
    ] {
        let changes = run(edits, authors, 7);
        let ns = time_ops(|| run(edits, authors, 7), 20);
        println!("{:<24} {:>14.0} {:>10}", name, ns, changes);
    }
}
