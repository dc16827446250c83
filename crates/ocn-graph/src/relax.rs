//! Path table derivation by worklist relaxation.
//!
//! The work list is a min-heap on `(cost, discovery order)`, so the first
//! path installed for a destination is already the cheapest one and equal
//! cost ties go to the path discovered first.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use ocn_core::{Cost, NodeId};

use crate::node::Node;
use crate::path::Path;

/// Counters from one refresh, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RelaxStats {
    /// Paths pushed onto the work list, seeds included.
    pub(crate) pushed: usize,
    /// Paths taken off the work list.
    pub(crate) popped: usize,
    /// Paths that ended up in the table.
    pub(crate) installed: usize,
}

struct Candidate {
    cost: Cost,
    seq: u64,
    path: Path,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.seq == other.seq
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    // Reversed so the std max-heap pops the cheapest, then oldest, candidate.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Default)]
struct WorkList {
    heap: BinaryHeap<Candidate>,
    seq: u64,
    pushed: usize,
}

impl WorkList {
    fn push(&mut self, path: Path) {
        let seq = self.seq;
        self.seq += 1;
        self.pushed += 1;
        self.heap.push(Candidate {
            cost: path.cost(),
            seq,
            path,
        });
    }

    fn pop(&mut self) -> Option<Path> {
        self.heap.pop().map(|c| c.path)
    }
}

/// Derive the full path table of a node from `seeds` (its previous table).
///
/// `slots` is the network's node arena; only the direct outgoing links of
/// other nodes are read, never their cached tables.
pub(crate) fn derive_paths<P>(
    seeds: impl IntoIterator<Item = Path>,
    slots: &[Option<Node<P>>],
) -> (HashMap<NodeId, Path>, RelaxStats) {
    let mut work = WorkList::default();
    for seed in seeds {
        work.push(seed);
    }

    let mut best: HashMap<NodeId, Path> = HashMap::new();
    let mut stats = RelaxStats::default();

    while let Some(path) = work.pop() {
        stats.popped += 1;

        if path.is_loop() {
            continue;
        }
        let destination = path.destination();
        if let Some(existing) = best.get(&destination) {
            if existing.cost() <= path.cost() {
                continue;
            }
        }

        let hop = slots
            .get(destination.index())
            .and_then(Option::as_ref)
            .map(|node| node.outgoing.as_slice())
            .unwrap_or_default();
        for link in hop {
            let extended = path.cat(&link.path);
            let improves = best
                .get(&extended.destination())
                .is_none_or(|known| known.cost() > extended.cost());
            if improves && !extended.is_loop() {
                work.push(extended);
            }
        }

        best.insert(destination, path);
        stats.installed += 1;
    }

    stats.pushed = work.pushed;
    (best, stats)
}
