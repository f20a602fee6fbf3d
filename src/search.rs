use std::{cmp::Ordering, collections::BinaryHeap};

use fnv::FnvHashMap;
use log::{debug, trace};

use crate::{
    heuristic::Estimate,
    node::{Node, NodeId, Tree},
    state::{successors, State, GOAL},
};

/// Outcome of one [`search()`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Start to goal inclusive; empty when the goal was never reached.
    pub path: Vec<Node>,
    /// Nodes popped from the frontier, the goal included.
    pub expanded: usize,
    /// Nodes pushed onto the frontier, the root included.
    pub generated: usize,
}

impl Solution {
    pub fn is_solved(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of moves on the path.
    pub fn cost(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Tiles slid, in order.
    pub fn moves(&self) -> Vec<u8> {
        self.path.iter().filter_map(|n| n.tile).collect()
    }
}

// frontier entry; the heap's greatest entry is expanded next:
// lowest f, then deepest g, then first inserted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Open {
    f: u32,
    g: u32,
    id: NodeId,
}

impl Open {
    fn new(id: NodeId, node: &Node) -> Open {
        Open {
            f: node.f,
            g: node.g,
            id,
        }
    }
}

impl Ord for Open {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Open {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* from `start` to [`GOAL`] with unit move costs.
///
/// `start` must be solvable (see [`crate::is_solvable`]); otherwise the
/// whole reachable half of the state space is explored and the returned
/// path is empty.
pub fn search<H: Estimate + ?Sized>(start: State, heuristic: &H) -> Solution {
    let mut tree = Tree::new();
    let mut frontier = BinaryHeap::new();
    // lowest g each state has been pushed with
    let mut best_cost: FnvHashMap<State, u32> = FnvHashMap::default();
    let mut expanded = 0;
    let mut peak = 0;

    let root = tree.insert(Node::root(start, heuristic.estimate(&start)));
    frontier.push(Open::new(root, &tree[root]));
    best_cost.insert(start, 0);

    while let Some(open) = frontier.pop() {
        expanded += 1;
        let current = tree[open.id];
        trace!("expanding f={} g={} {:?}", current.f, current.g, current.state);

        if current.state == GOAL {
            let path = tree.path(open.id);
            debug!(
                "solved in {} moves: expanded {}, generated {}, frontier peak {}",
                current.g,
                expanded,
                tree.len(),
                peak
            );
            return Solution {
                path,
                expanded,
                generated: tree.len(),
            };
        }

        let g = current.g + 1;
        for (next, tile) in successors(&current.state) {
            if best_cost.get(&next).map_or(false, |&best| best <= g) {
                continue;
            }

            best_cost.insert(next, g);
            let h = heuristic.estimate(&next);
            let id = tree.insert(Node::child(open.id, next, tile, g, h));
            frontier.push(Open::new(id, &tree[id]));
        }

        peak = peak.max(frontier.len());
    }

    debug!(
        "frontier exhausted without reaching the goal: expanded {}, generated {}",
        expanded,
        tree.len()
    );
    Solution {
        path: Vec::new(),
        expanded,
        generated: tree.len(),
    }
}
