use log::debug;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{Deadline, Exploration, Node, Outcome, Visited};
use crate::heuristic::Heuristic;
use crate::puzzle::Puzzle;

/// Frontier entry. Ordered by priority, then by insertion sequence, so grids
/// and paths never take part in comparisons.
struct Entry {
    priority: u32,
    seq: u64,
    node: Node,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    // Reversed: BinaryHeap is a max-heap and we want the lowest priority,
    // earliest inserted entry on top.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Default)]
struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Frontier {
    fn push(&mut self, priority: u32, node: Node) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            node,
        });
    }

    fn pop(&mut self) -> Option<Node> {
        self.heap.pop().map(|entry| entry.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Shared loop for greedy and A*. `priority` receives a state and the length
/// of the path that reached it.
fn best_first<F>(start: &Puzzle, deadline: &Deadline, priority: F) -> Exploration
where
    F: Fn(&Puzzle, usize) -> u32,
{
    let mut frontier = Frontier::default();
    frontier.push(priority(start, 0), Node::root(start.clone()));
    let mut visited = Visited::default();
    let mut expanded = 0;
    let mut peak = frontier.len();

    while let Some(node) = frontier.pop() {
        if deadline.expired() {
            return Exploration {
                outcome: Outcome::TimedOut,
                expanded,
            };
        }

        // Pushed again before its first expansion.
        if visited.contains(&node.state) {
            continue;
        }
        if node.state.is_solved() {
            debug!(
                "Goal popped after {} expansions, peak frontier {}",
                expanded, peak
            );
            return Exploration {
                outcome: Outcome::Found(node.path),
                expanded,
            };
        }

        visited.insert(&node.state);
        expanded += 1;
        let depth = node.path.len() + 1;
        for (mv, next) in node.state.successors() {
            if !visited.contains(&next) {
                frontier.push(priority(&next, depth), node.child(mv, next));
            }
        }
        peak = peak.max(frontier.len());
    }

    debug!(
        "Frontier emptied: {} expanded, peak frontier {}",
        expanded, peak
    );
    Exploration {
        outcome: Outcome::Exhausted,
        expanded,
    }
}

/// Orders the frontier by the heuristic alone. Fast, not optimal.
pub(super) fn greedy(start: &Puzzle, heuristic: Heuristic, deadline: &Deadline) -> Exploration {
    best_first(start, deadline, |state, _| heuristic.evaluate(state))
}

/// Orders the frontier by `g + h`. Optimal with an admissible heuristic.
pub(super) fn a_star(start: &Puzzle, heuristic: Heuristic, deadline: &Deadline) -> Exploration {
    best_first(start, deadline, |state, depth| {
        depth as u32 + heuristic.evaluate(state)
    })
}
