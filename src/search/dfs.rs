use log::debug;

use super::{Deadline, Exploration, Node, Outcome, Visited};
use crate::puzzle::Puzzle;

/// Depth-limited DFS with an explicit stack.
///
/// A state is marked visited when it is expanded, not when it is pushed, so
/// the same state can sit on the stack more than once. Nodes whose path has
/// reached `depth_limit` are goal-checked but not expanded.
pub(super) fn bounded_dfs(start: &Puzzle, depth_limit: usize, deadline: &Deadline) -> Exploration {
    let mut stack = vec![Node::root(start.clone())];
    let mut visited = Visited::default();
    let mut expanded = 0;
    let mut peak = stack.len();

    while let Some(node) = stack.pop() {
        if deadline.expired() {
            return Exploration {
                outcome: Outcome::TimedOut,
                expanded,
            };
        }

        if node.state.is_solved() {
            return Exploration {
                outcome: Outcome::Found(node.path),
                expanded,
            };
        }

        if node.path.len() < depth_limit {
            visited.insert(&node.state);
            expanded += 1;
            for (mv, next) in node.state.successors() {
                if !visited.contains(&next) {
                    stack.push(node.child(mv, next));
                }
            }
            peak = peak.max(stack.len());
        }
    }

    debug!(
        "DFS stack emptied: {} expanded, {} visited, peak stack {}",
        expanded,
        visited.len(),
        peak
    );
    Exploration {
        outcome: Outcome::Exhausted,
        expanded,
    }
}
