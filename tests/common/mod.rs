use std::collections::{HashMap, VecDeque};

use slider_puzzle::{Puzzle, Tile};

/// Breadth-first distances from the goal to every reachable state.
///
/// Moves are reversible, so the distance from the goal to a state equals the
/// shortest solution length for that state.
pub fn distances_from_goal(size: usize) -> HashMap<Vec<Tile>, usize> {
    let goal = Puzzle::new(size).unwrap();
    let mut distances = HashMap::new();
    distances.insert(goal.tiles().to_vec(), 0);
    let mut queue = VecDeque::from([goal]);

    while let Some(state) = queue.pop_front() {
        let depth = distances[state.tiles()];
        for (_, next) in state.successors() {
            if !distances.contains_key(next.tiles()) {
                distances.insert(next.tiles().to_vec(), depth + 1);
                queue.push_back(next);
            }
        }
    }
    distances
}
