//! Admissible estimates of the number of moves left to reach the goal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PuzzleError;
use crate::puzzle::{goal_tile, Puzzle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// Sum of each tile's grid distance to its goal cell. Consistent.
    Manhattan,
    /// Number of tiles not on their goal cell.
    MisplacedTiles,
}

impl Heuristic {
    pub fn evaluate(&self, puzzle: &Puzzle) -> u32 {
        match self {
            Heuristic::Manhattan => manhattan_distance(puzzle),
            Heuristic::MisplacedTiles => misplaced_tiles(puzzle),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::MisplacedTiles => "misplaced_tiles",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Heuristic {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manhattan" => Ok(Heuristic::Manhattan),
            "misplaced_tiles" | "misplaced" => Ok(Heuristic::MisplacedTiles),
            _ => Err(PuzzleError::InvalidHeuristic(s.to_string())),
        }
    }
}

pub fn manhattan_distance(puzzle: &Puzzle) -> u32 {
    let size = puzzle.size();
    let mut distance = 0;
    for (idx, &value) in puzzle.tiles().iter().enumerate() {
        if value != 0 {
            let (row, col) = (idx / size, idx % size);
            let target_row = (value as usize - 1) / size;
            let target_col = (value as usize - 1) % size;
            distance += row.abs_diff(target_row) + col.abs_diff(target_col);
        }
    }
    distance as u32
}

pub fn misplaced_tiles(puzzle: &Puzzle) -> u32 {
    let size = puzzle.size();
    puzzle
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(idx, &value)| value != 0 && value != goal_tile(size, idx))
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: Vec<Vec<u8>>) -> Puzzle {
        Puzzle::from_rows(rows).unwrap()
    }

    #[test]
    fn goal_scores_zero() {
        let goal = Puzzle::new(4).unwrap();
        assert_eq!(manhattan_distance(&goal), 0);
        assert_eq!(misplaced_tiles(&goal), 0);
    }

    #[test]
    fn scores_known_grid() {
        let puzzle = grid(vec![vec![1, 2, 3], vec![4, 0, 6], vec![7, 5, 8]]);
        assert_eq!(manhattan_distance(&puzzle), 2);
        assert_eq!(misplaced_tiles(&puzzle), 2);

        // 8 and 1 each sit three steps from home.
        let puzzle = grid(vec![vec![8, 2, 3], vec![4, 5, 6], vec![7, 1, 0]]);
        assert_eq!(manhattan_distance(&puzzle), 6);
        assert_eq!(misplaced_tiles(&puzzle), 2);
    }

    #[test]
    fn blank_is_never_counted() {
        let puzzle = grid(vec![vec![0, 1], vec![2, 3]]);
        // 1: (0,1)->(0,0)=1, 2: (1,0)->(0,1)=2, 3: (1,1)->(1,0)=1
        assert_eq!(manhattan_distance(&puzzle), 4);
        assert_eq!(misplaced_tiles(&puzzle), 3);
    }

    #[test]
    fn parses_names() {
        assert_eq!("manhattan".parse::<Heuristic>().unwrap(), Heuristic::Manhattan);
        assert_eq!("Misplaced".parse::<Heuristic>().unwrap(), Heuristic::MisplacedTiles);
        assert_eq!(
            Heuristic::MisplacedTiles.to_string().parse::<Heuristic>().unwrap(),
            Heuristic::MisplacedTiles
        );
        assert!(matches!(
            "euclid".parse::<Heuristic>(),
            Err(PuzzleError::InvalidHeuristic(_))
        ));
    }
}
