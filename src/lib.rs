//! Sliding puzzle (8-puzzle, 15-puzzle) solver.
//!
//! - [`puzzle`]: board state, moves and shuffling
//! - [`solvability`]: inversion-parity check
//! - [`heuristic`]: Manhattan distance and misplaced tiles
//! - [`search`]: bounded DFS, greedy best-first and A* under a deadline
//! - [`batch`]: every method on the same puzzle, with statistics
//!
//! ```
//! use slider_puzzle::{search, Heuristic, Method, Puzzle};
//!
//! let puzzle = Puzzle::from_rows(vec![vec![1, 2, 3], vec![4, 0, 6], vec![7, 5, 8]]).unwrap();
//! let result = search::solve(&puzzle, Method::AStar, Some(Heuristic::Manhattan)).unwrap();
//! assert_eq!(result.move_count(), Some(2));
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod heuristic;
pub mod puzzle;
pub mod search;
pub mod solvability;

pub use config::Config;
pub use error::PuzzleError;
pub use heuristic::Heuristic;
pub use puzzle::{Move, Puzzle, Tile};
pub use search::{Method, Outcome, SearchRecord, SearchResult, Solver};
