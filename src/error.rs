use thiserror::Error;

use crate::puzzle::Move;
use crate::search::Method;

/// Errors raised for invalid requests against the puzzle and the solver.
///
/// Search failures (deadline hit, state space exhausted) are not errors;
/// they are reported through [`crate::search::Outcome`].
#[derive(Error, Debug)]
pub enum PuzzleError {
    /// The blank cannot move in this direction without leaving the board.
    #[error("illegal move {mv}: blank at ({row}, {col}) would leave the {size}x{size} board")]
    IllegalMove {
        mv: Move,
        row: usize,
        col: usize,
        size: usize,
    },

    #[error("invalid method: {0:?} (expected dfs, greedy or a_star)")]
    InvalidMethod(String),

    #[error("invalid heuristic: {0:?} (expected manhattan or misplaced_tiles)")]
    InvalidHeuristic(String),

    /// Greedy and A* cannot run without a heuristic.
    #[error("{0} search requires a heuristic")]
    MissingHeuristic(Method),

    #[error("malformed grid: {0}")]
    MalformedGrid(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
