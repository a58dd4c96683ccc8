//! Batch mode: every method against the same puzzle, plus per-method
//! statistics across batches.

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ShuffleConfig;
use crate::error::PuzzleError;
use crate::puzzle::{Puzzle, Tile};
use crate::search::{Method, OutcomeTag, SearchRecord, Solver};

/// One puzzle and the record of each method run on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRun {
    pub batch: usize,
    pub size: usize,
    pub initial: Vec<Vec<Tile>>,
    pub records: Vec<SearchRecord>,
}

pub fn run_batch(solver: &Solver, batch: usize, initial: &Puzzle) -> Result<BatchRun, PuzzleError> {
    let records = solver
        .solve_all(initial)?
        .iter()
        .map(|result| result.record())
        .collect();
    Ok(BatchRun {
        batch,
        size: initial.size(),
        initial: initial.rows(),
        records,
    })
}

/// Shuffles a fresh goal grid for each of `count` batches and solves it with
/// every method.
pub fn run_batches<R: Rng + ?Sized>(
    solver: &Solver,
    size: usize,
    count: usize,
    shuffle: &ShuffleConfig,
    rng: &mut R,
) -> Result<Vec<BatchRun>, PuzzleError> {
    let mut runs = Vec::with_capacity(count);
    for batch in 0..count {
        let mut puzzle = Puzzle::new(size)?;
        shuffle.shuffle(&mut puzzle, rng);
        info!("Batch {}/{}:\n{}", batch + 1, count, puzzle);
        runs.push(run_batch(solver, batch, &puzzle)?);
    }
    Ok(runs)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodStats {
    pub method: Method,
    pub runs: usize,
    pub solved: usize,
    /// Mean over all runs, solved or not.
    pub avg_time_secs: f64,
    /// Mean over solved runs; `None` if nothing was solved.
    pub avg_moves: Option<f64>,
}

/// Aggregates records per method, in [`Method::ALL`] order. Methods with no
/// records are left out.
pub fn summarize<'a, I>(records: I) -> Vec<MethodStats>
where
    I: IntoIterator<Item = &'a SearchRecord>,
{
    let records: Vec<&SearchRecord> = records.into_iter().collect();

    Method::ALL
        .iter()
        .filter_map(|&method| {
            let runs: Vec<&&SearchRecord> =
                records.iter().filter(|r| r.method == method).collect();
            if runs.is_empty() {
                return None;
            }

            let total_time: f64 = runs.iter().map(|r| r.elapsed_secs).sum();
            let solved_moves: Vec<usize> = runs
                .iter()
                .filter(|r| r.outcome == OutcomeTag::Found)
                .map(|r| r.moves.len())
                .collect();
            let avg_moves = if solved_moves.is_empty() {
                None
            } else {
                Some(solved_moves.iter().sum::<usize>() as f64 / solved_moves.len() as f64)
            };

            Some(MethodStats {
                method,
                runs: runs.len(),
                solved: solved_moves.len(),
                avg_time_secs: total_time / runs.len() as f64,
                avg_moves,
            })
        })
        .collect()
}
