// Solver configuration, read from Solver.toml.
// Every section and field is optional; missing values fall back to the
// defaults below, which match the limits the solver has always used.

use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::PuzzleError;
use crate::heuristic::Heuristic;
use crate::puzzle::Puzzle;
use crate::search::Method;

pub const DEFAULT_CONFIG_PATH: &str = "Solver.toml";

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub shuffle: ShuffleConfig,
    pub heuristics: HeuristicConfig,
}

/// Limits applied to every search call
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub time_limit_secs: f64,
    pub depth_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            time_limit_secs: 20.0,
            depth_limit: 200,
        }
    }
}

impl SearchConfig {
    /// Wall-clock deadline per search. Negative or NaN limits become zero.
    pub fn time_limit(&self) -> Duration {
        Duration::try_from_secs_f64(self.time_limit_secs.max(0.0)).unwrap_or(Duration::MAX)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ShuffleStrategy {
    /// Random legal moves away from the current state.
    RandomWalk,
    /// Random permutation, redrawn until solvable.
    Permutation,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ShuffleConfig {
    pub moves: usize,
    pub strategy: ShuffleStrategy,
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        ShuffleConfig {
            moves: 100,
            strategy: ShuffleStrategy::RandomWalk,
        }
    }
}

impl ShuffleConfig {
    pub fn shuffle<R: Rng + ?Sized>(&self, puzzle: &mut Puzzle, rng: &mut R) {
        match self.strategy {
            ShuffleStrategy::RandomWalk => puzzle.scramble(self.moves, rng),
            ShuffleStrategy::Permutation => puzzle.shuffle(rng),
        }
    }
}

/// Heuristic used when a caller picks a method but no heuristic
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HeuristicConfig {
    pub greedy: Heuristic,
    pub a_star: Heuristic,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        HeuristicConfig {
            greedy: Heuristic::MisplacedTiles,
            a_star: Heuristic::Manhattan,
        }
    }
}

impl HeuristicConfig {
    pub fn for_method(&self, method: Method) -> Option<Heuristic> {
        match method {
            Method::BoundedDfs => None,
            Method::Greedy => Some(self.greedy),
            Method::AStar => Some(self.a_star),
        }
    }
}

impl Config {
    pub fn parse(contents: &str) -> Result<Self, PuzzleError> {
        toml::from_str(contents)
            .map_err(|e| PuzzleError::Config(format!("failed to parse config: {}", e)))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PuzzleError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            PuzzleError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::parse(&contents)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Loads `path`, falling back to defaults when it is missing or invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_else(|e| {
            warn!("{}, using default configuration", e);
            Self::default()
        })
    }
}
