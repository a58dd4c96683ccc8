//! Search strategies over the puzzle's state graph.
//!
//! Contains:
//! - Depth-limited DFS with an explicit stack
//! - Greedy best-first and A* over a shared priority frontier
//!
//! Every call owns its frontier and visited set and runs against its own
//! wall-clock deadline, checked before each node is processed. Running out
//! of time or states is reported through [`Outcome`], not as an error.

mod best_first;
mod dfs;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::config::{Config, HeuristicConfig, SearchConfig};
use crate::error::PuzzleError;
use crate::heuristic::Heuristic;
use crate::puzzle::{Move, Puzzle, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    #[serde(rename = "dfs")]
    BoundedDfs,
    Greedy,
    AStar,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::BoundedDfs, Method::Greedy, Method::AStar];

    pub fn needs_heuristic(&self) -> bool {
        !matches!(self, Method::BoundedDfs)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Method::BoundedDfs => "dfs",
            Method::Greedy => "greedy",
            Method::AStar => "a_star",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Method {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dfs" => Ok(Method::BoundedDfs),
            "greedy" => Ok(Method::Greedy),
            "a_star" | "astar" => Ok(Method::AStar),
            _ => Err(PuzzleError::InvalidMethod(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Moves leading from the initial state to the goal.
    Found(Vec<Move>),
    /// The frontier emptied without reaching the goal.
    Exhausted,
    /// The deadline passed first.
    TimedOut,
}

impl Outcome {
    pub fn tag(&self) -> OutcomeTag {
        match self {
            Outcome::Found(_) => OutcomeTag::Found,
            Outcome::Exhausted => OutcomeTag::Exhausted,
            Outcome::TimedOut => OutcomeTag::TimedOut,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeTag {
    Found,
    Exhausted,
    TimedOut,
}

impl fmt::Display for OutcomeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutcomeTag::Found => "found",
            OutcomeTag::Exhausted => "exhausted",
            OutcomeTag::TimedOut => "timed out",
        };
        write!(f, "{}", s)
    }
}

/// Result of one search call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub method: Method,
    pub heuristic: Option<Heuristic>,
    pub outcome: Outcome,
    pub elapsed: Duration,
    pub nodes_expanded: usize,
}

impl SearchResult {
    pub fn path(&self) -> Option<&[Move]> {
        match &self.outcome {
            Outcome::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        self.path().is_some()
    }

    pub fn move_count(&self) -> Option<usize> {
        self.path().map(<[Move]>::len)
    }

    /// Flattens the result into a form that can be stored or sent.
    pub fn record(&self) -> SearchRecord {
        SearchRecord {
            method: self.method,
            heuristic: self.heuristic,
            outcome: self.outcome.tag(),
            moves: self.path().map(<[Move]>::to_vec).unwrap_or_default(),
            move_count: self.move_count(),
            elapsed_secs: self.elapsed.as_secs_f64(),
            nodes_expanded: self.nodes_expanded,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub method: Method,
    pub heuristic: Option<Heuristic>,
    pub outcome: OutcomeTag,
    pub moves: Vec<Move>,
    pub move_count: Option<usize>,
    pub elapsed_secs: f64,
    pub nodes_expanded: usize,
}

/// A validated method/heuristic pairing.
#[derive(Debug, Clone, Copy)]
enum Strategy {
    BoundedDfs,
    Greedy(Heuristic),
    AStar(Heuristic),
}

impl Strategy {
    fn select(method: Method, heuristic: Option<Heuristic>) -> Result<Self, PuzzleError> {
        let heuristic = match heuristic {
            Some(h) => h,
            None if method.needs_heuristic() => {
                return Err(PuzzleError::MissingHeuristic(method))
            }
            None => return Ok(Strategy::BoundedDfs),
        };
        Ok(match method {
            Method::BoundedDfs => Strategy::BoundedDfs,
            Method::Greedy => Strategy::Greedy(heuristic),
            Method::AStar => Strategy::AStar(heuristic),
        })
    }

    fn heuristic(&self) -> Option<Heuristic> {
        match *self {
            Strategy::BoundedDfs => None,
            Strategy::Greedy(h) | Strategy::AStar(h) => Some(h),
        }
    }
}

/// A state plus the moves that reached it. Each node owns its path.
struct Node {
    state: Puzzle,
    path: Vec<Move>,
}

impl Node {
    fn root(state: Puzzle) -> Self {
        Node {
            state,
            path: Vec::new(),
        }
    }

    fn child(&self, mv: Move, state: Puzzle) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(mv);
        Node { state, path }
    }
}

/// Expanded states, keyed by their tile layout.
#[derive(Default)]
struct Visited(HashSet<Vec<Tile>>);

impl Visited {
    fn contains(&self, state: &Puzzle) -> bool {
        self.0.contains(state.tiles())
    }

    fn insert(&mut self, state: &Puzzle) {
        if !self.contains(state) {
            self.0.insert(state.tiles().to_vec());
        }
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

struct Deadline {
    start: Instant,
    limit: Duration,
}

impl Deadline {
    fn start(limit: Duration) -> Self {
        Deadline {
            start: Instant::now(),
            limit,
        }
    }

    fn expired(&self) -> bool {
        self.start.elapsed() >= self.limit
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// What a strategy reports back before timing is attached.
struct Exploration {
    outcome: Outcome,
    expanded: usize,
}

/// Runs searches with fixed limits. Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    search: SearchConfig,
    heuristics: HeuristicConfig,
}

impl Solver {
    pub fn new(config: &Config) -> Self {
        Solver {
            search: config.search.clone(),
            heuristics: config.heuristics.clone(),
        }
    }

    pub fn with_limits(search: SearchConfig) -> Self {
        Solver {
            search,
            heuristics: HeuristicConfig::default(),
        }
    }

    pub fn limits(&self) -> &SearchConfig {
        &self.search
    }

    /// Searches for a path from `initial` to the goal.
    ///
    /// Greedy and A* need a heuristic; DFS ignores one if given. Unsolvable
    /// states are not rejected up front, they exhaust or time out.
    pub fn solve(
        &self,
        initial: &Puzzle,
        method: Method,
        heuristic: Option<Heuristic>,
    ) -> Result<SearchResult, PuzzleError> {
        let strategy = Strategy::select(method, heuristic)?;
        info!(
            "Starting {} search on {}x{} puzzle (heuristic: {:?}, limit: {:?})",
            method,
            initial.size(),
            initial.size(),
            strategy.heuristic(),
            self.search.time_limit()
        );

        let deadline = Deadline::start(self.search.time_limit());
        let run = match strategy {
            Strategy::BoundedDfs => dfs::bounded_dfs(initial, self.search.depth_limit, &deadline),
            Strategy::Greedy(h) => best_first::greedy(initial, h, &deadline),
            Strategy::AStar(h) => best_first::a_star(initial, h, &deadline),
        };
        let elapsed = deadline.elapsed();

        match &run.outcome {
            Outcome::Found(path) => info!(
                "{} found a {}-move solution in {:.4?} ({} nodes expanded)",
                method,
                path.len(),
                elapsed,
                run.expanded
            ),
            Outcome::Exhausted => info!(
                "{} exhausted its search space in {:.4?} ({} nodes expanded)",
                method, elapsed, run.expanded
            ),
            Outcome::TimedOut => warn!(
                "{} timed out after {:.4?} ({} nodes expanded)",
                method, elapsed, run.expanded
            ),
        }

        Ok(SearchResult {
            method,
            heuristic: strategy.heuristic(),
            outcome: run.outcome,
            elapsed,
            nodes_expanded: run.expanded,
        })
    }

    /// Solves with the configured default heuristic for `method`.
    pub fn solve_with_defaults(
        &self,
        initial: &Puzzle,
        method: Method,
    ) -> Result<SearchResult, PuzzleError> {
        self.solve(initial, method, self.heuristics.for_method(method))
    }

    /// Runs every method back-to-back on the same start state.
    pub fn solve_all(&self, initial: &Puzzle) -> Result<Vec<SearchResult>, PuzzleError> {
        let results = Method::ALL
            .iter()
            .map(|&method| self.solve_with_defaults(initial, method))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            "Batch finished: {}",
            results
                .iter()
                .map(|r| format!("{}={}", r.method, r.outcome.tag()))
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(results)
    }
}

/// Solves with the default limits (20 s deadline, DFS depth 200).
pub fn solve(
    initial: &Puzzle,
    method: Method,
    heuristic: Option<Heuristic>,
) -> Result<SearchResult, PuzzleError> {
    Solver::default().solve(initial, method, heuristic)
}
