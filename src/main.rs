use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::style::Stylize;
use env_logger::Env;
use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use std::path::PathBuf;

use slider_puzzle::batch::{self, BatchRun, MethodStats};
use slider_puzzle::config::{Config, ShuffleStrategy, DEFAULT_CONFIG_PATH};
use slider_puzzle::puzzle::goal_tile;
use slider_puzzle::{Heuristic, Method, Outcome, Puzzle, SearchResult, Solver, Tile};

#[derive(Parser, Debug)]
#[command(
    name = "slider-puzzle",
    about = "Solve N-tile sliding puzzles with bounded DFS, greedy best-first or A* search"
)]
struct Cli {
    /// Board size used when shuffling a new puzzle
    #[arg(short, long, default_value_t = 3)]
    size: usize,

    /// Start from this grid instead of shuffling, row-major ("1,2,3,4,0,6,7,5,8")
    #[arg(short, long)]
    grid: Option<String>,

    /// dfs, greedy, a_star, or all
    #[arg(short, long, default_value = "a_star")]
    method: String,

    /// manhattan or misplaced_tiles, for greedy and A*
    #[arg(long)]
    heuristic: Option<String>,

    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Deadline per search in seconds
    #[arg(long)]
    time_limit: Option<f64>,

    /// Maximum DFS path length
    #[arg(long)]
    depth_limit: Option<usize>,

    /// Number of random moves used to shuffle
    #[arg(long)]
    shuffle_moves: Option<usize>,

    /// Shuffle with a random solvable permutation instead of random moves
    #[arg(long)]
    permutation: bool,

    #[arg(long)]
    seed: Option<u64>,

    /// Run every method on this many freshly shuffled puzzles and report statistics
    #[arg(long)]
    batches: Option<usize>,

    /// Print every board along a found solution
    #[arg(long)]
    steps: bool,

    /// Print JSON instead of boards
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct BatchReport<'a> {
    runs: &'a [BatchRun],
    statistics: Vec<MethodStats>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = Config::load_or_default(&cli.config);
    if let Some(secs) = cli.time_limit {
        config.search.time_limit_secs = secs;
    }
    if let Some(depth) = cli.depth_limit {
        config.search.depth_limit = depth;
    }
    if let Some(moves) = cli.shuffle_moves {
        config.shuffle.moves = moves;
    }
    if cli.permutation {
        config.shuffle.strategy = ShuffleStrategy::Permutation;
    }
    if let Some(name) = &cli.heuristic {
        let heuristic: Heuristic = name.parse()?;
        config.heuristics.greedy = heuristic;
        config.heuristics.a_star = heuristic;
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let solver = Solver::new(&config);
    info!("Search limits: {:?}", solver.limits());

    if let Some(count) = cli.batches {
        let runs = batch::run_batches(&solver, cli.size, count, &config.shuffle, &mut rng)?;
        let statistics = batch::summarize(runs.iter().flat_map(|run| run.records.iter()));
        if cli.json {
            let report = BatchReport {
                runs: &runs,
                statistics,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_statistics(cli.size, &statistics);
        }
        return Ok(());
    }

    let puzzle = match &cli.grid {
        Some(grid) => parse_grid(grid)?,
        None => {
            let mut puzzle = Puzzle::new(cli.size)?;
            config.shuffle.shuffle(&mut puzzle, &mut rng);
            puzzle
        }
    };
    if !puzzle.is_solvable() {
        warn!("Puzzle is not solvable; searches will exhaust or time out");
    }

    let results = if cli.method.eq_ignore_ascii_case("all") {
        solver.solve_all(&puzzle)?
    } else {
        let method: Method = cli.method.parse()?;
        vec![solver.solve_with_defaults(&puzzle, method)?]
    };

    if cli.json {
        let run = BatchRun {
            batch: 0,
            size: puzzle.size(),
            initial: puzzle.rows(),
            records: results.iter().map(SearchResult::record).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&run)?);
        return Ok(());
    }

    println!("Initial Puzzle:\n{}", render(&puzzle));
    for result in &results {
        print_result(result);
        if cli.steps {
            print_steps(&puzzle, result)?;
        }
    }
    Ok(())
}

fn parse_grid(grid: &str) -> Result<Puzzle> {
    let tiles = grid
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Tile>()
                .with_context(|| format!("invalid tile {:?}", s))
        })
        .collect::<Result<Vec<_>>>()?;

    let size = (1..=tiles.len()).find(|n| n * n >= tiles.len()).unwrap_or(0);
    if size * size != tiles.len() {
        bail!("{} tiles do not form a square grid", tiles.len());
    }
    info!("Using supplied {}x{} grid", size, size);
    Ok(Puzzle::from_tiles(size, tiles)?)
}

fn render(puzzle: &Puzzle) -> String {
    let size = puzzle.size();
    let width = (size * size - 1).to_string().len();
    let mut out = String::new();
    for (idx, &tile) in puzzle.tiles().iter().enumerate() {
        let cell = format!("{:>width$}", tile, width = width);
        let styled = if tile == 0 {
            format!("{:>width$}", ".", width = width).dark_grey()
        } else if tile == goal_tile(size, idx) {
            cell.green()
        } else {
            cell.yellow().bold()
        };
        out.push_str(&format!("{} ", styled));
        if idx % size == size - 1 {
            out.push('\n');
        }
    }
    out
}

fn print_result(result: &SearchResult) {
    let label = match result.heuristic {
        Some(h) => format!("{} ({})", result.method, h),
        None => result.method.to_string(),
    };
    let summary = match &result.outcome {
        Outcome::Found(path) => format!("found a {}-move solution", path.len()).green(),
        Outcome::Exhausted => "exhausted the search space".to_string().yellow(),
        Outcome::TimedOut => "timed out".to_string().red(),
    };
    println!(
        "{}: {} in {:.4?} ({} nodes expanded)",
        label.bold(),
        summary,
        result.elapsed,
        result.nodes_expanded
    );
}

fn print_steps(puzzle: &Puzzle, result: &SearchResult) -> Result<()> {
    let Some(path) = result.path() else {
        return Ok(());
    };
    let states = puzzle.replay(path)?;
    for (mv, state) in path.iter().zip(states.iter().skip(1)) {
        println!("{}\n{}", mv, render(state));
    }
    Ok(())
}

fn print_statistics(size: usize, statistics: &[MethodStats]) {
    println!("{}", format!("Board {}x{}", size, size).bold());
    println!(
        "{:<10} {:>8} {:>8} {:>12} {:>10}",
        "Algorithm", "Runs", "Solved", "Avg Time", "Avg Moves"
    );
    for stat in statistics {
        let moves = stat
            .avg_moves
            .map(|m| format!("{:.1}", m))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<10} {:>8} {:>8} {:>11.4}s {:>10}",
            stat.method.to_string().to_uppercase(),
            stat.runs,
            stat.solved,
            stat.avg_time_secs,
            moves
        );
    }
}
