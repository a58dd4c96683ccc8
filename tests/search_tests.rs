//! End-to-end behaviour of the three search strategies.

use rand::{rngs::StdRng, SeedableRng};
use slider_puzzle::config::SearchConfig;
use slider_puzzle::search::{self, OutcomeTag};
use slider_puzzle::{Heuristic, Method, Move, Outcome, Puzzle, Solver};

fn grid(rows: &[&[u8]]) -> Puzzle {
    Puzzle::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
}

fn solver(time_limit_secs: f64) -> Solver {
    Solver::with_limits(SearchConfig {
        time_limit_secs,
        depth_limit: 200,
    })
}

fn assert_reaches_goal(start: &Puzzle, path: &[Move]) {
    let states = start.replay(path).expect("returned path must be legal");
    assert!(states.last().unwrap().is_solved(), "path {:?} misses the goal", path);
}

#[test]
fn a_star_solves_documented_example() {
    let start = grid(&[&[1, 2, 3], &[4, 0, 6], &[7, 5, 8]]);
    let result = search::solve(&start, Method::AStar, Some(Heuristic::Manhattan)).unwrap();

    assert_eq!(result.path(), Some(&[Move::Down, Move::Right][..]));
    assert!(result.elapsed.as_secs_f64() < 1.0);
    assert_reaches_goal(&start, result.path().unwrap());
}

#[test]
fn every_method_returns_a_valid_path() {
    let starts = [
        grid(&[&[1, 2, 3], &[4, 0, 6], &[7, 5, 8]]),
        grid(&[&[4, 1, 3], &[7, 2, 6], &[0, 5, 8]]),
        grid(&[&[1, 2, 3, 4], &[5, 6, 7, 8], &[9, 10, 0, 11], &[13, 14, 15, 12]]),
    ];
    let solver = solver(5.0);
    for start in &starts {
        for method in Method::ALL {
            let result = solver.solve_with_defaults(start, method).unwrap();
            if let Outcome::Found(path) = &result.outcome {
                assert_reaches_goal(start, path);
            } else {
                assert_ne!(method, Method::AStar, "A* must solve {:?}", start.rows());
            }
        }
    }
}

#[test]
fn greedy_and_a_star_solve_scrambled_boards() {
    let mut rng = StdRng::seed_from_u64(2024);
    let solver = solver(20.0);
    for _ in 0..5 {
        let mut start = Puzzle::new(3).unwrap();
        start.scramble(100, &mut rng);
        for heuristic in [Heuristic::Manhattan, Heuristic::MisplacedTiles] {
            let greedy = solver.solve(&start, Method::Greedy, Some(heuristic)).unwrap();
            let a_star = solver.solve(&start, Method::AStar, Some(heuristic)).unwrap();
            assert_reaches_goal(&start, greedy.path().unwrap());
            assert_reaches_goal(&start, a_star.path().unwrap());
            assert!(a_star.move_count() <= greedy.move_count());
        }
    }
}

#[test]
fn unsolvable_board_is_never_found() {
    let start = grid(&[&[1, 2, 3], &[4, 5, 6], &[8, 7, 0]]);
    let solver = solver(1.0);
    for method in Method::ALL {
        let result = solver.solve_with_defaults(&start, method).unwrap();
        assert!(
            matches!(result.outcome, Outcome::Exhausted | Outcome::TimedOut),
            "{} returned {:?}",
            method,
            result.outcome
        );
        assert_eq!(result.path(), None);
    }
}

#[test]
fn unsolvable_3x3_board_exhausts_every_method() {
    let start = grid(&[&[1, 2, 3], &[4, 5, 6], &[8, 7, 0]]);
    let solver = solver(60.0);
    for method in Method::ALL {
        let result = solver.solve_with_defaults(&start, method).unwrap();
        assert_eq!(result.outcome, Outcome::Exhausted, "{} did not exhaust", method);
        assert!(result.nodes_expanded > 0);
    }
}

#[test]
fn unsolvable_board_exhausts_with_generous_deadline() {
    let start = grid(&[&[2, 1], &[3, 0]]);
    let solver = solver(30.0);
    for method in Method::ALL {
        let result = solver.solve_with_defaults(&start, method).unwrap();
        assert_eq!(result.outcome, Outcome::Exhausted);
        assert_eq!(result.record().outcome, OutcomeTag::Exhausted);
    }
}

#[test]
fn back_to_back_calls_are_independent() {
    let start = grid(&[&[1, 2, 3], &[4, 5, 6], &[7, 0, 8]]);
    let solver = solver(5.0);
    let first = solver.solve_all(&start).unwrap();
    let second = solver.solve_all(&start).unwrap();
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.method, b.method);
        assert_eq!(a.outcome, b.outcome);
        if a.outcome != Outcome::TimedOut {
            assert_eq!(a.nodes_expanded, b.nodes_expanded);
        }
    }
}

#[test]
fn invalid_requests_are_errors() {
    let start = Puzzle::new(3).unwrap();
    assert!("bfs".parse::<Method>().is_err());
    assert!(search::solve(&start, Method::Greedy, None).is_err());
    assert!(Puzzle::from_rows(vec![vec![1, 2], vec![3, 4]]).is_err());
}
