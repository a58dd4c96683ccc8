//! Parity oracle checked against brute-force reachability.

mod common;

use rand::{rngs::StdRng, SeedableRng};
use slider_puzzle::solvability::{is_solvable, is_solvable_tiles};
use slider_puzzle::{Puzzle, Tile};

/// Visits every permutation of `items` (Heap's algorithm).
fn for_each_permutation(items: &mut [Tile], mut visit: impl FnMut(&[Tile])) {
    let n = items.len();
    let mut counters = vec![0; n];
    visit(items);
    let mut i = 0;
    while i < n {
        if counters[i] < i {
            if i % 2 == 0 {
                items.swap(0, i);
            } else {
                items.swap(counters[i], i);
            }
            visit(items);
            counters[i] += 1;
            i = 0;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }
}

fn check_exhaustively(size: usize) -> (usize, usize) {
    let reachable = common::distances_from_goal(size);
    let mut tiles: Vec<Tile> = (0..(size * size) as Tile).collect();
    let mut total = 0;
    let mut solvable = 0;

    for_each_permutation(&mut tiles, |perm| {
        total += 1;
        let oracle = is_solvable_tiles(perm, size);
        assert_eq!(
            oracle,
            reachable.contains_key(perm),
            "oracle disagrees with BFS on {:?}",
            perm
        );
        if oracle {
            solvable += 1;
        }
    });

    assert_eq!(solvable, reachable.len());
    (total, solvable)
}

#[test]
fn oracle_matches_reachability_on_every_2x2_state() {
    assert_eq!(check_exhaustively(2), (24, 12));
}

#[test]
fn oracle_matches_reachability_on_every_3x3_state() {
    assert_eq!(check_exhaustively(3), (362_880, 181_440));
}

#[test]
fn scrambled_4x4_boards_are_solvable() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let mut puzzle = Puzzle::new(4).unwrap();
        puzzle.scramble(200, &mut rng);
        assert!(is_solvable(&puzzle));

        // Swapping two non-blank tiles flips the parity.
        let mut tiles = puzzle.tiles().to_vec();
        let (a, b) = match tiles.iter().position(|&t| t == 0) {
            Some(0) | Some(1) => (2, 3),
            _ => (0, 1),
        };
        tiles.swap(a, b);
        let swapped = Puzzle::from_tiles(4, tiles).unwrap();
        assert!(!is_solvable(&swapped));
    }
}

#[test]
fn classic_unsolvable_boards() {
    let eight = Puzzle::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![8, 7, 0]]).unwrap();
    assert!(!eight.is_solvable());

    let fifteen = Puzzle::from_rows(vec![
        vec![1, 2, 3, 4],
        vec![5, 6, 7, 8],
        vec![9, 10, 11, 12],
        vec![13, 15, 14, 0],
    ])
    .unwrap();
    assert!(!fifteen.is_solvable());
}
