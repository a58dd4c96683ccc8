//! Inversion-parity test for whether a state can reach the goal.
//!
//! The check works on any grid, including ones supplied from outside,
//! independent of how the grid was shuffled.

use crate::puzzle::{Puzzle, Tile};

pub fn is_solvable(puzzle: &Puzzle) -> bool {
    is_solvable_tiles(puzzle.tiles(), puzzle.size())
}

/// Parity test over row-major tiles of a `size`×`size` board.
///
/// Odd boards need an even inversion count. On even boards the blank's row,
/// counted from the bottom starting at 1, must have the opposite parity to
/// the inversion count.
pub fn is_solvable_tiles(tiles: &[Tile], size: usize) -> bool {
    if size == 0 || tiles.len() != size * size {
        return false;
    }
    let inversions = count_inversions(tiles);

    if size % 2 == 1 {
        inversions % 2 == 0
    } else {
        let blank = tiles.iter().position(|&t| t == 0).unwrap_or(0);
        let blank_row_from_bottom = size - blank / size;
        (blank_row_from_bottom % 2 == 0) != (inversions % 2 == 0)
    }
}

/// Pairs of non-blank tiles that appear in descending order.
pub fn count_inversions(tiles: &[Tile]) -> usize {
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != 0)
        .map(|(i, &val)| {
            tiles[i + 1..]
                .iter()
                .filter(|&&next| next != 0 && next < val)
                .count()
        })
        .sum()
}
