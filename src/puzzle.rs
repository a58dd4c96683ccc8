use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PuzzleError;
use crate::solvability;

/// A single cell value. `0` is the blank.
pub type Tile = u8;

pub const MIN_SIZE: usize = 2;
/// Largest board whose tiles still fit in a [`Tile`].
pub const MAX_SIZE: usize = 15;

/// Direction the blank travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Expansion order used by every search. DFS results depend on it.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// `(row, col)` displacement applied to the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// Value of the goal grid at a row-major index.
pub fn goal_tile(size: usize, index: usize) -> Tile {
    if index + 1 == size * size {
        0
    } else {
        (index + 1) as Tile
    }
}

/// Row-major `1..N²-1` followed by the blank.
pub fn goal_tiles(size: usize) -> Vec<Tile> {
    (0..size * size).map(|i| goal_tile(size, i)).collect()
}

fn check_size(size: usize) -> Result<(), PuzzleError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(PuzzleError::MalformedGrid(format!(
            "board size {} is outside {}..={}",
            size, MIN_SIZE, MAX_SIZE
        )))
    }
}

/// An N×N sliding puzzle state.
///
/// Tiles are stored flat in row-major order. Equality and hashing cover the
/// tile layout, so two states reached along different paths compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Puzzle {
    size: usize,
    tiles: Vec<Tile>,
    blank_row: usize,
    blank_col: usize,
}

impl Puzzle {
    /// Creates a solved puzzle of the given size.
    pub fn new(size: usize) -> Result<Self, PuzzleError> {
        check_size(size)?;
        Ok(Self {
            size,
            tiles: goal_tiles(size),
            blank_row: size - 1,
            blank_col: size - 1,
        })
    }

    /// Builds a puzzle from row-major tiles, checking that they form a
    /// permutation of `0..size²`.
    pub fn from_tiles(size: usize, tiles: Vec<Tile>) -> Result<Self, PuzzleError> {
        check_size(size)?;
        let cells = size * size;
        if tiles.len() != cells {
            return Err(PuzzleError::MalformedGrid(format!(
                "expected {} tiles for a {}x{} board, got {}",
                cells,
                size,
                size,
                tiles.len()
            )));
        }

        let mut seen = vec![false; cells];
        for &tile in &tiles {
            let idx = tile as usize;
            if idx >= cells {
                return Err(PuzzleError::MalformedGrid(format!(
                    "tile {} is out of range 0..{}",
                    tile, cells
                )));
            }
            if seen[idx] {
                return Err(PuzzleError::MalformedGrid(format!(
                    "tile {} appears more than once",
                    tile
                )));
            }
            seen[idx] = true;
        }

        let blank = tiles
            .iter()
            .position(|&t| t == 0)
            .ok_or_else(|| PuzzleError::MalformedGrid("grid has no blank".to_string()))?;

        Ok(Self {
            size,
            tiles,
            blank_row: blank / size,
            blank_col: blank % size,
        })
    }

    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, PuzzleError> {
        let size = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(PuzzleError::MalformedGrid(format!(
                "row {} has {} tiles, expected {}",
                i,
                row.len(),
                size
            )));
        }
        Self::from_tiles(size, rows.into_iter().flatten().collect())
    }

    /// Swaps in an externally supplied grid. The puzzle is left untouched
    /// if the grid is malformed.
    pub fn replace_rows(&mut self, rows: Vec<Vec<Tile>>) -> Result<(), PuzzleError> {
        *self = Self::from_rows(rows)?;
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn rows(&self) -> Vec<Vec<Tile>> {
        self.tiles.chunks(self.size).map(<[Tile]>::to_vec).collect()
    }

    /// `(row, col)` of the blank.
    pub fn blank(&self) -> (usize, usize) {
        (self.blank_row, self.blank_col)
    }

    fn target(&self, movement: Move) -> Option<(usize, usize)> {
        let (dr, dc) = movement.as_offset();
        let row = self.blank_row.checked_add_signed(dr).filter(|&r| r < self.size)?;
        let col = self.blank_col.checked_add_signed(dc).filter(|&c| c < self.size)?;
        Some((row, col))
    }

    fn slide_blank_to(&mut self, row: usize, col: usize) {
        let from = self.blank_row * self.size + self.blank_col;
        let to = row * self.size + col;
        self.tiles.swap(from, to);
        self.blank_row = row;
        self.blank_col = col;
    }

    /// Moves the blank in place.
    pub fn apply_move(&mut self, movement: Move) -> Result<(), PuzzleError> {
        match self.target(movement) {
            Some((row, col)) => {
                self.slide_blank_to(row, col);
                Ok(())
            }
            None => Err(PuzzleError::IllegalMove {
                mv: movement,
                row: self.blank_row,
                col: self.blank_col,
                size: self.size,
            }),
        }
    }

    /// Returns the state after `movement`, leaving `self` unchanged.
    pub fn apply(&self, movement: Move) -> Result<Self, PuzzleError> {
        let mut next = self.clone();
        next.apply_move(movement)?;
        Ok(next)
    }

    pub fn try_move(&self, movement: Move) -> Option<Self> {
        let (row, col) = self.target(movement)?;
        let mut next = self.clone();
        next.slide_blank_to(row, col);
        Some(next)
    }

    /// Legal moves and their resulting states, in [`Move::ALL`] order.
    pub fn successors(&self) -> impl Iterator<Item = (Move, Puzzle)> + '_ {
        Move::ALL
            .into_iter()
            .filter_map(move |dir| self.try_move(dir).map(|next| (dir, next)))
    }

    pub fn is_solved(&self) -> bool {
        self.tiles
            .iter()
            .enumerate()
            .all(|(i, &tile)| tile == goal_tile(self.size, i))
    }

    pub fn is_solvable(&self) -> bool {
        solvability::is_solvable(self)
    }

    /// Shuffles into a uniformly random solvable arrangement by drawing
    /// permutations until one passes the parity check.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut flattened = self.tiles.clone();

        loop {
            flattened.shuffle(rng);
            if solvability::is_solvable_tiles(&flattened, self.size) {
                break;
            }
        }

        if let Some(blank) = flattened.iter().position(|&t| t == 0) {
            self.blank_row = blank / self.size;
            self.blank_col = blank % self.size;
        }
        self.tiles = flattened;
    }

    /// Picks `moves` random directions, skipping those that would push the
    /// blank off the board. The result is reachable from the current state.
    pub fn scramble<R: Rng + ?Sized>(&mut self, moves: usize, rng: &mut R) {
        for _ in 0..moves {
            let dir = Move::ALL[rng.gen_range(0..Move::ALL.len())];
            if let Some((row, col)) = self.target(dir) {
                self.slide_blank_to(row, col);
            }
        }
    }

    /// Every grid visited while replaying `moves`, starting with `self`.
    pub fn replay(&self, moves: &[Move]) -> Result<Vec<Puzzle>, PuzzleError> {
        let mut states = Vec::with_capacity(moves.len() + 1);
        let mut current = self.clone();
        states.push(current.clone());
        for &mv in moves {
            current.apply_move(mv)?;
            states.push(current.clone());
        }
        Ok(states)
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.size * self.size - 1).to_string().len();
        for row in self.tiles.chunks(self.size) {
            for &val in row {
                write!(f, "{:>width$} ", val, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
