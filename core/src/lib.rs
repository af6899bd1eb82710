#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use annotate::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use hint::*;
pub use puzzle::*;
pub use types::*;
pub use word::*;

mod annotate;
mod cell;
mod engine;
mod error;
mod hint;
mod puzzle;
mod types;
mod word;

/// Tuning for one hint-annotation pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintConfig {
    /// Words shorter than this never receive hints.
    pub min_word_len: u8,
    pub strategy: MaskStrategy,
}

impl HintConfig {
    /// Single letters are never hinted, whatever the configuration says.
    pub const MIN_WORD_LEN: u8 = 2;

    pub const fn new_unchecked(min_word_len: u8, strategy: MaskStrategy) -> Self {
        Self {
            min_word_len,
            strategy,
        }
    }

    pub fn new(min_word_len: u8, strategy: MaskStrategy) -> Self {
        let min_word_len = min_word_len.clamp(Self::MIN_WORD_LEN, Coord::MAX);
        Self::new_unchecked(min_word_len, strategy)
    }
}

impl Default for HintConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::MIN_WORD_LEN, MaskStrategy::default())
    }
}

/// Rectangular solution grid, immutable once loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct PuzzleGrid {
    cells: Array2<Cell>,
}

impl PuzzleGrid {
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(PuzzleError::EmptyGrid);
        }
        if height > Coord::MAX.into() || width > Coord::MAX.into() {
            return Err(PuzzleError::GridTooLarge);
        }
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(PuzzleError::RaggedGrid {
                row,
                expected: width,
                found: cells.len(),
            });
        }

        let grid = Self {
            cells: Array2::from_shape_fn((height, width), |(r, c)| rows[r][c]),
        };
        if grid.playable_count() == 0 {
            return Err(PuzzleError::EmptyGrid);
        }
        Ok(grid)
    }

    /// Builds a grid from text rows, `#` or `.` marks a blocked cell. Word starts are numbered
    /// in reading order like a printed crossword.
    pub fn from_pattern(rows: &[&str]) -> Result<Self> {
        let mut grid: Vec<Vec<Cell>> = Vec::with_capacity(rows.len());
        for row in rows {
            let cells = row
                .chars()
                .map(|ch| match ch {
                    '#' | '.' => Ok(Cell::BLOCKED),
                    letter => Cell::new(letter, None),
                })
                .collect::<Result<Vec<_>>>()?;
            grid.push(cells);
        }
        let mut grid = Self::from_rows(grid)?;

        let mut next_number: ClueNumber = 1;
        let starts: Vec<Coord2> = grid
            .iter_cells()
            .filter(|&(coords, _)| {
                Direction::ALL
                    .iter()
                    .any(|&direction| grid.starts_word(coords, direction))
            })
            .map(|(coords, _)| coords)
            .collect();
        for coords in starts {
            grid.cells[coords.to_nd_index()].number = Some(next_number);
            next_number += 1;
        }
        Ok(grid)
    }

    pub(crate) fn from_fn(size: Coord2, f: impl FnMut((usize, usize)) -> Cell) -> Self {
        Self {
            cells: Array2::from_shape_fn((size.0.into(), size.1.into()), f),
        }
    }

    /// `(rows, cols)`
    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(PuzzleError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    /// Solution letter, `None` for blocked or out of bounds cells.
    pub fn letter_at(&self, coords: Coord2) -> Option<char> {
        self.get(coords).and_then(|cell| cell.letter)
    }

    pub fn is_playable(&self, coords: Coord2) -> bool {
        self.letter_at(coords).is_some()
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    /// First cell in reading order carrying `number`.
    pub fn find_number(&self, number: ClueNumber) -> Option<Coord2> {
        self.iter_cells()
            .find(|(_, cell)| cell.number == Some(number))
            .map(|(coords, _)| coords)
    }

    pub fn playable_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_playable()).count() as CellCount
    }

    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// Whether a word of at least two letters begins here.
    pub(crate) fn starts_word(&self, coords: Coord2, direction: Direction) -> bool {
        self.is_playable(coords)
            && !direction
                .step_back(coords)
                .is_some_and(|prev| self.is_playable(prev))
            && direction
                .step(coords, self.size())
                .is_some_and(|next| self.is_playable(next))
    }
}

impl Index<Coord2> for PuzzleGrid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl TryFrom<Vec<Vec<Cell>>> for PuzzleGrid {
    type Error = PuzzleError;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<PuzzleGrid> for Vec<Vec<Cell>> {
    fn from(grid: PuzzleGrid) -> Self {
        grid.to_rows()
    }
}

/// Outcome of a player edit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntryOutcome {
    NoChange,
    Changed,
    Solved,
}

impl EntryOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
            Self::Solved => true,
        }
    }
}
