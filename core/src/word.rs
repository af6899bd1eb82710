use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Cells from `start` onward in `direction`, up to the first blocked cell or the grid edge.
fn run(
    grid: &PuzzleGrid,
    start: Coord2,
    direction: Direction,
) -> impl Iterator<Item = Coord2> + '_ {
    let first = grid.is_playable(start).then_some(start);
    let bounds = grid.size();
    core::iter::successors(first, move |&coords| {
        direction
            .step(coords, bounds)
            .filter(|&next| grid.is_playable(next))
    })
}

/// Reads the letters from `start` in `direction` until a blocked cell or the grid edge.
///
/// An out of bounds or blocked start yields an empty word.
pub fn extract_word(grid: &PuzzleGrid, start: Coord2, direction: Direction) -> String {
    run(grid, start, direction)
        .filter_map(|coords| grid.letter_at(coords))
        .collect()
}

/// Number of letters [`extract_word`] would read.
pub fn word_len(grid: &PuzzleGrid, start: Coord2, direction: Direction) -> usize {
    run(grid, start, direction).count()
}

/// Walks back to the first letter of the word through `coords`, returning it together with the
/// offset of `coords` inside the word.
pub fn word_start(grid: &PuzzleGrid, coords: Coord2, direction: Direction) -> (Coord2, usize) {
    let mut start = coords;
    let mut offset = 0;
    while let Some(prev) = direction
        .step_back(start)
        .filter(|&prev| grid.is_playable(prev))
    {
        start = prev;
        offset += 1;
    }
    (start, offset)
}

/// The maximal word through `coords`, `None` for a blocked cell.
pub fn word_at(grid: &PuzzleGrid, coords: Coord2, direction: Direction) -> Option<WordSpan> {
    if !grid.is_playable(coords) {
        return None;
    }
    let (start, _) = word_start(grid, coords, direction);
    Some(WordSpan::from_start(grid, start, direction))
}

/// Every maximal word of two or more letters, in reading order, across before down.
pub fn words(grid: &PuzzleGrid) -> Vec<WordSpan> {
    let mut spans = Vec::new();
    for (coords, _) in grid.iter_cells() {
        for direction in Direction::ALL {
            if grid.starts_word(coords, direction) {
                spans.push(WordSpan::from_start(grid, coords, direction));
            }
        }
    }
    spans
}

/// A word identified by its first cell and direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WordSpan {
    pub start: Coord2,
    pub direction: Direction,
    len: Coord,
}

impl WordSpan {
    pub fn from_start(grid: &PuzzleGrid, start: Coord2, direction: Direction) -> Self {
        Self {
            start,
            direction,
            len: word_len(grid, start, direction) as Coord,
        }
    }

    pub fn len(&self) -> usize {
        self.len.into()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn cells(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (row, col) = self.start;
        let direction = self.direction;
        (0..self.len).map(move |i| match direction {
            Direction::Across => (row, col + i),
            Direction::Down => (row + i, col),
        })
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.offset_of(coords).is_some()
    }

    /// Position of `coords` inside the word.
    pub fn offset_of(&self, coords: Coord2) -> Option<usize> {
        let (row, col) = self.start;
        let offset = match self.direction {
            Direction::Across if coords.0 == row => coords.1.checked_sub(col)?,
            Direction::Down if coords.1 == col => coords.0.checked_sub(row)?,
            _ => return None,
        };
        (offset < self.len).then_some(offset.into())
    }

    pub fn text(&self, grid: &PuzzleGrid) -> String {
        self.cells().filter_map(|coords| grid.letter_at(coords)).collect()
    }
}

impl fmt::Display for WordSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at ({}, {}) len {}",
            self.direction, self.start.0, self.start.1, self.len
        )
    }
}
