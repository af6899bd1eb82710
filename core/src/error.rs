use alloc::string::String;
use thiserror::Error;

use crate::{ClueNumber, Coord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Grid has no playable area")]
    EmptyGrid,
    #[error("Grid is larger than {max} cells per side", max = Coord::MAX)]
    GridTooLarge,
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Invalid letter {letter:?}, expected a single latin letter or an empty string")]
    InvalidLetter { letter: String },
    #[error("No JSON object found in generator reply")]
    NoJsonObject,
    #[error("Malformed puzzle JSON: {0}")]
    MalformedJson(String),
    #[error("Clue {number} not found in the grid")]
    UnknownClue { number: ClueNumber },
    #[error("Cell is blocked")]
    BlockedCell,
    #[error("Only a single letter can be entered")]
    InvalidInput,
    #[error("Board shape does not match the puzzle grid")]
    InvalidBoardShape,
    #[error("Puzzle already solved, no new entries are accepted")]
    AlreadySolved,
}

pub type Result<T> = core::result::Result<T, PuzzleError>;
