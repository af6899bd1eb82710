use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};

use crate::*;

/// Immutable puzzle cell: the solution letter, if playable, and the clue number printed in it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireCell", into = "WireCell")]
pub struct Cell {
    pub letter: Option<char>,
    pub number: Option<ClueNumber>,
}

impl Cell {
    pub const BLOCKED: Cell = Cell {
        letter: None,
        number: None,
    };

    /// Playable cell, the letter is normalized to uppercase.
    pub fn new(letter: char, number: Option<ClueNumber>) -> Result<Self> {
        if !letter.is_ascii_alphabetic() {
            return Err(PuzzleError::InvalidLetter {
                letter: letter.to_string(),
            });
        }
        Ok(Self {
            letter: Some(letter.to_ascii_uppercase()),
            number: number.filter(|&n| n > 0),
        })
    }

    pub const fn is_playable(self) -> bool {
        self.letter.is_some()
    }

    pub const fn is_numbered(self) -> bool {
        self.number.is_some()
    }
}

/// Shape used by the generator: `{"letter": "C", "number": 1}`, `""` marks a blocked cell.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct WireCell {
    letter: String,
    #[serde(default)]
    number: Option<ClueNumber>,
}

impl TryFrom<WireCell> for Cell {
    type Error = PuzzleError;

    fn try_from(wire: WireCell) -> Result<Self> {
        let trimmed = wire.letter.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(Cell {
                letter: None,
                number: wire.number.filter(|&n| n > 0),
            }),
            (Some(letter), None) => Cell::new(letter, wire.number),
            _ => Err(PuzzleError::InvalidLetter {
                letter: wire.letter,
            }),
        }
    }
}

impl From<Cell> for WireCell {
    fn from(cell: Cell) -> Self {
        Self {
            letter: cell.letter.map(String::from).unwrap_or_default(),
            number: cell.number,
        }
    }
}
