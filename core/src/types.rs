use serde::{Deserialize, Serialize};

/// Single coordinate axis used for grid rows, columns and their counts.
pub type Coord = u8;

/// Count type used for cell totals.
pub type CellCount = u16;

/// Number printed in a word-start cell and referenced by clues.
pub type ClueNumber = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Reading direction of a word.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Across, Direction::Down];

    const fn delta(self) -> (Coord, Coord) {
        match self {
            Self::Across => (0, 1),
            Self::Down => (1, 0),
        }
    }

    /// Next cell in reading order, only when it remains inside `bounds`.
    pub fn step(self, (row, col): Coord2, (rows, cols): Coord2) -> Option<Coord2> {
        let (dr, dc) = self.delta();
        let next_row = row.checked_add(dr)?;
        let next_col = col.checked_add(dc)?;
        if next_row >= rows || next_col >= cols {
            return None;
        }
        Some((next_row, next_col))
    }

    /// Previous cell in reading order, `None` on the first row/column.
    pub fn step_back(self, (row, col): Coord2) -> Option<Coord2> {
        let (dr, dc) = self.delta();
        Some((row.checked_sub(dr)?, col.checked_sub(dc)?))
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Across => "across",
            Self::Down => "down",
        })
    }
}
