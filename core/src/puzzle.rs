use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub number: ClueNumber,
    pub text: String,
    #[serde(default)]
    pub length: u16,
}

/// A finished puzzle as delivered by the puzzle source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub grid: PuzzleGrid,
    pub across: Vec<Clue>,
    pub down: Vec<Clue>,
}

impl Puzzle {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| PuzzleError::MalformedJson(err.to_string()))
    }

    /// Parses a free-text generator reply by taking everything between its first `{` and its
    /// last `}`.
    pub fn from_generated_text(text: &str) -> Result<Self> {
        let start = text.find('{').ok_or(PuzzleError::NoJsonObject)?;
        let end = text.rfind('}').ok_or(PuzzleError::NoJsonObject)?;
        if end < start {
            return Err(PuzzleError::NoJsonObject);
        }
        Self::from_json(&text[start..=end])
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| PuzzleError::MalformedJson(err.to_string()))
    }

    pub fn clues(&self, direction: Direction) -> &[Clue] {
        match direction {
            Direction::Across => &self.across,
            Direction::Down => &self.down,
        }
    }

    pub fn clue(&self, direction: Direction, number: ClueNumber) -> Option<&Clue> {
        self.clues(direction).iter().find(|clue| clue.number == number)
    }

    /// Cell carrying the clue number.
    pub fn clue_start(&self, number: ClueNumber) -> Option<Coord2> {
        self.grid.find_number(number)
    }

    /// Word answering clue `number`, read from its numbered cell.
    pub fn clue_word(&self, direction: Direction, number: ClueNumber) -> Result<WordSpan> {
        let start = self
            .clue_start(number)
            .ok_or(PuzzleError::UnknownClue { number })?;
        Ok(WordSpan::from_start(&self.grid, start, direction))
    }

    /// Replaces every declared clue length with the length measured on the grid. Clues whose
    /// number is missing from the grid keep what they declared.
    pub fn with_measured_lengths(mut self) -> Self {
        for direction in Direction::ALL {
            let measured: Vec<Option<u16>> = self
                .clues(direction)
                .iter()
                .map(|clue| match self.clue_word(direction, clue.number) {
                    Ok(word) => Some(word.len() as u16),
                    Err(err) => {
                        log::warn!("{direction} clue {}: {err}", clue.number);
                        None
                    }
                })
                .collect();

            let clues = match direction {
                Direction::Across => &mut self.across,
                Direction::Down => &mut self.down,
            };
            for (clue, length) in clues.iter_mut().zip(measured) {
                if let Some(length) = length {
                    if clue.length != length {
                        log::debug!(
                            "{direction} clue {} declared length {}, measured {length}",
                            clue.number,
                            clue.length
                        );
                    }
                    clue.length = length;
                }
            }
        }
        self
    }

    /// Built-in puzzle used until a generated one is available.
    pub fn default_puzzle() -> Self {
        const ROWS: [&str; 5] = ["CHAT#", "OUTEA", "TBIA#", "#IM##", "#T###"];
        const NUMBERS: [(Coord2, ClueNumber); 4] =
            [((0, 0), 1), ((1, 0), 2), ((1, 3), 3), ((2, 1), 4)];

        let grid = PuzzleGrid::from_fn((5, 5), |(row, col)| {
            let letter = ROWS[row].as_bytes()[col];
            if letter == b'#' {
                return Cell::BLOCKED;
            }
            let number = NUMBERS
                .iter()
                .find(|&&((r, c), _)| usize::from(r) == row && usize::from(c) == col)
                .map(|&(_, number)| number);
            Cell {
                letter: Some(char::from(letter)),
                number,
            }
        });

        let clue = |number, text: &str, length| Clue {
            number,
            text: text.into(),
            length,
        };

        Self {
            grid,
            across: alloc::vec![
                clue(1, "To have a friendly conversation (British slang)", 4),
                clue(2, "Morning beverage served at 4 o'clock (British tradition)", 3),
                clue(3, "Drink made from leaves (British staple)", 3),
                clue(4, "To consume food or drink", 3),
            ],
            down: alloc::vec![
                clue(1, "A warm, comfortable house (British term)", 3),
                clue(2, "A traditional British pub", 5),
                clue(3, "Another word for 'yes' in British English", 3),
            ],
        }
    }
}

impl Default for Puzzle {
    fn default() -> Self {
        Self::default_puzzle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"{
        "grid": [
            [{"letter": "c", "number": 1}, {"letter": "a", "number": null}, {"letter": "t", "number": null}],
            [{"letter": "o", "number": null}, {"letter": "", "number": null}, {"letter": "", "number": null}],
            [{"letter": "w", "number": null}, {"letter": "", "number": null}, {"letter": "", "number": null}]
        ],
        "across": [{"number": 1, "text": "Feline", "length": 9}],
        "down": [{"number": 1, "text": "Dairy animal", "length": 3}]
    }"#;

    #[test]
    fn parses_generator_json() {
        let puzzle = Puzzle::from_json(SMALL).unwrap();

        assert_eq!(puzzle.grid.size(), (3, 3));
        assert_eq!(extract_word(&puzzle.grid, (0, 0), Direction::Across), "CAT");
        assert_eq!(puzzle.clue(Direction::Down, 1).unwrap().text, "Dairy animal");
    }

    #[test]
    fn extracts_json_from_chatty_reply() {
        let reply = alloc::format!("Here is your puzzle:\n```json\n{SMALL}\n```\nEnjoy!");
        let puzzle = Puzzle::from_generated_text(&reply).unwrap();
        assert_eq!(puzzle.across.len(), 1);
    }

    #[test]
    fn reply_without_object_is_rejected() {
        assert_eq!(
            Puzzle::from_generated_text("sorry, I cannot do that"),
            Err(PuzzleError::NoJsonObject)
        );
        assert_eq!(
            Puzzle::from_generated_text("} backwards {"),
            Err(PuzzleError::NoJsonObject)
        );
    }

    #[test]
    fn ragged_grid_is_malformed() {
        let json = r#"{"grid": [[{"letter": "A", "number": 1}], []], "across": [], "down": []}"#;
        let err = Puzzle::from_json(json).unwrap_err();
        assert!(matches!(err, PuzzleError::MalformedJson(msg) if msg.contains("Row 1")));
    }

    #[test]
    fn missing_clue_lists_are_malformed() {
        let json = r#"{"grid": [[{"letter": "A", "number": 1}]]}"#;
        assert!(matches!(
            Puzzle::from_json(json),
            Err(PuzzleError::MalformedJson(_))
        ));
    }

    #[test]
    fn measures_clue_lengths_from_grid() {
        let puzzle = Puzzle::from_json(SMALL).unwrap().with_measured_lengths();
        assert_eq!(puzzle.across[0].length, 3);
        assert_eq!(puzzle.down[0].length, 3);
    }

    #[test]
    fn unknown_clue_keeps_declared_length() {
        let mut puzzle = Puzzle::from_json(SMALL).unwrap();
        puzzle.down.push(Clue {
            number: 7,
            text: "Nowhere".into(),
            length: 4,
        });

        let puzzle = puzzle.with_measured_lengths();

        assert_eq!(puzzle.down[1].length, 4);
        assert_eq!(
            puzzle.clue_word(Direction::Down, 7),
            Err(PuzzleError::UnknownClue { number: 7 })
        );
    }

    #[test]
    fn default_puzzle_matches_its_clues() {
        let puzzle = Puzzle::default_puzzle();

        assert_eq!(puzzle.clue_start(3), Some((1, 3)));
        let chat = puzzle.clue_word(Direction::Across, 1).unwrap();
        assert_eq!(chat.text(&puzzle.grid), "CHAT");
        assert_eq!(puzzle.across[0].length, 4);
        assert_eq!(puzzle.grid.playable_count(), 16);
    }

    #[test]
    fn round_trips_through_json() {
        let puzzle = Puzzle::default_puzzle();
        let restored = Puzzle::from_json(&puzzle.to_json().unwrap()).unwrap();
        assert_eq!(restored, puzzle);
    }
}
