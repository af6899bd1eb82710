use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayState {
    #[default]
    Ready,
    Active,
    Solved,
}

impl PlayState {
    pub const fn is_solved(self) -> bool {
        matches!(self, Self::Solved)
    }
}

/// Keystroke delivered to the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Cell holding the focus after the key.
    pub cursor: Coord2,
    pub entry: EntryOutcome,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub playable: CellCount,
    pub filled: CellCount,
    pub correct: CellCount,
}

impl Progress {
    pub const fn is_complete(&self) -> bool {
        self.correct == self.playable
    }
}

/// Player state layered over an annotated puzzle, keyed by cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayBoard {
    solution: AnnotatedGrid,
    entries: Array2<Option<char>>,
    revealed: Array2<bool>,
    show_answers: bool,
    state: PlayState,
}

impl PlayBoard {
    /// A board whose partial hints already cover the grid starts solved.
    pub fn new(solution: AnnotatedGrid) -> Self {
        let size = solution.size();
        let mut board = Self {
            solution,
            entries: Array2::default(size.to_nd_index()),
            revealed: Array2::default(size.to_nd_index()),
            show_answers: false,
            state: Default::default(),
        };
        board.sync_solved();
        board
    }

    /// Validates a deserialized snapshot and re-derives whether it is solved.
    pub fn restore(mut board: Self) -> Result<Self> {
        board.validate()?;
        board.sync_solved();
        Ok(board)
    }

    /// Checks a board restored from a snapshot.
    pub fn validate(&self) -> Result<()> {
        self.solution.validate()?;
        let (rows, cols) = self.size();
        let expected = (usize::from(rows), usize::from(cols));
        if self.entries.dim() != expected || self.revealed.dim() != expected {
            return Err(PuzzleError::InvalidBoardShape);
        }
        Ok(())
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_solved(&self) -> bool {
        self.state.is_solved()
    }

    pub fn size(&self) -> Coord2 {
        self.solution.size()
    }

    pub fn grid(&self) -> &PuzzleGrid {
        self.solution.grid()
    }

    pub fn solution(&self) -> &AnnotatedGrid {
        &self.solution
    }

    pub fn show_answers(&self) -> bool {
        self.show_answers
    }

    pub fn entry(&self, coords: Coord2) -> Option<char> {
        self.entries.get(coords.to_nd_index()).copied().flatten()
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.revealed
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    /// Partial hints and revealed cells show their letter and cannot be edited.
    pub fn is_read_only(&self, coords: Coord2) -> bool {
        self.solution.is_partial_hint(coords) || self.is_revealed(coords)
    }

    pub fn is_editable(&self, coords: Coord2) -> bool {
        self.grid().is_playable(coords) && !self.is_read_only(coords)
    }

    /// Letter to display in a cell, `None` for blocked or still empty cells.
    pub fn display_letter(&self, coords: Coord2) -> Option<char> {
        let solution = self.grid().letter_at(coords)?;
        if self.show_answers || self.is_read_only(coords) {
            Some(solution)
        } else {
            self.entry(coords)
        }
    }

    /// Applies typed input: an empty string clears the cell, a single latin letter fills it.
    pub fn enter(&mut self, coords: Coord2, input: &str) -> Result<EntryOutcome> {
        let coords = self.grid().validate_coords(coords)?;
        let letter = parse_input(input)?;
        self.set_entry(coords, letter)
    }

    pub fn clear(&mut self, coords: Coord2) -> Result<EntryOutcome> {
        let coords = self.grid().validate_coords(coords)?;
        self.set_entry(coords, None)
    }

    /// Reveals the solution letter of a single cell.
    pub fn reveal_cell(&mut self, coords: Coord2) -> Result<EntryOutcome> {
        let coords = self.grid().validate_coords(coords)?;
        self.check_playable(coords)?;
        self.check_not_solved()?;

        if self.is_read_only(coords) {
            return Ok(EntryOutcome::NoChange);
        }
        self.revealed[coords.to_nd_index()] = true;
        self.entries[coords.to_nd_index()] = None;
        Ok(self.after_change())
    }

    /// Toggles showing every answer, which leaves the entries untouched.
    pub fn set_show_answers(&mut self, show: bool) -> EntryOutcome {
        if self.show_answers == show {
            return EntryOutcome::NoChange;
        }
        self.show_answers = show;
        EntryOutcome::Changed
    }

    pub fn handle_key(&mut self, cursor: Coord2, key: Key) -> Result<KeyOutcome> {
        let cursor = self.grid().validate_coords(cursor)?;

        let (entry, next) = match key {
            Key::Char(ch) => {
                let letter = parse_char(ch)?;
                let entry = self.set_entry(cursor, Some(letter))?;
                (entry, self.neighbor(cursor, Key::Right))
            }
            Key::Backspace if self.entry(cursor).is_some() => (self.clear(cursor)?, None),
            Key::Backspace => (EntryOutcome::NoChange, self.neighbor(cursor, Key::Left)),
            arrow => (EntryOutcome::NoChange, self.neighbor(cursor, arrow)),
        };

        Ok(KeyOutcome {
            cursor: next.unwrap_or(cursor),
            entry,
        })
    }

    /// Word to highlight while the cursor sits on `coords`.
    pub fn active_word(&self, coords: Coord2, direction: Direction) -> Option<WordSpan> {
        word_at(self.grid(), coords, direction)
    }

    pub fn progress(&self) -> Progress {
        let mut progress = Progress::default();
        for (coords, cell) in self.grid().iter_cells() {
            let Some(solution) = cell.letter else {
                continue;
            };
            progress.playable += 1;
            let shown = if self.is_read_only(coords) {
                Some(solution)
            } else {
                self.entry(coords)
            };
            if let Some(letter) = shown {
                progress.filled += 1;
                if letter == solution {
                    progress.correct += 1;
                }
            }
        }
        progress
    }

    fn set_entry(&mut self, coords: Coord2, letter: Option<char>) -> Result<EntryOutcome> {
        self.check_playable(coords)?;
        self.check_not_solved()?;

        if self.is_read_only(coords) || self.entry(coords) == letter {
            return Ok(EntryOutcome::NoChange);
        }
        self.entries[coords.to_nd_index()] = letter;
        Ok(self.after_change())
    }

    fn sync_solved(&mut self) {
        if self.progress().is_complete() {
            self.state = PlayState::Solved;
        }
    }

    fn after_change(&mut self) -> EntryOutcome {
        if self.progress().is_complete() {
            log::debug!("puzzle solved");
            self.state = PlayState::Solved;
            EntryOutcome::Solved
        } else {
            self.state = PlayState::Active;
            EntryOutcome::Changed
        }
    }

    /// Adjacent cell in the direction of an arrow key, when it can take input.
    fn neighbor(&self, coords: Coord2, key: Key) -> Option<Coord2> {
        let size = self.size();
        let next = match key {
            Key::Left => Direction::Across.step_back(coords),
            Key::Right => Direction::Across.step(coords, size),
            Key::Up => Direction::Down.step_back(coords),
            Key::Down => Direction::Down.step(coords, size),
            Key::Char(_) | Key::Backspace => None,
        }?;
        self.is_editable(next).then_some(next)
    }

    fn check_playable(&self, coords: Coord2) -> Result<()> {
        if self.grid().is_playable(coords) {
            Ok(())
        } else {
            Err(PuzzleError::BlockedCell)
        }
    }

    fn check_not_solved(&self) -> Result<()> {
        if self.state.is_solved() {
            Err(PuzzleError::AlreadySolved)
        } else {
            Ok(())
        }
    }
}

fn parse_input(input: &str) -> Result<Option<char>> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(ch), None) => parse_char(ch).map(Some),
        _ => Err(PuzzleError::InvalidInput),
    }
}

fn parse_char(ch: char) -> Result<char> {
    if ch.is_ascii_alphabetic() {
        Ok(ch.to_ascii_uppercase())
    } else {
        Err(PuzzleError::InvalidInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    struct Pattern(fn(usize) -> Vec<bool>);

    impl HintSelector for Pattern {
        fn select(&mut self, len: usize) -> HintMask {
            HintMask::from((self.0)(len))
        }
    }

    fn board(rows: &[&str], pattern: fn(usize) -> Vec<bool>) -> PlayBoard {
        let grid = PuzzleGrid::from_pattern(rows).unwrap();
        PlayBoard::new(annotate_with(&grid, MaskStrategy::PerWord, &mut Pattern(pattern)))
    }

    fn no_hints(len: usize) -> Vec<bool> {
        (0..len).map(|_| false).collect()
    }

    fn first_hinted(len: usize) -> Vec<bool> {
        (0..len).map(|i| i == 0).collect()
    }

    fn all_hinted(len: usize) -> Vec<bool> {
        (0..len).map(|_| true).collect()
    }

    #[test]
    fn entering_letters_uppercases_and_solves() {
        let mut board = board(&["AB"], no_hints);

        assert_eq!(board.state(), PlayState::Ready);
        let outcome = board.enter((0, 0), "a").unwrap();
        assert_eq!(outcome, EntryOutcome::Changed);
        assert!(outcome.has_update());
        assert_eq!(board.state(), PlayState::Active);
        assert_eq!(board.display_letter((0, 0)), Some('A'));
        assert_eq!(board.enter((0, 1), "b").unwrap(), EntryOutcome::Solved);
        assert!(board.is_solved());
        assert_eq!(board.enter((0, 1), "c"), Err(PuzzleError::AlreadySolved));
    }

    #[test]
    fn rejects_invalid_keystrokes() {
        let mut board = board(&["AB", "#C"], no_hints);

        assert_eq!(board.enter((0, 0), "ab"), Err(PuzzleError::InvalidInput));
        assert_eq!(board.enter((0, 0), "1"), Err(PuzzleError::InvalidInput));
        assert_eq!(board.enter((1, 0), "A"), Err(PuzzleError::BlockedCell));
        assert_eq!(board.enter((5, 0), "A"), Err(PuzzleError::InvalidCoords));
        assert_eq!(board.state(), PlayState::Ready);
    }

    #[test]
    fn partial_hints_are_read_only() {
        let mut board = board(&["ABC"], first_hinted);

        assert!(board.is_read_only((0, 0)));
        assert_eq!(board.display_letter((0, 0)), Some('A'));
        let outcome = board.enter((0, 0), "Z").unwrap();
        assert_eq!(outcome, EntryOutcome::NoChange);
        assert!(!outcome.has_update());
        assert_eq!(board.display_letter((0, 1)), None);
        assert_eq!(
            board.progress(),
            Progress {
                playable: 3,
                filled: 1,
                correct: 1
            }
        );
    }

    #[test]
    fn revealing_a_cell_fills_it_and_can_finish_the_puzzle() {
        let mut board = board(&["AB"], no_hints);
        board.enter((0, 1), "x").unwrap();

        assert_eq!(board.reveal_cell((0, 0)).unwrap(), EntryOutcome::Changed);
        assert_eq!(board.reveal_cell((0, 0)).unwrap(), EntryOutcome::NoChange);
        assert_eq!(board.reveal_cell((0, 1)).unwrap(), EntryOutcome::Solved);
        assert_eq!(board.entry((0, 1)), None);
        assert_eq!(board.display_letter((0, 1)), Some('B'));
    }

    #[test]
    fn show_answers_does_not_count_as_progress() {
        let mut board = board(&["AB"], no_hints);

        assert_eq!(board.set_show_answers(true), EntryOutcome::Changed);
        assert_eq!(board.set_show_answers(true), EntryOutcome::NoChange);
        assert_eq!(board.display_letter((0, 1)), Some('B'));
        assert_eq!(board.progress().filled, 0);

        board.set_show_answers(false);
        assert_eq!(board.display_letter((0, 1)), None);
    }

    #[test]
    fn typing_advances_to_next_editable_cell() {
        let mut board = board(&["ABC", "D#E"], no_hints);

        let outcome = board.handle_key((0, 0), Key::Char('q')).unwrap();
        assert_eq!(outcome.cursor, (0, 1));
        assert_eq!(outcome.entry, EntryOutcome::Changed);

        // nothing to the right of the last column
        let outcome = board.handle_key((0, 2), Key::Char('c')).unwrap();
        assert_eq!(outcome.cursor, (0, 2));
    }

    #[test]
    fn cursor_skips_nothing_and_stops_at_read_only_cells() {
        let mut board = board(&["ABC"], first_hinted);

        let outcome = board.handle_key((0, 1), Key::Left).unwrap();
        assert_eq!(outcome.cursor, (0, 1));
        let outcome = board.handle_key((0, 1), Key::Right).unwrap();
        assert_eq!(outcome.cursor, (0, 2));
    }

    #[test]
    fn arrows_do_not_enter_blocked_cells() {
        let mut board = board(&["AB", "#C"], no_hints);

        assert_eq!(board.handle_key((0, 0), Key::Down).unwrap().cursor, (0, 0));
        assert_eq!(board.handle_key((0, 1), Key::Down).unwrap().cursor, (1, 1));
        assert_eq!(board.handle_key((1, 1), Key::Up).unwrap().cursor, (0, 1));
    }

    #[test]
    fn backspace_clears_then_moves_back() {
        let mut board = board(&["ABC"], no_hints);
        board.enter((0, 1), "B").unwrap();

        let outcome = board.handle_key((0, 1), Key::Backspace).unwrap();
        assert_eq!(outcome.entry, EntryOutcome::Changed);
        assert_eq!(outcome.cursor, (0, 1));
        assert_eq!(board.entry((0, 1)), None);

        let outcome = board.handle_key((0, 1), Key::Backspace).unwrap();
        assert_eq!(outcome.entry, EntryOutcome::NoChange);
        assert_eq!(outcome.cursor, (0, 0));
    }

    #[test]
    fn active_word_spans_the_cursor() {
        let board = board(&["ABC", "D#E"], no_hints);

        let word = board.active_word((1, 0), Direction::Down).unwrap();
        assert_eq!(word.start, (0, 0));
        assert_eq!(word.len(), 2);
        assert!(word.contains((1, 0)));
        assert!(!word.contains((0, 1)));
        assert!(board.active_word((1, 1), Direction::Across).is_none());
    }

    #[test]
    fn snapshot_round_trips_and_validates() {
        let mut board = board(&["AB", "#C"], first_hinted);
        board.enter((0, 1), "b").unwrap();

        let json = serde_json::to_string(&board).unwrap();
        let restored: PlayBoard = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, board);
        assert_eq!(PlayBoard::restore(restored), Ok(board));
    }

    #[test]
    fn fully_hinted_board_starts_solved() {
        let mut board = board(&["AB", "CD"], all_hinted);

        assert!(board.progress().is_complete());
        assert!(board.is_solved());
        assert_eq!(board.enter((0, 0), "a"), Err(PuzzleError::AlreadySolved));
        assert_eq!(board.reveal_cell((1, 1)), Err(PuzzleError::AlreadySolved));
    }

    #[test]
    fn restore_rederives_solved_state() {
        let mut board = board(&["AB", "CD"], all_hinted);
        board.state = PlayState::Ready;

        let restored = PlayBoard::restore(board).unwrap();
        assert!(restored.is_solved());

        let mut broken = restored.clone();
        broken.entries = Array2::default((1, 1));
        assert_eq!(
            PlayBoard::restore(broken),
            Err(PuzzleError::InvalidBoardShape)
        );
    }
}
