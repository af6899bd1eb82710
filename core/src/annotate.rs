use alloc::string::String;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// How hint masks are shared between the cells of a word.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaskStrategy {
    /// One mask per word for the whole pass, every letter of the word reads the same mask.
    #[default]
    PerWord,
    /// Every cell draws its own masks: word starts look at index 0 of fresh across and down
    /// masks, continuation cells walk back to their word start and look at their offset.
    /// Two cells of the same word may therefore disagree.
    PerCell,
}

/// Solution grid together with the letters pre-filled as partial hints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedGrid {
    grid: PuzzleGrid,
    partial_hints: Array2<bool>,
}

impl AnnotatedGrid {
    pub fn grid(&self) -> &PuzzleGrid {
        &self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn is_partial_hint(&self, coords: Coord2) -> bool {
        self.partial_hints
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    pub fn hint_count(&self) -> CellCount {
        self.partial_hints.iter().filter(|&&hint| hint).count() as CellCount
    }

    /// Row-major view handed to the rendering layer.
    pub fn to_rows(&self) -> Vec<Vec<HintedCell>> {
        let (rows, cols) = self.size();
        (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| {
                        let cell = self.grid[(row, col)];
                        HintedCell {
                            letter: cell.letter.map(String::from).unwrap_or_default(),
                            number: cell.number,
                            is_partial_hint: self.is_partial_hint((row, col)),
                        }
                    })
                    .collect()
            })
            .collect()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let (rows, cols) = self.grid.size();
        if self.partial_hints.dim() != (rows.into(), cols.into()) {
            return Err(PuzzleError::InvalidBoardShape);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HintedCell {
    pub letter: String,
    pub number: Option<ClueNumber>,
    pub is_partial_hint: bool,
}

/// Runs one annotation pass with the scattered hint selector.
pub fn annotate<S: RandomSource>(
    grid: &PuzzleGrid,
    config: &HintConfig,
    source: S,
) -> AnnotatedGrid {
    let mut selector = ScatteredHints::with_config(source, config);
    annotate_with(grid, config.strategy, &mut selector)
}

pub fn annotate_puzzle<S: RandomSource>(
    puzzle: &Puzzle,
    config: &HintConfig,
    source: S,
) -> AnnotatedGrid {
    annotate(&puzzle.grid, config, source)
}

/// Runs one annotation pass with any selector.
pub fn annotate_with<H: HintSelector + ?Sized>(
    grid: &PuzzleGrid,
    strategy: MaskStrategy,
    selector: &mut H,
) -> AnnotatedGrid {
    let partial_hints = match strategy {
        MaskStrategy::PerWord => hints_per_word(grid, selector),
        MaskStrategy::PerCell => hints_per_cell(grid, selector),
    };
    let annotated = AnnotatedGrid {
        grid: grid.clone(),
        partial_hints,
    };
    log::debug!(
        "annotated {}x{} grid with {} partial hints ({strategy:?})",
        annotated.size().0,
        annotated.size().1,
        annotated.hint_count()
    );
    annotated
}

fn hints_per_word<H: HintSelector + ?Sized>(grid: &PuzzleGrid, selector: &mut H) -> Array2<bool> {
    let mut hints = Array2::from_elem(grid.size().to_nd_index(), false);
    for word in words(grid) {
        let mask = selector.select(word.len());
        log::trace!("{word}: {:?}", mask.as_slice());
        for (offset, coords) in word.cells().enumerate() {
            if mask.is_revealed(offset) {
                hints[coords.to_nd_index()] = true;
            }
        }
    }
    hints
}

fn hints_per_cell<H: HintSelector + ?Sized>(grid: &PuzzleGrid, selector: &mut H) -> Array2<bool> {
    let mut hints = Array2::from_elem(grid.size().to_nd_index(), false);
    for (coords, cell) in grid.iter_cells() {
        if !cell.is_playable() {
            continue;
        }

        let mut is_hint = false;
        if cell.is_numbered() {
            for direction in Direction::ALL {
                let len = word_len(grid, coords, direction);
                if len > 1 && selector.select(len).is_revealed(0) {
                    is_hint = true;
                }
            }
        } else {
            for direction in Direction::ALL {
                let continues = direction
                    .step_back(coords)
                    .is_some_and(|prev| grid.is_playable(prev));
                if !continues {
                    continue;
                }
                let (start, offset) = word_start(grid, coords, direction);
                let len = word_len(grid, start, direction);
                if selector.select(len).is_revealed(offset) {
                    is_hint = true;
                }
            }
        }
        hints[coords.to_nd_index()] = is_hint;
    }
    hints
}
