use alloc::vec;
use alloc::vec::Vec;

use super::*;
use crate::HintConfig;

/// Scatters two or three hints over a word, seeded at one of its ends and never revealing two
/// neighbouring letters. Three letter words are the exception: all but one letter is revealed.
#[derive(Clone, Debug)]
pub struct ScatteredHints<S> {
    source: S,
    min_word_len: usize,
}

impl<S: RandomSource> ScatteredHints<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, &HintConfig::default())
    }

    pub fn with_config(source: S, config: &HintConfig) -> Self {
        Self {
            source,
            min_word_len: config.min_word_len.max(HintConfig::MIN_WORD_LEN).into(),
        }
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S: RandomSource> HintSelector for ScatteredHints<S> {
    fn select(&mut self, len: usize) -> HintMask {
        if len < self.min_word_len {
            return HintMask::hidden(len);
        }

        if len == 3 {
            let skip = self.source.pick(3);
            return HintMask::from((0..3).map(|i| i != skip).collect::<Vec<_>>());
        }

        let target = 2 + self.source.pick(2);
        let mut hints = vec![false; len];

        let seed = if self.source.pick(2) == 0 { 0 } else { len - 1 };
        hints[seed] = true;
        let mut available: Vec<usize> = (0..len).filter(|&pos| pos != seed).collect();

        for _ in 1..target {
            let valid: Vec<usize> = available
                .iter()
                .copied()
                .filter(|&pos| !has_revealed_neighbor(&hints, pos))
                .collect();
            if valid.is_empty() {
                log::trace!("no room for more hints in a {len} letter word");
                break;
            }

            let pos = valid[self.source.pick(valid.len())];
            hints[pos] = true;
            available.retain(|&p| p != pos);
        }

        HintMask::from(hints)
    }
}

fn has_revealed_neighbor(hints: &[bool], pos: usize) -> bool {
    let before = pos.checked_sub(1).is_some_and(|prev| hints[prev]);
    let after = hints.get(pos + 1).copied().unwrap_or(false);
    before || after
}
