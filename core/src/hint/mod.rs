use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use scattered::*;

mod scattered;

/// Uniform integer source behind every hint decision.
pub trait RandomSource {
    /// Uniform value in `0..bound`, `bound` is never zero.
    fn pick(&mut self, bound: usize) -> usize;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn pick(&mut self, bound: usize) -> usize {
        (**self).pick(bound)
    }
}

/// Adapts any `rand` generator.
#[derive(Clone, Debug)]
pub struct RngSource<R>(pub R);

impl<R: rand::Rng> RandomSource for RngSource<R> {
    fn pick(&mut self, bound: usize) -> usize {
        self.0.random_range(0..bound)
    }
}

/// Replays a fixed sequence of draws, each reduced modulo the requested bound. Draws past the
/// end of the sequence return `0`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedSource {
    values: Vec<usize>,
    consumed: usize,
}

impl ScriptedSource {
    pub fn new(values: impl Into<Vec<usize>>) -> Self {
        Self {
            values: values.into(),
            consumed: 0,
        }
    }

    /// How many draws were made so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl RandomSource for ScriptedSource {
    fn pick(&mut self, bound: usize) -> usize {
        let value = self.values.get(self.consumed).copied().unwrap_or(0);
        self.consumed += 1;
        value % bound
    }
}

/// Revealed letter positions of one word.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HintMask(Vec<bool>);

impl HintMask {
    /// Mask revealing nothing.
    pub fn hidden(len: usize) -> Self {
        Self(alloc::vec![false; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether position `index` is revealed, `false` past the end of the word.
    pub fn is_revealed(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    pub fn revealed_count(&self) -> usize {
        self.0.iter().filter(|&&revealed| revealed).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

impl From<Vec<bool>> for HintMask {
    fn from(mask: Vec<bool>) -> Self {
        Self(mask)
    }
}

/// Chooses which letters of a word start out revealed.
pub trait HintSelector {
    fn select(&mut self, len: usize) -> HintMask;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn scripted_source_wraps_and_defaults() {
        let mut source = ScriptedSource::new([5, 1]);
        assert_eq!(source.pick(3), 2);
        assert_eq!(source.pick(2), 1);
        assert_eq!(source.pick(4), 0);
        assert_eq!(source.consumed(), 3);
    }

    #[test]
    fn rng_source_stays_in_range() {
        let mut source = RngSource(SmallRng::seed_from_u64(7));
        for bound in 1..20 {
            assert!(source.pick(bound) < bound);
        }
    }

    #[test]
    fn mask_reads_past_end_as_hidden() {
        let mask = HintMask::from(alloc::vec![true, false]);
        assert!(mask.is_revealed(0));
        assert!(!mask.is_revealed(1));
        assert!(!mask.is_revealed(5));
        assert_eq!(mask.revealed_count(), 1);
    }
}
