use rand::Rng;

use crate::directions::CompassPrimary;

/// Every random draw the maze generators make goes through this trait, so that tests can
/// substitute a seeded or completely scripted source.
///
/// Any `rand::Rng` is a `RandomSource`.
pub trait RandomSource {
    /// Uniform index in `0..upper`. `upper` is never zero.
    fn index_below(&mut self, upper: usize) -> usize;

    /// Uniform pick from a non-empty set of directions.
    fn choose_direction(&mut self, candidates: &[CompassPrimary]) -> CompassPrimary {
        candidates[self.index_below(candidates.len())]
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    #[inline]
    fn index_below(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}
