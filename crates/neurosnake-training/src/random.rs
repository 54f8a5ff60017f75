//! Seeded random source shared by every stochastic operator.
//!
//! All operators in this crate take `rng: &mut R` with `R: Rng + ?Sized`, so
//! any generator works. [`RandomSource`] is the one the training command
//! uses: a PCG generator that remembers the seed it was built from, which
//! makes a run replayable.

use rand::{Rng, RngCore, SeedableRng as _};
use rand_pcg::Pcg32;

/// Uniform draw from `[0, 1)`.
pub fn unit<R>(rng: &mut R) -> f64
where
    R: Rng + ?Sized,
{
    rng.random::<f64>()
}

/// Uniform draw from `[-1, 1)`.
pub fn clamped<R>(rng: &mut R) -> f64
where
    R: Rng + ?Sized,
{
    rng.random_range(-1.0..1.0)
}

/// Uniform index in `[0, upper)`.
///
/// # Panics
///
/// Panics if `upper` is zero.
pub fn index<R>(rng: &mut R, upper: usize) -> usize
where
    R: Rng + ?Sized,
{
    rng.random_range(0..upper)
}

/// Explicitly seeded random number generator.
///
/// # Example
///
/// ```
/// use neurosnake_training::random::RandomSource;
///
/// let mut a = RandomSource::seed_from_u64(42);
/// let mut b = RandomSource::seed_from_u64(42);
/// assert_eq!(a.unit(), b.unit());
/// assert_eq!(a.seed(), 42);
/// ```
#[derive(Debug, Clone)]
pub struct RandomSource {
    seed: u64,
    rng: Pcg32,
}

impl RandomSource {
    #[must_use]
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seeds from the thread-local generator. The drawn seed is kept so it can
    /// be logged and reused.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::seed_from_u64(rand::rng().random())
    }

    /// Seed this source was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn unit(&mut self) -> f64 {
        unit(self)
    }

    pub fn clamped(&mut self) -> f64 {
        clamped(self)
    }

    pub fn index(&mut self, upper: usize) -> usize {
        index(self, upper)
    }
}

impl RngCore for RandomSource {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.rng.fill_bytes(dst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RandomSource::seed_from_u64(7);
        let mut b = RandomSource::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_different_seed_different_sequence() {
        let mut a = RandomSource::seed_from_u64(1);
        let mut b = RandomSource::seed_from_u64(2);
        let xs = (0..8).map(|_| a.next_u64()).collect::<Vec<_>>();
        let ys = (0..8).map(|_| b.next_u64()).collect::<Vec<_>>();
        assert_ne!(xs, ys);
    }

    #[test]
    fn test_ranges() {
        let mut rng = RandomSource::seed_from_u64(99);
        for _ in 0..1000 {
            assert!((0.0..1.0).contains(&rng.unit()));
            assert!((-1.0..1.0).contains(&rng.clamped()));
            assert!(rng.index(5) < 5);
        }
    }

    #[test]
    fn test_entropy_seed_is_replayable() {
        let mut a = RandomSource::from_entropy();
        let mut b = RandomSource::seed_from_u64(a.seed());
        assert_eq!(a.next_u64(), b.next_u64());
    }
}
