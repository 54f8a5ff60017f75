//! Weight vector operations for the genetic algorithm.
//!
//! These are the raw operators on `[f64]` slices. The
//! [`EvolutionEngine`](crate::engine::EvolutionEngine) decides when to apply
//! them (crossover rate, identical parents, mutation rate).
//!
//! - **Initialization**: [`random`] draws every weight from `[-1, 1)`
//! - **Crossover**: [`single_point_crossover`] swaps tails after a cut point
//! - **Mutation**: [`mutate`] adds a bounded uniform perturbation
//!
//! # Single-Point Crossover
//!
//! For a cut point `c` in `[0, len]`:
//!
//! ```text
//! mum:    m0 m1 m2 | m3 m4
//! dad:    d0 d1 d2 | d3 d4
//!                  c = 3
//! child1: m0 m1 m2 | d3 d4
//! child2: d0 d1 d2 | m3 m4
//! ```
//!
//! `c = 0` and `c = len` reproduce the parents (swapped or not).
//!
//! # Perturbation Mutation
//!
//! Each selected weight becomes `w + u * max_perturbation` with `u` uniform in
//! `[-1, 1)`. Weights are not clamped: repeated mutation is a random walk.

use rand::Rng;

use crate::random;

/// Creates a weight vector by applying a function to each index.
///
/// # Examples
///
/// ```
/// use neurosnake_training::weights;
///
/// let weights = weights::from_fn(|i| 1.0 / (i as f64 + 1.0), 3);
/// assert_eq!(weights, vec![1.0, 0.5, 1.0 / 3.0]);
/// ```
pub fn from_fn<F>(mut f: F, len: usize) -> Vec<f64>
where
    F: FnMut(usize) -> f64,
{
    let mut values = Vec::with_capacity(len);
    for i in 0..len {
        values.push(f(i));
    }
    values
}

/// Generates `len` weights uniformly distributed in `[-1, 1)`.
pub fn random<R>(rng: &mut R, len: usize) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    from_fn(|_| random::clamped(rng), len)
}

/// Splits both parents at `cut` and swaps their tails.
///
/// Both children are fresh vectors; the parents are never aliased.
///
/// # Panics
///
/// Panics if the parents have different lengths or `cut > mum.len()`.
#[must_use]
pub fn single_point_crossover(mum: &[f64], dad: &[f64], cut: usize) -> (Vec<f64>, Vec<f64>) {
    assert_eq!(mum.len(), dad.len());
    assert!(cut <= mum.len());
    let child1 = [&mum[..cut], &dad[cut..]].concat();
    let child2 = [&dad[..cut], &mum[cut..]].concat();
    (child1, child2)
}

/// Perturbs each weight with probability `rate`, in place.
///
/// Returns how many weights were changed. With `rate == 0.0` the slice is
/// untouched; every perturbation is at most `max_perturbation` in magnitude.
///
/// # Panics
///
/// Panics if `rate` is outside `[0, 1]`.
pub fn mutate<R>(weights: &mut [f64], rate: f64, max_perturbation: f64, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    let mut mutated = 0;
    for w in weights {
        if rng.random_bool(rate) {
            *w += random::clamped(rng) * max_perturbation;
            mutated += 1;
        }
    }
    mutated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RandomSource;

    #[test]
    fn test_random_range_and_len() {
        let mut rng = RandomSource::seed_from_u64(0);
        let weights = random(&mut rng, 50);
        assert_eq!(weights.len(), 50);
        assert!(weights.iter().all(|w| (-1.0..1.0).contains(w)));
    }

    #[test]
    fn test_crossover_swaps_tails() {
        let mum = [1.0, 2.0, 3.0, 4.0];
        let dad = [5.0, 6.0, 7.0, 8.0];
        let (a, b) = single_point_crossover(&mum, &dad, 1);
        assert_eq!(a, vec![1.0, 6.0, 7.0, 8.0]);
        assert_eq!(b, vec![5.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_crossover_cut_at_bounds() {
        let mum = [1.0, 2.0];
        let dad = [3.0, 4.0];
        assert_eq!(
            single_point_crossover(&mum, &dad, 0),
            (dad.to_vec(), mum.to_vec())
        );
        assert_eq!(
            single_point_crossover(&mum, &dad, 2),
            (mum.to_vec(), dad.to_vec())
        );
    }

    #[test]
    #[should_panic]
    fn test_crossover_length_mismatch_panics() {
        let _ = single_point_crossover(&[1.0], &[1.0, 2.0], 0);
    }

    #[test]
    fn test_mutate_zero_rate_is_noop() {
        let mut rng = RandomSource::seed_from_u64(5);
        let original = random(&mut rng, 30);
        let mut weights = original.clone();
        assert_eq!(mutate(&mut weights, 0.0, 0.3, &mut rng), 0);
        let same_bits = iter_bits(&weights) == iter_bits(&original);
        assert!(same_bits);
    }

    #[test]
    fn test_mutate_full_rate_is_bounded() {
        let mut rng = RandomSource::seed_from_u64(6);
        let original = random(&mut rng, 30);
        let mut weights = original.clone();
        assert_eq!(mutate(&mut weights, 1.0, 0.3, &mut rng), 30);
        for (before, after) in original.iter().zip(&weights) {
            assert!((after - before).abs() <= 0.3);
        }
    }

    fn iter_bits(weights: &[f64]) -> Vec<u64> {
        weights.iter().map(|w| w.to_bits()).collect()
    }
}
