//! Parent selection strategies.
//!
//! ## Roulette-Wheel Selection
//!
//! Fitness-proportional sampling: draw `slice` uniformly from
//! `[0, total_fitness)` and walk the population accumulating fitness until
//! the running sum reaches `slice`. If the wheel is degenerate (total fitness
//! zero or not finite) or floating-point drift means no genome is reached,
//! a uniformly random genome is returned instead.
//!
//! Fitness must be non-negative for the wheel to be a valid distribution.
//!
//! ## Tournament Selection
//!
//! Pairs genomes at random without replacement and keeps the fitter one of
//! each pair. One pass over a population of `n` produces `n / 2` winners, and
//! every genome takes part in at most one pairing. On equal fitness the
//! second drawn genome wins.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{genome::Genome, random};

/// How parents are picked for breeding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionStrategy {
    /// Fresh fitness-proportional draw for every parent.
    #[default]
    Roulette,
    /// One tournament pass per epoch; winners are paired round-robin.
    Tournament,
}

/// Index picked by [`roulette`], tagged with how it was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum RouletteSelection {
    /// The running fitness sum reached the slice at this index.
    Wheel(usize),
    /// The wheel could not be used; the index was drawn uniformly.
    Fallback(usize),
}

impl RouletteSelection {
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Wheel(i) | Self::Fallback(i) => i,
        }
    }
}

/// Picks one genome with probability proportional to its fitness.
///
/// `total_fitness` must be the sum of the population's fitness values.
///
/// # Panics
///
/// Panics if `population` is empty.
pub fn roulette<R>(population: &[Genome], total_fitness: f64, rng: &mut R) -> RouletteSelection
where
    R: Rng + ?Sized,
{
    assert!(!population.is_empty(), "cannot select from an empty population");

    if total_fitness > 0.0 && total_fitness.is_finite() {
        let slice = random::unit(rng) * total_fitness;
        let mut fitness_so_far = 0.0;
        for (i, genome) in population.iter().enumerate() {
            fitness_so_far += genome.fitness();
            if fitness_so_far >= slice {
                return RouletteSelection::Wheel(i);
            }
        }
    }

    log::trace!("roulette wheel degenerate (total fitness {total_fitness}), drawing uniformly");
    RouletteSelection::Fallback(random::index(rng, population.len()))
}

/// Runs one tournament pass and returns the winners' indices.
///
/// Produces `population.len() / 2` winners.
pub fn tournament<R>(population: &[Genome], rng: &mut R) -> Vec<usize>
where
    R: Rng + ?Sized,
{
    let winner_count = population.len() / 2;
    let mut free = (0..population.len()).collect::<Vec<_>>();
    let mut winners = Vec::with_capacity(winner_count);

    while winners.len() < winner_count {
        let first = free.swap_remove(random::index(rng, free.len()));
        let second = free.swap_remove(random::index(rng, free.len()));
        if population[first].fitness() > population[second].fitness() {
            winners.push(first);
        } else {
            winners.push(second);
        }
    }
    winners
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::random::RandomSource;

    fn population(fitness: &[f64]) -> Vec<Genome> {
        fitness
            .iter()
            .enumerate()
            .map(|(i, &f)| Genome::with_fitness(vec![f64::from(u32::try_from(i).unwrap())], f))
            .collect()
    }

    #[test]
    fn test_roulette_zero_total_uses_fallback() {
        let pop = population(&[0.0, 0.0, 0.0, 0.0]);
        let mut rng = RandomSource::seed_from_u64(1);
        for _ in 0..50 {
            let selected = roulette(&pop, 0.0, &mut rng);
            assert!(selected.is_fallback());
            assert!(selected.index() < pop.len());
        }
    }

    #[test]
    fn test_roulette_nan_total_uses_fallback() {
        let pop = population(&[1.0, 2.0]);
        let mut rng = RandomSource::seed_from_u64(1);
        assert!(roulette(&pop, f64::NAN, &mut rng).is_fallback());
    }

    #[test]
    fn test_roulette_single_nonzero_always_chosen() {
        let pop = population(&[0.0, 0.0, 5.0, 0.0]);
        let mut rng = RandomSource::seed_from_u64(2);
        for _ in 0..100 {
            // slice is in [0, 5); running sum stays 0 until index 2
            let selected = roulette(&pop, 5.0, &mut rng);
            assert!(selected.is_wheel());
            assert!(selected.index() == 2 || selected.index() == 0);
        }
    }

    #[test]
    fn test_roulette_drifted_total_falls_back() {
        // total claims more fitness than the population holds
        let pop = population(&[1.0, 1.0]);
        let mut rng = RandomSource::seed_from_u64(3);
        let mut fallbacks = 0;
        for _ in 0..200 {
            if roulette(&pop, 1000.0, &mut rng).is_fallback() {
                fallbacks += 1;
            }
        }
        assert!(fallbacks > 0);
    }

    #[test]
    fn test_roulette_is_fitness_proportional() {
        let pop = population(&[1.0, 3.0]);
        let mut rng = RandomSource::seed_from_u64(4);
        let picks = (0..4000)
            .filter(|_| roulette(&pop, 4.0, &mut rng).index() == 1)
            .count();
        // expected 3000
        assert!((2700..3300).contains(&picks), "picks = {picks}");
    }

    #[test]
    fn test_tournament_winner_count_and_uniqueness() {
        let pop = population(&[5.0, 1.0, 4.0, 2.0, 8.0, 3.0, 7.0, 6.0]);
        let mut rng = RandomSource::seed_from_u64(5);
        let winners = tournament(&pop, &mut rng);
        assert_eq!(winners.len(), 4);
        let unique = winners.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_tournament_weakest_never_wins() {
        let pop = population(&[5.0, 1.0, 4.0, 2.0, 8.0, 3.0, 7.0, 6.0]);
        for seed in 0..50 {
            let mut rng = RandomSource::seed_from_u64(seed);
            let winners = tournament(&pop, &mut rng);
            assert!(!winners.contains(&1));
            // the fittest genome always wins its pairing
            assert!(winners.contains(&4));
        }
    }
}
