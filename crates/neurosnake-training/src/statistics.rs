//! Per-generation fitness summary.

use serde::{Deserialize, Serialize};

use crate::genome::Genome;

/// Fitness statistics of one evaluated population.
///
/// Recomputed from scratch every epoch. The neutral value ([`Default`]) is
/// `total = 0`, `best = 0`, `worst = +inf`, `average = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub total_fitness: f64,
    pub best_fitness: f64,
    pub worst_fitness: f64,
    pub average_fitness: f64,
    /// Index of the best genome in the (sorted) population it was computed from.
    pub fittest_index: usize,
}

impl Default for PopulationStats {
    fn default() -> Self {
        Self {
            total_fitness: 0.0,
            best_fitness: 0.0,
            worst_fitness: f64::INFINITY,
            average_fitness: 0.0,
            fittest_index: 0,
        }
    }
}

impl PopulationStats {
    /// Computes statistics in a single pass.
    ///
    /// Best and worst only move on a strict improvement, so among equal
    /// maxima the lowest index is reported as fittest. Since the running best
    /// starts at `0`, a population without positive fitness reports index `0`.
    ///
    /// # Example
    ///
    /// ```
    /// use neurosnake_training::{genome::Genome, statistics::PopulationStats};
    ///
    /// let population = [1.0, 4.0, 4.0, 3.0].map(|f| Genome::with_fitness(vec![], f));
    /// let stats = PopulationStats::compute(&population);
    /// assert_eq!(stats.total_fitness, 12.0);
    /// assert_eq!(stats.best_fitness, 4.0);
    /// assert_eq!(stats.fittest_index, 1);
    /// assert_eq!(stats.worst_fitness, 1.0);
    /// assert_eq!(stats.average_fitness, 3.0);
    /// ```
    #[must_use]
    pub fn compute(population: &[Genome]) -> Self {
        let mut stats = Self::default();
        for (i, genome) in population.iter().enumerate() {
            let fitness = genome.fitness();
            if fitness > stats.best_fitness {
                stats.best_fitness = fitness;
                stats.fittest_index = i;
            }
            if fitness < stats.worst_fitness {
                stats.worst_fitness = fitness;
            }
            stats.total_fitness += fitness;
        }
        if !population.is_empty() {
            #[expect(clippy::cast_precision_loss)]
            let n = population.len() as f64;
            stats.average_fitness = stats.total_fitness / n;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population(fitness: &[f64]) -> Vec<Genome> {
        fitness
            .iter()
            .map(|&f| Genome::with_fitness(vec![f], f))
            .collect()
    }

    #[test]
    fn test_empty_population_is_neutral() {
        assert_eq!(PopulationStats::compute(&[]), PopulationStats::default());
    }

    #[test]
    fn test_tie_keeps_first_maximum() {
        let stats = PopulationStats::compute(&population(&[2.0, 9.0, 1.0, 9.0]));
        assert_eq!(stats.fittest_index, 1);
        assert_eq!(stats.best_fitness, 9.0);
    }

    #[test]
    fn test_all_zero_fitness() {
        let stats = PopulationStats::compute(&population(&[0.0, 0.0, 0.0]));
        assert_eq!(stats.best_fitness, 0.0);
        assert_eq!(stats.worst_fitness, 0.0);
        assert_eq!(stats.fittest_index, 0);
        assert_eq!(stats.average_fitness, 0.0);
    }

    #[test]
    fn test_worst_and_average() {
        let stats = PopulationStats::compute(&population(&[3.0, 0.5, 8.5]));
        assert_eq!(stats.worst_fitness, 0.5);
        assert_eq!(stats.total_fitness, 12.0);
        assert_eq!(stats.average_fitness, 4.0);
    }
}
