//! A candidate solution: a flat weight vector and the fitness it scored.

use std::cmp::Ordering;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::weights;

/// Returned by [`Genome::set_weight`] when the index is past the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("weight index {index} out of range for genome of length {len}")]
pub struct GenomeIndexError {
    pub index: usize,
    pub len: usize,
}

/// A candidate solution: a flat weight vector and the fitness it scored.
///
/// Two genomes are equal when their weight vectors are equal; fitness is
/// ignored. Use [`Genome::compare_fitness`] to order by fitness.
///
/// # Example
///
/// ```
/// use neurosnake_training::genome::Genome;
///
/// let mut genome = Genome::new(vec![0.5, -0.25]);
/// genome.set_weight(2, 1.0).unwrap(); // appending at the end is allowed
/// assert!(genome.set_weight(5, 1.0).is_err());
///
/// genome.set_fitness(3.0);
/// let other = Genome::new(vec![0.5, -0.25, 1.0]);
/// assert_eq!(genome, other);
/// assert!(other.compare_fitness(&genome).is_lt());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Genome {
    weights: Vec<f64>,
    fitness: f64,
}

impl PartialEq for Genome {
    fn eq(&self, other: &Self) -> bool {
        self.weights == other.weights
    }
}

impl Genome {
    /// Creates a genome with zero fitness.
    #[must_use]
    pub fn new(weights: Vec<f64>) -> Self {
        Self {
            weights,
            fitness: 0.0,
        }
    }

    #[must_use]
    pub fn with_fitness(weights: Vec<f64>, fitness: f64) -> Self {
        Self { weights, fitness }
    }

    /// Creates a genome of `len` weights drawn uniformly from `[-1, 1)`.
    pub fn random<R>(rng: &mut R, len: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut genome = Self::default();
        for w in weights::random(rng, len) {
            genome.add_weight(w);
        }
        genome
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn add_weight(&mut self, weight: f64) {
        self.weights.push(weight);
    }

    /// Sets weight `index`, or appends when `index == len()`.
    pub fn set_weight(&mut self, index: usize, value: f64) -> Result<(), GenomeIndexError> {
        let len = self.weights.len();
        match index.cmp(&len) {
            Ordering::Less => self.weights[index] = value,
            Ordering::Equal => self.weights.push(value),
            Ordering::Greater => return Err(GenomeIndexError { index, len }),
        }
        Ok(())
    }

    pub(crate) fn weights_mut(&mut self) -> &mut [f64] {
        &mut self.weights
    }

    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    pub fn reset_fitness(&mut self) {
        self.fitness = 0.0;
    }

    /// Orders by fitness, ascending.
    #[must_use]
    pub fn compare_fitness(&self, other: &Self) -> Ordering {
        self.fitness.total_cmp(&other.fitness)
    }
}
