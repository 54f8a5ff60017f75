//! Parallel fitness evaluation of a population.

use std::thread;

use neurosnake_evaluator::FitnessEvaluator;
use rand::Rng;

use crate::genome::Genome;

/// Evaluates every genome and stores the result as its fitness.
///
/// One episode seed per genome is drawn from `rng` up front, in population
/// order, so the outcome depends only on the rng state and never on thread
/// scheduling. Each genome's fitness is reset before its episode runs.
///
/// # Panics
///
/// Panics if a genome's length differs from the evaluator's weight count.
pub fn evaluate_population<E, R>(population: &mut [Genome], evaluator: &E, rng: &mut R)
where
    E: FitnessEvaluator + ?Sized,
    R: Rng + ?Sized,
{
    let seeds = population
        .iter()
        .map(|_| rng.random::<u64>())
        .collect::<Vec<_>>();

    thread::scope(|s| {
        for (genome, seed) in population.iter_mut().zip(seeds) {
            assert_eq!(
                genome.len(),
                evaluator.weight_count(),
                "genome does not fit the evaluator"
            );
            genome.reset_fitness();
            s.spawn(move || {
                let fitness = evaluator.evaluate(genome.weights(), seed);
                genome.set_fitness(fitness);
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RandomSource;

    /// Fitness is the weight sum plus a seed-dependent fraction.
    #[derive(Debug)]
    struct SumEvaluator {
        len: usize,
    }

    impl FitnessEvaluator for SumEvaluator {
        fn weight_count(&self) -> usize {
            self.len
        }

        #[expect(clippy::cast_precision_loss)]
        fn evaluate(&self, weights: &[f64], seed: u64) -> f64 {
            weights.iter().sum::<f64>() + (seed % 1000) as f64 / 1000.0
        }
    }

    #[test]
    fn test_fitness_assigned_to_each_genome() {
        let evaluator = SumEvaluator { len: 3 };
        let mut population = vec![
            Genome::with_fitness(vec![1.0, 1.0, 1.0], 99.0),
            Genome::new(vec![5.0, 5.0, 5.0]),
        ];
        let mut rng = RandomSource::seed_from_u64(0);
        evaluate_population(&mut population, &evaluator, &mut rng);

        assert!((3.0..4.0).contains(&population[0].fitness()));
        assert!((15.0..16.0).contains(&population[1].fitness()));
    }

    #[test]
    fn test_same_seed_same_fitness() {
        let evaluator = SumEvaluator { len: 4 };
        let run = || {
            let mut rng = RandomSource::seed_from_u64(7);
            let mut population = (0..16)
                .map(|_| Genome::random(&mut rng, 4))
                .collect::<Vec<_>>();
            evaluate_population(&mut population, &evaluator, &mut rng);
            population
                .iter()
                .map(|g| g.fitness().to_bits())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_empty_population() {
        let evaluator = SumEvaluator { len: 1 };
        let mut rng = RandomSource::seed_from_u64(0);
        evaluate_population(&mut [], &evaluator, &mut rng);
    }

    #[test]
    #[should_panic(expected = "genome does not fit the evaluator")]
    fn test_length_mismatch_panics() {
        let evaluator = SumEvaluator { len: 2 };
        let mut population = vec![Genome::new(vec![0.0; 3])];
        let mut rng = RandomSource::seed_from_u64(0);
        evaluate_population(&mut population, &evaluator, &mut rng);
    }
}
