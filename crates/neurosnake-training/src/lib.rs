//! Genetic algorithm that evolves the weights of a snake-playing network.
//!
//! # Training Loop
//!
//! ```text
//! EvolutionEngine::new        random population, weights in [-1, 1)
//!     ↓
//! evaluate_population         fitness of every genome (parallel)
//!     ↓
//! EvolutionEngine::epoch      sort, statistics, elitism, breeding
//!     ↓
//! (repeat)
//! ```
//!
//! # Modules
//!
//! - [`engine`] - Engine configuration and the epoch
//! - [`evaluation`] - Parallel fitness evaluation
//! - [`genome`] - A weight vector with its fitness
//! - [`selection`] - Roulette and tournament parent selection
//! - [`statistics`] - Per-generation fitness summary
//! - [`weights`] - Crossover and mutation on raw weight slices
//! - [`random`] - Seeded random source
//!
//! # Example
//!
//! ```
//! use neurosnake_evaluator::{FitnessEvaluator, snake_evaluator::SnakeEvaluator};
//! use neurosnake_network::NetworkTopology;
//! use neurosnake_training::{
//!     engine::{EngineConfig, EvolutionEngine},
//!     evaluation::evaluate_population,
//!     random::RandomSource,
//! };
//!
//! let evaluator = SnakeEvaluator::new(NetworkTopology::new(6, 4, 1, 4), 50);
//! let config = EngineConfig::new(10, evaluator.weight_count());
//! let mut rng = RandomSource::seed_from_u64(3);
//! let mut engine = EvolutionEngine::new(config, &mut rng).unwrap();
//!
//! for _ in 0..3 {
//!     let mut population = engine.population().to_vec();
//!     evaluate_population(&mut population, &evaluator, &mut rng);
//!     engine.epoch(population, &mut rng).unwrap();
//! }
//! assert_eq!(engine.generation(), 3);
//! assert!(engine.best_genome().is_some());
//! ```

pub mod engine;
pub mod evaluation;
pub mod genome;
pub mod random;
pub mod selection;
pub mod statistics;
pub mod weights;
