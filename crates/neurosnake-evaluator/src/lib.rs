//! Fitness evaluation: scoring a weight vector by letting it play snake.
//!
//! The training engine never looks inside an episode. Its only contract with
//! this crate is [`FitnessEvaluator`]: hand over a weight vector, get back a
//! non-negative fitness.
//!
//! # Architecture
//!
//! ```text
//! FitnessEvaluator (weights -> fitness)
//!     ↓ loads weights into
//! FeedforwardNetwork (neurosnake-network)
//!     ↓ driven by
//! NetworkPolicy (observation -> direction)
//!     ↓ plays
//! SnakeBoard (neurosnake-game)
//!     ↓ produces
//! EpisodeStats -> fitness
//! ```
//!
//! - [`policy`] - Turns network outputs into moves
//! - [`snake_evaluator`] - Reference evaluator with a bounded episode length

use std::fmt;

pub mod policy;
pub mod snake_evaluator;

/// Scores a genome's weight vector.
///
/// Implementations must be deterministic for a given `(weights, seed)` pair
/// and must return a finite value `>= 0.0`. Evaluations of different genomes
/// may run concurrently, so an evaluator must not keep mutable state shared
/// across calls.
pub trait FitnessEvaluator: fmt::Debug + Send + Sync {
    /// Number of weights this evaluator expects.
    fn weight_count(&self) -> usize;

    /// Runs one episode with the given weights and returns its fitness.
    ///
    /// `seed` drives every random event inside the episode.
    fn evaluate(&self, weights: &[f64], seed: u64) -> f64;
}
