//! Reference fitness evaluator: one bounded snake episode per genome.
//!
//! ```text
//! fitness = steps_survived * 1 + targets_reached * 10
//! ```
//!
//! The episode ends at the first collision, when the board is full, or after
//! `step_limit` decisions.

use neurosnake_game::{EpisodeStats, OBSERVATION_LEN, SnakeBoard, StepOutcome};
use neurosnake_network::{FeedforwardNetwork, NetworkTopology};

use crate::{FitnessEvaluator, policy::NetworkPolicy};

/// Plays one snake episode with a network built from the genome's weights.
#[derive(Debug, Clone)]
pub struct SnakeEvaluator {
    topology: NetworkTopology,
    step_limit: usize,
}

impl SnakeEvaluator {
    /// Creates an evaluator.
    ///
    /// # Panics
    ///
    /// Panics if the topology does not read exactly [`OBSERVATION_LEN`] inputs.
    #[must_use]
    pub fn new(topology: NetworkTopology, step_limit: usize) -> Self {
        assert_eq!(
            topology.num_inputs, OBSERVATION_LEN,
            "snake controller must read {OBSERVATION_LEN} inputs"
        );
        Self {
            topology,
            step_limit,
        }
    }

    #[must_use]
    pub fn topology(&self) -> NetworkTopology {
        self.topology
    }

    #[must_use]
    pub fn step_limit(&self) -> usize {
        self.step_limit
    }

    /// Plays one episode and returns its statistics.
    ///
    /// # Panics
    ///
    /// Panics if `weights.len()` differs from the topology's weight count.
    #[must_use]
    pub fn play_episode(&self, weights: &[f64], seed: u64) -> EpisodeStats {
        let network = match FeedforwardNetwork::from_weights(self.topology, weights) {
            Ok(network) => network,
            Err(e) => panic!("cannot load genome into network: {e}"),
        };
        let policy = NetworkPolicy::new(network);

        let mut board = SnakeBoard::with_seed(seed);
        let mut stats = EpisodeStats::new();
        for _ in 0..self.step_limit {
            let direction = policy.choose(&board.observation(), board.direction());
            match board.step(direction) {
                StepOutcome::Collided => break,
                StepOutcome::Moved => stats.survive_step(),
                StepOutcome::ReachedTarget => {
                    stats.survive_step();
                    stats.reach_target();
                }
            }
            if !board.is_alive() {
                break;
            }
        }
        stats
    }
}

impl FitnessEvaluator for SnakeEvaluator {
    fn weight_count(&self) -> usize {
        self.topology.number_of_weights()
    }

    fn evaluate(&self, weights: &[f64], seed: u64) -> f64 {
        self.play_episode(weights, seed).fitness()
    }
}

#[cfg(test)]
mod tests {
    use neurosnake_game::Direction;

    use super::*;

    const TOPOLOGY: NetworkTopology = NetworkTopology::new(OBSERVATION_LEN, Direction::LEN, 1, 4);

    /// Weights that make every neuron output the same value, so the policy
    /// always picks `Up` (first maximum).
    fn constant_weights() -> Vec<f64> {
        vec![0.0; TOPOLOGY.number_of_weights()]
    }

    #[test]
    fn test_step_limit_bounds_episode() {
        let evaluator = SnakeEvaluator::new(TOPOLOGY, 3);
        let stats = evaluator.play_episode(&constant_weights(), 0);
        assert!(stats.steps() <= 3);
    }

    #[test]
    fn test_constant_policy_runs_into_wall() {
        // heading up from (5, 5): survives 5 steps (y = 4..=0), dies on the 6th
        let evaluator = SnakeEvaluator::new(TOPOLOGY, 500);
        let stats = evaluator.play_episode(&constant_weights(), 12345);
        assert_eq!(stats.steps(), 5);
        assert!(evaluator.evaluate(&constant_weights(), 12345) >= 0.0);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let evaluator = SnakeEvaluator::new(TOPOLOGY, 200);
        let weights = (0..TOPOLOGY.number_of_weights())
            .map(|i| if i % 3 == 0 { 0.7 } else { -0.4 })
            .collect::<Vec<_>>();
        assert_eq!(
            evaluator.play_episode(&weights, 5),
            evaluator.play_episode(&weights, 5)
        );
    }

    #[test]
    fn test_weight_count() {
        let evaluator = SnakeEvaluator::new(TOPOLOGY, 10);
        assert_eq!(evaluator.weight_count(), TOPOLOGY.number_of_weights());
    }

    #[test]
    #[should_panic(expected = "cannot load genome")]
    fn test_wrong_weight_count_panics() {
        let evaluator = SnakeEvaluator::new(TOPOLOGY, 10);
        let _ = evaluator.play_episode(&[0.0; 3], 0);
    }

    #[test]
    #[should_panic(expected = "must read")]
    fn test_wrong_input_width_panics() {
        let _ = SnakeEvaluator::new(NetworkTopology::new(5, 4, 1, 4), 10);
    }
}
