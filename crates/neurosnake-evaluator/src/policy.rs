//! Controller that picks a snake direction from network outputs.

use neurosnake_game::{Direction, Observation};
use neurosnake_network::FeedforwardNetwork;

/// Wraps a network whose four outputs score `Up`, `Down`, `Right`, `Left`.
#[derive(Debug, Clone)]
pub struct NetworkPolicy {
    network: FeedforwardNetwork,
}

impl NetworkPolicy {
    #[must_use]
    pub fn new(network: FeedforwardNetwork) -> Self {
        Self { network }
    }

    #[must_use]
    pub fn network(&self) -> &FeedforwardNetwork {
        &self.network
    }

    /// Chooses the next direction; keeps `current` when the network gives no
    /// usable output.
    #[must_use]
    pub fn choose(&self, observation: &Observation, current: Direction) -> Direction {
        let outputs = self.network.evaluate(observation.as_slice());
        select_direction(&outputs).unwrap_or(current)
    }
}

/// Index of the largest output mapped to a direction.
///
/// The first maximum wins on ties. Outputs beyond the fourth are ignored.
#[must_use]
pub fn select_direction(outputs: &[f64]) -> Option<Direction> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &value) in outputs.iter().take(Direction::LEN).enumerate() {
        if best.is_none_or(|(_, max)| value > max) {
            best = Some((i, value));
        }
    }
    best.and_then(|(i, _)| Direction::from_index(i))
}
