//! Fixed-topology feedforward neural network used as the phenotype of a genome.
//!
//! The network is a plain multilayer perceptron: an ordered list of
//! [`NeuronLayer`]s, each holding [`Neuron`]s with one weight per input plus a
//! trailing bias weight. Learning never happens here. The training crate
//! evolves flat weight vectors and loads them with
//! [`FeedforwardNetwork::put_weights`].
//!
//! # Canonical Weight Order
//!
//! The flattened weight vector is laid out as:
//!
//! ```text
//! layer 0: neuron 0: w0 w1 .. w(n-1) bias
//!          neuron 1: w0 w1 .. w(n-1) bias
//!          ...
//! layer 1: ...
//! ```
//!
//! The same order is used for reading ([`FeedforwardNetwork::flat_weights`])
//! and writing ([`FeedforwardNetwork::put_weights`]), so a read followed by a
//! write is the identity.
//!
//! # Example
//!
//! ```
//! use neurosnake_network::{FeedforwardNetwork, NetworkTopology};
//! use rand::SeedableRng as _;
//!
//! let topology = NetworkTopology::new(2, 1, 1, 3);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let mut network = FeedforwardNetwork::new(topology, &mut rng);
//!
//! // 3 hidden neurons with 2 inputs, 1 output neuron with 2 inputs
//! assert_eq!(network.number_of_weights(), 3 * 3 + 3);
//!
//! let outputs = network.evaluate(&[0.5, -0.5]);
//! assert_eq!(outputs.len(), 1);
//! assert!(outputs[0] > 0.0 && outputs[0] < 1.0);
//!
//! // wrong input width is not an error, it just yields nothing
//! assert!(network.evaluate(&[1.0]).is_empty());
//!
//! let weights = network.flat_weights();
//! network.put_weights(&weights).unwrap();
//! assert_eq!(network.flat_weights(), weights);
//! ```

pub use self::{activation::*, network::*, neuron::*};

mod activation;
mod network;
mod neuron;

/// Returned when a flat weight vector does not match the network's weight count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("weight count mismatch: network needs {expected} weights, got {actual}")]
pub struct WeightCountError {
    pub expected: usize,
    pub actual: usize,
}
