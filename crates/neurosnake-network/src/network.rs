//! Network topology and the feedforward network built from it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{NeuronLayer, WeightCountError};

/// Shape of a [`FeedforwardNetwork`].
///
/// With `num_hidden_layers > 0` the network has `num_hidden_layers` hidden
/// layers of `neurons_per_hidden_layer` neurons followed by an output layer
/// of `num_outputs` neurons. The first hidden layer reads `num_inputs` values,
/// later hidden layers read `neurons_per_hidden_layer` values, and the output
/// layer neurons read `num_inputs` values.
///
/// With `num_hidden_layers == 0` the network has no layers at all and
/// produces no outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkTopology {
    pub num_inputs: usize,
    pub num_outputs: usize,
    pub num_hidden_layers: usize,
    pub neurons_per_hidden_layer: usize,
}

impl NetworkTopology {
    #[must_use]
    pub const fn new(
        num_inputs: usize,
        num_outputs: usize,
        num_hidden_layers: usize,
        neurons_per_hidden_layer: usize,
    ) -> Self {
        Self {
            num_inputs,
            num_outputs,
            num_hidden_layers,
            neurons_per_hidden_layer,
        }
    }

    /// `(neuron count, inputs per neuron)` for every layer, in order.
    fn layer_shapes(&self) -> Vec<(usize, usize)> {
        if self.num_hidden_layers == 0 {
            return vec![];
        }
        let mut shapes = Vec::with_capacity(self.num_hidden_layers + 1);
        shapes.push((self.neurons_per_hidden_layer, self.num_inputs));
        for _ in 1..self.num_hidden_layers {
            shapes.push((
                self.neurons_per_hidden_layer,
                self.neurons_per_hidden_layer,
            ));
        }
        shapes.push((self.num_outputs, self.num_inputs));
        shapes
    }

    /// Number of weights a network of this shape holds, without building it.
    ///
    /// ```
    /// use neurosnake_network::NetworkTopology;
    ///
    /// // hidden: 8 * (6 + 1), hidden: 8 * (8 + 1), output: 4 * (6 + 1)
    /// assert_eq!(NetworkTopology::new(6, 4, 2, 8).number_of_weights(), 56 + 72 + 28);
    /// assert_eq!(NetworkTopology::new(2, 1, 0, 3).number_of_weights(), 0);
    /// ```
    #[must_use]
    pub fn number_of_weights(&self) -> usize {
        self.layer_shapes()
            .iter()
            .map(|(neurons, inputs)| neurons * (inputs + 1))
            .sum()
    }
}

/// Multilayer perceptron with a fixed structure and mutable weights.
///
/// See the [crate documentation](crate) for the canonical weight order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedforwardNetwork {
    topology: NetworkTopology,
    layers: Vec<NeuronLayer>,
}

impl FeedforwardNetwork {
    /// Builds a network with every weight drawn uniformly from `[0, 1)`.
    pub fn new<R>(topology: NetworkTopology, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let layers = topology
            .layer_shapes()
            .into_iter()
            .map(|(neurons, inputs)| NeuronLayer::random(neurons, inputs, rng))
            .collect();
        Self { topology, layers }
    }

    /// Builds a network directly from a flat weight vector in canonical
    /// order.
    pub fn from_weights(
        topology: NetworkTopology,
        weights: &[f64],
    ) -> Result<Self, WeightCountError> {
        let expected = topology.number_of_weights();
        if weights.len() != expected {
            return Err(WeightCountError {
                expected,
                actual: weights.len(),
            });
        }

        let mut rest = weights;
        let layers = topology
            .layer_shapes()
            .into_iter()
            .map(|(neurons, inputs)| {
                let (layer, tail) = rest.split_at(neurons * (inputs + 1));
                rest = tail;
                NeuronLayer::from_weights(inputs, layer)
            })
            .collect();
        Ok(Self { topology, layers })
    }

    #[must_use]
    pub fn topology(&self) -> NetworkTopology {
        self.topology
    }

    #[must_use]
    pub fn layers(&self) -> &[NeuronLayer] {
        &self.layers
    }

    /// Per-neuron weight slices in layer-then-neuron order.
    #[must_use]
    pub fn weights(&self) -> Vec<&[f64]> {
        self.layers
            .iter()
            .flat_map(NeuronLayer::neurons)
            .map(crate::Neuron::weights)
            .collect()
    }

    /// All weights flattened into the canonical order.
    #[must_use]
    pub fn flat_weights(&self) -> Vec<f64> {
        self.weights().concat()
    }

    /// Overwrites every weight from a flat vector in canonical order.
    ///
    /// `weights` must hold exactly [`Self::number_of_weights`] values; the
    /// network is left untouched otherwise.
    pub fn put_weights(&mut self, weights: &[f64]) -> Result<(), WeightCountError> {
        let expected = self.number_of_weights();
        if weights.len() != expected {
            return Err(WeightCountError {
                expected,
                actual: weights.len(),
            });
        }

        let mut source = weights.iter().copied();
        for layer in &mut self.layers {
            for neuron in layer.neurons_mut() {
                for (w, new) in neuron.weights_mut().iter_mut().zip(&mut source) {
                    *w = new;
                }
            }
        }
        Ok(())
    }

    /// Sum of `num_inputs + 1` over every neuron.
    #[must_use]
    pub fn number_of_weights(&self) -> usize {
        self.layers.iter().map(NeuronLayer::number_of_weights).sum()
    }

    /// Propagates `inputs` through every layer and returns the last layer's
    /// activations.
    ///
    /// Returns an empty vector when `inputs.len()` differs from the
    /// topology's input count, and always for a network without layers.
    #[must_use]
    pub fn evaluate(&self, inputs: &[f64]) -> Vec<f64> {
        if inputs.len() != self.topology.num_inputs {
            return vec![];
        }

        let mut values = inputs.to_vec();
        let mut outputs = vec![];
        for layer in &self.layers {
            outputs = layer.evaluate(&values);
            values.clone_from(&outputs);
        }
        outputs
    }
}
