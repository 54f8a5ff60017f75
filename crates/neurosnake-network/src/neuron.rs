//! Perceptron neurons and the layers that group them.

use rand::Rng;

use crate::{ACTIVATION_RESPONSE, BIAS, sigmoid};

/// A single perceptron with `num_inputs` input weights and one bias weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    num_inputs: usize,
    weights: Vec<f64>,
}

impl Neuron {
    /// Creates a neuron whose `num_inputs + 1` weights are drawn from `[0, 1)`.
    pub fn random<R>(num_inputs: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let weights = (0..=num_inputs).map(|_| rng.random::<f64>()).collect();
        Self {
            num_inputs,
            weights,
        }
    }

    /// Creates a neuron from its input weights followed by its bias weight.
    ///
    /// # Panics
    ///
    /// Panics if `weights` is empty.
    #[must_use]
    pub fn from_weights(weights: Vec<f64>) -> Self {
        assert!(!weights.is_empty(), "a neuron needs at least a bias weight");
        Self {
            num_inputs: weights.len() - 1,
            weights,
        }
    }

    /// Number of inputs this neuron reads (excluding the bias).
    #[must_use]
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// All weights, the last one being the bias weight.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub(crate) fn weights_mut(&mut self) -> &mut [f64] {
        &mut self.weights
    }

    /// Weight applied to the constant [`BIAS`] input.
    #[must_use]
    pub fn bias_weight(&self) -> f64 {
        self.weights[self.num_inputs]
    }

    /// Weighted sum of the inputs plus the bias term.
    ///
    /// Reads `inputs[j]` for `j < num_inputs`; missing positions count as `0.0`
    /// and surplus values are ignored.
    #[must_use]
    pub fn net_input(&self, inputs: &[f64]) -> f64 {
        let weighted: f64 = self.weights[..self.num_inputs]
            .iter()
            .zip(inputs)
            .map(|(w, x)| w * x)
            .sum();
        weighted + self.bias_weight() * BIAS
    }

    /// Sigmoid activation of [`Self::net_input`].
    #[must_use]
    pub fn activate(&self, inputs: &[f64]) -> f64 {
        sigmoid(self.net_input(inputs), ACTIVATION_RESPONSE)
    }
}

/// An ordered group of neurons that all read the same input vector.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuronLayer {
    neurons: Vec<Neuron>,
}

impl NeuronLayer {
    /// Creates a layer of `num_neurons` randomly initialised neurons.
    pub fn random<R>(num_neurons: usize, inputs_per_neuron: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let neurons = (0..num_neurons)
            .map(|_| Neuron::random(inputs_per_neuron, rng))
            .collect();
        Self { neurons }
    }

    /// Splits `weights` into consecutive neurons of `inputs_per_neuron + 1`
    /// weights each.
    ///
    /// # Panics
    ///
    /// Panics if `weights.len()` is not a multiple of `inputs_per_neuron + 1`.
    #[must_use]
    pub fn from_weights(inputs_per_neuron: usize, weights: &[f64]) -> Self {
        let chunks = weights.chunks_exact(inputs_per_neuron + 1);
        assert!(
            chunks.remainder().is_empty(),
            "{} weights do not split into neurons of {} weights",
            weights.len(),
            inputs_per_neuron + 1
        );
        let neurons = chunks.map(|w| Neuron::from_weights(w.to_vec())).collect();
        Self { neurons }
    }

    #[must_use]
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub(crate) fn neurons_mut(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    /// Total number of weights held by the neurons of this layer.
    #[must_use]
    pub fn number_of_weights(&self) -> usize {
        self.neurons.iter().map(|n| n.weights().len()).sum()
    }

    /// Computes the activation of every neuron for the given inputs.
    #[must_use]
    pub fn evaluate(&self, inputs: &[f64]) -> Vec<f64> {
        self.neurons.iter().map(|n| n.activate(inputs)).collect()
    }
}
