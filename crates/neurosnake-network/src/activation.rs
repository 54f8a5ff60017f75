/// Constant input fed to every neuron's bias weight.
pub const BIAS: f64 = -1.0;

/// Divisor applied to the net input before the logistic function.
///
/// Larger values flatten the curve; `1.0` is the standard logistic sigmoid.
pub const ACTIVATION_RESPONSE: f64 = 1.0;

/// Logistic activation `1 / (1 + e^(-x / response))`.
///
/// # Examples
///
/// ```
/// use neurosnake_network::sigmoid;
///
/// assert_eq!(sigmoid(0.0, 1.0), 0.5);
/// assert!(sigmoid(10.0, 1.0) > 0.99);
/// assert!(sigmoid(-10.0, 1.0) < 0.01);
/// ```
#[must_use]
pub fn sigmoid(net_input: f64, response: f64) -> f64 {
    1.0 / (1.0 + (-net_input / response).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_is_symmetric() {
        for x in [0.1, 0.5, 1.0, 3.0] {
            let sum = sigmoid(x, ACTIVATION_RESPONSE) + sigmoid(-x, ACTIVATION_RESPONSE);
            assert!((sum - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_response_flattens_curve() {
        let steep = sigmoid(1.0, 1.0);
        let flat = sigmoid(1.0, 4.0);
        assert!(flat < steep);
        assert!(flat > 0.5);
    }
}
