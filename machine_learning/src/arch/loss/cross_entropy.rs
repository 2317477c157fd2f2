use ndarray::{Array2, ArrayView2, Axis};

use super::LossFn;

/// Binary cross-entropy loss function, each output unit is taken as a Bernoulli probability.
///
/// The loss is summed over the features of a sample and averaged over the samples.
#[derive(Default, Clone, Copy)]
pub struct CrossEntropy;

impl CrossEntropy {
    /// Returns a new `CrossEntropy`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for CrossEntropy {
    /// Predictions of exactly `0.0` or `1.0` make the logarithm diverge and the result becomes
    /// `inf` or `NaN`, nothing is clamped.
    fn loss(&self, y_pred: ArrayView2<f64>, y: ArrayView2<f64>) -> f64 {
        let mut log_likelihood = y.to_owned();
        log_likelihood.zip_mut_with(&y_pred, |y, &z| {
            *y = *y * z.ln() + (1. - *y) * (1. - z).ln();
        });

        -log_likelihood
            .sum_axis(Axis(1))
            .mean()
            .unwrap_or_default()
    }

    /// Only valid for sigmoid output units, for which the activation derivative cancels out
    /// and the gradient reduces to `y_pred - y`.
    fn loss_prime(&self, y_pred: ArrayView2<f64>, y: ArrayView2<f64>) -> Array2<f64> {
        &y_pred - &y
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn uninformed_prediction_costs_ln2_per_feature() {
        let y = array![[1., 0., 1.], [0., 0., 1.]];
        let y_pred = Array2::from_elem((2, 3), 0.5);

        let loss = CrossEntropy.loss(y_pred.view(), y.view());
        let expected = 3. * 2f64.ln();
        assert!((loss - expected).abs() < 1e-5, "got {loss}, expected {expected}");
    }

    #[test]
    fn better_predictions_cost_less() {
        let y = array![[1., 0.], [0., 1.]];
        let close = array![[0.9, 0.1], [0.1, 0.9]];
        let far = array![[0.6, 0.4], [0.4, 0.6]];

        assert!(CrossEntropy.loss(close.view(), y.view()) < CrossEntropy.loss(far.view(), y.view()));
    }

    #[test]
    fn saturated_wrong_prediction_diverges() {
        let y = array![[1.]];
        let y_pred = array![[0.]];

        assert!(CrossEntropy.loss(y_pred.view(), y.view()).is_infinite());
    }

    #[test]
    fn loss_prime_is_the_residual() {
        let y = array![[1., 0.]];
        let y_pred = array![[0.75, 0.25]];

        let d = CrossEntropy.loss_prime(y_pred.view(), y.view());
        assert_eq!(d, array![[-0.25, 0.25]]);
    }
}
