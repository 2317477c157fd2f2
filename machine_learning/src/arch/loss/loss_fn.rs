use ndarray::{Array2, ArrayView2};

pub trait LossFn {
    /// Computes the scalar loss of a prediction against its target.
    fn loss(&self, y_pred: ArrayView2<f64>, y: ArrayView2<f64>) -> f64;

    /// Computes the gradient of the loss with respect to the pre-activation of the output layer.
    fn loss_prime(&self, y_pred: ArrayView2<f64>, y: ArrayView2<f64>) -> Array2<f64>;
}
