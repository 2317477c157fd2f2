use ndarray::{ArrayView, ArrayViewMut, Dimension};

pub trait Optimizer {
    /// Updates `params` in place given the gradient of the loss with respect to them.
    fn update_params<D: Dimension>(&mut self, params: ArrayViewMut<f64, D>, grad: ArrayView<f64, D>);
}
