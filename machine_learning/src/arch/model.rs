use crate::{Result, optimization::Optimizer};

pub trait Model {
    /// Returns the amount of parameters in the model.
    fn size(&self) -> usize;

    /// Makes one full pass over the model's current data, computing the gradient of the loss
    /// with respect to every parameter. **The parameters get updated** according to the
    /// optimization algorithm.
    ///
    /// # Arguments
    /// * `optimizer` - The optimizer that dictates how to update the parameters.
    /// * `corruption_level` - The probability of corrupting each input entry during the pass.
    fn backprop<O: Optimizer>(&mut self, optimizer: &mut O, corruption_level: f64) -> Result<()>;

    /// Evaluates the loss over the model's current data without updating any parameter.
    ///
    /// # Arguments
    /// * `corruption_level` - The probability of corrupting each input entry before evaluating.
    fn loss(&mut self, corruption_level: f64) -> Result<f64>;
}
