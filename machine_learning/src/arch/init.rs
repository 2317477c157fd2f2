use ndarray::{Array, Dimension, ShapeBuilder};
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::Uniform;

use crate::{MlErr, Result};

/// The way a parameter tensor gets its initial values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamInit {
    /// Every parameter takes the same value.
    Const(f64),

    /// Parameters are sampled uniformly from the inclusive range `[low, high]`.
    Uniform { low: f64, high: f64 },

    /// Parameters are sampled uniformly from `[-a, a]` where `a = 1 / fan_in`, so the initial
    /// magnitude shrinks as the amount of inputs of the layer grows.
    FanIn { fan_in: usize },
}

impl ParamInit {
    /// Samples a new parameter tensor.
    ///
    /// # Arguments
    /// * `rng` - The random number generator to draw from, it's left untouched by `Const`.
    /// * `shape` - The shape of the resulting tensor.
    ///
    /// # Returns
    /// The initialized tensor or an error if the scheme is invalid (`low > high`, non finite
    /// bounds or a zero `fan_in`).
    pub fn sample<R, Sh, D>(&self, rng: &mut R, shape: Sh) -> Result<Array<f64, D>>
    where
        R: Rng,
        Sh: ShapeBuilder<Dim = D>,
        D: Dimension,
    {
        let (low, high) = match *self {
            ParamInit::Const(value) => return Ok(Array::from_elem(shape, value)),
            ParamInit::Uniform { low, high } => (low, high),
            ParamInit::FanIn { fan_in: 0 } => {
                return Err(MlErr::InvalidInit("fan in must be greater than zero".into()));
            }
            ParamInit::FanIn { fan_in } => {
                let a = 1. / fan_in as f64;
                (-a, a)
            }
        };

        let distribution = Uniform::new_inclusive(low, high)
            .map_err(|e| MlErr::InvalidInit(format!("[{low}, {high}]: {e}")))?;

        Ok(Array::random_using(shape, distribution, rng))
    }
}
