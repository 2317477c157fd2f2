use ndarray::{Array2, ArrayView2};
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::Bernoulli;

use crate::{MlErr, Result};

/// Masking noise: every entry of the input is independently zeroed with probability `level`.
#[derive(Debug, Clone, Copy)]
pub struct MaskingNoise {
    keep: Bernoulli,
}

impl MaskingNoise {
    /// Creates a new `MaskingNoise`.
    ///
    /// # Arguments
    /// * `level` - The probability of zeroing each entry.
    ///
    /// # Returns
    /// An error if `level` is not in `[0, 1)`.
    pub fn new(level: f64) -> Result<Self> {
        if !(level < 1.) {
            return Err(MlErr::InvalidCorruptionLevel(level));
        }

        let keep = Bernoulli::new(1. - level)
            .map_err(|_| MlErr::InvalidCorruptionLevel(level))?;

        Ok(Self { keep })
    }

    /// Corrupts the input, drawing one Bernoulli trial per entry from `rng`.
    ///
    /// # Arguments
    /// * `rng` - The random number generator to draw the mask from.
    /// * `input` - The data to corrupt.
    ///
    /// # Returns
    /// A new matrix with the same shape as `input`.
    pub fn apply<R: Rng>(&self, rng: &mut R, input: ArrayView2<f64>) -> Array2<f64> {
        let mask: Array2<bool> = Array2::random_using(input.raw_dim(), self.keep, rng);

        let mut corrupted = input.to_owned();
        corrupted.zip_mut_with(&mask, |x, &keep| *x *= keep as u8 as f64);
        corrupted
    }
}
