mod builder;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::{Rng, SeedableRng, rngs::StdRng};

pub use builder::AutoencoderBuilder;

use super::{
    Model,
    activations::Sigmoid,
    loss::{CrossEntropy, LossFn},
    noise::MaskingNoise,
};
use crate::{
    MlErr, Result,
    optimization::{GradientDescent, Optimizer},
};

/// The seed used when no random number generator is given.
pub const DEFAULT_SEED: u64 = 1234;

/// A denoising autoencoder with a single hidden layer and tied weights.
///
/// The encoder maps the visible units to the hidden ones through `W` and the decoder maps them
/// back through the transpose of that same `W`, there is no second weight matrix. The model
/// owns its random number generator which is used both for initializing the weights and for
/// every corruption mask.
///
/// Training mutates the model through `&mut self`, so a single instance is never trained from
/// more than one thread at a time. Independent models, each with its own generator, can be
/// trained in parallel.
pub struct DenoisingAutoencoder<R: Rng = StdRng> {
    n_visible: usize,
    n_hidden: usize,
    w: Array2<f64>,
    hidden_bias: Array1<f64>,
    visible_bias: Array1<f64>,
    rng: R,
    x: Option<Array2<f64>>,
}

/// The intermediate values of a forward pass over a corrupted input.
struct CorruptedPass {
    tilde_x: Array2<f64>,
    y: Array2<f64>,
    z: Array2<f64>,
}

impl DenoisingAutoencoder<StdRng> {
    /// Creates a new `DenoisingAutoencoder` with randomly initialized weights, zeroed biases and
    /// a generator seeded with `DEFAULT_SEED`.
    pub fn new(n_visible: usize, n_hidden: usize) -> Result<Self> {
        Self::seeded(n_visible, n_hidden, DEFAULT_SEED)
    }

    /// Creates a new `DenoisingAutoencoder` whose generator is seeded with `seed`.
    pub fn seeded(n_visible: usize, n_hidden: usize, seed: u64) -> Result<Self> {
        Self::builder(n_visible, n_hidden).build(StdRng::seed_from_u64(seed))
    }

    /// Returns a builder for a model of `n_visible` inputs and `n_hidden` hidden units.
    pub fn builder(n_visible: usize, n_hidden: usize) -> AutoencoderBuilder {
        AutoencoderBuilder::new(n_visible, n_hidden)
    }
}

impl<R: Rng> DenoisingAutoencoder<R> {
    /// The amount of visible (input) units.
    pub fn n_visible(&self) -> usize {
        self.n_visible
    }

    /// The amount of hidden units.
    pub fn n_hidden(&self) -> usize {
        self.n_hidden
    }

    /// The encoding weights, shaped `(n_visible, n_hidden)`.
    pub fn weights(&self) -> ArrayView2<'_, f64> {
        self.w.view()
    }

    /// The decoding weights, a live transposed view of `weights`.
    pub fn decode_weights(&self) -> ArrayView2<'_, f64> {
        self.w.t()
    }

    pub fn hidden_bias(&self) -> ArrayView1<'_, f64> {
        self.hidden_bias.view()
    }

    pub fn visible_bias(&self) -> ArrayView1<'_, f64> {
        self.visible_bias.view()
    }

    /// The data the model trains on when no explicit input is given.
    pub fn input(&self) -> Option<ArrayView2<'_, f64>> {
        self.x.as_ref().map(|x| x.view())
    }

    /// Replaces the stored input.
    ///
    /// # Returns
    /// An error if the amount of columns of `x` is not `n_visible`.
    pub fn set_input(&mut self, x: Array2<f64>) -> Result<()> {
        check_width("input", x.ncols(), self.n_visible)?;
        self.x = Some(x);
        Ok(())
    }

    /// Corrupts the input with masking noise, each entry is kept with probability
    /// `1 - corruption_level` and zeroed otherwise.
    ///
    /// # Arguments
    /// * `input` - The data to corrupt, of any shape.
    /// * `corruption_level` - The probability of zeroing each entry.
    ///
    /// # Returns
    /// The corrupted copy of `input` or an error if `corruption_level` is not in `[0, 1)`.
    pub fn get_corrupted_input(
        &mut self,
        input: ArrayView2<f64>,
        corruption_level: f64,
    ) -> Result<Array2<f64>> {
        let noise = MaskingNoise::new(corruption_level)?;
        Ok(noise.apply(&mut self.rng, input))
    }

    /// Encodes the input, computing `sigmoid(input · W + hidden_bias)` for every row.
    pub fn get_hidden_values(&self, input: ArrayView2<f64>) -> Result<Array2<f64>> {
        check_width("input", input.ncols(), self.n_visible)?;

        let mut y = input.dot(&self.w);
        y += &self.hidden_bias;
        y.mapv_inplace(Sigmoid::f);
        Ok(y)
    }

    /// Decodes the hidden values, computing `sigmoid(hidden · Wᵀ + visible_bias)` for every row.
    pub fn get_reconstructed_input(&self, hidden: ArrayView2<f64>) -> Result<Array2<f64>> {
        check_width("hidden values", hidden.ncols(), self.n_hidden)?;

        let mut z = hidden.dot(&self.decode_weights());
        z += &self.visible_bias;
        z.mapv_inplace(Sigmoid::f);
        Ok(z)
    }

    /// Runs one full batch gradient step over the stored input.
    ///
    /// # Arguments
    /// * `learning_rate` - The length of the step.
    /// * `corruption_level` - The probability of zeroing each input entry before encoding.
    /// * `input` - If given, it replaces the stored input before the step.
    pub fn train(
        &mut self,
        learning_rate: f64,
        corruption_level: f64,
        input: Option<Array2<f64>>,
    ) -> Result<()> {
        if let Some(input) = input {
            self.set_input(input)?;
        }

        self.backprop(&mut GradientDescent::new(learning_rate), corruption_level)
    }

    /// Computes the mean over samples of the binary cross-entropy between the stored input and
    /// its reconstruction from a freshly corrupted copy.
    ///
    /// Reconstructions of exactly `0.0` or `1.0` make the result `inf` or `NaN`.
    pub fn negative_log_likelihood(&mut self, corruption_level: f64) -> Result<f64> {
        self.loss(corruption_level)
    }

    /// Encodes and decodes the input without corrupting it.
    pub fn reconstruct(&self, input: ArrayView2<f64>) -> Result<Array2<f64>> {
        let y = self.get_hidden_values(input)?;
        self.get_reconstructed_input(y.view())
    }

    fn corrupted_pass(&mut self, corruption_level: f64) -> Result<CorruptedPass> {
        let noise = MaskingNoise::new(corruption_level)?;
        let x = stored_input(&self.x)?;

        let tilde_x = noise.apply(&mut self.rng, x.view());
        let y = self.get_hidden_values(tilde_x.view())?;
        let z = self.get_reconstructed_input(y.view())?;

        Ok(CorruptedPass { tilde_x, y, z })
    }
}

impl<R: Rng> Model for DenoisingAutoencoder<R> {
    fn size(&self) -> usize {
        self.w.len() + self.hidden_bias.len() + self.visible_bias.len()
    }

    // NOTE: the weight gradient is summed over the samples while the bias gradients are
    // averaged, changing either scaling changes the learning dynamics.
    fn backprop<O: Optimizer>(&mut self, optimizer: &mut O, corruption_level: f64) -> Result<()> {
        let CorruptedPass { tilde_x, y, z } = self.corrupted_pass(corruption_level)?;
        let x = stored_input(&self.x)?;

        // the error is measured against the clean input
        let d_visible = CrossEntropy.loss_prime(z.view(), x.view());
        let mut d_hidden = d_visible.dot(&self.w);
        d_hidden.zip_mut_with(&y, |d, &y| *d *= Sigmoid::df_from_output(y));

        let mut grad_w = tilde_x.t().dot(&d_hidden);
        grad_w += &d_visible.t().dot(&y);

        let grad_hidden_bias = d_hidden.mean_axis(Axis(0)).ok_or(MlErr::EmptyInput)?;
        let grad_visible_bias = d_visible.mean_axis(Axis(0)).ok_or(MlErr::EmptyInput)?;

        optimizer.update_params(self.w.view_mut(), grad_w.view());
        optimizer.update_params(self.hidden_bias.view_mut(), grad_hidden_bias.view());
        optimizer.update_params(self.visible_bias.view_mut(), grad_visible_bias.view());

        Ok(())
    }

    fn loss(&mut self, corruption_level: f64) -> Result<f64> {
        let CorruptedPass { z, .. } = self.corrupted_pass(corruption_level)?;
        let x = stored_input(&self.x)?;

        Ok(CrossEntropy.loss(z.view(), x.view()))
    }
}

fn check_width(what: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(MlErr::SizeMismatch {
            what,
            got,
            expected,
        });
    }

    Ok(())
}

fn stored_input(x: &Option<Array2<f64>>) -> Result<&Array2<f64>> {
    match x {
        Some(x) if x.nrows() == 0 => Err(MlErr::EmptyInput),
        Some(x) => Ok(x),
        None => Err(MlErr::MissingInput),
    }
}
