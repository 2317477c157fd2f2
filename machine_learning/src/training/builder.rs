use ndarray::Array2;
use rand::{SeedableRng, rngs::StdRng};

use super::Trainer;
use crate::{Result, arch::DenoisingAutoencoder};

/// The description of a training run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainerSpec {
    pub n_hidden: usize,
    pub epochs: usize,
    pub learning_rate: f64,
    pub corruption_level: f64,
    pub lr_decay: f64,
    /// `None` seeds the generator from the operating system.
    pub seed: Option<u64>,
}

impl Default for TrainerSpec {
    fn default() -> Self {
        Self {
            n_hidden: 5,
            epochs: 50,
            learning_rate: 0.1,
            corruption_level: 0.3,
            lr_decay: 1.,
            seed: Some(123),
        }
    }
}

/// Builds a model and its `Trainer` given a `TrainerSpec`.
#[derive(Default)]
pub struct TrainerBuilder;

impl TrainerBuilder {
    /// Creates a new `TrainerBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new denoising autoencoder holding `x` as its data, along with the trainer that
    /// follows `spec`.
    ///
    /// # Arguments
    /// * `spec` - The description of the training run.
    /// * `x` - The data to train on, its amount of columns sets the amount of visible units.
    pub fn build(
        &self,
        spec: &TrainerSpec,
        x: Array2<f64>,
    ) -> Result<(DenoisingAutoencoder<StdRng>, Trainer)> {
        let rng = self.generate_rng(spec.seed);
        let model = DenoisingAutoencoder::builder(x.ncols(), spec.n_hidden)
            .input(x)
            .build(rng)?;

        let trainer = Trainer::new(
            spec.epochs,
            spec.learning_rate,
            spec.corruption_level,
            spec.lr_decay,
        );

        Ok((model, trainer))
    }

    fn generate_rng(&self, seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
