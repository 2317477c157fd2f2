use log::{debug, info};

use crate::{Result, arch::Model, optimization::GradientDescent};

/// Drives the training of a model over a fixed amount of epochs.
///
/// Each epoch makes a single gradient step over the model's data and then measures its loss.
#[derive(Debug, Clone, Copy)]
pub struct Trainer {
    epochs: usize,
    learning_rate: f64,
    corruption_level: f64,
    lr_decay: f64,
}

impl Trainer {
    /// Returns a new `Trainer`.
    ///
    /// # Arguments
    /// * `epochs` - The amount of gradient steps to take.
    /// * `learning_rate` - The learning rate of the first epoch.
    /// * `corruption_level` - The probability of corrupting each input entry.
    /// * `lr_decay` - The factor the learning rate gets multiplied by after every epoch.
    pub fn new(epochs: usize, learning_rate: f64, corruption_level: f64, lr_decay: f64) -> Self {
        Self {
            epochs,
            learning_rate,
            corruption_level,
            lr_decay,
        }
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    /// Trains the model.
    ///
    /// # Arguments
    /// * `model` - The model to train, it must already hold its data.
    ///
    /// # Returns
    /// The loss measured after every epoch.
    pub fn train<M: Model>(&self, model: &mut M) -> Result<Vec<f64>> {
        info!(
            epochs = self.epochs,
            params = model.size(),
            corruption_level = self.corruption_level;
            "training started"
        );

        let mut losses = Vec::with_capacity(self.epochs);
        let mut learning_rate = self.learning_rate;

        for epoch in 0..self.epochs {
            let mut optimizer = GradientDescent::new(learning_rate);
            model.backprop(&mut optimizer, self.corruption_level)?;

            let loss = model.loss(self.corruption_level)?;
            debug!(epoch = epoch, loss = loss, learning_rate = learning_rate; "epoch finished");

            losses.push(loss);
            learning_rate *= self.lr_decay;
        }

        if let Some(loss) = losses.last() {
            info!(loss = *loss; "training finished");
        }

        Ok(losses)
    }
}
