use ndarray::{Array1, Array2};
use rand::Rng;

use super::{DenoisingAutoencoder, check_width};
use crate::{MlErr, Result, arch::init::ParamInit};

/// Builds `DenoisingAutoencoder`s, any parameter that isn't given gets initialized.
///
/// Missing weights are sampled uniformly from `[-1 / n_visible, 1 / n_visible]` and missing
/// biases start at zero.
#[derive(Debug, Clone)]
pub struct AutoencoderBuilder {
    n_visible: usize,
    n_hidden: usize,
    w: Option<Array2<f64>>,
    hidden_bias: Option<Array1<f64>>,
    visible_bias: Option<Array1<f64>>,
    input: Option<Array2<f64>>,
}

impl AutoencoderBuilder {
    /// Creates a new `AutoencoderBuilder`.
    ///
    /// # Arguments
    /// * `n_visible` - The amount of visible (input) units.
    /// * `n_hidden` - The amount of hidden units.
    pub fn new(n_visible: usize, n_hidden: usize) -> Self {
        Self {
            n_visible,
            n_hidden,
            w: None,
            hidden_bias: None,
            visible_bias: None,
            input: None,
        }
    }

    /// Sets the initial weights, they must be shaped `(n_visible, n_hidden)`.
    pub fn weights(mut self, w: Array2<f64>) -> Self {
        self.w = Some(w);
        self
    }

    pub fn hidden_bias(mut self, hidden_bias: Array1<f64>) -> Self {
        self.hidden_bias = Some(hidden_bias);
        self
    }

    pub fn visible_bias(mut self, visible_bias: Array1<f64>) -> Self {
        self.visible_bias = Some(visible_bias);
        self
    }

    /// Sets the initial data the model trains on, it must have `n_visible` columns.
    pub fn input(mut self, x: Array2<f64>) -> Self {
        self.input = Some(x);
        self
    }

    /// Builds the model.
    ///
    /// # Arguments
    /// * `rng` - The generator the model will own, the weights are drawn from it when missing.
    ///
    /// # Returns
    /// The new model or an error if a dimension is zero or any given parameter or input has
    /// the wrong shape.
    pub fn build<R: Rng>(self, mut rng: R) -> Result<DenoisingAutoencoder<R>> {
        let Self {
            n_visible,
            n_hidden,
            w,
            hidden_bias,
            visible_bias,
            input,
        } = self;

        if n_visible == 0 {
            return Err(MlErr::InvalidDimension { what: "visible" });
        }
        if n_hidden == 0 {
            return Err(MlErr::InvalidDimension { what: "hidden" });
        }

        let w = match w {
            Some(w) => {
                check_width("weight rows", w.nrows(), n_visible)?;
                check_width("weight columns", w.ncols(), n_hidden)?;
                w
            }
            None => ParamInit::FanIn { fan_in: n_visible }.sample(&mut rng, (n_visible, n_hidden))?,
        };

        let hidden_bias = match hidden_bias {
            Some(b) => {
                check_width("hidden bias", b.len(), n_hidden)?;
                b
            }
            None => ParamInit::Const(0.).sample(&mut rng, n_hidden)?,
        };

        let visible_bias = match visible_bias {
            Some(b) => {
                check_width("visible bias", b.len(), n_visible)?;
                b
            }
            None => ParamInit::Const(0.).sample(&mut rng, n_visible)?,
        };

        if let Some(x) = &input {
            check_width("input", x.ncols(), n_visible)?;
        }

        Ok(DenoisingAutoencoder {
            n_visible,
            n_hidden,
            w,
            hidden_bias,
            visible_bias,
            rng,
            x: input,
        })
    }
}
