pub mod activations;
mod autoencoder;
pub mod init;
pub mod loss;
mod model;
pub mod noise;

pub use autoencoder::{AutoencoderBuilder, DEFAULT_SEED, DenoisingAutoencoder};
pub use model::Model;
