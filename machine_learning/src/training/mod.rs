mod builder;
mod trainer;

pub use builder::{TrainerBuilder, TrainerSpec};
pub use trainer::Trainer;
