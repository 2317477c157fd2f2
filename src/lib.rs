//! Imputation of missing values in numeric tables with a denoising autoencoder.
//!
//! The model itself lives in the `machine_learning` crate, this crate reads and writes the
//! tables, wires the model into an imputation and scores the result.

pub mod config;
pub mod error;
pub mod imputation;
pub mod table;

pub use config::ImputerConfig;
pub use error::{ImputerErr, Result};
pub use imputation::{evaluate, impute, run, Imputation, ImputationReport, RunOutcome};
pub use table::Table;
