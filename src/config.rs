use std::{fs, path::Path, path::PathBuf};

use machine_learning::training::TrainerSpec;
use serde::Deserialize;

use crate::{ImputerErr, Result};

fn default_n_hidden() -> usize {
    TrainerSpec::default().n_hidden
}

fn default_epochs() -> usize {
    TrainerSpec::default().epochs
}

fn default_learning_rate() -> f64 {
    TrainerSpec::default().learning_rate
}

fn default_corruption_level() -> f64 {
    TrainerSpec::default().corruption_level
}

fn default_lr_decay() -> f64 {
    TrainerSpec::default().lr_decay
}

fn default_seed() -> Option<u64> {
    TrainerSpec::default().seed
}

/// The configuration of an imputation run, read from a JSON file.
///
/// Only `input` is required. A `null` seed draws the generator from the operating system.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImputerConfig {
    /// The CSV table with missing cells.
    pub input: PathBuf,
    /// Where to write the imputed table.
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// A complete version of `input` to score the imputation against.
    #[serde(default)]
    pub reference: Option<PathBuf>,
    #[serde(default = "default_n_hidden")]
    pub n_hidden: usize,
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default = "default_corruption_level")]
    pub corruption_level: f64,
    #[serde(default = "default_lr_decay")]
    pub lr_decay: f64,
    #[serde(default = "default_seed")]
    pub seed: Option<u64>,
}

impl ImputerConfig {
    /// Creates a configuration for `input` with every other field set to its default.
    pub fn new<P: Into<PathBuf>>(input: P) -> Self {
        let spec = TrainerSpec::default();

        Self {
            input: input.into(),
            output: None,
            reference: None,
            n_hidden: spec.n_hidden,
            epochs: spec.epochs,
            learning_rate: spec.learning_rate,
            corruption_level: spec.corruption_level,
            lr_decay: spec.lr_decay,
            seed: spec.seed,
        }
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ImputerErr::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&content)
    }

    /// Checks that the training parameters are usable.
    pub fn validate(&self) -> Result<()> {
        if self.n_hidden == 0 {
            return invalid("n_hidden must be greater than zero".into());
        }

        if !(0. ..1.).contains(&self.corruption_level) {
            return invalid(format!(
                "corruption_level must lie in [0, 1), got {}",
                self.corruption_level
            ));
        }

        if !self.learning_rate.is_finite() || self.learning_rate <= 0. {
            return invalid(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            ));
        }

        if !self.lr_decay.is_finite() || self.lr_decay <= 0. {
            return invalid(format!(
                "lr_decay must be positive, got {}",
                self.lr_decay
            ));
        }

        Ok(())
    }

    /// The training run this configuration describes.
    pub fn spec(&self) -> TrainerSpec {
        TrainerSpec {
            n_hidden: self.n_hidden,
            epochs: self.epochs,
            learning_rate: self.learning_rate,
            corruption_level: self.corruption_level,
            lr_decay: self.lr_decay,
            seed: self.seed,
        }
    }
}

fn invalid(msg: String) -> Result<()> {
    Err(ImputerErr::InvalidConfig(msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_takes_defaults() {
        let config = ImputerConfig::from_json(r#"{ "input": "data.csv" }"#).unwrap();

        assert_eq!(config, ImputerConfig::new("data.csv"));
        assert_eq!(config.spec(), TrainerSpec::default());
        assert_eq!(config.seed, Some(123));
    }

    #[test]
    fn null_seed_means_entropy() {
        let config =
            ImputerConfig::from_json(r#"{ "input": "data.csv", "seed": null }"#).unwrap();

        assert_eq!(config.seed, None);
    }

    #[test]
    fn every_field_is_read() {
        let config = ImputerConfig::from_json(
            r#"{
                "input": "in.csv",
                "output": "out.csv",
                "reference": "full.csv",
                "n_hidden": 3,
                "epochs": 10,
                "learning_rate": 0.5,
                "corruption_level": 0.1,
                "lr_decay": 0.95,
                "seed": 7
            }"#,
        )
        .unwrap();

        assert_eq!(config.output, Some(PathBuf::from("out.csv")));
        assert_eq!(config.reference, Some(PathBuf::from("full.csv")));
        assert_eq!(
            config.spec(),
            TrainerSpec {
                n_hidden: 3,
                epochs: 10,
                learning_rate: 0.5,
                corruption_level: 0.1,
                lr_decay: 0.95,
                seed: Some(7),
            }
        );
    }

    #[test]
    fn missing_input_is_a_format_error() {
        assert!(matches!(
            ImputerConfig::from_json(r#"{ "epochs": 3 }"#),
            Err(ImputerErr::ConfigFormat(_))
        ));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            ImputerConfig::from_json(r#"{ "input": "a.csv", "epoch": 3 }"#),
            Err(ImputerErr::ConfigFormat(_))
        ));
    }

    #[test]
    fn unusable_values_are_rejected() {
        let cases = [
            r#"{ "input": "a.csv", "n_hidden": 0 }"#,
            r#"{ "input": "a.csv", "corruption_level": 1.0 }"#,
            r#"{ "input": "a.csv", "corruption_level": -0.1 }"#,
            r#"{ "input": "a.csv", "learning_rate": 0.0 }"#,
            r#"{ "input": "a.csv", "lr_decay": -1.0 }"#,
        ];

        for case in cases {
            assert!(
                matches!(
                    ImputerConfig::from_json(case),
                    Err(ImputerErr::InvalidConfig(_))
                ),
                "{case} should be rejected"
            );
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ImputerConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ImputerErr::Io { .. }));
    }
}
