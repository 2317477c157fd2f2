use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum MlErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    InvalidDimension {
        what: &'static str,
    },
    InvalidCorruptionLevel(f64),
    InvalidInit(String),
    MissingInput,
    EmptyInput,
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch for {what}, got {got} and expected {expected}"
            ),
            MlErr::InvalidDimension { what } => {
                write!(f, "The {what} dimension must be greater than zero")
            }
            MlErr::InvalidCorruptionLevel(level) => write!(
                f,
                "The corruption level must lie in [0, 1), got {level}"
            ),
            MlErr::InvalidInit(msg) => write!(f, "Invalid parameter initialization: {msg}"),
            MlErr::MissingInput => {
                write!(f, "There is no input to train on, none was given nor stored")
            }
            MlErr::EmptyInput => write!(f, "The input has no samples"),
        }
    }
}

impl Error for MlErr {}
