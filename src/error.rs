use std::{error::Error, fmt, io, path::PathBuf};

use machine_learning::MlErr;

/// The imputer's result type.
pub type Result<T> = std::result::Result<T, ImputerErr>;

/// All errors that can occur while imputing a table.
#[derive(Debug)]
pub enum ImputerErr {
    /// A file could not be read or written.
    Io { path: PathBuf, source: io::Error },
    /// The configuration file is not valid JSON for the expected structure.
    ConfigFormat(serde_json::Error),
    /// The configuration is well formed but its values are not usable.
    InvalidConfig(String),
    /// The CSV has no header line.
    EmptyTable,
    /// A CSV cell is neither a number nor a missing value marker.
    Parse {
        line: usize,
        column: String,
        value: String,
    },
    /// A CSV row has a different amount of cells than the header.
    RaggedRow {
        line: usize,
        got: usize,
        expected: usize,
    },
    /// Two tables, or a table and its data, do not line up.
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// Two tables do not share the same columns.
    ColumnMismatch { got: String, expected: String },
    /// The model failed.
    Ml(MlErr),
}

impl fmt::Display for ImputerErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error on '{}': {source}", path.display()),
            Self::ConfigFormat(e) => write!(f, "invalid config file: {e}"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::EmptyTable => write!(f, "the table has no header"),
            Self::Parse {
                line,
                column,
                value,
            } => write!(f, "line {line}, column '{column}': cannot parse '{value}' as a number"),
            Self::RaggedRow {
                line,
                got,
                expected,
            } => write!(f, "line {line}: expected {expected} cells, got {got}"),
            Self::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(f, "shape mismatch for {what}: got {got}, expected {expected}"),
            Self::ColumnMismatch { got, expected } => {
                write!(f, "column mismatch: got '{got}', expected '{expected}'")
            }
            Self::Ml(e) => write!(f, "model error: {e}"),
        }
    }
}

impl Error for ImputerErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::ConfigFormat(e) => Some(e),
            Self::Ml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MlErr> for ImputerErr {
    fn from(value: MlErr) -> Self {
        Self::Ml(value)
    }
}

impl From<serde_json::Error> for ImputerErr {
    fn from(value: serde_json::Error) -> Self {
        Self::ConfigFormat(value)
    }
}
