//! Crate error type
//!
//! Training is deterministic per call given fixed inputs and RNG seed, so
//! there are no retries or recovery paths: every variant is a fail-fast
//! report of invalid construction parameters, mismatched dimensions, bad
//! input files, or a numeric blow-up during training.

use std::fmt;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by network construction, training, and data loading.
#[derive(Debug)]
pub enum Error {
    /// Invalid layer size sequence or hyperparameters at construction time.
    InvalidArchitecture(String),
    /// A buffer length disagrees with the configured layer dimensions.
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A batch of zero samples was passed to forward or train.
    EmptyBatch,
    /// Backward propagation was requested before any forward pass.
    BackwardBeforeForward,
    /// Predictions contained NaN or infinity (gradient explosion).
    NonFinite { epoch: usize },
    /// Invalid training configuration value.
    Config(String),
    /// Malformed IDX dataset file.
    Dataset(String),
    /// Underlying I/O failure while reading a config or dataset file.
    Io(std::io::Error),
    /// Malformed JSON in a configuration file.
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArchitecture(msg) => write!(f, "invalid architecture: {}", msg),
            Error::DimensionMismatch {
                what,
                expected,
                actual,
            } => write!(
                f,
                "dimension mismatch for {}: expected {}, got {}",
                what, expected, actual
            ),
            Error::EmptyBatch => write!(f, "batch must contain at least one sample"),
            Error::BackwardBeforeForward => {
                write!(f, "backward pass requested before any forward pass")
            }
            Error::NonFinite { epoch } => {
                write!(f, "non-finite prediction at epoch {}", epoch)
            }
            Error::Config(msg) => write!(f, "invalid configuration: {}", msg),
            Error::Dataset(msg) => write!(f, "invalid dataset: {}", msg),
            Error::Io(err) => write!(f, "i/o error: {}", err),
            Error::Json(err) => write!(f, "json error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
