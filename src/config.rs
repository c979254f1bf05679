//! Configuration structures for training
//!
//! This module provides the training configuration parsed from a JSON file:
//! hidden layer sizes, optimizer hyperparameters, epoch count, RNG seed, and
//! dataset paths. Input and output sizes are not configured here; the driver
//! takes them from the loaded dataset.
//!
//! # Example
//!
//! ```json
//! {
//!   "hidden_sizes": [80, 40],
//!   "learning_rate": 0.001,
//!   "decay": 0.001,
//!   "epochs": 100,
//!   "seed": 1,
//!   "images_path": "data/train-images-idx3-ubyte",
//!   "labels_path": "data/train-labels-idx1-ubyte"
//! }
//! ```

use serde::Deserialize;
use std::fs;

use crate::error::{Error, Result};

fn default_learning_rate() -> f32 {
    0.001
}

fn default_decay() -> f32 {
    0.001
}

fn default_seed() -> u64 {
    1
}

/// Training configuration for the MNIST driver.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingConfig {
    /// Sizes of the hidden layers, in order. May be empty for a single-layer
    /// network mapping inputs directly to outputs.
    pub hidden_sizes: Vec<usize>,

    /// Base learning rate before inverse time decay.
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f32,

    /// Inverse time decay rate applied per epoch.
    #[serde(default = "default_decay")]
    pub decay: f32,

    /// Number of whole-dataset training calls to run.
    pub epochs: usize,

    /// Seed for the weight initialization RNG.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Path to the IDX image file.
    pub images_path: String,

    /// Path to the IDX label file.
    pub labels_path: String,
}

/// Loads a training configuration from a JSON file.
///
/// Reads the file at `path`, deserializes it, and validates the values with
/// the same rules network construction applies.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, a JSON error if it does
/// not parse, or [`Error::Config`] if a value is out of range.
pub fn load_config(path: &str) -> Result<TrainingConfig> {
    let contents = fs::read_to_string(path)?;
    let config: TrainingConfig = serde_json::from_str(&contents)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &TrainingConfig) -> Result<()> {
    if config.hidden_sizes.iter().any(|&s| s == 0) {
        return Err(Error::Config(
            "hidden layer sizes must be positive".to_string(),
        ));
    }

    if !(config.learning_rate.is_finite() && config.learning_rate > 0.0) {
        return Err(Error::Config(format!(
            "learning_rate must be positive and finite, got {}",
            config.learning_rate
        )));
    }

    if !(config.decay.is_finite() && config.decay >= 0.0) {
        return Err(Error::Config(format!(
            "decay must be non-negative and finite, got {}",
            config.decay
        )));
    }

    if config.epochs == 0 {
        return Err(Error::Config("epochs must be positive".to_string()));
    }

    if config.images_path.is_empty() || config.labels_path.is_empty() {
        return Err(Error::Config("dataset paths must not be empty".to_string()));
    }

    Ok(())
}
