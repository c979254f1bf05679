//! Minimal feed-forward neural network trainer
//!
//! This library implements a teaching-scale dense MLP trainer: fully connected
//! layers with ReLU activation, a matrix-based forward pass, and
//! backpropagation with an Adam-style adaptive update embedded in each layer.
//!
//! # Modules
//!
//! - `layers`: DenseLayer with forward/backward propagation
//! - `network`: Network orchestration (layer chaining, training, accuracy)
//! - `dataset`: MNIST IDX dataset loader
//! - `config`: Training configuration structures
//! - `utils`: Shared utilities (RNG, matrix primitives, activations)
//! - `error`: Crate error type

pub mod config;
pub mod dataset;
pub mod error;
pub mod layers;
pub mod network;
pub mod utils;

pub use error::{Error, Result};
