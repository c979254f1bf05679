//! Shared utilities for the trainer
//!
//! This module provides the seedable random number generator, the flat
//! row-major matrix primitives, and the ReLU activation helper used by the
//! dense layers.

pub mod activations;
pub mod matrix;
pub mod rng;

pub use activations::relu_inplace;
pub use rng::SimpleRng;
