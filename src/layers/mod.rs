//! Layer implementations
//!
//! The trainer uses a single layer type: a fully connected layer with ReLU
//! activation and an embedded adaptive parameter update.

pub mod dense;

pub use dense::DenseLayer;
