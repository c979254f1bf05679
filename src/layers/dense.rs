//! Dense (fully connected) layer implementation
//!
//! This module provides a DenseLayer performing `output = ReLU(input x W + b)`
//! on flat row-major buffers, together with the backward pass that updates the
//! layer's own parameters and returns the gradient with respect to its input.
//!
//! The parameter update recomputes bias-corrected first and second moment
//! estimates from the single current gradient sample on every call, then
//! subtracts both the plain gradient-descent term and the adaptive term.
//! Unlike textbook Adam there is no persistent moment state across calls;
//! this reproduces the reference behavior exactly and is not a drop-in
//! replacement for a persistent-moment optimizer.

use log::debug;

use crate::error::{Error, Result};
use crate::utils::matrix::{add_broadcast, multiply, sum_columns, transpose};
use crate::utils::relu_inplace;
use crate::utils::rng::SimpleRng;

const EPSILON: f32 = 1.0e-8;
const BETA1: f32 = 0.9;
const BETA2: f32 = 0.999;

/// Dense layer with weights, biases, and the cached buffers of the most
/// recent forward pass.
///
/// The weight matrix is `input_size x output_size` in row-major order; biases
/// hold one value per output column. `last_input`, `last_output`, and
/// `batch_size` are overwritten by each call to [`DenseLayer::forward`] and
/// consumed by the following [`DenseLayer::backward`]: a backward call must be
/// preceded by a forward call on the same layer with the same batch size.
pub struct DenseLayer {
    input_size: usize,
    output_size: usize,
    weights: Vec<f32>,
    biases: Vec<f32>,
    last_input: Vec<f32>,
    last_output: Vec<f32>,
    batch_size: usize,
}

impl DenseLayer {
    /// Create a new DenseLayer with He initialization.
    ///
    /// Weights are drawn independently from a normal distribution with mean 0
    /// and standard deviation sqrt(2 / input_size); biases start at zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArchitecture`] if either size is zero.
    pub fn new(input_size: usize, output_size: usize, rng: &mut SimpleRng) -> Result<Self> {
        if input_size == 0 || output_size == 0 {
            return Err(Error::InvalidArchitecture(format!(
                "layer sizes must be positive, got {} x {}",
                input_size, output_size
            )));
        }

        let sd = (2.0f32 / input_size as f32).sqrt();
        let weights = (0..input_size * output_size)
            .map(|_| rng.next_normal_f32(0.0, sd))
            .collect();

        debug!(
            "initialized dense layer {} -> {} (sd {:.6})",
            input_size, output_size, sd
        );

        Ok(Self {
            input_size,
            output_size,
            weights,
            biases: vec![0.0f32; output_size],
            last_input: Vec::new(),
            last_output: Vec::new(),
            batch_size: 0,
        })
    }

    /// Forward propagation: `output = ReLU(input x W + b)`.
    ///
    /// The input is copied and retained along with the computed output,
    /// replacing any previously retained buffers; the backward pass depends on
    /// both. Returns a view of the retained output, suitable for feeding
    /// directly into the next layer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `input` is not
    /// `batch_size * input_size` long, or [`Error::EmptyBatch`] for an empty
    /// batch.
    pub fn forward(&mut self, input: &[f32], batch_size: usize) -> Result<&[f32]> {
        if batch_size == 0 {
            return Err(Error::EmptyBatch);
        }
        if input.len() != batch_size * self.input_size {
            return Err(Error::DimensionMismatch {
                what: "input matrix",
                expected: batch_size * self.input_size,
                actual: input.len(),
            });
        }

        let mut output = multiply(input, &self.weights, batch_size, self.input_size, self.output_size);
        add_broadcast(&mut output, &self.biases);
        relu_inplace(&mut output);

        self.last_input = input.to_vec();
        self.last_output = output;
        self.batch_size = batch_size;
        Ok(&self.last_output)
    }

    /// Backward propagation: update parameters and return the input gradient.
    ///
    /// Steps, in strict order:
    ///
    /// 1. Mask `y_err` through the ReLU derivative of the retained output
    ///    (entries where the output was <= 0 are zeroed).
    /// 2. Compute `dW = last_input^T x y_err` and `db = column sums of y_err`.
    /// 3. Apply the adaptive update to every weight and bias independently.
    /// 4. Compute `x_err = y_err x W^T` using the already-updated weights.
    ///
    /// The error matrix is consumed; the caller owns the returned input
    /// gradient.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackwardBeforeForward`] if no forward pass has run,
    /// or [`Error::DimensionMismatch`] if `y_err` does not match the retained
    /// batch.
    pub fn backward(&mut self, mut y_err: Vec<f32>, learning_rate: f32, t: usize) -> Result<Vec<f32>> {
        if self.batch_size == 0 {
            return Err(Error::BackwardBeforeForward);
        }
        if y_err.len() != self.batch_size * self.output_size {
            return Err(Error::DimensionMismatch {
                what: "output error matrix",
                expected: self.batch_size * self.output_size,
                actual: y_err.len(),
            });
        }

        // The retained buffers are consumed exactly once; another backward
        // call requires a fresh forward pass.
        let last_input = std::mem::take(&mut self.last_input);
        let last_output = std::mem::take(&mut self.last_output);
        let batch_size = self.batch_size;
        self.batch_size = 0;

        // ReLU gradient gating: strict `> 0` test, ties at zero are masked.
        for (err, &out) in y_err.iter_mut().zip(last_output.iter()) {
            if out <= 0.0 {
                *err = 0.0;
            }
        }

        let input_t = transpose(&last_input, batch_size, self.input_size);
        let dw = multiply(&input_t, &y_err, self.input_size, batch_size, self.output_size);
        let db = sum_columns(&y_err, batch_size, self.output_size);

        adaptive_update(&mut self.weights, &dw, learning_rate, t);
        adaptive_update(&mut self.biases, &db, learning_rate, t);

        // Input gradient uses the weights as updated above.
        let weights_t = transpose(&self.weights, self.input_size, self.output_size);
        let x_err = multiply(&y_err, &weights_t, batch_size, self.output_size, self.input_size);
        Ok(x_err)
    }

    /// View of the output retained by the most recent forward pass.
    pub fn output(&self) -> &[f32] {
        &self.last_output
    }

    /// Get the input size of the layer.
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Get the output size of the layer.
    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Get the number of trainable parameters.
    pub fn parameter_count(&self) -> usize {
        self.weights.len() + self.biases.len()
    }

    /// Weight matrix, row-major `input_size x output_size`.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Mutable weight matrix, for forcing known values in tests.
    pub fn weights_mut(&mut self) -> &mut [f32] {
        &mut self.weights
    }

    /// Bias vector, one value per output column.
    pub fn biases(&self) -> &[f32] {
        &self.biases
    }

    /// Mutable bias vector.
    pub fn biases_mut(&mut self) -> &mut [f32] {
        &mut self.biases
    }
}

/// Per-parameter update with moment estimates recomputed from the single
/// current gradient sample.
///
/// Subtracts the plain gradient-descent term, then the bias-corrected
/// adaptive term. A zero gradient leaves the parameter untouched.
fn adaptive_update(parameters: &mut [f32], gradients: &[f32], learning_rate: f32, t: usize) {
    let beta1_t = BETA1.powi(t as i32);
    let beta2_t = BETA2.powi(t as i32);

    for (param, &g) in parameters.iter_mut().zip(gradients.iter()) {
        *param -= g * learning_rate;

        let m = (1.0 - BETA1) * g;
        let v = (1.0 - BETA2) * g * g;
        let m_hat = m / (1.0 - beta1_t);
        let v_hat = v / (1.0 - beta2_t);
        *param -= learning_rate * m_hat / (v_hat.sqrt() + EPSILON);
    }
}
