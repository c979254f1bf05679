//! Network orchestration
//!
//! A Network owns an ordered sequence of dense layers and drives their
//! forward and backward passes. Training computes a scaled error signal from
//! predictions versus one-hot targets, propagates it backward through the
//! layers in reverse order with a shared effective learning rate and
//! optimizer time step, and reports classification accuracy via argmax
//! comparison.

use log::debug;

use crate::error::{Error, Result};
use crate::layers::DenseLayer;
use crate::utils::rng::SimpleRng;

/// Fixed scale factor applied to the prediction-target difference when
/// forming the error signal. A design constant of the reference
/// implementation, reproduced literally.
const ERR_SCALE: f32 = 6.0;

/// Feed-forward network of chained dense layers.
///
/// Layer `i`'s output size equals layer `i + 1`'s input size; this is
/// established once at construction. The epoch counter increments once per
/// completed [`Network::train`] call and doubles as the optimizer time step
/// `t = epoch + 1`, shared by every layer within one training call.
pub struct Network {
    layers: Vec<DenseLayer>,
    learning_rate: f32,
    decay: f32,
    epoch: usize,
}

impl Network {
    /// Build a network chaining consecutive sizes: `sizes[i] -> sizes[i + 1]`
    /// for each of the `sizes.len() - 1` layers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArchitecture`] if fewer than two sizes are
    /// given, any size is zero, the learning rate is not positive and finite,
    /// or the decay is negative or not finite.
    pub fn new(
        sizes: &[usize],
        learning_rate: f32,
        decay: f32,
        rng: &mut SimpleRng,
    ) -> Result<Self> {
        if sizes.len() < 2 {
            return Err(Error::InvalidArchitecture(format!(
                "need at least two layer sizes, got {}",
                sizes.len()
            )));
        }
        if let Some(pos) = sizes.iter().position(|&s| s == 0) {
            return Err(Error::InvalidArchitecture(format!(
                "layer size at index {} must be positive",
                pos
            )));
        }
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(Error::InvalidArchitecture(format!(
                "learning rate must be positive and finite, got {}",
                learning_rate
            )));
        }
        if !(decay.is_finite() && decay >= 0.0) {
            return Err(Error::InvalidArchitecture(format!(
                "decay must be non-negative and finite, got {}",
                decay
            )));
        }

        let mut layers = Vec::with_capacity(sizes.len() - 1);
        for window in sizes.windows(2) {
            layers.push(DenseLayer::new(window[0], window[1], rng)?);
        }

        Ok(Self {
            layers,
            learning_rate,
            decay,
            epoch: 0,
        })
    }

    /// Forward propagation through every layer in sequence.
    ///
    /// The final layer's output is copied into the caller-provided `output`
    /// buffer, which must be `batch_size * output_size` long.
    pub fn forward(&mut self, input: &[f32], batch_size: usize, output: &mut [f32]) -> Result<()> {
        if batch_size == 0 {
            return Err(Error::EmptyBatch);
        }
        let expected = batch_size * self.output_size();
        if output.len() != expected {
            return Err(Error::DimensionMismatch {
                what: "output buffer",
                expected,
                actual: output.len(),
            });
        }

        self.layers[0].forward(input, batch_size)?;
        for i in 1..self.layers.len() {
            let (done, rest) = self.layers.split_at_mut(i);
            rest[0].forward(done[i - 1].output(), batch_size)?;
        }

        output.copy_from_slice(self.layers[self.layers.len() - 1].output());
        Ok(())
    }

    /// Train on one batch of inputs and one-hot targets; returns the fraction
    /// of samples classified correctly, in [0, 1].
    ///
    /// Runs the forward pass, forms the error signal
    /// `err[i] = 6 * (pred[i] - target[i]) / batch_size`, propagates it
    /// backward through the layers in reverse with the current effective
    /// learning rate and time step `t = epoch + 1`, then increments the epoch
    /// counter. Accuracy compares prediction and target argmax per sample.
    ///
    /// # Errors
    ///
    /// Fails fast with [`Error::NonFinite`] if the forward pass produced NaN
    /// or infinite predictions, and with the usual dimension errors if the
    /// buffers disagree with the configured sizes.
    pub fn train(&mut self, input: &[f32], batch_size: usize, targets: &[f32]) -> Result<f32> {
        if batch_size == 0 {
            return Err(Error::EmptyBatch);
        }
        let expected = batch_size * self.output_size();
        if targets.len() != expected {
            return Err(Error::DimensionMismatch {
                what: "target matrix",
                expected,
                actual: targets.len(),
            });
        }

        let mut predictions = vec![0.0f32; expected];
        self.forward(input, batch_size, &mut predictions)?;

        if predictions.iter().any(|p| !p.is_finite()) {
            return Err(Error::NonFinite { epoch: self.epoch });
        }

        let scale = ERR_SCALE / batch_size as f32;
        let mut err: Vec<f32> = predictions
            .iter()
            .zip(targets.iter())
            .map(|(p, t)| scale * (p - t))
            .collect();

        let learning_rate = self.effective_learning_rate();
        let t = self.epoch + 1;
        for layer in self.layers.iter_mut().rev() {
            err = layer.backward(err, learning_rate, t)?;
        }

        self.epoch += 1;

        let acc = accuracy(&predictions, targets, batch_size, self.output_size());
        debug!(
            "epoch {} trained: lr {:.6}, accuracy {:.5}",
            self.epoch, learning_rate, acc
        );
        Ok(acc)
    }

    /// Current learning rate under inverse time decay:
    /// `base / (1 + decay * epoch)`.
    pub fn effective_learning_rate(&self) -> f32 {
        self.learning_rate / (1.0 + self.decay * self.epoch as f32)
    }

    /// Number of completed training calls.
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    /// The ordered layer sequence.
    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    /// Mutable access to the layer sequence, for forcing known parameters in
    /// tests.
    pub fn layers_mut(&mut self) -> &mut [DenseLayer] {
        &mut self.layers
    }

    /// Feature width expected of input samples.
    pub fn input_size(&self) -> usize {
        self.layers[0].input_size()
    }

    /// Width of the final layer's output.
    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].output_size()
    }
}

/// Index of the maximal value; the first strictly greater value wins, so ties
/// resolve to the lowest index.
fn argmax(row: &[f32]) -> usize {
    let mut max = 0;
    for i in 1..row.len() {
        if row[i] > row[max] {
            max = i;
        }
    }
    max
}

/// Fraction of samples whose prediction argmax matches the target argmax.
pub fn accuracy(predictions: &[f32], targets: &[f32], batch_size: usize, output_size: usize) -> f32 {
    let mut correct = 0usize;
    for i in 0..batch_size {
        let row = i * output_size..(i + 1) * output_size;
        if argmax(&predictions[row.clone()]) == argmax(&targets[row]) {
            correct += 1;
        }
    }
    correct as f32 / batch_size as f32
}
