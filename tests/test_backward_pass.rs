//! Backward pass behavior: gradient gating, parameter updates, and the
//! update-then-propagate ordering.

use mlp_trainer::error::Error;
use mlp_trainer::layers::DenseLayer;
use mlp_trainer::utils::SimpleRng;

const EPSILON: f32 = 1e-4;

#[test]
fn test_zero_error_leaves_parameters_unchanged() {
    let mut rng = SimpleRng::new(42);
    let mut layer = DenseLayer::new(3, 2, &mut rng).unwrap();

    let weights_before = layer.weights().to_vec();
    let biases_before = layer.biases().to_vec();

    layer.forward(&[0.5, 0.25, 0.75], 1).unwrap();
    let x_err = layer.backward(vec![0.0, 0.0], 0.01, 1).unwrap();

    assert_eq!(layer.weights(), weights_before.as_slice());
    assert_eq!(layer.biases(), biases_before.as_slice());
    assert!(x_err.iter().all(|&v| v == 0.0));
}

#[test]
fn test_relu_gating_masks_inactive_outputs() {
    let mut rng = SimpleRng::new(42);
    let mut layer = DenseLayer::new(1, 2, &mut rng).unwrap();

    // Input 2.0 produces outputs [2, 0]: the second unit is clipped by ReLU.
    layer.weights_mut().copy_from_slice(&[1.0, -1.0]);
    layer.forward(&[2.0], 1).unwrap();

    let weights_before = layer.weights().to_vec();
    layer.backward(vec![5.0, 7.0], 0.01, 1).unwrap();

    // The masked unit received a zero gradient, so its weight is untouched.
    assert_eq!(layer.weights()[1], weights_before[1]);
    // The active unit's weight moved.
    assert!(layer.weights()[0] != weights_before[0]);
}

#[test]
fn test_input_error_uses_post_update_weights() {
    let mut rng = SimpleRng::new(42);
    let mut layer = DenseLayer::new(1, 2, &mut rng).unwrap();

    layer.weights_mut().copy_from_slice(&[1.0, -1.0]);
    layer.forward(&[2.0], 1).unwrap();

    let learning_rate = 0.01f32;
    let x_err = layer.backward(vec![5.0, 7.0], learning_rate, 1).unwrap();

    // Gated error is [5, 0]; dW = x^T * err = [10, 0]. At t = 1 the adaptive
    // term reduces to lr * g / (|g| + eps), so the active weight becomes
    // 1 - 0.01 * 10 - 0.01 = 0.89. The returned gradient must be computed
    // from that updated weight, not the original 1.0.
    let expected_weight = 1.0 - learning_rate * 10.0 - learning_rate;
    assert!((layer.weights()[0] - expected_weight).abs() < EPSILON);

    let expected_x_err = 5.0 * expected_weight;
    assert!(
        (x_err[0] - expected_x_err).abs() < 1e-3,
        "input error {} should use post-update weight (expected {})",
        x_err[0],
        expected_x_err
    );
}

#[test]
fn test_bias_gradient_is_column_sum() {
    let mut rng = SimpleRng::new(42);
    let mut layer = DenseLayer::new(1, 2, &mut rng).unwrap();

    // Weights chosen so every output is positive for positive inputs.
    layer.weights_mut().copy_from_slice(&[1.0, 1.0]);

    let learning_rate = 0.001f32;
    layer.forward(&[1.0, 1.0, 1.0], 3).unwrap();
    layer
        .backward(vec![0.5, 0.25, 0.5, 0.25, 0.5, 0.25], learning_rate, 1)
        .unwrap();

    // db = column sums = [1.5, 0.75]; biases started at zero.
    let expected_b0 = -(1.5 * learning_rate) - learning_rate;
    let expected_b1 = -(0.75 * learning_rate) - learning_rate;
    assert!((layer.biases()[0] - expected_b0).abs() < EPSILON);
    assert!((layer.biases()[1] - expected_b1).abs() < EPSILON);
}

#[test]
fn test_backward_consumes_retained_buffers() {
    let mut rng = SimpleRng::new(42);
    let mut layer = DenseLayer::new(2, 2, &mut rng).unwrap();

    layer.forward(&[0.5, 0.5], 1).unwrap();
    layer.backward(vec![0.1, 0.1], 0.01, 1).unwrap();

    let second = layer.backward(vec![0.1, 0.1], 0.01, 2);
    assert!(matches!(second, Err(Error::BackwardBeforeForward)));
}

#[test]
fn test_backward_rejects_mismatched_error_matrix() {
    let mut rng = SimpleRng::new(42);
    let mut layer = DenseLayer::new(2, 3, &mut rng).unwrap();

    layer.forward(&[0.5, 0.5], 1).unwrap();
    let result = layer.backward(vec![0.1, 0.1], 0.01, 1);
    assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
}

#[test]
fn test_gradient_shape_round_trip() {
    let mut rng = SimpleRng::new(9);
    let mut layer = DenseLayer::new(4, 3, &mut rng).unwrap();

    let batch_size = 5;
    layer.forward(&vec![0.5f32; batch_size * 4], batch_size).unwrap();
    let x_err = layer.backward(vec![0.1f32; batch_size * 3], 0.001, 1).unwrap();

    assert_eq!(x_err.len(), batch_size * 4);
}
