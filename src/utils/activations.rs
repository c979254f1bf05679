//! Activation functions
//!
//! The trainer only uses the rectified linear unit, applied in-place after
//! every dense layer's affine transform.

use crate::utils::matrix::clip_inplace;

/// ReLU activation applied in-place: clips all values to [0, +inf).
pub fn relu_inplace(data: &mut [f32]) {
    clip_inplace(data, 0.0, f32::INFINITY);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relu_negative() {
        let mut data = vec![-1.0f32];
        relu_inplace(&mut data);
        assert_eq!(data[0], 0.0);
    }

    #[test]
    fn test_relu_positive() {
        let mut data = vec![5.0f32];
        relu_inplace(&mut data);
        assert_eq!(data[0], 5.0);
    }

    #[test]
    fn test_relu_mixed() {
        let mut data = vec![-2.0, -1.0, 0.0, 1.0, 2.0];
        relu_inplace(&mut data);
        assert_eq!(data, vec![0.0, 0.0, 0.0, 1.0, 2.0]);
    }
}
