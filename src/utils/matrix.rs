//! Flat row-major matrix primitives
//!
//! All matrices in this crate are flattened `Vec<f32>` buffers in row-major
//! order, addressed as `matrix[row * cols + col]`. These helpers are pure
//! numeric functions with no state; dimension agreement is the caller's
//! contract and is checked with assertions.

/// Multiply an `a_rows x inner` matrix by an `inner x b_cols` matrix.
///
/// Returns a newly allocated `a_rows x b_cols` product.
pub fn multiply(a: &[f32], b: &[f32], a_rows: usize, inner: usize, b_cols: usize) -> Vec<f32> {
    assert_eq!(a.len(), a_rows * inner, "lhs length mismatch in multiply");
    assert_eq!(b.len(), inner * b_cols, "rhs length mismatch in multiply");

    let mut product = vec![0.0f32; a_rows * b_cols];
    for r in 0..a_rows {
        for c in 0..b_cols {
            let mut sum = 0.0f32;
            for i in 0..inner {
                sum += a[r * inner + i] * b[i * b_cols + c];
            }
            product[r * b_cols + c] = sum;
        }
    }
    product
}

/// Transpose a `rows x cols` matrix into a newly allocated `cols x rows` one.
pub fn transpose(matrix: &[f32], rows: usize, cols: usize) -> Vec<f32> {
    assert_eq!(matrix.len(), rows * cols, "length mismatch in transpose");

    let mut transposed = vec![0.0f32; rows * cols];
    for row in 0..rows {
        for col in 0..cols {
            transposed[rows * col + row] = matrix[cols * row + col];
        }
    }
    transposed
}

/// Sum each column of a `rows x cols` matrix into a vector of `cols` sums.
pub fn sum_columns(matrix: &[f32], rows: usize, cols: usize) -> Vec<f32> {
    assert_eq!(matrix.len(), rows * cols, "length mismatch in sum_columns");

    let mut sums = vec![0.0f32; cols];
    for r in 0..rows {
        for c in 0..cols {
            sums[c] += matrix[cols * r + c];
        }
    }
    sums
}

/// Add `augend` to `array` elementwise, repeating `augend` when it is shorter.
///
/// With `augend` one row long this broadcasts a bias vector across every row
/// of a row-major matrix.
pub fn add_broadcast(array: &mut [f32], augend: &[f32]) {
    assert!(!augend.is_empty(), "augend must not be empty in add_broadcast");

    for (i, value) in array.iter_mut().enumerate() {
        *value += augend[i % augend.len()];
    }
}

/// Clip all values so they lie within [floor, ceiling].
pub fn clip_inplace(array: &mut [f32], floor: f32, ceiling: f32) {
    for value in array.iter_mut() {
        *value = value.min(ceiling).max(floor);
    }
}
