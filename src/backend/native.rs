//! Native batched dense backend.
//!
//! [`Stack`] is a pure-Rust batch of row-major dense `f32` matrices:
//! leading batch dimensions of arbitrary rank, last two dimensions
//! (rows, cols). The buffer is shared through an `Arc`, so cloning a
//! `Stack` is cheap and never copies data.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ComponerError, Result};
use crate::matrices::Matrices;

/// A batch of dense matrices (row-major storage, shared buffer).
///
/// # Examples
///
/// ```
/// use componer::backend::native::Stack;
///
/// let m = Stack::matrix(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(m.shape(), &[2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stack {
    shape: Vec<usize>,
    data: Arc<Vec<f32>>,
}

impl Stack {
    /// Imports a stack from its interchange representation (shape plus
    /// flat row-major data).
    ///
    /// # Errors
    ///
    /// Returns an error if the shape has fewer than two dimensions or
    /// the data length doesn't match the shape's element count.
    pub fn from_parts(shape: Vec<usize>, data: Vec<f32>) -> Result<Self> {
        if shape.len() < 2 {
            return Err(ComponerError::DimensionMismatch {
                expected: "at least 2 dimensions".to_string(),
                actual: format!("{} dimensions", shape.len()),
            });
        }
        let count: usize = shape.iter().product();
        if data.len() != count {
            return Err(ComponerError::DimensionMismatch {
                expected: format!("{count} elements"),
                actual: format!("{} elements", data.len()),
            });
        }
        Ok(Self {
            shape,
            data: Arc::new(data),
        })
    }

    /// Creates a single (unbatched) matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if data length doesn't match rows * cols.
    pub fn matrix(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        Self::from_parts(vec![rows, cols], data)
    }

    /// Wraps a batch of vectors by inserting a trailing singleton axis:
    /// shape (..., n) becomes (..., n, 1).
    ///
    /// # Errors
    ///
    /// Returns an error if the data length doesn't match the shape.
    pub fn from_vectors(mut shape: Vec<usize>, data: Vec<f32>) -> Result<Self> {
        shape.push(1);
        Self::from_parts(shape, data)
    }

    /// Wraps a batch of scalars by inserting two trailing singleton
    /// axes: shape (...) becomes (..., 1, 1).
    ///
    /// # Errors
    ///
    /// Returns an error if the data length doesn't match the shape.
    pub fn from_scalars(mut shape: Vec<usize>, data: Vec<f32>) -> Result<Self> {
        shape.push(1);
        shape.push(1);
        Self::from_parts(shape, data)
    }

    /// Creates an unbatched n x n identity matrix.
    #[must_use]
    pub fn eye(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self {
            shape: vec![n, n],
            data: Arc::new(data),
        }
    }

    /// Exports to the interchange representation.
    #[must_use]
    pub fn to_parts(&self) -> (Vec<usize>, Vec<f32>) {
        (self.shape.clone(), self.data.as_ref().clone())
    }

    /// Unwraps a batch of vectors, removing the trailing singleton axis.
    ///
    /// # Errors
    ///
    /// Returns an error if the last axis is not a singleton.
    pub fn to_vectors(&self) -> Result<(Vec<usize>, Vec<f32>)> {
        if self.n_cols() != 1 {
            return Err(ComponerError::DimensionMismatch {
                expected: "one column per slice".to_string(),
                actual: format!("{} columns", self.n_cols()),
            });
        }
        let (mut shape, data) = self.to_parts();
        shape.pop();
        Ok((shape, data))
    }

    /// Unwraps a batch of scalars, removing both trailing singleton axes.
    ///
    /// # Errors
    ///
    /// Returns an error if the last two axes are not singletons.
    pub fn to_scalars(&self) -> Result<(Vec<usize>, Vec<f32>)> {
        if self.n_rows() != 1 || self.n_cols() != 1 {
            return Err(ComponerError::DimensionMismatch {
                expected: "1x1 per slice".to_string(),
                actual: format!("{}x{}", self.n_rows(), self.n_cols()),
            });
        }
        let (mut shape, data) = self.to_parts();
        shape.pop();
        shape.pop();
        Ok((shape, data))
    }

    /// Full shape, batch dimensions leading.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The underlying flat row-major data.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    fn map_data(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            shape: self.shape.clone(),
            data: Arc::new(self.data.iter().map(|&x| f(x)).collect()),
        }
    }

    /// Broadcasted elementwise binary operation following the standard
    /// right-aligned rule: each dimension pair must be equal or 1.
    fn broadcast_binary(&self, other: &Self, op: impl Fn(f32, f32) -> f32) -> Result<Self> {
        let shape = broadcast_shape(&self.shape, &other.shape)?;
        let lhs = broadcast_strides(&self.shape, &shape);
        let rhs = broadcast_strides(&other.shape, &shape);
        let total: usize = shape.iter().product();

        let mut data = Vec::with_capacity(total);
        let mut index = vec![0_usize; shape.len()];
        for _ in 0..total {
            let mut a = 0;
            let mut b = 0;
            for (dim, &i) in index.iter().enumerate() {
                a += i * lhs[dim];
                b += i * rhs[dim];
            }
            data.push(op(self.data[a], other.data[b]));
            increment(&mut index, &shape);
        }

        Ok(Self {
            shape,
            data: Arc::new(data),
        })
    }
}

/// Broadcast two shapes together, right-aligned.
fn broadcast_shape(lhs: &[usize], rhs: &[usize]) -> Result<Vec<usize>> {
    let ndim = lhs.len().max(rhs.len());
    let mut shape = vec![0_usize; ndim];
    for axis in 0..ndim {
        let a = dim_from_right(lhs, ndim - 1 - axis);
        let b = dim_from_right(rhs, ndim - 1 - axis);
        shape[axis] = if a == b || b == 1 {
            a
        } else if a == 1 {
            b
        } else {
            return Err(ComponerError::DimensionMismatch {
                expected: format!("broadcastable shapes, got {lhs:?}"),
                actual: format!("{rhs:?}"),
            });
        };
    }
    Ok(shape)
}

/// Right-aligned dimension lookup: `offset` counted from the last axis,
/// missing leading dimensions read as 1.
fn dim_from_right(shape: &[usize], offset: usize) -> usize {
    if offset < shape.len() {
        shape[shape.len() - 1 - offset]
    } else {
        1
    }
}

/// Row-major strides of `shape` aligned into `out`, with stride 0 on
/// broadcast (size-1 or missing) dimensions.
fn broadcast_strides(shape: &[usize], out: &[usize]) -> Vec<usize> {
    let mut strides = vec![0_usize; out.len()];
    let mut stride = 1;
    for offset in 0..shape.len() {
        let dim = shape[shape.len() - 1 - offset];
        let out_axis = out.len() - 1 - offset;
        if dim != 1 {
            strides[out_axis] = stride;
        }
        stride *= dim;
    }
    strides
}

/// Odometer-style multi-index increment over `shape`.
fn increment(index: &mut [usize], shape: &[usize]) {
    for axis in (0..shape.len()).rev() {
        index[axis] += 1;
        if index[axis] < shape[axis] {
            return;
        }
        index[axis] = 0;
    }
}

impl Matrices for Stack {
    fn transpose(&self) -> Self {
        let ndim = self.shape.len();
        let rows = self.shape[ndim - 2];
        let cols = self.shape[ndim - 1];
        let batch: usize = self.shape[..ndim - 2].iter().product();

        let mut shape = self.shape.clone();
        shape.swap(ndim - 2, ndim - 1);

        let mut data = vec![0.0; self.data.len()];
        for b in 0..batch {
            let offset = b * rows * cols;
            for i in 0..rows {
                for j in 0..cols {
                    data[offset + j * rows + i] = self.data[offset + i * cols + j];
                }
            }
        }
        Self {
            shape,
            data: Arc::new(data),
        }
    }

    fn matmul(&self, other: &Self) -> Result<Self> {
        let (m, k) = (self.n_rows(), self.n_cols());
        let (k2, n) = (other.n_rows(), other.n_cols());
        if k != k2 {
            return Err(ComponerError::DimensionMismatch {
                expected: format!("inner dimension {k}"),
                actual: format!("{k2} rows"),
            });
        }

        let lhs_batch = &self.shape[..self.shape.len() - 2];
        let rhs_batch = &other.shape[..other.shape.len() - 2];
        let batch_shape = broadcast_shape(lhs_batch, rhs_batch)?;
        let lhs_strides = broadcast_strides(lhs_batch, &batch_shape);
        let rhs_strides = broadcast_strides(rhs_batch, &batch_shape);
        let batch: usize = batch_shape.iter().product();

        let mut shape = batch_shape.clone();
        shape.push(m);
        shape.push(n);

        let mut data = Vec::with_capacity(batch * m * n);
        let mut index = vec![0_usize; batch_shape.len()];
        for _ in 0..batch {
            let mut a_batch = 0;
            let mut b_batch = 0;
            for (dim, &i) in index.iter().enumerate() {
                a_batch += i * lhs_strides[dim];
                b_batch += i * rhs_strides[dim];
            }
            let a = &self.data[a_batch * m * k..(a_batch + 1) * m * k];
            let b = &other.data[b_batch * k * n..(b_batch + 1) * k * n];
            for i in 0..m {
                for j in 0..n {
                    let mut sum = 0.0;
                    for l in 0..k {
                        sum += a[i * k + l] * b[l * n + j];
                    }
                    data.push(sum);
                }
            }
            increment(&mut index, &batch_shape);
        }

        Ok(Self {
            shape,
            data: Arc::new(data),
        })
    }

    fn add(&self, other: &Self) -> Result<Self> {
        self.broadcast_binary(other, |a, b| a + b)
    }

    fn mul(&self, other: &Self) -> Result<Self> {
        self.broadcast_binary(other, |a, b| a * b)
    }

    fn recip(&self, numerator: f32) -> Self {
        self.map_data(|x| numerator / x)
    }

    fn neg(&self) -> Self {
        self.map_data(|x| -x)
    }

    fn inv(&self) -> Result<Self> {
        let n = self.n_rows();
        if self.n_cols() != n {
            return Err(ComponerError::DimensionMismatch {
                expected: format!("square matrices of {n} rows"),
                actual: format!("{} columns", self.n_cols()),
            });
        }
        let batch: usize = self.shape[..self.shape.len() - 2].iter().product();

        let mut data = vec![0.0; self.data.len()];
        for b in 0..batch {
            let source = &self.data[b * n * n..(b + 1) * n * n];
            let inverse = invert_one(source, n)?;
            data[b * n * n..(b + 1) * n * n].copy_from_slice(&inverse);
        }

        Ok(Self {
            shape: self.shape.clone(),
            data: Arc::new(data),
        })
    }

    fn right_eye(&self) -> Self {
        Self::eye(self.n_cols())
    }

    fn n_rows(&self) -> usize {
        self.shape[self.shape.len() - 2]
    }

    fn n_cols(&self) -> usize {
        self.shape[self.shape.len() - 1]
    }
}

/// Gauss-Jordan inverse of one n x n matrix with partial pivoting.
fn invert_one(source: &[f32], n: usize) -> Result<Vec<f32>> {
    // Augmented system [A | I], reduced in place.
    let mut a = source.to_vec();
    let mut inv = vec![0.0_f32; n * n];
    for i in 0..n {
        inv[i * n + i] = 1.0;
    }

    let scale = source.iter().fold(0.0_f32, |acc, &x| acc.max(x.abs()));
    let tolerance = f32::EPSILON * scale.max(1.0) * n as f32;
    let mut det = 1.0_f64;

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&p, &q| {
                a[p * n + col]
                    .abs()
                    .total_cmp(&a[q * n + col].abs())
            })
            .unwrap_or(col);
        let pivot = a[pivot_row * n + col];
        if pivot.abs() <= tolerance {
            return Err(ComponerError::SingularMatrix {
                det: det * f64::from(pivot),
            });
        }
        if pivot_row != col {
            for j in 0..n {
                a.swap(col * n + j, pivot_row * n + j);
                inv.swap(col * n + j, pivot_row * n + j);
            }
            det = -det;
        }
        det *= f64::from(pivot);

        let inv_pivot = 1.0 / pivot;
        for j in 0..n {
            a[col * n + j] *= inv_pivot;
            inv[col * n + j] *= inv_pivot;
        }
        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[row * n + col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..n {
                a[row * n + j] -= factor * a[col * n + j];
                inv[row * n + j] -= factor * inv[col * n + j];
            }
        }
    }

    Ok(inv)
}

#[cfg(test)]
#[path = "native_tests.rs"]
mod tests;
