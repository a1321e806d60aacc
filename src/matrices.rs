//! The Matrices capability: the contract every numeric backend implements.
//!
//! A `Matrices` value is an immutable batch of dense matrices: leading
//! batch dimensions of arbitrary rank, with the last two dimensions being
//! (rows, cols). A single call operates uniformly on one matrix or a
//! stack of many. Every operation returns a new value.
//!
//! The virtual map algebra in [`crate::map`] is written generically
//! against this trait and never references a concrete backend type.

use crate::error::Result;

/// Minimal backend matrix interface.
///
/// Implementations are value-semantic handles: `Clone` must be cheap
/// (share the underlying buffer rather than copy it), since the algebra
/// clones operands to express zero-copy pass-through.
pub trait Matrices: Clone {
    /// Transpose: swap the last two axes of the batch.
    #[must_use]
    fn transpose(&self) -> Self;

    /// Batched matrix multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionMismatch`](crate::error::ComponerError::DimensionMismatch)
    /// if the inner dimensions don't conform.
    fn matmul(&self, other: &Self) -> Result<Self>;

    /// Batched elementwise addition with standard broadcasting.
    ///
    /// # Errors
    ///
    /// Returns an error if the shapes cannot be broadcast together.
    fn add(&self, other: &Self) -> Result<Self>;

    /// Batched elementwise multiplication with standard
    /// (1,1)/(n,1)/(1,n) broadcasting.
    ///
    /// # Errors
    ///
    /// Returns an error if the shapes cannot be broadcast together.
    fn mul(&self, other: &Self) -> Result<Self>;

    /// Elementwise `numerator / x` (scalar-from-left division).
    ///
    /// Zero entries produce whatever the backend's division produces
    /// (infinity for IEEE floats); this layer does not special-case them.
    #[must_use]
    fn recip(&self, numerator: f32) -> Self;

    /// Elementwise sign flip.
    #[must_use]
    fn neg(&self) -> Self;

    /// Per-batch-element dense matrix inverse.
    ///
    /// # Errors
    ///
    /// Returns [`SingularMatrix`](crate::error::ComponerError::SingularMatrix)
    /// on singular input, or a dimension error for non-square matrices.
    fn inv(&self) -> Result<Self>;

    /// Conformable identity matrix on the right side: sized to the
    /// operand's column count, broadcastable against the batch.
    #[must_use]
    fn right_eye(&self) -> Self;

    /// Number of rows (second-to-last axis).
    fn n_rows(&self) -> usize;

    /// Number of columns (last axis).
    fn n_cols(&self) -> usize;
}
