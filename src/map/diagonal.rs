//! Diagonal maps.

use crate::error::{ComponerError, Result};
use crate::map::Map;
use crate::matrices::Matrices;

/// Diagonal map: a batch of column vectors, each the diagonal of one
/// map in the stack.
#[derive(Debug, Clone)]
pub struct Diagonal<M: Matrices> {
    diagonals: M,
}

impl<M: Matrices> Diagonal<M> {
    fn new(diagonals: M) -> Result<Self> {
        if diagonals.n_cols() != 1 {
            return Err(ComponerError::DimensionMismatch {
                expected: "one column per slice".to_string(),
                actual: format!("{} columns", diagonals.n_cols()),
            });
        }
        Ok(Self { diagonals })
    }

    /// Application `self ∘ operand`, multiplies the operand row-wise.
    ///
    /// # Errors
    ///
    /// Propagates backend broadcasting errors.
    pub fn apply(&self, operand: &M) -> Result<M> {
        // The diagonals are (n, 1), so elementwise multiplication
        // broadcasts them across the operand's columns, which is exactly
        // the row-wise scaling we need.
        self.diagonals.mul(operand)
    }

    /// Application `operand ∘ self`, multiplies the operand column-wise.
    ///
    /// # Errors
    ///
    /// Propagates backend broadcasting errors.
    pub fn apply_right(&self, operand: &M) -> Result<M> {
        // Same logic as apply, transposed to (1, n) so broadcasting
        // spreads across rows instead.
        self.diagonals.transpose().mul(operand)
    }

    /// Inverse: elementwise reciprocal of the diagonals.
    ///
    /// Zero entries are not special-cased; the backend's division
    /// determines the failure mode.
    pub fn inv(&self) -> Result<Map<M>> {
        Ok(Map::Diagonal(Diagonal {
            diagonals: self.diagonals.recip(1.0),
        }))
    }
}

/// Create diagonal linear maps out of the given diagonals.
///
/// `diagonals` must be a stack of column (n x 1) vectors, each of which
/// represents the diagonal of one map in the resulting stack.
///
/// # Errors
///
/// Returns [`ComponerError::DimensionMismatch`] if the payload has more
/// than one column per slice.
pub fn diagonal<M: Matrices>(diagonals: M) -> Result<Map<M>> {
    Ok(Map::Diagonal(Diagonal::new(diagonals)?))
}

#[cfg(test)]
#[path = "diagonal_tests.rs"]
mod tests;
