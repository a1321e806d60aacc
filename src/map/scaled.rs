//! Scaled maps.

use crate::error::{ComponerError, Result};
use crate::map::Map;
use crate::matrices::Matrices;

/// A base map multiplied by a batch of (1 x 1) scalars.
#[derive(Clone)]
pub struct Scaled<M: Matrices> {
    scale: M,
    base: Box<Map<M>>,
}

impl<M: Matrices> Scaled<M> {
    fn new(scale: M, base: Map<M>) -> Result<Self> {
        if scale.n_rows() != 1 {
            return Err(ComponerError::DimensionMismatch {
                expected: "one row per slice".to_string(),
                actual: format!("{} rows", scale.n_rows()),
            });
        }
        if scale.n_cols() != 1 {
            return Err(ComponerError::DimensionMismatch {
                expected: "one column per slice".to_string(),
                actual: format!("{} columns", scale.n_cols()),
            });
        }
        Ok(Self {
            scale,
            base: Box::new(base),
        })
    }

    /// Application `self ∘ operand`.
    ///
    /// The scale multiplies the *result* of the base application, not
    /// the operand first; the ordering matters for future non-commuting
    /// payloads even though scalars commute here.
    ///
    /// # Errors
    ///
    /// Propagates base and backend errors unchanged.
    pub fn apply(&self, operand: &M) -> Result<M> {
        self.scale.mul(&self.base.apply(operand)?)
    }

    /// Application `operand ∘ self`.
    ///
    /// # Errors
    ///
    /// Propagates base and backend errors unchanged.
    pub fn apply_right(&self, operand: &M) -> Result<M> {
        self.scale.mul(&self.base.apply_right(operand)?)
    }

    /// Inverse: reciprocal scale over the inverted base.
    ///
    /// # Errors
    ///
    /// If the base is not invertible, its failure propagates unchanged.
    pub fn inv(&self) -> Result<Map<M>> {
        Ok(Map::Scaled(Scaled {
            scale: self.scale.recip(1.0),
            base: Box::new(self.base.inv()?),
        }))
    }
}

/// Scale the base map by the given scalars.
///
/// `scale` must be a stack of (1 x 1) matrices, each of which represents
/// the scale of one map in the resulting stack.
///
/// # Errors
///
/// Returns [`ComponerError::DimensionMismatch`] if the payload is not
/// one row and one column per slice.
pub fn scaled<M: Matrices>(scale: M, base: impl Into<Map<M>>) -> Result<Map<M>> {
    Ok(Map::Scaled(Scaled::new(scale, base.into())?))
}

#[cfg(test)]
#[path = "scaled_tests.rs"]
mod tests;
