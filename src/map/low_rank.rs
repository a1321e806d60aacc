//! Low-rank maps: virtual products and Woodbury-invertible updates.

use crate::error::{ComponerError, Result};
use crate::map::{identity, Map};
use crate::matrices::Matrices;

/// Virtual `left @ right` product.
///
/// Never materializes the full outer-product matrix: applications
/// contract through the shared rank dimension first.
#[derive(Debug, Clone)]
pub struct LowRankProduct<M: Matrices> {
    left: M,
    right: M,
}

impl<M: Matrices> LowRankProduct<M> {
    /// Application `self ∘ operand` as `left @ (right @ operand)`.
    ///
    /// # Errors
    ///
    /// Propagates backend conformability errors.
    pub fn apply(&self, operand: &M) -> Result<M> {
        self.left.matmul(&self.right.matmul(operand)?)
    }

    /// Application `operand ∘ self` as `(operand @ left) @ right`.
    ///
    /// # Errors
    ///
    /// Propagates backend conformability errors.
    pub fn apply_right(&self, operand: &M) -> Result<M> {
        operand.matmul(&self.left)?.matmul(&self.right)
    }

    /// Always fails: a rank-deficient map has no algebraic inverse.
    ///
    /// # Errors
    ///
    /// Returns [`ComponerError::NonInvertible`] unconditionally.
    pub fn inv(&self) -> Result<Map<M>> {
        Err(ComponerError::NonInvertible {
            map: "low-rank product".to_string(),
        })
    }
}

/// Virtual `base + left @ center @ right` update.
#[derive(Clone)]
pub struct LowRankUpdate<M: Matrices> {
    base: Box<Map<M>>,
    left: M,
    center: Box<Map<M>>,
    right: M,
}

impl<M: Matrices> LowRankUpdate<M> {
    /// Application `self ∘ operand`, contracting through the rank
    /// dimension before expanding back to the full dimension.
    ///
    /// # Errors
    ///
    /// Propagates base, center and backend errors unchanged.
    pub fn apply(&self, operand: &M) -> Result<M> {
        let update = self.center.apply(&self.right.matmul(operand)?)?;
        self.base.apply(operand)?.add(&self.left.matmul(&update)?)
    }

    /// Application `operand ∘ self`, the structural mirror of `apply`.
    ///
    /// # Errors
    ///
    /// Propagates base, center and backend errors unchanged.
    pub fn apply_right(&self, operand: &M) -> Result<M> {
        let update = self.center.apply_right(&operand.matmul(&self.left)?)?;
        self.base
            .apply_right(operand)?
            .add(&update.matmul(&self.right)?)
    }

    /// Woodbury inverse: a new update over the inverted base, never
    /// forming the full dense matrix.
    ///
    /// Every multiplication contracts through the smaller of the two
    /// available dimensions, and `base⁻¹ @ left` is computed once and
    /// reused.
    ///
    /// # Errors
    ///
    /// Failure of any nested inversion (base, center, or the rank-sized
    /// capacitance matrix) propagates as-is; singularities are never
    /// masked at this layer.
    pub fn inv(&self) -> Result<Map<M>> {
        let inv_base = self.base.inv()?;
        let inv_base_left = inv_base.apply(&self.left)?;
        // Contract the large dimension first, then combine with the
        // rank-sized identity.
        let capacitance = self
            .left
            .right_eye()
            .add(&self.center.apply_right(&self.right.matmul(&inv_base_left)?)?)?;
        let center = self.center.apply(&capacitance.inv()?)?.neg();
        let right = inv_base.apply_right(&self.right)?;

        Ok(Map::LowRankUpdate(LowRankUpdate {
            base: Box::new(inv_base),
            left: inv_base_left,
            center: Box::new(Map::Dense(center)),
            right,
        }))
    }
}

/// Virtual `left @ right` product that does not actually perform the
/// contraction.
#[must_use]
pub fn low_rank_product<M: Matrices>(left: M, right: M) -> Map<M> {
    Map::LowRankProduct(LowRankProduct { left, right })
}

/// Virtual `base + left @ center @ right` update that does not
/// explicitly compute the matrix.
///
/// When `center` is omitted it defaults to the identity map of rank
/// `left.n_cols()`, giving a pure `base + left @ right` update.
#[must_use]
pub fn low_rank_update<M: Matrices>(
    base: impl Into<Map<M>>,
    left: M,
    right: M,
    center: Option<Map<M>>,
) -> Map<M> {
    let center = center.unwrap_or_else(|| identity(left.n_cols()));
    Map::LowRankUpdate(LowRankUpdate {
        base: Box::new(base.into()),
        left,
        center: Box::new(center),
        right,
    })
}

#[cfg(test)]
#[path = "low_rank_tests.rs"]
mod tests;
