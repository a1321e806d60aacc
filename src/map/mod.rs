//! Virtual linear map algebra.
//!
//! A [`Map`] is a linear operator represented structurally rather than as
//! a dense matrix. The variant set is closed: identity, diagonal, scaled,
//! low-rank product, low-rank update, and any raw [`Matrices`] value used
//! directly as a map. Variants nest arbitrarily; applying a map recurses
//! down to backend operations, and inverting a map produces a new map
//! expression in the same algebra (never an eagerly materialized matrix).
//!
//! User code builds a map expression by composing constructors, then calls
//! [`Map::apply`], [`Map::apply_right`] or [`Map::inv`].

mod diagonal;
mod identity;
mod low_rank;
mod scaled;

pub use diagonal::{diagonal, Diagonal};
pub use identity::{identity, Identity};
pub use low_rank::{low_rank_product, low_rank_update, LowRankProduct, LowRankUpdate};
pub use scaled::{scaled, Scaled};

use crate::error::Result;
use crate::matrices::Matrices;

/// A lazy linear map over a batched matrix backend.
///
/// All variants are immutable once constructed; composition always
/// creates a new value.
#[derive(Clone)]
pub enum Map<M: Matrices> {
    /// No-op map of advisory rank.
    Identity(Identity),
    /// Row-wise (left) or column-wise (right) scaling by a diagonal.
    Diagonal(Diagonal<M>),
    /// A base map multiplied by a batch of scalars.
    Scaled(Scaled<M>),
    /// Virtual `left @ right` product, never contracted eagerly.
    LowRankProduct(LowRankProduct<M>),
    /// Virtual `base + left @ center @ right` update.
    LowRankUpdate(LowRankUpdate<M>),
    /// A raw batch of matrices used directly as a map.
    Dense(M),
}

impl<M: Matrices> Map<M> {
    /// Apply the map on the left: `self ∘ operand`.
    ///
    /// # Errors
    ///
    /// Propagates backend conformability errors unchanged.
    pub fn apply(&self, operand: &M) -> Result<M> {
        match self {
            Map::Identity(map) => map.apply(operand),
            Map::Diagonal(map) => map.apply(operand),
            Map::Scaled(map) => map.apply(operand),
            Map::LowRankProduct(map) => map.apply(operand),
            Map::LowRankUpdate(map) => map.apply(operand),
            Map::Dense(matrices) => matrices.matmul(operand),
        }
    }

    /// Apply the map on the right: `operand ∘ self`.
    ///
    /// # Errors
    ///
    /// Propagates backend conformability errors unchanged.
    pub fn apply_right(&self, operand: &M) -> Result<M> {
        match self {
            Map::Identity(map) => map.apply_right(operand),
            Map::Diagonal(map) => map.apply_right(operand),
            Map::Scaled(map) => map.apply_right(operand),
            Map::LowRankProduct(map) => map.apply_right(operand),
            Map::LowRankUpdate(map) => map.apply_right(operand),
            Map::Dense(matrices) => operand.matmul(matrices),
        }
    }

    /// Attempt to invert the map, staying inside the algebra.
    ///
    /// # Errors
    ///
    /// Returns [`NonInvertible`](crate::error::ComponerError::NonInvertible)
    /// for low-rank products, and propagates numeric
    /// [`SingularMatrix`](crate::error::ComponerError::SingularMatrix)
    /// failures from nested dense inversions unchanged.
    pub fn inv(&self) -> Result<Map<M>> {
        match self {
            Map::Identity(map) => map.inv(),
            Map::Diagonal(map) => map.inv(),
            Map::Scaled(map) => map.inv(),
            Map::LowRankProduct(map) => map.inv(),
            Map::LowRankUpdate(map) => map.inv(),
            Map::Dense(matrices) => Ok(Map::Dense(matrices.inv()?)),
        }
    }
}

impl<M: Matrices> From<M> for Map<M> {
    fn from(matrices: M) -> Self {
        Map::Dense(matrices)
    }
}
