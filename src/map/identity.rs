//! Identity maps.

use crate::error::Result;
use crate::map::Map;
use crate::matrices::Matrices;

/// Identity map of a given rank.
///
/// The rank is advisory metadata only; it is not checked against
/// operands at this layer. Shape mismatches surface as backend errors
/// at the point where the operand is actually consumed.
#[derive(Debug, Clone)]
pub struct Identity {
    rank: usize,
}

impl Identity {
    /// Advisory rank of the map.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Returns the operand unchanged (shares its storage, no copy).
    pub fn apply<M: Matrices>(&self, operand: &M) -> Result<M> {
        Ok(operand.clone())
    }

    /// Returns the operand unchanged (shares its storage, no copy).
    pub fn apply_right<M: Matrices>(&self, operand: &M) -> Result<M> {
        Ok(operand.clone())
    }

    /// The identity is its own inverse.
    pub fn inv<M: Matrices>(&self) -> Result<Map<M>> {
        Ok(Map::Identity(self.clone()))
    }
}

/// Identity map of a given rank.
#[must_use]
pub fn identity<M: Matrices>(rank: usize) -> Map<M> {
    Map::Identity(Identity { rank })
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
