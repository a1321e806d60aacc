//! Componer: virtual linear maps for Rust.
//!
//! Componer represents linear operators structurally instead of as dense
//! matrices, so that application and inversion can exploit a map's
//! decomposition. A small closed algebra of map variants (identity,
//! diagonal, scaled, low-rank product, low-rank update) nests
//! arbitrarily; low-rank updates invert through the Woodbury identity,
//! only ever inverting the base and a matrix sized to the update's rank.
//!
//! # Quick Start
//!
//! ```
//! use componer::prelude::*;
//!
//! // I + v vᵀ, inverted without forming the dense matrix
//! let v = Stack::matrix(3, 1, vec![1.0, 2.0, 3.0]).unwrap();
//! let update = low_rank_update(identity(3), v.clone(), v.transpose(), None);
//! let inverse = inv(&update).unwrap();
//!
//! // Round trip: inverse ∘ update ≈ identity
//! let dense = update.apply(&Stack::eye(3)).unwrap();
//! let round_trip = inverse.apply(&dense).unwrap();
//! for (i, &value) in round_trip.as_slice().iter().enumerate() {
//!     let expected = if i % 4 == 0 { 1.0 } else { 0.0 };
//!     assert!((value - expected).abs() < 1e-5);
//! }
//! ```
//!
//! # Modules
//!
//! - [`map`]: the virtual map algebra (variants, application, inversion)
//! - [`matrices`]: the batched-matrix capability every backend implements
//! - [`backend`]: concrete backends and the availability probe
//! - [`error`]: error taxonomy (shape, structural, numeric, backend)

pub mod backend;
pub mod error;
pub mod map;
pub mod matrices;
pub mod prelude;

use crate::error::Result;
use crate::map::Map;
use crate::matrices::Matrices;

/// Attempt to invert a map.
///
/// Uniform call form over every variant, including raw
/// [`Matrices`] values treated as trivial maps via `Map::from`.
///
/// # Errors
///
/// Propagates the map's own inversion failure: structural
/// non-invertibility for low-rank products, numeric singularity from
/// dense inversions.
pub fn inv<M: Matrices>(map: &Map<M>) -> Result<Map<M>> {
    map.inv()
}
