//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use componer::prelude::*;
//! ```

pub use crate::backend::native::Stack;
pub use crate::error::{ComponerError, Result};
pub use crate::inv;
pub use crate::map::{diagonal, identity, low_rank_product, low_rank_update, scaled, Map};
pub use crate::matrices::Matrices;
