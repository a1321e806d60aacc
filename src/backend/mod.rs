//! Numeric backends implementing the [`Matrices`](crate::matrices::Matrices)
//! capability.
//!
//! Each backend lives in its own module and is compiled in (or not) at
//! build time. [`probe`] reports availability up front, so calling code
//! can distinguish "this backend is simply not installed" from a genuine
//! bug at call time.

pub mod native;

use crate::error::{ComponerError, Result};

/// Names of the backends compiled into this build.
pub const AVAILABLE: &[&str] = &["native"];

/// Probe a backend by name.
///
/// # Errors
///
/// Returns [`ComponerError::BackendUnavailable`] if the named backend is
/// not compiled into this build.
///
/// # Examples
///
/// ```
/// assert!(componer::backend::probe("native").is_ok());
/// assert!(componer::backend::probe("cuda").is_err());
/// ```
pub fn probe(name: &str) -> Result<()> {
    if AVAILABLE.contains(&name) {
        Ok(())
    } else {
        Err(ComponerError::BackendUnavailable {
            backend: name.to_string(),
        })
    }
}
