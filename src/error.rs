//! Error types for componer operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for componer operations.
///
/// Distinguishes shape preconditions, structural non-invertibility,
/// numeric singularity and missing backends so callers can react to
/// each separately.
///
/// # Examples
///
/// ```
/// use componer::error::ComponerError;
///
/// let err = ComponerError::DimensionMismatch {
///     expected: "2x1".to_string(),
///     actual: "2x2".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug)]
pub enum ComponerError {
    /// Matrix dimensions don't match for the operation, or a map payload
    /// violates the variant's structural shape requirement.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// The map has no algebraic inverse by construction.
    ///
    /// Raised unconditionally by low-rank products. Distinct from
    /// [`ComponerError::SingularMatrix`], which is a numeric failure of
    /// an otherwise well-defined inverse.
    NonInvertible {
        /// Map variant description
        map: String,
    },

    /// Matrix is numerically singular (non-invertible).
    SingularMatrix {
        /// Determinant value (close to zero)
        det: f64,
    },

    /// Requested compute backend is not available.
    ///
    /// Lets callers probe for backend availability without conflating
    /// "not installed" with a genuine bug.
    BackendUnavailable {
        /// Backend name (e.g., "native")
        backend: String,
    },
}

impl fmt::Display for ComponerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponerError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Matrix dimension mismatch: expected {expected}, got {actual}"
                )
            }
            ComponerError::NonInvertible { map } => {
                write!(f, "Map has no algebraic inverse: {map}")
            }
            ComponerError::SingularMatrix { det } => {
                write!(
                    f,
                    "Singular matrix detected: determinant = {det}, cannot invert"
                )
            }
            ComponerError::BackendUnavailable { backend } => {
                write!(f, "Backend not available: {backend}")
            }
        }
    }
}

impl std::error::Error for ComponerError {}

/// Result type alias for componer operations.
pub type Result<T> = std::result::Result<T, ComponerError>;
