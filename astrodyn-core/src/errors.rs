//! Error types for frame mathematics.
//!
//! [`AstroError`] covers the numerical failure modes of this crate: invalid
//! inputs, singular geometry and iterations that fail to converge. Higher
//! crates wrap it in their own error enums.
//!
//! | Kind | Use Case |
//! |------|----------|
//! | [`InvalidInput`](MathErrorKind::InvalidInput) | Non-positive radius, flattening outside `[0, 1)` |
//! | [`Singularity`](MathErrorKind::Singularity) | Point on the polar axis |
//! | [`NoConvergence`](MathErrorKind::NoConvergence) | Latitude iteration cap reached |
//!
//! ```
//! use astrodyn_core::{AstroError, MathErrorKind};
//!
//! fn check_radius(radius: f64) -> Result<f64, AstroError> {
//!     if radius <= 0.0 {
//!         return Err(AstroError::math_error(
//!             "check_radius",
//!             MathErrorKind::InvalidInput,
//!             "radius must be positive",
//!         ));
//!     }
//!     Ok(radius)
//! }
//! ```

use thiserror::Error;

/// Classification of mathematical errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathErrorKind {
    /// Input value is invalid for the operation.
    InvalidInput,
    /// Geometry is degenerate (e.g. a point on the polar axis).
    Singularity,
    /// An iterative solver hit its iteration cap.
    NoConvergence,
}

/// Error type for frame mathematics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AstroError {
    /// Numerical computation failure.
    #[error("Math error in {operation} ({kind:?}): {message}")]
    MathError {
        operation: String,
        kind: MathErrorKind,
        message: String,
    },
}

/// Convenience alias for `Result<T, AstroError>`.
pub type AstroResult<T> = Result<T, AstroError>;

impl AstroError {
    pub fn math_error(operation: &str, kind: MathErrorKind, reason: &str) -> Self {
        Self::MathError {
            operation: operation.to_string(),
            kind,
            message: reason.to_string(),
        }
    }

    pub fn math_kind(&self) -> MathErrorKind {
        match self {
            Self::MathError { kind, .. } => *kind,
        }
    }
}
