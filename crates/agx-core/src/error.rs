//! Error types for agx-core operations.
//!
//! This module provides the error taxonomy shared by the numerical crates of
//! the AgX configuration generator.
//!
//! # Overview
//!
//! The [`Error`] enum covers the failure modes of a single generation run:
//! - Geometric failures while deriving a working space
//! - Numeric singularities (singular matrices, non-finite curve samples)
//! - Invalid parameters rejected at a component boundary
//! - I/O errors (when integrated with the CLI)
//!
//! There is no retry model. A failure means the run has to be repeated with
//! corrected parameters.
//!
//! # Usage
//!
//! ```rust
//! use agx_core::{Error, Result};
//!
//! fn check_slope(slope: f64) -> Result<()> {
//!     if slope <= 0.0 {
//!         return Err(Error::parameter_invalid("slope", "must be positive"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_slope(-1.0).is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation
//!
//! # Used By
//!
//! - `agx-primaries` - Working space derivation, matrix generation
//! - `agx-curve` - Sigmoid parameter validation, sample validation
//! - `agx-ocio` - Wrapped into `OcioError`

use crate::Channel;
use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
///
/// Convenience alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a working space or a formation curve.
///
/// # Categories
///
/// - **Geometry**: [`GeometricDegeneracy`](Error::GeometricDegeneracy)
/// - **Numerics**: [`NumericSingularity`](Error::NumericSingularity)
/// - **Parameters**: [`ParameterInvalid`](Error::ParameterInvalid)
#[derive(Debug, Error)]
pub enum Error {
    /// A rotated ray did not cross the expected edge of the reference gamut.
    ///
    /// Returned when a rotation angle is too extreme for the reference
    /// triangle, or when the reference whitepoint lies outside it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use agx_core::{Channel, Error};
    ///
    /// let err = Error::geometric_degeneracy(Channel::Red, "ray misses the gamut boundary");
    /// assert!(err.to_string().contains("red"));
    /// ```
    #[error("geometric degeneracy on {channel} channel: {reason}")]
    GeometricDegeneracy {
        /// Channel whose ray failed
        channel: Channel,
        /// What went wrong
        reason: String,
    },

    /// A computation produced a singular or non-finite result.
    ///
    /// Inset fractions of 1.0 or more collapse a primary onto the whitepoint
    /// and make the RGB to XYZ matrix singular. Degenerate curve parameters
    /// can produce NaN or infinite samples.
    #[error("numeric singularity: {0}")]
    NumericSingularity(String),

    /// A parameter is outside its valid range.
    ///
    /// Range checks are done eagerly at component boundaries, so that a bad
    /// parameter fails fast instead of producing silent garbage.
    #[error("invalid parameter '{name}': {reason}")]
    ParameterInvalid {
        /// Parameter name
        name: String,
        /// Reason why the value is rejected
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::GeometricDegeneracy`] error.
    #[inline]
    pub fn geometric_degeneracy(channel: Channel, reason: impl Into<String>) -> Self {
        Self::GeometricDegeneracy {
            channel,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::NumericSingularity`] error.
    #[inline]
    pub fn numeric_singularity(msg: impl Into<String>) -> Self {
        Self::NumericSingularity(msg.into())
    }

    /// Creates an [`Error::ParameterInvalid`] error.
    ///
    /// # Arguments
    ///
    /// * `name` - Parameter name as the caller knows it
    /// * `reason` - Why the value is rejected
    #[inline]
    pub fn parameter_invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParameterInvalid {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a geometry error.
    #[inline]
    pub fn is_geometric(&self) -> bool {
        matches!(self, Self::GeometricDegeneracy { .. })
    }

    /// Returns `true` if this is a numeric singularity.
    #[inline]
    pub fn is_singularity(&self) -> bool {
        matches!(self, Self::NumericSingularity(_))
    }

    /// Returns `true` if this is a parameter range error.
    #[inline]
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, Self::ParameterInvalid { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometric_degeneracy() {
        let err = Error::geometric_degeneracy(Channel::Blue, "opposite edge");
        let msg = err.to_string();
        assert!(msg.contains("blue"));
        assert!(msg.contains("opposite edge"));
        assert!(err.is_geometric());
        assert!(!err.is_singularity());
    }

    #[test]
    fn test_parameter_invalid() {
        let err = Error::parameter_invalid("powers[0]", "must be > 0");
        assert!(err.to_string().contains("powers[0]"));
        assert!(err.is_parameter_error());
    }

    #[test]
    fn test_singularity() {
        let err = Error::numeric_singularity("matrix is singular");
        assert!(err.is_singularity());
        assert_eq!(err.to_string(), "numeric singularity: matrix is singular");
    }
}
