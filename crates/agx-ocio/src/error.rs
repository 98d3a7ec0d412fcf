//! Error types for config building and writing.
//!
//! This module provides error handling for:
//! - Numeric failures while deriving the formation chain
//! - Color space and display lookup
//! - Config validation
//! - YAML serialization

use thiserror::Error;

/// Result type for config operations.
pub type OcioResult<T> = Result<T, OcioError>;

/// Errors that can occur while building or writing a config.
#[derive(Debug, Error)]
pub enum OcioError {
    /// I/O error writing config files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Working space or curve derivation failed.
    #[error(transparent)]
    Core(#[from] agx_core::Error),

    /// Formatting the YAML document failed.
    #[error("formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Color space not found in config.
    #[error("color space not found: {name}")]
    ColorSpaceNotFound {
        /// Name of the missing color space.
        name: String,
    },

    /// Display not found in config.
    #[error("display not found: {name}")]
    DisplayNotFound {
        /// Name of the missing display.
        name: String,
    },

    /// Transform cannot be written.
    #[error("invalid transform: {reason}")]
    InvalidTransform {
        /// Why the transform is invalid.
        reason: String,
    },

    /// Config validation failed.
    #[error("validation error: {0}")]
    Validation(String),
}

impl OcioError {
    /// True if the error came from the numeric core.
    pub fn is_core(&self) -> bool {
        matches!(self, Self::Core(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_are_transparent() {
        let err: OcioError = agx_core::Error::numeric_singularity("matrix is singular").into();
        assert!(err.is_core());
        assert_eq!(err.to_string(), "numeric singularity: matrix is singular");
    }

    #[test]
    fn test_lookup_messages() {
        let err = OcioError::ColorSpaceNotFound { name: "ACEScg".into() };
        assert_eq!(err.to_string(), "color space not found: ACEScg");
    }
}
