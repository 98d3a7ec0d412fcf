//! 1-dimensional lookup table.
//!
//! A sampled formation curve is consumed as a 1D LUT: a single transfer
//! function shared by all three channels, linearly interpolated between
//! entries.

use agx_core::{Error, Result};

/// A single-channel 1D lookup table.
///
/// # Structure
///
/// - `size` entries spread uniformly over `[domain_min, domain_max]`
/// - Linear interpolation between entries
/// - Inputs outside the domain clamp to the end entries
///
/// # Example
///
/// ```rust
/// use agx_curve::Lut1D;
///
/// let lut = Lut1D::identity(256);
/// assert!((lut.apply(0.5) - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lut1D {
    values: Vec<f64>,
    domain_min: f64,
    domain_max: f64,
}

impl Lut1D {
    /// Creates an identity (pass-through) LUT over [0, 1].
    ///
    /// Sizes below 2 are raised to 2.
    pub fn identity(size: usize) -> Self {
        let size = size.max(2);
        let values = (0..size).map(|i| i as f64 / (size - 1) as f64).collect();
        Self {
            values,
            domain_min: 0.0,
            domain_max: 1.0,
        }
    }

    /// Creates a LUT from raw entries.
    ///
    /// # Errors
    ///
    /// [`Error::ParameterInvalid`] if there are fewer than two entries or the
    /// domain is empty or not finite.
    pub fn from_data(values: Vec<f64>, domain_min: f64, domain_max: f64) -> Result<Self> {
        if values.len() < 2 {
            return Err(Error::parameter_invalid(
                "lut size",
                format!("must be >= 2, got {}", values.len()),
            ));
        }
        if !(domain_min.is_finite() && domain_max.is_finite()) || domain_max <= domain_min {
            return Err(Error::parameter_invalid(
                "lut domain",
                format!("[{domain_min}, {domain_max}] is empty"),
            ));
        }
        Ok(Self {
            values,
            domain_min,
            domain_max,
        })
    }

    /// Number of entries.
    #[inline]
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Table entries.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Input domain as `(min, max)`.
    #[inline]
    pub fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    /// Applies the LUT to a single value.
    pub fn apply(&self, value: f64) -> f64 {
        let size = self.values.len();
        let t = ((value - self.domain_min) / (self.domain_max - self.domain_min)).clamp(0.0, 1.0);

        let idx_f = t * (size - 1) as f64;
        let idx0 = (idx_f.floor() as usize).min(size - 1);
        let idx1 = (idx0 + 1).min(size - 1);
        let frac = idx_f - idx0 as f64;

        self.values[idx0] * (1.0 - frac) + self.values[idx1] * frac
    }

    /// Applies the LUT to each channel of an RGB triplet.
    pub fn apply_rgb(&self, rgb: [f64; 3]) -> [f64; 3] {
        rgb.map(|v| self.apply(v))
    }
}
