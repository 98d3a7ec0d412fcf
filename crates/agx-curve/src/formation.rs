//! The AgX formation curve: log2 encoding followed by the sigmoid.
//!
//! Scene values are encoded to normalized log2 over a fixed EV range around
//! middle grey, then shaped by a [`Sigmoid`] whose pivot places middle grey
//! at its display-encoded value. The result is sampled into the LUT the
//! config references.

use crate::log2::{calculate_ocio_log2, open_domain_to_normalized_log2, MIDDLE_GREY};
use crate::{CurveSample, Sigmoid, SigmoidParams, DEFAULT_SAMPLES};
use agx_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Display encoding exponent used to place middle grey on the output axis.
pub const DISPLAY_EXPONENT: f64 = 2.2;

/// Log2 range and curve shape of the formation chain.
///
/// # Example
///
/// ```rust
/// use agx_curve::FormationCurve;
///
/// let curve = FormationCurve::default();
/// assert_eq!(curve.min_ev, -10.0);
/// assert!((curve.sigmoid.pivot[0] - 10.0 / 16.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormationCurve {
    /// Stops below middle grey mapped to 0
    pub min_ev: f64,
    /// Stops above middle grey mapped to 1
    pub max_ev: f64,
    /// Scene-referred middle grey
    pub grey: f64,
    /// Curve shape over the normalized log2 domain
    pub sigmoid: SigmoidParams,
    /// Number of LUT samples
    pub samples: usize,
}

impl Default for FormationCurve {
    fn default() -> Self {
        let (min_ev, max_ev) = (-10.0, 6.5);
        Self {
            min_ev,
            max_ev,
            grey: MIDDLE_GREY,
            sigmoid: SigmoidParams {
                pivot: [
                    -min_ev / (max_ev - min_ev),
                    MIDDLE_GREY.powf(1.0 / DISPLAY_EXPONENT),
                ],
                slope: 2.4,
                powers: [1.5, 1.5],
                ..Default::default()
            },
            samples: DEFAULT_SAMPLES,
        }
    }
}

impl FormationCurve {
    /// Checks the log range and the sigmoid parameters.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_ev.is_finite() && self.max_ev.is_finite()) || self.max_ev <= self.min_ev {
            return Err(Error::parameter_invalid(
                "log2 range",
                format!("[{}, {}] is empty", self.min_ev, self.max_ev),
            ));
        }
        if !(self.grey.is_finite() && self.grey > 0.0) {
            return Err(Error::parameter_invalid("grey", "must be > 0"));
        }
        self.sigmoid.validate()
    }

    /// Normalized log2 position of middle grey.
    ///
    /// Not validated; the value is only meaningful after [`validate`](Self::validate)
    /// succeeds.
    pub fn grey_position(&self) -> f64 {
        open_domain_to_normalized_log2(self.grey, self.grey, self.min_ev, self.max_ev)
    }

    /// The `lg2` allocation variables of the log encoding, `[min, max]`.
    pub fn allocation_vars(&self) -> [f64; 2] {
        [
            calculate_ocio_log2(self.min_ev, self.grey),
            calculate_ocio_log2(self.max_ev, self.grey),
        ]
    }

    /// Validates the parameters and samples the curve over [0, 1].
    pub fn sample(&self) -> Result<CurveSample> {
        self.validate()?;
        let sigmoid = Sigmoid::new(self.sigmoid)?;
        let sample = CurveSample::from_sigmoid(&sigmoid, self.samples)?;
        debug!(
            min_ev = self.min_ev,
            max_ev = self.max_ev,
            samples = self.samples,
            "Sampled formation curve"
        );
        Ok(sample)
    }

    /// Renders an open-domain scene value through the log encoding and curve.
    pub fn apply(&self, od: f64) -> Result<f64> {
        self.validate()?;
        let sigmoid = Sigmoid::new(self.sigmoid)?;
        Ok(sigmoid.eval(open_domain_to_normalized_log2(
            od,
            self.grey,
            self.min_ev,
            self.max_ev,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_defaults() {
        let curve = FormationCurve::default();
        assert_eq!(curve.samples, 4096);
        assert_abs_diff_eq!(curve.grey_position(), curve.sigmoid.pivot[0], epsilon = 1e-12);
        let [lo, hi] = curve.allocation_vars();
        assert_abs_diff_eq!(lo, (2f64.powi(-10) * 0.18).log2(), epsilon = 1e-12);
        assert_abs_diff_eq!(hi, (2f64.powf(6.5) * 0.18).log2(), epsilon = 1e-12);
    }

    #[test]
    fn test_grey_maps_to_display_grey() {
        let curve = FormationCurve::default();
        let y = curve.apply(MIDDLE_GREY).unwrap();
        assert_abs_diff_eq!(y, 0.18_f64.powf(1.0 / 2.2), epsilon = 1e-9);
    }

    #[test]
    fn test_sample_is_bounded() {
        let sample = FormationCurve::default().sample().unwrap();
        let ys = sample.ys();
        assert_abs_diff_eq!(ys[0], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(ys[ys.len() - 1], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_range() {
        let curve = FormationCurve {
            min_ev: 2.0,
            max_ev: 1.0,
            ..Default::default()
        };
        assert!(curve.sample().unwrap_err().is_parameter_error());
        assert!(curve.apply(0.18).unwrap_err().is_parameter_error());
    }

    #[test]
    fn test_apply_rejects_bad_range() {
        let nan = FormationCurve {
            max_ev: f64::NAN,
            ..Default::default()
        };
        assert!(nan.apply(0.18).unwrap_err().is_parameter_error());

        let grey = FormationCurve {
            grey: 0.0,
            ..Default::default()
        };
        assert!(grey.apply(0.18).unwrap_err().is_parameter_error());
    }
}
