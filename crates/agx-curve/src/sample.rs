//! Sampling a curve over a fixed grid.

use crate::{Lut1D, Sigmoid};
use agx_core::{Error, Result};
use tracing::debug;

/// Number of samples of the formation LUT.
pub const DEFAULT_SAMPLES: usize = 4096;

/// `n` evenly spaced values from `start` to `end`, both included.
///
/// ```rust
/// use agx_curve::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Ordered `(x, y)` samples of a transfer function.
///
/// Construction validates the samples: every value is finite and `y` never
/// decreases. The samples cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSample {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl CurveSample {
    /// Samples `sigmoid` at `samples` evenly spaced points over [0, 1].
    ///
    /// # Example
    ///
    /// ```rust
    /// use agx_curve::{CurveSample, Sigmoid, SigmoidParams, DEFAULT_SAMPLES};
    ///
    /// let curve = Sigmoid::new(SigmoidParams::default()).unwrap();
    /// let sample = CurveSample::from_sigmoid(&curve, DEFAULT_SAMPLES).unwrap();
    /// assert_eq!(sample.len(), 4096);
    /// ```
    pub fn from_sigmoid(sigmoid: &Sigmoid, samples: usize) -> Result<Self> {
        if samples < 2 {
            return Err(Error::parameter_invalid(
                "samples",
                format!("must be >= 2, got {samples}"),
            ));
        }
        let xs = linspace(0.0, 1.0, samples);
        let ys = sigmoid.eval_batch(&xs);
        let sample = Self::from_parts(xs, ys)?;
        debug!(samples, first = sample.ys[0], last = sample.ys[samples - 1], "Sampled curve");
        Ok(sample)
    }

    /// Wraps existing samples, validating them.
    pub fn from_parts(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(Error::parameter_invalid(
                "samples",
                format!("{} x values but {} y values", xs.len(), ys.len()),
            ));
        }
        let sample = Self { xs, ys };
        sample.validate()?;
        Ok(sample)
    }

    /// Checks that all samples are finite and `y` is non-decreasing.
    ///
    /// # Errors
    ///
    /// [`Error::NumericSingularity`] naming the first offending sample.
    pub fn validate(&self) -> Result<()> {
        for (i, (x, y)) in self.iter().enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(Error::numeric_singularity(format!(
                    "sample {i} is not finite: ({x}, {y})"
                )));
            }
        }
        if let Some(i) = self.ys.windows(2).position(|w| w[1] < w[0]) {
            return Err(Error::numeric_singularity(format!(
                "curve decreases between samples {i} and {}: {} -> {}",
                i + 1,
                self.ys[i],
                self.ys[i + 1]
            )));
        }
        Ok(())
    }

    /// Input coordinates.
    #[inline]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Output coordinates.
    #[inline]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// True if there are no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Iterates `(x, y)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    /// Converts into a LUT over the sampled x range.
    ///
    /// The x grid is assumed to be uniform, as produced by
    /// [`from_sigmoid`](Self::from_sigmoid).
    pub fn to_lut(&self) -> Result<Lut1D> {
        let (Some(first), Some(last)) = (self.xs.first(), self.xs.last()) else {
            return Err(Error::parameter_invalid("samples", "cannot build a LUT from no samples"));
        };
        Lut1D::from_data(self.ys.clone(), *first, *last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SigmoidParams;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_linspace() {
        let xs = linspace(0.0, 1.0, DEFAULT_SAMPLES);
        assert_eq!(xs.len(), DEFAULT_SAMPLES);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[DEFAULT_SAMPLES - 1], 1.0);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
    }

    #[test]
    fn test_formation_sample() {
        let params = SigmoidParams {
            pivot: [0.5, 0.5],
            slope: 2.4,
            powers: [1.5, 1.5],
            ..Default::default()
        };
        let curve = Sigmoid::new(params).unwrap();
        let sample = CurveSample::from_sigmoid(&curve, DEFAULT_SAMPLES).unwrap();
        assert_eq!(sample.len(), DEFAULT_SAMPLES);
        let ys = sample.ys();
        assert!((-1e-9..=1.0 + 1e-9).contains(&ys[0]));
        assert!((-1e-9..=1.0 + 1e-9).contains(&ys[DEFAULT_SAMPLES - 1]));
        assert_abs_diff_eq!(curve.eval(0.5), 0.5, epsilon = 1e-12);
        assert!(ys.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_rejects_nan() {
        let err = CurveSample::from_parts(vec![0.0, 0.5, 1.0], vec![0.0, f64::NAN, 1.0]).unwrap_err();
        assert!(err.is_singularity());
        assert!(err.to_string().contains("sample 1"));
    }

    #[test]
    fn test_rejects_decreasing() {
        let err = CurveSample::from_parts(vec![0.0, 0.5, 1.0], vec![0.0, 0.6, 0.4]).unwrap_err();
        assert!(err.is_singularity());
    }

    #[test]
    fn test_unchecked_nan_is_caught() {
        let curve = Sigmoid::new_unchecked(SigmoidParams {
            slope: f64::NAN,
            ..Default::default()
        });
        assert!(CurveSample::from_sigmoid(&curve, 16).unwrap_err().is_singularity());
    }

    #[test]
    fn test_to_lut() {
        let curve = Sigmoid::new(SigmoidParams::default()).unwrap();
        let sample = CurveSample::from_sigmoid(&curve, 1024).unwrap();
        let lut = sample.to_lut().unwrap();
        assert_eq!(lut.size(), 1024);
        assert_eq!(lut.domain(), (0.0, 1.0));
        assert_abs_diff_eq!(lut.apply(0.5), curve.eval(0.5), epsilon = 1e-5);
    }

    #[test]
    fn test_too_few_samples() {
        let curve = Sigmoid::new(SigmoidParams::default()).unwrap();
        assert!(CurveSample::from_sigmoid(&curve, 1).unwrap_err().is_parameter_error());
    }
}
