//! Piecewise sigmoid with a linear middle and power toe and shoulder.
//!
//! The curve is a straight line of a given slope through the pivot,
//! optionally extended by a transition length on each side. Beyond the
//! breakpoints the line hands over to a hyperbolic segment
//!
//! ```text
//! f(t, p) = t / (1 + t^p)^(1/p)
//! y = k * f(s * (x - Tx) / k, p) + Ty
//! ```
//!
//! which leaves the breakpoint `(Tx, Ty)` with the same slope `s`, passes
//! through the limit point `(Lx, Ly)` and flattens toward `Ty + k`. The scale
//! `k` is solved in closed form from the limit point. Larger powers give a
//! sharper knee.
//!
//! ```text
//!   y
//!   |                 ______  shoulder asymptote
//!   |              .-'   (1,1) limit
//!   |            /
//!   |          / <- linear segment through the pivot
//!   |        /
//!   |   _.-'
//!   |__'_____________ x
//! ```
//!
//! # Failure Semantics
//!
//! Every power or division that produces a non-finite value is replaced by
//! 0.0, so evaluation never fails for finite `x`. A zero scale makes the
//! segment collapse onto its breakpoint. Malformed parameters are rejected by
//! [`SigmoidParams::validate`]; [`Sigmoid::new_unchecked`] skips the check
//! and may produce NaN, caught later by
//! [`CurveSample::validate`](crate::CurveSample::validate).

use agx_core::{Error, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Inputs at least this long are evaluated in parallel.
pub const PARALLEL_THRESHOLD: usize = 1 << 14;

/// Parameters of a [`Sigmoid`].
///
/// Index 0 is the toe, index 1 the shoulder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigmoidParams {
    /// Point the linear segment passes through
    pub pivot: [f64; 2],
    /// Slope of the linear segment
    pub slope: f64,
    /// Knee sharpness of the toe and shoulder
    pub powers: [f64; 2],
    /// Points the toe and shoulder pass through
    pub limits: [[f64; 2]; 2],
    /// Length of the linear extension below and above the pivot
    pub lengths: [f64; 2],
}

impl Default for SigmoidParams {
    fn default() -> Self {
        Self {
            pivot: [0.5, 0.5],
            slope: 2.0,
            powers: [1.0, 1.0],
            limits: [[0.0, 0.0], [1.0, 1.0]],
            lengths: [0.0, 0.0],
        }
    }
}

impl SigmoidParams {
    /// Checks the parameter ranges.
    ///
    /// # Errors
    ///
    /// [`Error::ParameterInvalid`] when a value is not finite, the slope or a
    /// power is not positive, a length is negative, or the pivot x is not
    /// between the limit x coordinates.
    ///
    /// # Example
    ///
    /// ```rust
    /// use agx_curve::SigmoidParams;
    ///
    /// let params = SigmoidParams { slope: -1.0, ..Default::default() };
    /// assert!(params.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("pivot.x", self.pivot[0]),
            ("pivot.y", self.pivot[1]),
            ("slope", self.slope),
            ("powers[0]", self.powers[0]),
            ("powers[1]", self.powers[1]),
            ("limits[0].x", self.limits[0][0]),
            ("limits[0].y", self.limits[0][1]),
            ("limits[1].x", self.limits[1][0]),
            ("limits[1].y", self.limits[1][1]),
            ("lengths[0]", self.lengths[0]),
            ("lengths[1]", self.lengths[1]),
        ];
        if let Some((name, _)) = named.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::parameter_invalid(*name, "must be finite"));
        }

        if self.slope <= 0.0 {
            return Err(Error::parameter_invalid(
                "slope",
                format!("must be > 0, got {}", self.slope),
            ));
        }
        for (i, p) in self.powers.iter().enumerate() {
            if *p <= 0.0 {
                return Err(Error::parameter_invalid(
                    format!("powers[{i}]"),
                    format!("must be > 0, got {p}"),
                ));
            }
        }
        for (i, len) in self.lengths.iter().enumerate() {
            if *len < 0.0 {
                return Err(Error::parameter_invalid(
                    format!("lengths[{i}]"),
                    format!("must be >= 0, got {len}"),
                ));
            }
        }

        let [toe_x, shoulder_x] = [self.limits[0][0], self.limits[1][0]];
        if toe_x > self.pivot[0] || self.pivot[0] > shoulder_x {
            return Err(Error::parameter_invalid(
                "pivot.x",
                format!(
                    "must lie between the limits, got {} outside [{toe_x}, {shoulder_x}]",
                    self.pivot[0]
                ),
            ));
        }
        Ok(())
    }
}

/// Where the linear segment hands over to a curved one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    /// Input coordinate
    pub x: f64,
    /// Output coordinate
    pub y: f64,
}

/// Coordinate on the line of slope `slope` that lies `distance` (measured
/// along the line, projected onto one axis) away from `coordinate`.
#[inline]
pub fn linear_breakpoint(distance: f64, slope: f64, coordinate: f64) -> f64 {
    distance / (slope * slope + 1.0).sqrt() + coordinate
}

#[inline]
fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Solves the segment scale so that the curve leaving `(tx, ty)` with
/// `slope` passes through `(lx, ly)`.
///
/// Returns 0.0 when the configuration has no solution.
pub fn segment_scale(lx: f64, ly: f64, tx: f64, ty: f64, power: f64, slope: f64) -> f64 {
    let run = slope * (lx - tx);
    let term_a = finite_or_zero(run.powf(-power));
    let term_b = finite_or_zero(finite_or_zero(run / (ly - ty)).powf(power)) - 1.0;
    let product = term_a * term_b;
    if product <= 0.0 {
        return 0.0;
    }
    finite_or_zero(product.powf(-1.0 / power))
}

/// `t / (1 + t^p)^(1/p)`, rising from 0 toward 1 for positive `t`.
#[inline]
pub fn exponential_curve(t: f64, power: f64) -> f64 {
    if t > 0.0 {
        // Same function, without overflowing t^p for large t.
        finite_or_zero(1.0 / (t.powf(-power) + 1.0).powf(1.0 / power))
    } else {
        finite_or_zero(t / (1.0 + t.powf(power)).powf(1.0 / power))
    }
}

#[inline]
fn curve_segment(x: f64, scale: f64, slope: f64, at: Breakpoint, power: f64) -> f64 {
    if scale == 0.0 {
        return at.y;
    }
    scale * exponential_curve(slope * (x - at.x) / scale, power) + at.y
}

/// A sigmoid with its breakpoints and scales solved.
///
/// # Example
///
/// ```rust
/// use agx_curve::{Sigmoid, SigmoidParams};
///
/// let curve = Sigmoid::new(SigmoidParams::default()).unwrap();
/// assert!((curve.eval(0.5) - 0.5).abs() < 1e-12);
/// assert!((curve.eval(1.0) - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sigmoid {
    params: SigmoidParams,
    toe: Breakpoint,
    shoulder: Breakpoint,
    toe_scale: f64,
    shoulder_scale: f64,
}

impl Sigmoid {
    /// Validates `params` and solves the curve.
    pub fn new(params: SigmoidParams) -> Result<Self> {
        params.validate()?;
        Ok(Self::new_unchecked(params))
    }

    /// Solves the curve without validating `params`.
    pub fn new_unchecked(params: SigmoidParams) -> Self {
        let SigmoidParams {
            pivot: [px, py],
            slope,
            powers,
            limits,
            lengths,
        } = params;

        let toe = Breakpoint {
            x: linear_breakpoint(-lengths[0], slope, px),
            y: linear_breakpoint(-slope * lengths[0], slope, py),
        };
        let shoulder = Breakpoint {
            x: linear_breakpoint(lengths[1], slope, px),
            y: linear_breakpoint(slope * lengths[1], slope, py),
        };

        // The toe is the shoulder problem mirrored through (0.5, 0.5).
        let toe_scale = -segment_scale(
            1.0 - limits[0][0],
            1.0 - limits[0][1],
            1.0 - toe.x,
            1.0 - toe.y,
            powers[0],
            slope,
        );
        let shoulder_scale = segment_scale(
            limits[1][0],
            limits[1][1],
            shoulder.x,
            shoulder.y,
            powers[1],
            slope,
        );

        trace!(
            toe_x = toe.x,
            shoulder_x = shoulder.x,
            toe_scale,
            shoulder_scale,
            "Sigmoid::new"
        );

        Self {
            params,
            toe,
            shoulder,
            toe_scale,
            shoulder_scale,
        }
    }

    /// Parameters the curve was built from.
    #[inline]
    pub fn params(&self) -> &SigmoidParams {
        &self.params
    }

    /// Lower end of the linear segment.
    #[inline]
    pub fn toe(&self) -> Breakpoint {
        self.toe
    }

    /// Upper end of the linear segment.
    #[inline]
    pub fn shoulder(&self) -> Breakpoint {
        self.shoulder
    }

    /// Signed toe scale, zero or negative.
    #[inline]
    pub fn toe_scale(&self) -> f64 {
        self.toe_scale
    }

    /// Shoulder scale, zero or positive.
    #[inline]
    pub fn shoulder_scale(&self) -> f64 {
        self.shoulder_scale
    }

    /// Value the toe approaches as x goes to negative infinity.
    pub fn toe_asymptote(&self) -> f64 {
        self.toe.y + self.toe_scale
    }

    /// Value the shoulder approaches as x goes to infinity.
    pub fn shoulder_asymptote(&self) -> f64 {
        self.shoulder.y + self.shoulder_scale
    }

    /// Evaluates the curve at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        let SigmoidParams { slope, powers, .. } = self.params;
        if x < self.toe.x {
            curve_segment(x, self.toe_scale, slope, self.toe, powers[0])
        } else if x <= self.shoulder.x {
            self.toe.y + slope * (x - self.toe.x)
        } else {
            curve_segment(x, self.shoulder_scale, slope, self.shoulder, powers[1])
        }
    }

    /// Evaluates the curve over a slice, preserving order.
    ///
    /// Long inputs are split across the rayon pool. The result is the same
    /// as calling [`eval`](Self::eval) on each element.
    pub fn eval_batch(&self, xs: &[f64]) -> Vec<f64> {
        if xs.len() >= PARALLEL_THRESHOLD {
            xs.par_iter().map(|&x| self.eval(x)).collect()
        } else {
            xs.iter().map(|&x| self.eval(x)).collect()
        }
    }
}

/// Evaluates the sigmoid described by `params` over `xs`.
///
/// `params` are not validated; use [`Sigmoid::new`] for that.
///
/// ```rust
/// use agx_curve::{evaluate, SigmoidParams};
///
/// let ys = evaluate(&[0.0, 0.5, 1.0], &SigmoidParams::default());
/// assert_eq!(ys.len(), 3);
/// assert!((ys[1] - 0.5).abs() < 1e-12);
/// ```
pub fn evaluate(xs: &[f64], params: &SigmoidParams) -> Vec<f64> {
    Sigmoid::new_unchecked(*params).eval_batch(xs)
}
