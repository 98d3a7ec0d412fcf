//! # agx-curve
//!
//! The AgX picture formation curve.
//!
//! - [`Sigmoid`] - Piecewise curve with a linear middle and power toe/shoulder
//! - [`log2`] - Normalized log2 exposure encoding around middle grey
//! - [`CurveSample`] - Validated samples of a curve over a uniform grid
//! - [`Lut1D`] - Interpolated lookup over sampled values
//! - [`FormationCurve`] - Log range and curve defaults of the formation chain
//!
//! # Usage
//!
//! ```rust
//! use agx_curve::FormationCurve;
//!
//! let sample = FormationCurve::default().sample().unwrap();
//! assert_eq!(sample.len(), 4096);
//! assert!(sample.ys().windows(2).all(|w| w[1] >= w[0]));
//! ```
//!
//! # Dependencies
//!
//! - `agx-core` - Error types
//! - [`rayon`] - Parallel batch evaluation
//! - [`serde`] - Settings deserialization
//! - [`tracing`] - Diagnostics
//!
//! # Used By
//!
//! - `agx-ocio` - Log allocation of the formation config
//! - `agx-cli` - `curve` command

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod formation;
pub mod log2;
mod lut;
mod sample;
pub mod sigmoid;

pub use formation::FormationCurve;
pub use lut::Lut1D;
pub use sample::{linspace, CurveSample, DEFAULT_SAMPLES};
pub use sigmoid::{evaluate, Breakpoint, Sigmoid, SigmoidParams};
