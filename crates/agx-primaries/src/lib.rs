//! # agx-primaries
//!
//! RGB colourspaces, RGB-XYZ matrix generation and the working space builder.
//!
//! A colourspace is defined by the CIE xy chromaticities of its three
//! primaries and its whitepoint. This crate turns those into the 3x3 matrices
//! that move RGB values between spaces, and derives the compressed AgX
//! working and destination spaces from a reference space (see [`working`]).
//!
//! # Included Colourspaces
//!
//! | Colourspace | Whitepoint | Primary Use |
//! |-------------|------------|-------------|
//! | ITU-R BT.709 | D65 | Reference for the formation chain |
//! | Display P3 | D65 | Wide gamut displays |
//! | ITU-R BT.2020 | D65 | UHDTV |
//!
//! # Usage
//!
//! ```rust
//! use agx_primaries::{RgbColourspace, rgb_to_xyz_matrix};
//! use agx_math::Vec3;
//!
//! let bt709 = RgbColourspace::bt709();
//! let m = rgb_to_xyz_matrix(&bt709).unwrap();
//!
//! // White maps to Y = 1
//! let white = m * Vec3::ONE;
//! assert!((white.y - 1.0).abs() < 1e-12);
//! ```
//!
//! # Dependencies
//!
//! - `agx-core` - Error types
//! - `agx-math` - Matrices and chromaticity geometry
//! - [`serde`] - Settings deserialization of [`WorkingSpaceParams`]
//! - [`tracing`] - Diagnostics
//!
//! # Used By
//!
//! - `agx-ocio` - Matrix transforms of the formation config
//! - `agx-cli` - `working-space` command

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod transfer;
pub mod working;

pub use transfer::Cctf;
pub use working::{build_working_space, WorkingSpacePair, WorkingSpaceParams, ARBITRARY_SCALE};

use agx_core::{Error, Result};
use agx_math::{Mat3, Point2, Triangle, Vec3};

/// D65 whitepoint chromaticity.
pub const D65: Point2 = Point2::new(0.3127, 0.3290);

/// ITU-R BT.709 primaries (R, G, B).
pub const BT709_PRIMARIES: [Point2; 3] = [
    Point2::new(0.64, 0.33),
    Point2::new(0.30, 0.60),
    Point2::new(0.15, 0.06),
];

/// Display P3 primaries (R, G, B).
pub const DISPLAY_P3_PRIMARIES: [Point2; 3] = [
    Point2::new(0.680, 0.320),
    Point2::new(0.265, 0.690),
    Point2::new(0.150, 0.060),
];

/// ITU-R BT.2020 primaries (R, G, B).
pub const BT2020_PRIMARIES: [Point2; 3] = [
    Point2::new(0.708, 0.292),
    Point2::new(0.170, 0.797),
    Point2::new(0.131, 0.046),
];

/// An RGB colourspace.
///
/// # Example
///
/// ```rust
/// use agx_primaries::{Cctf, RgbColourspace, BT709_PRIMARIES, D65};
///
/// let linear = RgbColourspace::new("Linear BT.709", BT709_PRIMARIES, D65)
///     .with_whitepoint_name("D65")
///     .with_cctf(Cctf::Linear, Cctf::Linear);
/// assert_eq!(linear.whitepoint_name.as_deref(), Some("D65"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RgbColourspace {
    /// Colourspace name
    pub name: String,
    /// Red, green and blue primary chromaticities
    pub primaries: [Point2; 3],
    /// Whitepoint chromaticity
    pub whitepoint: Point2,
    /// Whitepoint name, if it is a named illuminant
    pub whitepoint_name: Option<String>,
    /// Encoding transfer function
    pub cctf_encoding: Cctf,
    /// Decoding transfer function
    pub cctf_decoding: Cctf,
}

impl RgbColourspace {
    /// Creates a linear colourspace.
    pub fn new(name: impl Into<String>, primaries: [Point2; 3], whitepoint: Point2) -> Self {
        Self {
            name: name.into(),
            primaries,
            whitepoint,
            whitepoint_name: None,
            cctf_encoding: Cctf::Linear,
            cctf_decoding: Cctf::Linear,
        }
    }

    /// Sets the whitepoint name.
    pub fn with_whitepoint_name(mut self, name: impl Into<String>) -> Self {
        self.whitepoint_name = Some(name.into());
        self
    }

    /// Sets the transfer functions.
    pub fn with_cctf(mut self, encoding: Cctf, decoding: Cctf) -> Self {
        self.cctf_encoding = encoding;
        self.cctf_decoding = decoding;
        self
    }

    /// ITU-R BT.709.
    pub fn bt709() -> Self {
        Self::new("ITU-R BT.709", BT709_PRIMARIES, D65)
            .with_whitepoint_name("D65")
            .with_cctf(Cctf::Rec709, Cctf::BT1886)
    }

    /// sRGB: BT.709 primaries with the piecewise sRGB function.
    pub fn srgb() -> Self {
        Self::new("sRGB", BT709_PRIMARIES, D65)
            .with_whitepoint_name("D65")
            .with_cctf(Cctf::Srgb, Cctf::Srgb)
    }

    /// Display P3.
    pub fn display_p3() -> Self {
        Self::new("Display P3", DISPLAY_P3_PRIMARIES, D65)
            .with_whitepoint_name("D65")
            .with_cctf(Cctf::Srgb, Cctf::Srgb)
    }

    /// ITU-R BT.2020.
    pub fn bt2020() -> Self {
        Self::new("ITU-R BT.2020", BT2020_PRIMARIES, D65)
            .with_whitepoint_name("D65")
            .with_cctf(Cctf::Rec709, Cctf::BT1886)
    }

    /// Gamut triangle on the chromaticity plane.
    #[inline]
    pub fn gamut(&self) -> Triangle {
        Triangle::new(self.primaries)
    }

    /// Whitepoint as XYZ with Y = 1.
    pub fn white_xyz(&self) -> Result<Vec3> {
        xy_to_xyz(self.whitepoint)
    }
}

/// Converts an xy chromaticity to XYZ with Y = 1.
///
/// Fails with [`Error::NumericSingularity`] when y is zero.
pub fn xy_to_xyz(p: Point2) -> Result<Vec3> {
    if p.y.abs() < 1e-10 || !p.is_finite() {
        return Err(Error::numeric_singularity(format!(
            "chromaticity {p} has no XYZ representation"
        )));
    }
    Ok(Vec3::new(p.x / p.y, 1.0, (1.0 - p.x - p.y) / p.y))
}

/// Computes the RGB to XYZ matrix of a colourspace.
///
/// # Algorithm
///
/// 1. Convert the primary and whitepoint chromaticities to XYZ (Y = 1)
/// 2. Solve `M * S = W` for the per-primary scale `S`
/// 3. Scale each primary column by its factor
///
/// Collapsed primaries (for example a working space with an inset of 1)
/// make `M` singular, which is reported as
/// [`Error::NumericSingularity`].
///
/// # Example
///
/// ```rust
/// use agx_primaries::{RgbColourspace, rgb_to_xyz_matrix};
///
/// let m = rgb_to_xyz_matrix(&RgbColourspace::bt709()).unwrap();
/// assert!((m.m[1][0] - 0.2126).abs() < 1e-4);
/// ```
pub fn rgb_to_xyz_matrix(colourspace: &RgbColourspace) -> Result<Mat3> {
    let [r, g, b] = colourspace.primaries;
    let r_xyz = xy_to_xyz(r)?;
    let g_xyz = xy_to_xyz(g)?;
    let b_xyz = xy_to_xyz(b)?;
    let w_xyz = colourspace.white_xyz()?;

    let m = Mat3::from_col_vecs(r_xyz, g_xyz, b_xyz);
    let m_inv = m.try_inverse(&format!("primary matrix of '{}'", colourspace.name))?;
    let s = m_inv * w_xyz;

    let out = Mat3::from_col_vecs(r_xyz * s.x, g_xyz * s.y, b_xyz * s.z);
    if !out.is_finite() {
        return Err(Error::numeric_singularity(format!(
            "RGB to XYZ matrix of '{}' is not finite",
            colourspace.name
        )));
    }
    Ok(out)
}

/// Computes the XYZ to RGB matrix of a colourspace.
///
/// This is the inverse of [`rgb_to_xyz_matrix`].
pub fn xyz_to_rgb_matrix(colourspace: &RgbColourspace) -> Result<Mat3> {
    rgb_to_xyz_matrix(colourspace)?
        .try_inverse(&format!("RGB to XYZ matrix of '{}'", colourspace.name))
}

/// Computes the matrix converting RGB values from `src` to `dst`.
///
/// The conversion goes through XYZ, `RGB_src -> XYZ -> RGB_dst`, with no
/// chromatic adaptation: the AgX spaces share or deliberately shift the
/// whitepoint of their reference.
///
/// # Example
///
/// ```rust
/// use agx_primaries::{RgbColourspace, rgb_to_rgb_matrix};
/// use agx_math::Mat3;
///
/// let m = rgb_to_rgb_matrix(&RgbColourspace::bt709(), &RgbColourspace::srgb()).unwrap();
/// assert!(m.max_abs_diff(&Mat3::IDENTITY) < 1e-12);
/// ```
pub fn rgb_to_rgb_matrix(src: &RgbColourspace, dst: &RgbColourspace) -> Result<Mat3> {
    let src_to_xyz = rgb_to_xyz_matrix(src)?;
    let xyz_to_dst = xyz_to_rgb_matrix(dst)?;
    Ok(xyz_to_dst * src_to_xyz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_bt709_matrix() {
        let m = rgb_to_xyz_matrix(&RgbColourspace::bt709()).unwrap();
        assert_abs_diff_eq!(m.m[0][0], 0.4124564, epsilon = 1e-4);
        assert_abs_diff_eq!(m.m[1][0], 0.2126729, epsilon = 1e-4);
        assert_abs_diff_eq!(m.m[2][2], 0.9503041, epsilon = 1e-4);
    }

    #[test]
    fn test_white_point() {
        for cs in [
            RgbColourspace::bt709(),
            RgbColourspace::display_p3(),
            RgbColourspace::bt2020(),
        ] {
            let m = rgb_to_xyz_matrix(&cs).unwrap();
            let white = m * Vec3::ONE;
            assert_abs_diff_eq!(white.y, 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(white.x, cs.white_xyz().unwrap().x, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_roundtrip() {
        let cs = RgbColourspace::display_p3();
        let to_xyz = rgb_to_xyz_matrix(&cs).unwrap();
        let to_rgb = xyz_to_rgb_matrix(&cs).unwrap();
        assert!((to_rgb * to_xyz).max_abs_diff(&Mat3::IDENTITY) < 1e-12);
    }

    #[test]
    fn test_rgb_to_rgb_p3() {
        let m = rgb_to_rgb_matrix(&RgbColourspace::srgb(), &RgbColourspace::display_p3()).unwrap();
        // Rows sum to one when whitepoints match
        for i in 0..3 {
            assert_abs_diff_eq!(m.row(i).dot(Vec3::ONE), 1.0, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(m.m[0][0], 0.8225, epsilon = 1e-3);
    }

    #[test]
    fn test_collapsed_primaries_are_singular() {
        let cs = RgbColourspace::new("Collapsed", [D65; 3], D65);
        let err = rgb_to_xyz_matrix(&cs).unwrap_err();
        assert!(err.is_singularity());
    }

    #[test]
    fn test_zero_y_chromaticity() {
        assert!(xy_to_xyz(Point2::new(0.3, 0.0)).is_err());
    }
}
