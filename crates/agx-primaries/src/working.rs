//! Working space derivation by rotating, intersecting and scaling primaries.
//!
//! The AgX working space is a reshaped version of a reference gamut. Each
//! primary is moved along the reference gamut boundary by casting a ray
//! from the whitepoint, rotated by a per-channel angle, and picking the point
//! where it leaves the reference triangle. The hull points are then pulled
//! toward the whitepoint by an inset fraction. The whitepoint itself can be
//! shifted toward a rotated achromatic hull point to tint the neutral axis.
//!
//! ```text
//!             G
//!            / \
//!           /   \          W: whitepoint
//!          /  W--*-->      *: hull point of the rotated ray
//!         /   |   \        inset moves * back toward W
//!        B----+----R
//! ```
//!
//! # Usage
//!
//! ```rust
//! use agx_primaries::{build_working_space, RgbColourspace, WorkingSpaceParams};
//!
//! let bt709 = RgbColourspace::bt709();
//! let working = build_working_space(&bt709, &WorkingSpaceParams::default(), "AgX Working").unwrap();
//! assert!(working.gamut().signed_area() < bt709.gamut().signed_area());
//! ```

use crate::{rgb_to_rgb_matrix, RgbColourspace};
use agx_core::{Channel, Error, Result};
use agx_math::{Mat3, Point2, Ray2, RayHit, Triangle};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Distance factor used to push a primary away from the whitepoint before
/// rotating it. Any value above 1 gives the same ray.
pub const ARBITRARY_SCALE: f64 = 4.0;

/// Rotation and inset parameters for a derived space.
///
/// Angles are in degrees, counter-clockwise positive. Insets are fractions of
/// the whitepoint to hull distance: 0 keeps the hull point, values toward 1
/// collapse it onto the whitepoint, negative values push it outward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkingSpaceParams {
    /// Per-primary rotation in degrees (R, G, B)
    pub primaries_rotate: [f64; 3],
    /// Per-primary inset fraction (R, G, B)
    pub primaries_inset: [f64; 3],
    /// Rotation of the achromatic ray in degrees, 0 points straight up
    pub achromatic_rotate: f64,
    /// Fraction by which the whitepoint moves toward the achromatic hull point
    pub achromatic_outset: f64,
}

impl Default for WorkingSpaceParams {
    fn default() -> Self {
        Self {
            primaries_rotate: [1.75, -0.5, -1.0],
            primaries_inset: [0.15, 0.15, 0.10],
            achromatic_rotate: 0.0,
            achromatic_outset: 0.0,
        }
    }
}

impl WorkingSpaceParams {
    /// Parameters that reproduce the reference space unchanged.
    pub const IDENTITY: Self = Self {
        primaries_rotate: [0.0; 3],
        primaries_inset: [0.0; 3],
        achromatic_rotate: 0.0,
        achromatic_outset: 0.0,
    };

    /// Rejects non-finite values.
    pub fn validate(&self) -> Result<()> {
        for channel in Channel::RGB {
            let Some(i) = channel.index() else { continue };
            if !self.primaries_rotate[i].is_finite() {
                return Err(Error::parameter_invalid(
                    format!("primaries_rotate[{channel}]"),
                    "must be finite",
                ));
            }
            if !self.primaries_inset[i].is_finite() {
                return Err(Error::parameter_invalid(
                    format!("primaries_inset[{channel}]"),
                    "must be finite",
                ));
            }
        }
        if !self.achromatic_rotate.is_finite() {
            return Err(Error::parameter_invalid("achromatic_rotate", "must be finite"));
        }
        if !self.achromatic_outset.is_finite() {
            return Err(Error::parameter_invalid("achromatic_outset", "must be finite"));
        }
        Ok(())
    }
}

/// Derives a new colourspace from `reference`.
///
/// Zero rotations and insets reproduce the reference primaries and
/// whitepoint bit for bit. The whitepoint name and transfer functions of the
/// reference are carried over unchanged.
///
/// # Errors
///
/// - [`Error::ParameterInvalid`] for non-finite parameters
/// - [`Error::GeometricDegeneracy`] when the whitepoint is outside the
///   reference gamut, or a rotated ray misses the boundary or crosses the
///   edge opposite its own primary
pub fn build_working_space(
    reference: &RgbColourspace,
    params: &WorkingSpaceParams,
    name: impl Into<String>,
) -> Result<RgbColourspace> {
    params.validate()?;
    let name = name.into();
    trace!(reference = %reference.name, name = %name, "build_working_space");

    let white = reference.whitepoint;
    let gamut = reference.gamut();
    if !gamut.contains(white) {
        return Err(Error::geometric_degeneracy(
            Channel::Achromatic,
            format!("whitepoint {white} lies outside the '{}' gamut", reference.name),
        ));
    }

    let mut primaries = reference.primaries;
    for channel in Channel::RGB {
        let Some(i) = channel.index() else { continue };
        let hull = primary_hull(&gamut, white, channel, i, params.primaries_rotate[i])?;
        primaries[i] = hull.scale_about(white, 1.0 - params.primaries_inset[i]);
        trace!(%channel, hull = %hull, primary = %primaries[i], "primary");
    }

    let achromatic = achromatic_hull(&gamut, white, params.achromatic_rotate)?;
    let whitepoint = white.scale_about(achromatic, 1.0 - params.achromatic_outset);

    debug!(
        name = %name,
        red = %primaries[0],
        green = %primaries[1],
        blue = %primaries[2],
        white = %whitepoint,
        "Derived working space"
    );

    Ok(RgbColourspace {
        name,
        primaries,
        whitepoint,
        whitepoint_name: reference.whitepoint_name.clone(),
        cctf_encoding: reference.cctf_encoding,
        cctf_decoding: reference.cctf_decoding,
    })
}

/// Boundary point of the ray from `white` through primary `i`, rotated by `degrees`.
fn primary_hull(
    gamut: &Triangle,
    white: Point2,
    channel: Channel,
    i: usize,
    degrees: f64,
) -> Result<Point2> {
    let target = gamut.vertices[i]
        .scale_about(white, ARBITRARY_SCALE)
        .rotate_about(white, degrees);
    let hit = cast(gamut, white, target, channel)?;

    // Any vertex touches an edge adjacent to this primary.
    if hit.vertex.is_none() && !Triangle::edges_at_vertex(i).contains(&hit.edge) {
        return Err(Error::geometric_degeneracy(
            channel,
            format!("ray rotated by {degrees} degrees crosses the edge opposite the primary"),
        ));
    }
    Ok(hit.point)
}

/// Boundary point of the upward ray from `white`, rotated by `degrees`.
fn achromatic_hull(gamut: &Triangle, white: Point2, degrees: f64) -> Result<Point2> {
    let target = Point2::new(white.x, ARBITRARY_SCALE * white.y).rotate_about(white, degrees);
    Ok(cast(gamut, white, target, Channel::Achromatic)?.point)
}

fn cast(gamut: &Triangle, white: Point2, target: Point2, channel: Channel) -> Result<RayHit> {
    gamut
        .intersect_ray(&Ray2::through(white, target))
        .ok_or_else(|| Error::geometric_degeneracy(channel, "ray misses the gamut boundary"))
}

/// The working and destination spaces of the formation chain.
///
/// The working space is where the log encoding and curve operate. The
/// destination space is derived with its own parameters and the achromatic
/// rotation turned around by 180 degrees, so a tint applied on the way in is
/// removed on the way out.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingSpacePair {
    /// Space both are derived from
    pub reference: RgbColourspace,
    /// Inset working space
    pub working: RgbColourspace,
    /// Outset destination space
    pub destination: RgbColourspace,
}

impl WorkingSpacePair {
    /// Derives both spaces from `reference`.
    pub fn derive(
        reference: &RgbColourspace,
        working: &WorkingSpaceParams,
        destination: &WorkingSpaceParams,
    ) -> Result<Self> {
        let working_space =
            build_working_space(reference, working, "Custom AgX Working Space")?;

        let mut destination = *destination;
        destination.achromatic_rotate += 180.0;
        let destination_space =
            build_working_space(reference, &destination, "Custom AgX Destination Space")?;

        Ok(Self {
            reference: reference.clone(),
            working: working_space,
            destination: destination_space,
        })
    }

    /// Converts working RGB to reference RGB.
    pub fn inset_matrix(&self) -> Result<Mat3> {
        rgb_to_rgb_matrix(&self.working, &self.reference)
    }

    /// Converts destination RGB to working RGB.
    ///
    /// The formation chain applies it inverted, from working to destination.
    pub fn outset_matrix(&self) -> Result<Mat3> {
        rgb_to_rgb_matrix(&self.destination, &self.working)
    }
}
