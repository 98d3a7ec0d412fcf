//! The AgX (SB2383) picture formation config.
//!
//! Builds the full config from [`FormationSettings`]:
//!
//! ```text
//! Linear BT.709 ──> AgX Log (SB2383) ──> LUT ──> 2.2 decode ──> destination
//!                   clamp, working        sigmoid    matrix^-1, 2.2 encode
//!                   matrix, lg2
//! ```
//!
//! The sigmoid LUT is referenced by file name and sampled separately with
//! [`FormationCurve::sample`].
//!
//! # Example
//!
//! ```
//! use agx_ocio::formation::{build_config, FormationSettings};
//!
//! let config = build_config(&FormationSettings::default()).unwrap();
//! assert_eq!(config.roles().reference(), Some("Linear BT.709"));
//! assert_eq!(config.displays().len(), 3);
//! ```

use agx_curve::{FormationCurve, SigmoidParams, DEFAULT_SAMPLES};
use agx_curve::formation::DISPLAY_EXPONENT;
use agx_curve::log2::MIDDLE_GREY;
use agx_primaries::{
    rgb_to_rgb_matrix, Cctf, RgbColourspace, WorkingSpacePair, WorkingSpaceParams,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::colorspace::{ColorSpace, Encoding};
use crate::config::Config;
use crate::config_builder::ConfigBuilder;
use crate::display::{Display, View};
use crate::error::{OcioError, OcioResult};
use crate::role::names;
use crate::transform::Transform;

/// File name of the formation LUT, relative to [`LUT_SEARCH_PATH`].
pub const LUT_FILE: &str = "AgX_Default_Contrast.spi1d";

/// Directory next to the config holding LUTs.
pub const LUT_SEARCH_PATH: &str = "LUTs";

/// Config file name written by the generator.
pub const CONFIG_FILE: &str = "config.ocio";

/// Config description.
pub const DESCRIPTION: &str =
    "A dangerous picture formation chain designed for Eduardo Suazo and Chris Brejon.";

/// Color space names.
pub mod spaces {
    /// Scene linear reference.
    pub const LINEAR: &str = "Linear BT.709";
    /// Log encoding in the working space.
    pub const AGX_LOG: &str = "AgX Log (SB2383)";
    /// Pure 2.2 power encoding.
    pub const EOTF_22: &str = "2.2 EOTF Encoding";
    /// Pure 2.4 power encoding.
    pub const EOTF_24: &str = "2.4 EOTF Encoding";
    /// sRGB display.
    pub const SRGB: &str = "sRGB";
    /// Display P3 display.
    pub const DISPLAY_P3: &str = "Display P3";
    /// BT.1886 display.
    pub const BT1886: &str = "BT.1886";
    /// Formed image for 2.2 displays.
    pub const AGX_BASE: &str = "AgX Base";
    /// Formed image for BT.1886 displays.
    pub const AGX_BASE_BT1886: &str = "AgX Base BT.1886";
    /// Formed image for Display P3 displays.
    pub const AGX_BASE_DISPLAY_P3: &str = "AgX Base Display P3";
    /// Non-color data.
    pub const GENERIC_DATA: &str = "Generic Data";
}

/// View name of the untouched display encoding.
pub const VIEW_NATIVE: &str = "Display Native";

/// View name of the formed image.
pub const VIEW_AGX: &str = "AgX";

/// Generator settings.
///
/// Field names match the long command line flags. Missing fields in a
/// settings file take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormationSettings {
    /// Toe power of the sigmoid.
    pub exponent_toe: f64,
    /// Shoulder power of the sigmoid.
    pub exponent_shoulder: f64,
    /// Slope through the fulcrum.
    pub fulcrum_slope: f64,
    /// Fulcrum position on the normalized log2 axis.
    pub fulcrum_input: f64,
    /// Fulcrum output value.
    pub fulcrum_output: f64,
    /// Stops below middle grey at the bottom of the log range.
    pub limit_low: f64,
    /// Stops above middle grey at the top of the log range.
    pub limit_high: f64,
    /// Working space inset per primary.
    pub primaries_inset: [f64; 3],
    /// Destination space inset per primary; the working inset when unset.
    pub primaries_outset: Option<[f64; 3]>,
    /// Rotation per primary in degrees.
    pub primaries_rotate: [f64; 3],
    /// Whitepoint shift of the destination space.
    pub tinting_outset: f64,
    /// Direction of the whitepoint shift in degrees.
    pub tinting_rotate: f64,
    /// LUT sample count.
    pub samples: usize,
}

impl Default for FormationSettings {
    fn default() -> Self {
        let (limit_low, limit_high): (f64, f64) = (-10.0, 6.5);
        Self {
            exponent_toe: 1.5,
            exponent_shoulder: 1.5,
            fulcrum_slope: 2.4,
            fulcrum_input: limit_low.abs() / (limit_high - limit_low),
            fulcrum_output: DISPLAY_CCTF.encode(MIDDLE_GREY),
            limit_low,
            limit_high,
            primaries_inset: [0.15, 0.10, 0.10],
            primaries_outset: None,
            primaries_rotate: [4.5, -0.5, -2.0],
            tinting_outset: 0.0,
            tinting_rotate: 0.0,
            samples: DEFAULT_SAMPLES,
        }
    }
}

impl FormationSettings {
    /// Parses settings from YAML. Missing keys keep their defaults.
    pub fn from_yaml(text: &str) -> OcioResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parameters of the working space.
    pub fn working_params(&self) -> WorkingSpaceParams {
        WorkingSpaceParams {
            primaries_rotate: self.primaries_rotate,
            primaries_inset: self.primaries_inset,
            achromatic_rotate: 0.0,
            achromatic_outset: 0.0,
        }
    }

    /// Parameters of the destination space, before the 180 degree turn
    /// [`WorkingSpacePair::derive`] applies to the tint.
    pub fn destination_params(&self) -> WorkingSpaceParams {
        WorkingSpaceParams {
            primaries_rotate: self.primaries_rotate,
            primaries_inset: self.primaries_outset.unwrap_or(self.primaries_inset),
            achromatic_rotate: self.tinting_rotate,
            achromatic_outset: self.tinting_outset,
        }
    }

    /// Log range and sigmoid of the LUT.
    pub fn curve(&self) -> FormationCurve {
        FormationCurve {
            min_ev: self.limit_low,
            max_ev: self.limit_high,
            grey: MIDDLE_GREY,
            sigmoid: SigmoidParams {
                pivot: [self.fulcrum_input, self.fulcrum_output],
                slope: self.fulcrum_slope,
                powers: [self.exponent_toe, self.exponent_shoulder],
                ..Default::default()
            },
            samples: self.samples,
        }
    }

    /// Derives the working and destination spaces from BT.709.
    pub fn working_spaces(&self) -> OcioResult<WorkingSpacePair> {
        let pair = WorkingSpacePair::derive(
            &RgbColourspace::bt709(),
            &self.working_params(),
            &self.destination_params(),
        )?;
        Ok(pair)
    }
}

/// Encoding transfer function of the display spaces.
const DISPLAY_CCTF: Cctf = Cctf::Gamma(DISPLAY_EXPONENT);

/// Encodes linear light with a pure power function, as an inverse exponent.
fn power_encoding(cctf: Cctf) -> OcioResult<Transform> {
    let gamma = cctf.exponent().ok_or_else(|| OcioError::InvalidTransform {
        reason: format!("{cctf} is not a pure power function"),
    })?;
    Ok(Transform::exponent(gamma).inverse())
}

/// Builds the AgX config.
///
/// # Errors
///
/// - [`OcioError::Core`] if the curve parameters are invalid or a working
///   space cannot be derived
/// - [`OcioError::Validation`] if the assembled config is inconsistent
pub fn build_config(settings: &FormationSettings) -> OcioResult<Config> {
    let curve = settings.curve();
    curve.validate()?;

    let pair = settings.working_spaces()?;
    let matrix_working = pair.inset_matrix()?;
    let matrix_destination = pair.outset_matrix()?;
    let matrix_p3 = rgb_to_rgb_matrix(&RgbColourspace::srgb(), &RgbColourspace::display_p3())?;
    debug!(
        working = ?pair.working.primaries,
        destination = ?pair.destination.primaries,
        whitepoint = %pair.destination.whitepoint,
        "Derived working spaces"
    );

    let colorspaces = vec![
        ColorSpace::builder(spaces::LINEAR)
            .family("Colourspaces")
            .description("Open Domain Linear BT.709 Tristimulus")
            .aliases(["Linear", "Linear Tristimulus"])
            .encoding(Encoding::SceneLinear)
            .build(),
        ColorSpace::builder(spaces::AGX_LOG)
            .family("Log Encodings")
            .description("AgX Log, (SB2383)")
            .aliases(["Log", "AgX Log", "SB2383", "AgX SB2383 Log"])
            .encoding(Encoding::Log)
            .from_reference_chain(vec![
                Transform::range_min(0.0, 0.0),
                Transform::from_mat3(&matrix_working),
                Transform::allocation_lg2(curve.allocation_vars()),
            ])
            .build(),
        ColorSpace::builder(spaces::EOTF_22)
            .family("Utilities/Curves")
            .description("2.2 Exponent EOTF Encoding")
            .aliases([spaces::EOTF_22, "sRGB EOTF Encoding"])
            .from_reference_chain(vec![power_encoding(DISPLAY_CCTF)?])
            .build(),
        ColorSpace::builder(spaces::EOTF_24)
            .family("Utilities/Curves")
            .description("2.4 Exponent EOTF Encoding")
            .aliases([spaces::EOTF_24, "BT.1886 EOTF Encoding"])
            .from_reference_chain(vec![power_encoding(Cctf::BT1886)?])
            .build(),
        ColorSpace::builder(spaces::SRGB)
            .family("Displays/SDR")
            .description("sRGB IEC 61966-2-1 2.2 Exponent Reference EOTF Display")
            .encoding(Encoding::Sdr)
            .from_reference_chain(vec![Transform::colorspace(spaces::LINEAR, spaces::EOTF_22)])
            .build(),
        ColorSpace::builder(spaces::DISPLAY_P3)
            .family("Displays/SDR")
            .description("Display P3 2.2 Exponent EOTF Display")
            .encoding(Encoding::Sdr)
            .from_reference_chain(vec![
                Transform::from_mat3(&matrix_p3),
                Transform::colorspace(spaces::LINEAR, spaces::EOTF_22),
            ])
            .build(),
        ColorSpace::builder(spaces::BT1886)
            .family("Displays/SDR")
            .description("BT.1886 2.4 Exponent EOTF Display")
            .encoding(Encoding::Sdr)
            .from_reference_chain(vec![Transform::colorspace(spaces::LINEAR, spaces::EOTF_24)])
            .build(),
        ColorSpace::builder(spaces::AGX_BASE)
            .family("Image Formation")
            .description("AgX Base Image Encoding")
            .encoding(Encoding::Sdr)
            .from_reference_chain(vec![
                Transform::colorspace(spaces::LINEAR, spaces::AGX_LOG),
                Transform::file(LUT_FILE),
                Transform::exponent(DISPLAY_EXPONENT),
                Transform::from_mat3(&matrix_destination).inverse(),
                Transform::exponent(DISPLAY_EXPONENT).inverse(),
            ])
            .build(),
        ColorSpace::builder(spaces::AGX_BASE_BT1886)
            .family("Views/AgX BT.1886")
            .description("AgX Base Image Encoding for BT.1886 Displays")
            .encoding(Encoding::Sdr)
            .from_reference_chain(vec![
                Transform::colorspace(spaces::LINEAR, spaces::AGX_BASE),
                Transform::colorspace(spaces::EOTF_22, spaces::EOTF_24),
            ])
            .build(),
        ColorSpace::builder(spaces::AGX_BASE_DISPLAY_P3)
            .family("Views/AgX Display P3")
            .description("AgX Base Image Encoding for Display P3 Displays")
            .encoding(Encoding::Sdr)
            .from_reference_chain(vec![
                Transform::colorspace(spaces::LINEAR, spaces::AGX_BASE),
                Transform::colorspace(spaces::EOTF_22, spaces::DISPLAY_P3),
            ])
            .build(),
        ColorSpace::builder(spaces::GENERIC_DATA)
            .family("Data/Generic Data")
            .description("Generic data encoding")
            .aliases(["Non-Color", "Raw"])
            .encoding(Encoding::Data)
            .build(),
    ];

    let displays = [
        (spaces::SRGB, spaces::AGX_BASE),
        (spaces::DISPLAY_P3, spaces::AGX_BASE_DISPLAY_P3),
        (spaces::BT1886, spaces::AGX_BASE_BT1886),
    ]
    .map(|(display, formed)| {
        Display::new(display)
            .with_view(View::new(VIEW_NATIVE, display))
            .with_view(View::new(VIEW_AGX, formed))
    });

    let display_encoded = [
        names::COLOR_PICKING,
        names::COLOR_TIMING,
        names::COMPOSITING_LOG,
        names::DEFAULT,
        names::DEFAULT_BYTE,
        names::DEFAULT_SEQUENCER,
        names::MATTE_PAINT,
        names::TEXTURE_PAINT,
    ];
    let linear = [names::DEFAULT_FLOAT, names::REFERENCE, names::SCENE_LINEAR];

    let mut builder = ConfigBuilder::new("")
        .description(DESCRIPTION)
        .search_path(LUT_SEARCH_PATH)
        .add_colorspaces(colorspaces)
        .add_displays(displays)
        .set_role(names::DATA, spaces::GENERIC_DATA);
    for role in display_encoded {
        builder = builder.set_role(role, spaces::SRGB);
    }
    for role in linear {
        builder = builder.set_role(role, spaces::LINEAR);
    }

    let config = builder.build()?;
    info!(
        colorspaces = config.colorspaces().len(),
        displays = config.displays().len(),
        "Built AgX config"
    );
    Ok(config)
}
