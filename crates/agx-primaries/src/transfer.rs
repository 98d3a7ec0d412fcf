//! Colour component transfer functions carried by a colourspace.
//!
//! The working space builder never evaluates these: it copies them from the
//! reference colourspace onto the derived one. The config generator encodes
//! display grey with them and writes pure power functions as OCIO exponents.
//!
//! # Range
//!
//! - Input/Output: [0, 1], negative input maps to 0 for the power functions

use serde::{Deserialize, Serialize};
use std::fmt;

/// A colour component transfer function.
///
/// # Example
///
/// ```rust
/// use agx_primaries::Cctf;
///
/// let encoded = Cctf::Gamma(2.2).encode(0.18);
/// assert!((Cctf::Gamma(2.2).decode(encoded) - 0.18).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cctf {
    /// Identity.
    #[default]
    Linear,
    /// Pure power function, `V = L^(1/gamma)`.
    Gamma(f64),
    /// IEC 61966-2-1 piecewise sRGB function.
    Srgb,
    /// ITU-R BT.709 camera OETF.
    Rec709,
}

impl Cctf {
    /// BT.1886 reference EOTF with zero black level.
    pub const BT1886: Self = Self::Gamma(2.4);

    /// Encodes linear light.
    pub fn encode(self, l: f64) -> f64 {
        match self {
            Self::Linear => l,
            Self::Gamma(g) => {
                if l <= 0.0 {
                    0.0
                } else {
                    l.powf(1.0 / g)
                }
            }
            Self::Srgb => {
                if l <= 0.0031308 {
                    l * 12.92
                } else {
                    1.055 * l.powf(1.0 / 2.4) - 0.055
                }
            }
            Self::Rec709 => {
                if l < 0.018 {
                    l * 4.5
                } else {
                    1.099 * l.powf(0.45) - 0.099
                }
            }
        }
    }

    /// Decodes an encoded value back to linear light.
    pub fn decode(self, v: f64) -> f64 {
        match self {
            Self::Linear => v,
            Self::Gamma(g) => {
                if v <= 0.0 {
                    0.0
                } else {
                    v.powf(g)
                }
            }
            Self::Srgb => {
                if v <= 0.04045 {
                    v / 12.92
                } else {
                    ((v + 0.055) / 1.055).powf(2.4)
                }
            }
            Self::Rec709 => {
                if v < 0.081 {
                    v / 4.5
                } else {
                    ((v + 0.099) / 1.099).powf(1.0 / 0.45)
                }
            }
        }
    }

    /// Exponent of a pure power function, `None` for piecewise functions.
    pub fn exponent(self) -> Option<f64> {
        match self {
            Self::Gamma(g) => Some(g),
            _ => None,
        }
    }
}

impl fmt::Display for Cctf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::Gamma(g) => write!(f, "gamma {g}"),
            Self::Srgb => f.write_str("sRGB"),
            Self::Rec709 => f.write_str("BT.709"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_roundtrip() {
        for cctf in [Cctf::Linear, Cctf::Gamma(2.2), Cctf::BT1886, Cctf::Srgb, Cctf::Rec709] {
            for v in [0.0, 0.001, 0.018, 0.18, 0.5, 1.0] {
                assert_abs_diff_eq!(cctf.decode(cctf.encode(v)), v, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_srgb_mid_grey() {
        assert_abs_diff_eq!(Cctf::Srgb.decode(0.5), 0.214, epsilon = 0.001);
    }

    #[test]
    fn test_gamma_clamps_negative() {
        assert_eq!(Cctf::Gamma(2.2).encode(-1.0), 0.0);
        assert_eq!(Cctf::Gamma(2.2).exponent(), Some(2.2));
        assert_eq!(Cctf::Srgb.exponent(), None);
    }
}
