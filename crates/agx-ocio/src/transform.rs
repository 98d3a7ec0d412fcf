//! Transform definitions for the formation config.
//!
//! Only the transform types the AgX chain uses are modelled:
//! - Matrix transforms (working and destination spaces, display primaries)
//! - Range clamps and log2 allocation
//! - Exponent (pure power) encodings
//! - References to other colour spaces
//! - The formation LUT file
//!
//! Transforms are chained via [`GroupTransform`].

use agx_math::Mat3;

/// Transform application direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformDirection {
    /// Forward transform.
    #[default]
    Forward,
    /// Inverse transform.
    Inverse,
}

impl TransformDirection {
    /// Returns the opposite direction.
    #[inline]
    pub fn inverse(self) -> Self {
        match self {
            Self::Forward => Self::Inverse,
            Self::Inverse => Self::Forward,
        }
    }

    /// Name used in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Inverse => "inverse",
        }
    }
}

/// Interpolation method for LUTs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Let the engine choose.
    #[default]
    Default,
    /// Nearest neighbor.
    Nearest,
    /// Linear interpolation.
    Linear,
    /// Best available.
    Best,
}

impl Interpolation {
    /// Name used in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Nearest => "nearest",
            Self::Linear => "linear",
            Self::Best => "best",
        }
    }
}

/// Color transform definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// 4x4 matrix transform.
    Matrix(MatrixTransform),
    /// Range clamp/remap.
    Range(RangeTransform),
    /// Allocation hint for the GPU path.
    Allocation(AllocationTransform),
    /// Exponent/gamma.
    Exponent(ExponentTransform),
    /// Reference to named color spaces.
    ColorSpace(ColorSpaceTransform),
    /// LUT from file.
    File(FileTransform),
    /// Group of chained transforms.
    Group(GroupTransform),
}

impl Transform {
    /// Creates a matrix transform from a 4x4 row-major array.
    pub fn matrix(m: [f64; 16]) -> Self {
        Self::Matrix(MatrixTransform {
            matrix: m,
            offset: [0.0; 4],
            direction: TransformDirection::Forward,
        })
    }

    /// Creates a matrix transform from a 3x3 RGB matrix.
    pub fn from_mat3(m: &Mat3) -> Self {
        Self::matrix(m.to_ocio_4x4())
    }

    /// Clamps values below `min_in` to `min_out`, no upper bound.
    pub fn range_min(min_in: f64, min_out: f64) -> Self {
        Self::Range(RangeTransform {
            min_in: Some(min_in),
            min_out: Some(min_out),
            ..Default::default()
        })
    }

    /// Log2 allocation over `[vars[0], vars[1]]`.
    pub fn allocation_lg2(vars: [f64; 2]) -> Self {
        Self::Allocation(AllocationTransform {
            allocation: Allocation::Lg2,
            vars: vars.to_vec(),
            direction: TransformDirection::Forward,
        })
    }

    /// Same exponent on RGB, alpha untouched.
    pub fn exponent(value: f64) -> Self {
        Self::Exponent(ExponentTransform {
            value: [value, value, value, 1.0],
            negative_style: NegativeStyle::default(),
            direction: TransformDirection::Forward,
        })
    }

    /// Conversion between two named color spaces.
    pub fn colorspace(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self::ColorSpace(ColorSpaceTransform {
            src: src.into(),
            dst: dst.into(),
            direction: TransformDirection::Forward,
        })
    }

    /// Creates a file transform (LUT reference).
    pub fn file(src: impl Into<String>) -> Self {
        Self::File(FileTransform {
            src: src.into(),
            interpolation: Interpolation::default(),
            direction: TransformDirection::Forward,
        })
    }

    /// Creates a group transform.
    pub fn group(children: Vec<Transform>) -> Self {
        Self::Group(GroupTransform {
            children,
            direction: TransformDirection::Forward,
        })
    }

    /// Collapses a chain: nothing for an empty list, the transform itself for
    /// one element, a group otherwise.
    pub fn chain(mut transforms: Vec<Transform>) -> Option<Self> {
        match transforms.len() {
            0 => None,
            1 => transforms.pop(),
            _ => Some(Self::group(transforms)),
        }
    }

    /// Tag name in config files.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Matrix(_) => "MatrixTransform",
            Self::Range(_) => "RangeTransform",
            Self::Allocation(_) => "AllocationTransform",
            Self::Exponent(_) => "ExponentTransform",
            Self::ColorSpace(_) => "ColorSpaceTransform",
            Self::File(_) => "FileTransform",
            Self::Group(_) => "GroupTransform",
        }
    }

    /// Current direction.
    pub fn direction(&self) -> TransformDirection {
        match self {
            Self::Matrix(t) => t.direction,
            Self::Range(t) => t.direction,
            Self::Allocation(t) => t.direction,
            Self::Exponent(t) => t.direction,
            Self::ColorSpace(t) => t.direction,
            Self::File(t) => t.direction,
            Self::Group(t) => t.direction,
        }
    }

    fn direction_mut(&mut self) -> &mut TransformDirection {
        match self {
            Self::Matrix(t) => &mut t.direction,
            Self::Range(t) => &mut t.direction,
            Self::Allocation(t) => &mut t.direction,
            Self::Exponent(t) => &mut t.direction,
            Self::ColorSpace(t) => &mut t.direction,
            Self::File(t) => &mut t.direction,
            Self::Group(t) => &mut t.direction,
        }
    }

    /// Returns the inverse of this transform.
    ///
    /// Only the direction flag changes; the engine inverts on load.
    pub fn inverse(mut self) -> Self {
        let direction = self.direction_mut();
        *direction = direction.inverse();
        self
    }

    /// Visits this transform and every nested child, depth first.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Transform)) {
        visit(self);
        if let Self::Group(group) = self {
            for child in &group.children {
                child.walk(visit);
            }
        }
    }

    /// Names of color spaces this transform refers to.
    pub fn referenced_colorspaces(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.walk(&mut |t| {
            if let Self::ColorSpace(cs) = t {
                out.push(cs.src.as_str());
                out.push(cs.dst.as_str());
            }
        });
        out
    }

    /// Files this transform loads.
    pub fn referenced_files(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.walk(&mut |t| {
            if let Self::File(file) = t {
                out.push(file.src.as_str());
            }
        });
        out
    }

    /// True if every numeric parameter is finite.
    pub fn is_finite(&self) -> bool {
        let mut finite = true;
        self.walk(&mut |t| {
            let ok = match t {
                Self::Matrix(m) => m.matrix.iter().chain(&m.offset).all(|v| v.is_finite()),
                Self::Range(r) => [r.min_in, r.max_in, r.min_out, r.max_out]
                    .iter()
                    .flatten()
                    .all(|v| v.is_finite()),
                Self::Allocation(a) => a.vars.iter().all(|v| v.is_finite()),
                Self::Exponent(e) => e.value.iter().all(|v| v.is_finite()),
                _ => true,
            };
            finite &= ok;
        });
        finite
    }
}

/// 4x4 matrix + offset transform.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixTransform {
    /// 4x4 matrix in row-major order.
    pub matrix: [f64; 16],
    /// RGBA offset.
    pub offset: [f64; 4],
    /// Direction.
    pub direction: TransformDirection,
}

impl MatrixTransform {
    /// Identity matrix.
    pub const IDENTITY: [f64; 16] = [
        1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
    ];
}

/// Range remapping transform.
///
/// Unset bounds are left open.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangeTransform {
    /// Lower input bound.
    pub min_in: Option<f64>,
    /// Upper input bound.
    pub max_in: Option<f64>,
    /// Lower output bound.
    pub min_out: Option<f64>,
    /// Upper output bound.
    pub max_out: Option<f64>,
    /// Direction.
    pub direction: TransformDirection,
}

/// Allocation variable interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Allocation {
    /// Linear range.
    #[default]
    Uniform,
    /// Log2 range.
    Lg2,
}

impl Allocation {
    /// Name used in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Lg2 => "lg2",
        }
    }
}

/// Allocation transform.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationTransform {
    /// Interpretation of `vars`.
    pub allocation: Allocation,
    /// Range (and optional offset) of the allocation.
    pub vars: Vec<f64>,
    /// Direction.
    pub direction: TransformDirection,
}

/// Negative value handling for exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NegativeStyle {
    /// Clamp negatives to zero.
    #[default]
    Clamp,
    /// Mirror: sign * pow(abs(x), exp).
    Mirror,
    /// Pass through unchanged.
    PassThru,
}

impl NegativeStyle {
    /// Name used in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clamp => "clamp",
            Self::Mirror => "mirror",
            Self::PassThru => "pass_thru",
        }
    }
}

/// Exponent/gamma transform.
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentTransform {
    /// Per-channel exponents [R, G, B, A].
    pub value: [f64; 4],
    /// Negative handling style.
    pub negative_style: NegativeStyle,
    /// Direction.
    pub direction: TransformDirection,
}

/// Reference to a color space conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSpaceTransform {
    /// Source color space name.
    pub src: String,
    /// Destination color space name.
    pub dst: String,
    /// Direction.
    pub direction: TransformDirection,
}

/// File-based transform.
///
/// `src` is resolved against the config search path.
#[derive(Debug, Clone, PartialEq)]
pub struct FileTransform {
    /// Source file name.
    pub src: String,
    /// Interpolation method.
    pub interpolation: Interpolation,
    /// Direction.
    pub direction: TransformDirection,
}

/// Group of transforms applied in sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTransform {
    /// Transforms in application order.
    pub children: Vec<Transform>,
    /// Direction.
    pub direction: TransformDirection,
}
