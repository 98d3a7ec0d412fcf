//! Color space definition and properties.
//!
//! A color space in the config defines:
//! - How to get there from the reference space
//! - Categorization (family path, encoding)
//! - Metadata (description, aliases)
//!
//! # Example
//!
//! ```
//! use agx_ocio::{ColorSpace, Encoding, Transform};
//!
//! let cs = ColorSpace::builder("2.4 EOTF Encoding")
//!     .family("Utilities/Curves")
//!     .alias("BT.1886 EOTF Encoding")
//!     .from_reference(Transform::exponent(2.4).inverse())
//!     .build();
//!
//! assert_eq!(cs.name(), "2.4 EOTF Encoding");
//! assert!(cs.matches_name("bt.1886 eotf encoding"));
//! assert_eq!(cs.encoding(), Encoding::Unknown);
//! ```

use crate::transform::Transform;

/// Color encoding type.
///
/// Indicates the data encoding/interpretation of pixel values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// Scene-referred linear.
    SceneLinear,
    /// Display-referred linear.
    DisplayLinear,
    /// Logarithmic encoding.
    Log,
    /// SDR display encoding.
    Sdr,
    /// Non-color data.
    Data,
    /// Unspecified.
    #[default]
    Unknown,
}

impl Encoding {
    /// Returns the config string, empty for [`Encoding::Unknown`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SceneLinear => "scene-linear",
            Self::DisplayLinear => "display-linear",
            Self::Log => "log",
            Self::Sdr => "sdr-video",
            Self::Data => "data",
            Self::Unknown => "",
        }
    }

    /// Checks if this is a linear encoding.
    #[inline]
    pub fn is_linear(&self) -> bool {
        matches!(self, Self::SceneLinear | Self::DisplayLinear)
    }
}

/// Which reference space a color space is defined against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceSpace {
    /// Scene-referred reference.
    #[default]
    Scene,
    /// Display-referred reference.
    Display,
}

impl ReferenceSpace {
    /// Config key suffix, `scene_reference` or `display_reference`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Scene => "scene_reference",
            Self::Display => "display_reference",
        }
    }
}

/// Color space definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSpace {
    name: String,
    aliases: Vec<String>,
    description: String,
    /// Slash separated menu path.
    family: String,
    encoding: Encoding,
    is_data: bool,
    reference: ReferenceSpace,
    to_reference: Option<Transform>,
    from_reference: Option<Transform>,
}

impl ColorSpace {
    /// Creates a new color space with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: String::new(),
            family: String::new(),
            encoding: Encoding::default(),
            is_data: false,
            reference: ReferenceSpace::default(),
            to_reference: None,
            from_reference: None,
        }
    }

    /// Creates a builder.
    pub fn builder(name: impl Into<String>) -> ColorSpaceBuilder {
        ColorSpaceBuilder::new(name)
    }

    /// Returns the name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the aliases.
    #[inline]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Returns the description.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the family path.
    #[inline]
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Returns the encoding.
    #[inline]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// True for non-color data.
    #[inline]
    pub fn is_data(&self) -> bool {
        self.is_data
    }

    /// Returns the reference space the transforms are relative to.
    #[inline]
    pub fn reference(&self) -> ReferenceSpace {
        self.reference
    }

    /// Transform from this space to the reference.
    #[inline]
    pub fn to_reference(&self) -> Option<&Transform> {
        self.to_reference.as_ref()
    }

    /// Transform from the reference to this space.
    #[inline]
    pub fn from_reference(&self) -> Option<&Transform> {
        self.from_reference.as_ref()
    }

    /// Iterates over both transforms, whichever are set.
    pub fn transforms(&self) -> impl Iterator<Item = &Transform> {
        self.to_reference.iter().chain(self.from_reference.iter())
    }

    /// Case-insensitive match against the name and aliases.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

/// Builder for [`ColorSpace`].
#[derive(Debug)]
pub struct ColorSpaceBuilder {
    inner: ColorSpace,
}

impl ColorSpaceBuilder {
    /// Creates a new builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: ColorSpace::new(name),
        }
    }

    /// Adds an alias. Aliases equal to the name or already present are skipped.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        if !self.inner.matches_name(&alias) {
            self.inner.aliases.push(alias);
        }
        self
    }

    /// Adds several aliases.
    pub fn aliases(self, aliases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        aliases.into_iter().fold(self, |b, a| b.alias(a))
    }

    /// Sets the description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.inner.description = desc.into();
        self
    }

    /// Sets the family path.
    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.inner.family = family.into();
        self
    }

    /// Sets the encoding. [`Encoding::Data`] also marks the space as data.
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.inner.encoding = encoding;
        if encoding == Encoding::Data {
            self.inner.is_data = true;
        }
        self
    }

    /// Sets the data flag.
    pub fn is_data(mut self, is_data: bool) -> Self {
        self.inner.is_data = is_data;
        self
    }

    /// Sets the reference space.
    pub fn reference(mut self, reference: ReferenceSpace) -> Self {
        self.inner.reference = reference;
        self
    }

    /// Sets the transform to the reference.
    pub fn to_reference(mut self, transform: Transform) -> Self {
        self.inner.to_reference = Some(transform);
        self
    }

    /// Sets the transform from the reference.
    pub fn from_reference(mut self, transform: Transform) -> Self {
        self.inner.from_reference = Some(transform);
        self
    }

    /// Chains `transforms` from the reference, see [`Transform::chain`].
    pub fn from_reference_chain(mut self, transforms: Vec<Transform>) -> Self {
        self.inner.from_reference = Transform::chain(transforms);
        self
    }

    /// Builds the color space.
    pub fn build(self) -> ColorSpace {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_colorspace() {
        let cs = ColorSpace::builder("Linear BT.709")
            .aliases(["Linear", "Linear Tristimulus"])
            .family("Colourspaces")
            .encoding(Encoding::SceneLinear)
            .description("Open Domain Linear BT.709 Tristimulus")
            .build();

        assert_eq!(cs.name(), "Linear BT.709");
        assert_eq!(cs.family(), "Colourspaces");
        assert!(cs.encoding().is_linear());
        assert!(cs.matches_name("linear bt.709"));
        assert!(cs.matches_name("Linear Tristimulus"));
        assert!(cs.from_reference().is_none());
        assert_eq!(cs.transforms().count(), 0);
    }

    #[test]
    fn test_alias_matching_name_is_dropped() {
        let cs = ColorSpace::builder("2.2 EOTF Encoding")
            .aliases(["2.2 EOTF Encoding", "sRGB EOTF Encoding", "srgb eotf encoding"])
            .build();
        assert_eq!(cs.aliases(), ["sRGB EOTF Encoding"]);
    }

    #[test]
    fn test_data_colorspace() {
        let cs = ColorSpace::builder("Generic Data").encoding(Encoding::Data).build();
        assert!(cs.is_data());
        assert_eq!(cs.encoding().as_str(), "data");
    }

    #[test]
    fn test_chain_sets_single_or_group() {
        let single = ColorSpace::builder("A")
            .from_reference_chain(vec![Transform::exponent(2.4).inverse()])
            .build();
        assert_eq!(single.from_reference().map(|t| t.tag()), Some("ExponentTransform"));

        let group = ColorSpace::builder("B")
            .from_reference_chain(vec![Transform::exponent(2.2), Transform::file("x.spi1d")])
            .build();
        assert_eq!(group.from_reference().map(|t| t.tag()), Some("GroupTransform"));
        assert_eq!(group.reference().key(), "scene_reference");
    }
}
