//! Color space roles.
//!
//! Roles let applications find a color space by purpose instead of name.
//! The formation config defines the full set applications commonly query:
//!
//! - `reference`, `scene_linear`, `default_float` - the linear reference
//! - `data` - non-color data
//! - `color_picking`, `color_timing`, `compositing_log`, `default`,
//!   `default_byte`, `default_sequencer`, `matte_paint`, `texture_paint` -
//!   display encoded spaces
//!
//! Roles are kept sorted by name so the written config is stable.

use std::collections::BTreeMap;

/// Role names.
pub mod names {
    /// Scene-referred linear reference (required).
    pub const REFERENCE: &str = "reference";
    /// Default input color space.
    pub const DEFAULT: &str = "default";
    /// Default for 8-bit inputs.
    pub const DEFAULT_BYTE: &str = "default_byte";
    /// Default for float inputs.
    pub const DEFAULT_FLOAT: &str = "default_float";
    /// Default for sequencer strips.
    pub const DEFAULT_SEQUENCER: &str = "default_sequencer";
    /// Non-color data.
    pub const DATA: &str = "data";
    /// Scene-referred linear working space.
    pub const SCENE_LINEAR: &str = "scene_linear";
    /// Compositing log space.
    pub const COMPOSITING_LOG: &str = "compositing_log";
    /// Color grading space.
    pub const COLOR_TIMING: &str = "color_timing";
    /// Texture painting space.
    pub const TEXTURE_PAINT: &str = "texture_paint";
    /// Matte painting space.
    pub const MATTE_PAINT: &str = "matte_paint";
    /// Color picker display space.
    pub const COLOR_PICKING: &str = "color_picking";
}

/// Role to color space mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roles {
    mapping: BTreeMap<String, String>,
}

impl Roles {
    /// Creates an empty role mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a role, replacing any previous target.
    pub fn define(&mut self, role: impl Into<String>, colorspace: impl Into<String>) {
        self.mapping.insert(role.into(), colorspace.into());
    }

    /// Returns the color space a role points to.
    pub fn get(&self, role: &str) -> Option<&str> {
        self.mapping.get(role).map(String::as_str)
    }

    /// True if the role is defined.
    pub fn contains(&self, role: &str) -> bool {
        self.mapping.contains_key(role)
    }

    /// Iterates `(role, colorspace)` pairs in role name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.mapping.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of defined roles.
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// True if no roles are defined.
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// True if the `reference` role is defined.
    pub fn has_reference(&self) -> bool {
        self.contains(names::REFERENCE)
    }

    /// Reference color space name.
    pub fn reference(&self) -> Option<&str> {
        self.get(names::REFERENCE)
    }

    /// Scene linear color space name.
    pub fn scene_linear(&self) -> Option<&str> {
        self.get(names::SCENE_LINEAR)
    }

    /// Data color space name.
    pub fn data(&self) -> Option<&str> {
        self.get(names::DATA)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Roles {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut roles = Self::new();
        for (role, cs) in iter {
            roles.define(role, cs);
        }
        roles
    }
}
