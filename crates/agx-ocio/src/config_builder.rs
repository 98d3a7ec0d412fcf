//! Fluent builder for [`Config`].
//!
//! # Example
//!
//! ```
//! use agx_ocio::{ColorSpace, ConfigBuilder, Display, Encoding, Transform, View};
//!
//! let config = ConfigBuilder::new("Studio Config")
//!     .description("Linear reference with one display")
//!     .search_path("LUTs")
//!     .add_colorspace(
//!         ColorSpace::builder("Linear BT.709")
//!             .encoding(Encoding::SceneLinear)
//!             .build(),
//!     )
//!     .add_colorspace(
//!         ColorSpace::builder("BT.1886")
//!             .family("Displays/SDR")
//!             .from_reference(Transform::exponent(2.4).inverse())
//!             .build(),
//!     )
//!     .set_role("reference", "Linear BT.709")
//!     .add_display(Display::new("BT.1886").with_view(View::new("Native", "BT.1886")))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.colorspaces().len(), 2);
//! ```

use crate::colorspace::ColorSpace;
use crate::config::{Config, FileRule, REC709_LUMA};
use crate::display::Display;
use crate::error::{OcioError, OcioResult};
use crate::role::Roles;

/// Builder for creating configs programmatically.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    name: String,
    description: String,
    search_paths: Vec<String>,
    strict_parsing: bool,
    luma: [f64; 3],
    roles: Roles,
    file_rules: Vec<FileRule>,
    displays: Vec<Display>,
    active_displays: Vec<String>,
    active_views: Vec<String>,
    colorspaces: Vec<ColorSpace>,
}

impl ConfigBuilder {
    /// Creates a new config builder with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            search_paths: Vec::new(),
            strict_parsing: true,
            luma: REC709_LUMA,
            roles: Roles::new(),
            file_rules: Vec::new(),
            displays: Vec::new(),
            active_displays: Vec::new(),
            active_views: Vec::new(),
            colorspaces: Vec::new(),
        }
    }

    /// Sets the config description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Adds a LUT search path.
    pub fn search_path(mut self, path: impl Into<String>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    /// Sets strict parsing.
    pub fn strict_parsing(mut self, strict: bool) -> Self {
        self.strict_parsing = strict;
        self
    }

    /// Sets the luma coefficients.
    pub fn luma(mut self, luma: [f64; 3]) -> Self {
        self.luma = luma;
        self
    }

    /// Adds a color space.
    pub fn add_colorspace(mut self, colorspace: ColorSpace) -> Self {
        self.colorspaces.push(colorspace);
        self
    }

    /// Adds multiple color spaces.
    pub fn add_colorspaces(mut self, colorspaces: impl IntoIterator<Item = ColorSpace>) -> Self {
        self.colorspaces.extend(colorspaces);
        self
    }

    /// Sets a role mapping.
    pub fn set_role(mut self, role: impl Into<String>, colorspace: impl Into<String>) -> Self {
        self.roles.define(role, colorspace);
        self
    }

    /// Adds a display.
    pub fn add_display(mut self, display: Display) -> Self {
        self.displays.push(display);
        self
    }

    /// Adds multiple displays.
    pub fn add_displays(mut self, displays: impl IntoIterator<Item = Display>) -> Self {
        self.displays.extend(displays);
        self
    }

    /// Restricts the displays shown to users.
    pub fn active_displays(mut self, displays: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.active_displays = displays.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts the views shown to users.
    pub fn active_views(mut self, views: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.active_views = views.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a file rule. A catch-all default rule is appended on build.
    pub fn add_file_rule(mut self, rule: FileRule) -> Self {
        self.file_rules.push(rule);
        self
    }

    /// Builds the config.
    ///
    /// # Errors
    ///
    /// Returns [`OcioError::Validation`] if:
    /// - No color spaces are defined
    /// - Two color spaces share a name or alias
    /// - No reference role is set
    /// - A role, view or color space transform references an unknown color space
    pub fn build(mut self) -> OcioResult<Config> {
        if self.colorspaces.is_empty() {
            return Err(OcioError::Validation(
                "config must have at least one colorspace".into(),
            ));
        }

        for (i, cs) in self.colorspaces.iter().enumerate() {
            let names = std::iter::once(cs.name()).chain(cs.aliases().iter().map(String::as_str));
            for name in names {
                if let Some(other) = self.colorspaces[..i].iter().find(|o| o.matches_name(name)) {
                    return Err(OcioError::Validation(format!(
                        "colorspace '{}' name '{}' collides with colorspace '{}'",
                        cs.name(),
                        name,
                        other.name()
                    )));
                }
            }
        }

        if !self.roles.has_reference() {
            return Err(OcioError::Validation(
                "config must define a 'reference' role".into(),
            ));
        }

        let exists = |name: &str| {
            self.roles.contains(name) || self.colorspaces.iter().any(|cs| cs.matches_name(name))
        };

        for (role, cs_name) in self.roles.iter() {
            if !self.colorspaces.iter().any(|cs| cs.matches_name(cs_name)) {
                return Err(OcioError::Validation(format!(
                    "role '{role}' references non-existent colorspace '{cs_name}'"
                )));
            }
        }

        for display in &self.displays {
            for view in display.views() {
                if !exists(view.colorspace()) {
                    return Err(OcioError::Validation(format!(
                        "view '{}' of display '{}' references non-existent colorspace '{}'",
                        view.name(),
                        display.name(),
                        view.colorspace()
                    )));
                }
            }
        }

        for cs in &self.colorspaces {
            for name in cs.transforms().flat_map(|t| t.referenced_colorspaces()) {
                if !exists(name) {
                    return Err(OcioError::Validation(format!(
                        "colorspace '{}' references non-existent colorspace '{}'",
                        cs.name(),
                        name
                    )));
                }
            }
        }

        if !self.file_rules.iter().any(|r| r.pattern.is_none()) {
            self.file_rules.push(FileRule::default_rule());
        }

        Ok(Config {
            name: self.name,
            description: self.description,
            search_paths: self.search_paths,
            strict_parsing: self.strict_parsing,
            luma: self.luma,
            roles: self.roles,
            file_rules: self.file_rules,
            displays: self.displays,
            active_displays: self.active_displays,
            active_views: self.active_views,
            colorspaces: self.colorspaces,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorspace::Encoding;
    use crate::display::View;
    use crate::transform::Transform;

    fn linear() -> ColorSpace {
        ColorSpace::builder("Linear").encoding(Encoding::SceneLinear).build()
    }

    #[test]
    fn test_build_minimal_config() {
        let config = ConfigBuilder::new("Test")
            .add_colorspace(linear())
            .set_role("reference", "Linear")
            .build()
            .unwrap();

        assert_eq!(config.colorspaces().len(), 1);
        assert!(config.colorspace("Linear").is_some());
        assert_eq!(config.file_rules(), [FileRule::default_rule()]);
        assert!(config.strict_parsing());
    }

    #[test]
    fn test_empty_config_fails() {
        let result = ConfigBuilder::new("Empty").build();
        assert!(matches!(result, Err(OcioError::Validation(_))));
    }

    #[test]
    fn test_missing_reference_fails() {
        let result = ConfigBuilder::new("Test")
            .add_colorspace(linear())
            .set_role("scene_linear", "Linear")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_role_target_fails() {
        let result = ConfigBuilder::new("Test")
            .add_colorspace(linear())
            .set_role("reference", "NonExistent")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_alias_fails() {
        let result = ConfigBuilder::new("Test")
            .add_colorspace(linear())
            .add_colorspace(ColorSpace::builder("Linear BT.709").alias("linear").build())
            .set_role("reference", "Linear")
            .build();
        let err = result.unwrap_err().to_string();
        assert!(err.contains("collides"), "{err}");
    }

    #[test]
    fn test_dangling_view_fails() {
        let result = ConfigBuilder::new("Test")
            .add_colorspace(linear())
            .set_role("reference", "Linear")
            .add_display(Display::new("sRGB").with_view(View::new("AgX", "AgX Base")))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_dangling_transform_reference_fails() {
        let result = ConfigBuilder::new("Test")
            .add_colorspace(linear())
            .add_colorspace(
                ColorSpace::builder("Display")
                    .from_reference(Transform::colorspace("Linear", "Missing"))
                    .build(),
            )
            .set_role("reference", "Linear")
            .build();
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Missing"), "{err}");
    }

    #[test]
    fn test_role_names_resolve_in_views() {
        let config = ConfigBuilder::new("Test")
            .add_colorspace(linear())
            .set_role("reference", "Linear")
            .add_display(Display::new("Raw").with_view(View::new("Raw", "reference")))
            .build();
        assert!(config.is_ok());
    }
}
