//! In-memory OpenColorIO configuration.
//!
//! A [`Config`] is assembled with [`ConfigBuilder`](crate::ConfigBuilder)
//! and written as an OCIO v2 `.ocio` YAML document with [`Config::to_yaml`].
//!
//! # Example
//!
//! ```
//! use agx_ocio::{ColorSpace, ConfigBuilder};
//!
//! let config = ConfigBuilder::new("Minimal")
//!     .add_colorspace(ColorSpace::builder("Linear").build())
//!     .set_role("reference", "Linear")
//!     .build()
//!     .unwrap();
//!
//! let yaml = config.to_yaml().unwrap();
//! assert!(yaml.starts_with("ocio_profile_version: 2"));
//! ```

use std::path::Path;

use tracing::debug;

use crate::colorspace::ColorSpace;
use crate::display::Display;
use crate::error::{OcioError, OcioResult};
use crate::role::Roles;

/// Rec.709 luma coefficients.
pub const REC709_LUMA: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// File rule for automatic color space assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRule {
    /// Rule name.
    pub name: String,
    /// Glob pattern, `None` for the catch-all default rule.
    pub pattern: Option<String>,
    /// Extension filter.
    pub extension: Option<String>,
    /// Assigned color space or role.
    pub colorspace: String,
}

impl FileRule {
    /// The mandatory catch-all rule mapping to the `default` role.
    pub fn default_rule() -> Self {
        Self {
            name: "Default".into(),
            pattern: None,
            extension: None,
            colorspace: crate::role::names::DEFAULT.into(),
        }
    }
}

/// OCIO configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) search_paths: Vec<String>,
    pub(crate) strict_parsing: bool,
    pub(crate) luma: [f64; 3],
    pub(crate) roles: Roles,
    pub(crate) file_rules: Vec<FileRule>,
    pub(crate) displays: Vec<Display>,
    pub(crate) active_displays: Vec<String>,
    pub(crate) active_views: Vec<String>,
    pub(crate) colorspaces: Vec<ColorSpace>,
}

impl Config {
    /// Config name, empty if unnamed.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Config description.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// LUT search paths, relative to the config file.
    #[inline]
    pub fn search_paths(&self) -> &[String] {
        &self.search_paths
    }

    /// True if unknown color spaces are errors in the engine.
    #[inline]
    pub fn strict_parsing(&self) -> bool {
        self.strict_parsing
    }

    /// Luma coefficients.
    #[inline]
    pub fn luma(&self) -> [f64; 3] {
        self.luma
    }

    /// Role mapping.
    #[inline]
    pub fn roles(&self) -> &Roles {
        &self.roles
    }

    /// File rules in evaluation order.
    #[inline]
    pub fn file_rules(&self) -> &[FileRule] {
        &self.file_rules
    }

    /// Displays in declaration order.
    #[inline]
    pub fn displays(&self) -> &[Display] {
        &self.displays
    }

    /// Active display filter, empty means all.
    #[inline]
    pub fn active_displays(&self) -> &[String] {
        &self.active_displays
    }

    /// Active view filter, empty means all.
    #[inline]
    pub fn active_views(&self) -> &[String] {
        &self.active_views
    }

    /// Color spaces in declaration order.
    #[inline]
    pub fn colorspaces(&self) -> &[ColorSpace] {
        &self.colorspaces
    }

    /// Looks up a color space by role, name or alias.
    pub fn colorspace(&self, name: &str) -> Option<&ColorSpace> {
        let name = self.roles.get(name).unwrap_or(name);
        self.colorspaces.iter().find(|cs| cs.matches_name(name))
    }

    /// Like [`colorspace`](Self::colorspace), with an error for unknown names.
    pub fn require_colorspace(&self, name: &str) -> OcioResult<&ColorSpace> {
        self.colorspace(name)
            .ok_or_else(|| OcioError::ColorSpaceNotFound { name: name.into() })
    }

    /// Finds a display by name.
    pub fn display(&self, name: &str) -> OcioResult<&Display> {
        self.displays
            .iter()
            .find(|d| d.name() == name)
            .ok_or_else(|| OcioError::DisplayNotFound { name: name.into() })
    }

    /// Files referenced by any color space transform, deduplicated.
    pub fn referenced_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = self
            .colorspaces
            .iter()
            .flat_map(ColorSpace::transforms)
            .flat_map(|t| t.referenced_files())
            .collect();
        files.sort_unstable();
        files.dedup();
        files
    }

    /// Serializes to an OCIO v2 YAML document.
    pub fn to_yaml(&self) -> OcioResult<String> {
        crate::yaml::write_config(self)
    }

    /// Writes the YAML document to `path`.
    pub fn write(&self, path: impl AsRef<Path>) -> OcioResult<()> {
        let path = path.as_ref();
        let yaml = self.to_yaml()?;
        std::fs::write(path, &yaml)?;
        debug!(path = %path.display(), bytes = yaml.len(), "Wrote config");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{ColorSpace, ConfigBuilder, Display, OcioError, Transform, View};

    fn config() -> crate::Config {
        ConfigBuilder::new("Test")
            .add_colorspace(ColorSpace::builder("Linear BT.709").alias("Linear").build())
            .add_colorspace(
                ColorSpace::builder("Log")
                    .from_reference(Transform::group(vec![
                        Transform::file("curve.spi1d"),
                        Transform::file("curve.spi1d"),
                    ]))
                    .build(),
            )
            .set_role("reference", "Linear BT.709")
            .set_role("compositing_log", "Log")
            .add_display(Display::new("sRGB").with_view(View::new("Log", "Log")))
            .build()
            .unwrap()
    }

    #[test]
    fn test_lookup_by_role_name_and_alias() {
        let config = config();
        assert_eq!(config.colorspace("reference").unwrap().name(), "Linear BT.709");
        assert_eq!(config.colorspace("linear").unwrap().name(), "Linear BT.709");
        assert_eq!(config.colorspace("compositing_log").unwrap().name(), "Log");
        assert!(config.colorspace("ACEScg").is_none());
        assert!(matches!(
            config.require_colorspace("ACEScg"),
            Err(OcioError::ColorSpaceNotFound { .. })
        ));
    }

    #[test]
    fn test_display_lookup() {
        let config = config();
        assert_eq!(config.display("sRGB").unwrap().views().len(), 1);
        assert!(matches!(
            config.display("P3"),
            Err(OcioError::DisplayNotFound { .. })
        ));
    }

    #[test]
    fn test_files_are_deduplicated() {
        assert_eq!(config().referenced_files(), ["curve.spi1d"]);
    }

    #[test]
    fn test_write_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ocio");
        config().write(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("name: Linear BT.709"));
    }
}
