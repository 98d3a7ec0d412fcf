//! Display and View management.
//!
//! - **Display**: a physical or virtual display device
//! - **View**: a way of looking at the scene on that display, mapped to a
//!   color space
//!
//! # Example
//!
//! ```
//! use agx_ocio::{Display, View};
//!
//! let display = Display::new("sRGB")
//!     .with_view(View::new("Display Native", "sRGB"))
//!     .with_view(View::new("AgX", "AgX Base"));
//!
//! assert_eq!(display.views().len(), 2);
//! assert_eq!(display.default_view(), Some("Display Native"));
//! ```

/// A view within a display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    name: String,
    colorspace: String,
}

impl View {
    /// Creates a new view showing `colorspace`.
    pub fn new(name: impl Into<String>, colorspace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colorspace: colorspace.into(),
        }
    }

    /// Returns the view name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the target color space name.
    #[inline]
    pub fn colorspace(&self) -> &str {
        &self.colorspace
    }
}

/// A display device configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    name: String,
    views: Vec<View>,
}

impl Display {
    /// Creates a new display.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            views: Vec::new(),
        }
    }

    /// Returns the display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a view, replacing one with the same name.
    pub fn add_view(&mut self, view: View) {
        match self.views.iter_mut().find(|v| v.name == view.name) {
            Some(existing) => *existing = view,
            None => self.views.push(view),
        }
    }

    /// Builder form of [`add_view`](Self::add_view).
    pub fn with_view(mut self, view: View) -> Self {
        self.add_view(view);
        self
    }

    /// Views in insertion order.
    #[inline]
    pub fn views(&self) -> &[View] {
        &self.views
    }

    /// Finds a view by name.
    pub fn view(&self, name: &str) -> Option<&View> {
        self.views.iter().find(|v| v.name == name)
    }

    /// The first view, which applications show by default.
    pub fn default_view(&self) -> Option<&str> {
        self.views.first().map(View::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_views() {
        let mut display = Display::new("BT.1886");
        display.add_view(View::new("Display Native", "BT.1886"));
        display.add_view(View::new("AgX", "AgX Base BT.1886"));

        assert_eq!(display.name(), "BT.1886");
        assert_eq!(display.view("AgX").map(View::colorspace), Some("AgX Base BT.1886"));
        assert!(display.view("Film").is_none());
    }

    #[test]
    fn test_same_view_name_replaces() {
        let display = Display::new("sRGB")
            .with_view(View::new("AgX", "AgX Base"))
            .with_view(View::new("AgX", "AgX Base Display P3"));
        assert_eq!(display.views().len(), 1);
        assert_eq!(display.views()[0].colorspace(), "AgX Base Display P3");
    }

    #[test]
    fn test_empty_display_has_no_default() {
        assert_eq!(Display::new("Empty").default_view(), None);
    }
}
