//! Configuration validation.
//!
//! [`ConfigBuilder::build`](crate::ConfigBuilder::build) already rejects
//! dangling references. This module reports the softer problems that still
//! produce a loadable but surprising config:
//! - Recommended roles that are not defined
//! - Displays without views
//! - Color space transforms that refer to each other in a cycle
//! - Non-finite transform parameters
//! - LUT files missing from the search path
//!
//! # Example
//!
//! ```
//! use agx_ocio::{validate, ColorSpace, ConfigBuilder};
//!
//! let config = ConfigBuilder::new("Bare")
//!     .add_colorspace(ColorSpace::builder("Linear").build())
//!     .set_role("reference", "Linear")
//!     .build()
//!     .unwrap();
//!
//! let issues = validate::check(&config);
//! assert!(validate::has_warnings(&issues));
//! assert!(!validate::has_errors(&issues));
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::config::Config;
use crate::role::names;

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational message.
    Info,
    /// Config works but may not behave as intended.
    Warning,
    /// Config will fail in the engine.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A validation issue found in the config.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Severity level.
    pub severity: Severity,
    /// Issue category.
    pub category: IssueCategory,
    /// Human-readable message.
    pub message: String,
    /// Related element (color space name, role, etc.).
    pub context: Option<String>,
}

impl Issue {
    fn new(
        severity: Severity,
        category: IssueCategory,
        message: String,
        context: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            message,
            context: Some(context.into()),
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Categories of validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueCategory {
    /// Missing role definition.
    MissingRole,
    /// Missing display/view.
    MissingDisplay,
    /// Missing LUT file.
    MissingFile,
    /// Color space transforms refer to each other in a cycle.
    CircularReference,
    /// Invalid transform parameters.
    InvalidTransform,
    /// Color space no role, view or transform refers to.
    UnusedColorSpace,
}

/// Validates a config and returns all issues found.
pub fn check(config: &Config) -> Vec<Issue> {
    let mut issues = Vec::new();

    check_roles(config, &mut issues);
    check_displays(config, &mut issues);
    check_colorspaces(config, &mut issues);
    check_cycles(config, &mut issues);

    issues
}

fn check_roles(config: &Config, issues: &mut Vec<Issue>) {
    for role in [names::DEFAULT, names::SCENE_LINEAR, names::DATA] {
        if !config.roles().contains(role) {
            issues.push(Issue::new(
                Severity::Warning,
                IssueCategory::MissingRole,
                format!("recommended role '{role}' is not defined"),
                role,
            ));
        }
    }
}

fn check_displays(config: &Config, issues: &mut Vec<Issue>) {
    if config.displays().is_empty() {
        issues.push(Issue {
            severity: Severity::Warning,
            category: IssueCategory::MissingDisplay,
            message: "no displays defined".to_string(),
            context: None,
        });
        return;
    }

    for display in config.displays() {
        if display.views().is_empty() {
            issues.push(Issue::new(
                Severity::Warning,
                IssueCategory::MissingDisplay,
                format!("display '{}' has no views", display.name()),
                display.name(),
            ));
        }
    }

    for active in config.active_displays() {
        if config.display(active).is_err() {
            issues.push(Issue::new(
                Severity::Error,
                IssueCategory::MissingDisplay,
                format!("active display '{active}' is not defined"),
                active.as_str(),
            ));
        }
    }
}

fn check_colorspaces(config: &Config, issues: &mut Vec<Issue>) {
    let mut used: HashSet<&str> = config.roles().iter().map(|(_, cs)| cs).collect();
    for display in config.displays() {
        used.extend(display.views().iter().map(|v| v.colorspace()));
    }
    for cs in config.colorspaces() {
        used.extend(cs.transforms().flat_map(|t| t.referenced_colorspaces()));
    }
    // role names used as targets resolve through the role table
    let used: HashSet<&str> = used
        .into_iter()
        .filter_map(|name| config.colorspace(name).map(|cs| cs.name()))
        .collect();

    for cs in config.colorspaces() {
        if cs.transforms().any(|t| !t.is_finite()) {
            issues.push(Issue::new(
                Severity::Error,
                IssueCategory::InvalidTransform,
                format!("color space '{}' has non-finite transform parameters", cs.name()),
                cs.name(),
            ));
        }

        if cs.is_data() && cs.transforms().next().is_some() {
            issues.push(Issue::new(
                Severity::Warning,
                IssueCategory::InvalidTransform,
                format!(
                    "data color space '{}' has transforms defined (will be ignored)",
                    cs.name()
                ),
                cs.name(),
            ));
        }

        if !used.contains(cs.name()) {
            issues.push(Issue::new(
                Severity::Info,
                IssueCategory::UnusedColorSpace,
                format!("color space '{}' is not used by any role, view or transform", cs.name()),
                cs.name(),
            ));
        }
    }
}

/// Depth-first search over `ColorSpaceTransform` references.
fn check_cycles(config: &Config, issues: &mut Vec<Issue>) {
    let mut edges: HashMap<&str, Vec<&str>> = HashMap::new();
    for cs in config.colorspaces() {
        let targets = cs
            .transforms()
            .flat_map(|t| t.referenced_colorspaces())
            .filter_map(|name| config.colorspace(name))
            .map(|target| target.name())
            .filter(|&target| target != cs.name())
            .collect();
        edges.insert(cs.name(), targets);
    }

    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Visiting,
        Done,
    }

    fn visit<'a>(
        node: &'a str,
        edges: &HashMap<&'a str, Vec<&'a str>>,
        marks: &mut HashMap<&'a str, Mark>,
        path: &mut Vec<&'a str>,
    ) -> Option<Vec<&'a str>> {
        match marks.get(node) {
            Some(Mark::Done) => return None,
            Some(Mark::Visiting) => {
                let start = path.iter().position(|&n| n == node).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(node);
                return Some(cycle);
            }
            None => {}
        }
        marks.insert(node, Mark::Visiting);
        path.push(node);
        for &next in edges.get(node).into_iter().flatten() {
            if let Some(cycle) = visit(next, edges, marks, path) {
                return Some(cycle);
            }
        }
        path.pop();
        marks.insert(node, Mark::Done);
        None
    }

    let mut marks = HashMap::new();
    for cs in config.colorspaces() {
        let mut path = Vec::new();
        if let Some(cycle) = visit(cs.name(), &edges, &mut marks, &mut path) {
            issues.push(Issue::new(
                Severity::Error,
                IssueCategory::CircularReference,
                format!("circular color space reference: {}", cycle.join(" -> ")),
                cs.name(),
            ));
            return;
        }
    }
}

/// Checks that every referenced file exists in a search path below `root`.
///
/// `root` is the directory the config file is written to.
pub fn check_files(config: &Config, root: &Path) -> Vec<Issue> {
    let dirs: Vec<_> = if config.search_paths().is_empty() {
        vec![root.to_path_buf()]
    } else {
        config.search_paths().iter().map(|p| root.join(p)).collect()
    };

    config
        .referenced_files()
        .into_iter()
        .filter(|file| !dirs.iter().any(|dir| dir.join(file).is_file()))
        .map(|file| {
            Issue::new(
                Severity::Warning,
                IssueCategory::MissingFile,
                format!("file '{file}' not found in search path"),
                file,
            )
        })
        .collect()
}

/// Returns true if there are any errors.
pub fn has_errors(issues: &[Issue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

/// Returns true if there are any warnings or errors.
pub fn has_warnings(issues: &[Issue]) -> bool {
    issues.iter().any(|i| i.severity >= Severity::Warning)
}
