//! # agx-ocio
//!
//! OpenColorIO configuration model and writer, and the AgX formation config.
//!
//! - [`Config`] - Color spaces, roles, displays and file rules
//! - [`ConfigBuilder`] - Fluent construction with reference checks
//! - [`Transform`] - The transform types the formation chain uses
//! - [`validate`] - Soft checks on a built config
//! - [`formation`] - The AgX (SB2383) config recipe
//!
//! # Quick Start
//!
//! ```
//! use agx_ocio::formation::{build_config, FormationSettings};
//!
//! let config = build_config(&FormationSettings::default()).unwrap();
//! let yaml = config.to_yaml().unwrap();
//!
//! assert!(yaml.contains("!<AllocationTransform> {allocation: lg2"));
//! assert!(yaml.contains("- !<View> {name: AgX, colorspace: AgX Base}"));
//! ```
//!
//! # Roles
//!
//! ```
//! use agx_ocio::formation::{build_config, FormationSettings};
//!
//! let config = build_config(&FormationSettings::default()).unwrap();
//! let linear = config.colorspace("scene_linear").unwrap();
//! assert_eq!(linear.name(), "Linear BT.709");
//! ```
//!
//! # Dependencies
//!
//! - `agx-primaries` - Working space matrices
//! - `agx-curve` - Log2 allocation of the formation curve
//! - [`serde`], [`serde_yaml`] - Settings files
//! - [`thiserror`] - [`OcioError`]
//! - [`tracing`] - Diagnostics
//!
//! # Used By
//!
//! - `agx-cli` - `generate` command

#![warn(missing_docs)]
#![warn(clippy::all)]

mod colorspace;
mod config;
mod config_builder;
mod display;
mod error;
mod role;
mod transform;
mod yaml;

pub mod formation;
pub mod validate;

pub use colorspace::{ColorSpace, ColorSpaceBuilder, Encoding, ReferenceSpace};
pub use config::{Config, FileRule, REC709_LUMA};
pub use config_builder::ConfigBuilder;
pub use display::{Display, View};
pub use error::{OcioError, OcioResult};
pub use role::{names as role_names, Roles};
pub use transform::{
    Allocation, AllocationTransform, ColorSpaceTransform, ExponentTransform, FileTransform,
    GroupTransform, Interpolation, MatrixTransform, NegativeStyle, RangeTransform, Transform,
    TransformDirection,
};
pub use validate::{Issue, IssueCategory, Severity};
