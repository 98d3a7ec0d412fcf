//! # agx-math
//!
//! Math utilities for AgX picture formation.
//!
//! This crate provides the primitives the working space builder and the
//! config generator need:
//!
//! - [`Mat3`] - 3x3 matrices for RGB/XYZ change of basis
//! - [`Vec3`] - 3D vectors for XYZ/RGB triplets
//! - [`Point2`], [`Ray2`], [`Segment2`], [`Triangle`] - chromaticity plane geometry
//!
//! # Design
//!
//! All values are `f64`. The types wrap [`glam`] double precision types where
//! glam already has the operation. Matrices assume **row-major** storage and
//! **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! # Usage
//!
//! ```rust
//! use agx_math::{Mat3, Point2, Vec3};
//!
//! let rgb_to_xyz = Mat3::from_rows([
//!     [0.4124564, 0.3575761, 0.1804375],
//!     [0.2126729, 0.7151522, 0.0721750],
//!     [0.0193339, 0.1191920, 0.9503041],
//! ]);
//! let xyz = rgb_to_xyz * Vec3::new(1.0, 0.5, 0.25);
//! assert!(xyz.y > 0.0);
//!
//! let white = Point2::new(0.3127, 0.3290);
//! let red = Point2::new(0.64, 0.33).scale_about(white, 0.5);
//! assert!(red.x < 0.64);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - Vector and matrix primitives
//! - `agx-core` - Error types
//!
//! # Used By
//!
//! - `agx-primaries` - RGB/XYZ matrix generation, working space geometry
//! - `agx-ocio` - Matrix transforms in the config

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod mat3;
mod vec3;
pub mod geometry;

pub use geometry::{Point2, Ray2, RayHit, Segment2, Triangle};
pub use mat3::*;
pub use vec3::*;
