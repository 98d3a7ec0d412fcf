//! # agx-core
//!
//! Core types shared by the AgX configuration generator crates.
//!
//! - [`Error`], [`Result`] - Error taxonomy of a generation run
//! - [`Channel`] - RGB channel identifier used for per-primary parameters
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. The other crates build on it:
//!
//! ```text
//! agx-core (this crate)
//!    ^
//!    |
//!    +-- agx-math (matrices, 2D geometry)
//!    +-- agx-primaries (colourspaces, working space builder)
//!    +-- agx-curve (sigmoid, log2 encoding, LUT sampling)
//!    +-- agx-ocio (config model and writer)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;

pub use error::*;

use std::fmt;

/// One of the three RGB channels.
///
/// Per-primary parameters (rotation, inset) are indexed by channel, in the
/// order red, green, blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red primary.
    Red,
    /// Green primary.
    Green,
    /// Blue primary.
    Blue,
    /// The achromatic (white) point.
    Achromatic,
}

impl Channel {
    /// The three chromatic channels in storage order.
    pub const RGB: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Index into a `[T; 3]` parameter array, `None` for the achromatic point.
    #[inline]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Red => Some(0),
            Self::Green => Some(1),
            Self::Blue => Some(2),
            Self::Achromatic => None,
        }
    }

    /// Lower-case channel name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Achromatic => "achromatic",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_indices() {
        let idx: Vec<_> = Channel::RGB.iter().filter_map(|c| c.index()).collect();
        assert_eq!(idx, vec![0, 1, 2]);
        assert_eq!(Channel::Achromatic.index(), None);
    }

    #[test]
    fn test_channel_display() {
        assert_eq!(Channel::Green.to_string(), "green");
    }
}
