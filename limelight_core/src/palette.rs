// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Border colours.
//!
//! [`PALETTE`] holds seven colours ordered from coolest to hottest. Nodes are
//! assigned colours cyclically by their position in the target set, see
//! [`palette_color`]. [`OUTLINE_COLOR`] is the neutral colour of the thin
//! outline and inset passes drawn around every node.

use core::fmt;

/// An opaque sRGB colour.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(u32);

impl Color {
    /// Creates a colour from a packed `0xRRGGBB` value.
    ///
    /// Bits above the low 24 are ignored.
    #[inline]
    #[must_use]
    pub const fn from_rgb_u32(rgb: u32) -> Self {
        Self(rgb & 0x00ff_ffff)
    }

    /// Creates a colour from its channels.
    #[inline]
    #[must_use]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Returns the packed `0xRRGGBB` value.
    #[inline]
    #[must_use]
    pub const fn to_rgb_u32(self) -> u32 {
        self.0
    }

    /// Returns the `(r, g, b)` channels.
    #[inline]
    #[must_use]
    pub const fn to_rgb8(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }
}

/// Formats as a lowercase `#rrggbb` CSS colour.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({self})")
    }
}

/// Colour of the 1px outline and inset passes.
pub const OUTLINE_COLOR: Color = Color::from_rgb_u32(0xf0f0f0);

/// Number of colours in [`PALETTE`].
pub const PALETTE_SIZE: usize = 7;

/// Border colours, coolest first.
pub const PALETTE: [Color; PALETTE_SIZE] = [
    // coolest
    Color::from_rgb_u32(0x55cef6),
    Color::from_rgb_u32(0x55f67b),
    Color::from_rgb_u32(0xa5f655),
    Color::from_rgb_u32(0xf4f655),
    Color::from_rgb_u32(0xf6a555),
    Color::from_rgb_u32(0xf66855),
    // hottest
    Color::from_rgb_u32(0xff0000),
];

/// Returns the border colour for the node at `index` in a frame.
///
/// This is `PALETTE[index % PALETTE_SIZE]`; it does not depend on the
/// session's duration or border width.
#[inline]
#[must_use]
pub const fn palette_color(index: usize) -> Color {
    PALETTE[index % PALETTE_SIZE]
}
