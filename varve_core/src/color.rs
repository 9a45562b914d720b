// Copyright 2026 the Varve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel color value and panel color formats.
//!
//! Composition always happens in [`Rgba`] (8 bits per channel). The packed
//! `u32` view returned by [`Rgba::bits`] aliases the same bytes in
//! little-endian order (`r` in the low byte), which is what the conversion
//! loops in [`dither`](crate::dither) operate on.
//!
//! [`ColorFormat`] enumerates the formats a concrete panel may accept. The
//! bit-width table is a pure function; querying an unrecognized raw code
//! yields the sentinel `0` rather than failing, since the query sits on the
//! pixel path.

use bytemuck::{Pod, Zeroable};

/// A 4-channel color value, 8 bits per channel.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha (255 is opaque).
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Creates a color from its four channels.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the packed little-endian view (`r` in the low byte).
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, self.a])
    }

    /// Reconstructs a color from its packed little-endian view.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        let [r, g, b, a] = bits.to_le_bytes();
        Self { r, g, b, a }
    }
}

/// The pixel format of a drawable region or physical panel.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorFormat {
    /// 1-bit monochrome.
    Mono = 0,
    /// 2-bit grayscale.
    Gray2 = 1,
    /// 8-bit grayscale.
    Gray8 = 2,
    /// 16-bit packed 5-6-5 RGB.
    Rgb565 = 3,
    /// 24-bit RGB.
    Rgb888 = 4,
    /// 32-bit RGBA, the composition format.
    Rgba8888 = 5,
}

impl ColorFormat {
    /// Returns the stable raw code for this format.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Maps a raw code back to a format, if recognized.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Mono),
            1 => Some(Self::Gray2),
            2 => Some(Self::Gray8),
            3 => Some(Self::Rgb565),
            4 => Some(Self::Rgb888),
            5 => Some(Self::Rgba8888),
            _ => None,
        }
    }

    /// Returns the number of bits one pixel occupies in this format.
    #[must_use]
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            Self::Mono => 1,
            Self::Gray2 => 2,
            Self::Gray8 => 8,
            Self::Rgb565 => 16,
            Self::Rgb888 => 24,
            Self::Rgba8888 => 32,
        }
    }
}

/// Returns the bit width for a raw format code, or `0` if unrecognized.
///
/// The sentinel return keeps the pixel path free of error branches; callers
/// that need to reject unknown formats up front use
/// [`ColorFormat::from_raw`] instead.
#[must_use]
pub const fn bits_for_raw(raw: u32) -> u32 {
    match ColorFormat::from_raw(raw) {
        Some(format) => format.bits_per_pixel(),
        None => 0,
    }
}
