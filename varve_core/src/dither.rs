// Copyright 2026 the Varve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color reduction from the RGBA composition format to packed RGB565.
//!
//! Two strategies are available for a driver's flush path:
//!
//! - [`truncate_rgb565`] masks the low bits of each channel. Fast, but a
//!   smooth gradient quantizes to visible bands.
//! - [`Dither::dither_rgb565`] applies ordered dithering before
//!   quantization: each channel is biased down slightly, then perturbed by a
//!   pseudo-random offset so the quantization error is redistributed across
//!   a patch of pixels instead of accumulating along gradient contours.
//!
//! The dither offset comes from a single xorshift generator owned by the
//! [`Dither`] context. The generator advances **once per four source
//! pixels**; the four pixels of a group take different bit-slices of the
//! same state (`state`, `state >> 2`, `state >> 4`, `state >> 6`), trading
//! generator updates for statistical spread. Output is bit-for-bit
//! reproducible for a fixed seed.
//!
//! A trailing group of one to three pixels is converted by plain
//! truncation, so callers need no length precondition.

use crate::color::Rgba;

/// Surviving channel bits on the packed view: top 5 of red and blue, top 6
/// of green.
const TRUNCATE_MASK: u32 = 0x00f8_fcf8;

/// Bias subtracted before jitter: top three bits of red and blue, scaled
/// down by 32.
const BIAS_MASK: u32 = 0x00e0_00e0;

/// Per-channel jitter width: 0–7 for red and blue, 0–3 for green.
const JITTER_MASK: u32 = 0x0007_0307;

/// Packs a color into 5-6-5 RGB, discarding alpha.
#[inline]
#[must_use]
pub const fn pack_rgb565(c: Rgba) -> u16 {
    (((c.r as u16) & 0xf8) << 8) | (((c.g as u16) & 0xfc) << 3) | ((c.b as u16) >> 3)
}

/// Converts a pixel run to RGB565 by direct truncation.
///
/// # Panics
///
/// Panics if `src` and `dst` differ in length.
pub fn truncate_rgb565(src: &[Rgba], dst: &mut [u16]) {
    assert_eq!(src.len(), dst.len(), "source/destination length mismatch");
    for (s, d) in src.iter().zip(dst.iter_mut()) {
        *d = pack_rgb565(Rgba::from_bits(s.bits() & TRUNCATE_MASK));
    }
}

/// Ordered-dithering context owning the generator state.
///
/// The state is explicit rather than process-global so two panels (or a
/// panel and a test) never share a generator.
#[derive(Clone, Debug)]
pub struct Dither {
    state: u32,
}

impl Default for Dither {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl Dither {
    /// The default generator seed.
    pub const DEFAULT_SEED: u32 = 0x1234_5678;

    /// Creates a context with the given seed.
    ///
    /// Zero is a fixed point of the xorshift update, so a zero seed is
    /// remapped to [`DEFAULT_SEED`](Self::DEFAULT_SEED).
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { Self::DEFAULT_SEED } else { seed },
        }
    }

    /// Advances the generator by one three-shift xorshift step.
    #[inline]
    fn next(&mut self) -> u32 {
        let mut s = self.state;
        s ^= s << 13;
        s ^= s >> 17;
        s ^= s << 5;
        self.state = s;
        s
    }

    /// Converts a pixel run to RGB565 with ordered dithering.
    ///
    /// # Panics
    ///
    /// Panics if `src` and `dst` differ in length.
    pub fn dither_rgb565(&mut self, src: &[Rgba], dst: &mut [u16]) {
        assert_eq!(src.len(), dst.len(), "source/destination length mismatch");

        let mut groups = src.chunks_exact(4);
        let mut out = dst.chunks_exact_mut(4);
        for (group, out) in (&mut groups).zip(&mut out) {
            let state = self.next();
            for (k, (s, d)) in group.iter().zip(out.iter_mut()).enumerate() {
                *d = pack_rgb565(perturb(s.bits(), state >> (2 * k)));
            }
        }

        // Short trailing group: no jitter, plain truncation.
        for (s, d) in groups.remainder().iter().zip(out.into_remainder()) {
            *d = pack_rgb565(Rgba::from_bits(s.bits() & TRUNCATE_MASK));
        }
    }
}

/// Biases a packed pixel down and adds the masked jitter slice.
///
/// The bias keeps every channel far enough from its ceiling that adding the
/// jitter cannot carry into the neighboring channel.
#[inline]
fn perturb(bits: u32, jitter: u32) -> Rgba {
    let mut v = bits;
    v -= (v & BIAS_MASK) >> 5;
    v -= (((v >> 8) & 0xff) >> 6) << 8;
    v += jitter & JITTER_MASK;
    Rgba::from_bits(v)
}
