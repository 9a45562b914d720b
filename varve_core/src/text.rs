// Copyright 2026 the Varve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text layout facade over an external glyph engine.
//!
//! Font rasterization itself is out of scope; [`GlyphSource`] is the seam
//! through which an engine supplies per-glyph metrics and 8-bit coverage.
//! [`TextRenderer`] fronts a source with a bounded [`SlotCache`] so a
//! steady text run costs one engine query per *distinct* glyph, not per
//! placement. Unknown codepoints degrade to a zero-area, zero-advance
//! placement rather than aborting a draw, and the miss itself is cached so
//! the engine is not re-queried for a codepoint it already rejected.

use crate::area::Area;
use crate::cache::{AllocError, SlotCache};

/// A two-dimensional pixel offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Delta {
    /// Horizontal component.
    pub x: i32,
    /// Vertical component.
    pub y: i32,
}

impl Delta {
    /// The zero offset.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Creates an offset from its components.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl core::ops::Add for Delta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Shape of one glyph, relative to its pen origin.
///
/// The `Default` value (zero area, zero advance) doubles as the cached
/// representation of a codepoint the source does not know.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphMetrics {
    /// Ink bounds relative to the pen origin.
    pub area: Area,
    /// Pen displacement to the next glyph's origin.
    pub advance: Delta,
}

/// One glyph resolved to frame coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphPlacement {
    /// Pen origin this glyph was placed at.
    pub origin: Delta,
    /// Absolute ink bounds; empty for unknown codepoints.
    pub area: Area,
    /// Pen displacement carried to the next placement.
    pub advance: Delta,
}

/// The seam to an external glyph rasterization engine.
pub trait GlyphSource {
    /// Baseline-to-baseline distance at the given pixel size.
    fn line_height(&self, pixel_size: u32) -> i32;

    /// Returns the metrics for `code`, or `None` if the source has no
    /// glyph for it.
    fn glyph_metrics(&mut self, code: u32, pixel_size: u32) -> Option<GlyphMetrics>;

    /// Streams 8-bit coverage for `code`, calling `emit(x, y, coverage)`
    /// in pen-origin-relative coordinates. The default emits nothing.
    fn for_each_coverage(&mut self, code: u32, pixel_size: u32, emit: &mut dyn FnMut(i32, i32, u8)) {
        _ = (code, pixel_size, emit);
    }
}

/// Caching layout front end over a [`GlyphSource`].
///
/// One renderer serves one pixel size; the cache is keyed by codepoint
/// alone.
#[derive(Debug)]
pub struct TextRenderer<S> {
    source: S,
    pixel_size: u32,
    cache: SlotCache<GlyphMetrics>,
}

impl<S: GlyphSource> TextRenderer<S> {
    /// Creates a renderer with a metric cache of `cache_capacity` glyphs.
    pub fn new(source: S, pixel_size: u32, cache_capacity: usize) -> Result<Self, AllocError> {
        Ok(Self {
            source,
            pixel_size,
            cache: SlotCache::new(cache_capacity)?,
        })
    }

    /// The pixel size this renderer lays out at.
    #[must_use]
    pub const fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    /// Baseline-to-baseline distance at this renderer's size.
    #[must_use]
    pub fn line_height(&self) -> i32 {
        self.source.line_height(self.pixel_size)
    }

    /// The underlying glyph source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the underlying glyph source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Returns `code`'s metrics, consulting the source only on a cache
    /// miss. Unknown codepoints resolve (and cache) as zero metrics.
    pub fn metrics(&mut self, code: u32) -> GlyphMetrics {
        let (slot, found) = self.cache.get(code);
        if !found {
            *slot = self
                .source
                .glyph_metrics(code, self.pixel_size)
                .unwrap_or_default();
        }
        *slot
    }

    /// Places one glyph after `previous` (or at the pen origin for the
    /// first glyph of a run).
    pub fn place_glyph(&mut self, code: u32, previous: Option<&GlyphPlacement>) -> GlyphPlacement {
        let origin = previous.map_or(Delta::ZERO, |p| p.origin + p.advance);
        let metrics = self.metrics(code);
        GlyphPlacement {
            origin,
            area: metrics.area.translated(origin.x, origin.y),
            advance: metrics.advance,
        }
    }

    /// Streams coverage for `code` at this renderer's size.
    pub fn for_each_coverage(&mut self, code: u32, emit: &mut dyn FnMut(i32, i32, u8)) {
        self.source.for_each_coverage(code, self.pixel_size, emit);
    }
}
