// Copyright 2026 the Varve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned integer rectangles.

/// An axis-aligned rectangle: origin plus extent, in pixels.
///
/// `width` and `height` are never negative. An area with zero width or
/// height is *empty*; empty areas arise naturally from intersecting
/// disjoint rectangles and are accepted everywhere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Area {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Extent along x. Never negative.
    pub width: i32,
    /// Extent along y. Never negative.
    pub height: i32,
}

impl Area {
    /// The empty area at the origin.
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Creates an area from origin and extent.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is negative.
    #[must_use]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        assert!(width >= 0 && height >= 0, "negative extent");
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the exclusive right edge (`x + width`).
    #[inline]
    #[must_use]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// Returns the exclusive bottom edge (`y + height`).
    #[inline]
    #[must_use]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// Returns whether the area covers no pixels.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the number of pixels covered.
    #[inline]
    #[must_use]
    pub const fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Returns whether the point `(x, y)` lies inside the area.
    #[inline]
    #[must_use]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Returns the intersection of two areas.
    ///
    /// Disjoint areas intersect to an empty area (extent clamped to zero).
    #[must_use]
    pub fn intersect(self, other: Self) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Self {
            x,
            y,
            width: (right - x).max(0),
            height: (bottom - y).max(0),
        }
    }

    /// Returns the area shifted by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }
}
