// Copyright 2026 the Varve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The driver contract and the strip-streaming frame protocol.
//!
//! A full frame of composition memory (`width * height * 4` bytes) does not
//! fit the SRAM budget of the panels this crate targets, so a driver hands
//! out the frame in bounded horizontal *strips*. The protocol:
//!
//! - A frame begins with a strip at `y = 0`.
//! - Each [`Driver::get_buffer`] advances `y` by the nominal strip height,
//!   clipping the returned height to the rows that remain.
//! - When `y + height` reaches the frame height the frame is complete; the
//!   next `get_buffer` wraps back to `y = 0`.
//!
//! Callers must strictly alternate `get_buffer` and [`Driver::flush`]; the
//! `&mut self` borrow held by the returned [`Strip`] makes retaining a
//! strip across its flush a compile error. A concrete backend may still
//! overlap the hardware transfer of strip *N* with the composition of strip
//! *N + 1* by keeping two alternating buffers behind the contract.
//!
//! [`StripCursor`] owns the advance/clip/wrap arithmetic and the frame
//! counter so every backend implements the protocol identically.

use embedded_graphics_core::Pixel;
use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{Dimensions, Point, Size};
use embedded_graphics_core::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics_core::primitives::Rectangle;

use crate::area::Area;
use crate::color::{ColorFormat, Rgba};

/// A copyable snapshot of a driver's public fields, handed to widgets so
/// they can query dimensions without borrowing the driver itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DriverInfo {
    /// Panel width in pixels.
    pub width: u32,
    /// Panel height in pixels.
    pub height: u32,
    /// The driver's composition format.
    pub format: ColorFormat,
    /// Completed-frame counter.
    pub frame: u64,
}

/// One drawable strip of the frame.
///
/// The pixel memory belongs to the driver; a strip is valid only between
/// the `get_buffer` call that produced it and the matching `flush`.
/// Coordinates are frame-global: the strip's [`Area`] records where in the
/// frame this memory lands, and all drawing methods accept frame
/// coordinates and clip to the strip.
#[derive(Debug)]
pub struct Strip<'a> {
    /// Placement of this strip within the frame.
    pub area: Area,
    /// Format of the pixel memory.
    pub format: ColorFormat,
    pixels: &'a mut [Rgba],
}

impl<'a> Strip<'a> {
    /// Wraps driver-owned pixel memory as a strip.
    ///
    /// # Panics
    ///
    /// Panics if `pixels` does not hold exactly `area.pixel_count()`
    /// entries.
    #[must_use]
    pub fn new(area: Area, format: ColorFormat, pixels: &'a mut [Rgba]) -> Self {
        assert_eq!(
            pixels.len(),
            area.pixel_count(),
            "pixel memory does not match strip area"
        );
        Self {
            area,
            format,
            pixels,
        }
    }

    /// Returns the strip's pixels, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[Rgba] {
        self.pixels
    }

    /// Returns the strip's pixels mutably, row-major.
    #[must_use]
    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        self.pixels
    }

    /// Returns the strip's pixel memory as raw bytes.
    #[must_use]
    pub fn pixel_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.pixels)
    }

    /// Reads the pixel at frame coordinates, if it lies in this strip.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Writes the pixel at frame coordinates; out-of-strip writes are
    /// discarded.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.index_of(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Fills `area` (frame coordinates) with a solid color, clipped to the
    /// intersection with this strip.
    pub fn fill(&mut self, area: Area, color: Rgba) {
        let clip = area.intersect(self.area);
        if clip.is_empty() {
            return;
        }
        let stride = self.area.width as usize;
        let left = (clip.x - self.area.x) as usize;
        for row in clip.y..clip.bottom() {
            let start = (row - self.area.y) as usize * stride + left;
            self.pixels[start..start + clip.width as usize].fill(color);
        }
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if !self.area.contains(x, y) {
            return None;
        }
        Some((y - self.area.y) as usize * self.area.width as usize + (x - self.area.x) as usize)
    }
}

impl Dimensions for Strip<'_> {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.area.x, self.area.y),
            Size::new(self.area.width as u32, self.area.height as u32),
        )
    }
}

/// Lets widgets draw `embedded-graphics` primitives straight into a strip,
/// in frame coordinates. Alpha is set to opaque; pixels outside the strip
/// are discarded, which is exactly the per-strip clipping the widget
/// contract requires.
impl DrawTarget for Strip<'_> {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            self.set_pixel(p.x, p.y, Rgba::new(c.r(), c.g(), c.b(), 255));
        }
        Ok(())
    }
}

/// The capability contract a concrete output target implements.
///
/// One value of an implementing type exists per physical (or simulated)
/// panel; backend-private state lives inside the implementation.
pub trait Driver {
    /// Panel width in pixels.
    fn width(&self) -> u32;

    /// Panel height in pixels.
    fn height(&self) -> u32;

    /// The composition format of strips this driver hands out.
    fn color_format(&self) -> ColorFormat;

    /// Completed-frame counter; increments once per fully covered frame.
    fn frame(&self) -> u64;

    /// Returns the next drawable strip per the frame protocol.
    fn get_buffer(&mut self) -> Strip<'_>;

    /// Publishes the most recent strip to the physical output, performing
    /// any color-format conversion.
    fn flush(&mut self);

    /// Returns a copyable snapshot of the public driver fields.
    fn info(&self) -> DriverInfo {
        DriverInfo {
            width: self.width(),
            height: self.height(),
            format: self.color_format(),
            frame: self.frame(),
        }
    }
}

/// One span dispensed by a [`StripCursor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StripSpan {
    /// Top row of the span.
    pub y: u32,
    /// Rows in the span; equals the nominal strip height except possibly
    /// for the final span of a frame.
    pub height: u32,
    /// Whether this span completes the frame.
    pub last: bool,
}

impl StripSpan {
    /// Returns the span as a full-width [`Area`].
    #[must_use]
    pub fn area(self, width: u32) -> Area {
        Area::new(0, self.y as i32, width as i32, self.height as i32)
    }
}

/// Owns the strip protocol arithmetic for a driver implementation.
///
/// Backends call [`advance`](Self::advance) from their `get_buffer`; the
/// cursor yields spans that tile `[0, frame_height)` exactly, clips the
/// final span, wraps to `y = 0`, and counts completed frames.
#[derive(Clone, Debug)]
pub struct StripCursor {
    frame_height: u32,
    strip_height: u32,
    next_y: u32,
    frame: u64,
}

impl StripCursor {
    /// Creates a cursor for the given frame and nominal strip heights.
    ///
    /// # Panics
    ///
    /// Panics if either height is zero.
    #[must_use]
    pub fn new(frame_height: u32, strip_height: u32) -> Self {
        assert!(frame_height > 0, "frame height must be nonzero");
        assert!(strip_height > 0, "strip height must be nonzero");
        Self {
            frame_height,
            strip_height,
            next_y: 0,
            frame: 0,
        }
    }

    /// Dispenses the next span.
    pub fn advance(&mut self) -> StripSpan {
        let y = self.next_y;
        let height = self.strip_height.min(self.frame_height - y);
        let last = y + height >= self.frame_height;
        if last {
            self.frame += 1;
            self.next_y = 0;
        } else {
            self.next_y = y + height;
        }
        StripSpan { y, height, last }
    }

    /// Returns the number of completed frames.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Returns the nominal strip height.
    #[must_use]
    pub const fn strip_height(&self) -> u32 {
        self.strip_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn even_frame_tiles_exactly() {
        let mut cursor = StripCursor::new(240, 20);
        let mut covered = 0;
        for i in 0..12 {
            let span = cursor.advance();
            assert_eq!(span.y, covered, "strip {i} must start where the last ended");
            assert_eq!(span.height, 20);
            assert_eq!(span.last, i == 11);
            covered += span.height;
        }
        assert_eq!(covered, 240);
        assert_eq!(cursor.frame(), 1);
        // The next span starts a new frame at the top.
        assert_eq!(cursor.advance().y, 0);
    }

    #[test]
    fn final_strip_is_clipped() {
        let mut cursor = StripCursor::new(90, 20);
        let spans: Vec<StripSpan> = (0..5).map(|_| cursor.advance()).collect();
        assert_eq!(spans.iter().map(|s| s.height).sum::<u32>(), 90);
        assert_eq!(spans[4].y, 80);
        assert_eq!(spans[4].height, 10);
        assert!(spans[4].last);
        assert!(spans[..4].iter().all(|s| !s.last && s.height == 20));
    }

    #[test]
    fn frame_counter_is_monotonic() {
        let mut cursor = StripCursor::new(64, 64);
        assert_eq!(cursor.frame(), 0);
        for expected in 1..=3 {
            let span = cursor.advance();
            assert!(span.last);
            assert_eq!(cursor.frame(), expected);
        }
    }

    #[test]
    fn fill_clips_to_strip() {
        let area = Area::new(0, 20, 8, 4);
        let mut pixels = vec![Rgba::BLACK; area.pixel_count()];
        let mut strip = Strip::new(area, ColorFormat::Rgba8888, &mut pixels);

        // Covers rows 18..26, so only rows 20..24 of columns 2..6 land.
        strip.fill(Area::new(2, 18, 4, 8), Rgba::WHITE);

        for y in 20..24 {
            for x in 0..8 {
                let expected = if (2..6).contains(&x) {
                    Rgba::WHITE
                } else {
                    Rgba::BLACK
                };
                assert_eq!(strip.pixel(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
        assert_eq!(strip.pixel(2, 19), None);
    }

    #[test]
    fn set_pixel_outside_strip_is_discarded() {
        let area = Area::new(0, 0, 4, 2);
        let mut pixels = vec![Rgba::BLACK; area.pixel_count()];
        let mut strip = Strip::new(area, ColorFormat::Rgba8888, &mut pixels);
        strip.set_pixel(4, 0, Rgba::WHITE);
        strip.set_pixel(0, 2, Rgba::WHITE);
        assert!(strip.pixels().iter().all(|&p| p == Rgba::BLACK));
    }

    #[test]
    fn draw_target_writes_in_frame_coordinates() {
        let area = Area::new(0, 10, 4, 2);
        let mut pixels = vec![Rgba::BLACK; area.pixel_count()];
        let mut strip = Strip::new(area, ColorFormat::Rgba8888, &mut pixels);

        let px = [
            Pixel(Point::new(1, 10), Rgb888::new(255, 0, 0)),
            Pixel(Point::new(1, 9), Rgb888::new(0, 255, 0)), // above the strip
        ];
        strip.draw_iter(px).unwrap();

        assert_eq!(strip.pixel(1, 10), Some(Rgba::new(255, 0, 0, 255)));
        assert_eq!(strip.pixels()[0], Rgba::BLACK);
    }

    #[test]
    #[should_panic(expected = "pixel memory does not match strip area")]
    fn mismatched_pixel_memory_panics() {
        let mut pixels = vec![Rgba::BLACK; 3];
        let _ = Strip::new(Area::new(0, 0, 2, 2), ColorFormat::Rgba8888, &mut pixels);
    }
}
