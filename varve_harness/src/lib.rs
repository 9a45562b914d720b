// Copyright 2026 the Varve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory capture panel for demos and tests.
//!
//! [`CapturePanel`] implements the [`Driver`] contract against a plain
//! memory buffer instead of a physical transport: composition happens in
//! RGBA strips exactly as on hardware, and `flush` converts each strip to
//! RGB565 into a retained full-frame image that tests can inspect pixel by
//! pixel. Color reduction is plain truncation by default; install a
//! [`Dither`] context to exercise the ordered-dithering path.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use varve_core::area::Area;
use varve_core::cache::AllocError;
use varve_core::color::{ColorFormat, Rgba};
use varve_core::dither::{Dither, truncate_rgb565};
use varve_core::driver::{Driver, Strip, StripCursor};

/// A simulated panel that retains every flushed frame in RGB565.
pub struct CapturePanel {
    width: u32,
    height: u32,
    cursor: StripCursor,
    current: Area,
    strip: Vec<Rgba>,
    panel: Vec<u16>,
    dither: Option<Dither>,
    background: Rgba,
}

impl core::fmt::Debug for CapturePanel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CapturePanel")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("strip_height", &self.cursor.strip_height())
            .field("dither", &self.dither.is_some())
            .finish_non_exhaustive()
    }
}

fn try_filled<T: Clone>(value: T, len: usize) -> Result<Vec<T>, AllocError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| AllocError)?;
    v.resize(len, value);
    Ok(v)
}

impl CapturePanel {
    /// Creates a panel with the given dimensions and nominal strip height.
    ///
    /// All storage is obtained here; failure leaves nothing behind.
    ///
    /// # Panics
    ///
    /// Panics if any dimension is zero.
    pub fn new(width: u32, height: u32, strip_height: u32) -> Result<Self, AllocError> {
        assert!(width > 0, "panel width must be nonzero");
        let strip = try_filled(Rgba::BLACK, (width * strip_height.min(height)) as usize)?;
        let panel = try_filled(0u16, (width * height) as usize)?;
        Ok(Self {
            width,
            height,
            cursor: StripCursor::new(height, strip_height),
            current: Area::ZERO,
            strip,
            panel,
            dither: None,
            background: Rgba::BLACK,
        })
    }

    /// Installs (or removes) the dithering context used on flush.
    pub fn set_dither(&mut self, dither: Option<Dither>) {
        self.dither = dither;
    }

    /// Sets the color strips are cleared to before each draw.
    pub fn set_background(&mut self, background: Rgba) {
        self.background = background;
    }

    /// Returns the captured frame, row-major RGB565.
    #[must_use]
    pub fn panel(&self) -> &[u16] {
        &self.panel
    }

    /// Returns the captured frame as raw native-endian bytes.
    #[must_use]
    pub fn panel_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.panel)
    }

    /// Reads one captured pixel.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates lie outside the panel.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> u16 {
        assert!(x < self.width && y < self.height, "pixel outside the panel");
        self.panel[(y * self.width + x) as usize]
    }
}

impl Driver for CapturePanel {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color_format(&self) -> ColorFormat {
        ColorFormat::Rgba8888
    }

    fn frame(&self) -> u64 {
        self.cursor.frame()
    }

    fn get_buffer(&mut self) -> Strip<'_> {
        let span = self.cursor.advance();
        self.current = span.area(self.width);
        let len = self.current.pixel_count();
        self.strip[..len].fill(self.background);
        Strip::new(
            self.current,
            ColorFormat::Rgba8888,
            &mut self.strip[..len],
        )
    }

    fn flush(&mut self) {
        let len = self.current.pixel_count();
        let start = self.current.y as usize * self.width as usize;
        let dst = &mut self.panel[start..start + len];
        match &mut self.dither {
            Some(dither) => dither.dither_rgb565(&self.strip[..len], dst),
            None => truncate_rgb565(&self.strip[..len], dst),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use varve_core::dither::pack_rgb565;
    use varve_core::frame::draw_frame;
    use varve_core::widget::init_widget;
    use varve_core::widgets::Rectangle;

    #[test]
    fn rectangle_spanning_strips_is_captured_intact() {
        let mut panel = CapturePanel::new(24, 30, 8).unwrap();
        let info = panel.info();
        let mut rect = Rectangle::new(Rgba::new(200, 120, 40, 255));
        // Crosses the strip boundaries at y = 8, 16, 24.
        let placed = Area::new(3, 5, 10, 22);
        init_widget(&info, &mut rect, placed);

        draw_frame(&mut panel, &mut [&mut rect]);

        let fill = pack_rgb565(Rgba::new(200, 120, 40, 255));
        for y in 0..30 {
            for x in 0..24 {
                let expected = if placed.contains(x as i32, y as i32) {
                    fill
                } else {
                    0
                };
                assert_eq!(panel.pixel(x, y), expected, "pixel ({x}, {y})");
            }
        }
        assert_eq!(panel.frame(), 1);
    }

    #[test]
    fn background_is_applied_per_strip() {
        let mut panel = CapturePanel::new(4, 8, 4).unwrap();
        panel.set_background(Rgba::new(16, 32, 64, 255));
        draw_frame(&mut panel, &mut []);
        let bg = pack_rgb565(Rgba::new(16, 32, 64, 255));
        assert!(panel.panel().iter().all(|&p| p == bg));
    }

    #[test]
    fn dithered_capture_is_reproducible() {
        let gray = Rgba::new(103, 103, 103, 255);
        let mut runs = [Vec::new(), Vec::new()];
        for captured in &mut runs {
            let mut panel = CapturePanel::new(64, 64, 16).unwrap();
            panel.set_background(gray);
            panel.set_dither(Some(Dither::new(Dither::DEFAULT_SEED)));
            draw_frame(&mut panel, &mut []);
            captured.extend_from_slice(panel.panel());
        }
        assert_eq!(runs[0], runs[1]);
        // The jitter actually produced more than one output level.
        assert!(runs[0].iter().any(|&p| p != runs[0][0]));
    }

    #[test]
    fn panel_bytes_views_the_same_memory() {
        let mut panel = CapturePanel::new(2, 1, 1).unwrap();
        panel.set_background(Rgba::WHITE);
        draw_frame(&mut panel, &mut []);
        assert_eq!(panel.panel_bytes().len(), 4);
        assert_eq!(panel.panel_bytes(), &0xffffu16.to_ne_bytes().repeat(2)[..]);
    }

    #[test]
    fn frame_counter_tracks_draw_frame_calls() {
        let mut panel = CapturePanel::new(8, 90, 20).unwrap();
        for expected in 1..=3 {
            draw_frame(&mut panel, &mut []);
            assert_eq!(panel.frame(), expected);
        }
    }
}
