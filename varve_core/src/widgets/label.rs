// Copyright 2026 the Varve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use crate::area::Area;
use crate::color::Rgba;
use crate::driver::{DriverInfo, Strip};
use crate::text::{Delta, GlyphPlacement, GlyphSource, TextRenderer};
use crate::widget::Widget;

/// A single-line text run.
///
/// The pen starts at the widget's top-left corner with the baseline one
/// line height down, and glyph coverage is alpha-blended over whatever the
/// strip already holds. Rendering is clipped to the widget's area, so text
/// that outgrows its placement is cut, not wrapped.
#[derive(Debug)]
pub struct Label<S> {
    area: Area,
    text: String,
    color: Rgba,
    renderer: TextRenderer<S>,
}

impl<S: GlyphSource> Label<S> {
    /// Creates an unplaced label.
    #[must_use]
    pub const fn new(renderer: TextRenderer<S>, text: String, color: Rgba) -> Self {
        Self {
            area: Area::ZERO,
            text,
            color,
            renderer,
        }
    }

    /// Returns the displayed text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the displayed text; takes effect on the next draw.
    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    /// The renderer backing this label.
    #[must_use]
    pub fn renderer(&self) -> &TextRenderer<S> {
        &self.renderer
    }
}

/// Coverage-weighted blend of `src` over `dst`.
fn blend(dst: Rgba, src: Rgba, coverage: u8) -> Rgba {
    let mix = |d: u8, s: u8| -> u8 {
        let c = u16::from(coverage);
        let v = u16::from(s) * c + u16::from(d) * (255 - c);
        ((v + 127) / 255) as u8
    };
    Rgba::new(
        mix(dst.r, src.r),
        mix(dst.g, src.g),
        mix(dst.b, src.b),
        dst.a.max(src.a),
    )
}

impl<S: GlyphSource> Widget for Label<S> {
    fn area(&self) -> Area {
        self.area
    }

    fn area_mut(&mut self) -> &mut Area {
        &mut self.area
    }

    fn on_draw(&mut self, _driver: &DriverInfo, strip: &mut Strip<'_>) {
        let clip = self.area.intersect(strip.area);
        if clip.is_empty() {
            return;
        }
        let base = Delta::new(self.area.x, self.area.y + self.renderer.line_height());
        let color = self.color;

        let mut previous: Option<GlyphPlacement> = None;
        for ch in self.text.chars() {
            let code = u32::from(ch);
            let placement = self.renderer.place_glyph(code, previous.as_ref());
            previous = Some(placement);

            let ink = placement.area.translated(base.x, base.y);
            if ink.intersect(clip).is_empty() {
                continue;
            }

            let ox = base.x + placement.origin.x;
            let oy = base.y + placement.origin.y;
            self.renderer.for_each_coverage(code, &mut |gx, gy, coverage| {
                let (x, y) = (ox + gx, oy + gy);
                if coverage == 0 || !clip.contains(x, y) {
                    return;
                }
                if let Some(dst) = strip.pixel(x, y) {
                    strip.set_pixel(x, y, blend(dst, color, coverage));
                }
            });
        }
    }
}
