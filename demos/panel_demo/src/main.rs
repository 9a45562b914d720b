// Copyright 2026 the Varve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drives the capture panel through a few dithered frames.
//!
//! Composes a rectangle and a label onto a simulated 240x240 panel in
//! 24-row strips, streaming trace events to both a
//! [`PrettyPrintSink`](varve_debug::pretty::PrettyPrintSink) on stdout and
//! a [`FrameLogSink`](varve_debug::json::FrameLogSink), then writes the
//! collected frame log as JSON.

use std::fs::File;
use std::io::BufWriter;

use varve_core::area::Area;
use varve_core::color::Rgba;
use varve_core::dither::Dither;
use varve_core::driver::Driver;
use varve_core::frame::draw_frame_traced;
use varve_core::text::{Delta, GlyphMetrics, GlyphSource, TextRenderer};
use varve_core::trace::{FrameBeginEvent, FrameEndEvent, StripEvent, TraceSink, Tracer};
use varve_core::widget::{destroy_widgets, init_widget};
use varve_core::widgets::{Label, Rectangle};

use varve_debug::json::FrameLogSink;
use varve_debug::pretty::PrettyPrintSink;
use varve_harness::CapturePanel;

const FRAME_COUNT: u64 = 3;
const PANEL_SIZE: u32 = 240;
const STRIP_HEIGHT: u32 = 24;

/// Dispatches every event to both sinks.
struct FanOutSink {
    pretty: PrettyPrintSink,
    log: FrameLogSink,
}

impl TraceSink for FanOutSink {
    fn on_frame_begin(&mut self, e: &FrameBeginEvent) {
        self.pretty.on_frame_begin(e);
        self.log.on_frame_begin(e);
    }

    fn on_strip(&mut self, e: &StripEvent) {
        self.pretty.on_strip(e);
        self.log.on_strip(e);
    }

    fn on_frame_end(&mut self, e: &FrameEndEvent) {
        self.pretty.on_frame_end(e);
        self.log.on_frame_end(e);
    }
}

/// Placeholder glyph engine: every printable ASCII character renders as a
/// solid box one pixel narrower than its advance.
struct BlockFont;

impl GlyphSource for BlockFont {
    fn line_height(&self, pixel_size: u32) -> i32 {
        pixel_size as i32 + 2
    }

    fn glyph_metrics(&mut self, code: u32, pixel_size: u32) -> Option<GlyphMetrics> {
        let size = pixel_size as i32;
        char::from_u32(code)
            .filter(|c| c.is_ascii_graphic())
            .map(|_| GlyphMetrics {
                area: Area::new(0, -size, size - 1, size),
                advance: Delta::new(size, 0),
            })
    }

    fn for_each_coverage(
        &mut self,
        code: u32,
        pixel_size: u32,
        emit: &mut dyn FnMut(i32, i32, u8),
    ) {
        let Some(metrics) = self.glyph_metrics(code, pixel_size) else {
            return;
        };
        let area = metrics.area;
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                emit(x, y, 255);
            }
        }
    }
}

fn main() {
    // -- panel -------------------------------------------------------------
    let mut panel =
        CapturePanel::new(PANEL_SIZE, PANEL_SIZE, STRIP_HEIGHT).expect("panel allocation");
    panel.set_dither(Some(Dither::new(Dither::DEFAULT_SEED)));
    panel.set_background(Rgba::new(24, 24, 32, 255));

    // -- widgets -----------------------------------------------------------
    let mut rect = Rectangle::new(Rgba::new(220, 80, 40, 255));
    let renderer = TextRenderer::new(BlockFont, 8, 32).expect("glyph cache allocation");
    let mut label = Label::new(renderer, "varve".into(), Rgba::WHITE);

    let info = panel.info();
    init_widget(&info, &mut rect, Area::new(30, 60, 180, 90));
    init_widget(&info, &mut label, Area::new(30, 170, 180, 16));

    // -- sinks -------------------------------------------------------------
    let mut sink = FanOutSink {
        pretty: PrettyPrintSink::new(Box::new(std::io::stdout())),
        log: FrameLogSink::new(),
    };

    // -- frame loop --------------------------------------------------------
    for frame in 0..FRAME_COUNT {
        // Shift the fill a little so successive frames differ.
        rect.set_color(Rgba::new(220, 80 + 40 * frame as u8, 40, 255));
        let mut tracer = Tracer::new(&mut sink);
        draw_frame_traced(&mut panel, &mut [&mut rect, &mut label], &mut tracer);
    }

    let info = panel.info();
    destroy_widgets(&info, &mut [&mut rect, &mut label]);

    // -- export frame log --------------------------------------------------
    let path = "frame_log.json";
    let file = File::create(path).expect("failed to create frame_log.json");
    let mut writer = BufWriter::new(file);
    sink.log.write_to(&mut writer).expect("failed to write frame log");

    println!("Wrote {path} ({FRAME_COUNT} frames of {PANEL_SIZE}x{PANEL_SIZE})");
}
