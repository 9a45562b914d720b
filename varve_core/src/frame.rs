// Copyright 2026 the Varve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame-loop orchestrator.
//!
//! [`draw_frame`] covers one frame: it announces [`Event::FrameStart`] to
//! every widget, then repeatedly pulls a strip from the driver, delivers
//! [`Event::Draw`] for that strip to every widget, and flushes — until the
//! strip protocol reports the frame complete — and finally announces
//! [`Event::FrameEnd`]. Nothing in the loop blocks or suspends; a single
//! cooperative task drives it until the hosting process ends.

use crate::driver::Driver;
use crate::trace::{FrameBeginEvent, FrameEndEvent, StripEvent, Tracer};
use crate::widget::{Event, Widget};

/// Draws one full frame.
///
/// Widgets receive events in list order; each receives one `Draw` per
/// strip. See the [module docs](self) for the event sequence.
pub fn draw_frame<D>(driver: &mut D, widgets: &mut [&mut dyn Widget])
where
    D: Driver + ?Sized,
{
    draw_frame_traced(driver, widgets, &mut Tracer::none());
}

/// [`draw_frame`] with frame-loop instrumentation.
pub fn draw_frame_traced<D>(driver: &mut D, widgets: &mut [&mut dyn Widget], tracer: &mut Tracer<'_>)
where
    D: Driver + ?Sized,
{
    let info = driver.info();
    tracer.frame_begin(&FrameBeginEvent { frame: info.frame });

    for widget in &mut *widgets {
        widget.process_event(&info, Event::FrameStart);
    }

    let mut strips = 0;
    loop {
        let mut strip = driver.get_buffer();
        let area = strip.area;
        let last = area.bottom() >= info.height as i32;

        for widget in &mut *widgets {
            widget.process_event(&info, Event::Draw(&mut strip));
        }

        drop(strip);
        driver.flush();
        tracer.strip(&StripEvent {
            frame: info.frame,
            index: strips,
            area,
        });
        strips += 1;

        if last {
            break;
        }
    }

    for widget in &mut *widgets {
        widget.process_event(&info, Event::FrameEnd);
    }
    tracer.frame_end(&FrameEndEvent {
        frame: info.frame,
        strips,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::area::Area;
    use crate::color::{ColorFormat, Rgba};
    use crate::driver::{DriverInfo, Strip, StripCursor};
    use crate::widget::init_widget;

    /// Captures the full frame in the composition format, no conversion.
    struct TestDriver {
        width: u32,
        height: u32,
        cursor: StripCursor,
        current: Area,
        strip: Vec<Rgba>,
        captured: Vec<Rgba>,
    }

    impl TestDriver {
        fn new(width: u32, height: u32, strip_height: u32) -> Self {
            Self {
                width,
                height,
                cursor: StripCursor::new(height, strip_height),
                current: Area::ZERO,
                strip: vec![Rgba::BLACK; (width * strip_height) as usize],
                captured: vec![Rgba::BLACK; (width * height) as usize],
            }
        }

        fn captured(&self, x: i32, y: i32) -> Rgba {
            self.captured[y as usize * self.width as usize + x as usize]
        }
    }

    impl Driver for TestDriver {
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
            self.strip[..len].fill(Rgba::BLACK);
            Strip::new(self.current, ColorFormat::Rgba8888, &mut self.strip[..len])
        }

        fn flush(&mut self) {
            let len = self.current.pixel_count();
            let start = self.current.y as usize * self.width as usize;
            self.captured[start..start + len].copy_from_slice(&self.strip[..len]);
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Seen {
        Init,
        Reshape(Area),
        FrameStart,
        Draw(Area),
        FrameEnd,
        Destroy,
    }

    #[derive(Default)]
    struct RecordingWidget {
        area: Area,
        log: Vec<Seen>,
    }

    impl Widget for RecordingWidget {
        fn area(&self) -> Area {
            self.area
        }

        fn area_mut(&mut self) -> &mut Area {
            &mut self.area
        }

        fn on_init(&mut self, _driver: &DriverInfo) {
            self.log.push(Seen::Init);
        }

        fn on_reshape(&mut self, _driver: &DriverInfo, area: Area) {
            self.log.push(Seen::Reshape(area));
        }

        fn on_draw(&mut self, _driver: &DriverInfo, strip: &mut Strip<'_>) {
            self.log.push(Seen::Draw(strip.area));
        }

        fn on_frame_start(&mut self, _driver: &DriverInfo) {
            self.log.push(Seen::FrameStart);
        }

        fn on_frame_end(&mut self, _driver: &DriverInfo) {
            self.log.push(Seen::FrameEnd);
        }

        fn on_destroy(&mut self, _driver: &DriverInfo) {
            self.log.push(Seen::Destroy);
        }
    }

    /// Fills its area every draw; used to check per-strip clipping.
    struct FillWidget {
        area: Area,
        color: Rgba,
    }

    impl Widget for FillWidget {
        fn area(&self) -> Area {
            self.area
        }

        fn area_mut(&mut self) -> &mut Area {
            &mut self.area
        }

        fn on_draw(&mut self, _driver: &DriverInfo, strip: &mut Strip<'_>) {
            strip.fill(self.area, self.color);
        }
    }

    #[test]
    fn init_precedes_reshape_precedes_draw() {
        let mut driver = TestDriver::new(32, 90, 20);
        let info = driver.info();
        let mut widget = RecordingWidget::default();
        let placement = Area::new(4, 30, 10, 10);

        init_widget(&info, &mut widget, placement);
        draw_frame(&mut driver, &mut [&mut widget]);

        assert_eq!(widget.log[0], Seen::Init);
        assert_eq!(widget.log[1], Seen::Reshape(placement));
        assert_eq!(widget.area(), placement);
        let inits = widget.log.iter().filter(|&&s| s == Seen::Init).count();
        assert_eq!(inits, 1);
        assert!(matches!(widget.log[2], Seen::FrameStart));
    }

    #[test]
    fn one_draw_per_strip_between_frame_markers() {
        let mut driver = TestDriver::new(32, 90, 20);
        let info = driver.info();
        let mut widget = RecordingWidget::default();
        init_widget(&info, &mut widget, Area::new(0, 0, 32, 90));

        draw_frame(&mut driver, &mut [&mut widget]);

        let draws: Vec<Area> = widget
            .log
            .iter()
            .filter_map(|s| match s {
                Seen::Draw(area) => Some(*area),
                _ => None,
            })
            .collect();
        assert_eq!(draws.len(), 5);
        assert_eq!(draws[0], Area::new(0, 0, 32, 20));
        assert_eq!(draws[4], Area::new(0, 80, 32, 10));
        assert_eq!(*widget.log.last().unwrap(), Seen::FrameEnd);
        assert_eq!(driver.frame(), 1);
    }

    #[test]
    fn widget_spanning_strips_is_reassembled() {
        let mut driver = TestDriver::new(16, 40, 8);
        let info = driver.info();
        // Crosses the strip boundaries at y = 8, 16, 24.
        let mut widget = FillWidget {
            area: Area::new(2, 5, 6, 25),
            color: Rgba::new(200, 40, 90, 255),
        };
        let area = widget.area;
        init_widget(&info, &mut widget, area);

        draw_frame(&mut driver, &mut [&mut widget]);

        for y in 0..40 {
            for x in 0..16 {
                let inside = widget.area.contains(x, y);
                let expected = if inside {
                    Rgba::new(200, 40, 90, 255)
                } else {
                    Rgba::BLACK
                };
                assert_eq!(driver.captured(x, y), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn destroy_reaches_every_widget() {
        let driver = TestDriver::new(8, 8, 8);
        let info = driver.info();
        let mut a = RecordingWidget::default();
        let mut b = RecordingWidget::default();
        crate::widget::destroy_widgets(&info, &mut [&mut a, &mut b]);
        assert_eq!(a.log, &[Seen::Destroy]);
        assert_eq!(b.log, &[Seen::Destroy]);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_sees_every_strip() {
        use crate::trace::{StripEvent, TraceSink};

        #[derive(Default)]
        struct CountingSink {
            strips: u32,
            frames: u32,
        }
        impl TraceSink for CountingSink {
            fn on_strip(&mut self, _e: &StripEvent) {
                self.strips += 1;
            }
            fn on_frame_end(&mut self, e: &crate::trace::FrameEndEvent) {
                self.frames += 1;
                assert_eq!(e.strips, 12);
            }
        }

        let mut driver = TestDriver::new(240, 240, 20);
        let mut sink = CountingSink::default();
        draw_frame_traced(&mut driver, &mut [], &mut Tracer::new(&mut sink));
        assert_eq!(sink.strips, 12);
        assert_eq!(sink.frames, 1);
    }
}
