// Copyright 2026 the Varve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::area::Area;
use crate::color::Rgba;
use crate::driver::{DriverInfo, Strip};
use crate::widget::Widget;

/// Solid-color rectangle covering the widget's placed area.
#[derive(Clone, Copy, Debug)]
pub struct Rectangle {
    area: Area,
    color: Rgba,
}

impl Rectangle {
    /// Creates an unplaced rectangle of the given color.
    #[must_use]
    pub const fn new(color: Rgba) -> Self {
        Self {
            area: Area::ZERO,
            color,
        }
    }

    /// Returns the fill color.
    #[must_use]
    pub const fn color(&self) -> Rgba {
        self.color
    }

    /// Changes the fill color; takes effect on the next draw.
    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }
}

impl Widget for Rectangle {
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
