// Copyright 2026 the Varve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget capability contract and event dispatch.
//!
//! A widget is a composable visual element with one polymorphic entry
//! point, [`Widget::process_event`]. The provided implementation performs
//! table dispatch to per-event hooks that all default to no-ops, so a
//! widget implements only the events it cares about — the
//! trait-with-default-methods rendering of an optional handler table.
//!
//! # Lifecycle
//!
//! ```text
//! Init → Reshape → { FrameStart → Draw* → FrameEnd }* → Destroy
//! ```
//!
//! [`init_widget`] delivers exactly one [`Event::Init`] followed by exactly
//! one [`Event::Reshape`] carrying the initial placement, before any draw.
//! Within a frame, [`Event::Draw`] arrives once per strip the orchestrator
//! pulls from the driver; a widget must clip its rendering to the
//! intersection of its own area and the strip's area and must never assume
//! it sees the whole frame in one call. Only `Draw` may mutate pixel
//! memory; every other event mutates widget-private state only.

use core::any::Any;
use core::fmt;

use crate::area::Area;
use crate::driver::{DriverInfo, Strip};

/// An event delivered to a widget.
///
/// The `User` variant is the open range reserved for widget-specific
/// events; its payload travels as [`Any`] and is downcast by the receiving
/// widget.
pub enum Event<'a, 'p> {
    /// First event a widget ever receives.
    Init,
    /// The widget's placement changed; the provided dispatch stores the new
    /// area before invoking the hook.
    Reshape(Area),
    /// Compose into the given strip. The only event allowed to touch pixel
    /// memory.
    Draw(&'a mut Strip<'p>),
    /// A new frame is starting.
    FrameStart,
    /// The frame's final strip has been flushed.
    FrameEnd,
    /// Final event; release widget-held resources.
    Destroy,
    /// Widget-defined event code and payload.
    User(u32, &'a mut dyn Any),
}

impl fmt::Debug for Event<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => f.write_str("Init"),
            Self::Reshape(area) => f.debug_tuple("Reshape").field(area).finish(),
            Self::Draw(strip) => f.debug_tuple("Draw").field(&strip.area).finish(),
            Self::FrameStart => f.write_str("FrameStart"),
            Self::FrameEnd => f.write_str("FrameEnd"),
            Self::Destroy => f.write_str("Destroy"),
            Self::User(code, _) => f.debug_tuple("User").field(code).finish(),
        }
    }
}

/// The widget capability contract.
///
/// Implementations own their placement [`Area`] and any private state;
/// configuration arrives through the concrete type's constructor.
pub trait Widget {
    /// Returns the widget's current placement.
    fn area(&self) -> Area;

    /// Mutable access to the placement; written by the provided
    /// [`process_event`](Self::process_event) on [`Event::Reshape`].
    fn area_mut(&mut self) -> &mut Area;

    /// Dispatches one event.
    ///
    /// The provided implementation routes each event kind to its hook and
    /// records the area carried by `Reshape`. Override only to intercept
    /// dispatch itself.
    fn process_event(&mut self, driver: &DriverInfo, event: Event<'_, '_>) {
        match event {
            Event::Init => self.on_init(driver),
            Event::Reshape(area) => {
                *self.area_mut() = area;
                self.on_reshape(driver, area);
            }
            Event::Draw(strip) => self.on_draw(driver, strip),
            Event::FrameStart => self.on_frame_start(driver),
            Event::FrameEnd => self.on_frame_end(driver),
            Event::Destroy => self.on_destroy(driver),
            Event::User(code, payload) => self.on_user(driver, code, payload),
        }
    }

    /// Hook for [`Event::Init`].
    fn on_init(&mut self, driver: &DriverInfo) {
        _ = driver;
    }

    /// Hook for [`Event::Reshape`]; the new area is already stored.
    fn on_reshape(&mut self, driver: &DriverInfo, area: Area) {
        _ = (driver, area);
    }

    /// Hook for [`Event::Draw`].
    fn on_draw(&mut self, driver: &DriverInfo, strip: &mut Strip<'_>) {
        _ = (driver, strip);
    }

    /// Hook for [`Event::FrameStart`].
    fn on_frame_start(&mut self, driver: &DriverInfo) {
        _ = driver;
    }

    /// Hook for [`Event::FrameEnd`].
    fn on_frame_end(&mut self, driver: &DriverInfo) {
        _ = driver;
    }

    /// Hook for [`Event::Destroy`].
    fn on_destroy(&mut self, driver: &DriverInfo) {
        _ = driver;
    }

    /// Hook for [`Event::User`].
    fn on_user(&mut self, driver: &DriverInfo, code: u32, payload: &mut dyn Any) {
        _ = (driver, code, payload);
    }
}

/// Brings a widget to life: one `Init`, then one `Reshape` with `area`.
///
/// Must be called before the widget sees any draw or frame event.
pub fn init_widget(driver: &DriverInfo, widget: &mut dyn Widget, area: Area) {
    widget.process_event(driver, Event::Init);
    widget.process_event(driver, Event::Reshape(area));
}

/// Delivers `Destroy` to every widget in the list.
pub fn destroy_widgets(driver: &DriverInfo, widgets: &mut [&mut dyn Widget]) {
    for widget in widgets {
        widget.process_event(driver, Event::Destroy);
    }
}
