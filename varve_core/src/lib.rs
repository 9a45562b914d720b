// Copyright 2026 the Varve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strip-streaming rendering pipeline for microcontroller displays.
//!
//! `varve_core` composes widget trees in 8-bit-per-channel RGBA and streams
//! the result to a panel in bounded horizontal strips, for targets whose
//! RAM cannot hold a full frame. It is `no_std` compatible (with `alloc`)
//! and keeps the per-frame allocation count at zero: all storage is
//! obtained at construction time, fallibly.
//!
//! # Architecture
//!
//! The crate is organized around a frame loop that covers the panel one
//! strip at a time:
//!
//! ```text
//!   draw_frame()
//!       │
//!       ▼
//!   Driver::get_buffer() ──► Strip ──► Widget::process_event(Draw)
//!                                           │
//!                 ┌─────────────────────────┘
//!                 ▼
//!   Driver::flush() ──► color reduction (Dither) ──► panel transport
//! ```
//!
//! **[`driver`]** — The [`Driver`](driver::Driver) trait, the
//! [`Strip`](driver::Strip) pixel view, and the
//! [`StripCursor`](driver::StripCursor) that owns the frame protocol
//! arithmetic shared by all backends.
//!
//! **[`widget`]** — The [`Widget`](widget::Widget) trait: one polymorphic
//! event entry point dispatching to per-event hooks that default to no-ops.
//!
//! **[`frame`]** — [`draw_frame`](frame::draw_frame), the orchestrator
//! tying driver and widgets together for one frame.
//!
//! **[`dither`]** — RGB565 color reduction, by plain truncation or ordered
//! dithering with a deterministic xorshift generator.
//!
//! **[`cache`]** — [`SlotCache`](cache::SlotCache), a bounded key-to-slot
//! cache with self-organizing pseudo-LRU eviction.
//!
//! **[`text`]** — The [`GlyphSource`](text::GlyphSource) seam to an
//! external font engine and the caching
//! [`TextRenderer`](text::TextRenderer) layout facade.
//!
//! **[`widgets`]** — Built-in widgets: solid
//! [`Rectangle`](widgets::Rectangle) and text [`Label`](widgets::Label).
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types
//! for frame-loop instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod area;
pub mod cache;
pub mod color;
pub mod dither;
pub mod driver;
pub mod frame;
pub mod text;
pub mod trace;
pub mod widget;
pub mod widgets;
