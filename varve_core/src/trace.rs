// Copyright 2026 the Varve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-loop tracing and diagnostics.
//!
//! [`TraceSink`] has one method per frame-loop event, all defaulting to
//! no-ops, so a sink implements only the events it cares about. [`Tracer`]
//! wraps an optional `&mut dyn TraceSink`: with the `trace` feature **off**
//! every `Tracer` method compiles to nothing; with it **on**, each method
//! costs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies.

use crate::area::Area;

/// Emitted when the orchestrator starts covering a frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameBeginEvent {
    /// Completed-frame counter at the start of the frame.
    pub frame: u64,
}

/// Emitted after each strip is composited and flushed.
#[derive(Clone, Copy, Debug)]
pub struct StripEvent {
    /// Frame this strip belongs to.
    pub frame: u64,
    /// Zero-based strip index within the frame.
    pub index: u32,
    /// Placement of the strip within the frame.
    pub area: Area,
}

/// Emitted once the frame's final strip has been flushed.
#[derive(Clone, Copy, Debug)]
pub struct FrameEndEvent {
    /// Frame that was completed.
    pub frame: u64,
    /// Number of strips it took to cover the frame.
    pub strips: u32,
}

/// Receives trace events from the frame loop.
///
/// All methods have default no-op implementations.
pub trait TraceSink {
    /// Called when a frame begins.
    fn on_frame_begin(&mut self, e: &FrameBeginEvent) {
        _ = e;
    }

    /// Called after each strip is flushed.
    fn on_strip(&mut self, e: &StripEvent) {
        _ = e;
    }

    /// Called when a frame completes.
    fn on_frame_end(&mut self, e: &FrameEndEvent) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

/// Thin wrapper around an optional [`TraceSink`].
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`FrameBeginEvent`].
    #[inline]
    pub fn frame_begin(&mut self, e: &FrameBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`StripEvent`].
    #[inline]
    pub fn strip(&mut self, e: &StripEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_strip(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameEndEvent`].
    #[inline]
    pub fn frame_end(&mut self, e: &FrameEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}
