// Copyright 2026 the Varve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON frame-log export.
//!
//! [`FrameLogSink`] implements [`TraceSink`] and collects every event as a
//! JSON object; [`FrameLogSink::write_to`] serializes the collected log as
//! one JSON array, suitable for diffing frame runs or feeding offline
//! tooling.

use std::io::{self, Write};

use serde_json::{Value, json};

use varve_core::trace::{FrameBeginEvent, FrameEndEvent, StripEvent, TraceSink};

/// Collects trace events as JSON objects.
#[derive(Debug, Default)]
pub struct FrameLogSink {
    events: Vec<Value>,
}

impl FrameLogSink {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected events.
    #[must_use]
    pub fn events(&self) -> &[Value] {
        &self.events
    }

    /// Consumes the log into a single JSON array value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Array(self.events)
    }

    /// Writes the collected log as pretty-printed JSON.
    pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(writer, &self.events)?;
        Ok(())
    }
}

impl TraceSink for FrameLogSink {
    fn on_frame_begin(&mut self, e: &FrameBeginEvent) {
        self.events.push(json!({
            "event": "frame_begin",
            "frame": e.frame,
        }));
    }

    fn on_strip(&mut self, e: &StripEvent) {
        self.events.push(json!({
            "event": "strip",
            "frame": e.frame,
            "index": e.index,
            "y": e.area.y,
            "rows": e.area.height,
        }));
    }

    fn on_frame_end(&mut self, e: &FrameEndEvent) {
        self.events.push(json!({
            "event": "frame_end",
            "frame": e.frame,
            "strips": e.strips,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use varve_core::area::Area;

    #[test]
    fn collects_one_object_per_event() {
        let mut sink = FrameLogSink::new();
        sink.on_frame_begin(&FrameBeginEvent { frame: 0 });
        sink.on_strip(&StripEvent {
            frame: 0,
            index: 0,
            area: Area::new(0, 0, 240, 20),
        });
        sink.on_frame_end(&FrameEndEvent { frame: 0, strips: 1 });

        assert_eq!(sink.events().len(), 3);
        assert_eq!(sink.events()[1]["event"], "strip");
        assert_eq!(sink.events()[1]["rows"], 20);

        let value = sink.into_value();
        assert_eq!(value.as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn writes_a_json_array() {
        let mut sink = FrameLogSink::new();
        sink.on_frame_end(&FrameEndEvent { frame: 7, strips: 12 });
        let mut out = Vec::new();
        sink.write_to(&mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["strips"], 12);
    }
}
