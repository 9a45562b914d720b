// Copyright 2026 the Varve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON export for varve diagnostics.
//!
//! This crate provides [`TraceSink`](varve_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`json::FrameLogSink`] — collects events into a JSON frame log for
//!   offline inspection.

pub mod json;
pub mod pretty;
