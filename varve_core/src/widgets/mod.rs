// Copyright 2026 the Varve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in widgets.

mod label;
mod rectangle;

pub use label::Label;
pub use rectangle::Rectangle;
