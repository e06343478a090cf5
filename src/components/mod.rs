// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! UI components for Overlay Studio

pub mod overlay_canvas;
pub mod slider;

// Re-export commonly used widget views and types
pub use overlay_canvas::{CanvasAction, overlay_canvas};
pub use slider::slider;
