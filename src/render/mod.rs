// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Compositing of the background, the transformed overlay and the editing
//! handles onto a CPU raster surface.

pub mod compositor;
pub mod handles;
pub mod raster;

pub use compositor::{RenderTarget, render};
pub use raster::RasterImage;
