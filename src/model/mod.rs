// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Overlay data model

pub mod geometry;

pub use geometry::{Corner, OverlayGeometry, PixelRect};
