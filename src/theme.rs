// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Theme colors and constants
//!
//! All colors use hexadecimal format: Color::from_rgb8(0xRR, 0xGG, 0xBB)

use masonry::vello::peniko::Color;

// ============================================================================
// BASE COLORS -- Generic colors for UI, a dark to light gradient by default
// ============================================================================
const BASE_A: Color = Color::from_rgb8(0x10, 0x10, 0x10);
const BASE_B: Color = Color::from_rgb8(0x20, 0x20, 0x20);
const BASE_C: Color = Color::from_rgb8(0x30, 0x30, 0x30);
const BASE_E: Color = Color::from_rgb8(0x50, 0x50, 0x50);
const BASE_F: Color = Color::from_rgb8(0x60, 0x60, 0x60);
const BASE_G: Color = Color::from_rgb8(0x70, 0x70, 0x70);
const BASE_I: Color = Color::from_rgb8(0x90, 0x90, 0x90);
const BASE_L: Color = Color::from_rgb8(0xc0, 0xc0, 0xc0);
const BASE_O: Color = Color::from_rgb8(0xf0, 0xf0, 0xf0);

// ============================================================================
// BRAND -- The overlay mark and accent color
// ============================================================================
const BRAND_DEEP: Color = Color::from_rgb8(0x08, 0x3a, 0xa8);
const BRAND_BRIGHT: Color = Color::from_rgb8(0x13, 0x66, 0xf2);
const BRAND_FACE: Color = Color::from_rgb8(0xf4, 0xf7, 0xff);

// ============================================================================
// GLOBAL BACKGROUNDS
// ============================================================================
const APP_BACKGROUND: Color = BASE_B;
const CANVAS_BACKGROUND: Color = BASE_A;

// ============================================================================
// UI TEXT AND LABELS
// ============================================================================
const PRIMARY_UI_TEXT: Color = BASE_L;
const SECONDARY_UI_TEXT: Color = BASE_G;
const ERROR_UI_TEXT: Color = Color::from_rgb8(0xff, 0x7a, 0x6e);

// ============================================================================
// UI PANELS (Controls sidebar, welcome card)
// ============================================================================
const PANEL_BACKGROUND: Color = BASE_C;
const PANEL_OUTLINE: Color = BASE_F;

// ============================================================================
// SLIDERS
// ============================================================================
const SLIDER_TRACK: Color = BASE_E;
const SLIDER_FILL: Color = BRAND_BRIGHT;
const SLIDER_THUMB: Color = BASE_O;
const SLIDER_THUMB_OUTLINE: Color = BRAND_DEEP;

// ============================================================================
// OVERLAY HANDLES -- Drawn on the interactive surface only
// ============================================================================
// Resize handles: light fill with a brand outline
const RESIZE_HANDLE_FILL: Color = Color::from_rgb8(0xff, 0xff, 0xff);
const RESIZE_HANDLE_OUTLINE: Color = BRAND_DEEP;
// Rotate handle: inverted so it reads as a different tool
const ROTATE_HANDLE_FILL: Color = BRAND_BRIGHT;
const ROTATE_HANDLE_OUTLINE: Color = Color::from_rgb8(0xff, 0xff, 0xff);

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Global application background color
pub mod app {
    use super::Color;
    pub const BACKGROUND: Color = super::APP_BACKGROUND;
}

/// Colors for the compositing canvas
pub mod canvas {
    use super::Color;
    /// Letterbox area around the surface
    pub const BACKGROUND: Color = super::CANVAS_BACKGROUND;
}

/// Colors for UI text
pub mod text {
    use super::Color;
    pub const PRIMARY: Color = super::PRIMARY_UI_TEXT;
    pub const SECONDARY: Color = super::SECONDARY_UI_TEXT;
    pub const ERROR: Color = super::ERROR_UI_TEXT;
}

/// Colors for UI panels
pub mod panel {
    use super::Color;
    pub const BACKGROUND: Color = super::PANEL_BACKGROUND;
    pub const OUTLINE: Color = super::PANEL_OUTLINE;
    pub const SECTION_TITLE: Color = super::BASE_I;
}

/// Colors for slider controls
pub mod slider {
    use super::Color;
    pub const TRACK: Color = super::SLIDER_TRACK;
    pub const FILL: Color = super::SLIDER_FILL;
    pub const THUMB: Color = super::SLIDER_THUMB;
    pub const THUMB_OUTLINE: Color = super::SLIDER_THUMB_OUTLINE;
}

/// Colors for the overlay handle markers
pub mod handles {
    use super::Color;
    pub const RESIZE_FILL: Color = super::RESIZE_HANDLE_FILL;
    pub const RESIZE_OUTLINE: Color = super::RESIZE_HANDLE_OUTLINE;
    pub const ROTATE_FILL: Color = super::ROTATE_HANDLE_FILL;
    pub const ROTATE_OUTLINE: Color = super::ROTATE_HANDLE_OUTLINE;
}

/// Colors of the built-in brand mark
pub mod brand {
    use super::Color;
    pub const DEEP: Color = super::BRAND_DEEP;
    pub const BRIGHT: Color = super::BRAND_BRIGHT;
    pub const FACE: Color = super::BRAND_FACE;
}

/// Sizes for rendering
pub mod size {
    // ===== Handle markers (surface pixels) =====
    /// Radius of the handle marker circles
    pub const HANDLE_RADIUS: f64 = 8.0;
    /// Outline width of the handle markers
    pub const HANDLE_OUTLINE_WIDTH: f64 = 2.0;

    // ===== Sliders =====
    /// Height of the slider hit area
    pub const SLIDER_HEIGHT: f64 = 24.0;
    /// Thickness of the slider track
    pub const SLIDER_TRACK_HEIGHT: f64 = 6.0;
    /// Radius of the slider thumb
    pub const SLIDER_THUMB_RADIUS: f64 = 8.0;

    // ===== UI Layout =====
    /// Margin around the canvas and sidebar
    pub const UI_PANEL_MARGIN: f64 = 16.0;
    /// Gap between controls inside a panel
    pub const UI_PANEL_GAP: f64 = 10.0;
    /// Width of the controls sidebar
    pub const SIDEBAR_WIDTH: f64 = 280.0;
    /// Border thickness for panels
    pub const PANEL_BORDER_WIDTH: f64 = 1.5;
    /// Rounded corner radius for all panels
    pub const PANEL_RADIUS: f64 = 11.0;
}
