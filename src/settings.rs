// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Application settings and configuration constants.
//!
//! This module holds non-visual settings that stay stable across theme
//! changes. Visual styling (colors, sizes) belongs in `theme.rs`. Values
//! here are the defaults; `config.rs` may override some of them at startup.

// ============================================================================
// HANDLE SETTINGS
// ============================================================================
/// Pointer distance (surface pixels) that still counts as a handle hit
const HANDLE_HIT_RADIUS: f64 = 18.0;

/// Distance (surface pixels) of the rotate handle above the top edge
///
/// Fixed in surface space, so on very small surfaces the handle sits close
/// to the overlay body. Tunable through the config file.
const ROTATE_HANDLE_OFFSET: f64 = 30.0;

/// Minimum overlay width/height (surface pixels) a resize can produce
///
/// Must stay above twice the hit radius so corner hit zones never overlap.
const MIN_OVERLAY_SIZE: f64 = 40.0;

// ============================================================================
// OVERLAY DEFAULTS
// ============================================================================
// Fractions of the surface size. Used on startup, on "Reset" and after the
// background is cleared.
const DEFAULT_X_PCT: f64 = 0.05;
const DEFAULT_Y_PCT: f64 = 0.05;
const DEFAULT_W_PCT: f64 = 0.25;
const DEFAULT_H_PCT: f64 = 0.25;
const DEFAULT_ROTATION_DEG: f64 = 0.0;

/// Smallest width/height fraction the size sliders allow
const SLIDER_MIN_SIZE_PCT: f64 = 0.02;

// ============================================================================
// ASSET SETTINGS
// ============================================================================
/// Edge length (pixels) of the built-in brand mark when no asset is configured
const BUILTIN_LOGO_SIZE: u32 = 512;

// ============================================================================
// EXPORT SETTINGS
// ============================================================================
/// Suggested file name in the export dialog
const EXPORT_FILE_NAME: &str = "overlay-composite.png";

/// Default config file looked up in the working directory
const CONFIG_FILE_NAME: &str = "overlay-studio.toml";

/// Environment variable that overrides the config file location
const CONFIG_ENV_VAR: &str = "OVERLAY_STUDIO_CONFIG";

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Handle hit-testing and resize limits
pub mod handles {
    /// Hit radius around corner and rotate handles (surface pixels)
    pub const HIT_RADIUS: f64 = super::HANDLE_HIT_RADIUS;

    /// Rotate handle distance above the top-center (surface pixels)
    pub const ROTATE_OFFSET: f64 = super::ROTATE_HANDLE_OFFSET;

    /// Resize floor for width and height (surface pixels)
    pub const MIN_SIZE: f64 = super::MIN_OVERLAY_SIZE;
}

/// Initial overlay placement
pub mod overlay {
    pub const X_PCT: f64 = super::DEFAULT_X_PCT;
    pub const Y_PCT: f64 = super::DEFAULT_Y_PCT;
    pub const W_PCT: f64 = super::DEFAULT_W_PCT;
    pub const H_PCT: f64 = super::DEFAULT_H_PCT;
    pub const ROTATION_DEG: f64 = super::DEFAULT_ROTATION_DEG;

    /// Lower bound of the width/height sliders
    pub const SLIDER_MIN_SIZE_PCT: f64 = super::SLIDER_MIN_SIZE_PCT;
}

/// Overlay asset settings
pub mod assets {
    /// Resolution of the built-in brand mark
    pub const BUILTIN_LOGO_SIZE: u32 = super::BUILTIN_LOGO_SIZE;
}

/// Export and config file names
pub mod files {
    pub const EXPORT_FILE_NAME: &str = super::EXPORT_FILE_NAME;
    pub const CONFIG_FILE_NAME: &str = super::CONFIG_FILE_NAME;
    pub const CONFIG_ENV_VAR: &str = super::CONFIG_ENV_VAR;
}
