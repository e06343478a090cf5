// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Optional runtime configuration read from `overlay-studio.toml`.
//!
//! The file is looked up in the working directory unless
//! `OVERLAY_STUDIO_CONFIG` names another path. Every key is optional and
//! falls back to the defaults in `settings.rs`.
//!
//! ```toml
//! overlay_asset = "brand/logo.png"
//! export_file_name = "composite.png"
//!
//! [overlay]
//! x_pct = 0.1
//! w_pct = 0.3
//!
//! [handles]
//! rotate_offset = 24.0
//! ```

use crate::editing::HandleMetrics;
use crate::error::{Result, StudioError};
use crate::model::OverlayGeometry;
use crate::settings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overlay image file; relative paths resolve against the config file
    pub overlay_asset: Option<PathBuf>,
    /// Suggested name in the export dialog
    pub export_file_name: String,
    pub overlay: OverlayConfig,
    pub handles: HandleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            overlay_asset: None,
            export_file_name: settings::files::EXPORT_FILE_NAME.to_string(),
            overlay: OverlayConfig::default(),
            handles: HandleConfig::default(),
        }
    }
}

/// Initial overlay placement, as surface fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub x_pct: f64,
    pub y_pct: f64,
    pub w_pct: f64,
    pub h_pct: f64,
    pub rotation_deg: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        let g = OverlayGeometry::default();
        Self {
            x_pct: g.x_pct,
            y_pct: g.y_pct,
            w_pct: g.w_pct,
            h_pct: g.h_pct,
            rotation_deg: g.rotation_deg,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleConfig {
    pub hit_radius: f64,
    pub rotate_offset: f64,
    pub min_size: f64,
}

impl Default for HandleConfig {
    fn default() -> Self {
        let m = HandleMetrics::default();
        Self {
            hit_radius: m.hit_radius,
            rotate_offset: m.rotate_offset,
            min_size: m.min_size,
        }
    }
}

impl Config {
    /// The overlay placement used at startup and on reset, with each field
    /// clamped the same way the sliders clamp it.
    pub fn initial_geometry(&self) -> OverlayGeometry {
        let o = &self.overlay;
        let mut geometry = OverlayGeometry::default();
        geometry.set_x_pct(o.x_pct);
        geometry.set_y_pct(o.y_pct);
        geometry.set_w_pct(o.w_pct);
        geometry.set_h_pct(o.h_pct);
        geometry.set_rotation_deg(o.rotation_deg);
        geometry
    }

    /// Handle metrics, ignoring non-positive values and raising the minimum
    /// size to at least twice the hit radius.
    pub fn handle_metrics(&self) -> HandleMetrics {
        let defaults = HandleMetrics::default();
        let pick = |value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        let hit_radius = pick(self.handles.hit_radius, defaults.hit_radius);
        let mut min_size = pick(self.handles.min_size, defaults.min_size);
        // Corner hit zones must not overlap at the minimum size.
        if min_size < 2.0 * hit_radius {
            tracing::warn!(
                "handles.min_size {} is below twice the hit radius, using {}",
                min_size,
                2.0 * hit_radius
            );
            min_size = 2.0 * hit_radius;
        }
        HandleMetrics {
            hit_radius,
            rotate_offset: pick(self.handles.rotate_offset, defaults.rotate_offset),
            min_size,
        }
    }
}

fn default_config_path() -> PathBuf {
    std::env::var_os(settings::files::CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(settings::files::CONFIG_FILE_NAME))
}

/// Load the config, falling back to defaults when the file is absent or
/// unreadable.
pub fn load() -> Config {
    let path = default_config_path();
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Config::default();
    }
    match load_from_path(&path) {
        Ok(config) => {
            tracing::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!("{}; using defaults", e);
            Config::default()
        }
    }
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|source| StudioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: Config = toml::from_str(&content).map_err(|source| StudioError::Config {
        path: path.to_path_buf(),
        source,
    })?;

    if let (Some(asset), Some(dir)) = (&config.overlay_asset, path.parent())
        && asset.is_relative()
    {
        config.overlay_asset = Some(dir.join(asset));
    }
    Ok(config)
}
