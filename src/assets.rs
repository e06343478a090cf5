// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! The overlay graphic.
//!
//! Decoded once at startup and shared for the lifetime of the app. If no
//! asset file is configured, or it cannot be decoded, a built-in brand mark
//! is rasterized instead.

use crate::error::{Result, StudioError};
use crate::loader;
use crate::render::RasterImage;
use crate::render::handles::to_skia_color;
use crate::settings;
use crate::theme;
use std::path::Path;
use std::sync::Arc;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};

pub type OverlayAsset = Arc<RasterImage>;

/// Load the overlay from `path`, falling back to the built-in mark.
pub fn load_overlay(path: Option<&Path>) -> Result<OverlayAsset> {
    if let Some(path) = path {
        match loader::decode_file(path) {
            Ok(image) => {
                tracing::info!(
                    "Loaded overlay asset {} ({}x{})",
                    path.display(),
                    image.width(),
                    image.height()
                );
                return Ok(Arc::new(image));
            }
            Err(e) => {
                tracing::warn!(
                    "Overlay asset {} unusable ({}), using built-in mark",
                    path.display(),
                    e
                );
            }
        }
    }
    builtin_mark(settings::assets::BUILTIN_LOGO_SIZE).map(Arc::new)
}

/// Rasterize the brand mark: a rounded blue tile with two oval eyes.
pub fn builtin_mark(size: u32) -> Result<RasterImage> {
    let mut pixmap = Pixmap::new(size, size).ok_or(StudioError::Surface {
        width: size,
        height: size,
    })?;
    let s = size as f32;

    let mut paint = Paint {
        anti_alias: true,
        ..Paint::default()
    };

    let inset = s * 0.04;
    if let Some(tile) = rounded_rect(inset, inset, s - 2.0 * inset, s - 2.0 * inset, s * 0.18) {
        paint.set_color(to_skia_color(theme::brand::DEEP));
        pixmap.fill_path(&tile, &paint, FillRule::Winding, Transform::identity(), None);
    }
    let inner = s * 0.1;
    if let Some(face) = rounded_rect(inner, inner, s - 2.0 * inner, s - 2.0 * inner, s * 0.13) {
        paint.set_color(to_skia_color(theme::brand::BRIGHT));
        pixmap.fill_path(&face, &paint, FillRule::Winding, Transform::identity(), None);
    }

    let mut eyes = PathBuilder::new();
    for cx in [0.36, 0.64] {
        if let Some(oval) = Rect::from_xywh(s * cx - s * 0.06, s * 0.3, s * 0.12, s * 0.26) {
            eyes.push_oval(oval);
        }
    }
    if let Some(eyes) = eyes.finish() {
        paint.set_color(to_skia_color(theme::brand::FACE));
        pixmap.fill_path(&eyes, &paint, FillRule::Winding, Transform::identity(), None);
    }

    Ok(RasterImage::from_pixmap(pixmap))
}

fn rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32) -> Option<tiny_skia::Path> {
    let r = r.min(w / 2.0).min(h / 2.0);
    let (right, bottom) = (x + w, y + h);
    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.quad_to(right, y, right, y + r);
    pb.line_to(right, bottom - r);
    pb.quad_to(right, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.quad_to(x, bottom, x, bottom - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_mark_has_tile_eyes_and_clear_corners() {
        let mark = builtin_mark(100).unwrap();
        assert_eq!((mark.width(), mark.height()), (100, 100));

        // Rounded corners leave the extreme corner transparent.
        assert_eq!(mark.pixel(0, 0).map(|p| p[3]), Some(0));

        let bright = theme::brand::BRIGHT.to_rgba8();
        assert_eq!(mark.pixel(50, 80), Some([bright.r, bright.g, bright.b, 255]));

        let face = theme::brand::FACE.to_rgba8();
        assert_eq!(mark.pixel(36, 43), Some([face.r, face.g, face.b, 255]));
    }

    #[test]
    fn zero_size_mark_is_rejected() {
        assert!(builtin_mark(0).is_err());
    }

    #[test]
    fn no_path_uses_builtin() {
        let asset = load_overlay(None).unwrap();
        let size = settings::assets::BUILTIN_LOGO_SIZE;
        assert_eq!((asset.width(), asset.height()), (size, size));
    }

    #[test]
    fn broken_asset_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"not a png").unwrap();
        let asset = load_overlay(Some(&path)).unwrap();
        assert_eq!(asset.width(), settings::assets::BUILTIN_LOGO_SIZE);
    }

    #[test]
    fn configured_asset_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        let logo = RasterImage::from_rgba8(6, 3, [0, 0, 0, 255].repeat(18)).unwrap();
        logo.save_png(&path).unwrap();
        let asset = load_overlay(Some(&path)).unwrap();
        assert_eq!((asset.width(), asset.height()), (6, 3));
    }
}
