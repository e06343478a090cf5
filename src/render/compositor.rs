// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! The one compositing routine shared by the editing surface and export.
//!
//! Both targets clear, stretch the background over the whole surface and
//! draw the overlay through the same transform. Only `Interactive` adds the
//! handle markers afterwards, so an export is the editing view minus chrome.

use super::handles;
use super::raster::RasterImage;
use crate::editing::HandleMetrics;
use crate::model::OverlayGeometry;
use kurbo::Size;
use tiny_skia::{FilterQuality, Pixmap, PixmapPaint, Transform};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    /// On-screen editing surface, with handles
    Interactive,
    /// Off-screen output, without handles
    Export,
}

/// Composite the background and overlay onto a fresh `width` x `height`
/// surface.
///
/// Returns `None` when either image is missing or the surface has no area;
/// there is nothing meaningful to draw in those cases.
pub fn render(
    background: Option<&RasterImage>,
    overlay: Option<&RasterImage>,
    geometry: &OverlayGeometry,
    surface: (u32, u32),
    metrics: &HandleMetrics,
    target: RenderTarget,
) -> Option<RasterImage> {
    let (background, overlay) = (background?, overlay?);
    let (width, height) = surface;
    let mut pixmap = Pixmap::new(width, height)?;

    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };

    let fill = Transform::from_scale(
        width as f32 / background.width() as f32,
        height as f32 / background.height() as f32,
    );
    pixmap.draw_pixmap(0, 0, background.pixmap().as_ref(), &paint, fill, None);

    let size = Size::new(f64::from(width), f64::from(height));
    let pixels = geometry.to_pixels(size);
    if pixels.width() > 0.0 && pixels.height() > 0.0 {
        pixmap.draw_pixmap(
            0,
            0,
            overlay.pixmap().as_ref(),
            &paint,
            overlay_transform(overlay, geometry, size),
            None,
        );
    }

    if target == RenderTarget::Interactive {
        handles::draw_handles(&mut pixmap, &pixels, metrics);
    }

    Some(RasterImage::from_pixmap(pixmap))
}

/// Maps overlay image pixels onto the surface: scale to the overlay's pixel
/// size, center on the origin, rotate, then move to the overlay center.
fn overlay_transform(overlay: &RasterImage, geometry: &OverlayGeometry, surface: Size) -> Transform {
    let pixels = geometry.to_pixels(surface);
    let center = pixels.center();
    let (w, h) = (pixels.width() as f32, pixels.height() as f32);

    Transform::from_translate(center.x as f32, center.y as f32)
        .pre_concat(Transform::from_rotate(geometry.rotation_deg as f32))
        .pre_concat(Transform::from_translate(-w / 2.0, -h / 2.0))
        .pre_concat(Transform::from_scale(
            w / overlay.width() as f32,
            h / overlay.height() as f32,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::handles::handle_positions;
    use crate::theme;
    use kurbo::Point;

    const RED: [u8; 4] = [220, 30, 30, 255];
    const BLUE: [u8; 4] = [20, 40, 200, 255];
    const SURFACE: (u32, u32) = (200, 100);

    fn solid(width: u32, height: u32, color: [u8; 4]) -> RasterImage {
        let data = color.repeat((width * height) as usize);
        RasterImage::from_rgba8(width, height, data).unwrap()
    }

    fn compose(geometry: &OverlayGeometry, target: RenderTarget) -> RasterImage {
        let background = solid(10, 5, RED);
        let overlay = solid(4, 4, BLUE);
        render(
            Some(&background),
            Some(&overlay),
            geometry,
            SURFACE,
            &HandleMetrics::default(),
            target,
        )
        .unwrap()
    }

    #[test]
    fn missing_images_or_surface_skip_rendering() {
        let image = solid(2, 2, RED);
        let g = OverlayGeometry::default();
        let m = HandleMetrics::default();
        assert!(render(None, Some(&image), &g, SURFACE, &m, RenderTarget::Export).is_none());
        assert!(render(Some(&image), None, &g, SURFACE, &m, RenderTarget::Export).is_none());
        assert!(render(Some(&image), Some(&image), &g, (0, 50), &m, RenderTarget::Export).is_none());
    }

    #[test]
    fn background_fills_the_surface() {
        // Overlay tucked away in the far corner.
        let g = OverlayGeometry::new(0.9, 0.9, 0.05, 0.05, 0.0);
        let out = compose(&g, RenderTarget::Export);
        assert_eq!((out.width(), out.height()), SURFACE);
        assert_eq!(out.pixel(0, 0), Some(RED));
        assert_eq!(out.pixel(120, 10), Some(RED));
        assert_eq!(out.pixel(10, 99), Some(RED));
    }

    #[test]
    fn overlay_lands_at_its_pixel_rect() {
        // x=50 y=25 w=100 h=50
        let g = OverlayGeometry::new(0.25, 0.25, 0.5, 0.5, 0.0);
        let out = compose(&g, RenderTarget::Export);
        assert_eq!(out.pixel(100, 50), Some(BLUE));
        assert_eq!(out.pixel(55, 30), Some(BLUE));
        assert_eq!(out.pixel(40, 50), Some(RED));
        assert_eq!(out.pixel(100, 15), Some(RED));
    }

    #[test]
    fn overlay_rotates_about_its_center() {
        // 100x10 bar centered on (100, 50).
        let flat = OverlayGeometry::new(0.25, 0.45, 0.5, 0.1, 0.0);
        let upright = OverlayGeometry::new(0.25, 0.45, 0.5, 0.1, 90.0);

        let out = compose(&flat, RenderTarget::Export);
        assert_eq!(out.pixel(60, 50), Some(BLUE));
        assert_eq!(out.pixel(100, 10), Some(RED));

        let out = compose(&upright, RenderTarget::Export);
        assert_eq!(out.pixel(60, 50), Some(RED));
        assert_eq!(out.pixel(100, 10), Some(BLUE));
        assert_eq!(out.pixel(100, 50), Some(BLUE));
    }

    #[test]
    fn interactive_draws_handles() {
        let g = OverlayGeometry::new(0.25, 0.3, 0.5, 0.5, 0.0);
        let interactive = compose(&g, RenderTarget::Interactive);
        let export = compose(&g, RenderTarget::Export);

        let white = theme::handles::RESIZE_FILL.to_rgba8();
        // Top-left corner sits at (50, 30).
        assert_eq!(interactive.pixel(50, 30), Some([white.r, white.g, white.b, 255]));
        assert_ne!(export.pixel(50, 30), interactive.pixel(50, 30));

        // Rotate handle 30px above the top-center (100, 30).
        let rotate = theme::handles::ROTATE_FILL.to_rgba8();
        assert_eq!(interactive.pixel(100, 0), Some([rotate.r, rotate.g, rotate.b, 255]));
        assert_eq!(export.pixel(100, 0), Some(RED));
    }

    #[test]
    fn export_matches_interactive_outside_handles() {
        let g = OverlayGeometry::new(0.2, 0.3, 0.45, 0.4, 33.0);
        let interactive = compose(&g, RenderTarget::Interactive);
        let export = compose(&g, RenderTarget::Export);

        let size = Size::new(f64::from(SURFACE.0), f64::from(SURFACE.1));
        let markers = handle_positions(&g.to_pixels(size), &HandleMetrics::default());
        let reach = theme::size::HANDLE_RADIUS + theme::size::HANDLE_OUTLINE_WIDTH + 1.0;

        let mut compared = 0;
        for y in 0..SURFACE.1 {
            for x in 0..SURFACE.0 {
                let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                if markers.iter().any(|(_, m)| m.distance(p) <= reach) {
                    continue;
                }
                assert_eq!(interactive.pixel(x, y), export.pixel(x, y), "pixel ({x}, {y})");
                compared += 1;
            }
        }
        assert!(compared > 15_000);
    }
}
