// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Hit testing for the overlay and its handles
//!
//! Handles are always tested before the body, so a handle wins even where
//! its hit circle overlaps the overlay.

use crate::model::{Corner, OverlayGeometry};
use crate::settings;
use kurbo::{Point, Size};

/// Handle sizes and resize limits, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleMetrics {
    /// Pointer distance that still counts as a handle hit
    pub hit_radius: f64,
    /// Rotate handle distance above the top-center
    pub rotate_offset: f64,
    /// Minimum width/height a resize can produce
    pub min_size: f64,
}

impl Default for HandleMetrics {
    fn default() -> Self {
        Self {
            hit_radius: settings::handles::HIT_RADIUS,
            rotate_offset: settings::handles::ROTATE_OFFSET,
            min_size: settings::handles::MIN_SIZE,
        }
    }
}

/// What a pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A resize handle at one of the corners
    Corner(Corner),
    /// The rotate handle above the top edge
    RotateHandle,
    /// Inside the overlay body
    Body,
}

/// Hit test a surface point against the overlay.
///
/// Corners are checked first in TL, TR, BR, BL order (first match wins),
/// then the rotate handle, then body containment in the overlay's
/// unrotated frame. Returns `None` for a miss or an unmeasured surface.
pub fn hit_test(
    point: Point,
    geometry: &OverlayGeometry,
    surface: Size,
    metrics: &HandleMetrics,
) -> Option<HitTarget> {
    if surface.is_zero_area() {
        return None;
    }

    let pixels = geometry.to_pixels(surface);

    let corners = pixels.corners();
    for (corner, pos) in Corner::ALL.iter().zip(corners.iter()) {
        if point.distance(*pos) < metrics.hit_radius {
            return Some(HitTarget::Corner(*corner));
        }
    }

    let rotate = pixels.rotate_handle_position(metrics.rotate_offset);
    if point.distance(rotate) < metrics.hit_radius {
        return Some(HitTarget::RotateHandle);
    }

    if pixels.contains(point) {
        return Some(HitTarget::Body);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURFACE: Size = Size::new(1000.0, 1000.0);

    /// Overlay at pixel (100, 100) with size 200x100.
    fn geometry(rotation_deg: f64) -> OverlayGeometry {
        OverlayGeometry::new(0.1, 0.1, 0.2, 0.1, rotation_deg)
    }

    fn hit(point: Point, g: &OverlayGeometry) -> Option<HitTarget> {
        hit_test(point, g, SURFACE, &HandleMetrics::default())
    }

    #[test]
    fn body_center_is_body() {
        assert_eq!(hit(Point::new(200.0, 150.0), &geometry(0.0)), Some(HitTarget::Body));
    }

    #[test]
    fn far_point_misses() {
        assert_eq!(hit(Point::new(800.0, 800.0), &geometry(0.0)), None);
    }

    #[test]
    fn each_corner_is_detected() {
        let g = geometry(0.0);
        assert_eq!(
            hit(Point::new(101.0, 102.0), &g),
            Some(HitTarget::Corner(Corner::TopLeft))
        );
        assert_eq!(
            hit(Point::new(305.0, 98.0), &g),
            Some(HitTarget::Corner(Corner::TopRight))
        );
        assert_eq!(
            hit(Point::new(295.0, 195.0), &g),
            Some(HitTarget::Corner(Corner::BottomRight))
        );
        assert_eq!(
            hit(Point::new(90.0, 205.0), &g),
            Some(HitTarget::Corner(Corner::BottomLeft))
        );
    }

    #[test]
    fn handle_beats_body_where_they_overlap() {
        // Inside the body and within the hit radius of the bottom-right corner.
        let point = Point::new(290.0, 190.0);
        let g = geometry(0.0);
        assert!(g.to_pixels(SURFACE).contains(point));
        assert_eq!(hit(point, &g), Some(HitTarget::Corner(Corner::BottomRight)));
    }

    #[test]
    fn rotate_handle_is_detected() {
        // Top-center is (200, 100); the handle is 30px above it.
        assert_eq!(
            hit(Point::new(200.0, 72.0), &geometry(0.0)),
            Some(HitTarget::RotateHandle)
        );
    }

    #[test]
    fn rotate_handle_beats_body_when_offset_is_small() {
        let metrics = HandleMetrics {
            rotate_offset: 4.0,
            ..HandleMetrics::default()
        };
        // 4px below the top edge: inside the body, 8px from the handle.
        let point = Point::new(200.0, 104.0);
        assert_eq!(
            hit_test(point, &geometry(0.0), SURFACE, &metrics),
            Some(HitTarget::RotateHandle)
        );
    }

    #[test]
    fn rotate_handle_follows_rotation() {
        // Rotated 90 degrees clockwise the handle sits right of the center.
        // Center (200, 150), half height 50, offset 30.
        assert_eq!(
            hit(Point::new(280.0, 150.0), &geometry(90.0)),
            Some(HitTarget::RotateHandle)
        );
        assert_eq!(hit(Point::new(200.0, 30.0), &geometry(90.0)), None);
    }

    #[test]
    fn body_uses_rotated_frame() {
        // At 90 degrees the 200x100 overlay becomes 100 wide and 200 tall
        // around (200, 150).
        let g = geometry(90.0);
        assert_eq!(hit(Point::new(200.0, 230.0), &g), Some(HitTarget::Body));
        assert_eq!(hit(Point::new(120.0, 150.0), &g), None);
    }

    #[test]
    fn first_corner_wins_when_hit_zones_overlap() {
        // 20px wide: TL and TR hit zones overlap around the top-center.
        let g = OverlayGeometry::new(0.1, 0.1, 0.02, 0.1, 0.0);
        assert_eq!(
            hit(Point::new(110.0, 100.0), &g),
            Some(HitTarget::Corner(Corner::TopLeft))
        );
    }

    #[test]
    fn unmeasured_surface_never_hits() {
        assert_eq!(
            hit_test(
                Point::new(0.0, 0.0),
                &geometry(0.0),
                Size::ZERO,
                &HandleMetrics::default()
            ),
            None
        );
    }
}
