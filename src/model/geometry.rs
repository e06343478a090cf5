// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Overlay geometry in resolution-independent form.
//!
//! The overlay rectangle is stored as fractions of the render surface so it
//! survives surface resizes without distortion. Pixel rectangles are derived
//! on demand for a concrete surface size and never stored.
//!
//! Screen convention: Y grows downward, positive rotation is clockwise on
//! screen, and rotation is always about the overlay's own center.

use crate::settings;
use kurbo::{Point, Rect, Size, Vec2};

// ============================================================================
// CORNERS
// ============================================================================

/// A corner of the overlay rectangle, in hit-test enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft = 0,
    TopRight = 1,
    BottomRight = 2,
    BottomLeft = 3,
}

impl Corner {
    /// All corners in enumeration order (clockwise from top-left).
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The diagonally opposite corner (the resize anchor).
    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 2) % 4]
    }

    /// Unit direction of this corner away from the opposite corner, in the
    /// rectangle's unrotated frame.
    pub fn outward_signs(self) -> (f64, f64) {
        match self {
            Corner::TopLeft => (-1.0, -1.0),
            Corner::TopRight => (1.0, -1.0),
            Corner::BottomRight => (1.0, 1.0),
            Corner::BottomLeft => (-1.0, 1.0),
        }
    }
}

// ============================================================================
// OVERLAY GEOMETRY
// ============================================================================

/// The overlay placement, as fractions of the surface width/height.
///
/// This is the single source of truth for where the overlay sits. It is owned
/// by the application state; editing code takes a copy and hands back a new
/// value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayGeometry {
    /// Left edge as a fraction of surface width, in `[0, 1]`.
    pub x_pct: f64,
    /// Top edge as a fraction of surface height, in `[0, 1]`.
    pub y_pct: f64,
    /// Width as a fraction of surface width, in `(0, 1]`.
    pub w_pct: f64,
    /// Height as a fraction of surface height, in `(0, 1]`.
    pub h_pct: f64,
    /// Clockwise rotation about the overlay center, in `[0, 360)`.
    pub rotation_deg: f64,
}

impl Default for OverlayGeometry {
    fn default() -> Self {
        Self::new(
            settings::overlay::X_PCT,
            settings::overlay::Y_PCT,
            settings::overlay::W_PCT,
            settings::overlay::H_PCT,
            settings::overlay::ROTATION_DEG,
        )
    }
}

impl OverlayGeometry {
    pub fn new(x_pct: f64, y_pct: f64, w_pct: f64, h_pct: f64, rotation_deg: f64) -> Self {
        Self {
            x_pct,
            y_pct,
            w_pct,
            h_pct,
            rotation_deg: normalize_degrees(rotation_deg),
        }
    }

    /// Pixel rectangle for a surface of the given size.
    pub fn to_pixels(&self, surface: Size) -> PixelRect {
        to_pixels(self, surface)
    }

    // ====================================================================
    // CONTROL SURFACE SETTERS
    // ====================================================================
    // Each slider writes exactly one field. Only that field's own range is
    // enforced; there is no coupling between fields.

    pub fn set_x_pct(&mut self, value: f64) {
        self.x_pct = clamp_unit(value, 0.0);
    }

    pub fn set_y_pct(&mut self, value: f64) {
        self.y_pct = clamp_unit(value, 0.0);
    }

    pub fn set_w_pct(&mut self, value: f64) {
        self.w_pct = clamp_unit(value, settings::overlay::SLIDER_MIN_SIZE_PCT);
    }

    pub fn set_h_pct(&mut self, value: f64) {
        self.h_pct = clamp_unit(value, settings::overlay::SLIDER_MIN_SIZE_PCT);
    }

    pub fn set_rotation_deg(&mut self, value: f64) {
        self.rotation_deg = normalize_degrees(value);
    }

    /// Copy the height fraction into the width fraction, once.
    pub fn lock_aspect_ratio(&mut self) {
        self.w_pct = self.h_pct;
    }
}

/// Clamp a slider value into `[min, 1]`, mapping non-finite input to `min`.
fn clamp_unit(value: f64, min: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, 1.0)
    } else {
        min
    }
}

/// Normalize an angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Rotate a vector clockwise on screen (Y down) by `degrees`.
pub fn rotate_vec(v: Vec2, degrees: f64) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

// ============================================================================
// PIXEL RECT
// ============================================================================

/// An overlay rectangle in surface pixels.
///
/// `rect` is the unrotated rectangle; `rotation_deg` is carried through
/// unchanged by the percentage/pixel conversions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub rect: Rect,
    pub rotation_deg: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64, rotation_deg: f64) -> Self {
        Self {
            rect: Rect::new(x, y, x + w, y + h),
            rotation_deg,
        }
    }

    pub fn origin(&self) -> Point {
        self.rect.origin()
    }

    pub fn width(&self) -> f64 {
        self.rect.width()
    }

    pub fn height(&self) -> f64 {
        self.rect.height()
    }

    pub fn center(&self) -> Point {
        self.rect.center()
    }

    /// Corners after rotation, order TL, TR, BR, BL.
    pub fn corners(&self) -> [Point; 4] {
        corners(self)
    }

    pub fn corner(&self, corner: Corner) -> Point {
        self.corners()[corner.index()]
    }

    /// The rotate grab point, `offset` pixels above the top-center.
    pub fn rotate_handle_position(&self, offset: f64) -> Point {
        rotate_handle_position(self, offset)
    }

    /// Express a surface point in the rectangle's unrotated local frame,
    /// relative to its center.
    pub fn to_local(&self, point: Point) -> Vec2 {
        rotate_vec(point - self.center(), -self.rotation_deg)
    }

    /// Whether a surface point lies inside the rotated rectangle.
    pub fn contains(&self, point: Point) -> bool {
        let local = self.to_local(point);
        local.x.abs() <= self.width() / 2.0 && local.y.abs() <= self.height() / 2.0
    }

    pub fn to_percentage(&self, surface: Size) -> OverlayGeometry {
        to_percentage(self, surface)
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

/// Scale a percentage geometry to pixels. Callers guarantee a non-empty
/// surface.
pub fn to_pixels(geometry: &OverlayGeometry, surface: Size) -> PixelRect {
    PixelRect::new(
        geometry.x_pct * surface.width,
        geometry.y_pct * surface.height,
        geometry.w_pct * surface.width,
        geometry.h_pct * surface.height,
        geometry.rotation_deg,
    )
}

/// Inverse of [`to_pixels`].
pub fn to_percentage(pixels: &PixelRect, surface: Size) -> OverlayGeometry {
    OverlayGeometry::new(
        pixels.rect.x0 / surface.width,
        pixels.rect.y0 / surface.height,
        pixels.width() / surface.width,
        pixels.height() / surface.height,
        pixels.rotation_deg,
    )
}

/// The four corners of a pixel rect after rotating each corner offset about
/// the rect center.
pub fn corners(pixels: &PixelRect) -> [Point; 4] {
    let center = pixels.center();
    let half_w = pixels.width() / 2.0;
    let half_h = pixels.height() / 2.0;
    Corner::ALL.map(|corner| {
        let (sx, sy) = corner.outward_signs();
        center + rotate_vec(Vec2::new(sx * half_w, sy * half_h), pixels.rotation_deg)
    })
}

/// The rotate handle: a point `offset` above the top-center, rotated with
/// the rectangle.
pub fn rotate_handle_position(pixels: &PixelRect, offset: f64) -> Point {
    let local = Vec2::new(0.0, -(pixels.height() / 2.0 + offset));
    pixels.center() + rotate_vec(local, pixels.rotation_deg)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_point_eq(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6,
            "{a:?} != {b:?}"
        );
    }

    fn assert_geometry_eq(a: &OverlayGeometry, b: &OverlayGeometry) {
        assert!((a.x_pct - b.x_pct).abs() < EPS, "x: {a:?} vs {b:?}");
        assert!((a.y_pct - b.y_pct).abs() < EPS, "y: {a:?} vs {b:?}");
        assert!((a.w_pct - b.w_pct).abs() < EPS, "w: {a:?} vs {b:?}");
        assert!((a.h_pct - b.h_pct).abs() < EPS, "h: {a:?} vs {b:?}");
        assert!((a.rotation_deg - b.rotation_deg).abs() < EPS);
    }

    #[test]
    fn pixels_round_trip_across_surface_sizes() {
        let geometries = [
            OverlayGeometry::new(0.0, 0.0, 1.0, 1.0, 0.0),
            OverlayGeometry::new(0.2, 0.3, 0.25, 0.4, 45.0),
            OverlayGeometry::new(0.7, 0.05, 0.3, 0.01, 359.5),
        ];
        let surfaces = [
            Size::new(1.0, 1.0),
            Size::new(640.0, 480.0),
            Size::new(333.0, 1777.0),
            Size::new(4096.0, 17.0),
        ];
        for geometry in &geometries {
            for &surface in &surfaces {
                let back = to_percentage(&to_pixels(geometry, surface), surface);
                assert_geometry_eq(&back, geometry);
            }
        }
    }

    #[test]
    fn to_pixels_scales_linearly() {
        let g = OverlayGeometry::new(0.1, 0.2, 0.3, 0.4, 10.0);
        let px = g.to_pixels(Size::new(1000.0, 500.0));
        assert_point_eq(px.origin(), Point::new(100.0, 100.0));
        assert!((px.width() - 300.0).abs() < EPS);
        assert!((px.height() - 200.0).abs() < EPS);
        assert_eq!(px.rotation_deg, 10.0);
    }

    #[test]
    fn unrotated_corners_match_rect() {
        let px = PixelRect::new(100.0, 50.0, 200.0, 80.0, 0.0);
        let [tl, tr, br, bl] = px.corners();
        assert_point_eq(tl, Point::new(100.0, 50.0));
        assert_point_eq(tr, Point::new(300.0, 50.0));
        assert_point_eq(br, Point::new(300.0, 130.0));
        assert_point_eq(bl, Point::new(100.0, 130.0));
    }

    #[test]
    fn quarter_turn_moves_corners_clockwise() {
        // Square centered at (150, 150); a clockwise quarter turn on screen
        // moves the top-left corner to where the top-right was.
        let px = PixelRect::new(100.0, 100.0, 100.0, 100.0, 90.0);
        let [tl, tr, br, bl] = px.corners();
        assert_point_eq(tl, Point::new(200.0, 100.0));
        assert_point_eq(tr, Point::new(200.0, 200.0));
        assert_point_eq(br, Point::new(100.0, 200.0));
        assert_point_eq(bl, Point::new(100.0, 100.0));
    }

    #[test]
    fn rotate_handle_sits_above_top_center() {
        let px = PixelRect::new(100.0, 100.0, 100.0, 60.0, 0.0);
        assert_point_eq(px.rotate_handle_position(30.0), Point::new(150.0, 70.0));

        let flipped = PixelRect::new(100.0, 100.0, 100.0, 60.0, 180.0);
        assert_point_eq(
            flipped.rotate_handle_position(30.0),
            Point::new(150.0, 190.0),
        );
    }

    #[test]
    fn contains_respects_rotation() {
        // A long thin bar rotated 90 degrees becomes vertical.
        let px = PixelRect::new(0.0, 95.0, 200.0, 10.0, 90.0);
        assert!(px.contains(Point::new(100.0, 100.0)));
        assert!(px.contains(Point::new(100.0, 20.0)));
        assert!(!px.contains(Point::new(20.0, 100.0)));
    }

    #[test]
    fn normalize_wraps_into_range() {
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(-1e-20), 0.0);
        assert_eq!(normalize_degrees(f64::NAN), 0.0);
    }

    #[test]
    fn setters_touch_one_field_each() {
        let mut g = OverlayGeometry::new(0.2, 0.2, 0.3, 0.3, 0.0);
        g.set_x_pct(0.9);
        assert_eq!(g.x_pct, 0.9);
        assert_eq!(g.w_pct, 0.3);

        g.set_w_pct(5.0);
        assert_eq!(g.w_pct, 1.0);
        assert_eq!(g.x_pct, 0.9);

        g.set_h_pct(0.0);
        assert_eq!(g.h_pct, settings::overlay::SLIDER_MIN_SIZE_PCT);

        g.set_y_pct(-3.0);
        assert_eq!(g.y_pct, 0.0);

        g.set_rotation_deg(-90.0);
        assert_eq!(g.rotation_deg, 270.0);
    }

    #[test]
    fn lock_aspect_copies_height_into_width() {
        let mut g = OverlayGeometry::new(0.1, 0.1, 0.5, 0.2, 30.0);
        g.lock_aspect_ratio();
        assert_eq!(g.w_pct, 0.2);
        assert_eq!(g.h_pct, 0.2);
        assert_eq!(g.rotation_deg, 30.0);
    }

    #[test]
    fn corner_opposites() {
        assert_eq!(Corner::TopLeft.opposite(), Corner::BottomRight);
        assert_eq!(Corner::TopRight.opposite(), Corner::BottomLeft);
        assert_eq!(Corner::BottomRight.opposite(), Corner::TopLeft);
        assert_eq!(Corner::BottomLeft.opposite(), Corner::TopRight);
        assert_eq!(Corner::from_index(2), Some(Corner::BottomRight));
        assert_eq!(Corner::from_index(4), None);
    }
}
