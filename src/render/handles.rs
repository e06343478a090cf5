// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Handle markers drawn over the overlay while editing

use crate::editing::HandleMetrics;
use crate::model::PixelRect;
use crate::theme;
use kurbo::Point;
use masonry::vello::peniko::Color;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// The role a marker plays, which decides its colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    Resize,
    Rotate,
}

impl HandleKind {
    fn colors(self) -> (Color, Color) {
        match self {
            HandleKind::Resize => (theme::handles::RESIZE_FILL, theme::handles::RESIZE_OUTLINE),
            HandleKind::Rotate => (theme::handles::ROTATE_FILL, theme::handles::ROTATE_OUTLINE),
        }
    }
}

/// The five marker positions: four corners then the rotate handle.
pub fn handle_positions(pixels: &PixelRect, metrics: &HandleMetrics) -> [(HandleKind, Point); 5] {
    let [tl, tr, br, bl] = pixels.corners();
    [
        (HandleKind::Resize, tl),
        (HandleKind::Resize, tr),
        (HandleKind::Resize, br),
        (HandleKind::Resize, bl),
        (
            HandleKind::Rotate,
            pixels.rotate_handle_position(metrics.rotate_offset),
        ),
    ]
}

pub fn draw_handles(pixmap: &mut Pixmap, pixels: &PixelRect, metrics: &HandleMetrics) {
    for (kind, position) in handle_positions(pixels, metrics) {
        draw_marker(pixmap, position, kind);
    }
}

fn draw_marker(pixmap: &mut Pixmap, center: Point, kind: HandleKind) {
    let Some(path) = PathBuilder::from_circle(
        center.x as f32,
        center.y as f32,
        theme::size::HANDLE_RADIUS as f32,
    ) else {
        return;
    };
    let (fill, outline) = kind.colors();

    let mut paint = Paint {
        anti_alias: true,
        ..Paint::default()
    };
    paint.set_color(to_skia_color(fill));
    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);

    paint.set_color(to_skia_color(outline));
    let stroke = Stroke {
        width: theme::size::HANDLE_OUTLINE_WIDTH as f32,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

pub(crate) fn to_skia_color(color: Color) -> tiny_skia::Color {
    let rgba = color.to_rgba8();
    tiny_skia::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}
