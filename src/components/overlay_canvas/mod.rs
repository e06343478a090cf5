// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Overlay canvas widget - the interactive compositing surface
//!
//! The surface keeps the background's aspect ratio and is centered inside
//! whatever space the layout gives the widget. Pointer positions are moved
//! into surface coordinates before they reach the gesture machine.

mod paint;
mod pointer;
mod view;

pub use view::overlay_canvas;

use crate::editing::{GestureMachine, HandleMetrics, HitTarget};
use crate::model::{Corner, OverlayGeometry};
use crate::render::RasterImage;
use kurbo::{Point, Rect, Size};
use masonry::accesskit::{Node, Role};
use masonry::core::{
    AccessCtx, BoxConstraints, ChildrenIds, CursorIcon, EventCtx, LayoutCtx, PaintCtx,
    PointerButton, PointerButtonEvent, PointerEvent, PointerId, PointerUpdate, PropertiesMut,
    PropertiesRef, QueryCtx, RegisterCtx, TextEvent, Update, UpdateCtx, Widget,
};
use masonry::vello::Scene;
use peniko::ImageData;
use std::sync::Arc;

/// Action emitted by the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasAction {
    /// A drag produced new geometry
    GeometryChanged(OverlayGeometry),
    /// The surface was laid out at a new pixel size
    SurfaceMeasured { width: u32, height: u32 },
}

/// The interactive compositing surface
pub struct OverlayCanvasWidget {
    pub(super) background: Option<Arc<RasterImage>>,
    pub(super) overlay: Option<Arc<RasterImage>>,

    /// Local copy of the app's geometry, updated live during drags
    pub(super) geometry: OverlayGeometry,

    pub(super) gesture: GestureMachine,

    /// The pointer that started the active drag; other contacts are ignored
    pub(super) active_pointer: Option<PointerId>,

    /// What the pointer is over while idle, for cursor feedback
    pub(super) hover: Option<HitTarget>,

    /// Surface area inside the widget, in widget coordinates
    pub(super) surface: Rect,

    /// Last surface size reported to the app
    pub(super) reported_surface: (u32, u32),

    /// Last interactive render, reused until something changes
    pub(super) cached_frame: Option<ImageData>,
}

impl OverlayCanvasWidget {
    pub fn new(
        background: Option<Arc<RasterImage>>,
        overlay: Option<Arc<RasterImage>>,
        geometry: OverlayGeometry,
        metrics: HandleMetrics,
    ) -> Self {
        Self {
            background,
            overlay,
            geometry,
            gesture: GestureMachine::new(metrics),
            active_pointer: None,
            hover: None,
            surface: Rect::ZERO,
            reported_surface: (0, 0),
            cached_frame: None,
        }
    }

    /// Surface size in whole pixels, as rendered.
    pub(super) fn surface_pixels(&self) -> (u32, u32) {
        (
            self.surface.width().round().max(0.0) as u32,
            self.surface.height().round().max(0.0) as u32,
        )
    }

    pub(super) fn surface_size(&self) -> Size {
        let (w, h) = self.surface_pixels();
        Size::new(f64::from(w), f64::from(h))
    }

    /// Widget-local point to surface point.
    pub(super) fn to_surface(&self, local: Point) -> Point {
        local - self.surface.origin().to_vec2()
    }

    /// Drop the cached frame so the next paint re-composites.
    pub(super) fn invalidate(&mut self) {
        self.cached_frame = None;
    }
}

/// Largest rect with the image's aspect ratio that fits in `available`,
/// centered, with whole-pixel dimensions.
pub fn fit_surface(available: Size, image: Size) -> Rect {
    if available.is_zero_area() || image.is_zero_area() {
        return Rect::ZERO;
    }
    let scale = (available.width / image.width).min(available.height / image.height);
    let size = Size::new(
        (image.width * scale).floor(),
        (image.height * scale).floor(),
    );
    let origin = Point::new(
        ((available.width - size.width) / 2.0).floor(),
        ((available.height - size.height) / 2.0).floor(),
    );
    Rect::from_origin_size(origin, size)
}

fn cursor_for(target: HitTarget) -> CursorIcon {
    match target {
        HitTarget::Corner(Corner::TopLeft | Corner::BottomRight) => CursorIcon::NwseResize,
        HitTarget::Corner(Corner::TopRight | Corner::BottomLeft) => CursorIcon::NeswResize,
        HitTarget::RotateHandle => CursorIcon::Crosshair,
        HitTarget::Body => CursorIcon::Grab,
    }
}

impl Widget for OverlayCanvasWidget {
    type Action = CanvasAction;

    fn register_children(&mut self, _ctx: &mut RegisterCtx<'_>) {
        // Leaf widget - no children
    }

    fn update(
        &mut self,
        _ctx: &mut UpdateCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        _event: &Update,
    ) {
    }

    fn layout(
        &mut self,
        ctx: &mut LayoutCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        bc: &BoxConstraints,
    ) -> Size {
        let size = bc.max();
        let image_size = self
            .background
            .as_ref()
            .map(|b| b.size())
            .unwrap_or(Size::ZERO);

        let surface = fit_surface(size, image_size);
        if surface != self.surface {
            self.surface = surface;
            self.invalidate();
        }

        let pixels = self.surface_pixels();
        if pixels != self.reported_surface && pixels.0 > 0 && pixels.1 > 0 {
            self.reported_surface = pixels;
            ctx.submit_action::<CanvasAction>(CanvasAction::SurfaceMeasured {
                width: pixels.0,
                height: pixels.1,
            });
        }

        size
    }

    fn paint(&mut self, ctx: &mut PaintCtx<'_>, _props: &PropertiesRef<'_>, scene: &mut Scene) {
        self.paint_canvas(scene, ctx.size());
    }

    fn on_pointer_event(
        &mut self,
        ctx: &mut EventCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        event: &PointerEvent,
    ) {
        match event {
            PointerEvent::Down(PointerButtonEvent {
                button: Some(PointerButton::Primary),
                pointer,
                state,
            }) => {
                self.handle_pointer_down(ctx, pointer.pointer_id, state);
            }

            PointerEvent::Move(PointerUpdate {
                pointer, current, ..
            }) => {
                self.handle_pointer_move(ctx, pointer.pointer_id, current);
            }

            PointerEvent::Up(PointerButtonEvent {
                button: Some(PointerButton::Primary),
                pointer,
                ..
            }) => {
                self.handle_pointer_up(ctx, pointer.pointer_id);
            }

            PointerEvent::Cancel(pointer) => {
                self.handle_pointer_cancel(ctx, pointer.pointer_id);
            }

            PointerEvent::Leave(_) => {
                self.leave();
            }

            _ => {}
        }
    }

    fn on_text_event(
        &mut self,
        _ctx: &mut EventCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        _event: &TextEvent,
    ) {
    }

    fn get_cursor(&self, _ctx: &QueryCtx<'_>, _pos: Point) -> CursorIcon {
        if self.gesture.is_dragging() {
            return CursorIcon::Grabbing;
        }
        self.hover.map(cursor_for).unwrap_or(CursorIcon::Default)
    }

    fn accessibility_role(&self) -> Role {
        Role::Canvas
    }

    fn accessibility(
        &mut self,
        _ctx: &mut AccessCtx<'_>,
        _props: &PropertiesRef<'_>,
        node: &mut Node,
    ) {
        let g = &self.geometry;
        node.set_label(format!(
            "Overlay at {:.0}%, {:.0}%, {:.0}% x {:.0}%, rotated {:.0} degrees",
            g.x_pct * 100.0,
            g.y_pct * 100.0,
            g.w_pct * 100.0,
            g.h_pct * 100.0,
            g.rotation_deg
        ));
    }

    fn children_ids(&self) -> ChildrenIds {
        ChildrenIds::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_image_is_letterboxed() {
        let rect = fit_surface(Size::new(800.0, 600.0), Size::new(1600.0, 800.0));
        assert_eq!(rect, Rect::new(0.0, 100.0, 800.0, 500.0));
    }

    #[test]
    fn tall_image_is_pillarboxed() {
        let rect = fit_surface(Size::new(800.0, 600.0), Size::new(300.0, 600.0));
        assert_eq!(rect, Rect::new(250.0, 0.0, 550.0, 600.0));
    }

    #[test]
    fn nothing_to_fit() {
        assert_eq!(fit_surface(Size::ZERO, Size::new(10.0, 10.0)), Rect::ZERO);
        assert_eq!(fit_surface(Size::new(10.0, 10.0), Size::ZERO), Rect::ZERO);
    }

    #[test]
    fn pointer_is_mapped_into_surface_space() {
        let mut widget =
            OverlayCanvasWidget::new(None, None, OverlayGeometry::default(), HandleMetrics::default());
        widget.surface = Rect::new(250.0, 10.0, 550.0, 610.0);
        assert_eq!(widget.to_surface(Point::new(260.0, 20.0)), Point::new(10.0, 10.0));
        assert_eq!(widget.surface_pixels(), (300, 600));
    }

    #[test]
    fn cursor_tracks_hover_and_drag() {
        assert_eq!(cursor_for(HitTarget::Body), CursorIcon::Grab);
        assert_eq!(
            cursor_for(HitTarget::Corner(Corner::TopRight)),
            CursorIcon::NeswResize
        );
        assert_eq!(cursor_for(HitTarget::RotateHandle), CursorIcon::Crosshair);
    }
}
