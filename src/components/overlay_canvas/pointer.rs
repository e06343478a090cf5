// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer event handlers for OverlayCanvasWidget
//!
//! Each handler is split in two: a method that updates the widget's own
//! state and reports a [`PointerOutcome`], and a thin wrapper that turns the
//! outcome into capture, render and action requests on the [`EventCtx`].

use super::{CanvasAction, OverlayCanvasWidget};
use crate::editing::hit_test;
use crate::model::OverlayGeometry;
use kurbo::Point;
use masonry::core::{EventCtx, PointerId, PointerState};

/// What a pointer event did to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum PointerOutcome {
    /// Not for us: no background, a miss, or a pointer other than the one
    /// that started the drag
    Ignored,
    /// Part of the active drag, nothing new to show
    Consumed,
    /// The drag produced new geometry
    Changed(OverlayGeometry),
}

impl OverlayCanvasWidget {
    fn has_images(&self) -> bool {
        self.overlay.is_some() && self.background.is_some()
    }

    fn owns(&self, pointer: Option<PointerId>) -> bool {
        self.gesture.is_dragging() && self.active_pointer == pointer
    }

    /// Start a gesture if `local` lands on the overlay or a handle.
    pub(super) fn press(&mut self, local: Point, pointer: Option<PointerId>) -> PointerOutcome {
        if !self.has_images() {
            return PointerOutcome::Ignored;
        }
        let point = self.to_surface(local);
        let surface = self.surface_size();

        if !self.gesture.pointer_down(point, &self.geometry, surface) {
            return PointerOutcome::Ignored;
        }

        if let Some(session) = self.gesture.session() {
            tracing::debug!("Drag started: {:?} at {:?}", session.mode, point);
        }
        self.active_pointer = pointer;
        self.hover = None;
        PointerOutcome::Consumed
    }

    /// Continue the drag owned by `pointer`, or track hover while idle.
    pub(super) fn drag(&mut self, local: Point, pointer: Option<PointerId>) -> PointerOutcome {
        let point = self.to_surface(local);
        let surface = self.surface_size();

        if !self.gesture.is_dragging() {
            self.hover = if self.has_images() {
                hit_test(point, &self.geometry, surface, self.gesture.metrics())
            } else {
                None
            };
            return PointerOutcome::Ignored;
        }
        if !self.owns(pointer) {
            return PointerOutcome::Ignored;
        }

        match self.gesture.pointer_move(point, surface) {
            Some(geometry) if geometry != self.geometry => {
                self.geometry = geometry;
                self.invalidate();
                PointerOutcome::Changed(geometry)
            }
            _ => PointerOutcome::Consumed,
        }
    }

    /// End the drag if `pointer` owns it.
    pub(super) fn release(&mut self, pointer: Option<PointerId>) -> PointerOutcome {
        if !self.owns(pointer) {
            return PointerOutcome::Ignored;
        }
        self.active_pointer = None;
        match self.gesture.pointer_up() {
            Some(session) => {
                tracing::debug!("Drag finished: {:?}", session.mode);
                PointerOutcome::Consumed
            }
            None => PointerOutcome::Ignored,
        }
    }

    /// Abandon the drag if `pointer` owns it. The geometry reached so far
    /// is kept.
    pub(super) fn cancel(&mut self, pointer: Option<PointerId>) -> PointerOutcome {
        if !self.owns(pointer) {
            return PointerOutcome::Ignored;
        }
        self.active_pointer = None;
        match self.gesture.pointer_cancel() {
            Some(_) => {
                tracing::debug!("Drag cancelled");
                PointerOutcome::Consumed
            }
            None => PointerOutcome::Ignored,
        }
    }

    /// The pointer left the widget; forget what it was hovering.
    pub(super) fn leave(&mut self) {
        if !self.gesture.is_dragging() {
            self.hover = None;
        }
    }

    /// Misses are left unhandled and the pointer is not captured, so clicks
    /// elsewhere on the canvas behave as if the overlay were not there.
    pub(super) fn handle_pointer_down(
        &mut self,
        ctx: &mut EventCtx<'_>,
        pointer: Option<PointerId>,
        state: &PointerState,
    ) {
        let local = ctx.local_position(state.position);
        if self.press(local, pointer) == PointerOutcome::Consumed {
            ctx.capture_pointer();
            ctx.set_handled();
            ctx.request_render();
        }
    }

    pub(super) fn handle_pointer_move(
        &mut self,
        ctx: &mut EventCtx<'_>,
        pointer: Option<PointerId>,
        current: &PointerState,
    ) {
        let local = ctx.local_position(current.position);
        match self.drag(local, pointer) {
            PointerOutcome::Changed(geometry) => {
                ctx.request_render();
                ctx.submit_action::<CanvasAction>(CanvasAction::GeometryChanged(geometry));
                ctx.set_handled();
            }
            PointerOutcome::Consumed => ctx.set_handled(),
            PointerOutcome::Ignored => {}
        }
    }

    pub(super) fn handle_pointer_up(&mut self, ctx: &mut EventCtx<'_>, pointer: Option<PointerId>) {
        if self.release(pointer) == PointerOutcome::Consumed {
            ctx.release_pointer();
            ctx.set_handled();
            ctx.request_render();
        }
    }

    pub(super) fn handle_pointer_cancel(
        &mut self,
        ctx: &mut EventCtx<'_>,
        pointer: Option<PointerId>,
    ) {
        if self.cancel(pointer) == PointerOutcome::Consumed {
            ctx.release_pointer();
            ctx.request_render();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{DragMode, HandleMetrics, HitTarget};
    use crate::render::RasterImage;
    use kurbo::Rect;
    use std::sync::Arc;

    fn image(width: u32, height: u32) -> Arc<RasterImage> {
        let pixels = [200, 40, 40, 255].repeat((width * height) as usize);
        Arc::new(RasterImage::from_rgba8(width, height, pixels).unwrap())
    }

    /// A 400x200 surface letterboxed 100px down inside its widget, with the
    /// overlay at (100, 50) 100x50.
    fn canvas() -> OverlayCanvasWidget {
        let geometry = OverlayGeometry {
            x_pct: 0.25,
            y_pct: 0.25,
            w_pct: 0.25,
            h_pct: 0.25,
            rotation_deg: 0.0,
        };
        let mut widget = OverlayCanvasWidget::new(
            Some(image(400, 200)),
            Some(image(10, 10)),
            geometry,
            HandleMetrics::default(),
        );
        widget.surface = Rect::new(0.0, 100.0, 400.0, 300.0);
        widget
    }

    fn finger(n: u64) -> Option<PointerId> {
        PointerId::new(n)
    }

    #[test]
    fn press_is_mapped_through_the_letterbox() {
        let mut widget = canvas();
        // Body centre in surface space is (150, 75); in widget space (150, 175).
        assert_eq!(widget.press(Point::new(150.0, 175.0), finger(1)), PointerOutcome::Consumed);
        assert_eq!(widget.gesture.session().map(|s| s.mode), Some(DragMode::Move));

        // The same point without the offset is above the overlay.
        let mut widget = canvas();
        assert_eq!(widget.press(Point::new(150.0, 75.0), finger(1)), PointerOutcome::Ignored);
        assert!(!widget.gesture.is_dragging());
    }

    #[test]
    fn press_without_background_is_ignored() {
        let mut widget = canvas();
        widget.background = None;
        assert_eq!(widget.press(Point::new(150.0, 175.0), finger(1)), PointerOutcome::Ignored);
        assert!(!widget.gesture.is_dragging());
        assert_eq!(widget.drag(Point::new(150.0, 175.0), finger(1)), PointerOutcome::Ignored);
        assert_eq!(widget.hover, None);
    }

    #[test]
    fn miss_is_not_consumed() {
        let mut widget = canvas();
        assert_eq!(widget.press(Point::new(380.0, 290.0), finger(1)), PointerOutcome::Ignored);
        assert_eq!(widget.active_pointer, None);
    }

    #[test]
    fn drag_reports_only_real_changes() {
        let mut widget = canvas();
        widget.press(Point::new(150.0, 175.0), finger(1));

        // No movement yet.
        assert_eq!(widget.drag(Point::new(150.0, 175.0), finger(1)), PointerOutcome::Consumed);

        let PointerOutcome::Changed(g) = widget.drag(Point::new(190.0, 175.0), finger(1)) else {
            panic!("expected a geometry change");
        };
        assert!((g.x_pct - 0.35).abs() < 1e-9);
        assert_eq!(widget.geometry, g);
        assert!(widget.cached_frame.is_none());

        // Repeating the same position changes nothing.
        assert_eq!(widget.drag(Point::new(190.0, 175.0), finger(1)), PointerOutcome::Consumed);
    }

    #[test]
    fn second_finger_cannot_steer_or_end_the_drag() {
        let mut widget = canvas();
        widget.press(Point::new(150.0, 175.0), finger(1));
        let before = widget.geometry;

        assert_eq!(widget.press(Point::new(120.0, 160.0), finger(2)), PointerOutcome::Ignored);
        assert_eq!(widget.drag(Point::new(300.0, 250.0), finger(2)), PointerOutcome::Ignored);
        assert_eq!(widget.geometry, before);
        assert_eq!(widget.release(finger(2)), PointerOutcome::Ignored);
        assert_eq!(widget.cancel(finger(2)), PointerOutcome::Ignored);
        assert!(widget.gesture.is_dragging());

        assert!(matches!(
            widget.drag(Point::new(170.0, 175.0), finger(1)),
            PointerOutcome::Changed(_)
        ));
        assert_eq!(widget.release(finger(1)), PointerOutcome::Consumed);
        assert!(!widget.gesture.is_dragging());
        assert_eq!(widget.active_pointer, None);
    }

    #[test]
    fn cancel_keeps_geometry_and_frees_the_pointer() {
        let mut widget = canvas();
        widget.press(Point::new(150.0, 175.0), finger(1));
        let PointerOutcome::Changed(g) = widget.drag(Point::new(170.0, 175.0), finger(1)) else {
            panic!("expected a geometry change");
        };
        assert_eq!(widget.cancel(finger(1)), PointerOutcome::Consumed);
        assert_eq!(widget.geometry, g);
        assert_eq!(widget.active_pointer, None);
        assert_eq!(widget.release(finger(1)), PointerOutcome::Ignored);
    }

    #[test]
    fn hover_follows_the_pointer_and_clears_on_leave() {
        let mut widget = canvas();
        widget.drag(Point::new(150.0, 175.0), finger(1));
        assert_eq!(widget.hover, Some(HitTarget::Body));
        widget.drag(Point::new(5.0, 105.0), finger(1));
        assert_eq!(widget.hover, None);

        widget.drag(Point::new(150.0, 175.0), finger(1));
        widget.leave();
        assert_eq!(widget.hover, None);
    }
}
