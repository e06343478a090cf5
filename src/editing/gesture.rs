// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer gesture state machine for moving, resizing and rotating the
//! overlay.
//!
//! The machine is either idle or dragging. Pointer-down runs the hit tester
//! and, on a hit, opens a [`DragSession`] holding the pointer start and a
//! snapshot of the geometry. Every pointer-move recomputes the geometry from
//! that snapshot, never from the previous frame, so rounding cannot
//! accumulate over a long drag. Pointer-up or cancel drops the session.

use super::hit_test::{HandleMetrics, HitTarget, hit_test};
use crate::model::geometry::{normalize_degrees, rotate_vec};
use crate::model::{Corner, OverlayGeometry, PixelRect};
use kurbo::{Point, Size, Vec2};

/// What the active drag does to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Move,
    Resize,
    Rotate,
}

/// A drag in progress. Created on pointer-down, dropped on pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub mode: DragMode,
    /// Surface position where the drag started
    pub pointer_start: Point,
    /// Geometry when the drag started; all deltas are taken against it
    pub snapshot: OverlayGeometry,
    /// The dragged corner, only for [`DragMode::Resize`]
    pub active_handle: Option<Corner>,
}

impl DragSession {
    fn from_hit(target: HitTarget, pointer_start: Point, snapshot: OverlayGeometry) -> Self {
        let (mode, active_handle) = match target {
            HitTarget::Corner(corner) => (DragMode::Resize, Some(corner)),
            HitTarget::RotateHandle => (DragMode::Rotate, None),
            HitTarget::Body => (DragMode::Move, None),
        };
        Self {
            mode,
            pointer_start,
            snapshot,
            active_handle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Single-pointer gesture state machine.
#[derive(Debug, Clone, Default)]
pub struct GestureMachine {
    state: GestureState,
    metrics: HandleMetrics,
}

impl GestureMachine {
    pub fn new(metrics: HandleMetrics) -> Self {
        Self {
            state: GestureState::Idle,
            metrics,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn metrics(&self) -> &HandleMetrics {
        &self.metrics
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            GestureState::Dragging(session) => Some(session),
            GestureState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    /// Start a drag if the pointer hits the overlay or one of its handles.
    ///
    /// Returns `true` when the event was consumed. A pointer-down while a
    /// drag is already active is ignored (only the first contact counts).
    pub fn pointer_down(&mut self, point: Point, geometry: &OverlayGeometry, surface: Size) -> bool {
        if self.is_dragging() {
            tracing::debug!("[GestureMachine] pointer down ignored, drag already active");
            return false;
        }

        let Some(target) = hit_test(point, geometry, surface, &self.metrics) else {
            return false;
        };

        let session = DragSession::from_hit(target, point, *geometry);
        tracing::debug!(
            "[GestureMachine] start {:?} at ({:.1}, {:.1}), handle={:?}",
            session.mode,
            point.x,
            point.y,
            session.active_handle
        );
        self.state = GestureState::Dragging(session);
        true
    }

    /// Recompute the geometry for the current pointer position.
    ///
    /// Returns `None` when idle or when the surface has not been measured.
    pub fn pointer_move(&mut self, point: Point, surface: Size) -> Option<OverlayGeometry> {
        let session = self.session()?;
        if surface.is_zero_area() {
            return None;
        }

        let geometry = match (session.mode, session.active_handle) {
            (DragMode::Move, _) => apply_move(session, point, surface),
            (DragMode::Resize, Some(corner)) => {
                apply_resize(session, corner, point, surface, self.metrics.min_size)
            }
            (DragMode::Resize, None) => return None,
            (DragMode::Rotate, _) => apply_rotate(session, point, surface),
        };
        Some(geometry)
    }

    /// End the drag, returning the finished session if there was one.
    pub fn pointer_up(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.state) {
            GestureState::Dragging(session) => {
                tracing::debug!("[GestureMachine] end {:?}", session.mode);
                Some(session)
            }
            GestureState::Idle => None,
        }
    }

    /// Abort the drag. The geometry keeps whatever the last move produced.
    pub fn pointer_cancel(&mut self) -> Option<DragSession> {
        self.pointer_up()
    }
}

// ============================================================================
// PER-MODE RECOMPUTATION
// ============================================================================

/// Translate the snapshot by the pointer delta, keeping the overlay inside
/// the surface.
pub fn apply_move(session: &DragSession, point: Point, surface: Size) -> OverlayGeometry {
    let snapshot = session.snapshot;
    let delta = point - session.pointer_start;

    let max_x = (1.0 - snapshot.w_pct).max(0.0);
    let max_y = (1.0 - snapshot.h_pct).max(0.0);

    OverlayGeometry {
        x_pct: (snapshot.x_pct + delta.x / surface.width).clamp(0.0, max_x),
        y_pct: (snapshot.y_pct + delta.y / surface.height).clamp(0.0, max_y),
        ..snapshot
    }
}

/// Resize from `corner`, keeping the diagonally opposite corner of the
/// snapshot fixed in surface space.
///
/// The pointer offset from the anchor is taken into the overlay's unrotated
/// frame; its magnitude gives the new size (floored at `min_size`, capped at
/// the surface) and its sign picks which side of the anchor the overlay
/// grows toward.
pub fn apply_resize(
    session: &DragSession,
    corner: Corner,
    point: Point,
    surface: Size,
    min_size: f64,
) -> OverlayGeometry {
    let snapshot = session.snapshot;
    let start_pixels = snapshot.to_pixels(surface);
    let rotation = start_pixels.rotation_deg;
    let anchor = start_pixels.corner(corner.opposite());

    let local = rotate_vec(point - anchor, -rotation);
    let width = clamp_extent(local.x.abs(), min_size, surface.width);
    let height = clamp_extent(local.y.abs(), min_size, surface.height);

    let (natural_x, natural_y) = corner.outward_signs();
    let sign_x = side_of(local.x, natural_x);
    let sign_y = side_of(local.y, natural_y);

    // New center sits half the signed extent away from the anchor, along the
    // overlay's own axes.
    let half = Vec2::new(sign_x * width / 2.0, sign_y * height / 2.0);
    let center = anchor + rotate_vec(half, rotation);

    let pixels = PixelRect::new(
        center.x - width / 2.0,
        center.y - height / 2.0,
        width,
        height,
        rotation,
    );
    pixels.to_percentage(surface)
}

/// Rotate about the snapshot center by the angle the pointer has swept.
pub fn apply_rotate(session: &DragSession, point: Point, surface: Size) -> OverlayGeometry {
    let snapshot = session.snapshot;
    let center = snapshot.to_pixels(surface).center();

    let start_angle = angle_deg(session.pointer_start - center);
    let current_angle = angle_deg(point - center);

    OverlayGeometry {
        rotation_deg: normalize_degrees(snapshot.rotation_deg + (current_angle - start_angle)),
        ..snapshot
    }
}

fn angle_deg(v: Vec2) -> f64 {
    v.y.atan2(v.x).to_degrees()
}

/// Floor at `min`, cap at `max`. The floor wins on surfaces smaller than it.
fn clamp_extent(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Sign of a local offset, falling back to the handle's own direction when
/// the pointer sits exactly on the anchor axis.
fn side_of(offset: f64, natural: f64) -> f64 {
    if offset > 0.0 {
        1.0
    } else if offset < 0.0 {
        -1.0
    } else {
        natural
    }
}
