// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Xilem View wrapper for OverlayCanvasWidget

use super::{CanvasAction, OverlayCanvasWidget};
use crate::editing::{GestureMachine, HandleMetrics};
use crate::model::OverlayGeometry;
use crate::render::RasterImage;
use std::marker::PhantomData;
use std::sync::Arc;
use xilem::core::{MessageContext, MessageResult, Mut, View, ViewMarker};
use xilem::{Pod, ViewCtx};

/// Create the overlay canvas
///
/// The callback receives every [`CanvasAction`]: new geometry while the
/// overlay is dragged, and the measured surface size after layout.
pub fn overlay_canvas<State, F>(
    background: Option<Arc<RasterImage>>,
    overlay: Option<Arc<RasterImage>>,
    geometry: OverlayGeometry,
    metrics: HandleMetrics,
    on_action: F,
) -> OverlayCanvasView<State, F>
where
    F: Fn(&mut State, CanvasAction),
{
    OverlayCanvasView {
        background,
        overlay,
        geometry,
        metrics,
        on_action,
        phantom: PhantomData,
    }
}

/// The Xilem View for OverlayCanvasWidget
#[must_use = "View values do nothing unless provided to Xilem."]
pub struct OverlayCanvasView<State, F> {
    background: Option<Arc<RasterImage>>,
    overlay: Option<Arc<RasterImage>>,
    geometry: OverlayGeometry,
    metrics: HandleMetrics,
    on_action: F,
    phantom: PhantomData<fn() -> State>,
}

impl<State, F> ViewMarker for OverlayCanvasView<State, F> {}

fn same_image(a: &Option<Arc<RasterImage>>, b: &Option<Arc<RasterImage>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

impl<State: 'static, F: Fn(&mut State, CanvasAction) + 'static> View<State, (), ViewCtx>
    for OverlayCanvasView<State, F>
{
    type Element = Pod<OverlayCanvasWidget>;
    type ViewState = ();

    fn build(&self, ctx: &mut ViewCtx, _app_state: &mut State) -> (Self::Element, Self::ViewState) {
        let widget = OverlayCanvasWidget::new(
            self.background.clone(),
            self.overlay.clone(),
            self.geometry,
            self.metrics,
        );
        let pod = ctx.create_pod(widget);
        ctx.record_action(pod.new_widget.id());
        (pod, ())
    }

    fn rebuild(
        &self,
        prev: &Self,
        _view_state: &mut Self::ViewState,
        _ctx: &mut ViewCtx,
        mut element: Mut<'_, Self::Element>,
        _app_state: &mut State,
    ) {
        let mut widget = element.downcast::<OverlayCanvasWidget>();

        if !same_image(&self.background, &prev.background) {
            tracing::debug!("[OverlayCanvasView::rebuild] Background changed");
            widget.widget.background = self.background.clone();
            widget.widget.invalidate();
            widget.widget.hover = None;
            // Surface aspect ratio may have changed.
            widget.ctx.request_layout();
        }

        if !same_image(&self.overlay, &prev.overlay) {
            widget.widget.overlay = self.overlay.clone();
            widget.widget.invalidate();
        }

        // Geometry from sliders and buttons. During a drag the app echoes
        // back what the widget already holds, so this is a no-op then.
        if self.geometry != widget.widget.geometry {
            widget.widget.geometry = self.geometry;
            widget.widget.invalidate();
            // The old hover target may no longer be under the pointer.
            widget.widget.hover = None;
        }

        if self.metrics != prev.metrics && !widget.widget.gesture.is_dragging() {
            widget.widget.gesture = GestureMachine::new(self.metrics);
            widget.widget.invalidate();
        }

        if widget.widget.cached_frame.is_none() {
            widget.ctx.request_render();
        }
    }

    fn teardown(
        &self,
        _view_state: &mut Self::ViewState,
        _ctx: &mut ViewCtx,
        _element: Mut<'_, Self::Element>,
    ) {
    }

    fn message(
        &self,
        _view_state: &mut Self::ViewState,
        message: &mut MessageContext,
        _element: Mut<'_, Self::Element>,
        app_state: &mut State,
    ) -> MessageResult<()> {
        match message.take_message::<CanvasAction>() {
            Some(action) => {
                (self.on_action)(app_state, *action);
                MessageResult::Action(())
            }
            None => MessageResult::Stale,
        }
    }
}
