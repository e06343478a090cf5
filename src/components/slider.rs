// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Horizontal slider widget for the overlay controls

use crate::theme;
use kurbo::{Circle, Point, RoundedRect, Size};
use masonry::accesskit::{Node, Role};
use masonry::core::{
    AccessCtx, BoxConstraints, ChildrenIds, EventCtx, LayoutCtx, PaintCtx, PointerButton,
    PointerButtonEvent, PointerEvent, PointerUpdate, PropertiesMut, PropertiesRef, RegisterCtx,
    TextEvent, Update, UpdateCtx, Widget,
};
use masonry::util::{fill_color, stroke};
use masonry::vello::Scene;
use std::marker::PhantomData;
use xilem::core::{MessageContext, MessageResult, Mut, View, ViewMarker};
use xilem::{Pod, ViewCtx};

/// Fallback width when the parent does not bound us horizontally
const UNBOUNDED_WIDTH: f64 = 200.0;

/// Action emitted when the user moves the slider
#[derive(Clone, Copy, Debug)]
pub struct SliderChanged(pub f64);

pub struct SliderWidget {
    value: f64,
    min: f64,
    max: f64,
    dragging: bool,
    size: Size,
}

impl SliderWidget {
    pub fn new(value: f64, min: f64, max: f64) -> Self {
        Self {
            value: value.clamp(min, max),
            min,
            max,
            dragging: false,
            size: Size::ZERO,
        }
    }

    /// Horizontal extent the thumb center can travel.
    fn track_span(&self) -> (f64, f64) {
        let inset = theme::size::SLIDER_THUMB_RADIUS;
        (inset, (self.size.width - inset).max(inset))
    }

    fn set_from_x(&mut self, ctx: &mut EventCtx<'_>, x: f64) {
        let (start, end) = self.track_span();
        let value = value_at(x, start, end, self.min, self.max);
        if value != self.value {
            self.value = value;
            ctx.submit_action::<SliderChanged>(SliderChanged(value));
            ctx.request_render();
        }
    }
}

/// Value under `x` on a track running from `start` to `end`.
fn value_at(x: f64, start: f64, end: f64, min: f64, max: f64) -> f64 {
    if end <= start {
        return min;
    }
    let t = ((x - start) / (end - start)).clamp(0.0, 1.0);
    min + t * (max - min)
}

/// Fraction of the track covered at `value`.
fn fraction_of(value: f64, min: f64, max: f64) -> f64 {
    if max <= min {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

impl Widget for SliderWidget {
    type Action = SliderChanged;

    fn register_children(&mut self, _ctx: &mut RegisterCtx<'_>) {}

    fn update(
        &mut self,
        _ctx: &mut UpdateCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        _event: &Update,
    ) {
    }

    fn layout(
        &mut self,
        _ctx: &mut LayoutCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        bc: &BoxConstraints,
    ) -> Size {
        let width = if bc.max().width.is_finite() {
            bc.max().width
        } else {
            UNBOUNDED_WIDTH
        };
        self.size = bc.constrain(Size::new(width, theme::size::SLIDER_HEIGHT));
        self.size
    }

    fn paint(&mut self, _ctx: &mut PaintCtx<'_>, _props: &PropertiesRef<'_>, scene: &mut Scene) {
        let (start, end) = self.track_span();
        let mid_y = self.size.height / 2.0;
        let half = theme::size::SLIDER_TRACK_HEIGHT / 2.0;
        let thumb_x = start + fraction_of(self.value, self.min, self.max) * (end - start);

        let track = RoundedRect::new(start, mid_y - half, end, mid_y + half, half);
        fill_color(scene, &track, theme::slider::TRACK);
        let filled = RoundedRect::new(start, mid_y - half, thumb_x, mid_y + half, half);
        fill_color(scene, &filled, theme::slider::FILL);

        let thumb = Circle::new(Point::new(thumb_x, mid_y), theme::size::SLIDER_THUMB_RADIUS);
        fill_color(scene, &thumb, theme::slider::THUMB);
        stroke(scene, &thumb, theme::slider::THUMB_OUTLINE, 1.5);
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
                state,
                ..
            }) => {
                self.dragging = true;
                ctx.capture_pointer();
                let local = ctx.local_position(state.position);
                self.set_from_x(ctx, local.x);
            }
            PointerEvent::Move(PointerUpdate { current, .. }) if self.dragging => {
                let local = ctx.local_position(current.position);
                self.set_from_x(ctx, local.x);
            }
            PointerEvent::Up(..) | PointerEvent::Cancel(..) if self.dragging => {
                self.dragging = false;
                ctx.release_pointer();
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

    fn accessibility_role(&self) -> Role {
        Role::Slider
    }

    fn accessibility(
        &mut self,
        _ctx: &mut AccessCtx<'_>,
        _props: &PropertiesRef<'_>,
        node: &mut Node,
    ) {
        node.set_numeric_value(self.value);
        node.set_min_numeric_value(self.min);
        node.set_max_numeric_value(self.max);
    }

    fn children_ids(&self) -> ChildrenIds {
        ChildrenIds::new()
    }
}

// --- Xilem View Wrapper ---

/// A slider over `[min, max]` showing `value`.
///
/// Callback receives `(state, new_value)` on every change.
pub fn slider<State, F>(value: f64, min: f64, max: f64, on_change: F) -> SliderView<State, F>
where
    F: Fn(&mut State, f64),
{
    SliderView {
        value,
        min,
        max,
        on_change,
        phantom: PhantomData,
    }
}

#[must_use = "View values do nothing unless provided to Xilem."]
pub struct SliderView<State, F> {
    value: f64,
    min: f64,
    max: f64,
    on_change: F,
    phantom: PhantomData<fn() -> State>,
}

impl<State, F> ViewMarker for SliderView<State, F> {}

impl<State: 'static, F: Fn(&mut State, f64) + 'static> View<State, (), ViewCtx>
    for SliderView<State, F>
{
    type Element = Pod<SliderWidget>;
    type ViewState = ();

    fn build(&self, ctx: &mut ViewCtx, _app_state: &mut State) -> (Self::Element, Self::ViewState) {
        let pod = ctx.create_pod(SliderWidget::new(self.value, self.min, self.max));
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
        let mut widget = element.downcast::<SliderWidget>();
        if self.min != prev.min || self.max != prev.max {
            widget.widget.min = self.min;
            widget.widget.max = self.max;
            widget.ctx.request_render();
        }
        let value = self.value.clamp(self.min, self.max);
        if value != widget.widget.value {
            widget.widget.value = value;
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
        match message.take_message::<SliderChanged>() {
            Some(changed) => {
                (self.on_change)(app_state, changed.0);
                MessageResult::Action(())
            }
            None => MessageResult::Stale,
        }
    }
}
