// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Studio view - the overlay canvas with its controls sidebar

use masonry::properties::types::AsUnit;
use xilem::WidgetView;
use xilem::style::Style;
use xilem::view::{CrossAxisAlignment, FlexExt, button, flex_col, flex_row, label, sized_box};

use crate::components::{CanvasAction, overlay_canvas, slider};
use crate::data::AppState;
use crate::settings;
use crate::theme;

pub fn studio(state: &mut AppState) -> impl WidgetView<AppState> + use<> {
    flex_row((
        overlay_canvas(
            state.background.clone(),
            state.overlay.clone(),
            state.geometry,
            state.metrics,
            |state: &mut AppState, action| match action {
                CanvasAction::GeometryChanged(geometry) => state.update_geometry(geometry),
                CanvasAction::SurfaceMeasured { width, height } => {
                    state.set_surface_size(width, height)
                }
            },
        )
        .flex(1.0),
        controls_panel(state),
    ))
    .gap(theme::size::UI_PANEL_MARGIN.px())
    .cross_axis_alignment(CrossAxisAlignment::Fill)
    .padding(theme::size::UI_PANEL_MARGIN)
    .background_color(theme::app::BACKGROUND)
}

// ===== Controls =====

fn controls_panel(state: &AppState) -> impl WidgetView<AppState> + use<> {
    let g = state.geometry;
    let min_size = settings::overlay::SLIDER_MIN_SIZE_PCT;

    sized_box(
        flex_col((
            section_title("Position"),
            control_row(
                "Horizontal",
                percent(g.x_pct),
                slider(g.x_pct, 0.0, 1.0, |state: &mut AppState, v| state.set_x_pct(v)),
            ),
            control_row(
                "Vertical",
                percent(g.y_pct),
                slider(g.y_pct, 0.0, 1.0, |state: &mut AppState, v| state.set_y_pct(v)),
            ),
            section_title("Size"),
            control_row(
                "Width",
                percent(g.w_pct),
                slider(g.w_pct, min_size, 1.0, |state: &mut AppState, v| state.set_w_pct(v)),
            ),
            control_row(
                "Height",
                percent(g.h_pct),
                slider(g.h_pct, min_size, 1.0, |state: &mut AppState, v| state.set_h_pct(v)),
            ),
            button(label("Lock aspect ratio"), |state: &mut AppState| {
                state.lock_aspect_ratio();
            }),
            section_title("Rotation"),
            control_row(
                "Angle",
                degrees(g.rotation_deg),
                slider(g.rotation_deg, 0.0, 359.0, |state: &mut AppState, v| {
                    state.set_rotation_deg(v)
                }),
            ),
            flex_row((
                button(label("0°"), |state: &mut AppState| state.set_rotation_deg(0.0)),
                button(label("90°"), |state: &mut AppState| state.set_rotation_deg(90.0)),
            ))
            .gap(theme::size::UI_PANEL_GAP.px()),
            section_title("Image"),
            flex_row((
                button(label("Reset overlay"), |state: &mut AppState| state.reset_overlay()),
                button(label("Clear"), |state: &mut AppState| state.clear_background()),
            ))
            .gap(theme::size::UI_PANEL_GAP.px()),
            button(label("Open image…"), |state: &mut AppState| {
                state.open_background_dialog();
            }),
            button(label("Export PNG…"), |state: &mut AppState| state.export_dialog()),
            status_line(state),
        ))
        .gap(theme::size::UI_PANEL_GAP.px())
        .cross_axis_alignment(CrossAxisAlignment::Fill),
    )
    .width(theme::size::SIDEBAR_WIDTH.px())
    .padding(12.0)
    .background_color(theme::panel::BACKGROUND)
    .border_color(theme::panel::OUTLINE)
    .border_width(theme::size::PANEL_BORDER_WIDTH)
    .corner_radius(theme::size::PANEL_RADIUS)
}

fn section_title(title: &'static str) -> impl WidgetView<AppState> + use<> {
    label(title)
        .text_size(12.0)
        .color(theme::panel::SECTION_TITLE)
}

/// Caption with a value readout above a slider
fn control_row(
    caption: &'static str,
    readout: String,
    control: impl WidgetView<AppState>,
) -> impl WidgetView<AppState> {
    flex_col((
        flex_row((
            label(caption)
                .text_size(13.0)
                .color(theme::text::PRIMARY)
                .flex(1.0),
            label(readout).text_size(13.0).color(theme::text::SECONDARY),
        )),
        control,
    ))
    .gap(2.px())
    .cross_axis_alignment(CrossAxisAlignment::Fill)
}

fn status_line(state: &AppState) -> impl WidgetView<AppState> + use<> {
    let (text, color) = match &state.status {
        Some(status) if status.is_error => (status.message.clone(), theme::text::ERROR),
        Some(status) => (status.message.clone(), theme::text::SECONDARY),
        None => (String::new(), theme::text::SECONDARY),
    };
    label(text).text_size(12.0).color(color)
}

fn percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

/// Whole degrees, rounded down so the readout never shows 360.
fn degrees(rotation_deg: f64) -> String {
    format!("{:.0}°", rotation_deg.floor())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_readout_stays_below_a_full_turn() {
        assert_eq!(degrees(0.0), "0°");
        assert_eq!(degrees(90.4), "90°");
        assert_eq!(degrees(359.6), "359°");
    }

    #[test]
    fn percent_readout_rounds() {
        assert_eq!(percent(0.333), "33%");
        assert_eq!(percent(1.0), "100%");
    }
}
