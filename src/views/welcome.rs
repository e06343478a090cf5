// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Welcome view - shown until a background image is loaded

use masonry::properties::types::AsUnit;
use xilem::WidgetView;
use xilem::style::Style;
use xilem::view::{CrossAxisAlignment, MainAxisAlignment, button, flex_col, label, sized_box};

use crate::data::AppState;
use crate::theme;

pub fn welcome(state: &mut AppState) -> impl WidgetView<AppState> + use<> {
    let hint = if state.is_loading() {
        "Loading image…".to_string()
    } else {
        "Choose a background photo to place the overlay on.".to_string()
    };
    let (status_text, status_color) = match &state.status {
        Some(status) if status.is_error => (status.message.clone(), theme::text::ERROR),
        _ => (String::new(), theme::text::SECONDARY),
    };

    flex_col((
        sized_box(
            flex_col((
                label("Overlay Studio")
                    .text_size(28.0)
                    .color(theme::text::PRIMARY),
                label(hint).text_size(14.0).color(theme::text::SECONDARY),
                button(label("Open image…"), |state: &mut AppState| {
                    state.open_background_dialog();
                }),
                label(status_text).text_size(13.0).color(status_color),
            ))
            .gap(theme::size::UI_PANEL_GAP.px())
            .cross_axis_alignment(CrossAxisAlignment::Center),
        )
        .width(420.px())
        .padding(24.0)
        .background_color(theme::panel::BACKGROUND)
        .border_color(theme::panel::OUTLINE)
        .border_width(theme::size::PANEL_BORDER_WIDTH)
        .corner_radius(theme::size::PANEL_RADIUS),
    ))
    .main_axis_alignment(MainAxisAlignment::Center)
    .cross_axis_alignment(CrossAxisAlignment::Center)
    .background_color(theme::app::BACKGROUND)
}
