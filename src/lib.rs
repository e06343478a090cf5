// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Overlay Studio: place, resize and rotate a brand overlay on a photo,
//! built with Xilem
//!
//! The geometry, hit testing, gesture and compositing modules are plain
//! Rust with no UI dependency and can be used headlessly.

use std::sync::{Arc, Mutex};
use winit::dpi::LogicalSize;
use winit::error::EventLoopError;
use xilem::core::fork;
use xilem::core::one_of::Either;
use xilem::{EventLoopBuilder, WidgetView, WindowView, Xilem, window};

pub mod assets;
mod components;
pub mod config;
pub mod data;
pub mod editing;
pub mod error;
pub mod loader;
pub mod model;
pub mod render;
pub mod settings;
pub mod theme;
mod views;

use data::AppState;
use loader::DecodeReceiver;
use views::{studio, welcome};

/// Entry point for the Overlay Studio application
pub fn run(event_loop: EventLoopBuilder) -> Result<(), EventLoopError> {
    // Initialize tracing subscriber (can be controlled via RUST_LOG env var)
    // Filter out noisy wgpu/naga shader compilation logs
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(directive("overlay_studio=info"))
                .add_directive(directive("wgpu=warn"))
                .add_directive(directive("naga=warn"))
                .add_directive(directive("wgpu_core=warn"))
                .add_directive(directive("wgpu_hal=warn")),
        )
        .init();

    let mut initial_state = AppState::new(config::load());

    // Check for command-line argument (background image path)
    handle_command_line_args(&mut initial_state);

    let app = Xilem::new(initial_state, app_logic);
    app.run_in(event_loop)?;
    Ok(())
}

fn directive(text: &'static str) -> tracing_subscriber::filter::Directive {
    text.parse()
        .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into())
}

/// Handle command-line arguments to load a background image
fn handle_command_line_args(initial_state: &mut AppState) {
    let Some(arg) = std::env::args().nth(1) else {
        return;
    };
    let path = std::path::PathBuf::from(arg);

    if path.is_file() {
        initial_state.load_background(path);
    } else {
        tracing::error!("Not a file: {}", path.display());
        tracing::error!("Usage: overlay-studio [path/to/background-image]");
    }
}

/// Build the single-window UI (welcome prompt or studio).
fn app_logic(state: &mut AppState) -> impl Iterator<Item = WindowView<AppState>> + use<> {
    let content = with_decode_worker(state);

    let window_size = LogicalSize::new(1280.0, 800.0);
    let window_view = window(state.main_window_id, "Overlay Studio", content);
    let window_with_options = window_view.with_options(|options| {
        options
            .with_initial_inner_size(window_size)
            .on_close(|state: &mut AppState| state.running = false)
    });

    std::iter::once(window_with_options)
}

/// Main content with the background decode worker running alongside.
///
/// The worker task is started once and claims the request receiver from
/// the app state; completions come back as `Decoded` messages.
fn with_decode_worker(state: &mut AppState) -> impl WidgetView<AppState> + use<> {
    let receiver: Arc<Mutex<Option<DecodeReceiver>>> = state.decode_receiver();
    let content = if state.has_background() {
        Either::A(studio(state))
    } else {
        Either::B(welcome(state))
    };

    fork(
        content,
        xilem::view::task_raw(
            move |proxy| {
                let requests = receiver.lock().ok().and_then(|mut slot| slot.take());
                async move {
                    if let Some(requests) = requests {
                        loader::decode_worker(proxy, requests).await;
                    }
                }
            },
            |state: &mut AppState, decoded: loader::Decoded| {
                state.finish_background_load(decoded);
            },
        ),
    )
}
