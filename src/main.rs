// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Overlay Studio: place, resize and rotate a brand overlay on a photo

use xilem::{EventLoop, winit::error::EventLoopError};

fn main() -> Result<(), EventLoopError> {
    overlay_studio::run(EventLoop::with_user_event())
}
