// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Overlay interaction: hit testing and drag gestures

pub mod gesture;
pub mod hit_test;

pub use gesture::{DragMode, DragSession, GestureMachine, GestureState};
pub use hit_test::{HandleMetrics, HitTarget, hit_test};
