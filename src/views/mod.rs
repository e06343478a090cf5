// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Top-level views: the upload prompt and the studio

mod studio;
mod welcome;

pub use studio::studio;
pub use welcome::welcome;
