// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Paint helper methods for OverlayCanvasWidget

use super::OverlayCanvasWidget;
use crate::render::{self, RasterImage, RenderTarget};
use kurbo::{Affine, Size};
use masonry::util::fill_color;
use masonry::vello::Scene;
use peniko::{Blob, ImageAlphaType, ImageBrush, ImageData, ImageFormat};

impl OverlayCanvasWidget {
    pub(super) fn paint_canvas(&mut self, scene: &mut Scene, canvas_size: Size) {
        fill_color(scene, &canvas_size.to_rect(), crate::theme::canvas::BACKGROUND);

        if self.cached_frame.is_none() {
            self.cached_frame = self.composite();
        }
        let Some(frame) = &self.cached_frame else {
            return;
        };

        let origin = self.surface.origin().to_vec2();
        scene.draw_image(&ImageBrush::new(frame.clone()), Affine::translate(origin));
    }

    /// Full clear-and-redraw of the interactive surface.
    fn composite(&self) -> Option<ImageData> {
        let frame = render::render(
            self.background.as_deref(),
            self.overlay.as_deref(),
            &self.geometry,
            self.surface_pixels(),
            self.gesture.metrics(),
            RenderTarget::Interactive,
        )?;
        Some(to_image_data(&frame))
    }
}

/// Upload form of a rendered frame. The raster is already premultiplied.
fn to_image_data(frame: &RasterImage) -> ImageData {
    ImageData {
        data: Blob::from(frame.pixmap().data().to_vec()),
        format: ImageFormat::Rgba8,
        alpha_type: ImageAlphaType::AlphaPremultiplied,
        width: frame.width(),
        height: frame.height(),
    }
}
