// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Decoded raster images and render surfaces.
//!
//! Pixels are held premultiplied in a `tiny_skia::Pixmap`, the layout the
//! compositor draws with. Conversion to straight alpha only happens at the
//! edges: PNG export and upload to the display.

use crate::error::{Result, StudioError};
use kurbo::Size;
use std::fmt;
use std::io::Cursor;
use std::path::Path;
use tiny_skia::{IntSize, Pixmap};

#[derive(Clone)]
pub struct RasterImage {
    pixmap: Pixmap,
}

impl fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl RasterImage {
    /// Build from straight-alpha RGBA8 rows.
    pub fn from_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(StudioError::EmptyImage);
        }
        premultiply(&mut data);
        let size = IntSize::from_wh(width, height).ok_or(StudioError::EmptyImage)?;
        let pixmap =
            Pixmap::from_vec(data, size).ok_or(StudioError::Surface { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn from_dynamic(image: image::DynamicImage) -> Result<Self> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(width, height, rgba.into_raw())
    }

    pub(crate) fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width()), f64::from(self.height()))
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Straight-alpha RGBA of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Straight-alpha RGBA8 bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixmap.data().len());
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        out
    }

    pub fn to_rgba_image(&self) -> Result<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width(), self.height(), self.to_rgba8()).ok_or(
            StudioError::Surface {
                width: self.width(),
                height: self.height(),
            },
        )
    }

    /// Encode as a lossless PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let image = self.to_rgba_image()?;
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .map_err(|e| StudioError::Encode(e.to_string()))?;
        Ok(bytes)
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes).map_err(|source| StudioError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn premultiply(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let alpha = u16::from(px[3]);
        if alpha == 255 {
            continue;
        }
        for channel in &mut px[..3] {
            *channel = ((u16::from(*channel) * alpha + 127) / 255) as u8;
        }
    }
}
