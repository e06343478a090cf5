// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Application state and data structures

use crate::assets::{self, OverlayAsset};
use crate::config::Config;
use crate::editing::HandleMetrics;
use crate::loader::{self, DecodeReceiver, DecodeRequest, DecodeSender, Decoded, LoadTracker};
use crate::model::OverlayGeometry;
use crate::render::{self, RasterImage, RenderTarget};
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use xilem::WindowId;

/// One line of feedback shown under the controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub is_error: bool,
}

impl Status {
    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

/// Main application state
pub struct AppState {
    /// Decoded background photo, if one has been loaded
    pub background: Option<Arc<RasterImage>>,

    /// File the current background came from
    pub background_path: Option<PathBuf>,

    /// The overlay graphic, loaded once at startup
    pub overlay: Option<OverlayAsset>,

    /// Overlay placement; the only copy, everything else reads it from here
    pub geometry: OverlayGeometry,

    /// Handle sizes used by the canvas
    pub metrics: HandleMetrics,

    /// Size of the editing surface as last measured by the canvas
    pub surface_size: Option<(u32, u32)>,

    pub status: Option<Status>,

    pub config: Config,

    loads: LoadTracker,
    decode_tx: DecodeSender,
    /// Handed to the decode worker the first time the app view is built
    decode_rx: Arc<Mutex<Option<DecodeReceiver>>>,

    /// Whether the app should keep running
    pub running: bool,

    /// Main window ID (stable across rebuilds to prevent window
    /// recreation)
    pub main_window_id: WindowId,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let overlay = match assets::load_overlay(config.overlay_asset.as_deref()) {
            Ok(asset) => Some(asset),
            Err(e) => {
                tracing::error!("No overlay available: {}", e);
                None
            }
        };
        let (decode_tx, decode_rx) = loader::decode_channel();

        Self {
            background: None,
            background_path: None,
            overlay,
            geometry: config.initial_geometry(),
            metrics: config.handle_metrics(),
            surface_size: None,
            status: None,
            loads: LoadTracker::default(),
            decode_tx,
            decode_rx: Arc::new(Mutex::new(Some(decode_rx))),
            running: true,
            main_window_id: WindowId::next(),
            config,
        }
    }

    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loads.is_loading()
    }

    /// Shared slot holding the decode receiver until the worker claims it.
    pub fn decode_receiver(&self) -> Arc<Mutex<Option<DecodeReceiver>>> {
        self.decode_rx.clone()
    }

    // ====================================================================
    // BACKGROUND
    // ====================================================================

    /// Open a file dialog to pick a background image
    pub fn open_background_dialog(&mut self) {
        let path = rfd::FileDialog::new()
            .set_title("Open Background Image")
            .add_filter(
                "Images",
                &["png", "jpg", "jpeg", "gif", "bmp", "webp"],
            )
            .add_filter("All files", &["*"])
            .pick_file();

        if let Some(path) = path {
            self.load_background(path);
        }
    }

    /// Queue a background decode. The result arrives through
    /// [`finish_background_load`](Self::finish_background_load).
    pub fn load_background(&mut self, path: PathBuf) {
        let token = self.loads.begin();
        tracing::info!("Loading background {}", path.display());
        self.status = Some(Status::info(format!("Loading {}…", display_name(&path))));

        if let Err(e) = self.decode_tx.send(DecodeRequest { token, path }) {
            // No worker running; decode in place.
            let DecodeRequest { token, path } = e.0;
            let result = loader::decode_file(&path);
            self.finish_background_load(Decoded {
                token,
                path,
                result,
            });
        }
    }

    pub fn finish_background_load(&mut self, decoded: Decoded) {
        let Decoded {
            token,
            path,
            result,
        } = decoded;

        if !self.loads.accept(token) {
            tracing::warn!("Discarding stale decode of {}", path.display());
            return;
        }

        match result {
            Ok(image) => {
                tracing::info!(
                    "Background loaded: {} ({}x{})",
                    path.display(),
                    image.width(),
                    image.height()
                );
                self.status = Some(Status::info(format!(
                    "{} ({}×{})",
                    display_name(&path),
                    image.width(),
                    image.height()
                )));
                self.background = Some(Arc::new(image));
                self.background_path = Some(path);
                self.surface_size = None;
            }
            Err(e) => {
                let error = format!("Failed to load {}: {}", display_name(&path), e);
                tracing::error!("{}", error);
                self.status = Some(Status::error(error));
            }
        }
    }

    /// Drop the background and put the overlay back where it started.
    pub fn clear_background(&mut self) {
        tracing::info!("Background cleared");
        self.loads.cancel();
        self.background = None;
        self.background_path = None;
        self.surface_size = None;
        self.status = None;
        self.reset_overlay();
    }

    // ====================================================================
    // OVERLAY CONTROLS
    // ====================================================================

    /// Replace the geometry with the result of a canvas gesture
    pub fn update_geometry(&mut self, geometry: OverlayGeometry) {
        self.geometry = geometry;
    }

    pub fn set_surface_size(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.surface_size = Some((width, height));
        }
    }

    pub fn set_x_pct(&mut self, value: f64) {
        self.geometry.set_x_pct(value);
    }

    pub fn set_y_pct(&mut self, value: f64) {
        self.geometry.set_y_pct(value);
    }

    pub fn set_w_pct(&mut self, value: f64) {
        self.geometry.set_w_pct(value);
    }

    pub fn set_h_pct(&mut self, value: f64) {
        self.geometry.set_h_pct(value);
    }

    pub fn set_rotation_deg(&mut self, value: f64) {
        self.geometry.set_rotation_deg(value);
    }

    pub fn lock_aspect_ratio(&mut self) {
        self.geometry.lock_aspect_ratio();
    }

    pub fn reset_overlay(&mut self) {
        self.geometry = self.config.initial_geometry();
    }

    // ====================================================================
    // EXPORT
    // ====================================================================

    /// Pixel size of the exported image: the measured editing surface, or
    /// the background's own size before the canvas has been laid out.
    pub fn export_size(&self) -> Option<(u32, u32)> {
        let background = self.background.as_ref()?;
        Some(
            self.surface_size
                .unwrap_or((background.width(), background.height())),
        )
    }

    /// Render the composite without handles, fresh from the current
    /// geometry.
    pub fn render_export(&self) -> Option<RasterImage> {
        render::render(
            self.background.as_deref(),
            self.overlay.as_deref(),
            &self.geometry,
            self.export_size()?,
            &self.metrics,
            RenderTarget::Export,
        )
    }

    /// The composite encoded as PNG bytes.
    pub fn export_png_bytes(&self) -> anyhow::Result<Vec<u8>> {
        let image = self
            .render_export()
            .context("nothing to export: no background or overlay loaded")?;
        Ok(image.encode_png()?)
    }

    pub fn export_to_path(&mut self, path: &Path) -> anyhow::Result<()> {
        let image = self
            .render_export()
            .context("nothing to export: no background or overlay loaded")?;
        image
            .save_png(path)
            .with_context(|| format!("exporting to {}", path.display()))?;
        tracing::info!(
            "Exported {}x{} composite to {}",
            image.width(),
            image.height(),
            path.display()
        );
        Ok(())
    }

    /// Ask where to save, then write the composite as PNG.
    pub fn export_dialog(&mut self) {
        if !self.has_background() {
            return;
        }
        let path = rfd::FileDialog::new()
            .set_title("Export Composite")
            .set_file_name(&self.config.export_file_name)
            .add_filter("PNG Image", &["png"])
            .save_file();

        let Some(path) = path else {
            return;
        };
        match self.export_to_path(&path) {
            Ok(()) => {
                self.status = Some(Status::info(format!("Exported {}", display_name(&path))));
            }
            Err(e) => {
                tracing::error!("Export failed: {:#}", e);
                self.status = Some(Status::error(format!("Export failed: {e:#}")));
            }
        }
    }
}

/// Implement the Xilem AppState trait
impl xilem::AppState for AppState {
    fn keep_running(&self) -> bool {
        self.running
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
