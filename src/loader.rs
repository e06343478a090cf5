// Copyright 2025 the Overlay Studio Authors
// SPDX-License-Identifier: Apache-2.0

//! Background image decoding.
//!
//! Decodes run off the UI thread and report back through the Xilem message
//! proxy. Every request carries a [`LoadToken`]; only the completion for the
//! most recently requested token is accepted, so a slow decode of an older
//! pick can never replace a newer one.

use crate::error::{Result, StudioError};
use crate::render::RasterImage;
use std::path::{Path, PathBuf};
use xilem::core::MessageProxy;
use xilem::tokio;
use xilem::tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Identifies one load request. Later requests have larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadToken(u64);

/// Tracks the single outstanding load the UI is waiting for.
#[derive(Debug, Default)]
pub struct LoadTracker {
    next: u64,
    pending: Option<LoadToken>,
}

impl LoadTracker {
    /// Start a new request, superseding any pending one.
    pub fn begin(&mut self) -> LoadToken {
        self.next += 1;
        let token = LoadToken(self.next);
        self.pending = Some(token);
        token
    }

    /// Accept a completion if it belongs to the latest request.
    pub fn accept(&mut self, token: LoadToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Forget the pending request; its completion will be discarded.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

#[derive(Debug)]
pub struct DecodeRequest {
    pub token: LoadToken,
    pub path: PathBuf,
}

/// Completion of a [`DecodeRequest`].
#[derive(Debug)]
pub struct Decoded {
    pub token: LoadToken,
    pub path: PathBuf,
    pub result: Result<RasterImage>,
}

pub type DecodeSender = UnboundedSender<DecodeRequest>;
pub type DecodeReceiver = UnboundedReceiver<DecodeRequest>;

pub fn decode_channel() -> (DecodeSender, DecodeReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// Read and decode an image file in any format the `image` crate knows.
pub fn decode_file(path: &Path) -> Result<RasterImage> {
    let bytes = std::fs::read(path).map_err(|source| StudioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_bytes(&bytes)
}

pub fn decode_bytes(bytes: &[u8]) -> Result<RasterImage> {
    let image = image::load_from_memory(bytes).map_err(|source| StudioError::Decode { source })?;
    RasterImage::from_dynamic(image)
}

/// Serve decode requests until the channel or the proxy closes.
pub async fn decode_worker(proxy: MessageProxy<Decoded>, mut requests: DecodeReceiver) {
    while let Some(DecodeRequest { token, path }) = requests.recv().await {
        tracing::debug!("Decoding {} ({:?})", path.display(), token);
        let job_path = path.clone();
        let result = match tokio::task::spawn_blocking(move || decode_file(&job_path)).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Decode task for {} failed: {}", path.display(), e);
                continue;
            }
        };

        if proxy.message(Decoded { token, path, result }).is_err() {
            break;
        }
    }
    tracing::debug!("Decode worker stopped");
}
