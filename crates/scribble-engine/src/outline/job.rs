use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;

use glam::Vec2;
use image::RgbaImage;
use lyon::path::Path;

use crate::api::config::SessionConfig;
use crate::api::types::TargetRect;
use crate::outline::extract::extract_outline;
use crate::outline::mask::AlphaMask;
use crate::outline::sample::sample_path;

/// Output of one background extraction, tagged with the generation that
/// requested it.
pub struct OutlineResult {
    pub generation: u64,
    /// `None` when the asset had no usable silhouette.
    pub path: Option<Path>,
    /// Uniform arc-length samples of `path`; empty when `path` is `None`.
    pub samples: Vec<Vec2>,
}

/// One in-flight silhouette extraction.
///
/// Masking, contour detection and sampling all run on a worker thread;
/// the session polls once per frame on the owning thread, so installed
/// state is never observed half-built. A result whose generation no
/// longer matches (the target rect changed mid-flight) is discarded on
/// arrival and the caller is expected to have spawned a fresh job.
pub struct OutlineJob {
    rx: Receiver<OutlineResult>,
}

impl OutlineJob {
    pub fn spawn(
        image: Arc<RgbaImage>,
        rect: TargetRect,
        config: SessionConfig,
        generation: u64,
    ) -> Self {
        let (tx, rx) = channel();
        thread::spawn(move || {
            let mask = AlphaMask::from_image(&image, config.alpha_threshold, config.pad_fraction);
            let path = extract_outline(&mask, rect, config.border_reject_fraction);
            let samples = path
                .as_ref()
                .map(|p| sample_path(p, config.sample_count))
                .unwrap_or_default();
            // Receiver may be gone already; nothing left to deliver to.
            let _ = tx.send(OutlineResult {
                generation,
                path,
                samples,
            });
        });
        Self { rx }
    }

    /// Poll for the finished result without blocking. Returns `None`
    /// while the worker is still running, and swallows results computed
    /// for an older generation.
    pub fn poll(&self, current_generation: u64) -> Option<OutlineResult> {
        match self.rx.try_recv() {
            Ok(result) if result.generation == current_generation => Some(result),
            Ok(stale) => {
                log::debug!(
                    "dropping stale outline (generation {} != {})",
                    stale.generation,
                    current_generation
                );
                None
            }
            Err(_) => None,
        }
    }

    /// Block until the worker finishes. Used by batch tools; interactive
    /// hosts poll instead.
    pub fn wait(self, current_generation: u64) -> Option<OutlineResult> {
        match self.rx.recv() {
            Ok(result) if result.generation == current_generation => Some(result),
            _ => None,
        }
    }
}
