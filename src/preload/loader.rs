use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::assets::decode::{FrameImage, decode_frame};
use crate::foundation::core::FrameNumber;
use crate::foundation::error::{ReelError, ReelResult};
use crate::manifest::model::{FrameManifest, FramePattern};
use crate::preload::cache::{FrameCache, LoadProgress};

/// Where frame images come from.
pub trait FrameSource: Send + Sync {
    /// Fetch and decode one frame.
    fn load(&self, frame: FrameNumber) -> ReelResult<FrameImage>;
}

/// Frames stored as files in one directory, named by a [`FramePattern`].
#[derive(Clone, Debug)]
pub struct FsFrameSource {
    root: PathBuf,
    pattern: FramePattern,
}

impl FsFrameSource {
    /// Read frames named per `manifest.pattern` from `root`.
    pub fn new(root: impl Into<PathBuf>, manifest: &FrameManifest) -> Self {
        Self {
            root: root.into(),
            pattern: manifest.pattern.clone(),
        }
    }
}

impl FrameSource for FsFrameSource {
    fn load(&self, frame: FrameNumber) -> ReelResult<FrameImage> {
        let path = self.root.join(self.pattern.file_name(frame));
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read frame '{}'", path.display()))
            .map_err(|e| ReelError::asset(format!("{e:#}")))?;
        decode_frame(&bytes)
            .map_err(|e| ReelError::asset(format!("frame '{}': {e}", path.display())))
    }
}

/// Order in which frames are requested: `priority` first (deduplicated, out-of-range entries
/// dropped), then every other frame ascending.
pub fn load_order(total_frames: u32, priority: &[FrameNumber]) -> Vec<FrameNumber> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(total_frames as usize);
    for &f in priority {
        if (1..=total_frames).contains(&f.0) && seen.insert(f) {
            out.push(f);
        }
    }
    for f in (1..=total_frames).map(FrameNumber) {
        if !seen.contains(&f) {
            out.push(f);
        }
    }
    out
}

/// Preloader options.
#[derive(Clone, Debug, Default)]
pub struct PreloadOpts {
    /// Override rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Frames to fetch first, in order. `None` uses the manifest's snap points.
    pub priority: Option<Vec<FrameNumber>>,
}

/// One finished load attempt.
#[derive(Debug)]
pub struct LoadEvent {
    /// Attempted frame.
    pub frame: FrameNumber,
    /// Decoded image or the failure.
    pub result: ReelResult<FrameImage>,
}

/// What a [`PreloadHandle::poll`] call applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollOutcome {
    /// Load attempts folded into the cache by this call.
    pub applied: usize,
    /// Progress after this call.
    pub progress: LoadProgress,
    /// `true` on exactly one call: the one that observed the last attempt.
    pub completed_now: bool,
}

/// Background frame loader.
pub struct Preloader;

impl Preloader {
    /// Start loading every frame of `manifest` from `source` on a dedicated worker pool.
    ///
    /// Priority frames are fetched one after another before the rest fan out in parallel, so
    /// the first paint only waits on frame 1.
    #[tracing::instrument(skip_all, fields(total = manifest.total_frames))]
    pub fn start(
        manifest: &FrameManifest,
        source: Arc<dyn FrameSource>,
        opts: PreloadOpts,
    ) -> ReelResult<PreloadHandle> {
        let total = manifest.total_frames;
        let priority = opts
            .priority
            .unwrap_or_else(|| manifest.snap_points.clone());
        let order = load_order(total, &priority);
        let split = order.iter().take_while(|f| priority.contains(f)).count();
        let rest = order[split..].to_vec();
        let mut first = order;
        first.truncate(split);

        let pool = build_thread_pool(opts.threads)?;
        let (tx, rx) = std::sync::mpsc::channel::<LoadEvent>();
        tracing::debug!(priority = first.len(), rest = rest.len(), "preload started");

        pool.spawn(move || {
            for frame in first {
                let result = source.load(frame);
                if tx.send(LoadEvent { frame, result }).is_err() {
                    return;
                }
            }
            rest.into_par_iter().for_each_with(tx, |tx, frame| {
                let result = source.load(frame);
                // The handle was dropped; nothing is listening anymore.
                let _ = tx.send(LoadEvent { frame, result });
            });
        });

        Ok(PreloadHandle {
            rx,
            _pool: pool,
            completion_reported: total == 0,
        })
    }
}

/// Receiving side of a running preload.
pub struct PreloadHandle {
    rx: Receiver<LoadEvent>,
    _pool: rayon::ThreadPool,
    completion_reported: bool,
}

impl PreloadHandle {
    /// Fold finished attempts into `cache` without blocking.
    pub fn poll(&mut self, cache: &mut FrameCache) -> PollOutcome {
        let mut applied = 0;
        loop {
            match self.rx.try_recv() {
                Ok(ev) => {
                    if apply(cache, ev) {
                        applied += 1;
                    }
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        self.outcome(cache, applied)
    }

    /// Block until every frame has been attempted (or the workers are gone).
    pub fn wait(&mut self, cache: &mut FrameCache) -> PollOutcome {
        let mut applied = 0;
        while !cache.progress().is_complete() {
            match self.rx.recv() {
                Ok(ev) => {
                    if apply(cache, ev) {
                        applied += 1;
                    }
                }
                Err(_) => break,
            }
        }
        self.outcome(cache, applied)
    }

    fn outcome(&mut self, cache: &FrameCache, applied: usize) -> PollOutcome {
        let progress = cache.progress();
        let completed_now = progress.is_complete() && !self.completion_reported;
        if completed_now {
            self.completion_reported = true;
            tracing::info!(
                total = progress.total,
                failed = progress.failed,
                "all frames attempted"
            );
        }
        PollOutcome {
            applied,
            progress,
            completed_now,
        }
    }
}

fn apply(cache: &mut FrameCache, ev: LoadEvent) -> bool {
    if let Err(e) = &ev.result {
        tracing::warn!(frame = ev.frame.0, error = %e, "frame failed to load");
    }
    cache.record(ev.frame, ev.result)
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::validation(
            "preload 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/preload/loader.rs"]
mod tests;
