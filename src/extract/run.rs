use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::extract::ffmpeg::{ExtractJob, FrameExtractor, ensure_dir};
use crate::foundation::core::FrameNumber;
use crate::foundation::error::{ReelError, ReelResult};
use crate::manifest::info::{INFO_FILE_NAME, render_info_text};
use crate::manifest::model::{FrameManifest, FramePattern, SITE_FPS};

/// File name of the JSON manifest inside the frame directory.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";
/// Default encoder quality.
pub const DEFAULT_QUALITY: u8 = 85;
/// Default output width in pixels.
pub const DEFAULT_WIDTH: u32 = 1920;

/// Settings for a whole extraction run.
#[derive(Clone, Debug)]
pub struct ExtractOpts {
    /// Source videos, one per section transition, in playback order.
    pub inputs: Vec<PathBuf>,
    /// Frame directory. Emptied before extraction starts.
    pub out_dir: PathBuf,
    /// Sampling rate in frames per second.
    pub fps: u32,
    /// Encoder quality, 0-100.
    pub quality: u8,
    /// Output width in pixels.
    pub width: u32,
    /// File naming for the frames.
    pub pattern: FramePattern,
    /// Section titles recorded in the manifest.
    pub section_titles: Vec<String>,
}

impl ExtractOpts {
    /// Options with the site defaults (15 fps, quality 85, 1920 px wide).
    pub fn new(inputs: Vec<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            inputs,
            out_dir: out_dir.into(),
            fps: SITE_FPS,
            quality: DEFAULT_QUALITY,
            width: DEFAULT_WIDTH,
            pattern: FramePattern::default(),
            section_titles: Vec::new(),
        }
    }
}

/// What happened to one input.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InputOutcome {
    /// Frames `first..=last` were written.
    Extracted {
        /// First frame number written.
        first: FrameNumber,
        /// Last frame number written.
        last: FrameNumber,
    },
    /// The input file does not exist; skipped.
    Missing,
    /// The extractor failed or produced nothing; skipped.
    Failed {
        /// Failure description.
        error: String,
    },
}

/// Outcome for one input path.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct InputReport {
    /// Source video.
    pub input: PathBuf,
    /// What happened to it.
    pub outcome: InputOutcome,
}

/// Summary of an extraction run.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ExtractReport {
    /// Per-input outcomes, in input order.
    pub inputs: Vec<InputReport>,
    /// Manifest written to the frame directory; `None` when no frame was produced.
    pub manifest: Option<FrameManifest>,
}

impl ExtractReport {
    /// Inputs that produced frames.
    pub fn succeeded(&self) -> usize {
        self.inputs
            .iter()
            .filter(|r| matches!(r.outcome, InputOutcome::Extracted { .. }))
            .count()
    }

    /// Inputs that were missing or failed.
    pub fn failed(&self) -> usize {
        self.inputs.len() - self.succeeded()
    }
}

/// Cut every input into one continuously numbered frame sequence and write its manifests.
///
/// Inputs are processed in order. A missing or failing input is recorded and skipped; the
/// remaining inputs keep numbering where the last good one stopped. Each good input adds a snap
/// point at its last frame, after the implicit snap point at frame 1.
#[tracing::instrument(
    skip_all,
    fields(out_dir = %opts.out_dir.display(), inputs = opts.inputs.len())
)]
pub fn run_extraction(
    opts: &ExtractOpts,
    extractor: &dyn FrameExtractor,
) -> ReelResult<ExtractReport> {
    reset_dir(&opts.out_dir)?;

    let mut next = 1u32;
    let mut snap_points = vec![FrameNumber::FIRST];
    let mut inputs = Vec::with_capacity(opts.inputs.len());

    for input in &opts.inputs {
        let outcome = if !input.is_file() {
            tracing::warn!(input = %input.display(), "input not found; skipping");
            InputOutcome::Missing
        } else {
            let job = ExtractJob {
                input: input.clone(),
                out_dir: opts.out_dir.clone(),
                pattern: opts.pattern.clone(),
                start_number: next,
                fps: opts.fps,
                quality: opts.quality,
                width: opts.width,
            };
            let outcome = match extractor.extract(&job) {
                Ok(0) => {
                    tracing::warn!(input = %input.display(), "extractor produced no frames");
                    InputOutcome::Failed {
                        error: "no frames produced".to_owned(),
                    }
                }
                Ok(n) => {
                    let first = FrameNumber(next);
                    let last = FrameNumber(next + n - 1);
                    tracing::info!(
                        input = %input.display(),
                        frames = n,
                        %first,
                        %last,
                        "input extracted"
                    );
                    next += n;
                    if snap_points.last().is_some_and(|p| *p < last) {
                        snap_points.push(last);
                    }
                    InputOutcome::Extracted { first, last }
                }
                Err(e) => {
                    tracing::warn!(
                        input = %input.display(),
                        error = %e,
                        "extraction failed; skipping"
                    );
                    InputOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };
            if matches!(outcome, InputOutcome::Failed { .. }) {
                let removed = job.discard_written()?;
                if removed > 0 {
                    tracing::debug!(input = %input.display(), removed, "partial frames discarded");
                }
            }
            outcome
        };
        inputs.push(InputReport {
            input: input.clone(),
            outcome,
        });
    }

    let total = next - 1;
    let manifest = if total == 0 {
        tracing::warn!("no frames were extracted; manifests not written");
        None
    } else {
        let titles = opts.section_titles.iter().take(snap_points.len()).cloned();
        let mut m = FrameManifest::new(total, opts.fps, snap_points)?.with_titles(titles);
        m.pattern = opts.pattern.clone();
        m.validate()?;
        write_manifests(&m, &opts.out_dir)?;
        tracing::info!(total_frames = total, snap_points = ?m.snap_points, "manifests written");
        Some(m)
    };

    Ok(ExtractReport { inputs, manifest })
}

/// Write `manifest.json` and `INFO.txt` into `dir`.
pub fn write_manifests(m: &FrameManifest, dir: &Path) -> ReelResult<()> {
    m.write_json(&dir.join(MANIFEST_FILE_NAME))?;
    let info = dir.join(INFO_FILE_NAME);
    std::fs::write(&info, render_info_text(m))
        .with_context(|| format!("write '{}'", info.display()))?;
    Ok(())
}

fn reset_dir(dir: &Path) -> ReelResult<()> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(ReelError::validation(format!(
                "output path '{}' is not a directory",
                dir.display()
            )));
        }
        std::fs::remove_dir_all(dir)
            .with_context(|| format!("clear output directory '{}'", dir.display()))?;
    }
    ensure_dir(dir)
}

#[cfg(test)]
#[path = "../../tests/unit/extract/run.rs"]
mod tests;
