use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::foundation::core::FrameNumber;
use crate::foundation::error::{ReelError, ReelResult};
use crate::manifest::model::FramePattern;

/// One source video to be cut into numbered frames.
#[derive(Clone, Debug)]
pub struct ExtractJob {
    /// Source video.
    pub input: PathBuf,
    /// Directory receiving the frames.
    pub out_dir: PathBuf,
    /// File naming for the frames.
    pub pattern: FramePattern,
    /// Number given to the first frame written by this job.
    pub start_number: u32,
    /// Sampling rate in frames per second.
    pub fps: u32,
    /// Encoder quality, 0-100.
    pub quality: u8,
    /// Output width in pixels; height follows the aspect ratio.
    pub width: u32,
}

impl ExtractJob {
    /// Validate numeric settings.
    pub fn validate(&self) -> ReelResult<()> {
        if self.fps == 0 {
            return Err(ReelError::validation("extract fps must be non-zero"));
        }
        if self.width == 0 || !self.width.is_multiple_of(2) {
            return Err(ReelError::validation(
                "extract width must be non-zero and even",
            ));
        }
        if self.quality > 100 {
            return Err(ReelError::validation("extract quality must be in 0..=100"));
        }
        if self.start_number == 0 {
            return Err(ReelError::validation("frame numbering starts at 1"));
        }
        Ok(())
    }

    /// Frames of this job present on disk, counted contiguously from `start_number`.
    pub fn count_written(&self) -> u32 {
        let mut n = self.start_number;
        while self
            .out_dir
            .join(self.pattern.file_name(FrameNumber(n)))
            .is_file()
        {
            n += 1;
        }
        n - self.start_number
    }

    /// Delete every frame file numbered `start_number` or later, so a skipped input leaves
    /// nothing behind for the next one. Returns how many files were removed.
    pub fn discard_written(&self) -> ReelResult<u32> {
        use anyhow::Context as _;
        if !self.out_dir.is_dir() {
            return Ok(0);
        }
        let entries = std::fs::read_dir(&self.out_dir)
            .with_context(|| format!("list output directory '{}'", self.out_dir.display()))?;
        let mut removed = 0;
        for entry in entries {
            let entry = entry
                .with_context(|| format!("list output directory '{}'", self.out_dir.display()))?;
            let name = entry.file_name();
            let Some(frame) = name.to_str().and_then(|n| self.pattern.parse(n)) else {
                continue;
            };
            if frame.0 >= self.start_number {
                let path = entry.path();
                std::fs::remove_file(&path)
                    .with_context(|| format!("remove partial frame '{}'", path.display()))?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// Turns one video into frame files.
pub trait FrameExtractor {
    /// Write the frames of `job` and return how many were produced.
    fn extract(&self, job: &ExtractJob) -> ReelResult<u32>;
}

/// Return `true` if `ffmpeg` is callable from PATH.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Create `dir` and its parents.
pub fn ensure_dir(dir: &Path) -> ReelResult<()> {
    use anyhow::Context as _;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
    Ok(())
}

/// Extractor backed by the system `ffmpeg` binary.
#[derive(Clone, Copy, Debug, Default)]
pub struct FfmpegExtractor;

impl FfmpegExtractor {
    /// Arguments passed to `ffmpeg` for `job`.
    pub fn args(job: &ExtractJob) -> Vec<String> {
        vec![
            "-y".to_owned(),
            "-loglevel".to_owned(),
            "error".to_owned(),
            "-i".to_owned(),
            job.input.display().to_string(),
            "-an".to_owned(),
            "-vf".to_owned(),
            format!("fps={},scale={}:-2", job.fps, job.width),
            "-quality".to_owned(),
            job.quality.to_string(),
            "-start_number".to_owned(),
            job.start_number.to_string(),
            job.out_dir
                .join(job.pattern.ffmpeg_template())
                .display()
                .to_string(),
        ]
    }
}

impl FrameExtractor for FfmpegExtractor {
    fn extract(&self, job: &ExtractJob) -> ReelResult<u32> {
        job.validate()?;
        ensure_dir(&job.out_dir)?;

        // The system binary avoids native FFmpeg dev header/lib requirements.
        let output = Command::new("ffmpeg")
            .args(Self::args(job))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                ReelError::extraction(format!(
                    "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReelError::extraction(format!(
                "ffmpeg exited with status {} on '{}': {}",
                output.status,
                job.input.display(),
                stderr.trim()
            )));
        }

        Ok(job.count_written())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/extract/ffmpeg.rs"]
mod tests;
