use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::FrameNumber;
use crate::foundation::error::{ReelError, ReelResult};

/// Naming convention for frame files: `{prefix}{zero-padded number}.{extension}`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FramePattern {
    /// File name prefix, e.g. `frame_`.
    pub prefix: String,
    /// Minimum number of digits; shorter numbers are left-padded with zeros.
    pub digits: usize,
    /// File extension without the leading dot.
    pub extension: String,
}

impl Default for FramePattern {
    fn default() -> Self {
        Self {
            prefix: "frame_".to_owned(),
            digits: 4,
            extension: "webp".to_owned(),
        }
    }
}

impl FramePattern {
    /// File name for `frame`, e.g. `frame_0042.webp`.
    pub fn file_name(&self, frame: FrameNumber) -> String {
        format!(
            "{}{:0width$}.{}",
            self.prefix,
            frame.0,
            self.extension,
            width = self.digits
        )
    }

    /// Pattern in ffmpeg's image2 muxer syntax, e.g. `frame_%04d.webp`.
    pub fn ffmpeg_template(&self) -> String {
        format!("{}%0{}d.{}", self.prefix, self.digits, self.extension)
    }

    /// Frame number encoded in `name`, when it is a file produced with this pattern.
    pub fn parse(&self, name: &str) -> Option<FrameNumber> {
        let digits = name
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.extension.as_str())?
            .strip_suffix('.')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(FrameNumber)
    }
}

/// Static description of an extracted frame sequence.
///
/// Produced once by the extraction utility and consumed read-only by the preloader and the
/// engine. Snap points double as section starts.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameManifest {
    /// Number of frames in the sequence (frames are numbered `1..=total_frames`).
    pub total_frames: u32,
    /// Extraction rate; informational only.
    pub fps: u32,
    /// Section boundary frames, strictly increasing, first = 1, last = `total_frames`.
    pub snap_points: Vec<FrameNumber>,
    /// Display names for sections, parallel to `snap_points`.
    #[serde(default)]
    pub section_titles: Vec<String>,
    /// File naming convention.
    #[serde(default)]
    pub pattern: FramePattern,
}

impl FrameManifest {
    /// Build and validate a manifest with the default file pattern and no titles.
    pub fn new(total_frames: u32, fps: u32, snap_points: Vec<FrameNumber>) -> ReelResult<Self> {
        let m = Self {
            total_frames,
            fps,
            snap_points,
            section_titles: Vec::new(),
            pattern: FramePattern::default(),
        };
        m.validate()?;
        Ok(m)
    }

    /// Attach section titles.
    pub fn with_titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.section_titles = titles.into_iter().map(Into::into).collect();
        self
    }

    /// Check every structural invariant of the manifest.
    pub fn validate(&self) -> ReelResult<()> {
        if self.total_frames == 0 {
            return Err(ReelError::validation("total_frames must be >= 1"));
        }
        if self.fps == 0 {
            return Err(ReelError::validation("fps must be >= 1"));
        }
        let (Some(first), Some(last)) = (self.snap_points.first(), self.snap_points.last()) else {
            return Err(ReelError::validation("snap_points must not be empty"));
        };
        if *first != FrameNumber::FIRST {
            return Err(ReelError::validation("first snap point must be frame 1"));
        }
        if last.0 != self.total_frames {
            return Err(ReelError::validation(format!(
                "last snap point must be frame {} (total_frames), got {}",
                self.total_frames, last
            )));
        }
        if self.snap_points.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ReelError::validation(
                "snap_points must be strictly increasing",
            ));
        }
        if self.section_titles.len() > self.snap_points.len() {
            return Err(ReelError::validation(
                "more section titles than snap points",
            ));
        }
        if self.pattern.extension.is_empty() {
            return Err(ReelError::validation("frame extension must be non-empty"));
        }
        Ok(())
    }

    /// Display name for section `index`, falling back to `Section N`.
    pub fn section_title(&self, index: usize) -> String {
        self.section_titles
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("Section {}", index + 1))
    }

    /// Path of `frame` below the frame directory `root`.
    pub fn frame_path(&self, root: &Path, frame: FrameNumber) -> PathBuf {
        root.join(self.pattern.file_name(frame))
    }

    /// Read and validate a JSON manifest.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read manifest '{}'", path.display()))?;
        let m: Self = serde_json::from_slice(&bytes)
            .map_err(|e| ReelError::serde(format!("manifest '{}': {e}", path.display())))?;
        m.validate()?;
        Ok(m)
    }

    /// Write the manifest as pretty JSON.
    pub fn write_json(&self, path: &Path) -> ReelResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ReelError::serde(format!("encode manifest: {e}")))?;
        std::fs::write(path, json)
            .with_context(|| format!("write manifest '{}'", path.display()))?;
        Ok(())
    }
}

/// Named frame-sequence layouts shipped with the site.
///
/// The short and long cuts disagree on frame count and boundary spacing; neither is canonical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// 204 frames, a section every 51 frames.
    Compact,
    /// 408 frames, a section every 102 frames.
    Extended,
}

/// Section titles shared by both presets.
pub const SITE_SECTION_TITLES: [&str; 5] = ["Главная", "Команда", "Услуги", "Навыки", "Контакты"];

/// Extraction rate used for the shipped sequences.
pub const SITE_FPS: u32 = 15;

impl Preset {
    /// Manifest for this preset.
    pub fn manifest(self) -> FrameManifest {
        let (total, points): (u32, [u32; 5]) = match self {
            Self::Compact => (204, [1, 51, 102, 153, 204]),
            Self::Extended => (408, [1, 102, 204, 306, 408]),
        };
        FrameManifest {
            total_frames: total,
            fps: SITE_FPS,
            snap_points: points.into_iter().map(FrameNumber).collect(),
            section_titles: SITE_SECTION_TITLES.iter().map(|s| (*s).to_owned()).collect(),
            pattern: FramePattern::default(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/model.rs"]
mod tests;
