//! Plain-text `INFO.txt` written next to extracted frames.

use crate::foundation::core::FrameNumber;
use crate::foundation::error::{ReelError, ReelResult};
use crate::manifest::model::FrameManifest;

/// File name of the text manifest inside the frame directory.
pub const INFO_FILE_NAME: &str = "INFO.txt";

const TOTAL_KEY: &str = "Total frames:";
const FPS_KEY: &str = "FPS:";
const SNAP_KEY: &str = "Snap points:";

/// Render the human-readable manifest.
pub fn render_info_text(m: &FrameManifest) -> String {
    let points = m
        .snap_points
        .iter()
        .map(|p| p.0.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "# Frame sequence info\n{TOTAL_KEY} {}\n{FPS_KEY} {}\n{SNAP_KEY} [{points}]\n",
        m.total_frames, m.fps
    )
}

/// Parse text produced by [`render_info_text`] back into a validated manifest.
///
/// Unknown lines and `#` comments are ignored.
pub fn parse_info_text(text: &str) -> ReelResult<FrameManifest> {
    let mut total = None;
    let mut fps = None;
    let mut points = None;

    for line in text.lines().map(str::trim) {
        if line.starts_with('#') {
            continue;
        }
        if let Some(v) = line.strip_prefix(TOTAL_KEY) {
            total = Some(parse_u32(v, "total frames")?);
        } else if let Some(v) = line.strip_prefix(FPS_KEY) {
            fps = Some(parse_u32(v, "fps")?);
        } else if let Some(v) = line.strip_prefix(SNAP_KEY) {
            points = Some(parse_points(v)?);
        }
    }

    let total = total.ok_or_else(|| ReelError::validation("INFO text lacks total frames"))?;
    let fps = fps.ok_or_else(|| ReelError::validation("INFO text lacks fps"))?;
    let points = points.ok_or_else(|| ReelError::validation("INFO text lacks snap points"))?;
    FrameManifest::new(total, fps, points)
}

fn parse_u32(v: &str, what: &str) -> ReelResult<u32> {
    v.trim()
        .parse()
        .map_err(|e| ReelError::validation(format!("INFO {what} '{}': {e}", v.trim())))
}

fn parse_points(v: &str) -> ReelResult<Vec<FrameNumber>> {
    let inner = v
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| ReelError::validation("INFO snap points must be a [..] list"))?;
    inner
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_u32(s, "snap point").map(FrameNumber))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/info.rs"]
mod tests;
