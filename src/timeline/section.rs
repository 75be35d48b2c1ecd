use crate::foundation::core::{FrameNumber, FrameRange};
use crate::foundation::error::{ReelError, ReelResult};
use crate::manifest::model::FrameManifest;

/// Zero-based ordinal of a content section.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct SectionId(pub usize);

/// Contiguous frame range with associated content.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Section {
    /// Ordinal of this section.
    pub id: SectionId,
    /// Covered frames. The last section's `end` is `total_frames + 1`, closing it at the final
    /// frame.
    pub range: FrameRange,
    /// Display name.
    pub title: String,
}

/// Sections derived from a manifest's snap points; they partition `[1, total_frames]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionTable {
    total_frames: u32,
    sections: Vec<Section>,
}

impl SectionTable {
    /// Derive one section per snap point.
    pub fn from_manifest(m: &FrameManifest) -> ReelResult<Self> {
        m.validate()?;
        let mut sections = Vec::with_capacity(m.snap_points.len());
        for (i, start) in m.snap_points.iter().enumerate() {
            let end = m
                .snap_points
                .get(i + 1)
                .copied()
                .unwrap_or(FrameNumber(m.total_frames + 1));
            sections.push(Section {
                id: SectionId(i),
                range: FrameRange::new(*start, end)?,
                title: m.section_title(i),
            });
        }
        Ok(Self {
            total_frames: m.total_frames,
            sections,
        })
    }

    /// All sections in frame order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always `false` for a table built from a valid manifest.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section by id.
    pub fn get(&self, id: SectionId) -> ReelResult<&Section> {
        self.sections.get(id.0).ok_or_else(|| {
            ReelError::validation(format!(
                "section {} out of range (have {})",
                id.0,
                self.sections.len()
            ))
        })
    }

    /// Frame count the table was derived for.
    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    /// Section active at `frame`; see [`resolve`].
    pub fn resolve(&self, frame: FrameNumber) -> SectionId {
        resolve(frame, &self.sections)
    }
}

/// Pick the highest-indexed section whose start is `<= frame`.
///
/// A boundary frame belongs to the section that starts there. Frames before the first start
/// resolve to the first section.
pub fn resolve(frame: FrameNumber, sections: &[Section]) -> SectionId {
    sections
        .iter()
        .rev()
        .find(|s| s.range.start <= frame)
        .map_or(SectionId(0), |s| s.id)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/section.rs"]
mod tests;
