use crate::foundation::core::FrameNumber;

/// Outcome of a settle evaluation that pulls the view onto a boundary.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SnapDecision {
    /// Snap point to land on.
    pub target: FrameNumber,
    /// Frame distance from the settle position to `target`.
    pub distance: f64,
}

/// Decides whether a settled position is close enough to a section boundary to snap.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapEngine {
    points: Vec<FrameNumber>,
    threshold: f64,
}

impl SnapEngine {
    /// `points` must be sorted ascending (as in a validated manifest).
    pub fn new(points: Vec<FrameNumber>, threshold_frames: f64) -> Self {
        Self {
            points,
            threshold: threshold_frames,
        }
    }

    /// Snap points this engine gravitates toward.
    pub fn points(&self) -> &[FrameNumber] {
        &self.points
    }

    /// Nearest snap point to `pos` and its distance; the lower point wins a tie.
    pub fn nearest(&self, pos: f64) -> Option<(FrameNumber, f64)> {
        let mut best: Option<(FrameNumber, f64)> = None;
        for &p in &self.points {
            let d = (pos - p.as_f64()).abs();
            match best {
                Some((_, bd)) if bd <= d => {}
                _ => best = Some((p, d)),
            }
        }
        best
    }

    /// Snap to the nearest point when it is strictly closer than the threshold.
    ///
    /// Returns `None` when no point qualifies; the view then stays where it settled.
    pub fn evaluate(&self, pos: f64) -> Option<SnapDecision> {
        let (target, distance) = self.nearest(pos)?;
        (distance < self.threshold).then_some(SnapDecision { target, distance })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/snap.rs"]
mod tests;
