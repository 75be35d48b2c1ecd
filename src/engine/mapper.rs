use crate::foundation::core::FrameNumber;

const FLOOR_SLACK: f64 = 1e-9;

/// Document scroll geometry as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollGeometry {
    /// Current scroll offset from the top, in pixels.
    pub offset: f64,
    /// Total scrollable distance (document height minus viewport height), in pixels.
    pub scrollable_height: f64,
}

impl ScrollGeometry {
    /// Build a geometry sample.
    pub fn new(offset: f64, scrollable_height: f64) -> Self {
        Self {
            offset,
            scrollable_height,
        }
    }

    /// Scroll fraction in `[0, 1]`, or `None` when there is nothing to scroll.
    pub fn fraction(self) -> Option<f64> {
        if !(self.scrollable_height.is_finite() && self.scrollable_height > 0.0) {
            return None;
        }
        if !self.offset.is_finite() {
            return None;
        }
        Some((self.offset / self.scrollable_height).clamp(0.0, 1.0))
    }
}

/// Map a scroll position linearly onto `[1, total_frames]`.
///
/// `1 + fraction * (total - 1)`, floored and clamped. Degenerate geometry (zero height, NaN)
/// maps to frame 1.
pub fn target_for_scroll(geometry: ScrollGeometry, total_frames: u32) -> FrameNumber {
    let total = total_frames.max(1);
    let Some(fraction) = geometry.fraction() else {
        return FrameNumber::FIRST;
    };
    let pos = 1.0 + fraction * f64::from(total - 1);
    // Absorb rounding error so the inverse mapping lands exactly on its frame.
    FrameNumber(((pos + FLOOR_SLACK).floor() as u32).clamp(1, total))
}

/// Inverse of [`target_for_scroll`]: the scroll offset that lands on `frame`.
pub fn scroll_offset_for_frame(
    frame: FrameNumber,
    total_frames: u32,
    scrollable_height: f64,
) -> f64 {
    if total_frames <= 1 || !(scrollable_height.is_finite() && scrollable_height > 0.0) {
        return 0.0;
    }
    let f = f64::from(frame.0.clamp(1, total_frames));
    ((f - 1.0) / f64::from(total_frames - 1)) * scrollable_height
}

/// Coalesces scroll notifications so geometry is mapped at most once per tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct PendingScroll {
    latest: Option<ScrollGeometry>,
    coalesced: u32,
}

impl PendingScroll {
    /// Record a notification, replacing any sample not yet applied.
    pub fn push(&mut self, geometry: ScrollGeometry) {
        if self.latest.replace(geometry).is_some() {
            self.coalesced = self.coalesced.saturating_add(1);
        }
    }

    /// Take the newest sample, if any arrived since the last call.
    pub fn take(&mut self) -> Option<ScrollGeometry> {
        self.latest.take()
    }

    /// Drop any pending sample.
    pub fn clear(&mut self) {
        self.latest = None;
    }

    /// `true` when a sample is waiting.
    pub fn is_pending(&self) -> bool {
        self.latest.is_some()
    }

    /// Number of notifications folded into a later one so far.
    pub fn coalesced(&self) -> u32 {
        self.coalesced
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/mapper.rs"]
mod tests;
