use crate::foundation::error::{ReelError, ReelResult};

/// 1-based index of a still frame in the extracted sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct FrameNumber(pub u32);

impl FrameNumber {
    /// The first frame of every sequence.
    pub const FIRST: Self = Self(1);

    /// Round a fractional frame position to the nearest frame in `[1, total]`.
    pub fn from_position(pos: f64, total: u32) -> Self {
        let total = total.max(1);
        if !pos.is_finite() {
            return Self::FIRST;
        }
        let rounded = pos.round().clamp(1.0, f64::from(total));
        Self(rounded as u32)
    }

    /// Frame as a real-valued position.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl std::fmt::Display for FrameNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half-open range of frames, `start` inclusive and `end` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameNumber,
    /// One past the last frame in the range.
    pub end: FrameNumber, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameNumber, end: FrameNumber) -> ReelResult<Self> {
        if start.0 > end.0 {
            return Err(ReelError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> u32 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// `true` when the range covers no frame.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// `true` when `f` lies inside the range.
    pub fn contains(self, f: FrameNumber) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Last frame covered by the range, if any.
    pub fn last(self) -> Option<FrameNumber> {
        if self.is_empty() {
            None
        } else {
            Some(FrameNumber(self.end.0 - 1))
        }
    }
}

/// Monotonic session timestamp in milliseconds.
///
/// The engine never reads a clock itself; hosts pass the current time into every call.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Millis(pub u64);

impl Millis {
    /// Timestamp `ms` milliseconds after `self`.
    pub fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed from `earlier` to `self`, zero if `earlier` is later.
    pub fn since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
