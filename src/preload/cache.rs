use crate::assets::decode::FrameImage;
use crate::foundation::core::FrameNumber;
use crate::foundation::error::ReelResult;

/// Outcome of one load attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameSlot {
    /// Decoded and ready to display.
    Ready(FrameImage),
    /// The load failed; displays fall back to a neighbour.
    Placeholder,
}

/// Snapshot of preload progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct LoadProgress {
    /// Frames whose load attempt finished, successfully or not.
    pub attempted: u32,
    /// Attempts that failed.
    pub failed: u32,
    /// Frames in the sequence.
    pub total: u32,
}

impl LoadProgress {
    /// Fraction of attempts finished, in `[0, 1]`.
    pub fn ratio(self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (f64::from(self.attempted) / f64::from(self.total)).min(1.0)
    }

    /// `true` once every frame has been attempted.
    pub fn is_complete(self) -> bool {
        self.attempted >= self.total
    }
}

/// Frame images keyed by frame number, filled in by the preloader.
#[derive(Clone, Debug)]
pub struct FrameCache {
    slots: Vec<Option<FrameSlot>>,
    attempted: u32,
    failed: u32,
}

impl FrameCache {
    /// Empty cache for frames `1..=total_frames`.
    pub fn new(total_frames: u32) -> Self {
        Self {
            slots: vec![None; total_frames as usize],
            attempted: 0,
            failed: 0,
        }
    }

    /// Store the outcome for `frame`.
    ///
    /// Returns `false` (and changes nothing) for out-of-range frames and frames already recorded,
    /// so progress never double counts.
    pub fn record(&mut self, frame: FrameNumber, result: ReelResult<FrameImage>) -> bool {
        let Some(slot) = self.slot_mut(frame) else {
            return false;
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(match result {
            Ok(img) => FrameSlot::Ready(img),
            Err(_) => FrameSlot::Placeholder,
        });
        if matches!(slot, Some(FrameSlot::Placeholder)) {
            self.failed += 1;
        }
        self.attempted += 1;
        true
    }

    /// Recorded outcome for `frame`, if its attempt finished.
    pub fn slot(&self, frame: FrameNumber) -> Option<&FrameSlot> {
        let idx = (frame.0 as usize).checked_sub(1)?;
        self.slots.get(idx)?.as_ref()
    }

    /// Decoded image for `frame`, if it loaded.
    pub fn get(&self, frame: FrameNumber) -> Option<&FrameImage> {
        match self.slot(frame)? {
            FrameSlot::Ready(img) => Some(img),
            FrameSlot::Placeholder => None,
        }
    }

    /// Image to show for `frame`: the frame itself, else the nearest loaded frame (lower wins a
    /// tie), else `None` for a blank frame.
    pub fn display_frame(&self, frame: FrameNumber) -> Option<(FrameNumber, &FrameImage)> {
        let total = self.slots.len() as u32;
        if total == 0 {
            return None;
        }
        let f = frame.0.clamp(1, total);
        for d in 0..total {
            let below = f.checked_sub(d).filter(|v| *v >= 1);
            let above = f.checked_add(d).filter(|v| *v <= total);
            if below.is_none() && above.is_none() {
                break;
            }
            for cand in [below, above].into_iter().flatten() {
                if let Some(img) = self.get(FrameNumber(cand)) {
                    return Some((FrameNumber(cand), img));
                }
            }
        }
        None
    }

    /// Current progress.
    pub fn progress(&self) -> LoadProgress {
        LoadProgress {
            attempted: self.attempted,
            failed: self.failed,
            total: self.slots.len() as u32,
        }
    }

    fn slot_mut(&mut self, frame: FrameNumber) -> Option<&mut Option<FrameSlot>> {
        let idx = (frame.0 as usize).checked_sub(1)?;
        self.slots.get_mut(idx)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preload/cache.rs"]
mod tests;
