use crate::engine::config::{EngineConfig, Smoothing};
use crate::engine::state::{AnimationState, Mode};
use crate::foundation::core::{FrameNumber, Millis};

/// Longest gap between steps that still scales the smoothing factor; longer gaps (a paused
/// tab) count as this long.
pub const MAX_STEP_GAP_MS: u64 = 100;

/// Result of one interpolation step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    /// Frames moved this step.
    pub moved: f64,
    /// `current_frame` reached the target within epsilon and was pinned to it.
    pub arrived: bool,
}

/// Fixed-cadence exponential smoother from the current frame toward the target.
///
/// Each accepted step applies `current += (target - current) * factor`, with `factor` chosen
/// by mode. Steps closer together than the minimum interval are skipped. The factor is scaled
/// by the real gap between steps so slower displays converge at the same wall-clock rate.
#[derive(Clone, Debug)]
pub struct Interpolator {
    smoothing: Smoothing,
    epsilon: f64,
    min_interval_ms: u64,
    last_step: Option<Millis>,
    published: Option<FrameNumber>,
}

impl Interpolator {
    /// Build from engine configuration.
    pub fn new(cfg: &EngineConfig) -> Self {
        Self {
            smoothing: cfg.smoothing,
            epsilon: cfg.snap_epsilon,
            min_interval_ms: cfg.min_tick_interval_ms,
            last_step: None,
            published: None,
        }
    }

    /// Base smoothing factor for `mode`.
    pub fn factor(&self, mode: Mode) -> f64 {
        match mode {
            Mode::UserScrolling => self.smoothing.scrolling,
            Mode::Snapping => self.smoothing.snapping,
            Mode::Idle => self.smoothing.idle,
        }
    }

    /// `true` when enough time passed since the last accepted step.
    pub fn is_due(&self, now: Millis) -> bool {
        match self.last_step {
            None => true,
            Some(last) => now.since(last) >= self.min_interval_ms,
        }
    }

    /// Advance `state.current_frame` one step toward its target.
    ///
    /// The caller checks [`Interpolator::is_due`] first; this records `now` as the step time.
    pub fn step(&mut self, state: &mut AnimationState, now: Millis) -> StepOutcome {
        let base = self.factor(state.mode());
        let factor = match self.last_step {
            Some(last) if self.min_interval_ms > 0 => {
                let gap = now.since(last).min(MAX_STEP_GAP_MS) as f64;
                let ticks = gap / self.min_interval_ms as f64;
                1.0 - (1.0 - base).powf(ticks)
            }
            _ => base,
        };
        self.last_step = Some(now);

        let before = state.current_frame;
        let target = state.target_frame().as_f64();
        let mut next = before + (target - before) * factor;
        let arrived = (target - next).abs() < self.epsilon;
        if arrived {
            next = target;
        }
        state.current_frame = next.clamp(1.0, f64::from(state.total_frames()));

        StepOutcome {
            moved: (state.current_frame - before).abs(),
            arrived,
        }
    }

    /// Return `frame` when it differs from the last published frame, and remember it.
    pub fn publish(&mut self, frame: FrameNumber) -> Option<FrameNumber> {
        if self.published == Some(frame) {
            return None;
        }
        self.published = Some(frame);
        Some(frame)
    }

    /// Last frame handed downstream.
    pub fn last_published(&self) -> Option<FrameNumber> {
        self.published
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/interpolator.rs"]
mod tests;
