use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{ReelError, ReelResult};
use crate::timeline::logo::LogoPolicy;

/// Quiet period after the last scroll notification before the scroll counts as settled.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 150;
/// Maximum frame distance from a snap point that still pulls the view onto it.
pub const DEFAULT_SNAP_THRESHOLD_FRAMES: f64 = 35.0;
/// Distance to target below which a snap counts as landed.
pub const DEFAULT_SNAP_EPSILON: f64 = 0.3;
/// Safety limit on a single snap, after which the engine returns to idle regardless.
pub const DEFAULT_MAX_SNAP_MS: u64 = 1200;
/// Minimum spacing between interpolation steps (~60 Hz).
pub const DEFAULT_MIN_TICK_INTERVAL_MS: u64 = 16;

/// Per-mode exponential smoothing factors, each in `(0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Smoothing {
    /// Factor while the user is scrolling.
    pub scrolling: f64,
    /// Factor while converging on a snap point.
    pub snapping: f64,
    /// Factor while idle.
    pub idle: f64,
}

impl Default for Smoothing {
    fn default() -> Self {
        Self {
            scrolling: 0.2,
            snapping: 0.12,
            idle: 0.08,
        }
    }
}

/// Tunables of the scroll-driven animation engine.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// See [`DEFAULT_SETTLE_DELAY_MS`].
    pub settle_delay_ms: u64,
    /// See [`DEFAULT_SNAP_THRESHOLD_FRAMES`].
    pub snap_threshold_frames: f64,
    /// See [`DEFAULT_SNAP_EPSILON`].
    pub snap_epsilon: f64,
    /// See [`DEFAULT_MAX_SNAP_MS`].
    pub max_snap_ms: u64,
    /// See [`DEFAULT_MIN_TICK_INTERVAL_MS`].
    pub min_tick_interval_ms: u64,
    /// Smoothing factors per mode.
    pub smoothing: Smoothing,
    /// Logo visibility rule.
    pub logo: LogoPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            snap_threshold_frames: DEFAULT_SNAP_THRESHOLD_FRAMES,
            snap_epsilon: DEFAULT_SNAP_EPSILON,
            max_snap_ms: DEFAULT_MAX_SNAP_MS,
            min_tick_interval_ms: DEFAULT_MIN_TICK_INTERVAL_MS,
            smoothing: Smoothing::default(),
            logo: LogoPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Read a JSON config; omitted fields keep their defaults.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_slice(&bytes)
            .map_err(|e| ReelError::serde(format!("config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check ranges of every tunable.
    pub fn validate(&self) -> ReelResult<()> {
        for (name, f) in [
            ("scrolling", self.smoothing.scrolling),
            ("snapping", self.smoothing.snapping),
            ("idle", self.smoothing.idle),
        ] {
            if !(f.is_finite() && f > 0.0 && f <= 1.0) {
                return Err(ReelError::validation(format!(
                    "smoothing.{name} must be in (0, 1], got {f}"
                )));
            }
        }
        if !(self.snap_threshold_frames.is_finite() && self.snap_threshold_frames >= 0.0) {
            return Err(ReelError::validation(
                "snap_threshold_frames must be finite and >= 0",
            ));
        }
        if !(self.snap_epsilon.is_finite() && self.snap_epsilon > 0.0) {
            return Err(ReelError::validation(
                "snap_epsilon must be finite and > 0",
            ));
        }
        if self.max_snap_ms == 0 {
            return Err(ReelError::validation("max_snap_ms must be > 0"));
        }
        self.logo.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/config.rs"]
mod tests;
