//! Headless replay of timed scroll and navigation input against a [`ScrollSession`].
//!
//! Used by the `simulate` command to preview how a manifest and configuration behave without a
//! browser. The simulated host records every [`ScrollCommand`] but never feeds it back as
//! scroll input, matching a browser where programmatic scrolling arrives while a snap is active.

use std::path::Path;

use anyhow::Context as _;

use crate::engine::config::EngineConfig;
use crate::engine::mapper::ScrollGeometry;
use crate::engine::session::{FrameUpdate, ScrollCommand, ScrollSession};
use crate::foundation::core::Millis;
use crate::foundation::error::{ReelError, ReelResult};
use crate::manifest::model::FrameManifest;
use crate::timeline::section::SectionId;

/// Refresh rate of the simulated display.
pub const REPLAY_HZ: u64 = 60;

/// One timed input.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptAction {
    /// The user scrolled to `offset` pixels.
    Scroll {
        /// New scroll offset.
        offset: f64,
    },
    /// The user picked a section in the navigation.
    Navigate {
        /// Zero-based section index.
        section: usize,
    },
    /// The viewport was resized.
    Resize {
        /// New scrollable height.
        scrollable_height: f64,
    },
}

/// Input scheduled at a point in time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScriptEvent {
    /// Milliseconds since the session started.
    pub at_ms: u64,
    /// What happens.
    #[serde(flatten)]
    pub action: ScriptAction,
}

/// Timed input for a replay.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Script {
    /// Scrollable height at the start.
    pub scrollable_height: f64,
    /// How long to keep ticking, in milliseconds.
    pub duration_ms: u64,
    /// Inputs; applied in time order.
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

impl Script {
    /// Read a JSON script.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read script '{}'", path.display()))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ReelError::serde(format!("script '{}': {e}", path.display())))
    }
}

/// Something observable that happened during a replay.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayEvent {
    /// The engine published a new visual state.
    Frame {
        /// Tick time.
        at_ms: u64,
        /// Published state.
        #[serde(flatten)]
        update: FrameUpdate,
    },
    /// The engine asked the host to scroll.
    Scroll {
        /// Tick time.
        at_ms: u64,
        /// Requested scroll.
        #[serde(flatten)]
        command: ScrollCommand,
    },
}

/// Run `script` against a fresh session and collect everything it published.
pub fn replay(
    manifest: &FrameManifest,
    cfg: EngineConfig,
    script: &Script,
) -> ReelResult<Vec<ReplayEvent>> {
    let mut session = ScrollSession::new(manifest, cfg)?;
    let mut events = script.events.clone();
    events.sort_by_key(|e| e.at_ms);
    let mut pending = events.into_iter().peekable();

    let mut height = script.scrollable_height;
    session.set_scrollable_height(height);
    let mut out = Vec::new();

    for i in 0.. {
        let t = i * 1000 / REPLAY_HZ;
        if t > script.duration_ms {
            break;
        }
        let now = Millis(t);
        while let Some(ev) = pending.next_if(|e| e.at_ms <= t) {
            match ev.action {
                ScriptAction::Scroll { offset } => {
                    session.on_scroll(ScrollGeometry::new(offset, height), now);
                }
                ScriptAction::Navigate { section } => {
                    session.navigate_to(SectionId(section), now)?;
                }
                ScriptAction::Resize { scrollable_height } => {
                    height = scrollable_height;
                    session.set_scrollable_height(height);
                }
            }
        }
        if let Some(update) = session.tick(now) {
            out.push(ReplayEvent::Frame { at_ms: t, update });
        }
        for command in session.take_scroll_commands() {
            out.push(ReplayEvent::Scroll { at_ms: t, command });
        }
    }

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/engine/replay.rs"]
mod tests;
