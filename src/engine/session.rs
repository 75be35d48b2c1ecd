use crate::engine::config::EngineConfig;
use crate::engine::interpolator::Interpolator;
use crate::engine::mapper::{
    PendingScroll, ScrollGeometry, scroll_offset_for_frame, target_for_scroll,
};
use crate::engine::snap::SnapEngine;
use crate::engine::state::{AnimationState, Mode};
use crate::engine::timers::{TimerKind, TimerSet};
use crate::foundation::core::{FrameNumber, Millis};
use crate::foundation::error::ReelResult;
use crate::manifest::model::FrameManifest;
use crate::timeline::logo::LogoState;
use crate::timeline::section::{SectionId, SectionTable};

/// Why a programmatic scroll was requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapReason {
    /// Scroll settled near a boundary.
    Settle,
    /// Explicit jump to a section.
    Navigation,
}

/// Request for the host to move the document scroll position.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollCommand {
    /// Scroll offset that maps exactly onto `frame`.
    pub offset: f64,
    /// Boundary frame being landed on.
    pub frame: FrameNumber,
    /// What triggered the request.
    pub reason: SnapReason,
}

/// Visual state handed downstream when the displayed frame or section changes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameUpdate {
    /// Frame image to show.
    pub frame: FrameNumber,
    /// Section to highlight.
    pub section: SectionId,
    /// Logo visibility and artwork.
    pub logo: LogoState,
}

/// Scroll-driven animation engine for one page session.
///
/// Hosts feed scroll notifications and navigation requests, call [`ScrollSession::tick`] once
/// per display refresh, and apply the [`ScrollCommand`]s it queues. All calls happen on one
/// thread; every method takes the current [`Millis`] instead of reading a clock.
///
/// Mode transitions:
///
/// - scroll notification: `Idle -> UserScrolling` (ignored while `Snapping`)
/// - settle with a boundary within threshold: `UserScrolling -> Snapping`, otherwise `Idle`
/// - navigation request: any mode `-> Snapping`
/// - landed within epsilon, or snap safety timeout: `Snapping -> Idle`
#[derive(Clone, Debug)]
pub struct ScrollSession {
    cfg: EngineConfig,
    sections: SectionTable,
    snap: SnapEngine,
    state: AnimationState,
    timers: TimerSet,
    pending: PendingScroll,
    interp: Interpolator,
    scrollable_height: f64,
    nav_highlight: Option<SectionId>,
    published_section: Option<SectionId>,
    outbox: Vec<ScrollCommand>,
}

impl ScrollSession {
    /// Create a session at frame 1, idle.
    pub fn new(manifest: &FrameManifest, cfg: EngineConfig) -> ReelResult<Self> {
        cfg.validate()?;
        let sections = SectionTable::from_manifest(manifest)?;
        Ok(Self {
            snap: SnapEngine::new(manifest.snap_points.clone(), cfg.snap_threshold_frames),
            state: AnimationState::new(manifest.total_frames),
            interp: Interpolator::new(&cfg),
            timers: TimerSet::default(),
            pending: PendingScroll::default(),
            scrollable_height: 0.0,
            nav_highlight: None,
            published_section: None,
            outbox: Vec::new(),
            sections,
            cfg,
        })
    }

    /// Scroll notification from the host.
    ///
    /// Only records the sample and (re)arms the settle timer; the frame target is recomputed on
    /// the next tick, so bursts of notifications cost one mapping.
    pub fn on_scroll(&mut self, geometry: ScrollGeometry, now: Millis) {
        self.scrollable_height = geometry.scrollable_height;
        if self.state.mode() == Mode::Snapping {
            tracing::trace!(offset = geometry.offset, "scroll ignored while snapping");
            return;
        }
        if self.state.mode() == Mode::Idle {
            tracing::debug!(offset = geometry.offset, "scroll started");
        }
        self.pending.push(geometry);
        self.nav_highlight = None;
        self.state.set_mode(Mode::UserScrolling);
        self.timers
            .arm(TimerKind::Settle, now.after(self.cfg.settle_delay_ms));
    }

    /// Update the scrollable height (e.g. after a viewport resize) without scrolling.
    pub fn set_scrollable_height(&mut self, scrollable_height: f64) {
        self.scrollable_height = scrollable_height;
    }

    /// Jump to `section`: highlight it immediately and snap to its first frame.
    ///
    /// Repeating the request while that snap is still converging only re-asserts the target.
    pub fn navigate_to(&mut self, section: SectionId, now: Millis) -> ReelResult<()> {
        let target = self.sections.get(section)?.range.start;

        if self.state.mode() == Mode::Snapping && self.nav_highlight == Some(section) {
            self.state.set_target(target);
            return Ok(());
        }

        tracing::debug!(section = section.0, frame = %target, "navigate");
        self.pending.clear();
        self.timers.cancel(TimerKind::Settle);
        self.nav_highlight = Some(section);
        self.begin_snap(target, SnapReason::Navigation, now);
        Ok(())
    }

    /// Advance the engine by one display refresh.
    ///
    /// Returns a [`FrameUpdate`] only when the displayed frame or section changed. Calls closer
    /// together than the configured minimum interval do nothing.
    pub fn tick(&mut self, now: Millis) -> Option<FrameUpdate> {
        if !self.interp.is_due(now) {
            return None;
        }

        if let Some(g) = self.pending.take() {
            self.scrollable_height = g.scrollable_height;
            if self.state.mode() == Mode::UserScrolling {
                let target = target_for_scroll(g, self.state.total_frames());
                self.state.set_target(target);
            }
        }

        for kind in self.timers.take_due(now) {
            match kind {
                TimerKind::Settle => self.on_settle(now),
                TimerKind::SnapSafety => self.on_snap_timeout(),
            }
        }

        let out = self.interp.step(&mut self.state, now);
        if out.arrived {
            if self.state.mode() == Mode::Snapping {
                self.finish_snap();
            } else {
                // A timed-out navigation keeps its highlight until the frame lands.
                self.nav_highlight = None;
            }
        }

        self.publish()
    }

    /// Drain programmatic scroll requests queued since the last call.
    pub fn take_scroll_commands(&mut self) -> Vec<ScrollCommand> {
        std::mem::take(&mut self.outbox)
    }

    /// Section to highlight right now.
    ///
    /// A navigation request takes effect here immediately, ahead of the animation, and holds
    /// until the displayed frame reaches its target or the user scrolls; otherwise this is the
    /// section containing the displayed frame.
    pub fn active_section(&self) -> SectionId {
        self.nav_highlight
            .unwrap_or_else(|| self.sections.resolve(self.state.display_frame()))
    }

    /// Logo state for the displayed frame.
    pub fn logo(&self) -> LogoState {
        self.cfg
            .logo
            .logo_at(self.state.display_frame(), self.state.total_frames())
    }

    /// Read-only view of the animation state.
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Section table derived from the manifest.
    pub fn sections(&self) -> &SectionTable {
        &self.sections
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Number of armed timers (settle and snap safety).
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Armed timers.
    pub fn timers(&self) -> &TimerSet {
        &self.timers
    }

    fn on_settle(&mut self, now: Millis) {
        if self.state.mode() != Mode::UserScrolling {
            return;
        }
        self.state.set_mode(Mode::Idle);
        match self.snap.evaluate(self.state.current_frame()) {
            Some(d) => {
                tracing::debug!(
                    frame = %d.target,
                    distance = d.distance,
                    "settled near boundary"
                );
                self.begin_snap(d.target, SnapReason::Settle, now);
            }
            None => {
                tracing::debug!(frame = self.state.current_frame(), "settled between boundaries");
            }
        }
    }

    fn on_snap_timeout(&mut self) {
        if self.state.mode() != Mode::Snapping {
            return;
        }
        tracing::warn!(
            current = self.state.current_frame(),
            goal = %self.state.target_frame(),
            "snap did not land before the safety timeout; returning to idle"
        );
        self.state.set_mode(Mode::Idle);
    }

    fn begin_snap(&mut self, target: FrameNumber, reason: SnapReason, now: Millis) {
        self.state.set_mode(Mode::Snapping);
        self.state.set_target(target);
        self.timers
            .arm(TimerKind::SnapSafety, now.after(self.cfg.max_snap_ms));
        let offset =
            scroll_offset_for_frame(target, self.state.total_frames(), self.scrollable_height);
        self.outbox.push(ScrollCommand {
            offset,
            frame: target,
            reason,
        });
    }

    fn finish_snap(&mut self) {
        tracing::debug!(frame = %self.state.target_frame(), "snap landed");
        self.state.set_mode(Mode::Idle);
        self.timers.cancel(TimerKind::SnapSafety);
        self.nav_highlight = None;
    }

    fn publish(&mut self) -> Option<FrameUpdate> {
        let frame = self.state.display_frame();
        let section = self.active_section();
        let frame_changed = self.interp.publish(frame).is_some();
        let section_changed = self.published_section != Some(section);
        if !frame_changed && !section_changed {
            return None;
        }
        self.published_section = Some(section);
        Some(FrameUpdate {
            frame,
            section,
            logo: self.logo(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/session.rs"]
mod tests;
