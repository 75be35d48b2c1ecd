use crate::foundation::core::Millis;

/// The cancellable timers the engine uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum TimerKind {
    /// Fires once scroll input has been quiet for the settle delay.
    Settle,
    /// Ends a snap that failed to land within the maximum snap duration.
    SnapSafety,
}

impl TimerKind {
    const ALL: [Self; 2] = [Self::Settle, Self::SnapSafety];

    fn slot(self) -> usize {
        match self {
            Self::Settle => 0,
            Self::SnapSafety => 1,
        }
    }
}

/// At most one deadline per [`TimerKind`]; re-arming a kind replaces its deadline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimerSet {
    deadlines: [Option<Millis>; 2],
}

impl TimerSet {
    /// Arm `kind` to fire at `deadline`, replacing a previous deadline.
    pub fn arm(&mut self, kind: TimerKind, deadline: Millis) {
        self.deadlines[kind.slot()] = Some(deadline);
    }

    /// Cancel `kind`; returns whether it was armed.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.deadlines[kind.slot()].take().is_some()
    }

    /// Deadline of `kind`, if armed.
    pub fn deadline(&self, kind: TimerKind) -> Option<Millis> {
        self.deadlines[kind.slot()]
    }

    /// `true` when `kind` is armed.
    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.deadline(kind).is_some()
    }

    /// Number of armed timers.
    pub fn len(&self) -> usize {
        self.deadlines.iter().flatten().count()
    }

    /// `true` when no timer is armed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Disarm and return every timer due at `now`, earliest deadline first.
    pub fn take_due(&mut self, now: Millis) -> Vec<TimerKind> {
        let mut due: Vec<(Millis, TimerKind)> = TimerKind::ALL
            .into_iter()
            .filter_map(|k| self.deadline(k).filter(|d| *d <= now).map(|d| (d, k)))
            .collect();
        due.sort_by_key(|(d, _)| *d);
        for (_, k) in &due {
            self.cancel(*k);
        }
        due.into_iter().map(|(_, k)| k).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/timers.rs"]
mod tests;
