use super::*;

#[test]
fn rearming_replaces_instead_of_stacking() {
    let mut t = TimerSet::default();
    t.arm(TimerKind::Settle, Millis(150));
    t.arm(TimerKind::Settle, Millis(300));
    assert_eq!(t.len(), 1);
    assert_eq!(t.deadline(TimerKind::Settle), Some(Millis(300)));
    assert!(t.take_due(Millis(200)).is_empty());
    assert_eq!(t.take_due(Millis(300)), vec![TimerKind::Settle]);
    assert!(t.is_empty());
}

#[test]
fn due_timers_fire_in_deadline_order() {
    let mut t = TimerSet::default();
    t.arm(TimerKind::Settle, Millis(50));
    t.arm(TimerKind::SnapSafety, Millis(20));
    assert_eq!(
        t.take_due(Millis(100)),
        vec![TimerKind::SnapSafety, TimerKind::Settle]
    );
}

#[test]
fn cancel_reports_whether_armed() {
    let mut t = TimerSet::default();
    assert!(!t.cancel(TimerKind::SnapSafety));
    t.arm(TimerKind::SnapSafety, Millis(1));
    assert!(t.is_armed(TimerKind::SnapSafety));
    assert!(t.cancel(TimerKind::SnapSafety));
    assert!(!t.is_armed(TimerKind::SnapSafety));
}
