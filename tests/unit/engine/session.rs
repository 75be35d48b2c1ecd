use super::*;
use crate::manifest::model::Preset;

const HEIGHT: f64 = 4_070.0;

fn site() -> ScrollSession {
    ScrollSession::new(&Preset::Extended.manifest(), EngineConfig::default()).unwrap()
}

fn at_frame(frame: u32) -> ScrollGeometry {
    ScrollGeometry::new(scroll_offset_for_frame(FrameNumber(frame), 408, HEIGHT), HEIGHT)
}

/// Scroll to `frame` on every tick until the view has caught up; returns the time of the last
/// scroll notification.
fn scroll_and_hold(s: &mut ScrollSession, now: &mut Millis, frame: u32) -> Millis {
    let mut last = *now;
    for _ in 0..80 {
        s.on_scroll(at_frame(frame), *now);
        s.tick(*now);
        last = *now;
        *now = now.after(16);
    }
    assert_eq!(s.state().mode(), Mode::UserScrolling);
    assert_eq!(s.state().current_frame(), f64::from(frame));
    last
}

fn tick_until_idle(s: &mut ScrollSession, now: &mut Millis) {
    for _ in 0..500 {
        s.tick(*now);
        *now = now.after(16);
        if s.state().mode() == Mode::Idle && s.pending_timers() == 0 {
            return;
        }
    }
    panic!("session never went idle: {:?}", s.state());
}

#[test]
fn scroll_sets_target_on_next_tick_only() {
    let mut s = site();
    s.on_scroll(ScrollGeometry::new(HEIGHT / 2.0, HEIGHT), Millis(0));
    assert_eq!(s.state().mode(), Mode::UserScrolling);
    assert_eq!(s.state().target_frame(), FrameNumber(1));

    s.tick(Millis(0));
    assert_eq!(s.state().target_frame(), FrameNumber(204));
    assert_eq!(s.pending_timers(), 1);
    assert!(s.timers().is_armed(TimerKind::Settle));
}

#[test]
fn burst_of_notifications_maps_once_with_latest_sample() {
    let mut s = site();
    s.on_scroll(at_frame(50), Millis(0));
    s.on_scroll(at_frame(80), Millis(3));
    s.on_scroll(at_frame(120), Millis(9));
    s.tick(Millis(10));
    assert_eq!(s.state().target_frame(), FrameNumber(120));
    assert_eq!(s.pending.coalesced(), 2);
    assert!(!s.pending.is_pending());
}

#[test]
fn settle_near_boundary_snaps_and_lands() {
    let mut s = site();
    let mut now = Millis(0);
    let last = scroll_and_hold(&mut s, &mut now, 95);
    assert!(s.take_scroll_commands().is_empty());

    while now < last.after(150) {
        s.tick(now);
        now = now.after(16);
    }
    s.tick(now);
    assert_eq!(s.state().mode(), Mode::Snapping);
    assert_eq!(s.state().target_frame(), FrameNumber(102));

    let cmds = s.take_scroll_commands();
    assert_eq!(cmds.len(), 1);
    assert_eq!(cmds[0].frame, FrameNumber(102));
    assert_eq!(cmds[0].reason, SnapReason::Settle);
    assert!((cmds[0].offset - 1_010.0).abs() < 1e-6);

    tick_until_idle(&mut s, &mut now);
    assert_eq!(s.state().current_frame(), 102.0);
    assert_eq!(s.active_section(), SectionId(1));
}

#[test]
fn settle_far_from_boundaries_stays_put() {
    let mut s = site();
    let mut now = Millis(0);
    let last = scroll_and_hold(&mut s, &mut now, 60);

    while now <= last.after(200) {
        s.tick(now);
        now = now.after(16);
    }
    assert_eq!(s.state().mode(), Mode::Idle);
    assert_eq!(s.state().target_frame(), FrameNumber(60));
    assert_eq!(s.state().display_frame(), FrameNumber(60));
    assert!(s.take_scroll_commands().is_empty());
    assert_eq!(s.pending_timers(), 0);
}

#[test]
fn scroll_is_ignored_while_snapping() {
    let mut s = site();
    s.set_scrollable_height(HEIGHT);
    s.navigate_to(SectionId(2), Millis(0)).unwrap();
    s.on_scroll(at_frame(10), Millis(5));
    s.tick(Millis(16));
    assert_eq!(s.state().mode(), Mode::Snapping);
    assert_eq!(s.state().target_frame(), FrameNumber(204));
    assert!(!s.timers().is_armed(TimerKind::Settle));
}

#[test]
fn navigate_highlights_immediately_and_converges() {
    let mut s = site();
    s.set_scrollable_height(HEIGHT);
    let mut now = Millis(0);
    s.tick(now);
    now = now.after(16);

    s.navigate_to(SectionId(4), now).unwrap();
    assert_eq!(s.active_section(), SectionId(4));
    assert_eq!(s.state().display_frame(), FrameNumber(1));
    assert_eq!(s.state().target_frame(), FrameNumber(408));

    let cmds = s.take_scroll_commands();
    assert_eq!(cmds.len(), 1);
    assert_eq!(cmds[0].reason, SnapReason::Navigation);
    assert_eq!(cmds[0].offset, HEIGHT);

    let update = s.tick(now).unwrap();
    assert_eq!(update.section, SectionId(4));

    tick_until_idle(&mut s, &mut now);
    assert_eq!(s.state().display_frame(), FrameNumber(408));
    assert_eq!(s.active_section(), SectionId(4));
}

#[test]
fn repeated_navigation_does_not_stack_timers() {
    let mut once = site();
    let mut twice = site();
    let mut now = Millis(0);

    once.navigate_to(SectionId(4), now).unwrap();
    twice.navigate_to(SectionId(4), now).unwrap();
    twice.navigate_to(SectionId(4), now).unwrap();
    assert_eq!(once.pending_timers(), 1);
    assert_eq!(twice.pending_timers(), 1);
    assert_eq!(twice.take_scroll_commands().len(), 1);

    for _ in 0..10 {
        once.tick(now);
        twice.tick(now);
        twice.navigate_to(SectionId(4), now).unwrap();
        assert_eq!(twice.pending_timers(), 1);
        now = now.after(16);
    }
    assert!(twice.take_scroll_commands().is_empty());

    let mut now_a = now;
    let mut now_b = now;
    tick_until_idle(&mut once, &mut now_a);
    tick_until_idle(&mut twice, &mut now_b);
    assert_eq!(once.state().current_frame(), twice.state().current_frame());
    assert_eq!(twice.state().current_frame(), 408.0);
}

#[test]
fn navigation_cancels_pending_settle() {
    let mut s = site();
    s.on_scroll(at_frame(90), Millis(0));
    s.navigate_to(SectionId(3), Millis(4)).unwrap();
    assert!(!s.timers().is_armed(TimerKind::Settle));
    assert!(s.timers().is_armed(TimerKind::SnapSafety));
    s.tick(Millis(16));
    assert_eq!(s.state().target_frame(), FrameNumber(306));
}

#[test]
fn navigating_elsewhere_mid_snap_retargets() {
    let mut s = site();
    s.navigate_to(SectionId(4), Millis(0)).unwrap();
    s.tick(Millis(0));
    s.navigate_to(SectionId(1), Millis(16)).unwrap();
    assert_eq!(s.active_section(), SectionId(1));
    assert_eq!(s.state().target_frame(), FrameNumber(102));
    assert_eq!(s.pending_timers(), 1);
    assert_eq!(s.take_scroll_commands().len(), 2);
}

#[test]
fn unknown_section_is_rejected_without_side_effects() {
    let mut s = site();
    assert!(s.navigate_to(SectionId(9), Millis(0)).is_err());
    assert_eq!(s.state().mode(), Mode::Idle);
    assert_eq!(s.pending_timers(), 0);
    assert!(s.take_scroll_commands().is_empty());
}

fn stalled_snap_session() -> ScrollSession {
    let mut cfg = EngineConfig::default();
    cfg.max_snap_ms = 50;
    cfg.smoothing.snapping = 0.01;
    ScrollSession::new(&Preset::Extended.manifest(), cfg).unwrap()
}

#[test]
fn safety_timeout_unwedges_a_stalled_snap() {
    let mut s = stalled_snap_session();

    s.navigate_to(SectionId(4), Millis(0)).unwrap();
    s.tick(Millis(0));
    s.tick(Millis(32));
    assert_eq!(s.state().mode(), Mode::Snapping);

    s.tick(Millis(64));
    assert_eq!(s.state().mode(), Mode::Idle);
    assert_eq!(s.pending_timers(), 0);
    // The requested section stays highlighted while the view is still on the first section.
    assert!(s.state().display_frame().0 < 100);
    assert_eq!(s.active_section(), SectionId(4));
    // The view keeps easing toward the boundary.
    assert_eq!(s.state().target_frame(), FrameNumber(408));

    let mut now = Millis(80);
    for _ in 0..500 {
        s.tick(now);
        now = now.after(16);
        if s.state().current_frame() == 408.0 {
            break;
        }
    }
    assert_eq!(s.state().current_frame(), 408.0);
    assert_eq!(s.nav_highlight, None);
    assert_eq!(s.active_section(), SectionId(4));
}

#[test]
fn scrolling_after_a_timed_out_snap_drops_the_highlight() {
    let mut s = stalled_snap_session();
    s.navigate_to(SectionId(4), Millis(0)).unwrap();
    s.tick(Millis(0));
    s.tick(Millis(64));
    assert_eq!(s.active_section(), SectionId(4));

    s.on_scroll(at_frame(10), Millis(70));
    assert_eq!(s.active_section(), SectionId(0));
    let update = s.tick(Millis(80)).unwrap();
    assert_eq!(update.section, SectionId(0));
}

#[test]
fn navigation_right_after_first_scroll_uses_its_height() {
    let mut s = site();
    s.on_scroll(ScrollGeometry::new(0.0, HEIGHT), Millis(0));
    s.navigate_to(SectionId(4), Millis(1)).unwrap();

    let cmds = s.take_scroll_commands();
    assert_eq!(cmds.len(), 1);
    assert_eq!(cmds[0].frame, FrameNumber(408));
    assert_eq!(cmds[0].offset, HEIGHT);
}

#[test]
fn ticks_inside_min_interval_are_skipped() {
    let mut s = site();
    assert!(s.tick(Millis(100)).is_some());
    s.on_scroll(at_frame(200), Millis(101));
    assert!(s.tick(Millis(110)).is_none());
    assert_eq!(s.state().target_frame(), FrameNumber(1));
    assert!(s.tick(Millis(116)).is_some());
    assert_eq!(s.state().target_frame(), FrameNumber(200));
}

#[test]
fn zero_height_scroll_targets_first_frame() {
    let mut s = site();
    s.on_scroll(ScrollGeometry::new(300.0, 0.0), Millis(0));
    s.tick(Millis(0));
    assert_eq!(s.state().target_frame(), FrameNumber(1));
}

#[test]
fn updates_are_published_only_on_change() {
    let mut s = site();
    let first = s.tick(Millis(0)).unwrap();
    assert_eq!(first.frame, FrameNumber(1));
    assert_eq!(first.section, SectionId(0));
    assert!(first.logo.visible);
    assert!(s.tick(Millis(16)).is_none());
    assert!(s.tick(Millis(32)).is_none());
}
