use super::*;

fn state_with(total: u32, current: f64, target: u32, mode: Mode) -> AnimationState {
    let mut s = AnimationState::new(total);
    s.current_frame = current;
    s.set_target(FrameNumber(target));
    s.set_mode(mode);
    s
}

#[test]
fn factors_follow_mode() {
    let i = Interpolator::new(&EngineConfig::default());
    assert_eq!(i.factor(Mode::UserScrolling), 0.2);
    assert_eq!(i.factor(Mode::Snapping), 0.12);
    assert_eq!(i.factor(Mode::Idle), 0.08);
}

#[test]
fn approach_is_monotonic_without_overshoot() {
    for (start, target) in [(1.0, 408u32), (408.0, 1), (150.25, 204)] {
        for mode in [Mode::Idle, Mode::UserScrolling, Mode::Snapping] {
            let mut i = Interpolator::new(&EngineConfig::default());
            let mut s = state_with(408, start, target, mode);
            let t = f64::from(target);
            let above = start > t;

            let mut prev = s.distance_to_target();
            let mut now = Millis(0);
            let mut arrived = false;
            for _ in 0..1_000 {
                let out = i.step(&mut s, now);
                now = now.after(16);
                if above {
                    assert!(s.current_frame() >= t);
                } else {
                    assert!(s.current_frame() <= t);
                }
                let d = s.distance_to_target();
                if out.arrived {
                    assert_eq!(d, 0.0);
                    arrived = true;
                    break;
                }
                assert!(d < prev, "{mode:?}: distance {d} did not shrink from {prev}");
                prev = d;
            }
            assert!(arrived, "{mode:?} from {start} never reached {target}");
            assert_eq!(s.display_frame(), FrameNumber(target));
        }
    }
}

#[test]
fn one_step_uses_the_base_factor() {
    let mut i = Interpolator::new(&EngineConfig::default());
    let mut s = state_with(408, 1.0, 101, Mode::UserScrolling);
    i.step(&mut s, Millis(0));
    assert!((s.current_frame() - 21.0).abs() < 1e-9);

    i.step(&mut s, Millis(16));
    assert!((s.current_frame() - 37.0).abs() < 1e-9);
}

#[test]
fn longer_gaps_compound_the_factor() {
    let mut i = Interpolator::new(&EngineConfig::default());
    let mut s = state_with(408, 1.0, 101, Mode::Idle);
    i.step(&mut s, Millis(0));
    let after_first = s.current_frame();
    i.step(&mut s, Millis(32));
    let expected_factor = 1.0 - 0.92f64.powi(2);
    let expected = after_first + (101.0 - after_first) * expected_factor;
    assert!((s.current_frame() - expected).abs() < 1e-9);
}

#[test]
fn steps_are_gated_by_min_interval() {
    let mut i = Interpolator::new(&EngineConfig::default());
    assert!(i.is_due(Millis(0)));
    let mut s = state_with(408, 1.0, 50, Mode::Idle);
    i.step(&mut s, Millis(1_000));
    assert!(!i.is_due(Millis(1_010)));
    assert!(i.is_due(Millis(1_016)));
}

#[test]
fn publish_suppresses_repeats() {
    let mut i = Interpolator::new(&EngineConfig::default());
    assert_eq!(i.publish(FrameNumber(3)), Some(FrameNumber(3)));
    assert_eq!(i.publish(FrameNumber(3)), None);
    assert_eq!(i.publish(FrameNumber(4)), Some(FrameNumber(4)));
    assert_eq!(i.last_published(), Some(FrameNumber(4)));
}
