use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameNumber(2), FrameNumber(5)).unwrap();
    assert!(!r.contains(FrameNumber(1)));
    assert!(r.contains(FrameNumber(2)));
    assert!(r.contains(FrameNumber(4)));
    assert!(!r.contains(FrameNumber(5)));
    assert_eq!(r.last(), Some(FrameNumber(4)));
    assert!(FrameRange::new(FrameNumber(3), FrameNumber(2)).is_err());
}

#[test]
fn from_position_rounds_and_clamps() {
    assert_eq!(FrameNumber::from_position(204.5, 408), FrameNumber(205));
    assert_eq!(FrameNumber::from_position(204.49, 408), FrameNumber(204));
    assert_eq!(FrameNumber::from_position(-3.0, 408), FrameNumber(1));
    assert_eq!(FrameNumber::from_position(9000.0, 408), FrameNumber(408));
    assert_eq!(FrameNumber::from_position(f64::NAN, 408), FrameNumber(1));
}

#[test]
fn millis_arithmetic_saturates() {
    let t = Millis(100);
    assert_eq!(t.after(50), Millis(150));
    assert_eq!(t.since(Millis(40)), 60);
    assert_eq!(Millis(10).since(t), 0);
}
