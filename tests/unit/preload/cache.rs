use std::sync::Arc;

use super::*;
use crate::foundation::error::ReelError;

fn img(tag: u8) -> FrameImage {
    FrameImage {
        width: 1,
        height: 1,
        rgba8: Arc::new(vec![tag, tag, tag, 255]),
    }
}

#[test]
fn progress_counts_failures_as_attempts() {
    let mut c = FrameCache::new(4);
    assert_eq!(c.progress().ratio(), 0.0);
    assert!(c.record(FrameNumber(1), Ok(img(1))));
    assert!(c.record(FrameNumber(2), Err(ReelError::asset("404"))));
    assert_eq!(c.progress().ratio(), 0.5);
    assert_eq!(c.progress().failed, 1);
    assert!(c.record(FrameNumber(3), Ok(img(3))));
    assert!(c.record(FrameNumber(4), Err(ReelError::asset("404"))));
    assert!(c.progress().is_complete());
    assert_eq!(c.progress().ratio(), 1.0);
}

#[test]
fn duplicates_and_out_of_range_are_ignored() {
    let mut c = FrameCache::new(2);
    assert!(c.record(FrameNumber(1), Ok(img(1))));
    assert!(!c.record(FrameNumber(1), Ok(img(9))));
    assert!(!c.record(FrameNumber(0), Ok(img(9))));
    assert!(!c.record(FrameNumber(3), Ok(img(9))));
    assert_eq!(c.progress().attempted, 1);
    assert_eq!(c.get(FrameNumber(1)), Some(&img(1)));
}

#[test]
fn display_falls_back_to_nearest_loaded_frame() {
    let mut c = FrameCache::new(10);
    assert!(c.display_frame(FrameNumber(5)).is_none());

    c.record(FrameNumber(2), Ok(img(2)));
    c.record(FrameNumber(8), Ok(img(8)));
    c.record(FrameNumber(5), Err(ReelError::asset("broken")));
    assert_eq!(c.slot(FrameNumber(5)), Some(&FrameSlot::Placeholder));

    assert_eq!(c.display_frame(FrameNumber(5)).unwrap().0, FrameNumber(2));
    assert_eq!(c.display_frame(FrameNumber(6)).unwrap().0, FrameNumber(8));
    assert_eq!(c.display_frame(FrameNumber(8)).unwrap().0, FrameNumber(8));
    assert_eq!(c.display_frame(FrameNumber(10)).unwrap().0, FrameNumber(8));
    assert_eq!(c.display_frame(FrameNumber(1)).unwrap().0, FrameNumber(2));
}

#[test]
fn empty_sequence_is_trivially_complete() {
    let c = FrameCache::new(0);
    assert!(c.progress().is_complete());
    assert_eq!(c.progress().ratio(), 1.0);
    assert!(c.display_frame(FrameNumber(1)).is_none());
}
