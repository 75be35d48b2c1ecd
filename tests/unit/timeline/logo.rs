use super::*;

fn dark() -> LogoState {
    LogoState {
        visible: true,
        variant: LogoVariant::Dark,
    }
}

fn light() -> LogoState {
    LogoState {
        visible: true,
        variant: LogoVariant::Light,
    }
}

#[test]
fn thresholds_match_opening_and_closing_frames() {
    let p = LogoPolicy::default();
    assert_eq!(p.logo_at(FrameNumber(1), 204), dark());
    assert_eq!(p.logo_at(FrameNumber(10), 204), dark());
    assert_eq!(p.logo_at(FrameNumber(11), 204), LogoState::HIDDEN);
    assert_eq!(p.logo_at(FrameNumber(194), 204), LogoState::HIDDEN);
    assert_eq!(p.logo_at(FrameNumber(195), 204), light());
    assert_eq!(p.logo_at(FrameNumber(204), 204), light());
    assert_eq!(p.logo_at(FrameNumber(399), 408), light());
}

#[test]
fn zero_tail_never_shows_light() {
    let p = LogoPolicy::Thresholds {
        dark_through: 0,
        light_tail: 0,
    };
    assert_eq!(p.logo_at(FrameNumber(204), 204), LogoState::HIDDEN);
}

#[test]
fn ranges_policy_prefers_dark_on_overlap() {
    let p = LogoPolicy::Ranges {
        dark: [1, 20],
        light: [15, 30],
    };
    p.validate().unwrap();
    assert_eq!(p.logo_at(FrameNumber(16), 30), dark());
    assert_eq!(p.logo_at(FrameNumber(21), 30), light());
    assert_eq!(p.logo_at(FrameNumber(31), 40), LogoState::HIDDEN);
}

#[test]
fn inverted_ranges_are_rejected() {
    let p = LogoPolicy::Ranges {
        dark: [5, 1],
        light: [10, 20],
    };
    assert!(p.validate().is_err());
}

#[test]
fn policy_json_is_tagged() {
    let p: LogoPolicy =
        serde_json::from_str(r#"{ "kind": "ranges", "dark": [1, 3], "light": [8, 9] }"#).unwrap();
    assert_eq!(
        p,
        LogoPolicy::Ranges {
            dark: [1, 3],
            light: [8, 9]
        }
    );
}

#[test]
fn bands_cover_opening_and_closing_runs() {
    let bands = LogoPolicy::default().bands(204);
    assert_eq!(
        bands,
        vec![
            LogoBand {
                variant: LogoVariant::Dark,
                first: FrameNumber(1),
                last: FrameNumber(10),
            },
            LogoBand {
                variant: LogoVariant::Light,
                first: FrameNumber(195),
                last: FrameNumber(204),
            },
        ]
    );
    assert!(LogoPolicy::default().bands(0).is_empty());
}
