use super::*;

#[test]
fn defaults_are_valid() {
    let cfg = EngineConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.settle_delay_ms, 150);
    assert_eq!(cfg.smoothing.scrolling, 0.2);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg: EngineConfig =
        serde_json::from_str(r#"{ "snap_threshold_frames": 20, "smoothing": { "idle": 0.5 } }"#)
            .unwrap();
    assert_eq!(cfg.snap_threshold_frames, 20.0);
    assert_eq!(cfg.smoothing.idle, 0.5);
    assert_eq!(cfg.smoothing.snapping, 0.12);
    assert_eq!(cfg.max_snap_ms, DEFAULT_MAX_SNAP_MS);
}

#[test]
fn out_of_range_factors_are_rejected() {
    let mut cfg = EngineConfig::default();
    cfg.smoothing.snapping = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.smoothing.idle = 1.5;
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.snap_epsilon = 0.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn from_path_reports_bad_json() {
    let dir = std::path::PathBuf::from("target").join("unit_engine_config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bad.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = EngineConfig::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}
