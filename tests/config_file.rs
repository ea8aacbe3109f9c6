use regplot::{ChartConfig, ChartError, SpringConfig};

#[test]
fn save_then_load_preserves_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.json");

    let mut cfg = ChartConfig::default();
    cfg.tick_count = 6;
    cfg.aspect_ratio = 0.75;
    cfg.spring = SpringConfig::critically_damped(300.0);
    cfg.save_json(&path).unwrap();

    let loaded = ChartConfig::load_json(&path).unwrap();
    assert_eq!(loaded, cfg);
}

#[test]
fn missing_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = ChartConfig::load_json(&path).unwrap_err();
    assert!(matches!(err, ChartError::ConfigIo { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn malformed_file_is_a_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ tick_count: ").unwrap();
    let err = ChartConfig::load_json(&path).unwrap_err();
    assert!(matches!(err, ChartError::ConfigJson(_)));
}
