//! Tests for loading and saving the config file.

use hover_tip::config::HoverTipConfig;
use hover_tip::tooltip::{FlipMode, PlacementConfig, TooltipOptions};
use hover_tip::Error;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");
    let config = HoverTipConfig::load_from(&path);

    assert_eq!(config.defaults, TooltipOptions::default());
    assert_eq!(config.placement.widget.bottom_margin, 50);
    assert_eq!(config.path(), path.as_path());
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut config = HoverTipConfig::load_from(&path);
    config.defaults.bg = "white".into();
    config.defaults.time_ms = 0;
    config.placement.scroll.flip = FlipMode::PerAxis;
    config.save().unwrap();

    let loaded = HoverTipConfig::load_from(&path);
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"defaults": {"bg": "pink"}, "placement": {"pointer": {"offset": 20}}}"#).unwrap();

    let config = HoverTipConfig::load_from(&path);
    assert_eq!(config.defaults.bg, "pink");
    assert_eq!(config.defaults.text, "Default");
    assert_eq!(config.defaults.time_ms, 2000);
    assert_eq!(config.placement.pointer.offset, 20);
    assert_eq!(config.placement.scroll.margin, 50);
    assert_eq!(config.placement.scroll.flip, FlipMode::Corner);
}

#[test]
fn test_invalid_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    for contents in ["{ not json", r#"{"defaults": {"text": ""}}"#, r#"{"defaults": {"font": ["arial", 0, "bold"]}}"#] {
        std::fs::write(&path, contents).unwrap();
        let config = HoverTipConfig::load_from(&path);
        assert_eq!(config.defaults, TooltipOptions::default(), "contents: {}", contents);
    }
}

#[test]
fn test_parse_reports_errors() {
    assert!(HoverTipConfig::parse("42").is_err());
    assert!(HoverTipConfig::parse(r#"{"placement": {"scroll": {"flip": "sideways"}}}"#).is_err());
    assert!(HoverTipConfig::parse(r#"{"placement": {"scroll": {"flip": "per-axis"}}}"#).is_ok());
}

#[test]
fn test_out_of_range_placement_is_rejected() {
    for contents in [
        r#"{"placement": {"widget": {"bottom_margin": 2147483647}}}"#,
        r#"{"placement": {"widget": {"gap": -1}}}"#,
        r#"{"placement": {"pointer": {"offset": 10001}}}"#,
        r#"{"placement": {"scroll": {"margin": -50}}}"#,
    ] {
        let err = HoverTipConfig::parse(contents).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)), "contents: {}", contents);
    }
    assert!(HoverTipConfig::parse(r#"{"placement": {"scroll": {"gap": 10000}}}"#).is_ok());
}

#[test]
fn test_out_of_range_placement_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"placement": {"widget": {"bottom_margin": 2147483647}}}"#).unwrap();

    let config = HoverTipConfig::load_from(&path);
    assert_eq!(config.placement, PlacementConfig::default());
}
