use popwatch::core::{AmbientConfig, Cue, RuleConfig};
use popwatch::{Config, Metric};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.poll_interval_ms, 1000);
    assert_eq!(config.game_path_marker, "/join/");
    assert!(!config.test_mode);
    assert_eq!(config.ambient, AmbientConfig::default());
}

#[test]
fn test_config_roundtrip_through_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.test_mode = true;
    config.rules.push(RuleConfig::new(
        "quarter",
        Metric::Percentage,
        25.0,
        vec![Cue::RandomClip],
    ));
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert!(loaded.test_mode);
    assert_eq!(loaded.rules, config.rules);
}

#[test]
fn test_empty_file_gives_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "   \n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.rules.len(), 3);
}

#[test]
fn test_invalid_files_are_reported() {
    let temp_dir = TempDir::new().unwrap();

    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(Config::load_from(&path).is_err());

    let path = temp_dir.path().join("dupes.json");
    fs::write(
        &path,
        r#"{"rules": [
            {"id": "x", "metric": "current", "value": 1},
            {"id": "x", "metric": "current", "value": 2}
        ]}"#,
    )
    .unwrap();
    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Duplicate rule id: x"));

    assert!(Config::load_from(&temp_dir.path().join("missing.json")).is_err());
}

#[test]
fn test_load_or_default_prefers_explicit_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{"rules": []}"#).unwrap();

    let config = Config::load_or_default(Some(&path)).unwrap();
    assert!(config.rules.is_empty());
}
