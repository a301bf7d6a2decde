//! Configuration system tests
//!
//! Tests for config paths and input config parsing.

use keybinds::config::InputConfig;
use keybinds::config_paths;
use keybinds::RepeatOptions;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_returns_some() {
    assert!(config_paths::config_dir().is_some());
}

#[test]
fn test_config_dir_contains_app_name() {
    let dir = config_paths::config_dir().unwrap();
    assert!(dir.to_string_lossy().contains("keybinds"));
}

#[test]
fn test_config_file_ends_with_yaml() {
    let path = config_paths::config_file().unwrap();
    assert!(path.to_string_lossy().ends_with("config.yaml"));
}

#[test]
fn test_binds_file_ends_with_json() {
    let path = config_paths::binds_file().unwrap();
    assert!(path.to_string_lossy().ends_with("binds.json"));
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    let config = config_paths::config_dir().unwrap();
    let logs = config_paths::logs_dir().unwrap();
    assert!(logs.starts_with(&config));
}

// ========================================================================
// Input Config Tests
// ========================================================================

#[test]
fn test_default_repeat() {
    let config = InputConfig::default();
    assert_eq!(
        config.repeat,
        RepeatOptions {
            enabled: true,
            rate: 300,
            delay: 500
        }
    );
}

#[test]
fn test_default_store_path_in_config_dir() {
    let config = InputConfig::default();
    let config_dir = config_paths::config_dir().unwrap();
    assert!(config.store_path().unwrap().starts_with(config_dir));
}

#[test]
fn test_yaml_round_trip() {
    let config = InputConfig {
        repeat: RepeatOptions {
            enabled: false,
            rate: 120,
            delay: 400,
        },
        store_path: Some("/tmp/my-binds.json".into()),
    };
    let yaml = serde_yaml::to_string(&config).unwrap();
    assert_eq!(InputConfig::parse(&yaml).unwrap(), config);
}

#[test]
fn test_default_omits_store_path() {
    let yaml = serde_yaml::to_string(&InputConfig::default()).unwrap();
    assert!(!yaml.contains("store_path"));
}

#[test]
fn test_save_to_and_load_from() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keybinds").join("config.yaml");
    let config = InputConfig {
        repeat: RepeatOptions {
            enabled: true,
            rate: 60,
            delay: 200,
        },
        store_path: None,
    };

    config.save_to(&path).unwrap();
    assert_eq!(InputConfig::load_from(&path), config);
}

#[test]
fn test_load_from_corrupt_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "repeat: [1, 2").unwrap();
    assert_eq!(InputConfig::load_from(&path), InputConfig::default());
    assert_eq!(
        InputConfig::load_from(&dir.path().join("missing.yaml")),
        InputConfig::default()
    );
}
