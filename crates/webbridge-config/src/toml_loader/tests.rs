//! Tests for TOML config loading and creation.

use super::*;
use std::path::Path;
use webbridge_common::ConfigError;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_webbridge_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[window]
title = "Record Demo"

[files]
max_file_size = 1024
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.window.title, "Record Demo");
    assert_eq!(config.files.max_file_size, 1024);
    // Defaults preserved
    assert_eq!(config.window.width, 1400);
    assert_eq!(config.bridge.quit_delay_ms, 1000);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_config_with_invalid_values_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[window]
title = "Too Small"
width = 10
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.window.title, "WebBridge");
    assert_eq!(config.window.width, 1400);
}

#[test]
fn created_default_config_parses() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.window.title, "WebBridge");
}

#[test]
fn default_config_path_ends_with_config_toml() {
    let path = default_config_path().unwrap();
    assert!(path.ends_with("webbridge/config.toml"));
}
