mod common;

use social_sync::config::{Config, ConfigError, ConfigStore, ResponseOrdering};
use tempfile::TempDir;

/// Test that Config::default() produces the expected values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
    assert_eq!(config.api.timeout_seconds, 30);
    assert_eq!(config.api.connect_timeout_seconds, 5);
    assert_eq!(config.reconcile.ordering, ResponseOrdering::LastRequest);
    assert_eq!(config.reconcile.broadcast_capacity, 256);
    assert!(config.session.path.is_none());
    assert_eq!(config.logging.level, "info");
}

/// Test that Config::config_path() returns a path ending with the expected filename.
#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("social-sync/config.toml"));
}

#[test]
fn test_validation_passes_for_default() {
    assert!(Config::default().validate().is_ok());
}

/// A missing file is not an error.
#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_valid_toml() {
    let (_dir, path) = common::temp_config("https://api.example.com", "last_response");

    let config = Config::load_from(&path).expect("Should parse valid TOML");

    assert_eq!(config.api.base_url, "https://api.example.com");
    assert_eq!(config.api.timeout_seconds, 5);
    assert_eq!(config.reconcile.ordering, ResponseOrdering::LastResponse);
    // Unset sections keep their defaults.
    assert_eq!(config.reconcile.broadcast_capacity, 256);
    assert!(config.session.path.is_some());
}

#[test]
fn test_parse_invalid_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml [[[").unwrap();

    match Config::load_from(&path) {
        Err(ConfigError::ParseError { path: p, .. }) => assert_eq!(p, path),
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_unknown_ordering_is_parse_error() {
    let (_dir, path) = common::temp_config("https://api.example.com", "first_come");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_validation_fails_non_http_base_url() {
    let mut config = Config::default();
    config.api.base_url = "ftp://files.example.com".to_string();

    match config.validate().unwrap_err() {
        ConfigError::ValidationError { message } => assert!(message.contains("api.base_url")),
        _ => panic!("Expected ValidationError"),
    }
}

#[test]
fn test_validation_fails_connect_exceeds_total() {
    let mut config = Config::default();
    config.api.connect_timeout_seconds = 60;
    assert!(config.validate().is_err());

    config.api.connect_timeout_seconds = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_fails_zero_capacity() {
    let mut config = Config::default();
    config.reconcile.broadcast_capacity = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_roundtrip() {
    let original = Config::default();
    let serialized = toml::to_string(&original).expect("Should serialize");
    let deserialized: Config = toml::from_str(&serialized).expect("Should deserialize");
    assert_eq!(original, deserialized);
}

/// Reload picks up edits; a broken edit keeps the previous config.
#[test]
fn test_store_reload() {
    let (_dir, path) = common::temp_config("https://one.example.com", "last_request");
    let store = ConfigStore::open(path.clone()).unwrap();
    assert_eq!(store.get().api.base_url, "https://one.example.com");

    let edited = std::fs::read_to_string(&path)
        .unwrap()
        .replace("one.example.com", "two.example.com");
    std::fs::write(&path, edited).unwrap();
    store.reload().unwrap();
    assert_eq!(store.get().api.base_url, "https://two.example.com");

    std::fs::write(&path, "[api]\ntimeout_seconds = 0\n").unwrap();
    assert!(store.reload().is_err());
    assert_eq!(store.get().api.base_url, "https://two.example.com");
}
