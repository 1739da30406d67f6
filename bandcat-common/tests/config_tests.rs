//! Tests for configuration loading and resolution priority
//!
//! Tests that manipulate BANDCAT_CONFIG are marked with #[serial] so they run
//! sequentially, not in parallel.

use std::env;
use std::io::Write;
use std::path::PathBuf;

use bandcat_common::config::{
    load_toml_config, locate_config_file, ConfigOverrides, ServiceConfig, StoreKind, TomlConfig,
    CONFIG_ENV_VAR,
};
use bandcat_common::Error;
use serial_test::serial;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_toml_config() {
    let file = write_config(
        r#"
        host = "0.0.0.0"
        port = 9000
        store = "sqlite"
        database_path = "/tmp/bands.db"
        seed = false
        log_level = "debug"
        "#,
    );

    let config = load_toml_config(Some(file.path())).unwrap();
    assert_eq!(config.host.as_deref(), Some("0.0.0.0"));
    assert_eq!(config.port, Some(9000));
    assert_eq!(config.store, Some(StoreKind::Sqlite));
    assert_eq!(config.database_path, Some(PathBuf::from("/tmp/bands.db")));
    assert_eq!(config.seed, Some(false));
    assert_eq!(config.log_level.as_deref(), Some("debug"));
}

#[test]
fn test_partial_toml_config_falls_back_to_defaults() {
    let file = write_config("port = 9001\n");

    let toml = load_toml_config(Some(file.path())).unwrap();
    let config = ServiceConfig::resolve(ConfigOverrides::default(), toml);

    assert_eq!(config.port, 9001);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.store, StoreKind::Memory);
    assert!(config.seed);
}

#[test]
fn test_missing_config_file_is_not_fatal() {
    let config = load_toml_config(Some(PathBuf::from("/nonexistent/bandcat/config.toml").as_path()))
        .unwrap();
    assert!(config.port.is_none());
}

#[test]
fn test_malformed_config_is_error() {
    let file = write_config("port = \"not a number\"\n");

    let result = load_toml_config(Some(file.path()));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_unknown_store_in_toml_is_error() {
    let file = write_config("store = \"postgres\"\n");

    assert!(load_toml_config(Some(file.path())).is_err());
}

#[test]
#[serial]
fn test_cli_path_beats_env_var() {
    env::set_var(CONFIG_ENV_VAR, "/from/env.toml");
    let cli = PathBuf::from("/from/cli.toml");

    let located = locate_config_file(Some(cli.as_path()));
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(located, Some(cli));
}

#[test]
#[serial]
fn test_env_var_locates_config() {
    env::set_var(CONFIG_ENV_VAR, "/from/env.toml");

    let located = locate_config_file(None);
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(located, Some(PathBuf::from("/from/env.toml")));
}

#[test]
fn test_overrides_beat_file_values() {
    let file = TomlConfig {
        host: Some("0.0.0.0".to_string()),
        seed: Some(true),
        ..TomlConfig::default()
    };
    let overrides = ConfigOverrides {
        host: Some("localhost".to_string()),
        seed: Some(false),
        ..ConfigOverrides::default()
    };

    let config = ServiceConfig::resolve(overrides, file);
    assert_eq!(config.host, "localhost");
    assert!(!config.seed);
}
