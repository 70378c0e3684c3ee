use super::*;
use crate::primitives::ColorIntent;
use std::io::Write;

#[test]
fn test_config_loading_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.log_level, 0);
    assert_eq!(config.net_timeout, 30);
    assert_eq!(config.color, ColorIntent::Auto);
}

#[test]
fn test_config_merging() {
    let base = AppConfig::default();
    let override_config = AppConfig {
        log_level: 4,
        color: ColorIntent::Always,
        search_cap: 16,
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.log_level, 4);
    assert_eq!(merged.color, ColorIntent::Always);
    assert_eq!(merged.search_cap, 16);
    assert_eq!(merged.net_timeout, 30);
}

#[test]
fn test_environment_color_applies_under_default_cli() {
    let env_config = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };

    let config = AppConfig::resolve_with_env(AppConfig::default(), &env_config).unwrap();
    assert_eq!(config.color, ColorIntent::Never);
}

#[test]
fn test_explicit_cli_color_wins_over_environment() {
    let env_config = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };
    let cli = AppConfig {
        color: ColorIntent::Always,
        ..AppConfig::default()
    };

    let config = AppConfig::resolve_with_env(cli, &env_config).unwrap();
    assert_eq!(config.color, ColorIntent::Always);
}

#[test]
fn test_resolve_validates() {
    let cli = AppConfig {
        net_timeout: 0,
        ..AppConfig::default()
    };
    assert!(AppConfig::resolve_with_env(cli, &EnvironmentConfig::default()).is_err());
}

#[test]
fn test_missing_env_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join(".env.missing");
    assert_eq!(load_env_files(&[missing]).unwrap(), 0);
}

#[test]
fn test_env_file_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env.test");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "RODEX_LOADER_TEST_MARKER=loaded").unwrap();

    assert_eq!(load_env_files(&[&path]).unwrap(), 1);
    assert_eq!(
        std::env::var("RODEX_LOADER_TEST_MARKER").as_deref(),
        Ok("loaded")
    );
}

#[test]
fn test_malformed_env_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env.bad");
    std::fs::write(&path, "RODEX_BAD='unterminated\n").unwrap();

    let err = load_env_files(&[&path]).unwrap_err();
    assert!(err.to_string().contains(".env.bad"));
}
