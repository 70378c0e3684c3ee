use super::*;

#[test]
fn test_default_config_is_valid() {
    let config = AppConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.limits(), DiscoveryLimits::default());
}

#[test]
fn test_zero_timeout_rejected() {
    let config = AppConfig {
        net_timeout: 0,
        ..AppConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("net-timeout"));
}

#[test]
fn test_zero_caps_rejected() {
    let config = AppConfig {
        enrichment_batch_max: 0,
        ..AppConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("enrichment-batch-max"));

    let config = AppConfig {
        search_cap: 0,
        ..AppConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_log_level_out_of_range_rejected() {
    let config = AppConfig {
        log_level: 9,
        ..AppConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_logger_config_mapping() {
    let config = AppConfig {
        log_level: 3,
        log_format: LogFormat::Json,
        log_output: LogOutput::Stdout,
        color: ColorIntent::Never,
        ..AppConfig::default()
    };

    let logger = config.to_logger_config();
    assert_eq!(logger.level, LogLevel::Debug);
    assert_eq!(logger.format, LogFormat::Json);
    assert_eq!(logger.output, LogOutput::Stdout);
    assert_eq!(logger.color, ColorIntent::Never);
}

#[test]
fn test_networking_config_mapping() {
    let config = AppConfig {
        net_timeout: 5,
        ..AppConfig::default()
    };
    assert_eq!(config.to_networking_config().timeout_seconds, 5);
    assert!(!config.to_networking_config().trace_requests);
}

#[test]
fn test_trace_log_level_enables_request_tracing() {
    let config = AppConfig {
        log_level: 4,
        ..AppConfig::default()
    };
    assert!(config.to_networking_config().trace_requests);

    let config = AppConfig {
        log_level: 3,
        ..AppConfig::default()
    };
    assert!(!config.to_networking_config().trace_requests);
}

#[test]
fn test_credentials_from_config() {
    assert!(!AppConfig::default().credentials().is_authenticated());

    let config = AppConfig {
        cookie: Some("secret".to_string()),
        csrf_token: Some("token".to_string()),
        ..AppConfig::default()
    };
    let credentials = config.credentials();
    assert!(credentials.is_authenticated());
    assert_eq!(credentials.csrf_token(), Some("token"));

    let blank = AppConfig {
        cookie: Some("   ".to_string()),
        ..AppConfig::default()
    };
    assert!(!blank.credentials().is_authenticated());
}

#[test]
fn test_deserialize_fills_defaults() {
    let config: AppConfig = serde_json::from_str(r#"{"search_cap": 12}"#).unwrap();
    assert_eq!(config.search_cap, 12);
    assert_eq!(config.net_timeout, defaults::NET_TIMEOUT);
    assert_eq!(config.color, ColorIntent::Auto);
}
