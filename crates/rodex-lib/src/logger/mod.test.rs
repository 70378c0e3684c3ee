use super::*;

#[test]
fn test_default_directives_scope_level_to_rodex() {
    let directives = default_directives(LogLevel::Debug);
    assert!(directives.starts_with("rodex_lib=debug,rodex=debug,"));
    assert!(directives.contains("reqwest=warn"));
    assert!(directives.contains("hyper_util=warn"));
    assert!(directives.ends_with(",warn"));
}

#[test]
fn test_default_directives_parse() {
    for level in [
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ] {
        assert!(EnvFilter::try_new(default_directives(level)).is_ok());
    }
}

#[test]
fn test_logger_global_consistent_with_initialized() {
    // Other tests in the process may have installed the logger
    assert_eq!(Logger::is_initialized(), Logger::global().is_some());
}

#[test]
fn test_second_init_is_rejected() {
    let config = LoggerConfig {
        level: LogLevel::Error,
        format: LogFormat::Text,
        output: LogOutput::Stderr,
        color: ColorIntent::Never,
    };

    // The first call may fail if a subscriber already exists; the second
    // must never succeed.
    let _ = Logger::init(config.clone());
    assert!(Logger::init(config).is_err());
}

#[test]
fn test_discovery_span_macro() {
    let span = crate::discovery_span!(DiscoveryIntent::Trending);
    let _entered = span.enter();
    let span = crate::discovery_span!(DiscoveryIntent::Search, query = "obby");
    let _entered = span.enter();
}

#[test]
fn test_spinner_style_builds_for_both_modes() {
    for color in [ColorIntent::Always, ColorIntent::Never] {
        let config = LoggerConfig {
            level: LogLevel::Info,
            format: LogFormat::Text,
            output: LogOutput::Stderr,
            color,
        };
        assert!(spinner_style(&config).is_ok());
    }
}
