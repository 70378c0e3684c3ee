use crate::primitives::*;
use indicatif::ProgressStyle;
use std::sync::OnceLock;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Global logger instance - ensures single initialization
static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// HTTP stack crates kept at warn regardless of the requested level
const QUIET_CRATES: &[&str] = &["hyper", "hyper_util", "reqwest", "h2", "rustls", "tokio", "mio", "want"];

/// Logger implementation using tracing with indicatif progress integration
#[derive(Debug)]
pub struct Logger {
    config: LoggerConfig,
}

impl Logger {
    /// Initialize the global logger. `RUST_LOG` overrides the configured level.
    pub fn init(config: LoggerConfig) -> Result<&'static Self, LoggerError> {
        if GLOBAL_LOGGER.get().is_some() {
            return Err(LoggerError::AlreadyInitialized);
        }

        // Discovery spans render as spinners through this layer
        let indicatif_layer = IndicatifLayer::new().with_progress_style(spinner_style(&config)?);

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directives(config.level)));

        let ansi = config.use_ansi();
        let fmt_layer = match (config.output, config.format) {
            (LogOutput::Stderr, LogFormat::Text) => fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_ansi(ansi)
                .compact()
                .boxed(),
            (LogOutput::Stderr, LogFormat::Json) => fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_ansi(false)
                .json()
                .boxed(),
            (LogOutput::Stderr, LogFormat::Yaml) => fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_ansi(ansi)
                .pretty()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Text) => fmt::layer()
                .with_writer(indicatif_layer.get_stdout_writer())
                .with_ansi(ansi)
                .compact()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Json) => fmt::layer()
                .with_writer(indicatif_layer.get_stdout_writer())
                .with_ansi(false)
                .json()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Yaml) => fmt::layer()
                .with_writer(indicatif_layer.get_stdout_writer())
                .with_ansi(ansi)
                .pretty()
                .boxed(),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(indicatif_layer)
            .try_init()
            .map_err(|e| LoggerError::InitializationFailed {
                reason: e.to_string(),
            })?;

        let logger = GLOBAL_LOGGER.get_or_init(|| Logger {
            config: config.clone(),
        });

        tracing::debug!(
            level = ?config.level,
            format = ?config.format,
            output = ?config.output,
            ansi,
            "Logger initialized"
        );

        Ok(logger)
    }

    /// Get reference to the global logger instance
    pub fn global() -> Option<&'static Self> {
        GLOBAL_LOGGER.get()
    }

    pub fn is_initialized() -> bool {
        GLOBAL_LOGGER.get().is_some()
    }

    /// Configuration the global logger was installed with
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }
}

/// Spinner for in-flight discovery spans; ASCII when colour is off
pub fn spinner_style(config: &LoggerConfig) -> Result<ProgressStyle, LoggerError> {
    let (template, ticks): (&str, &[&str]) = if config.use_ansi() {
        (
            "{spinner:.green} {span_name} {span_fields}",
            &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"],
        )
    } else {
        ("{spinner} {span_name} {span_fields}", &["-", "\\", "|", "/", "+"])
    };

    ProgressStyle::with_template(template)
        .map(|style| style.tick_strings(ticks))
        .map_err(|e| LoggerError::InitializationFailed {
            reason: format!("invalid progress template: {}", e),
        })
}

/// Filter used when `RUST_LOG` is unset: rodex crates at `level`, the HTTP
/// stack at warn.
pub fn default_directives(level: LogLevel) -> String {
    let level = level.directive();
    let mut directives = vec![format!("rodex_lib={}", level), format!("rodex={}", level)];
    directives.extend(QUIET_CRATES.iter().map(|krate| format!("{}=warn", krate)));
    directives.push("warn".to_string());
    directives.join(",")
}

/// Create a span that renders as a spinner while a discovery call runs
#[macro_export]
macro_rules! discovery_span {
    ($intent:expr) => {
        tracing::info_span!("discovery", intent = %$intent)
    };
    ($intent:expr, query = $query:expr) => {
        tracing::info_span!("discovery", intent = %$intent, query = %$query)
    };
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
