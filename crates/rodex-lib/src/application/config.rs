//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::discovery::DiscoveryLimits;
use crate::networking::{NetworkingConfig, SessionCredentials};
use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;

/// Default configuration values
pub mod defaults {
    pub const LOG_LEVEL: u8 = 0; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
    pub const NET_TIMEOUT: u64 = 30;
    pub const SEARCH_CAP: usize = 40;
    pub const RECOMMENDATION_CAP: usize = 60;
    pub const ENRICHMENT_BATCH_MAX: usize = 50;
    pub const FALLBACK_LOOKUP_MAX: usize = 10;
}

/// Default value functions for configuration fields
mod default_fns {
    use super::defaults;
    use crate::primitives::{ColorIntent, LogFormat, LogOutput};

    pub fn log_level() -> u8 {
        defaults::LOG_LEVEL
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn color() -> ColorIntent {
        ColorIntent::Auto
    }

    pub fn net_timeout() -> u64 {
        defaults::NET_TIMEOUT
    }

    pub fn search_cap() -> usize {
        defaults::SEARCH_CAP
    }

    pub fn recommendation_cap() -> usize {
        defaults::RECOMMENDATION_CAP
    }

    pub fn enrichment_batch_max() -> usize {
        defaults::ENRICHMENT_BATCH_MAX
    }

    pub fn fallback_lookup_max() -> usize {
        defaults::FALLBACK_LOOKUP_MAX
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Upstream request timeout in seconds
    #[arg(short, long, env = "RODEX_NET_TIMEOUT", default_value_t = defaults::NET_TIMEOUT)]
    #[serde(default = "default_fns::net_timeout")]
    pub net_timeout: u64,

    /// Session cookie for authenticated endpoints
    #[arg(long, env = "RODEX_COOKIE", hide = true, hide_env_values = true)]
    #[serde(default)]
    pub cookie: Option<String>,

    /// CSRF token sent alongside the session cookie
    #[arg(long, env = "RODEX_CSRF_TOKEN", hide = true, hide_env_values = true)]
    #[serde(default)]
    pub csrf_token: Option<String>,

    /// Maximum identifiers taken from a search or sort document
    #[arg(long, env = "RODEX_SEARCH_CAP", default_value_t = defaults::SEARCH_CAP)]
    #[serde(default = "default_fns::search_cap")]
    pub search_cap: usize,

    /// Maximum identifiers taken from the recommendation document
    #[arg(long, env = "RODEX_RECOMMENDATION_CAP", default_value_t = defaults::RECOMMENDATION_CAP)]
    #[serde(default = "default_fns::recommendation_cap")]
    pub recommendation_cap: usize,

    /// Identifiers per detail/icon batch request
    #[arg(long, env = "RODEX_ENRICHMENT_BATCH_MAX", default_value_t = defaults::ENRICHMENT_BATCH_MAX)]
    #[serde(default = "default_fns::enrichment_batch_max")]
    pub enrichment_batch_max: usize,

    /// Per-item lookups allowed in the legacy search path
    #[arg(long, env = "RODEX_FALLBACK_LOOKUP_MAX", default_value_t = defaults::FALLBACK_LOOKUP_MAX)]
    #[serde(default = "default_fns::fallback_lookup_max")]
    pub fallback_lookup_max: usize,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "RODEX_LOG_LEVEL", default_value_t = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log format (text, json, yaml)
    #[arg(long, env = "RODEX_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "RODEX_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "RODEX_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            net_timeout: default_fns::net_timeout(),
            cookie: None,
            csrf_token: None,
            search_cap: default_fns::search_cap(),
            recommendation_cap: default_fns::recommendation_cap(),
            enrichment_batch_max: default_fns::enrichment_batch_max(),
            fallback_lookup_max: default_fns::fallback_lookup_max(),
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
        }
    }
}

impl AppConfig {
    pub fn to_logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            color: self.color,
        }
    }

    pub fn to_networking_config(&self) -> NetworkingConfig {
        NetworkingConfig {
            timeout_seconds: self.net_timeout,
            trace_requests: LogLevel::from_verbosity(self.log_level) == LogLevel::Trace,
        }
    }

    pub fn limits(&self) -> DiscoveryLimits {
        DiscoveryLimits {
            search_cap: self.search_cap,
            recommendation_cap: self.recommendation_cap,
            enrichment_batch_max: self.enrichment_batch_max,
            fallback_lookup_max: self.fallback_lookup_max,
        }
    }

    /// Session credentials; anonymous without a cookie
    pub fn credentials(&self) -> SessionCredentials {
        let credentials = match &self.cookie {
            Some(cookie) => SessionCredentials::new(cookie.as_str()),
            None => SessionCredentials::anonymous(),
        };
        match &self.csrf_token {
            Some(token) => credentials.with_csrf_token(token.as_str()),
            None => credentials,
        }
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        if other.cookie.is_some() {
            self.cookie = other.cookie;
        }
        if other.csrf_token.is_some() {
            self.csrf_token = other.csrf_token;
        }

        if other.net_timeout != default_fns::net_timeout() {
            self.net_timeout = other.net_timeout;
        }
        if other.search_cap != default_fns::search_cap() {
            self.search_cap = other.search_cap;
        }
        if other.recommendation_cap != default_fns::recommendation_cap() {
            self.recommendation_cap = other.recommendation_cap;
        }
        if other.enrichment_batch_max != default_fns::enrichment_batch_max() {
            self.enrichment_batch_max = other.enrichment_batch_max;
        }
        if other.fallback_lookup_max != default_fns::fallback_lookup_max() {
            self.fallback_lookup_max = other.fallback_lookup_max;
        }
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }

        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, ColorIntent::Auto) {
            self.color = other.color;
        }

        self
    }

    /// Validate the final configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.net_timeout == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "net-timeout must be at least 1 second".to_string(),
            });
        }

        let caps = [
            ("search-cap", self.search_cap),
            ("recommendation-cap", self.recommendation_cap),
            ("enrichment-batch-max", self.enrichment_batch_max),
            ("fallback-lookup-max", self.fallback_lookup_max),
        ];
        if let Some((name, _)) = caps.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ValidationFailed {
                reason: format!("{} must be greater than zero", name),
            });
        }

        if self.log_level > 4 {
            return Err(ConfigError::ValidationFailed {
                reason: format!("log-level {} is out of range 0-4", self.log_level),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
