//! Configuration loading
//!
//! Coordinates the configuration sources. Environment files are loaded
//! before the command line is parsed so their values reach clap's `env`
//! fallbacks.

use crate::primitives::ConfigError;
use std::path::Path;
use tracing::debug;

use super::{config::AppConfig, env::EnvironmentConfig};

/// Environment files read from the working directory, most specific first
pub const DEFAULT_ENV_FILES: &[&str] = &[".env.local", ".env"];

/// Load each env file that exists. Existing process variables are never
/// overridden, so earlier files win over later ones.
pub fn load_env_files<P: AsRef<Path>>(files: &[P]) -> Result<usize, ConfigError> {
    let mut loaded = 0;
    for file in files {
        let file = file.as_ref();
        match dotenvy::from_path(file) {
            Ok(()) => {
                debug!("Loaded environment file {}", file.display());
                loaded += 1;
            }
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(ConfigError::EnvFileError {
                    file: file.display().to_string(),
                    source: e,
                });
            }
        }
    }
    Ok(loaded)
}

impl AppConfig {
    /// Resolve the final config: defaults -> env vars -> CLI, then validate.
    ///
    /// `cli` is the parsed command line, which already carries env-var
    /// fallbacks for rodex's own variables.
    pub fn resolve(cli: AppConfig) -> Result<Self, ConfigError> {
        let env_config = EnvironmentConfig::load()?;
        Self::resolve_with_env(cli, &env_config)
    }

    /// [`AppConfig::resolve`] with explicit standard environment variables
    pub fn resolve_with_env(
        cli: AppConfig,
        env_config: &EnvironmentConfig,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.color = env_config.apply_color_config(config.color);

        let config = config.merge_with(cli);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
