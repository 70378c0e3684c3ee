use crate::primitives::{ConfigError, DiscoveryIntent};
use clap::{Args, Parser, Subcommand};

use super::config::AppConfig;
use super::loader::{DEFAULT_ENV_FILES, load_env_files};

/// rodex CLI - game discovery across the platform's web APIs
#[derive(Debug, Clone, Parser)]
#[command(name = "rodex")]
#[command(about = "Search and browse games from the command line")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// rodex commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Fully resolved configuration plus the requested command
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load env files, parse the process arguments, and resolve
    pub fn load() -> Result<Self, ConfigError> {
        load_env_files(DEFAULT_ENV_FILES)?;
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        Ok(Self {
            app_config: AppConfig::resolve(cli.config)?,
            command: cli.command,
        })
    }
}

/// Output options shared by every discovery command
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct DiscoveryArgs {
    /// Maximum number of games to show
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,

    /// Print results as a JSON array
    #[arg(long)]
    pub json: bool,
}

impl Default for DiscoveryArgs {
    fn default() -> Self {
        Self {
            limit: 20,
            json: false,
        }
    }
}

/// Available rodex commands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Search games by keyword
    Search {
        /// Search keywords
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        #[command(flatten)]
        args: DiscoveryArgs,
    },

    /// Currently trending games
    Trending {
        #[command(flatten)]
        args: DiscoveryArgs,
    },

    /// Popular games
    Popular {
        #[command(flatten)]
        args: DiscoveryArgs,
    },

    /// Best rated games
    TopRated {
        #[command(flatten)]
        args: DiscoveryArgs,
    },

    /// Home recommendations (needs a session cookie)
    Recommended {
        #[command(flatten)]
        args: DiscoveryArgs,
    },
}

impl Commands {
    pub fn intent(&self) -> DiscoveryIntent {
        match self {
            Commands::Search { .. } => DiscoveryIntent::Search,
            Commands::Trending { .. } => DiscoveryIntent::Trending,
            Commands::Popular { .. } => DiscoveryIntent::Popular,
            Commands::TopRated { .. } => DiscoveryIntent::TopRated,
            Commands::Recommended { .. } => DiscoveryIntent::Recommended,
        }
    }

    pub fn args(&self) -> &DiscoveryArgs {
        match self {
            Commands::Search { args, .. }
            | Commands::Trending { args }
            | Commands::Popular { args }
            | Commands::TopRated { args }
            | Commands::Recommended { args } => args,
        }
    }

    /// Search keywords joined with spaces; empty for other commands
    pub fn query(&self) -> String {
        match self {
            Commands::Search { query, .. } => query.join(" "),
            _ => String::new(),
        }
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
