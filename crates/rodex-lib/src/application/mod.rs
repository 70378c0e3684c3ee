//! Application layer modules
//!
//! Organizes the CLI interface, configuration management, and command
//! execution.

pub mod cli;
pub mod commands;
pub mod config;
pub mod env;
pub mod loader;

// Re-export main types for convenience
pub use cli::{Cli, CliConfig, Commands, DiscoveryArgs};
pub use commands::execute_command;
pub use config::AppConfig;
pub use loader::*;
