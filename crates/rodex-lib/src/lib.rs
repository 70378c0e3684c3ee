//! # rodex Library
//!
//! Game discovery aggregation over loosely-typed upstream web APIs.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types, errors, and discovery enums
//! - [`logger`] - Structured logging with progress spans
//! - [`networking`] - HTTP client with timeout and session credentials
//! - [`api`] - Upstream client trait with live and mock implementations
//! - [`discovery`] - Extraction, strategy resolution, enrichment, orchestration
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```no_run
//! use rodex_lib::{DiscoveryLimits, LiveUpstreamClient, NetworkingConfig, NetworkingManager};
//! use rodex_lib::{SessionCredentials, SourceOrchestrator};
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let networking = NetworkingManager::new(NetworkingConfig::default())?;
//! let client = LiveUpstreamClient::new(Arc::new(networking));
//! let orchestrator = SourceOrchestrator::new(
//!     Arc::new(client),
//!     SessionCredentials::anonymous(),
//!     DiscoveryLimits::default(),
//! );
//!
//! let outcome = orchestrator.trending(10).await;
//! for game in &outcome.games {
//!     println!("{} ({} playing)", game.name, game.player_count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod discovery;
pub mod logger;
pub mod networking;
pub mod primitives;

// Re-export commonly used types for convenience
pub use api::{Endpoints, LiveUpstreamClient, MockUpstreamClient, UpstreamClient, UpstreamError};
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use discovery::{
    DiscoveryLimits, DiscoveryOutcome, DiscoverySlot, GameEntity, SourceOrchestrator,
};
pub use logger::Logger;
pub use networking::{NetworkingConfig, NetworkingManager, SessionCredentials};
pub use primitives::{
    ColorIntent, ConfigError, DiscoveryIntent, Genre, LogFormat, LogLevel, LogOutput, LoggerError,
};

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;

pub async fn main() -> Result<()> {
    // Load env files, CLI arguments and environment into one config
    let config = CliConfig::load()?;

    execute_command(config).await
}
