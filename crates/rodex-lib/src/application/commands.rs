//! Command execution handlers
//!
//! Builds the live client stack from the resolved configuration, runs one
//! discovery call inside a progress span, and renders the outcome.

use crate::api::{LiveUpstreamClient, UpstreamClient};
use crate::application::{CliConfig, Commands};
use crate::discovery::{DiscoveryOutcome, GameEntity, SourceOrchestrator};
use crate::logger::Logger;
use crate::networking::NetworkingManager;
use anyhow::{Context, Result};
use std::io::Write;
use std::sync::Arc;
use tracing::Instrument;

/// Execute the parsed command against the live upstream services
pub async fn execute_command(config: CliConfig) -> Result<()> {
    let CliConfig {
        app_config,
        command,
    } = config;

    let Some(command) = command else {
        println!("rodex - game discovery from the command line");
        println!("Run 'rodex --help' for usage information");
        return Ok(());
    };

    Logger::init(app_config.to_logger_config()).context("Failed to initialize logging")?;

    let networking = NetworkingManager::new(app_config.to_networking_config())
        .context("Failed to create HTTP client")?;
    let client = LiveUpstreamClient::new(Arc::new(networking));
    let orchestrator = SourceOrchestrator::new(
        Arc::new(client),
        app_config.credentials(),
        app_config.limits(),
    );

    let outcome = run_discovery(&orchestrator, &command).await;

    let mut stdout = std::io::stdout().lock();
    render_outcome(&mut stdout, &outcome, command.args().json)?;

    if let Some(error) = &outcome.last_error {
        eprintln!("warning: {}", error);
    }

    Ok(())
}

/// Run the command's discovery call inside a progress span
pub async fn run_discovery<C: UpstreamClient>(
    orchestrator: &SourceOrchestrator<C>,
    command: &Commands,
) -> DiscoveryOutcome {
    let intent = command.intent();
    let query = command.query();
    let span = crate::discovery_span!(intent, query = query);

    orchestrator
        .discover(intent, &query, command.args().limit)
        .instrument(span)
        .await
}

/// Write the outcome's games as text or as a JSON array
pub fn render_outcome<W: Write>(out: &mut W, outcome: &DiscoveryOutcome, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, &outcome.games)
            .context("Failed to serialize games")?;
        writeln!(out)?;
        return Ok(());
    }

    if outcome.games.is_empty() {
        writeln!(out, "No games found")?;
        return Ok(());
    }

    for (position, game) in outcome.games.iter().enumerate() {
        writeln!(out, "{:>3}. {}", position + 1, format_game(game))?;
    }
    Ok(())
}

fn format_game(game: &GameEntity) -> String {
    let creator = if game.creator_name.is_empty() {
        "unknown creator".to_string()
    } else if game.verified {
        format!("{} ✓", game.creator_name)
    } else {
        game.creator_name.clone()
    };

    format!(
        "{} [{}] - {} playing, {:.1}/5, by {}",
        game.name,
        game.id(),
        game.player_count,
        game.rating,
        creator
    )
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
