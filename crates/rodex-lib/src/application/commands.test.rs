use super::*;
use crate::api::{DetailRecord, MockUpstreamClient};
use crate::application::cli::DiscoveryArgs;
use crate::discovery::DiscoveryLimits;
use crate::networking::SessionCredentials;
use serde_json::json;

fn game(universe_id: u64, name: &str) -> GameEntity {
    GameEntity::new(universe_id, 0, name).unwrap()
}

fn render(outcome: &DiscoveryOutcome, json: bool) -> String {
    let mut buffer = Vec::new();
    render_outcome(&mut buffer, outcome, json).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[test]
fn test_render_text_listing() {
    let mut first = game(1, "Obby King");
    first.player_count = 1200;
    first.rating = 4.0;
    first.creator_name = "Studio".to_string();
    first.verified = true;
    let second = game(2, "Quiet Place");

    let outcome = DiscoveryOutcome {
        games: vec![first, second],
        last_error: None,
    };
    let text = render(&outcome, false);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "  1. Obby King [1] - 1200 playing, 4.0/5, by Studio ✓");
    assert_eq!(lines[1], "  2. Quiet Place [2] - 0 playing, 0.0/5, by unknown creator");
}

#[test]
fn test_render_empty_text() {
    assert_eq!(render(&DiscoveryOutcome::default(), false), "No games found\n");
}

#[test]
fn test_render_json_array() {
    let outcome = DiscoveryOutcome {
        games: vec![game(7, "Seven")],
        last_error: Some("ignored in json".to_string()),
    };

    let value: serde_json::Value = serde_json::from_str(&render(&outcome, true)).unwrap();
    assert_eq!(value[0]["universeId"], 7);
    assert_eq!(value[0]["name"], "Seven");
    assert_eq!(value.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_run_discovery_uses_command_limit() {
    let items: Vec<_> = (1..=5)
        .map(|id| json!({"contentType": "Game", "contentId": id}))
        .collect();
    let client = MockUpstreamClient::new()
        .with_recommendations(Ok(json!({ "items": items })))
        .await
        .with_details(Ok((1..=5)
            .map(|id| DetailRecord {
                id,
                name: Some(format!("Game {}", id)),
                ..Default::default()
            })
            .collect()))
        .await;
    let orchestrator = SourceOrchestrator::new(
        Arc::new(client),
        SessionCredentials::anonymous(),
        DiscoveryLimits::default(),
    );
    let command = Commands::Recommended {
        args: DiscoveryArgs {
            limit: 2,
            json: false,
        },
    };

    let outcome = run_discovery(&orchestrator, &command).await;

    assert_eq!(outcome.games.len(), 2);
    assert_eq!(outcome.games[0].name, "Game 1");
}

#[tokio::test]
async fn test_run_discovery_passes_search_query() {
    let client = MockUpstreamClient::new()
        .with_legacy_search("tower defense", Ok(Vec::new()))
        .await;
    let orchestrator = SourceOrchestrator::new(
        Arc::new(client),
        SessionCredentials::anonymous(),
        DiscoveryLimits::default(),
    );
    let command = Commands::Search {
        query: vec!["tower".to_string(), "defense".to_string()],
        args: DiscoveryArgs::default(),
    };

    let outcome = run_discovery(&orchestrator, &command).await;

    assert!(outcome.games.is_empty());
    assert!(outcome.last_error.is_none());
    assert_eq!(
        orchestrator.client().calls().await,
        vec!["legacy:tower defense".to_string()]
    );
}
