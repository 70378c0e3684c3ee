use super::*;
use crate::api::{DetailRecord, MockUpstreamClient, ThumbnailRecord};
use serde_json::{Value, json};

fn games_document(ids: &[u64]) -> Value {
    let items: Vec<Value> = ids
        .iter()
        .map(|id| json!({"contentType": "Game", "contentId": id.to_string()}))
        .collect();
    json!({"sorts": [{"games": items}]})
}

fn detail(id: u64) -> DetailRecord {
    DetailRecord {
        id,
        root_place_id: Some((id * 10) as i64),
        name: Some(format!("Game {}", id)),
        playing: Some(100),
        ..Default::default()
    }
}

fn thumb(id: u64) -> ThumbnailRecord {
    ThumbnailRecord {
        target_id: id,
        state: Some("Completed".to_string()),
        image_url: Some(format!("https://img/{}.png", id)),
    }
}

fn legacy(place_id: u64, universe_id: Option<u64>, name: &str) -> LegacyGameRecord {
    LegacyGameRecord {
        place_id: Some(place_id),
        universe_id,
        name: Some(name.to_string()),
        ..Default::default()
    }
}

fn orchestrator(client: MockUpstreamClient) -> SourceOrchestrator<MockUpstreamClient> {
    SourceOrchestrator::new(
        Arc::new(client),
        SessionCredentials::anonymous(),
        DiscoveryLimits::default(),
    )
}

fn authenticated(client: MockUpstreamClient) -> SourceOrchestrator<MockUpstreamClient> {
    SourceOrchestrator::new(
        Arc::new(client),
        SessionCredentials::new("cookie-value"),
        DiscoveryLimits::default(),
    )
}

fn ids(outcome: &DiscoveryOutcome) -> Vec<u64> {
    outcome.games.iter().map(GameEntity::id).collect()
}

#[tokio::test]
async fn test_trending_stops_at_first_non_empty_sort() {
    let client = MockUpstreamClient::new()
        .with_catalog(Ok(json!({"sorts": [
            {"id": "T1", "name": "Top Trending"},
            {"id": "U1", "name": "Up and Coming"}
        ]})))
        .await
        .with_sort_content("T1", Ok(games_document(&[111, 222])))
        .await
        .with_sort_content("U1", Ok(games_document(&[333])))
        .await
        .with_details(Ok(vec![detail(111), detail(222), detail(333)]))
        .await;
    let orchestrator = orchestrator(client);

    let outcome = orchestrator.trending(20).await;

    assert_eq!(ids(&outcome), vec![111, 222]);
    assert!(outcome.last_error.is_none());
    let calls = orchestrator.client().calls().await;
    assert!(calls.contains(&"sort:T1".to_string()));
    assert!(!calls.contains(&"sort:U1".to_string()));
}

#[tokio::test]
async fn test_trending_advances_past_failed_and_empty_sorts() {
    let client = MockUpstreamClient::new()
        .with_catalog(Ok(json!({"sorts": [
            {"id": "top-trending", "name": "Legacy"},
            {"id": "T1", "name": "Top Trending"},
            {"id": "F1", "name": "Friends"}
        ]})))
        .await
        .with_sort_content("top-trending", Err("gone".to_string()))
        .await
        .with_raw_sort_content("T1", b"<html>")
        .await
        .with_sort_content("F1", Ok(games_document(&[7])))
        .await
        .with_details(Ok(vec![detail(7)]))
        .await;
    let orchestrator = orchestrator(client);

    let outcome = orchestrator.trending(20).await;

    assert_eq!(ids(&outcome), vec![7]);
    let calls = orchestrator.client().calls().await;
    let sorts: Vec<&String> = calls.iter().filter(|c| c.starts_with("sort:")).collect();
    assert_eq!(sorts, vec!["sort:top-trending", "sort:T1", "sort:F1"]);
}

#[tokio::test]
async fn test_trending_without_games_is_empty_not_error() {
    let client = MockUpstreamClient::new()
        .with_catalog(Ok(json!({"sorts": [{"id": "A", "name": "Alpha"}]})))
        .await
        .with_sort_content("A", Ok(json!({"sorts": []})))
        .await;

    let outcome = orchestrator(client).trending(20).await;

    assert!(outcome.games.is_empty());
    assert!(outcome.last_error.is_none());
}

#[tokio::test]
async fn test_catalog_failure_surfaces_last_error() {
    let client = MockUpstreamClient::new()
        .with_catalog(Err("catalog down".to_string()))
        .await;
    let orchestrator = orchestrator(client);

    let outcome = orchestrator.popular(20).await;
    assert!(outcome.games.is_empty());
    assert!(outcome.last_error.unwrap().contains("catalog down"));

    let outcome = orchestrator.top_rated(20).await;
    assert!(outcome.last_error.unwrap().contains("catalog down"));
}

#[tokio::test]
async fn test_popular_prefers_known_sort_ids() {
    let client = MockUpstreamClient::new()
        .with_catalog(Ok(json!([
            {"id": "P1", "name": "Popular Now"},
            {"id": "most-engaging", "name": "Engaging"}
        ])))
        .await
        .with_sort_content("most-engaging", Ok(games_document(&[5])))
        .await
        .with_sort_content("P1", Ok(games_document(&[6])))
        .await
        .with_details(Ok(vec![detail(5), detail(6)]))
        .await;

    let outcome = orchestrator(client).popular(20).await;

    assert_eq!(ids(&outcome), vec![5]);
}

#[tokio::test]
async fn test_top_rated_uses_best_pattern_match() {
    let client = MockUpstreamClient::new()
        .with_catalog(Ok(json!({"sorts": [
            {"id": "F1", "name": "Friends"},
            {"id": "R1", "name": "Highest Rated"}
        ]})))
        .await
        .with_sort_content("R1", Ok(games_document(&[42])))
        .await
        .with_details(Ok(vec![detail(42)]))
        .await;
    let orchestrator = orchestrator(client);

    let outcome = orchestrator.top_rated(20).await;

    assert_eq!(ids(&outcome), vec![42]);
    assert!(!orchestrator.client().calls().await.contains(&"sort:F1".to_string()));
}

#[tokio::test]
async fn test_top_rated_falls_back_to_first_sort() {
    let client = MockUpstreamClient::new()
        .with_catalog(Ok(json!({"sorts": [
            {"id": "F1", "name": "Friends"},
            {"id": "S1", "name": "Spotlight"}
        ]})))
        .await
        .with_sort_content("F1", Ok(games_document(&[1])))
        .await
        .with_details(Ok(vec![detail(1)]))
        .await;

    let outcome = orchestrator(client).top_rated(20).await;

    assert_eq!(ids(&outcome), vec![1]);
}

#[tokio::test]
async fn test_top_rated_empty_catalog() {
    let client = MockUpstreamClient::new()
        .with_catalog(Ok(json!({"sorts": []})))
        .await;

    let outcome = orchestrator(client).top_rated(20).await;

    assert_eq!(outcome, DiscoveryOutcome::default());
}

#[tokio::test]
async fn test_recommended_caps_then_truncates() {
    let all: Vec<u64> = (1..=80).collect();
    let client = MockUpstreamClient::new()
        .with_recommendations(Ok(games_document(&all)))
        .await
        .with_details(Ok(all.iter().map(|id| detail(*id)).collect()))
        .await;
    let orchestrator = orchestrator(client);

    let outcome = orchestrator.recommended(5).await;

    assert_eq!(ids(&outcome), vec![1, 2, 3, 4, 5]);
    let calls = orchestrator.client().calls().await;
    assert!(calls.contains(&"details:1,2,3,4,5".to_string()));
}

#[tokio::test]
async fn test_recommended_cap_exceeds_enrichment_batch() {
    let all: Vec<u64> = (1..=80).collect();
    let client = MockUpstreamClient::new()
        .with_recommendations(Ok(games_document(&all)))
        .await
        .with_details(Ok(all.iter().map(|id| detail(*id)).collect()))
        .await;
    let orchestrator = orchestrator(client);

    let outcome = orchestrator.recommended(100).await;

    assert_eq!(outcome.last_error, None);
    assert_eq!(ids(&outcome), (1..=60).collect::<Vec<u64>>());

    // 60 ids go out as a full batch of 50 followed by a batch of 10
    let calls = orchestrator.client().calls().await;
    let detail_calls: Vec<&String> = calls.iter().filter(|c| c.starts_with("details:")).collect();
    assert_eq!(detail_calls.len(), 2);
    assert!(detail_calls[1].starts_with("details:51,52"));
    assert_eq!(calls.iter().filter(|c| c.starts_with("icons:")).count(), 2);
}

#[tokio::test]
async fn test_recommended_failure_surfaces_last_error() {
    let client = MockUpstreamClient::new()
        .with_recommendations(Err("unauthorized".to_string()))
        .await;

    let outcome = orchestrator(client).recommended(20).await;

    assert!(outcome.games.is_empty());
    assert!(outcome.last_error.unwrap().contains("unauthorized"));
}

#[tokio::test]
async fn test_detail_failure_reported_icon_failure_ignored() {
    let client = MockUpstreamClient::new()
        .with_recommendations(Ok(games_document(&[1, 2])))
        .await
        .with_details(Err("details down".to_string()))
        .await;

    let outcome = orchestrator(client).recommended(20).await;

    assert!(outcome.games.is_empty());
    assert!(outcome.last_error.unwrap().contains("details down"));

    let client = MockUpstreamClient::new()
        .with_recommendations(Ok(games_document(&[1, 2])))
        .await
        .with_details(Ok(vec![detail(1), detail(2)]))
        .await
        .with_game_icons(Err("icons down".to_string()))
        .await;

    let outcome = orchestrator(client).recommended(20).await;

    assert_eq!(ids(&outcome), vec![1, 2]);
    assert!(outcome.games.iter().all(|g| g.thumbnail_url.is_none()));
    assert!(outcome.last_error.is_none());
}

#[tokio::test]
async fn test_omni_search_used_with_cookie() {
    let client = MockUpstreamClient::new()
        .with_omni_search("obby", Ok(games_document(&[9, 3])))
        .await
        .with_details(Ok(vec![detail(3), detail(9)]))
        .await
        .with_game_icons(Ok(vec![thumb(9)]))
        .await;
    let orchestrator = authenticated(client);

    let outcome = orchestrator.search("obby", 20).await;

    assert_eq!(ids(&outcome), vec![9, 3]);
    assert_eq!(outcome.games[0].thumbnail_url.as_deref(), Some("https://img/9.png"));
    assert!(!orchestrator.client().calls().await.contains(&"legacy:obby".to_string()));
}

#[tokio::test]
async fn test_omni_failure_falls_back_to_legacy() {
    let client = MockUpstreamClient::new()
        .with_omni_search("obby", Err("401".to_string()))
        .await
        .with_legacy_search("obby", Ok(vec![legacy(10, Some(1), "Legacy Obby")]))
        .await;
    let orchestrator = authenticated(client);

    let outcome = orchestrator.search("obby", 20).await;

    assert_eq!(ids(&outcome), vec![1]);
    assert!(outcome.last_error.is_none());
    let calls = orchestrator.client().calls().await;
    assert_eq!(calls.first().map(String::as_str), Some("omni:obby"));
    assert!(calls.contains(&"legacy:obby".to_string()));
}

#[tokio::test]
async fn test_empty_omni_result_falls_back_to_legacy() {
    let client = MockUpstreamClient::new()
        .with_omni_search("obby", Ok(json!({"searchResults": []})))
        .await
        .with_legacy_search("obby", Ok(vec![legacy(10, Some(1), "Legacy Obby")]))
        .await;

    let outcome = authenticated(client).search("obby", 20).await;

    assert_eq!(ids(&outcome), vec![1]);
}

#[tokio::test]
async fn test_anonymous_search_skips_omni() {
    let client = MockUpstreamClient::new()
        .with_legacy_search("obby", Ok(vec![legacy(10, Some(1), "Legacy Obby")]))
        .await;
    let orchestrator = orchestrator(client);

    orchestrator.search("obby", 20).await;

    let calls = orchestrator.client().calls().await;
    assert!(calls.iter().all(|c| !c.starts_with("omni:")));
}

#[tokio::test]
async fn test_legacy_failure_surfaces_last_error() {
    let client = MockUpstreamClient::new()
        .with_legacy_search("obby", Err("legacy down".to_string()))
        .await;

    let outcome = orchestrator(client).search("obby", 20).await;

    assert!(outcome.games.is_empty());
    assert!(outcome.last_error.unwrap().contains("legacy down"));
}

#[tokio::test]
async fn test_legacy_record_shaping() {
    let record = LegacyGameRecord {
        creator_id: Some(-4),
        creator_name: Some("Builder".to_string()),
        creator_has_verified_badge: Some(true),
        player_count: Some(1234),
        total_up_votes: Some(80),
        total_down_votes: Some(20),
        genre: Some("Town and City".to_string()),
        description: Some("Build".to_string()),
        ..legacy(10, Some(1), "Bloxburg")
    };
    let client = MockUpstreamClient::new()
        .with_legacy_search("blox", Ok(vec![record]))
        .await;

    let outcome = orchestrator(client).search("blox", 20).await;
    let game = &outcome.games[0];

    assert_eq!(game.name, "Bloxburg");
    assert_eq!(game.creator_id, 0);
    assert_eq!(game.creator_name, "Builder");
    assert!(game.verified);
    assert_eq!(game.player_count, 1234);
    assert!((game.rating - 4.0).abs() < f32::EPSILON);
    assert_eq!(game.genre, Genre::TownAndCity);
    assert_eq!(game.description, "Build");
}

#[tokio::test]
async fn test_legacy_universe_lookup_and_icon_fallbacks() {
    let client = MockUpstreamClient::new()
        .with_legacy_search(
            "tycoon",
            Ok(vec![
                legacy(10, None, "Needs Lookup"),
                legacy(20, Some(2), "Has Universe"),
                legacy(30, None, "Lookup Fails"),
            ]),
        )
        .await
        .with_universe_lookup(10, Ok(1))
        .await
        .with_universe_lookup(30, Err("lookup down".to_string()))
        .await
        .with_game_icons(Ok(vec![thumb(1)]))
        .await
        .with_place_icons(Ok(vec![thumb(20)]))
        .await;
    let orchestrator = orchestrator(client);

    let outcome = orchestrator.search("tycoon", 20).await;

    assert_eq!(ids(&outcome), vec![1, 2, 30]);
    assert_eq!(outcome.games[0].thumbnail_url.as_deref(), Some("https://img/1.png"));
    assert_eq!(outcome.games[1].thumbnail_url.as_deref(), Some("https://img/20.png"));
    assert!(outcome.games[2].thumbnail_url.is_none());

    let calls = orchestrator.client().calls().await;
    assert!(calls.contains(&"universe:10".to_string()));
    assert!(!calls.contains(&"universe:20".to_string()));
    assert!(calls.contains(&"icons:1,2".to_string()));
    assert!(calls.contains(&"place-icons:20".to_string()));
    assert!(calls.contains(&"place-icons:30".to_string()));
}

#[tokio::test]
async fn test_legacy_lookups_are_bounded() {
    let records: Vec<LegacyGameRecord> = (1..=15)
        .map(|place| legacy(place, None, "Place Only"))
        .collect();
    let client = MockUpstreamClient::new()
        .with_legacy_search("many", Ok(records))
        .await;
    let orchestrator = orchestrator(client);

    let outcome = orchestrator.search("many", 20).await;

    assert_eq!(outcome.games.len(), 15);
    let calls = orchestrator.client().calls().await;
    assert_eq!(calls.iter().filter(|c| c.starts_with("universe:")).count(), 10);
    assert_eq!(calls.iter().filter(|c| c.starts_with("place-icons:")).count(), 10);
}

#[tokio::test]
async fn test_zero_limit_and_blank_query_make_no_calls() {
    let orchestrator = authenticated(MockUpstreamClient::new());

    assert_eq!(orchestrator.search("   ", 20).await, DiscoveryOutcome::default());
    assert_eq!(orchestrator.search("obby", 0).await, DiscoveryOutcome::default());
    assert_eq!(orchestrator.trending(0).await, DiscoveryOutcome::default());
    assert_eq!(orchestrator.top_rated(0).await, DiscoveryOutcome::default());
    assert_eq!(orchestrator.recommended(0).await, DiscoveryOutcome::default());
    assert!(orchestrator.client().calls().await.is_empty());
}

#[tokio::test]
async fn test_discover_dispatches_by_intent() {
    let client = MockUpstreamClient::new()
        .with_recommendations(Ok(games_document(&[4])))
        .await
        .with_details(Ok(vec![detail(4)]))
        .await;
    let orchestrator = orchestrator(client);

    let outcome = orchestrator
        .discover(DiscoveryIntent::Recommended, "ignored", 20)
        .await;

    assert_eq!(ids(&outcome), vec![4]);
    assert_eq!(
        orchestrator.client().calls().await.first().map(String::as_str),
        Some("recommendations")
    );
}

#[test]
fn test_default_limits() {
    let limits = DiscoveryLimits::default();
    assert_eq!(limits.search_cap, 40);
    assert_eq!(limits.recommendation_cap, 60);
    assert_eq!(limits.enrichment_batch_max, 50);
    assert_eq!(limits.fallback_lookup_max, 10);
}
