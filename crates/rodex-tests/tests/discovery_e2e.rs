//! Discovery E2E tests over the live HTTP client
//!
//! Every upstream host is served by one mockito server replaying recorded
//! cassettes, so these exercise URL building, credential headers, lenient
//! decoding and the fallback chains together.

use anyhow::Result;
use rodex_lib::primitives::{DiscoveryIntent, Genre};
use rodex_lib::{DiscoverySlot, SessionCredentials};
use rodex_tests::UpstreamTestServer;
use std::sync::Arc;

const SORT_CONTENT: &str = "/explore-api/v1/get-sort-content";
const GAME_ICONS_URL_111: &str = "https://tr.rbxcdn.com/111/150/150/Image/Png";

fn ids(outcome: &rodex_lib::DiscoveryOutcome) -> Vec<u64> {
    outcome.games.iter().map(|game| game.universe_id).collect()
}

#[tokio::test]
async fn trending_uses_first_candidate_with_games() -> Result<()> {
    let mut server = UpstreamTestServer::start().await;
    server.replay("explore/sorts.json").await?;
    server.replay("explore/sort_up_and_coming.json").await?;
    server.replay("games/details.json").await?;
    server.replay("thumbnails/game_icons.json").await?;
    let spotlight = server.forbid(SORT_CONTENT, "sortId", "spotlight").await;

    let outcome = server
        .orchestrator(SessionCredentials::anonymous())?
        .trending(10)
        .await;

    assert_eq!(outcome.last_error, None);
    assert_eq!(ids(&outcome), vec![111, 222]);

    let rising = &outcome.games[0];
    assert_eq!(rising.name, "Rising Star");
    assert_eq!(rising.place_id, 1110);
    assert_eq!(rising.creator_name, "Nova Studio");
    assert!(rising.verified);
    assert_eq!(rising.player_count, 5000);
    assert_eq!(rising.genre, Genre::Adventure);
    assert_eq!(rising.thumbnail_url.as_deref(), Some(GAME_ICONS_URL_111));

    // null description decodes to empty text
    assert_eq!(outcome.games[1].description, "");

    spotlight.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn trending_advances_past_failing_sort() -> Result<()> {
    let mut server = UpstreamTestServer::start().await;
    server.replay("explore/sorts.json").await?;
    server
        .fail_with_query(SORT_CONTENT, "sortId", "up-and-coming", 503)
        .await;
    server.replay("explore/sort_spotlight.json").await?;
    server.replay("games/details.json").await?;
    server.replay("thumbnails/game_icons.json").await?;
    let top_rated = server.forbid(SORT_CONTENT, "sortId", "top-rated").await;

    let outcome = server
        .orchestrator(SessionCredentials::anonymous())?
        .popular(10)
        .await;

    assert_eq!(outcome.last_error, None);
    assert_eq!(ids(&outcome), vec![444]);
    top_rated.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn top_rated_resolves_named_sort() -> Result<()> {
    let mut server = UpstreamTestServer::start().await;
    server.replay("explore/sorts.json").await?;
    server.replay("explore/sort_top_rated.json").await?;
    server.replay("games/details.json").await?;
    server.replay("thumbnails/game_icons.json").await?;

    let outcome = server
        .orchestrator(SessionCredentials::anonymous())?
        .top_rated(10)
        .await;

    // 777 has no detail record and is dropped
    assert_eq!(ids(&outcome), vec![333, 111]);

    let castle = &outcome.games[0];
    assert_eq!(castle.creator_name, "Siege Works");
    assert_eq!(castle.creator_id, 93);
    assert_eq!(castle.player_count, 0);
    assert_eq!(castle.genre, Genre::Medieval);
    // Blocked thumbnail
    assert_eq!(castle.thumbnail_url, None);
    Ok(())
}

#[tokio::test]
async fn recommended_dedupes_across_groups() -> Result<()> {
    let mut server = UpstreamTestServer::start().await;
    server.replay("discovery/recommendations_home.json").await?;
    server.replay("games/details.json").await?;
    server.replay("thumbnails/game_icons.json").await?;

    let outcome = server
        .orchestrator(SessionCredentials::anonymous())?
        .recommended(10)
        .await;

    assert_eq!(outcome.last_error, None);
    assert_eq!(ids(&outcome), vec![444, 333, 111]);
    Ok(())
}

#[tokio::test]
async fn recommended_respects_limit() -> Result<()> {
    let mut server = UpstreamTestServer::start().await;
    server.replay("discovery/recommendations_home.json").await?;
    server.replay("games/details.json").await?;
    server.replay("thumbnails/game_icons.json").await?;

    let outcome = server
        .orchestrator(SessionCredentials::anonymous())?
        .recommended(2)
        .await;

    assert_eq!(ids(&outcome), vec![444, 333]);
    Ok(())
}

#[tokio::test]
async fn search_with_cookie_uses_omni_search() -> Result<()> {
    let mut server = UpstreamTestServer::start().await;
    let omni = server
        .replay_with_header("search/omni_obby.json", "cookie", ".ROBLOSECURITY=secret")
        .await?;
    server.replay("games/details.json").await?;
    server.replay("thumbnails/game_icons.json").await?;
    let legacy = server.forbid("/games/list-json", "keyword", "obby").await;

    let outcome = server
        .orchestrator(SessionCredentials::new("secret"))?
        .search("  obby ", 10)
        .await;

    assert_eq!(outcome.last_error, None);
    assert_eq!(ids(&outcome), vec![222, 444]);
    assert_eq!(outcome.games[0].name, "Mega Obby");

    omni.assert_async().await;
    legacy.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn search_falls_back_to_legacy_when_omni_fails() -> Result<()> {
    let mut server = UpstreamTestServer::start().await;
    server
        .fail_with_query("/search-api/omni-search", "searchQuery", "tycoon", 500)
        .await;
    server.replay("legacy/search_tycoon.json").await?;
    let lookup = server.replay("universes/place_5002.json").await?;
    server.replay("thumbnails/game_icons.json").await?;
    let place_icons = server.replay("thumbnails/place_icons_5002.json").await?;

    let outcome = server
        .orchestrator(SessionCredentials::new("secret"))?
        .search("tycoon", 10)
        .await;

    assert_eq!(outcome.last_error, None);
    assert_eq!(ids(&outcome), vec![555, 556]);

    let restaurant = &outcome.games[0];
    assert_eq!(restaurant.place_id, 5001);
    assert_eq!(restaurant.name, "Restaurant Tycoon");
    assert_eq!(restaurant.description, "Cook, serve and expand.");
    assert!(restaurant.verified);
    assert!((restaurant.rating - 4.0).abs() < 1e-4);
    assert_eq!(restaurant.genre, Genre::TownAndCity);
    assert_eq!(
        restaurant.thumbnail_url.as_deref(),
        Some("https://tr.rbxcdn.com/555/150/150/Image/Png")
    );

    let lumber = &outcome.games[1];
    assert_eq!(lumber.place_id, 5002);
    assert_eq!(lumber.rating, 0.0);
    assert_eq!(
        lumber.thumbnail_url.as_deref(),
        Some("https://tr.rbxcdn.com/5002/150/150/Image/Png")
    );

    lookup.assert_async().await;
    place_icons.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn anonymous_search_skips_omni() -> Result<()> {
    let mut server = UpstreamTestServer::start().await;
    let omni = server
        .forbid("/search-api/omni-search", "searchQuery", "tycoon")
        .await;
    server.replay("legacy/search_tycoon.json").await?;
    server.replay("universes/place_5002.json").await?;
    server.replay("thumbnails/game_icons.json").await?;
    server.replay("thumbnails/place_icons_5002.json").await?;

    let outcome = server
        .orchestrator(SessionCredentials::anonymous())?
        .search("tycoon", 10)
        .await;

    assert_eq!(outcome.games.len(), 2);
    omni.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn legacy_failure_is_reported() -> Result<()> {
    let mut server = UpstreamTestServer::start().await;
    server.fail("/games/list-json", 502).await;

    let outcome = server
        .orchestrator(SessionCredentials::anonymous())?
        .search("tycoon", 10)
        .await;

    assert!(outcome.games.is_empty());
    assert!(outcome.last_error.is_some());
    Ok(())
}

#[tokio::test]
async fn icon_failure_keeps_games() -> Result<()> {
    let mut server = UpstreamTestServer::start().await;
    server.replay("explore/sorts.json").await?;
    server.replay("explore/sort_up_and_coming.json").await?;
    server.replay("games/details.json").await?;
    server.fail("/v1/games/icons", 500).await;

    let outcome = server
        .orchestrator(SessionCredentials::anonymous())?
        .trending(10)
        .await;

    assert_eq!(outcome.last_error, None);
    assert_eq!(ids(&outcome), vec![111, 222]);
    assert!(outcome.games.iter().all(|game| game.thumbnail_url.is_none()));
    Ok(())
}

#[tokio::test]
async fn detail_failure_surfaces_as_last_error() -> Result<()> {
    let mut server = UpstreamTestServer::start().await;
    server.replay("explore/sorts.json").await?;
    server.replay("explore/sort_up_and_coming.json").await?;
    server.fail("/v1/games", 500).await;
    server.replay("thumbnails/game_icons.json").await?;

    let outcome = server
        .orchestrator(SessionCredentials::anonymous())?
        .trending(10)
        .await;

    assert!(outcome.games.is_empty());
    assert!(outcome.last_error.is_some());
    Ok(())
}

#[tokio::test]
async fn catalog_outage_reports_error_without_content_requests() -> Result<()> {
    let mut server = UpstreamTestServer::start().await;
    server.fail("/explore-api/v1/get-sorts", 503).await;
    let content = server
        .forbid(SORT_CONTENT, "sortId", "up-and-coming")
        .await;

    let orchestrator = server.orchestrator(SessionCredentials::anonymous())?;
    let trending = orchestrator.trending(10).await;
    let top_rated = orchestrator.top_rated(10).await;

    for outcome in [trending, top_rated] {
        assert!(outcome.games.is_empty());
        assert!(outcome.last_error.is_some());
    }
    content.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn slot_returns_result_of_only_call() -> Result<()> {
    let mut server = UpstreamTestServer::start().await;
    server.replay("discovery/recommendations_home.json").await?;
    server.replay("games/details.json").await?;
    server.replay("thumbnails/game_icons.json").await?;

    let orchestrator = Arc::new(server.orchestrator(SessionCredentials::anonymous())?);
    let slot = DiscoverySlot::new();

    let outcome = slot
        .discover(orchestrator, DiscoveryIntent::Recommended, "", 10)
        .await
        .expect("sole call is never superseded");

    assert_eq!(ids(&outcome), vec![444, 333, 111]);
    Ok(())
}
