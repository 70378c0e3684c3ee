// Tests for the upstream API client

use super::*;
use crate::networking::NetworkingConfig;
use mockito::{Matcher, Server};
use serde_json::json;

fn live_client(server: &Server) -> LiveUpstreamClient {
    let networking = Arc::new(NetworkingManager::new(NetworkingConfig::default()).unwrap());
    LiveUpstreamClient::with_endpoints(networking, Endpoints::single_host(&server.url()))
}

// ============================================================================
// Live Client Tests
// ============================================================================

#[test]
fn test_single_host_trims_trailing_slash() {
    let endpoints = Endpoints::single_host("http://127.0.0.1:9000/");
    assert_eq!(endpoints.apis, "http://127.0.0.1:9000");
    assert_eq!(endpoints.www, "http://127.0.0.1:9000");
}

#[tokio::test]
async fn test_live_details_joins_ids_and_decodes() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/games")
        .match_query(Matcher::UrlEncoded(
            "universeIds".to_string(),
            "111,222".to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"data": [
                {"id": 111, "rootPlaceId": 1, "name": "One", "playing": 5},
                {"id": 222, "rootPlaceId": 2, "name": "Two"}
            ]})
            .to_string(),
        )
        .create_async()
        .await;

    let client = live_client(&server);
    let details = client
        .fetch_game_details(&[111, 222], &SessionCredentials::anonymous())
        .await
        .unwrap();

    assert_eq!(details.len(), 2);
    assert_eq!(details[0].name.as_deref(), Some("One"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_live_details_empty_batch_skips_request() {
    let server = Server::new_async().await;
    let client = live_client(&server);

    let details = client
        .fetch_game_details(&[], &SessionCredentials::anonymous())
        .await
        .unwrap();
    assert!(details.is_empty());
}

#[tokio::test]
async fn test_live_sort_content_returns_raw_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/explore-api/v1/get-sort-content")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("sortId".to_string(), "top-trending".to_string()),
            Matcher::UrlEncoded("sessionId".to_string(), "session-1".to_string()),
        ]))
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let client = live_client(&server);
    let body = client
        .fetch_sort_content("top-trending", "session-1", &SessionCredentials::anonymous())
        .await
        .unwrap();

    assert_eq!(body, b"not json at all");
}

#[tokio::test]
async fn test_live_legacy_search_rejects_unexpected_shape() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/games/list-json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"message": "moved"}).to_string())
        .create_async()
        .await;

    let client = live_client(&server);
    let result = client
        .legacy_search("obby", 10, &SessionCredentials::anonymous())
        .await;

    assert!(matches!(
        result,
        Err(UpstreamError::UnexpectedShape { .. })
    ));
}

#[tokio::test]
async fn test_live_universe_lookup() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/universes/v1/places/42/universe")
        .with_status(200)
        .with_body(json!({"universeId": 4242}).to_string())
        .create_async()
        .await;

    let client = live_client(&server);
    let universe = client
        .lookup_universe_id(42, &SessionCredentials::anonymous())
        .await
        .unwrap();
    assert_eq!(universe, Some(4242));
}

#[tokio::test]
async fn test_live_http_error_maps_to_network_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/explore-api/v1/get-sorts")
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    let client = live_client(&server);
    let result = client
        .fetch_sort_catalog("s", &SessionCredentials::anonymous())
        .await;

    assert!(matches!(
        result,
        Err(UpstreamError::NetworkError {
            source: NetworkingError::HttpStatus { status: 401, .. }
        })
    ));
}

// ============================================================================
// Mock Client Tests
// ============================================================================

#[tokio::test]
async fn test_mock_missing_response_is_unavailable() {
    let mock = MockUpstreamClient::new();
    let result = mock
        .fetch_sort_catalog("s", &SessionCredentials::anonymous())
        .await;
    assert!(matches!(result, Err(UpstreamError::Unavailable { .. })));
}

#[tokio::test]
async fn test_mock_details_filter_to_requested_ids_and_record_calls() {
    let mock = MockUpstreamClient::new()
        .with_details(Ok(vec![
            DetailRecord {
                id: 1,
                ..Default::default()
            },
            DetailRecord {
                id: 2,
                ..Default::default()
            },
        ]))
        .await;

    let details = mock
        .fetch_game_details(&[2, 3], &SessionCredentials::anonymous())
        .await
        .unwrap();

    assert_eq!(details.len(), 1);
    assert_eq!(details[0].id, 2);
    assert_eq!(mock.calls().await, vec!["details:2,3".to_string()]);
}
