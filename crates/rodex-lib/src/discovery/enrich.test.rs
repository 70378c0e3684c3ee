use super::*;
use crate::api::{MockUpstreamClient, ThumbnailRecord};

fn detail(id: u64, name: &str) -> DetailRecord {
    DetailRecord {
        id,
        name: Some(name.to_string()),
        ..Default::default()
    }
}

fn icon(id: u64, url: &str) -> ThumbnailRecord {
    ThumbnailRecord {
        target_id: id,
        state: Some("Completed".to_string()),
        image_url: Some(url.to_string()),
    }
}

#[tokio::test]
async fn test_details_and_icons_keyed_by_id() {
    let client = MockUpstreamClient::new()
        .with_details(Ok(vec![detail(1, "One"), detail(2, "Two")]))
        .await
        .with_game_icons(Ok(vec![icon(1, "https://img/1.png")]))
        .await;

    let bundle = fetch_enrichment(
        &client,
        &[1, 2],
        &SessionCredentials::anonymous(),
        EnrichmentMode::Primary,
        50,
    )
    .await;

    assert_eq!(bundle.details.len(), 2);
    assert_eq!(bundle.details[&2].name.as_deref(), Some("Two"));
    assert_eq!(bundle.icons.get(&1).map(String::as_str), Some("https://img/1.png"));
    assert!(!bundle.icons.contains_key(&2));
    assert!(bundle.detail_error.is_none());
}

#[tokio::test]
async fn test_batch_truncated_before_dispatch() {
    let client = MockUpstreamClient::new();
    let ids: Vec<u64> = (1..=5).collect();

    fetch_enrichment(
        &client,
        &ids,
        &SessionCredentials::anonymous(),
        EnrichmentMode::Primary,
        3,
    )
    .await;

    let calls = client.calls().await;
    assert!(calls.contains(&"details:1,2,3".to_string()));
    assert!(calls.contains(&"icons:1,2,3".to_string()));
}

#[tokio::test]
async fn test_empty_ids_make_no_requests() {
    let client = MockUpstreamClient::new();

    let bundle = fetch_enrichment(
        &client,
        &[],
        &SessionCredentials::anonymous(),
        EnrichmentMode::Primary,
        50,
    )
    .await;

    assert_eq!(bundle, EnrichmentBundle::default());
    assert!(client.calls().await.is_empty());
}

#[tokio::test]
async fn test_primary_detail_failure_recorded() {
    let client = MockUpstreamClient::new()
        .with_details(Err("detail service down".to_string()))
        .await
        .with_game_icons(Ok(vec![icon(1, "https://img/1.png")]))
        .await;

    let bundle = fetch_enrichment(
        &client,
        &[1],
        &SessionCredentials::anonymous(),
        EnrichmentMode::Primary,
        50,
    )
    .await;

    assert!(bundle.details.is_empty());
    assert!(bundle.detail_error.unwrap().contains("detail service down"));
    assert_eq!(bundle.icons.len(), 1);
}

#[tokio::test]
async fn test_best_effort_detail_failure_swallowed() {
    let client = MockUpstreamClient::new()
        .with_details(Err("detail service down".to_string()))
        .await;

    let bundle = fetch_enrichment(
        &client,
        &[1],
        &SessionCredentials::anonymous(),
        EnrichmentMode::BestEffort,
        50,
    )
    .await;

    assert!(bundle.details.is_empty());
    assert!(bundle.detail_error.is_none());
}

#[tokio::test]
async fn test_icon_failure_keeps_details() {
    let client = MockUpstreamClient::new()
        .with_details(Ok(vec![detail(1, "One")]))
        .await
        .with_game_icons(Err("thumbnails down".to_string()))
        .await;

    let bundle = fetch_enrichment(
        &client,
        &[1],
        &SessionCredentials::anonymous(),
        EnrichmentMode::Primary,
        50,
    )
    .await;

    assert_eq!(bundle.details.len(), 1);
    assert!(bundle.icons.is_empty());
    assert!(bundle.detail_error.is_none());
}

#[tokio::test]
async fn test_unusable_icons_dropped() {
    let blocked = ThumbnailRecord {
        target_id: 2,
        state: Some("Blocked".to_string()),
        image_url: Some("https://img/2.png".to_string()),
    };
    let client = MockUpstreamClient::new()
        .with_game_icons(Ok(vec![icon(1, "  "), blocked]))
        .await;

    let bundle = fetch_enrichment(
        &client,
        &[1, 2],
        &SessionCredentials::anonymous(),
        EnrichmentMode::Primary,
        50,
    )
    .await;

    assert!(bundle.icons.is_empty());
}
