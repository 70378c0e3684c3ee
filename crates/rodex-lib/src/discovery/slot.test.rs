use super::*;
use crate::api::{DetailRecord, MockUpstreamClient};
use crate::discovery::orchestrator::DiscoveryLimits;
use crate::networking::SessionCredentials;
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn test_single_call_completes() {
    let slot = DiscoverySlot::new();
    assert_eq!(slot.run(async { 7 }).await, Some(7));
}

#[tokio::test]
async fn test_newer_call_supersedes_in_flight_call() {
    let slot = DiscoverySlot::new();

    let slow = slot.run(async {
        tokio::time::sleep(Duration::from_secs(30)).await;
        "stale"
    });
    let fast = async {
        tokio::task::yield_now().await;
        slot.run(async { "fresh" }).await
    };

    let (slow, fast) = tokio::join!(slow, fast);

    assert_eq!(slow, None);
    assert_eq!(fast, Some("fresh"));
}

#[tokio::test]
async fn test_sequential_calls_each_complete() {
    let slot = DiscoverySlot::new();
    assert_eq!(slot.run(async { 1 }).await, Some(1));
    assert_eq!(slot.run(async { 2 }).await, Some(2));
}

#[tokio::test]
async fn test_discover_through_slot() {
    let client = MockUpstreamClient::new()
        .with_recommendations(Ok(json!([{"contentType": "Game", "contentId": 12}])))
        .await
        .with_details(Ok(vec![DetailRecord {
            id: 12,
            name: Some("Twelve".to_string()),
            ..Default::default()
        }]))
        .await;
    let orchestrator = Arc::new(SourceOrchestrator::new(
        Arc::new(client),
        SessionCredentials::anonymous(),
        DiscoveryLimits::default(),
    ));
    let slot = DiscoverySlot::new();

    let outcome = slot
        .discover(orchestrator, DiscoveryIntent::Recommended, "", 20)
        .await
        .unwrap();

    assert_eq!(outcome.games.len(), 1);
    assert_eq!(outcome.games[0].name, "Twelve");
}

#[tokio::test]
async fn test_abandoned_caller_cancels_task() {
    use std::sync::atomic::AtomicBool;

    let slot = DiscoverySlot::new();
    let finished = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&finished);

    let abandoned = tokio::time::timeout(
        Duration::from_millis(20),
        slot.run(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            flag.store(true, Ordering::SeqCst);
        }),
    )
    .await;
    assert!(abandoned.is_err());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!finished.load(Ordering::SeqCst));
}
