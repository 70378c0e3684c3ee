use super::*;
use serde_json::json;

fn games(document: &Value, cap: usize) -> Vec<u64> {
    extract_ids(document, "contentType", "Game", "contentId", cap)
}

#[test]
fn test_numeric_string_and_integer_dedup() {
    let document = json!({
        "sorts": [
            {"contentType": "Game", "contentId": "555"},
            {"games": [{"contentType": "Game", "contentId": 555}]}
        ]
    });

    assert_eq!(games(&document, 40), vec![555]);
}

#[test]
fn test_first_seen_order_across_depths() {
    let document = json!({
        "sections": [
            {"items": [
                {"contentType": "Game", "contentId": 3},
                {"contentType": "Game", "contentId": 1}
            ]},
            {"contentType": "Game", "contentId": 2, "nested": {"contentType": "Game", "contentId": 3}}
        ]
    });

    assert_eq!(games(&document, 40), vec![3, 1, 2]);
}

#[test]
fn test_parent_match_precedes_children() {
    let document = json!({
        "contentType": "Game",
        "contentId": 10,
        "related": [{"contentType": "Game", "contentId": 20}]
    });

    assert_eq!(games(&document, 40), vec![10, 20]);
}

#[test]
fn test_cap_limits_unique_ids() {
    let items: Vec<Value> = (1..=100)
        .map(|id| json!({"contentType": "Game", "contentId": id}))
        .collect();
    let document = json!({ "items": items });

    let ids = games(&document, 40);
    assert_eq!(ids.len(), 40);
    assert_eq!(ids.first(), Some(&1));
    assert_eq!(ids.last(), Some(&40));
}

#[test]
fn test_duplicates_do_not_consume_cap() {
    let document = json!([
        {"contentType": "Game", "contentId": 1},
        {"contentType": "Game", "contentId": 1},
        {"contentType": "Game", "contentId": 2}
    ]);

    assert_eq!(games(&document, 2), vec![1, 2]);
}

#[test]
fn test_zero_cap_is_empty() {
    let document = json!([{"contentType": "Game", "contentId": 1}]);
    assert!(games(&document, 0).is_empty());
}

#[test]
fn test_non_matching_discriminators_ignored() {
    let document = json!([
        {"contentType": "Experience", "contentId": 1},
        {"contentType": "game", "contentId": 2},
        {"contentType": ["Game"], "contentId": 3},
        {"contentId": 4}
    ]);

    assert!(games(&document, 40).is_empty());
}

#[test]
fn test_invalid_ids_skipped_silently() {
    let document = json!([
        {"contentType": "Game", "contentId": "abc"},
        {"contentType": "Game", "contentId": -5},
        {"contentType": "Game", "contentId": 1.5},
        {"contentType": "Game", "contentId": null},
        {"contentType": "Game", "contentId": 0},
        {"contentType": "Game", "contentId": " 77 "},
        {"contentType": "Game", "contentId": 88}
    ]);

    assert_eq!(games(&document, 40), vec![77, 88]);
}

#[test]
fn test_custom_predicate() {
    let document = json!({"data": [{"kind": "Universe", "universeId": "12"}]});
    assert_eq!(extract_ids(&document, "kind", "Universe", "universeId", 5), vec![12]);
}

#[test]
fn test_bytes_not_json_is_empty() {
    assert!(extract_ids_from_bytes(b"<html>502</html>", &GAME_CONTENT, 40).is_empty());
    assert!(extract_ids_from_bytes(b"{\"items\": [{\"contentType\"", &GAME_CONTENT, 40).is_empty());
    assert!(extract_ids_from_bytes(b"", &GAME_CONTENT, 40).is_empty());
}

#[test]
fn test_bytes_valid_json() {
    let body = br#"{"a":[{"contentType":"Game","contentId":"9"}]}"#;
    assert_eq!(extract_ids_from_bytes(body, &GAME_CONTENT, 40), vec![9]);
}
