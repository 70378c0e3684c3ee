use super::*;
use serde_json::json;

#[test]
fn test_decode_detail_records_skips_malformed_entries() {
    let document = json!({
        "data": [
            {"id": 1, "name": "Alpha", "playing": 10},
            {"name": "no id here"},
            {"id": "not-a-number"},
            {"id": 2, "playing": null, "creator": {"id": 7, "name": "Dev", "hasVerifiedBadge": true}}
        ]
    });

    let records: Vec<DetailRecord> = decode_records(&document, &["data"]);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, 1);
    assert_eq!(records[0].playing, Some(10));
    assert_eq!(records[1].playing, None);
    assert_eq!(
        records[1].creator.as_ref().and_then(|c| c.has_verified_badge),
        Some(true)
    );
}

#[test]
fn test_decode_records_accepts_bare_array() {
    let document = json!([{"targetId": 5, "state": "Completed", "imageUrl": "https://img/5"}]);
    let records: Vec<ThumbnailRecord> = decode_records(&document, &["data"]);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].usable_url(), Some("https://img/5"));
}

#[test]
fn test_decode_records_without_array_is_empty() {
    let records: Vec<ThumbnailRecord> = decode_records(&json!({"errors": []}), &["data"]);
    assert!(records.is_empty());

    let records: Vec<ThumbnailRecord> = decode_records(&json!("text"), &["data"]);
    assert!(records.is_empty());
}

#[test]
fn test_thumbnail_error_state_is_unusable() {
    let record = ThumbnailRecord {
        target_id: 1,
        state: Some("Error".to_string()),
        image_url: Some("https://img/1".to_string()),
    };
    assert_eq!(record.usable_url(), None);

    let record = ThumbnailRecord {
        target_id: 1,
        state: Some("Completed".to_string()),
        image_url: Some("  ".to_string()),
    };
    assert_eq!(record.usable_url(), None);
}

#[test]
fn test_legacy_record_pascal_case_fields() {
    let document = json!([{
        "PlaceID": 920587237,
        "UniverseID": 383310974,
        "Name": "Adopt Me!",
        "CreatorName": "Uplift Games",
        "CreatorID": 295182,
        "PlayerCount": 120000,
        "TotalUpVotes": 80,
        "TotalDownVotes": 20
    }]);

    let records: Vec<LegacyGameRecord> = decode_records(&document, &["games"]);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].place_id, Some(920587237));
    assert_eq!(records[0].universe_id, Some(383310974));
    assert_eq!(records[0].creator_name.as_deref(), Some("Uplift Games"));
    assert_eq!(records[0].total_up_votes, Some(80));
}
