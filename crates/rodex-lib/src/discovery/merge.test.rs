use super::*;
use crate::api::DetailCreator;

fn detail(id: u64, name: &str) -> DetailRecord {
    DetailRecord {
        id,
        name: Some(name.to_string()),
        ..Default::default()
    }
}

fn details(records: Vec<DetailRecord>) -> HashMap<u64, DetailRecord> {
    records.into_iter().map(|r| (r.id, r)).collect()
}

#[test]
fn test_order_follows_ids_and_drops_missing_details() {
    let details = details(vec![detail(3, "Three"), detail(9, "Nine")]);
    let icons = HashMap::new();

    let games = merge(&[5, 9, 3], &details, &icons);

    let ids: Vec<u64> = games.iter().map(GameEntity::id).collect();
    assert_eq!(ids, vec![9, 3]);
    assert_eq!(games[0].name, "Nine");
}

#[test]
fn test_missing_icons_leave_thumbnail_empty() {
    let details = details(vec![detail(1, "One"), detail(2, "Two")]);
    let icons = HashMap::from([(2, "https://img/2.png".to_string())]);

    let games = merge(&[1, 2], &details, &icons);

    assert_eq!(games.len(), 2);
    assert!(games[0].thumbnail_url.is_none());
    assert_eq!(games[1].thumbnail_url.as_deref(), Some("https://img/2.png"));
}

#[test]
fn test_nested_creator_wins() {
    let record = DetailRecord {
        creator: Some(DetailCreator {
            id: Some(44),
            name: Some("Studio".to_string()),
            has_verified_badge: Some(true),
        }),
        creator_id: Some(1),
        creator_name: Some("Flat".to_string()),
        ..detail(7, "Game")
    };

    let games = merge(&[7], &details(vec![record]), &HashMap::new());

    assert_eq!(games[0].creator_id, 44);
    assert_eq!(games[0].creator_name, "Studio");
    assert!(games[0].verified);
}

#[test]
fn test_flat_creator_fallback() {
    let record = DetailRecord {
        creator_id: Some(12),
        creator_name: Some("Solo Dev".to_string()),
        ..detail(7, "Game")
    };

    let games = merge(&[7], &details(vec![record]), &HashMap::new());

    assert_eq!(games[0].creator_id, 12);
    assert_eq!(games[0].creator_name, "Solo Dev");
    assert!(!games[0].verified);
}

#[test]
fn test_numeric_fields_clamped_and_defaulted() {
    let record = DetailRecord {
        root_place_id: Some(-3),
        playing: Some(-100),
        description: None,
        genre: Some("Sci-Fi".to_string()),
        ..detail(7, "Game")
    };

    let games = merge(&[7], &details(vec![record]), &HashMap::new());

    assert_eq!(games[0].place_id, 0);
    assert_eq!(games[0].universe_id, 7);
    assert_eq!(games[0].player_count, 0);
    assert_eq!(games[0].description, "");
    assert_eq!(games[0].genre, Genre::SciFi);
    assert_eq!(games[0].rating, 0.0);
}

#[test]
fn test_place_id_and_players_carried() {
    let record = DetailRecord {
        root_place_id: Some(920587237),
        playing: Some(150_000),
        ..detail(383310974, "Adopt Me!")
    };

    let games = merge(&[383310974], &details(vec![record]), &HashMap::new());

    assert_eq!(games[0].place_id, 920587237);
    assert_eq!(games[0].player_count, 150_000);
}
