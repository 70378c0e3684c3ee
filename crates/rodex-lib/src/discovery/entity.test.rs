use super::*;

#[test]
fn test_entity_rejects_missing_identity() {
    assert_eq!(
        GameEntity::new(0, 0, "Ghost").unwrap_err(),
        EntityError::MissingIdentity
    );
}

#[test]
fn test_entity_identity_prefers_universe() {
    let entity = GameEntity::new(383310974, 920587237, "Adopt Me!").unwrap();
    assert_eq!(entity.id(), 383310974);

    let entity = GameEntity::new(0, 920587237, "Adopt Me!").unwrap();
    assert_eq!(entity.id(), 920587237);
}

#[test]
fn test_entity_defaults() {
    let entity = GameEntity::new(1, 0, "Game").unwrap();
    assert_eq!(entity.player_count, 0);
    assert_eq!(entity.rating, 0.0);
    assert_eq!(entity.genre, Genre::Unknown);
    assert!(entity.tags.is_empty());
    assert!(!entity.verified);
    assert!(entity.thumbnail_url.is_none());
    assert!(entity.created_at.is_none());
    assert!(entity.last_played.is_none());
}

#[test]
fn test_rating_from_votes() {
    let mut entity = GameEntity::new(1, 0, "Game").unwrap();
    entity.apply_votes(80, 20);
    assert!((entity.rating - 4.0).abs() < f32::EPSILON);
}

#[test]
fn test_rating_without_votes_stays_default() {
    let mut entity = GameEntity::new(1, 0, "Game").unwrap();
    entity.apply_votes(0, 0);
    assert_eq!(entity.rating, 0.0);
}

#[test]
fn test_rating_stays_in_range_with_negative_votes() {
    let mut entity = GameEntity::new(1, 0, "Game").unwrap();
    entity.apply_votes(10, -5);
    assert!((entity.rating - MAX_RATING).abs() < f32::EPSILON);
}

#[test]
fn test_tags_are_an_ordered_set() {
    let mut entity = GameEntity::new(1, 0, "Game").unwrap();
    entity.add_tag("obby");
    entity.add_tag("pvp");
    entity.add_tag("obby");
    entity.add_tag("");
    assert_eq!(entity.tags, vec!["obby".to_string(), "pvp".to_string()]);
}

#[test]
fn test_non_negative_clamps() {
    assert_eq!(non_negative(None), 0);
    assert_eq!(non_negative(Some(-12)), 0);
    assert_eq!(non_negative(Some(42)), 42);
}

#[test]
fn test_entity_serializes_camel_case() {
    let entity = GameEntity::new(7, 8, "Game").unwrap();
    let value = serde_json::to_value(&entity).unwrap();
    assert_eq!(value["universeId"], 7);
    assert_eq!(value["placeId"], 8);
    assert_eq!(value["genre"], "unknown");
}

#[test]
fn test_deserialize_rejects_missing_identity() {
    let result = serde_json::from_value::<GameEntity>(serde_json::json!({
        "name": "Ghost",
        "placeId": 0,
        "universeId": 0,
    }));
    assert!(result.is_err());
}

#[test]
fn test_serialized_entity_reads_back() {
    let mut entity = GameEntity::new(0, 920587237, "Adopt Me!").unwrap();
    entity.genre = Genre::TownAndCity;
    entity.thumbnail_url = Some("https://img/adopt.png".to_string());
    entity.apply_votes(90, 10);
    entity.add_tag("pets");

    let json = serde_json::to_value(&entity).unwrap();
    let restored: GameEntity = serde_json::from_value(json).unwrap();

    assert_eq!(restored, entity);
    assert_eq!(restored.id(), 920587237);
}
