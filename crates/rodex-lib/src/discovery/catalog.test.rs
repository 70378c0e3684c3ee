use super::*;
use serde_json::json;

fn descriptors(entries: &[(&str, &str)]) -> Vec<StrategyDescriptor> {
    entries
        .iter()
        .map(|(id, name)| StrategyDescriptor::new(*id, *name))
        .collect()
}

#[test]
fn test_pattern_matches_precede_remainder() {
    let catalog = descriptors(&[
        ("U1", "Up and Coming"),
        ("F1", "Fun with Friends"),
        ("T1", "Top Trending"),
    ]);

    assert_eq!(resolve_strategy_order(&catalog, "trending"), vec!["U1", "T1", "F1"]);
}

#[test]
fn test_known_ids_take_precedence() {
    let catalog = descriptors(&[
        ("T1", "Top Trending"),
        ("most-engaging", "Engaging"),
        ("misc", "Misc"),
        ("top-trending", "Whatever"),
    ]);

    assert_eq!(
        resolve_strategy_order(&catalog, "popular"),
        vec!["top-trending", "most-engaging", "T1", "misc"]
    );
}

#[test]
fn test_output_is_permutation_of_catalog() {
    let catalog = descriptors(&[
        ("a", "Alpha"),
        ("b", "Top Rated"),
        ("c", "Up and Coming"),
        ("up-and-coming", "Legacy"),
        ("d", "CCU Leaders"),
    ]);

    let mut ordered = resolve_strategy_order(&catalog, "trending");
    assert_eq!(ordered.len(), catalog.len());
    ordered.sort();
    let mut ids: Vec<String> = catalog.iter().map(|d| d.id.clone()).collect();
    ids.sort();
    assert_eq!(ordered, ids);
}

#[test]
fn test_duplicate_catalog_ids_appear_once() {
    let catalog = descriptors(&[("x", "Trending"), ("y", "Other"), ("x", "Trending again")]);
    assert_eq!(resolve_strategy_order(&catalog, "trending"), vec!["x", "y"]);
}

#[test]
fn test_generic_tokens_apply_to_any_intent() {
    let catalog = descriptors(&[
        ("s1", "Fun"),
        ("s2", "Coming Soon"),
        ("s3", "Survival Picks"),
    ]);

    assert_eq!(resolve_strategy_order(&catalog, "survival"), vec!["s2", "s3", "s1"]);
}

#[test]
fn test_pattern_matches_id_text() {
    let catalog = descriptors(&[("plain", ""), ("sort-trend-weekly", "")]);
    assert_eq!(
        resolve_strategy_order(&catalog, "trending"),
        vec!["sort-trend-weekly", "plain"]
    );
}

#[test]
fn test_empty_catalog_resolves_to_nothing() {
    assert!(resolve_strategy_order(&[], "trending").is_empty());
    assert_eq!(resolve_best_strategy(&[], TOP_RATED_PATTERNS), None);
}

#[test]
fn test_custom_rule_list() {
    let catalog = descriptors(&[("a", "Alpha"), ("b", "Beta"), ("c", "Gamma")]);
    let rules = vec![
        ResolutionRule::KnownIds(vec!["c".to_string(), "missing".to_string()]),
        ResolutionRule::NamePatterns(vec!["beta".to_string()]),
    ];

    assert_eq!(resolve_with_rules(&catalog, &rules), vec!["c", "b"]);
}

#[test]
fn test_best_strategy_matches_pattern() {
    let catalog = descriptors(&[("a", "Fun"), ("b", "Highest Rated"), ("c", "Top Rated")]);
    assert_eq!(resolve_best_strategy(&catalog, TOP_RATED_PATTERNS), Some("b".to_string()));
}

#[test]
fn test_best_strategy_falls_back_to_first_entry() {
    let catalog = descriptors(&[("a", "Fun"), ("b", "Friends")]);
    assert_eq!(resolve_best_strategy(&catalog, TOP_RATED_PATTERNS), Some("a".to_string()));
}

#[test]
fn test_patterns_for_intent() {
    assert_eq!(patterns_for_intent("Popular").len(), TRENDING_SYNONYMS.len());
    assert_eq!(patterns_for_intent("  Top Rated "), vec!["top rated".to_string()]);
    assert!(patterns_for_intent("  ").is_empty());
}

#[test]
fn test_parse_catalog_shapes() {
    let wrapped = json!({"sorts": [{"id": "a", "name": "Alpha"}]});
    let capital = json!({"Sorts": [{"sortId": 7, "displayName": "Seven"}]});
    let bare = json!([{"id": "b", "displayText": "Beta"}]);

    assert_eq!(parse_catalog(&wrapped), descriptors(&[("a", "Alpha")]));
    assert_eq!(parse_catalog(&capital), descriptors(&[("7", "Seven")]));
    assert_eq!(parse_catalog(&bare), descriptors(&[("b", "Beta")]));
    assert!(parse_catalog(&json!({"other": []})).is_empty());
    assert!(parse_catalog(&json!("sorts")).is_empty());
}

#[test]
fn test_parse_catalog_name_fallbacks() {
    let document = json!({"sorts": [
        {"id": "n1", "title": {"text": "Nested Text"}},
        {"id": "n2", "title": {"subtitle": "Sub", "caption": "Cap"}},
        {"id": "n3", "topic": "Loose", "blurb": "Words"},
        {"id": "n4", "name": "  ", "title": "Plain Title"}
    ]});

    assert_eq!(
        parse_catalog(&document),
        descriptors(&[
            ("n1", "Nested Text"),
            ("n2", "Sub Cap"),
            ("n3", "n3 Loose Words"),
            ("n4", "Plain Title"),
        ])
    );
}

#[test]
fn test_parse_catalog_skips_entries_without_id() {
    let document = json!({"sorts": [
        {"name": "No Id"},
        {"id": "", "name": "Blank"},
        {"id": null, "sortId": "fallback", "name": "Fallback"},
        "not an object"
    ]});

    assert_eq!(parse_catalog(&document), descriptors(&[("fallback", "Fallback")]));
}
