#[test]
fn test_intent_display() {
    assert_eq!(DiscoveryIntent::TopRated.to_string(), "top-rated");
    assert_eq!(DiscoveryIntent::Recommended.to_string(), "recommended");
}

#[test]
fn test_intent_resolver_strings() {
    assert_eq!(DiscoveryIntent::Trending.as_str(), "trending");
    assert_eq!(DiscoveryIntent::Popular.as_str(), "popular");
    assert_eq!(DiscoveryIntent::TopRated.as_str(), "top rated");
}

#[test]
fn test_genre_from_label() {
    assert_eq!(Genre::from_label("Town and City"), Genre::TownAndCity);
    assert_eq!(Genre::from_label("Sci-Fi"), Genre::SciFi);
    assert_eq!(Genre::from_label("FPS"), Genre::Fps);
    assert_eq!(Genre::from_label("All"), Genre::Unknown);
    assert_eq!(Genre::from_label(""), Genre::Unknown);
}

#[test]
fn test_genre_default_is_unknown() {
    assert_eq!(Genre::default(), Genre::Unknown);
    assert_eq!(Genre::default().to_string(), "unknown");
}
